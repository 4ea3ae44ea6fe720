use log::{debug, trace};
use noisy_float::prelude::n64;

use crate::model::Characteristic;

const REFINE_ITERATIONS: usize = 64;

/// Sample where the load and source characteristics are closest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperatingPoint {
    /// Index into the sampled currents.
    pub index: usize,
    pub current: f64,
    /// Load voltage at `current`.
    pub voltage: f64,
}

/// First index of the smallest gap, `None` when there are no gaps at all.
///
/// NaN gaps never win.
pub fn closest_index<I: IntoIterator<Item = f64>>(gaps: I) -> Option<usize> {
    gaps.into_iter()
        .enumerate()
        .min_by_key(|&(_, gap)| n64(if gap.is_nan() { std::f64::INFINITY } else { gap }))
        .map(|(ix, _)| ix)
}

impl OperatingPoint {
    /// Discrete intersection of `load` and `source` over `currents`.
    ///
    /// The result is always one of the sampled currents; when the curves don't cross in range
    /// it is the sample with the smallest gap.
    pub fn find<L, S>(currents: &[f64], load: &L, source: &S) -> Option<OperatingPoint>
    where
        L: Characteristic,
        S: Characteristic,
    {
        debug_time!("operating point search over {} samples", currents.len());
        let index = closest_index(
            currents
                .iter()
                .map(|&i| (load.evaluate(i) - source.evaluate(i)).abs()),
        )?;
        let current = currents[index];
        let point = OperatingPoint {
            index,
            current,
            voltage: load.evaluate(current),
        };
        debug!("{} / {}: {:?}", load, source, point);
        Some(point)
    }

    /// Bisects the gap between this sample and the adjacent one on the other side of the
    /// crossing. Returns the point unchanged when no neighbour brackets a sign change.
    pub fn refine<L, S>(&self, currents: &[f64], load: &L, source: &S) -> OperatingPoint
    where
        L: Characteristic,
        S: Characteristic,
    {
        let gap = |i: f64| load.evaluate(i) - source.evaluate(i);

        let own_gap = gap(self.current);
        if own_gap == 0.0 || !own_gap.is_finite() {
            return *self;
        }

        let neighbour = [self.index.checked_sub(1), self.index.checked_add(1)]
            .iter()
            .filter_map(|ix| ix.and_then(|ix| currents.get(ix)).cloned())
            .find(|&i| {
                let other_gap = gap(i);
                other_gap.is_finite() && (other_gap < 0.0) != (own_gap < 0.0)
            });

        let neighbour = match neighbour {
            Some(neighbour) => neighbour,
            None => {
                trace!("no sign change around sample {}", self.index);
                return *self;
            }
        };

        let (mut lo, mut hi) = if neighbour < self.current {
            (neighbour, self.current)
        } else {
            (self.current, neighbour)
        };
        let mut lo_gap = gap(lo);

        for iteration in 0..REFINE_ITERATIONS {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                trace!("bisection exhausted precision after {} steps", iteration);
                break;
            }
            let mid_gap = gap(mid);
            if mid_gap == 0.0 {
                lo = mid;
                hi = mid;
                break;
            }
            if (mid_gap < 0.0) == (lo_gap < 0.0) {
                lo = mid;
                lo_gap = mid_gap;
            } else {
                hi = mid;
            }
        }

        let current = if gap(lo).abs() <= gap(hi).abs() {
            lo
        } else {
            hi
        };
        let refined = OperatingPoint {
            index: self.index,
            current,
            voltage: load.evaluate(current),
        };
        debug!("refined {:?} to {:?}", self, refined);
        refined
    }
}
