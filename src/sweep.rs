use itertools::Itertools;
use itertools_num::linspace;

use crate::model::TheveninSource;

/// Evenly spaced currents over `[0, max_current]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentSweep {
    pub max_current: f64,
    pub points: usize,
}

impl CurrentSweep {
    pub fn new(max_current: f64, points: usize) -> Self {
        CurrentSweep {
            max_current,
            points,
        }
    }

    /// Sweeps up to the short-circuit current, where the source characteristic crosses zero.
    pub fn for_source(source: &TheveninSource, points: usize) -> Self {
        CurrentSweep::new(source.short_circuit_current(), points)
    }

    pub fn step(&self) -> f64 {
        if self.points < 2 {
            0.0
        } else {
            self.max_current / (self.points - 1) as f64
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let max_current = self.max_current;
        linspace(0.0, max_current, self.points).map(move |i| i.min(max_current))
    }

    pub fn samples(&self) -> Vec<f64> {
        trace_time!("sampling {} currents", self.points);
        self.iter().collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use itertools::Itertools;

    use crate::model::TheveninSource;
    use crate::sweep::CurrentSweep;

    #[test]
    fn spans_zero_to_short_circuit_current() {
        let sweep = CurrentSweep::for_source(&TheveninSource::new(12.0, 1.0), 600);
        assert_eq!(sweep.max_current, 12.0);

        let samples = sweep.samples();
        assert_eq!(samples.len(), 600);
        assert_eq!(samples[0], 0.0);
        assert_relative_eq!(samples[599], 12.0, epsilon = 1e-12);
        assert_relative_eq!(sweep.step(), 12.0 / 599.0);
    }

    #[test]
    fn samples_are_ascending_and_in_range() {
        for &(emf, r, n) in &[(12.0, 1.0, 200), (48.0, 0.05, 2000), (1.0, 10.0, 650)] {
            let sweep = CurrentSweep::for_source(&TheveninSource::new(emf, r), n);
            let samples = sweep.samples();
            assert_eq!(samples.len(), n);
            for (a, b) in samples.iter().tuple_windows() {
                assert!(a <= b);
            }
            assert!(samples
                .iter()
                .all(|&i| 0.0 <= i && i <= sweep.max_current));
        }
    }

    #[test]
    fn degenerate_sizes() {
        assert!(CurrentSweep::new(1.0, 0).samples().is_empty());
        assert_eq!(CurrentSweep::new(1.0, 1).samples(), vec![0.0]);
        assert_eq!(CurrentSweep::new(1.0, 1).step(), 0.0);
    }
}
