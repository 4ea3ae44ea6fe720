pub mod file;

use std::fmt::Display;

use itertools::{multizip, Itertools};
use log::{trace, warn};

use crate::metrics::PowerMetrics;
use crate::model::source::SourceSummary;
use crate::model::{Characteristic, TheveninSource};
use crate::operating_point::{closest_index, OperatingPoint};
use crate::sweep::CurrentSweep;

/// Both characteristics sampled over the same currents, as plotted by a front-end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curves {
    pub current: Vec<f64>,
    pub load_voltage: Vec<f64>,
    pub source_voltage: Vec<f64>,
}

impl Curves {
    pub fn new(current: Vec<f64>, load_voltage: Vec<f64>, source_voltage: Vec<f64>) -> Self {
        assert_eq!(current.len(), load_voltage.len());
        assert_eq!(current.len(), source_voltage.len());
        Curves {
            current,
            load_voltage,
            source_voltage,
        }
    }

    pub fn sample<L, S>(sweep: &CurrentSweep, load: &L, source: &S) -> Self
    where
        L: Characteristic,
        S: Characteristic,
    {
        debug_time!("sampling {} over {} points", load, sweep.points);
        let current = sweep.samples();
        let load_voltage = current.iter().map(|&i| load.evaluate(i)).collect_vec();
        let source_voltage = current.iter().map(|&i| source.evaluate(i)).collect_vec();
        Curves::new(current, load_voltage, source_voltage)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// `(i, u_load, u_source)` triples in sweep order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (f64, f64, f64)> + 'a {
        multizip((
            self.current.iter().cloned(),
            self.load_voltage.iter().cloned(),
            self.source_voltage.iter().cloned(),
        ))
    }

    /// Power dissipated by the load at every sample.
    pub fn load_power(&self) -> Vec<f64> {
        self.current
            .iter()
            .zip(self.load_voltage.iter())
            .map(|(i, u)| i * u)
            .collect_vec()
    }

    /// Same argmin as [`OperatingPoint::find`], over the stored voltages.
    pub fn operating_point(&self) -> Option<OperatingPoint> {
        let gaps = self
            .iter()
            .map(|(_, u_load, u_source)| (u_load - u_source).abs());
        let index = closest_index(gaps)?;
        Some(OperatingPoint {
            index,
            current: self.current[index],
            voltage: self.load_voltage[index],
        })
    }

    /// Thévenin parameters the source curve was drawn from: `r` is the slope between the
    /// first and last samples, `E` the source voltage extended back to zero current.
    /// `None` without two distinct currents.
    pub fn source(&self) -> Option<TheveninSource> {
        if self.len() < 2 {
            return None;
        }
        let last = self.len() - 1;
        let span = self.current[last] - self.current[0];
        if span == 0.0 || span.is_nan() {
            return None;
        }

        let internal_resistance = (self.source_voltage[0] - self.source_voltage[last]) / span;
        let emf = self.source_voltage[0] + internal_resistance * self.current[0];
        let source = TheveninSource::new(emf, internal_resistance);
        trace!("source recovered from {} samples: {:?}", self.len(), source);
        Some(source)
    }

    /// Power metrics at `point` for the recovered source, if there is one.
    pub fn metrics(&self, point: &OperatingPoint) -> Option<PowerMetrics> {
        match self.source() {
            Some(source) => Some(PowerMetrics::derive(point, &source)),
            None => {
                warn!(
                    "Can't recover E and r from {} samples, skipping power metrics",
                    self.len()
                );
                None
            }
        }
    }

    pub fn summary(&self) -> CurvesSummary<'_> {
        CurvesSummary(self)
    }
}

pub struct CurvesSummary<'a>(&'a Curves);

impl<'a> Display for CurvesSummary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Samples\t{}", self.0.len())?;
        if let Some(source) = self.0.source() {
            write!(f, "{}", SourceSummary(&source))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::metrics::PowerMetrics;
    use crate::model::{Load, TheveninSource};
    use crate::operating_point::OperatingPoint;
    use crate::sweep::CurrentSweep;
    use crate::trace::Curves;

    #[test]
    fn stored_curves_give_the_same_operating_point() {
        let source = TheveninSource::new(12.0, 1.0);
        let sweep = CurrentSweep::for_source(&source, 600);
        for load in &[
            Load::resistor(10.0),
            Load::lamp(10.0, 0.5),
            Load::motor(10.0, 0.2),
        ] {
            let curves = Curves::sample(&sweep, load, &source);
            assert_eq!(
                curves.operating_point(),
                OperatingPoint::find(&curves.current, load, &source)
            );
        }
    }

    #[test]
    fn load_power_is_current_times_voltage() {
        let source = TheveninSource::new(12.0, 1.0);
        let load = Load::lamp(10.0, 0.5);
        let curves = Curves::sample(&CurrentSweep::for_source(&source, 200), &load, &source);
        let power = curves.load_power();

        assert_eq!(power.len(), 200);
        assert_eq!(power[0], 0.0);
        for (p, (i, u, _)) in power.iter().zip(curves.iter()) {
            assert_eq!(*p, i * u);
        }
    }

    #[test]
    fn source_is_recovered_from_curves() {
        let source = TheveninSource::new(9.0, 0.45);
        let curves =
            Curves::sample(&CurrentSweep::for_source(&source, 250), &Load::default(), &source);
        let recovered = curves.source().unwrap();
        assert_relative_eq!(recovered.emf, 9.0, epsilon = 1e-9);
        assert_relative_eq!(recovered.internal_resistance, 0.45, epsilon = 1e-9);
    }

    #[test]
    fn emf_is_the_source_voltage_at_zero_current() {
        let curves = Curves::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 10.0, 20.0],
            vec![12.0, 11.0, 10.0],
        );
        assert_eq!(curves.source(), Some(TheveninSource::new(12.0, 1.0)));
    }

    #[test]
    fn source_is_extended_back_to_zero_current() {
        let source = TheveninSource::new(6.0, 2.0);
        let current = vec![0.5, 1.0, 2.5];
        let source_voltage = current.iter().map(|&i| source.terminal_voltage(i)).collect();
        let curves = Curves::new(current, vec![0.0; 3], source_voltage);
        let recovered = curves.source().unwrap();
        assert_relative_eq!(recovered.emf, 6.0, epsilon = 1e-12);
        assert_relative_eq!(recovered.internal_resistance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn no_metrics_without_distinct_currents() {
        let single = Curves::new(vec![0.5], vec![5.0], vec![11.5]);
        let point = single.operating_point().unwrap();
        assert_eq!(single.source(), None);
        assert_eq!(single.metrics(&point), None);
        assert_eq!(single.summary().to_string(), "Samples\t1\n");

        let flat = Curves::new(vec![1.0, 1.0], vec![10.0, 10.0], vec![11.0, 11.0]);
        let point = flat.operating_point().unwrap();
        assert_eq!(flat.source(), None);
        assert_eq!(flat.metrics(&point), None);
    }

    #[test]
    fn metrics_from_stored_curves() {
        let source = TheveninSource::new(12.0, 1.0);
        let load = Load::resistor(10.0);
        let curves = Curves::sample(&CurrentSweep::for_source(&source, 600), &load, &source);
        let point = curves.operating_point().unwrap();
        let metrics = curves.metrics(&point).unwrap();
        let expected = PowerMetrics::derive(&point, &source);
        assert_relative_eq!(metrics.load_power, expected.load_power, epsilon = 1e-9);
        assert_relative_eq!(metrics.efficiency, expected.efficiency, epsilon = 1e-9);
    }

    #[test]
    fn empty_curves() {
        let curves = Curves::default();
        assert!(curves.is_empty());
        assert_eq!(curves.operating_point(), None);
        assert_eq!(curves.source(), None);
        assert_eq!(curves.summary().to_string(), "Samples\t0\n");
    }

    #[test]
    #[should_panic]
    fn mismatched_lengths_are_rejected() {
        Curves::new(vec![0.0, 1.0], vec![0.0], vec![0.0, 1.0]);
    }
}
