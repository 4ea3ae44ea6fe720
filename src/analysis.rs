use std::fmt::Display;

use crate::metrics::PowerMetrics;
use crate::model::{Load, TheveninSource};
use crate::operating_point::OperatingPoint;
use crate::sweep::CurrentSweep;
use crate::trace::Curves;

/// A source driving a single load.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circuit {
    pub source: TheveninSource,
    pub load: Load,
}

impl Circuit {
    pub fn new(source: TheveninSource, load: Load) -> Self {
        Circuit { source, load }
    }

    pub fn sweep(&self, points: usize) -> CurrentSweep {
        CurrentSweep::for_source(&self.source, points)
    }

    /// Samples both characteristics over `points` currents and locates the operating point.
    /// `None` when there's nothing to sample.
    pub fn analyze(&self, points: usize) -> Option<Analysis> {
        info_time!("analysis of {} with {}", self.load, self.source);
        let sweep = self.sweep(points);
        let curves = Curves::sample(&sweep, &self.load, &self.source);
        let operating_point = OperatingPoint::find(&curves.current, &self.load, &self.source)?;
        let metrics = PowerMetrics::derive(&operating_point, &self.source);

        Some(Analysis {
            circuit: *self,
            sweep,
            curves,
            operating_point,
            metrics,
        })
    }
}

/// Everything a front-end needs to draw and annotate one parameter set.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub circuit: Circuit,
    pub sweep: CurrentSweep,
    pub curves: Curves,
    pub operating_point: OperatingPoint,
    pub metrics: PowerMetrics,
}

impl Analysis {
    /// Replaces the sampled operating point with the bisected intersection.
    pub fn refined(self) -> Analysis {
        let operating_point = self.operating_point.refine(
            &self.curves.current,
            &self.circuit.load,
            &self.circuit.source,
        );
        let metrics = PowerMetrics::derive(&operating_point, &self.circuit.source);
        Analysis {
            operating_point,
            metrics,
            ..self
        }
    }

    pub fn load_power(&self) -> Vec<f64> {
        self.curves.load_power()
    }

    pub fn title(&self) -> String {
        format!("{} — {}", self.circuit.source, self.circuit.load.name())
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.title())?;
        writeln!(f, "{}", self.circuit.load)?;
        writeln!(f, "I*\t{:.4} A", self.operating_point.current)?;
        writeln!(f, "U*\t{:.4} V", self.operating_point.voltage)?;
        write!(f, "{}", self.metrics)
    }
}
