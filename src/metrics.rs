use std::fmt::Display;

use crate::model::TheveninSource;
use crate::operating_point::OperatingPoint;

/// Power balance at the operating point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerMetrics {
    /// Dissipated by the load, `I⋅U`.
    pub load_power: f64,
    /// Lost in the internal resistance, `I²⋅r`.
    pub source_loss: f64,
    /// Supplied by the EMF, `I⋅E`.
    pub input_power: f64,
    /// `load_power / input_power`, NaN when no power is supplied.
    pub efficiency: f64,
}

impl PowerMetrics {
    pub fn derive(point: &OperatingPoint, source: &TheveninSource) -> Self {
        let load_power = point.current * point.voltage;
        let source_loss = point.current * point.current * source.internal_resistance;
        let input_power = point.current * source.emf;
        let efficiency = if input_power > 0.0 {
            load_power / input_power
        } else {
            std::f64::NAN
        };

        PowerMetrics {
            load_power,
            source_loss,
            input_power,
            efficiency,
        }
    }

    pub fn has_efficiency(&self) -> bool {
        !self.efficiency.is_nan()
    }

    pub fn efficiency_percent(&self) -> f64 {
        100.0 * self.efficiency
    }

    /// `input − (load + loss)`, zero up to the sampling error of the operating point.
    pub fn imbalance(&self) -> f64 {
        self.input_power - (self.load_power + self.source_loss)
    }
}

impl Display for PowerMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "P_load\t{:.4} W", self.load_power)?;
        writeln!(f, "P_lost (r)\t{:.4} W", self.source_loss)?;
        writeln!(f, "Efficiency\t{:.2} %", self.efficiency_percent())?;
        Ok(())
    }
}
