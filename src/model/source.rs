use std::fmt::Display;

use crate::model::Characteristic;
use crate::util::Engineering;

/// Lower bound of the sweep span, keeps it non-empty when `r` is vanishingly small.
pub const MIN_CURRENT_SPAN: f64 = 0.000_001;

/// Ideal EMF in series with an internal resistance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TheveninSource {
    pub emf: f64,
    pub internal_resistance: f64,
}

impl Default for TheveninSource {
    fn default() -> Self {
        TheveninSource {
            emf: 12.0,
            internal_resistance: 1.0,
        }
    }
}

impl TheveninSource {
    pub fn new(emf: f64, internal_resistance: f64) -> Self {
        TheveninSource {
            emf,
            internal_resistance,
        }
    }

    pub fn terminal_voltage(&self, i: f64) -> f64 {
        self.emf - self.internal_resistance * i
    }

    /// Current at which the terminal voltage reaches zero, floored at [`MIN_CURRENT_SPAN`].
    pub fn short_circuit_current(&self) -> f64 {
        (self.emf / self.internal_resistance).max(MIN_CURRENT_SPAN)
    }
}

impl Characteristic for TheveninSource {
    fn evaluate(&self, i: f64) -> f64 {
        self.terminal_voltage(i)
    }
}

impl Display for TheveninSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E={:.2} V, r={:.2} Ω", self.emf, self.internal_resistance)
    }
}

/// Engineering-notation rendering, used in trace summaries.
pub struct SourceSummary<'a>(pub &'a TheveninSource);

impl<'a> Display for SourceSummary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "E\t{:.3}V", Engineering(self.0.emf))?;
        writeln!(f, "r\t{:.3}Ω", Engineering(self.0.internal_resistance))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::model::source::{SourceSummary, TheveninSource, MIN_CURRENT_SPAN};
    use crate::model::Characteristic;

    #[test]
    fn open_circuit_voltage_is_emf() {
        let source = TheveninSource::new(12.0, 1.0);
        assert_eq!(source.evaluate(0.0), 12.0);
    }

    #[test]
    fn terminal_voltage_vanishes_at_short_circuit() {
        for &(emf, r) in &[(12.0, 1.0), (48.0, 0.05), (1.0, 10.0), (7.5, 0.35)] {
            let source = TheveninSource::new(emf, r);
            assert_eq!(source.short_circuit_current(), emf / r);
            assert_abs_diff_eq!(
                source.terminal_voltage(source.short_circuit_current()),
                0.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn short_circuit_current_is_floored() {
        let source = TheveninSource::new(0.0, 1.0);
        assert_eq!(source.short_circuit_current(), MIN_CURRENT_SPAN);

        let source = TheveninSource::new(1e-9, 10.0);
        assert_eq!(source.short_circuit_current(), MIN_CURRENT_SPAN);
    }

    #[test]
    fn summary_uses_si_prefixes() {
        let source = TheveninSource::new(12.0, 0.05);
        assert_eq!(
            SourceSummary(&source).to_string(),
            "E\t12.000V\nr\t50.000mΩ\n"
        );
        assert_eq!(source.to_string(), "E=12.00 V, r=0.05 Ω");
    }
}
