use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use std::fmt::Write;

/// Formats a value with an SI prefix, `{:.N}` controls the mantissa precision (3 by default).
pub struct Engineering(pub f64);

impl Display for Engineering {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        if self.0 == 0.0 || !self.0.is_finite() {
            write!(f, "{}", self.0)
        } else {
            let precision = f.precision().unwrap_or(3);
            let exp = (self.0.abs().log10() / 3.0).floor() as i32 * 3;
            let mantissa = self.0 / 10f64.powi(exp);
            write!(f, "{:.*}", precision, mantissa)?;
            match exp {
                0 => {}
                -3 => f.write_char('m')?,
                -6 => f.write_char('µ')?,
                -9 => f.write_char('n')?,
                -12 => f.write_char('p')?,
                -15 => f.write_char('f')?,
                -18 => f.write_char('a')?,
                -21 => f.write_char('z')?,
                -24 => f.write_char('y')?,
                3 => f.write_char('k')?,
                6 => f.write_char('M')?,
                9 => f.write_char('G')?,
                12 => f.write_char('T')?,
                15 => f.write_char('P')?,
                18 => f.write_char('E')?,
                21 => f.write_char('Z')?,
                24 => f.write_char('Y')?,
                exp => write!(f, "e{}", exp)?,
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::util::Engineering;

    #[test]
    fn zero_and_non_finite_are_printed_verbatim() {
        assert_eq!(Engineering(0.0).to_string(), "0");
        assert_eq!(Engineering(std::f64::NAN).to_string(), "NaN");
        assert_eq!(Engineering(std::f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn prefixes_follow_thousands() {
        assert_eq!(Engineering(12.0).to_string(), "12.000");
        assert_eq!(Engineering(0.05).to_string(), "50.000m");
        assert_eq!(Engineering(1500.0).to_string(), "1.500k");
        assert_eq!(Engineering(-2.5e-6).to_string(), "-2.500µ");
    }

    #[test]
    fn precision_applies_to_mantissa() {
        assert_eq!(format!("{:.1}", Engineering(0.25)), "250.0m");
    }
}
