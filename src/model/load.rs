use std::fmt::Display;

use crate::model::Characteristic;
use crate::util::Engineering;

pub const DEFAULT_RESISTANCE: f64 = 10.0;
pub const DEFAULT_NONLINEARITY: f64 = 0.5;
pub const DEFAULT_BACK_EMF: f64 = 0.2;

/// Two-terminal load driven by the source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Load {
    /// `U = R⋅I`
    Resistor { resistance: f64 },
    /// Filament whose resistance grows with current: `U = R⋅(1 + a⋅I²)⋅I`, `a` in Ω/A².
    Lamp { resistance: f64, nonlinearity: f64 },
    /// Winding resistance plus a back-EMF taken proportional to current: `U = R⋅I + k⋅I`, `k` in V/A.
    Motor { resistance: f64, back_emf: f64 },
}

impl Default for Load {
    fn default() -> Self {
        Load::Resistor {
            resistance: DEFAULT_RESISTANCE,
        }
    }
}

impl Load {
    pub fn resistor(resistance: f64) -> Self {
        Load::Resistor { resistance }
    }

    pub fn lamp(resistance: f64, nonlinearity: f64) -> Self {
        Load::Lamp {
            resistance,
            nonlinearity,
        }
    }

    pub fn motor(resistance: f64, back_emf: f64) -> Self {
        Load::Motor {
            resistance,
            back_emf,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Load::Resistor { .. } => "Resistor",
            Load::Lamp { .. } => "Lamp",
            Load::Motor { .. } => "Motor",
        }
    }

    pub fn resistance(&self) -> f64 {
        match *self {
            Load::Resistor { resistance }
            | Load::Lamp { resistance, .. }
            | Load::Motor { resistance, .. } => resistance,
        }
    }

    pub fn voltage(&self, i: f64) -> f64 {
        match *self {
            Load::Resistor { resistance } => i * resistance,
            Load::Lamp {
                resistance,
                nonlinearity,
            } => i * (resistance * (1.0 + nonlinearity * i * i)),
            Load::Motor {
                resistance,
                back_emf,
            } => i * resistance + back_emf * i,
        }
    }
}

impl Characteristic for Load {
    fn evaluate(&self, i: f64) -> f64 {
        self.voltage(i)
    }
}

impl Display for Load {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} R={:.3}Ω", self.name(), Engineering(self.resistance()))?;
        match *self {
            Load::Resistor { .. } => {}
            Load::Lamp { nonlinearity, .. } => write!(f, ", a={:.3}Ω/A²", nonlinearity)?,
            Load::Motor { back_emf, .. } => write!(f, ", k={:.3}V/A", back_emf)?,
        }
        Ok(())
    }
}
