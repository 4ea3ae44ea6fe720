use std::fmt::Display;

pub mod load;
pub mod source;

pub use self::load::Load;
pub use self::source::TheveninSource;

/// Voltage across a two-terminal element as a function of the current through it.
pub trait Characteristic: Display {
    fn evaluate(&self, i: f64) -> f64;
}
