#[macro_use]
extern crate failure;
#[macro_use]
extern crate measure_time;
#[macro_use]
extern crate serde_derive;

pub mod analysis;
pub mod metrics;
pub mod model;
pub mod operating_point;
pub mod options;
pub mod sweep;
pub mod trace;
pub mod util;

pub use crate::analysis::{Analysis, Circuit};
pub use crate::metrics::PowerMetrics;
pub use crate::model::{Characteristic, Load, TheveninSource};
pub use crate::operating_point::OperatingPoint;
pub use crate::sweep::CurrentSweep;
pub use crate::trace::Curves;

pub type Result<T> = std::result::Result<T, failure::Error>;
