use std::ops::RangeInclusive;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{Config, TermLogger, TerminalMode};
use structopt::StructOpt;

use crate::analysis::Circuit;
use crate::model::load::DEFAULT_RESISTANCE;
use crate::model::{Load, TheveninSource};
use crate::Result;

pub const EMF_RANGE: RangeInclusive<f64> = 1.0..=48.0;
pub const INTERNAL_RESISTANCE_RANGE: RangeInclusive<f64> = 0.05..=10.0;
pub const RESISTANCE_RANGE: RangeInclusive<f64> = 0.1..=100.0;
pub const NONLINEARITY_RANGE: RangeInclusive<f64> = 0.0..=2.0;
pub const BACK_EMF_RANGE: RangeInclusive<f64> = 0.0..=5.0;
pub const POINTS_RANGE: RangeInclusive<usize> = 200..=2000;

pub trait Opt {
    fn initialize_logging(&self) -> Result<()>;
}

#[derive(StructOpt, Clone, Debug, PartialEq)]
pub enum CliCommand {
    /// Linear resistor, U = R⋅I
    #[structopt(name = "resistor")]
    Resistor {
        #[structopt(short = "R", long = "resistance", default_value = "10.0")]
        resistance: f64,
    },
    /// Filament lamp, U = R⋅(1 + a⋅I²)⋅I
    #[structopt(name = "lamp")]
    Lamp {
        #[structopt(short = "R", long = "resistance", default_value = "10.0")]
        resistance: f64,
        #[structopt(short = "a", long = "nonlinearity", default_value = "0.5")]
        nonlinearity: f64,
    },
    /// Motor, U = R⋅I + k⋅I
    #[structopt(name = "motor")]
    Motor {
        #[structopt(short = "R", long = "resistance", default_value = "10.0")]
        resistance: f64,
        #[structopt(short = "k", long = "back-emf", default_value = "0.2")]
        back_emf: f64,
    },
    /// Locates the operating point in previously exported curves
    #[structopt(name = "replay")]
    Replay {
        #[structopt(short = "f", long = "file", parse(from_os_str))]
        file: PathBuf,
    },
}

impl Default for CliCommand {
    fn default() -> Self {
        CliCommand::Resistor {
            resistance: DEFAULT_RESISTANCE,
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = "load-line-cli")]
pub struct CliOpt {
    /// Open-circuit voltage E, volts
    #[structopt(short = "E", long = "emf", default_value = "12.0")]
    pub emf: f64,
    /// Internal resistance r, ohms
    #[structopt(short = "r", long = "internal-resistance", default_value = "1.0")]
    pub internal_resistance: f64,
    /// Number of sampled currents
    #[structopt(short = "n", long = "points", default_value = "600")]
    pub points: usize,
    /// Bisect between samples instead of reporting the closest sample
    #[structopt(long = "refine")]
    pub refine: bool,
    /// Writes the sampled curves as TSV, gzipped when the name ends with .gz
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    pub output: Option<PathBuf>,
    /// Repeat for more log output
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,
    #[structopt(subcommand)]
    pub command: Option<CliCommand>,
}

fn checked<T: PartialOrd + std::fmt::Display>(
    name: &str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<T> {
    ensure!(
        range.contains(&value),
        "{} = {} is outside of [{}, {}]",
        name,
        value,
        range.start(),
        range.end()
    );
    Ok(value)
}

impl Opt for CliOpt {
    fn initialize_logging(&self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        TermLogger::init(level, Config::default(), TerminalMode::Stderr)
            .map_err(|e| format_err!("Can't initialize logging: {:?}", e))?;
        Ok(())
    }
}

impl CliOpt {
    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or_default()
    }

    /// Trace file to replay, `None` for the load subcommands.
    pub fn replay_file(&self) -> Result<Option<PathBuf>> {
        match self.command() {
            CliCommand::Replay { file } => {
                ensure!(
                    self.output.is_none(),
                    "--output can't be combined with replay, the curves are already on disk"
                );
                Ok(Some(file))
            }
            _ => Ok(None),
        }
    }

    pub fn source(&self) -> Result<TheveninSource> {
        Ok(TheveninSource::new(
            checked("E", self.emf, EMF_RANGE)?,
            checked("r", self.internal_resistance, INTERNAL_RESISTANCE_RANGE)?,
        ))
    }

    pub fn load(&self) -> Result<Load> {
        Ok(match self.command() {
            CliCommand::Resistor { resistance } => {
                Load::resistor(checked("R", resistance, RESISTANCE_RANGE)?)
            }
            CliCommand::Lamp {
                resistance,
                nonlinearity,
            } => Load::lamp(
                checked("R", resistance, RESISTANCE_RANGE)?,
                checked("a", nonlinearity, NONLINEARITY_RANGE)?,
            ),
            CliCommand::Motor {
                resistance,
                back_emf,
            } => Load::motor(
                checked("R", resistance, RESISTANCE_RANGE)?,
                checked("k", back_emf, BACK_EMF_RANGE)?,
            ),
            CliCommand::Replay { .. } => {
                return Err(failure::err_msg("replay reads its circuit from the trace file"))
            }
        })
    }

    pub fn circuit(&self) -> Result<Circuit> {
        Ok(Circuit::new(self.source()?, self.load()?))
    }

    pub fn points(&self) -> Result<usize> {
        checked("N", self.points, POINTS_RANGE)
    }
}
