#[macro_use]
extern crate log;

use failure::Error;
use load_line::options::{CliOpt, Opt};
use load_line::trace::file::{ExportableTrace, ImportableTrace};
use load_line::Curves;
use structopt::StructOpt;

fn main() -> Result<(), Error> {
    let opt = CliOpt::from_args();
    opt.initialize_logging()?;

    if let Some(file) = opt.replay_file()? {
        let curves = Curves::from_csv(&file)?;
        let point = curves
            .operating_point()
            .ok_or_else(|| failure::err_msg("The trace has no samples"))?;
        info!("Operating point: {:?}", point);

        print!("{}", curves.summary());
        println!("I*\t{:.4} A", point.current);
        println!("U*\t{:.4} V", point.voltage);
        if let Some(metrics) = curves.metrics(&point) {
            print!("{}", metrics);
        }
        return Ok(());
    }

    let circuit = opt.circuit()?;
    let mut analysis = circuit
        .analyze(opt.points()?)
        .ok_or_else(|| failure::err_msg("Nothing to sample"))?;
    if opt.refine {
        analysis = analysis.refined();
    }
    info!("Operating point: {:?}", analysis.operating_point);

    if let Some(path) = &opt.output {
        analysis.curves.save_as_csv(path)?;
    }

    print!("{}", analysis);
    Ok(())
}
