use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::trace::Curves;
use crate::Result;

#[derive(Deserialize)]
struct Record {
    i: f64,
    u_load: f64,
    u_source: f64,
}

pub trait ExportableTrace {
    fn save_as_csv(&self, path: &Path) -> Result<()>;
}

pub trait ImportableTrace: Sized {
    fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self>;
}

trait CsvWriter {
    fn write_record(&mut self, record: &[&str]) -> Result<()>;
    fn close(self: Box<Self>) -> Result<()>;
}

impl<W: std::io::Write> CsvWriter for csv::Writer<libflate::gzip::Encoder<W>> {
    fn write_record(&mut self, record: &[&str]) -> Result<()> {
        csv::Writer::write_record(self, record)?;
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.into_inner()
            .map_err(|_| failure::err_msg("Error writing the file"))?
            .finish()
            .into_result()?;
        Ok(())
    }
}

impl CsvWriter for csv::Writer<File> {
    fn write_record(&mut self, record: &[&str]) -> Result<()> {
        csv::Writer::write_record(self, record)?;
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.into_inner()
            .map_err(|_| failure::err_msg("Error writing the file"))?;
        Ok(())
    }
}

fn is_gz(path: &Path) -> bool {
    path.extension().and_then(OsStr::to_str) == Some("gz")
}

fn csv_writer_from_path(path: &Path) -> Result<Box<dyn CsvWriter>> {
    let mut out_builder = csv::WriterBuilder::new();
    out_builder.delimiter(b'\t');
    Ok(if is_gz(path) {
        Box::new(out_builder.from_writer(libflate::gzip::Encoder::new(File::create(path)?)?))
    } else {
        Box::new(out_builder.from_path(path)?)
    })
}

fn csv_reader_from_path<D: DeserializeOwned + 'static>(
    path: &Path,
) -> Result<Box<dyn Iterator<Item = csv::Result<D>>>> {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true);
    builder.delimiter(b'\t');
    Ok(if is_gz(path) {
        Box::new(
            builder
                .from_reader(libflate::gzip::Decoder::new(File::open(path)?)?)
                .into_deserialize(),
        )
    } else {
        Box::new(builder.from_path(path)?.into_deserialize())
    })
}

impl ExportableTrace for Curves {
    fn save_as_csv(&self, path: &Path) -> Result<()> {
        debug_time!("saving {} samples to {}", self.len(), path.display());
        let mut out = csv_writer_from_path(path)?;

        let header = ["i", "u_load", "u_source", "p_load"];
        out.write_record(&header)?;
        for (i, u_load, u_source) in self.iter() {
            let i_str = i.to_string();
            let u_load_str = u_load.to_string();
            let u_source_str = u_source.to_string();
            let p_load_str = (i * u_load).to_string();
            let rec = [
                i_str.as_str(),
                u_load_str.as_str(),
                u_source_str.as_str(),
                p_load_str.as_str(),
            ];
            out.write_record(&rec)?;
        }
        out.close()?;
        info!("Saved {} samples to {}", self.len(), path.display());
        Ok(())
    }
}

impl ImportableTrace for Curves {
    fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut is = Vec::new();
        let mut u_loads = Vec::new();
        let mut u_sources = Vec::new();

        for result in csv_reader_from_path(path.as_ref())? {
            let record: Record = result?;
            is.push(record.i);
            u_loads.push(record.u_load);
            u_sources.push(record.u_source);
        }

        debug!(
            "Loaded {} samples from {}",
            is.len(),
            path.as_ref().display()
        );
        Ok(Curves::new(is, u_loads, u_sources))
    }
}
