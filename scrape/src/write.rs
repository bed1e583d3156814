// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Write a dataset to a file.
//!
//! CSV output is UTF-8, optionally starting with a byte order mark (some spreadsheet programs
//! need this to recognise UTF-8), with fields only quoted when needed and `\n` line endings.

use std::fmt::{Display, Formatter};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use anyhow::Context;
use tempfile::NamedTempFile;
use crate::dataset::Dataset;

pub const UTF8_BYTE_ORDER_MARK : &[u8] = b"\xEF\xBB\xBF";

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err("No such output format supported. Use csv or json.")
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(s)
    }
}

#[derive(Clone,Debug)]
pub struct OutputOptions {
    pub format : OutputFormat,
    /// CSV field delimiter.
    pub delimiter : u8,
    /// Start a CSV file with a UTF-8 byte order mark.
    pub byte_order_mark : bool,
    /// What to write in a CSV cell for a value that is not available.
    pub missing : String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions{ format: OutputFormat::Csv, delimiter: b',', byte_order_mark: false, missing: String::new() }
    }
}

pub fn write_csv<W:Write>(mut out:W,dataset:&Dataset,options:&OutputOptions) -> anyhow::Result<()> {
    if options.byte_order_mark { out.write_all(UTF8_BYTE_ORDER_MARK)?; }
    let table = dataset.to_table(&options.missing);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Not available values are written as null.
pub fn write_json<W:Write>(out:W,dataset:&Dataset) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(out,&dataset.with_parties())?;
    Ok(())
}

/// Create (or overwrite) the file at `path` and write the dataset to it.
pub fn write_dataset(path:&Path,dataset:&Dataset,options:&OutputOptions) -> anyhow::Result<()> {
    write_replacing(path,|out|match options.format {
        OutputFormat::Csv => write_csv(out,dataset,options),
        OutputFormat::Json => write_json(out,dataset),
    })
}

/// Write into a temporary file next to `path`, and only move it to `path` once everything has been written.
/// On any failure `path` is left as it was and the temporary file is removed.
fn write_replacing(path:&Path,write:impl FnOnce(&mut BufWriter<&mut NamedTempFile>) -> anyhow::Result<()>) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(||format!("Could not create directory {}",dir.display()))?;
    let mut temp = NamedTempFile::new_in(dir).with_context(||format!("Could not create a temporary file in {}",dir.display()))?;
    {
        let mut out = BufWriter::new(&mut temp);
        write(&mut out).with_context(||format!("Could not write {}",path.display()))?;
        out.flush().with_context(||format!("Could not write {}",path.display()))?;
    }
    temp.persist(path).with_context(||format!("Could not create {}",path.display()))?;
    Ok(())
}
