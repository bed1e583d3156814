// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use std::path::PathBuf;
use std::time::Duration;
use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use scrape::download::{Fetcher, HttpFetcher};
use scrape::pipeline::{RunReport, ScrapeConfig, Scraper};
use scrape::schema::{CompiledSchema, PageSchema};
use scrape::write::{write_dataset, OutputFormat, OutputOptions};
use tracing::{info, warn};
use url::Url;

pub mod logging;

pub const DEFAULT_USER_AGENT : &str = concat!("volby_scrape/",env!("CARGO_PKG_VERSION"));

#[derive(Parser,Debug)]
#[command(version, author = "Andrew Conway", name="volby_scrape")]
/// Get election results for every region listed on an index page, and save them as one table,
/// with a row per region and a column per party.
///
/// For example, the Prostějov district in the 2017 Chamber of Deputies election is
/// https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=4&xnumnuts=3203
pub struct Opts {
    /// The url of the index page listing the regions.
    #[arg(value_parser=parse_http_url)]
    pub url : Url,

    /// The file to write the results to. Directories are created if needed; an existing file is overwritten.
    #[arg(short, long)]
    pub output : PathBuf,

    /// Resolve region links relative to this rather than the index page url.
    #[arg(long,value_parser=parse_http_url)]
    pub base_url : Option<Url>,

    /// Give up on a page after this many seconds.
    #[arg(long,default_value_t=30,value_parser=parse_timeout)]
    pub timeout : u64,

    /// Number of region pages to fetch at once.
    #[arg(short, long,default_value_t=1,value_parser=parse_jobs)]
    pub jobs : usize,

    /// The User-Agent header sent with each request.
    #[arg(long,default_value=DEFAULT_USER_AGENT)]
    pub user_agent : String,

    /// Output format, csv or json.
    #[arg(long,default_value_t=OutputFormat::Csv)]
    pub format : OutputFormat,

    /// Field delimiter for CSV output. Must be a single ASCII character.
    #[arg(long,default_value=",",value_parser=parse_delimiter)]
    pub delimiter : u8,

    /// Start a CSV file with a UTF-8 byte order mark.
    #[arg(long)]
    pub bom : bool,

    /// What to write in a CSV cell when a value is not available on the page.
    #[arg(long,default_value="")]
    pub missing : String,

    /// A JSON file describing the page layout. If not given, the volby.cz 2017 layout is used.
    #[arg(long)]
    pub schema : Option<PathBuf>,

    /// More logging. Use twice for even more.
    #[arg(short, long, action=ArgAction::Count)]
    pub verbose : u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with="verbose")]
    pub quiet : bool,

    /// Log as JSON lines.
    #[arg(long)]
    pub log_json : bool,
}

pub fn parse_http_url(s:&str) -> Result<Url,String> {
    let url = Url::parse(s).map_err(|e|format!("{} is not a valid url : {}",s,e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("Only http and https urls are supported, not {}",scheme)),
    }
}

fn parse_jobs(s:&str) -> Result<usize,String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Need at least one job".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_timeout(s:&str) -> Result<u64,String> {
    match s.parse::<u64>() {
        Ok(0) => Err("Timeout must be at least one second".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_delimiter(s:&str) -> Result<u8,String> {
    let mut chars = s.chars();
    match (chars.next(),chars.next()) {
        (Some(c),None) if c.is_ascii() && c!='"' && c!='\n' && c!='\r' => Ok(c as u8),
        _ => Err(format!("Delimiter {:?} should be a single ASCII character other than a quote or newline",s)),
    }
}

impl Opts {
    pub fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig{
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.clone(),
            jobs: self.jobs,
        }
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions{ format: self.format, delimiter: self.delimiter, byte_order_mark: self.bom, missing: self.missing.clone() }
    }

    pub fn page_schema(&self) -> anyhow::Result<PageSchema> {
        match &self.schema {
            Some(path) => PageSchema::load_json(path),
            None => volby::canonical_schema(),
        }
    }

    pub fn compiled_schema(&self) -> anyhow::Result<CompiledSchema> {
        Ok(self.page_schema()?.compile()?)
    }
}

/// Do the whole job using the given way of getting pages. The output file is only written if there is at least one record.
pub fn run_with_fetcher(opts:&Opts,fetcher:&dyn Fetcher) -> anyhow::Result<RunReport> {
    let schema = opts.compiled_schema()?;
    let config = opts.scrape_config();
    let report = Scraper::new(fetcher,&schema,&config).run(&opts.url).with_context(||format!("Could not get index page {}",opts.url))?;
    if report.links_found==0 { bail!("No matching links found on {}",opts.url); }
    if report.dataset.is_empty() { bail!("No data extracted from any of the {} region links",report.links_found); }
    write_dataset(&opts.output,&report.dataset,&opts.output_options())?;
    info!("Saved {} records to {}",report.dataset.regions.len(),opts.output.display());
    if !report.is_complete() {
        warn!("{} of {} regions were skipped",report.skipped_count(),report.links_found);
        for skipped in &report.skipped {
            warn!("  {} {} : {}",skipped.index+1,skipped.link,skipped.reason);
        }
    }
    Ok(report)
}

pub fn run(opts:&Opts) -> anyhow::Result<RunReport> {
    let fetcher = HttpFetcher::from_config(&opts.scrape_config())?;
    run_with_fetcher(opts,&fetcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(args:&[&str]) -> Result<Opts,clap::Error> {
        Opts::try_parse_from(std::iter::once("volby_scrape").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let opts = opts(&["https://www.volby.cz/pls/ps2017nss/ps32?xkraj=4","-o","out.csv"]).unwrap();
        let config = opts.scrape_config();
        assert_eq!(Duration::from_secs(30),config.timeout);
        assert_eq!(1,config.jobs);
        assert_eq!(None,config.base_url);
        assert_eq!(DEFAULT_USER_AGENT,config.user_agent);
        let output = opts.output_options();
        assert_eq!(OutputFormat::Csv,output.format);
        assert_eq!(b',',output.delimiter);
        assert!(!output.byte_order_mark);
        assert_eq!("",output.missing);
    }

    #[test]
    fn all_options() {
        let opts = opts(&["http://example.com/i","--output","o.json","--base-url","https://example.com","--timeout","5","-j","4",
            "--format","json","--delimiter",";","--bom","--missing","N/A","-vv"]).unwrap();
        assert_eq!(Some(Url::parse("https://example.com").unwrap()),opts.scrape_config().base_url);
        assert_eq!(4,opts.scrape_config().jobs);
        assert_eq!(Duration::from_secs(5),opts.scrape_config().timeout);
        let output = opts.output_options();
        assert_eq!(OutputFormat::Json,output.format);
        assert_eq!(b';',output.delimiter);
        assert!(output.byte_order_mark);
        assert_eq!("N/A",output.missing);
        assert_eq!(2,opts.verbose);
    }

    #[test]
    fn usage_errors() {
        assert!(opts(&[]).is_err());
        assert!(opts(&["https://example.com"]).is_err());
        assert!(opts(&["ftp://example.com","-o","x"]).is_err());
        assert!(opts(&["https://example.com","-o","x","--jobs","0"]).is_err());
        assert!(opts(&["https://example.com","-o","x","--timeout","0"]).is_err());
        assert!(opts(&["https://example.com","-o","x","--delimiter",";;"]).is_err());
        assert!(opts(&["https://example.com","-o","x","--format","xml"]).is_err());
        assert_eq!(clap::error::ErrorKind::MissingRequiredArgument,opts(&["https://example.com"]).unwrap_err().kind());
    }

    #[test]
    fn http_fetcher_built_from_options() {
        let opts = opts(&["https://example.com","-o","x","--timeout","12","--user-agent","tester/3"]).unwrap();
        let fetcher = HttpFetcher::from_config(&opts.scrape_config()).unwrap();
        assert_eq!(Duration::from_secs(12),fetcher.timeout());
        assert_eq!("tester/3",fetcher.user_agent());
    }

    #[test]
    fn default_schema_is_volby() {
        let opts = opts(&["https://example.com","-o","x"]).unwrap();
        assert_eq!("ps311_t1",opts.page_schema().unwrap().region.summary_table_id);
    }
}
