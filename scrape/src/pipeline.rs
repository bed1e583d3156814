// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Run a whole scrape: find the region links on the index page, then get the record for each region.
//!
//! A failure to get the index page stops everything. A failure for a single region just
//! means that region is skipped; skipped regions are counted and listed in the [RunReport].
//!
//! Regions are normally done one at a time. With more than one job, a fixed number of worker
//! threads take links in turn; the results are put back in discovery order before the
//! dataset is assembled, so the output does not depend on the number of jobs.

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use crate::dataset::Dataset;
use crate::discover::Discoverer;
use crate::download::{FetchError, Fetcher};
use crate::extract::{Extractor, RegionError};
use crate::record::RegionRecord;
use crate::schema::CompiledSchema;

/// Settings for a run that are not to do with page layout.
#[derive(Clone,Debug)]
pub struct ScrapeConfig {
    /// What region links are resolved against. If None, the index page's url.
    pub base_url : Option<Url>,
    pub timeout : Duration,
    pub user_agent : String,
    /// Number of regions fetched at once. 1 means strictly sequential.
    pub jobs : usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig{
            base_url: None,
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"),"/",env!("CARGO_PKG_VERSION")).to_string(),
            jobs: 1,
        }
    }
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub enum SkipReason {
    /// The page was obtained, but had no summary table.
    NoSummaryTable,
    /// The link could not be resolved, or the page could not be obtained.
    Failed(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoSummaryTable => f.write_str("no summary table on page"),
            SkipReason::Failed(message) => f.write_str(message),
        }
    }
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct SkippedRegion {
    /// position in the list of discovered links, starting at 0.
    pub index : usize,
    pub link : String,
    pub reason : SkipReason,
}

/// What happened in a run.
#[derive(Clone,Debug)]
pub struct RunReport {
    pub links_found : usize,
    pub dataset : Dataset,
    pub skipped : Vec<SkippedRegion>,
}

impl RunReport {
    pub fn skipped_count(&self) -> usize { self.skipped.len() }
    /// true iff every discovered region produced a record.
    pub fn is_complete(&self) -> bool { self.skipped.is_empty() }
}

pub struct Scraper<'a> {
    fetcher : &'a dyn Fetcher,
    schema : &'a CompiledSchema,
    config : &'a ScrapeConfig,
}

type RegionOutcome = Result<Option<RegionRecord>,RegionError>;

impl <'a> Scraper<'a> {
    pub fn new(fetcher:&'a dyn Fetcher,schema:&'a CompiledSchema,config:&'a ScrapeConfig) -> Self {
        Scraper{fetcher,schema,config}
    }

    /// Do the whole scrape. Only fails if the index page can't be obtained.
    pub fn run(&self,index_url:&Url) -> Result<RunReport,FetchError> {
        let links = Discoverer::new(self.fetcher,self.schema).discover_links(index_url)?;
        let base_url = self.config.base_url.as_ref().unwrap_or(index_url);
        let outcomes = if self.config.jobs>1 && links.len()>1 { self.process_in_parallel(base_url,&links) } else { self.process_sequentially(base_url,&links) };
        let report = assemble(links,outcomes);
        info!("Extracted {} records from {} region links, skipped {}",report.dataset.regions.len(),report.links_found,report.skipped_count());
        Ok(report)
    }

    fn process_one(&self,base_url:&Url,link:&str) -> RegionOutcome {
        debug!("Processing {}",link);
        Extractor::new(self.fetcher,self.schema).extract_record(base_url,link)
    }

    fn process_sequentially(&self,base_url:&Url,links:&[String]) -> Vec<RegionOutcome> {
        links.iter().map(|link|self.process_one(base_url,link)).collect()
    }

    /// Fetch with a fixed pool of workers, returning the outcomes in the same order as the links.
    fn process_in_parallel(&self,base_url:&Url,links:&[String]) -> Vec<RegionOutcome> {
        let workers = self.config.jobs.min(links.len());
        let next = AtomicUsize::new(0);
        let (tx,rx) = mpsc::channel::<(usize,RegionOutcome)>();
        thread::scope(|scope|{
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move ||{
                    loop {
                        let i = next.fetch_add(1,Ordering::Relaxed);
                        if i>=links.len() { break; }
                        if tx.send((i,self.process_one(base_url,&links[i]))).is_err() { break; }
                    }
                });
            }
        });
        drop(tx);
        let mut outcomes : Vec<(usize,RegionOutcome)> = rx.into_iter().collect();
        outcomes.sort_by_key(|(i,_)|*i);
        outcomes.into_iter().map(|(_,outcome)|outcome).collect()
    }
}

/// Put the outcomes, in link order, into a dataset, noting what was skipped.
fn assemble(links:Vec<String>,outcomes:Vec<RegionOutcome>) -> RunReport {
    let mut dataset = Dataset::default();
    let mut skipped = vec![];
    let links_found = links.len();
    for (index,(link,outcome)) in links.into_iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(Some(record)) => dataset.push(record),
            Ok(None) => {
                warn!("Skipping {} : no summary table",link);
                skipped.push(SkippedRegion{ index, link, reason: SkipReason::NoSummaryTable });
            }
            Err(e) => {
                warn!("Skipping {} : {}",link,e);
                skipped.push(SkippedRegion{ index, link, reason: SkipReason::Failed(e.to_string()) });
            }
        }
    }
    RunReport{ links_found, dataset, skipped }
}
