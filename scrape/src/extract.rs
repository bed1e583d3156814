// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Extract the record for one region from its page.
//!
//! This is done in three stages, each of which can fail in its own way:
//! * [resolve] the link found on the index page into a full url,
//! * [Extractor::fetch] and parse the page,
//! * [extract_from_page], which never fails but may find there is no record on the page.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use thiserror::Error;
use url::Url;
use crate::document::{trimmed_text, Page};
use crate::download::{FetchError, Fetcher};
use crate::parse_util::{parse_count, parse_party_votes};
use crate::record::{PartyTally, RegionRecord, SummaryInfo};
use crate::schema::CompiledSchema;

static SELECT_TR : Lazy<Selector> = Lazy::new(||Selector::parse("tr").unwrap());
static SELECT_TD : Lazy<Selector> = Lazy::new(||Selector::parse("td").unwrap());

/// Why a region could not be processed.
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("Could not resolve link {link} relative to {base} : {source}")]
    Resolve{ base : String, link : String, #[source] source : url::ParseError },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Resolve a link the way a browser would. This handles links that are absolute, or just a query string,
/// or relative paths, and leaves the query string (which contains the region identifier) intact.
pub fn resolve(base:&Url,link:&str) -> Result<Url,RegionError> {
    base.join(link).map_err(|source|RegionError::Resolve{ base: base.to_string(), link: link.to_string(), source })
}

pub struct Extractor<'a> {
    fetcher : &'a dyn Fetcher,
    schema : &'a CompiledSchema,
}

impl <'a> Extractor<'a> {
    pub fn new(fetcher:&'a dyn Fetcher,schema:&'a CompiledSchema) -> Self {
        Extractor{fetcher,schema}
    }

    pub fn fetch(&self,url:&Url) -> Result<Page,RegionError> {
        Ok(Page::parse(&self.fetcher.fetch(url)?))
    }

    /// Get the record for the region whose page is at `relative_link`.
    /// Ok(None) means the page was there but had no summary table, so the region should be skipped.
    pub fn extract_record(&self,base_url:&Url,relative_link:&str) -> Result<Option<RegionRecord>,RegionError> {
        let url = resolve(base_url,relative_link)?;
        let page = self.fetch(&url)?;
        Ok(extract_from_page(&page,&url,self.schema))
    }
}

/// Extract a record from an already fetched page. `url` is where the page came from, which contains the region code.
pub fn extract_from_page(page:&Page,url:&Url,schema:&CompiledSchema) -> Option<RegionRecord> {
    let summary_table = page.find_by_id(&schema.schema.region.summary_table_id)?;
    let mut summary = SummaryInfo {
        region_code: region_code(url,schema),
        region_name: region_name(page,schema),
        ..Default::default()
    };
    for (field,selector) in &schema.summary_cells {
        summary.set_count(*field,summary_table.select(selector).next().and_then(|cell|parse_count(&trimmed_text(&cell))));
    }
    Some(RegionRecord{ summary, parties: party_tally(page,schema) })
}

/// The region code from the query string, e.g. `532568` from `ps311?xjazyk=CZ&xobec=532568&xvyber=7103`.
pub fn region_code(url:&Url,schema:&CompiledSchema) -> Option<String> {
    let query = url.query()?;
    schema.region_code.captures(query).map(|c|c[1].to_string())
}

/// The region name, from the first heading carrying the label if there is one, otherwise the first heading.
pub fn region_name(page:&Page,schema:&CompiledSchema) -> Option<String> {
    let headings : Vec<String> = page.select(&schema.heading).map(|h|trimmed_text(&h)).collect();
    if let Some(label) = &schema.schema.region.name.label {
        if let Some(labelled) = headings.iter().find_map(|h|h.strip_prefix(label.as_str())) {
            return Some(labelled.trim().to_string());
        }
    }
    headings.into_iter().next()
}

/// Votes for each party, from all the party tables on the page.
pub fn party_tally(page:&Page,schema:&CompiledSchema) -> PartyTally {
    let layout = &schema.schema.region;
    let needed_cells = layout.party_name_column.max(layout.party_votes_column)+1;
    let mut tally = PartyTally::new();
    for table in page.select(&schema.party_tables) {
        for tr in table.select(&SELECT_TR).skip(layout.party_header_rows) {
            let tds : Vec<ElementRef> = tr.select(&SELECT_TD).collect();
            if tds.len()<needed_cells { continue; }
            let name = trimmed_text(&tds[layout.party_name_column]);
            if name.is_empty() { continue; }
            tally.insert(name,parse_party_votes(&trimmed_text(&tds[layout.party_votes_column])));
        }
    }
    tally
}
