// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! A declarative description of where things are on the index page and on each region's page.
//!
//! Everything that depends on the layout of a particular web site is in a [PageSchema], so
//! when an electoral commission changes its pages, only the schema needs changing.
//! A schema is compiled into selectors once, before any pages are fetched.

use std::fmt::{Display, Formatter};
use std::path::Path;
use anyhow::Context;
use regex::Regex;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid selector {selector} : {reason}")]
    InvalidSelector{ selector : String, reason : String },
    #[error("Invalid region code marker {marker} : {source}")]
    InvalidCodeMarker{ marker : String, #[source] source : regex::Error },
    #[error("Schema has no link cell markers, so no region could ever be found")]
    NoLinkMarkers,
}

#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct PageSchema {
    pub index : IndexLayout,
    pub region : RegionLayout,
}

/// Where the links to region pages are on the index page.
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct IndexLayout {
    /// A link is a region link if it is inside a `td` whose `headers` attribute is exactly one of these.
    pub link_cell_markers : Vec<String>,
}

#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct RegionLayout {
    /// The region code is the text after this in the query string of the region page's url, up to the next `&`.
    pub code_query_marker : String,
    pub name : HeadingRule,
    /// The id of the table holding the summary counts. If it is missing, the page has no record.
    pub summary_table_id : String,
    pub summary_fields : Vec<SummaryFieldRule>,
    /// Tables holding per party votes. There may be several.
    pub party_table_selector : String,
    /// Rows at the start of each party table that are headings rather than parties.
    pub party_header_rows : usize,
    /// 0 based index of the `td` holding the party name.
    pub party_name_column : usize,
    /// 0 based index of the `td` holding the party's vote count.
    pub party_votes_column : usize,
}

/// How to find the region's name.
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct HeadingRule {
    pub selector : String,
    /// If present, prefer the first heading starting with this, and remove it from the name.
    #[serde(default)]
    pub label : Option<String>,
}

/// The summary counts that can be extracted from a region's page.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum SummaryField {
    RegisteredVoters,
    IssuedEnvelopes,
    ValidVotes,
}

impl SummaryField {
    /// The column heading used for this field in output files.
    pub fn column_name(self) -> &'static str {
        match self {
            SummaryField::RegisteredVoters => "registered_voters",
            SummaryField::IssuedEnvelopes => "issued_envelopes",
            SummaryField::ValidVotes => "valid_votes",
        }
    }
}

impl Display for SummaryField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// A summary count is in the first `td` inside the summary table whose `headers` attribute is exactly `cell_headers`.
#[derive(Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub struct SummaryFieldRule {
    pub field : SummaryField,
    pub cell_headers : String,
}

impl PageSchema {
    /// Read a schema from a JSON file.
    pub fn load_json(path:&Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path).with_context(||format!("Could not read schema file {}",path.display()))?;
        serde_json::from_str(&text).with_context(||format!("Could not parse schema file {}",path.display()))
    }

    /// Turn the textual description into selectors, checking everything is valid.
    pub fn compile(&self) -> Result<CompiledSchema,SchemaError> {
        if self.index.link_cell_markers.is_empty() { return Err(SchemaError::NoLinkMarkers); }
        let links = self.index.link_cell_markers.iter().map(|marker|format!("td[headers=\"{}\"] a[href]",escape_attribute_value(marker))).collect::<Vec<_>>().join(", ");
        let summary_cells = self.region.summary_fields.iter().map(|rule|{
            Ok((rule.field,parse_selector(&format!("td[headers=\"{}\"]",escape_attribute_value(&rule.cell_headers)))?))
        }).collect::<Result<Vec<_>,SchemaError>>()?;
        let marker = &self.region.code_query_marker;
        let region_code = Regex::new(&format!("{}([^&]*)",regex::escape(marker))).map_err(|source|SchemaError::InvalidCodeMarker{ marker: marker.clone(), source })?;
        Ok(CompiledSchema{
            schema: self.clone(),
            links: parse_selector(&links)?,
            heading: parse_selector(&self.region.name.selector)?,
            summary_cells,
            party_tables: parse_selector(&self.region.party_table_selector)?,
            region_code,
        })
    }
}

/// A [PageSchema] with its selectors parsed, ready to use on pages.
pub struct CompiledSchema {
    pub schema : PageSchema,
    /// all region links, in document order.
    pub(crate) links : Selector,
    pub(crate) heading : Selector,
    pub(crate) summary_cells : Vec<(SummaryField,Selector)>,
    pub(crate) party_tables : Selector,
    pub(crate) region_code : Regex,
}

pub(crate) fn parse_selector(selector:&str) -> Result<Selector,SchemaError> {
    Selector::parse(selector).map_err(|e|SchemaError::InvalidSelector{ selector: selector.to_string(), reason: format!("{:?}",e) })
}

/// Escape a string so it can go in a double quoted CSS attribute value.
fn escape_attribute_value(value:&str) -> String {
    value.replace('\\',"\\\\").replace('"',"\\\"")
}
