// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! All the records from one run, and their conversion to a table.

use serde::{Deserialize, Serialize};
use crate::record::RegionRecord;
use crate::schema::SummaryField;
use crate::util::CollectAll;

/// Column headings that come before the party names.
pub const SUMMARY_COLUMNS : [&str;5] = ["region_code","region_name","registered_voters","issued_envelopes","valid_votes"];

/// The records, in the order the regions were discovered.
#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct Dataset {
    pub regions : Vec<RegionRecord>,
}

/// A rectangular table of strings, ready to write out.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Table {
    pub header : Vec<String>,
    pub rows : Vec<Vec<String>>,
}

/// What is written when producing JSON.
#[derive(Serialize)]
pub struct DatasetWithParties<'a> {
    pub parties : Vec<String>,
    pub regions : &'a [RegionRecord],
}

impl Dataset {
    pub fn push(&mut self,record:RegionRecord) { self.regions.push(record); }
    pub fn is_empty(&self) -> bool { self.regions.is_empty() }

    /// All party names in any region, sorted.
    pub fn party_names(&self) -> Vec<String> {
        let mut all = CollectAll::default();
        for region in &self.regions {
            all.extend(region.parties.keys().cloned());
        }
        all.take()
    }

    /// Convert to a table with one row per region. Parties a region doesn't mention get 0;
    /// summary values that are not available get `missing`.
    pub fn to_table(&self,missing:&str) -> Table {
        let parties = self.party_names();
        let header = SUMMARY_COLUMNS.iter().map(|s|s.to_string()).chain(parties.iter().cloned()).collect();
        let text_or_missing = |v:&Option<String>| v.clone().unwrap_or_else(||missing.to_string());
        let count_or_missing = |v:Option<u64>| v.map(|n|n.to_string()).unwrap_or_else(||missing.to_string());
        let rows = self.regions.iter().map(|region|{
            let summary = &region.summary;
            let mut row = vec![
                text_or_missing(&summary.region_code),
                text_or_missing(&summary.region_name),
                count_or_missing(summary.count(SummaryField::RegisteredVoters)),
                count_or_missing(summary.count(SummaryField::IssuedEnvelopes)),
                count_or_missing(summary.count(SummaryField::ValidVotes)),
            ];
            row.extend(parties.iter().map(|party|region.parties.get(party).copied().unwrap_or(0).to_string()));
            row
        }).collect();
        Table{ header, rows }
    }

    pub fn with_parties(&self) -> DatasetWithParties<'_> {
        DatasetWithParties{ parties: self.party_names(), regions: &self.regions }
    }
}
