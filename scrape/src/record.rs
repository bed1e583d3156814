// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! What is extracted from one region's page.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::schema::SummaryField;

/// Summary information about a region. None means "not available", which is different from 0.
#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct SummaryInfo {
    pub region_code : Option<String>,
    pub region_name : Option<String>,
    pub registered_voters : Option<u64>,
    pub issued_envelopes : Option<u64>,
    pub valid_votes : Option<u64>,
}

impl SummaryInfo {
    pub fn count(&self,field:SummaryField) -> Option<u64> {
        match field {
            SummaryField::RegisteredVoters => self.registered_voters,
            SummaryField::IssuedEnvelopes => self.issued_envelopes,
            SummaryField::ValidVotes => self.valid_votes,
        }
    }

    pub fn set_count(&mut self,field:SummaryField,value:Option<u64>) {
        match field {
            SummaryField::RegisteredVoters => self.registered_voters=value,
            SummaryField::IssuedEnvelopes => self.issued_envelopes=value,
            SummaryField::ValidVotes => self.valid_votes=value,
        }
    }
}

/// Votes per party name in one region.
pub type PartyTally = BTreeMap<String,u64>;

#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct RegionRecord {
    pub summary : SummaryInfo,
    pub parties : PartyTally,
}
