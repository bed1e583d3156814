// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The layout of the Czech Statistical Office's election result pages at volby.cz,
//! as used for the 2017 Chamber of Deputies election.
//!
//! An index page (one per district, `ps32`) has a table of municipalities, each linking to
//! a municipality page (`ps311`) with a summary table and two tables of per party votes.

use scrape::schema::{CompiledSchema, PageSchema};
use url::Url;

/// The Prostějov district, 2017 Chamber of Deputies election.
pub const DEFAULT_INDEX_URL : &str = "https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=4&xnumnuts=3203";

/// The site itself, for use as a base url when links are written relative to the site root.
pub const SITE_BASE_URL : &str = "https://www.volby.cz";

/// The layout of the volby.cz 2017 pages.
pub fn canonical_schema() -> anyhow::Result<PageSchema> {
    Ok(serde_json::from_str(include_str!("volby_ps2017_layout.json"))?)
}

pub fn compiled_canonical_schema() -> anyhow::Result<CompiledSchema> {
    Ok(canonical_schema()?.compile()?)
}

pub fn default_index_url() -> anyhow::Result<Url> {
    Ok(Url::parse(DEFAULT_INDEX_URL)?)
}
