// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Find the links to the region pages on the index page.

use tracing::info;
use url::Url;
use crate::document::Page;
use crate::download::{FetchError, Fetcher};
use crate::schema::CompiledSchema;

pub struct Discoverer<'a> {
    fetcher : &'a dyn Fetcher,
    schema : &'a CompiledSchema,
}

impl <'a> Discoverer<'a> {
    pub fn new(fetcher:&'a dyn Fetcher,schema:&'a CompiledSchema) -> Self {
        Discoverer{fetcher,schema}
    }

    /// Get the index page and return the (usually relative) links to region pages on it, in document order.
    /// Not finding any is not an error here; the caller decides what that means.
    pub fn discover_links(&self,index_url:&Url) -> Result<Vec<String>,FetchError> {
        info!("Getting index page {}",index_url);
        let page = Page::parse(&self.fetcher.fetch(index_url)?);
        let links = find_links(&page,self.schema);
        info!("Found {} region links",links.len());
        Ok(links)
    }
}

/// The href of every anchor inside a table cell with one of the recognised markers. Duplicates are kept.
pub fn find_links(page:&Page,schema:&CompiledSchema) -> Vec<String> {
    page.select(&schema.links).filter_map(|a|a.value().attr("href")).map(|href|href.to_string()).collect()
}
