// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! The few operations on a parsed HTML page that extraction needs.

use scraper::{ElementRef, Html, Selector};
use scraper::html::Select;

/// A parsed HTML document.
pub struct Page {
    html : Html,
}

impl Page {
    /// HTML5 parsing is error tolerant, so this never fails; a mangled page just won't have much in it.
    pub fn parse(text:&str) -> Self {
        Page{ html: Html::parse_document(text) }
    }

    /// The first element with the given id attribute, in document order.
    pub fn find_by_id(&self,id:&str) -> Option<ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap).find(|e|e.value().id()==Some(id))
    }

    /// All elements matching the selector, in document order.
    pub fn select<'a,'b>(&'a self,selector:&'b Selector) -> Select<'a,'b> {
        self.html.select(selector)
    }
}

/// Get all the text in an element as a string
pub fn text_content(e:&ElementRef<'_>) -> String {
    e.text().collect::<Vec<_>>().join("")
}

/// Get all the text in an element, without surrounding whitespace (including non-breaking spaces).
pub fn trimmed_text(e:&ElementRef<'_>) -> String {
    text_content(e).trim().to_string()
}
