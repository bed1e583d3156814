// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Generic machinery for getting per region election results out of web sites that
//! publish one index page linking to one results page per region.
//!
//! The page layout is not hard coded here; it is described by a [schema::PageSchema],
//! with the layout of a particular electoral commission kept in its own crate.

pub mod download;
pub mod document;
pub mod schema;
pub mod parse_util;
pub mod record;
pub mod discover;
pub mod extract;
pub mod pipeline;
pub mod dataset;
pub mod write;
pub mod util;
