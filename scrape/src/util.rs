// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

use std::collections::BTreeSet;

/// A little utility to collect all unique values that pass by.
pub struct CollectAll<T:Ord> {
    all : BTreeSet<T>
}

impl <T:Ord> Default for CollectAll<T> {
    fn default() -> Self { CollectAll{ all: BTreeSet::default() } }
}

impl <T:Ord> CollectAll<T> {
    /// clear and return a sorted list of unique elements.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.all).into_iter().collect()
    }
}

impl<T:Ord> Extend<T> for CollectAll<T>
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) { self.all.extend(iter); }
}
