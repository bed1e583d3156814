// Copyright 2025 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Some utility routines that make parsing numbers out of web pages easier.
//!
//! Numbers on the pages use spaces (usually non-breaking) as thousands separators, e.g. `1 856`.
//!
//! There are two deliberately different rules. A summary count that can't be read is
//! not available, which must never be confused with a count of zero. A party's vote count
//! that can't be read counts as zero votes.


/// Remove whitespace used as a thousands separator. `char::is_whitespace` includes the non-breaking space U+00A0.
pub fn strip_thousands_separators(s:&str) -> String {
    s.chars().filter(|c|!c.is_whitespace()).collect()
}

/// Parse a summary count like `12 345`. None if there is nothing there, or it is not a non-negative integer.
pub fn parse_count(s:&str) -> Option<u64> {
    let s = strip_thousands_separators(s);
    if !s.is_empty() && s.chars().all(|c|c.is_ascii_digit()) { s.parse().ok() } else { None }
}

/// Parse a party vote count. Only ASCII digits (after removing whitespace) are accepted; anything
/// else, including `1,234` as commas are not separators here, is 0.
pub fn parse_party_votes(s:&str) -> u64 {
    let s = strip_thousands_separators(s);
    if !s.is_empty() && s.chars().all(|c|c.is_ascii_digit()) { s.parse().unwrap_or(0) } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(Some(12345),parse_count("12 345"));
        assert_eq!(Some(12345),parse_count("12\u{a0}345"));
        assert_eq!(Some(12345),parse_count("12345"));
        assert_eq!(Some(12345),parse_count("  12\u{a0}345\n"));
        assert_eq!(Some(1234567),parse_count("1 234 567"));
    }

    #[test]
    fn unreadable_count_is_not_zero() {
        assert_eq!(None,parse_count(""));
        assert_eq!(None,parse_count("\u{a0}"));
        assert_eq!(None,parse_count("-"));
        assert_eq!(None,parse_count("61,48"));
        assert_eq!(None,parse_count("+5"));
        assert_eq!(None,parse_count("-5"));
        assert_eq!(Some(0),parse_count("0"));
    }

    /// Commas are not separators for party votes, so a comma makes the whole thing 0.
    #[test]
    fn party_votes_comma_is_zero() {
        assert_eq!(0,parse_party_votes("1,234"));
        assert_eq!(1234,parse_party_votes("1234"));
        assert_eq!(1234,parse_party_votes("1\u{a0}234"));
        assert_eq!(0,parse_party_votes(""));
        assert_eq!(0,parse_party_votes("-"));
        assert_eq!(0,parse_party_votes("+5"));
    }
}
