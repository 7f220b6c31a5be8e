//! Fuzzy matching for inventory search.
//!
//! Parts are found either by their exact part number, after the query has
//! been run through the part-number mask, or by a fuzzy match on the name.

pub mod part_matcher;

pub use part_matcher::{MatchType, PartMatch, PartMatcher};
