//! Fuzzy global filter using nucleo-matcher.
//!
//! Ranking: the query is split on whitespace into atoms; every atom must
//! appear in the same cell value as a case-insensitive subsequence. nucleo
//! scores the alignment, rewarding consecutive and word-boundary matches
//! and penalising gaps. A record passes when any filterable column
//! (name, content, translated content) yields a score.

use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::CaseMatching;
use nucleo_matcher::pattern::Normalization;
use nucleo_matcher::pattern::Pattern;

use super::column::Column;
use crate::model::Record;

/// A compiled global filter.
pub struct FuzzyFilter {
    pattern: Option<Pattern>,
    matcher: Matcher,
    buf: Vec<char>,
}

impl FuzzyFilter {
    /// Compiles a filter. Blank text matches everything.
    pub fn new(text: &str) -> Self {
        let pattern = (!text.trim().is_empty()).then(|| {
            Pattern::new(text, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy)
        });
        Self {
            pattern,
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    /// Returns `true` if the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// Scores a single value. `None` means no match.
    pub fn score(&mut self, value: &str) -> Option<u32> {
        let Some(pattern) = &self.pattern else {
            return Some(0);
        };
        let haystack = Utf32Str::new(value, &mut self.buf);
        pattern.score(haystack, &mut self.matcher)
    }

    /// Best score of the record across the filterable columns.
    pub fn rank(&mut self, record: &Record, columns: &[Column]) -> Option<u32> {
        if self.is_empty() {
            return Some(0);
        }
        columns
            .iter()
            .filter_map(|column| column.id.value(record))
            .filter_map(|value| self.score(value))
            .max()
    }

    /// Returns `true` if the record passes the filter.
    pub fn matches(&mut self, record: &Record, columns: &[Column]) -> bool {
        self.rank(record, columns).is_some()
    }
}

/// Filters records, preserving their order.
///
/// # Example
///
/// ```
/// use sysprompt_lib::model::Record;
/// use sysprompt_lib::table::{filter_records, role_columns};
///
/// let records = vec![Record::new(1, "translator", "", ""), Record::new(2, "coder", "", "")];
/// let hits = filter_records(&records, "trns", &role_columns());
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 1);
/// ```
pub fn filter_records<'a>(records: &'a [Record], text: &str, columns: &[Column]) -> Vec<&'a Record> {
    let mut filter = FuzzyFilter::new(text);
    if filter.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| filter.matches(record, columns))
        .collect()
}
