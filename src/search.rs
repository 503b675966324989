//! Matching for the profile filter and for search inside a view.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Fuzzy matcher used to filter short lists such as profile names.
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }

    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        self.score(text, pattern).is_some()
    }

    /// Higher is better. `None` when the pattern does not match at all.
    pub fn score(&self, text: &str, pattern: &str) -> Option<i64> {
        self.inner.fuzzy_match(text, pattern)
    }
}

/// Where a search hit sits inside a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLocation {
    /// A table cell containing the query.
    Cell { row: usize, col: usize },
    /// A byte range `offset..offset + len` on a text line.
    Text { line: usize, offset: usize, len: usize },
}

/// Result of a committed search: every hit in scan order plus a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    matches: Vec<MatchLocation>,
    current: Option<usize>,
}

impl SearchState {
    /// Scan table rows cell by cell, case-insensitively.
    pub fn scan_cells<I, R>(query: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = String>,
    {
        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        if !needle.is_empty() {
            for (row, cells) in rows.into_iter().enumerate() {
                for (col, cell) in cells.into_iter().enumerate() {
                    if cell.to_lowercase().contains(&needle) {
                        matches.push(MatchLocation::Cell { row, col });
                    }
                }
            }
        }
        Self::with_matches(query, matches)
    }

    /// Scan text lines for non-overlapping, case-insensitive hits.
    pub fn scan_lines<S: AsRef<str>>(query: &str, lines: &[S]) -> Self {
        let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
        let mut matches = Vec::new();
        for (line, text) in lines.iter().enumerate() {
            for (offset, len) in find_all(text.as_ref(), &needle) {
                matches.push(MatchLocation::Text { line, offset, len });
            }
        }
        Self::with_matches(query, matches)
    }

    fn with_matches(query: &str, matches: Vec<MatchLocation>) -> Self {
        let mut state = Self {
            query: query.to_string(),
            matches,
            current: None,
        };
        state.next();
        state
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<MatchLocation> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    pub fn matches(&self) -> &[MatchLocation] {
        &self.matches
    }

    /// Advance to the next hit, wrapping around. No-op without hits.
    pub fn next(&mut self) -> Option<MatchLocation> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        self.current = Some(self.current.map_or(0, |i| (i + 1) % len));
        self.current()
    }

    /// Step back to the previous hit, wrapping around. No-op without hits.
    pub fn prev(&mut self) -> Option<MatchLocation> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        self.current = Some(self.current.map_or(len - 1, |i| (i + len - 1) % len));
        self.current()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the cell is a hit, and whether it is the current one.
    pub fn cell_state(&self, row: usize, col: usize) -> Option<bool> {
        let location = MatchLocation::Cell { row, col };
        self.matches
            .contains(&location)
            .then(|| self.current() == Some(location))
    }

    /// Status text shown under a searched view.
    pub fn summary(&self) -> String {
        match self.current_index() {
            Some(i) => format!("/{} ({}/{})", self.query, i + 1, self.matches.len()),
            None => format!("/{} (no matches)", self.query),
        }
    }
}

/// `(offset, len)` byte ranges of non-overlapping hits of the lowercased
/// `needle` in `haystack`. Ranges always sit on char boundaries.
fn find_all(haystack: &str, needle: &[char]) -> Vec<(usize, usize)> {
    let mut hits = Vec::new();
    if needle.is_empty() {
        return hits;
    }
    let mut offset = 0;
    while let Some(c) = haystack[offset..].chars().next() {
        match match_len(&haystack[offset..], needle) {
            Some(len) => {
                hits.push((offset, len));
                offset += len;
            }
            None => offset += c.len_utf8(),
        }
    }
    hits
}

/// Byte length of the prefix of `text` whose lowercase form is `needle`.
fn match_len(text: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (i, c) in text.char_indices() {
        for lower in c.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(i + c.len_utf8());
        }
    }
    None
}
