//! Word-count files.
//!
//! A count file holds one `<token> <count>` pair per line, separated by any
//! whitespace. A file whose first line is blank stands for an empty document.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{JsdError, Result};

/// Mapping from token to its number of occurrences in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    counts: HashMap<String, u64>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of tokens (N).
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    /// Sets the count of `token`, returning the previous count if it was present.
    pub fn insert(&mut self, token: impl Into<String>, count: u64) -> Option<u64> {
        self.counts.insert(token.into(), count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (token, count) in iter {
            map.insert(token, count);
        }
        map
    }
}

/// Reads a count file from disk.
pub fn read_counts<P: AsRef<Path>>(path: P) -> Result<CountMap> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| JsdError::io(path, e))?;
    let counts = parse_counts(&content).map_err(|(line, message)| JsdError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    })?;
    debug!(
        "{}: {} distinct tokens, {} tokens total",
        path.display(),
        counts.len(),
        counts.total()
    );
    Ok(counts)
}

/// Parses the contents of a count file.
///
/// On failure returns the 1-based line number and a description of the problem.
/// # Example
/// ```
/// use jsd_alpha::parse_counts;
/// let counts = parse_counts("a 3\nb\t1\n").unwrap();
/// assert_eq!(counts.get("a"), Some(3));
/// assert_eq!(counts.total(), 4);
/// assert!(parse_counts("\nthis line is ignored\n").unwrap().is_empty());
/// ```
pub fn parse_counts(content: &str) -> std::result::Result<CountMap, (usize, String)> {
    let mut lines = content.lines().peekable();
    match lines.peek() {
        None => return Ok(CountMap::new()),
        Some(first) if first.trim().is_empty() => {
            warn!("count file starts with a blank line, treating it as an empty document");
            return Ok(CountMap::new());
        }
        Some(_) => {}
    }

    let mut counts = CountMap::new();
    // running total, must fit in u64
    let mut total: u64 = 0;
    for (index, line) in lines.enumerate() {
        let line_no = index + 1;
        let mut fields = line.split_whitespace();
        let Some(token) = fields.next() else {
            continue;
        };
        let raw = fields
            .next()
            .ok_or_else(|| (line_no, format!("missing count for token {token:?}")))?;
        let count: u64 = raw
            .parse()
            .map_err(|e| (line_no, format!("invalid count {raw:?}: {e}")))?;
        let previous = counts.get(token).unwrap_or(0);
        total = (total - previous)
            .checked_add(count)
            .ok_or_else(|| (line_no, "total count exceeds u64".to_string()))?;
        if counts.insert(token, count).is_some() {
            warn!("token {token:?} listed more than once, keeping the count on line {line_no}");
        }
    }
    Ok(counts)
}
