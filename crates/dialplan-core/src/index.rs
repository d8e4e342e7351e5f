//! Area-code index with precomputed prefix extensions
//!
//! Area codes form a prefix-closed hierarchy: "20" and "207" can both be
//! valid, distinct codes. For every code the index records which other codes
//! extend it, so generation can avoid numbers that would resolve to a more
//! specific area and resolution can prefer the longest match.

use std::collections::{BTreeSet, HashMap};

use crate::error::{ConfigurationError, RecordError};

/// Area name reported when no prefix of a number is a known code
pub const UNKNOWN_AREA: &str = "Unknown";

/// A single area code and the longer codes that start with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCode {
    code: String,
    area_name: String,
    extensions: BTreeSet<String>,
}

impl AreaCode {
    /// The digit string of this code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name of the area
    pub fn area_name(&self) -> &str {
        &self.area_name
    }

    /// Codes strictly longer than this one that share it as a prefix
    pub fn extensions(&self) -> &BTreeSet<String> {
        &self.extensions
    }

    /// Whether `number` would be claimed by one of this code's extensions
    pub fn is_shadowed(&self, number: &str) -> bool {
        self.extensions.iter().any(|ext| number.starts_with(ext.as_str()))
    }

    /// Number of digits in the code
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// Inclusive range of prefix lengths the resolver scans, longest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixWindow {
    min: usize,
    max: usize,
}

impl PrefixWindow {
    /// Shortest and longest area codes of the national numbering plan
    pub const DEFAULT: PrefixWindow = PrefixWindow { min: 2, max: 6 };

    pub fn new(min: usize, max: usize) -> Result<Self, ConfigurationError> {
        if min == 0 || min > max {
            return Err(ConfigurationError::InvalidWindow { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Prefix lengths in scan order (decreasing)
    pub fn lengths(&self) -> impl Iterator<Item = usize> {
        (self.min..=self.max).rev()
    }

    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}

impl Default for PrefixWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for PrefixWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Read-only table of area codes, in source order
#[derive(Debug, Clone, Default)]
pub struct AreaCodeIndex {
    /// Codes in order of first appearance
    codes: Vec<AreaCode>,

    /// Code -> position in `codes`
    positions: HashMap<String, usize>,
}

impl AreaCodeIndex {
    /// Build an index from (code, area name) pairs
    ///
    /// A code that appears more than once keeps the area name of its last
    /// occurrence and the position of its first. Extensions are computed by
    /// comparing every pair of codes, which is fine for tables of hundreds of
    /// codes.
    pub fn build<I, C, A>(entries: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (C, A)>,
        C: Into<String>,
        A: Into<String>,
    {
        let mut codes: Vec<AreaCode> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (code, area_name) in entries {
            let code = code.into();
            check_code(&code).map_err(|reason| RecordError::InvalidCode {
                code: code.clone(),
                reason,
            })?;

            let area_name = area_name.into();
            match positions.get(&code) {
                Some(&pos) => codes[pos].area_name = area_name,
                None => {
                    positions.insert(code.clone(), codes.len());
                    codes.push(AreaCode {
                        code,
                        area_name,
                        extensions: BTreeSet::new(),
                    });
                }
            }
        }

        for i in 0..codes.len() {
            let extensions: BTreeSet<String> = codes
                .iter()
                .filter(|other| other.code != codes[i].code && other.code.starts_with(codes[i].code.as_str()))
                .map(|other| other.code.clone())
                .collect();
            codes[i].extensions = extensions;
        }

        Ok(Self { codes, positions })
    }

    /// Look up a code exactly
    pub fn get(&self, code: &str) -> Option<&AreaCode> {
        self.positions.get(code).map(|&pos| &self.codes[pos])
    }

    /// Area name for an exact code
    pub fn area_name(&self, code: &str) -> Option<&str> {
        self.get(code).map(AreaCode::area_name)
    }

    /// All codes in source order
    pub fn codes(&self) -> &[AreaCode] {
        &self.codes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AreaCode> {
        self.codes.iter()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the shortest code, if any
    pub fn min_code_len(&self) -> Option<usize> {
        self.codes.iter().map(AreaCode::len).min()
    }

    /// Length of the longest code, if any
    pub fn max_code_len(&self) -> Option<usize> {
        self.codes.iter().map(AreaCode::len).max()
    }

    /// Scan window covering every code length present
    ///
    /// Falls back to [`PrefixWindow::DEFAULT`] for an empty index.
    pub fn prefix_window(&self) -> PrefixWindow {
        match (self.min_code_len(), self.max_code_len()) {
            (Some(min), Some(max)) => PrefixWindow { min, max },
            _ => PrefixWindow::DEFAULT,
        }
    }
}

impl<'a> IntoIterator for &'a AreaCodeIndex {
    type Item = &'a AreaCode;
    type IntoIter = std::slice::Iter<'a, AreaCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Check that a code is a non-empty string of ASCII digits
pub fn check_code(code: &str) -> Result<(), String> {
    if code.is_empty() {
        return Err("area code is empty".to_string());
    }
    if let Some(c) = code.chars().find(|c| !c.is_ascii_digit()) {
        return Err(format!("unexpected character '{}'", c));
    }
    Ok(())
}
