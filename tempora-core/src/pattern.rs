//! Candidate pattern compilation
//!
//! Engine matches are natural-language substrings, never patterns, so every
//! literal is escaped before it joins the alternation.

use crate::error::Result;
use crate::normalizer::{fold_accents, FoldedText};
use crate::scanner::OffsetScanner;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Case-insensitive alternation over the candidate literals of one document
#[derive(Debug, Clone)]
pub struct CandidateMatcher {
    regex: Option<Regex>,
    literals: Vec<String>,
}

impl CandidateMatcher {
    /// Compile the literals into one matcher
    ///
    /// Empty literals and exact duplicates are dropped. The remaining ones
    /// are ordered longest first (insertion order breaks ties), which makes
    /// the leftmost-first engine return the longest literal at each position.
    /// An empty collection yields a matcher that never matches.
    pub fn compile<I, S>(literals: I, accent_fold: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut prepared: Vec<String> = Vec::new();

        for literal in literals {
            let literal = literal.as_ref();
            if literal.is_empty() {
                tracing::debug!("skipping empty candidate literal");
                continue;
            }
            let literal = if accent_fold {
                fold_accents(literal)
            } else {
                literal.to_string()
            };
            if seen.insert(literal.clone()) {
                prepared.push(literal);
            }
        }

        prepared.sort_by_key(|literal| std::cmp::Reverse(literal.chars().count()));

        if prepared.is_empty() {
            return Ok(Self {
                regex: None,
                literals: prepared,
            });
        }

        let pattern = prepared
            .iter()
            .map(|literal| regex::escape(literal))
            .collect::<Vec<_>>()
            .join("|");
        tracing::trace!(%pattern, "compiling candidate alternation");

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            regex: Some(regex),
            literals: prepared,
        })
    }

    /// A matcher with no alternatives
    pub fn empty() -> Self {
        Self {
            regex: None,
            literals: Vec::new(),
        }
    }

    /// True if the matcher can never match
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Literals in alternation order
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// Scan a prepared text from left to right
    pub fn scan<'r, 'h>(&'r self, text: &'h FoldedText<'_>) -> OffsetScanner<'r, 'h> {
        OffsetScanner::new(self.regex.as_ref(), text.as_str(), text.offsets())
    }
}

impl Default for CandidateMatcher {
    fn default() -> Self {
        Self::empty()
    }
}
