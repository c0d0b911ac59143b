//! Results of the external temporal-extraction engine
//!
//! These types are plain data: the engine produces them once per document
//! and alignment only reads them.

use serde::{Deserialize, Serialize};

/// Boundary marker identifying a point in normalized time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Normalized identifier, e.g. `century:20:start`
    pub uri: String,
    /// Human-readable label
    #[serde(default)]
    pub label: String,
}

impl Edge {
    /// Create an edge whose label repeats its uri
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            label: uri.clone(),
            uri,
        }
    }

    /// Create an edge with a distinct label
    pub fn labeled(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
        }
    }
}

/// Start and end markers of a [`TimeSeries`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    /// Lower boundary
    pub start: Edge,
    /// Upper boundary
    pub end: Edge,
}

/// Candidate normalized interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Normalized identifier of the interval
    pub uri: String,
    /// Human-readable label
    #[serde(default)]
    pub label: String,
}

impl Period {
    /// Create a period whose label repeats its uri
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            label: uri.clone(),
            uri,
        }
    }
}

/// One normalized temporal unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Text the engine was given
    pub input_value: String,
    /// Text after the engine's own preparation
    pub prepared_value: String,
    /// Substrings that should resolve to this unit
    #[serde(default)]
    pub matches: Vec<String>,
    /// Boundary markers
    pub edges: Edges,
    /// Candidate normalized intervals
    #[serde(default)]
    pub periods: Vec<Period>,
}

impl TimeSeries {
    /// Create a time series with no matches or periods
    pub fn new(
        input_value: impl Into<String>,
        prepared_value: impl Into<String>,
        start: Edge,
        end: Edge,
    ) -> Self {
        Self {
            input_value: input_value.into(),
            prepared_value: prepared_value.into(),
            matches: Vec::new(),
            edges: Edges { start, end },
            periods: Vec::new(),
        }
    }

    /// Set the match strings
    pub fn with_matches<I, S>(mut self, matches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matches = matches.into_iter().map(Into::into).collect();
        self
    }

    /// Set the candidate periods
    pub fn with_periods(mut self, periods: Vec<Period>) -> Self {
        self.periods = periods;
        self
    }

    /// Uris of all candidate periods
    pub fn period_uris(&self) -> impl Iterator<Item = &str> {
        self.periods.iter().map(|period| period.uri.as_str())
    }
}

/// Engine result for a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalExpression {
    /// Literal substrings the engine recognized
    pub matches: Vec<String>,
    /// Normalized units extracted from those substrings
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
}

impl TemporalExpression {
    /// Create an expression
    pub fn new<I, S>(matches: I, time_series: Vec<TimeSeries>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matches: matches.into_iter().map(Into::into).collect(),
            time_series,
        }
    }

    /// An expression is usable only if it carries at least one non-empty match
    pub fn is_valid(&self) -> bool {
        self.matches.iter().any(|m| !m.is_empty())
    }
}

/// Semantics bound to an entity span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Normalization {
    /// Every time series whose matches occur in the span text
    Series(Vec<TimeSeries>),
    /// The expression whose matches contain the span text
    Expression(TemporalExpression),
}

impl Normalization {
    /// Time series carried by this binding, in engine order
    pub fn time_series(&self) -> &[TimeSeries] {
        match self {
            Normalization::Series(series) => series,
            Normalization::Expression(expression) => &expression.time_series,
        }
    }
}
