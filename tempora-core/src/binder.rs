//! Semantic binding
//!
//! Picks the engine results that belong to a resolved span. When several
//! time series match they are all kept; choosing among them is left to the
//! consumer.

use crate::normalizer::fold_accents;
use crate::temporal::{Normalization, TemporalExpression, TimeSeries};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How engine results are bound to spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingMode {
    /// Attach every time series that has a match inside the span text
    #[default]
    Series,
    /// Attach the first expression whose matches contain the folded span text
    Expression,
}

impl BindingMode {
    /// Configuration name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingMode::Series => "series",
            BindingMode::Expression => "expression",
        }
    }
}

impl std::str::FromStr for BindingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "series" => Ok(BindingMode::Series),
            "expression" => Ok(BindingMode::Expression),
            other => Err(format!("unknown binding mode: {other}")),
        }
    }
}

/// Binds span texts to the engine results of one document
#[derive(Debug, Clone, Copy)]
pub struct SemanticBinder<'e> {
    expressions: &'e [TemporalExpression],
    mode: BindingMode,
    accent_fold: bool,
}

impl<'e> SemanticBinder<'e> {
    /// Create a binder over the document's expressions
    pub fn new(
        expressions: &'e [TemporalExpression],
        mode: BindingMode,
        accent_fold: bool,
    ) -> Self {
        Self {
            expressions,
            mode,
            accent_fold,
        }
    }

    /// Semantics for a span text, or `None` if nothing matches
    pub fn bind(&self, span_text: &str) -> Option<Normalization> {
        match self.mode {
            BindingMode::Series => self.bind_series(span_text),
            BindingMode::Expression => self.bind_expression(span_text),
        }
    }

    fn bind_series(&self, span_text: &str) -> Option<Normalization> {
        let text = self.prepare(span_text);
        let matched: Vec<TimeSeries> = self
            .expressions
            .iter()
            .flat_map(|expression| expression.time_series.iter())
            .filter(|series| {
                series
                    .matches
                    .iter()
                    .filter(|m| !m.is_empty())
                    .any(|m| text.contains(self.prepare(m).as_ref()))
            })
            .cloned()
            .collect();

        (!matched.is_empty()).then_some(Normalization::Series(matched))
    }

    fn bind_expression(&self, span_text: &str) -> Option<Normalization> {
        let text = fold_accents(span_text);
        self.expressions
            .iter()
            .find(|expression| expression.matches.iter().any(|m| fold_accents(m) == text))
            .cloned()
            .map(Normalization::Expression)
    }

    fn prepare<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.accent_fold {
            Cow::Owned(fold_accents(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::Edge;

    fn century(n: u32, matches: &[&str]) -> TimeSeries {
        TimeSeries::new(
            format!("secolul {n}"),
            format!("secolul {n}"),
            Edge::new(format!("century:{n}:start")),
            Edge::new(format!("century:{n}:end")),
        )
        .with_matches(matches.iter().copied())
    }

    fn expressions() -> Vec<TemporalExpression> {
        vec![
            TemporalExpression::new(["Secolul XX"], vec![century(20, &["Secolul XX"])]),
            TemporalExpression::new(
                ["1856-1857"],
                vec![century(19, &["1856"]), century(19, &["1857"])],
            ),
        ]
    }

    #[test]
    fn test_series_substring_match() {
        let expressions = expressions();
        let binder = SemanticBinder::new(&expressions, BindingMode::Series, false);

        let bound = binder.bind("în perioada 1856-1857").unwrap();
        assert_eq!(bound.time_series().len(), 2);
        assert!(binder.bind("ieri").is_none());
    }

    #[test]
    fn test_series_is_case_sensitive() {
        let expressions = expressions();
        let binder = SemanticBinder::new(&expressions, BindingMode::Series, false);
        assert!(binder.bind("secolul xx").is_none());
    }

    #[test]
    fn test_series_folding() {
        let expressions = vec![TemporalExpression::new(
            ["perioadă"],
            vec![century(21, &["perioadă"])],
        )];
        let binder = SemanticBinder::new(&expressions, BindingMode::Series, true);
        assert!(binder.bind("o perioada lunga").is_some());

        let strict = SemanticBinder::new(&expressions, BindingMode::Series, false);
        assert!(strict.bind("o perioada lunga").is_none());
    }

    #[test]
    fn test_empty_match_binds_nothing() {
        let expressions = vec![TemporalExpression::new(["x"], vec![century(1, &[""])])];
        let binder = SemanticBinder::new(&expressions, BindingMode::Series, false);
        assert!(binder.bind("anything").is_none());
    }

    #[test]
    fn test_expression_exact_folded_match() {
        let expressions = vec![TemporalExpression::new(
            ["In secolul XX"],
            vec![century(20, &["In secolul XX"])],
        )];
        let binder = SemanticBinder::new(&expressions, BindingMode::Expression, true);

        match binder.bind("În secolul XX") {
            Some(Normalization::Expression(expression)) => {
                assert_eq!(expression.matches, vec!["In secolul XX"]);
            }
            other => panic!("expected an expression, got {other:?}"),
        }
        // substring is not enough in expression mode
        assert!(binder.bind("În secolul XX,").is_none());
    }

    #[test]
    fn test_binding_mode_parse() {
        assert_eq!("series".parse::<BindingMode>(), Ok(BindingMode::Series));
        assert_eq!(BindingMode::Expression.as_str(), "expression");
        assert!("all".parse::<BindingMode>().is_err());
    }
}
