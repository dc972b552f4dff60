use serde::{Deserialize, Serialize};

use crate::error::CdiCompareError;
use crate::CdiCompareResult;

/// Most terms a batch comparison evaluates.
pub const MAX_SCENARIOS: usize = 6;

/// Longest accepted term (ten years).
pub const MAX_TERM_DAYS: u32 = 3650;

const STANDARD_TERMS: [(u32, &str); 6] = [
    (30, "1 month"),
    (90, "3 months"),
    (180, "6 months"),
    (365, "1 year"),
    (720, "2 years"),
    (1080, "3 years"),
];

/// A holding period to evaluate, optionally labelled by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTerm {
    pub days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ScenarioTerm {
    pub fn new(days: u32) -> Self {
        Self { days, label: None }
    }

    pub fn labelled(days: u32, label: impl Into<String>) -> Self {
        Self {
            days,
            label: Some(label.into()),
        }
    }

    /// Caller label, or one derived from the day count.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| term_label(self.days))
    }
}

/// Which term list a batch comparison runs over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "terms", rename_all = "snake_case")]
pub enum TermSelection {
    /// 1, 3 and 6 months; 1, 2 and 3 years.
    #[default]
    Standard,
    Custom(Vec<ScenarioTerm>),
}

/// The standard preset with its labels.
pub fn standard_terms() -> Vec<ScenarioTerm> {
    STANDARD_TERMS
        .iter()
        .map(|(days, label)| ScenarioTerm::labelled(*days, *label))
        .collect()
}

/// Compact label for a day count: `15d`, `3m`, `1y`, `2y6m`.
pub fn term_label(days: u32) -> String {
    if days < 30 {
        format!("{days}d")
    } else if days < 365 {
        format!("{}m", days / 30)
    } else {
        let years = days / 365;
        let months = (days % 365) / 30;
        if days % 365 > 0 {
            format!("{years}y{months}m")
        } else {
            format!("{years}y")
        }
    }
}

/// Resolve a selection into at most [`MAX_SCENARIOS`] validated terms.
///
/// Returns the terms and whether the custom list had to be truncated.
pub fn resolve_terms(selection: &TermSelection) -> CdiCompareResult<(Vec<ScenarioTerm>, bool)> {
    match selection {
        TermSelection::Standard => Ok((standard_terms(), false)),
        TermSelection::Custom(terms) => {
            for term in terms {
                if term.days == 0 || term.days > MAX_TERM_DAYS {
                    return Err(CdiCompareError::InvalidInput {
                        field: "terms".into(),
                        reason: format!(
                            "Term of {} days is outside 1..={MAX_TERM_DAYS}",
                            term.days
                        ),
                    });
                }
            }
            let truncated = terms.len() > MAX_SCENARIOS;
            Ok((terms.iter().take(MAX_SCENARIOS).cloned().collect(), truncated))
        }
    }
}
