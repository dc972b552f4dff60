use clap::Args;
use serde_json::Value;
use tracing::info;

use cdi_compare_core::scenarios::aggregator::{self, ScenarioAnalysisInput};
use cdi_compare_core::scenarios::terms::{ScenarioTerm, TermSelection, MAX_TERM_DAYS};

use crate::commands::common::{load_input, InvestmentArgs};

/// Arguments for a multi-term regime comparison
#[derive(Args)]
pub struct ScenarioArgs {
    #[command(flatten)]
    pub investment: InvestmentArgs,

    /// Custom terms in days (comma-separated, up to 6); standard preset when omitted
    #[arg(long, value_delimiter = ',')]
    pub terms: Option<Vec<u32>>,

    /// Labels for the custom terms (comma-separated, matched by position)
    #[arg(long, value_delimiter = ',')]
    pub labels: Option<Vec<String>>,
}

/// Pair terms with labels by position; unlabelled terms get a derived label.
fn build_terms(days: &[u32], labels: &[String]) -> Vec<ScenarioTerm> {
    days.iter()
        .enumerate()
        .map(|(i, d)| match labels.get(i) {
            Some(label) => ScenarioTerm::labelled(*d, label.clone()),
            None => ScenarioTerm::new(*d),
        })
        .collect()
}

/// Term selection from `--terms` / `--labels`; labels need explicit terms.
fn term_selection(
    terms: Option<&[u32]>,
    labels: Option<&[String]>,
) -> Result<TermSelection, Box<dyn std::error::Error>> {
    match (terms, labels) {
        (Some(days), labels) => {
            if let Some(bad) = days.iter().find(|d| **d == 0 || **d > MAX_TERM_DAYS) {
                return Err(format!("--terms value {bad} is outside 1..={MAX_TERM_DAYS}").into());
            }
            Ok(TermSelection::Custom(build_terms(days, labels.unwrap_or_default())))
        }
        (None, Some(_)) => {
            Err("--labels requires --terms; the standard preset has fixed labels".into())
        }
        (None, None) => Ok(TermSelection::Standard),
    }
}

pub fn run_scenarios(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inv = &args.investment;
    let scenario_input: ScenarioAnalysisInput = load_input(inv.input.as_deref(), || {
        inv.check_ranges()?;
        let terms = term_selection(args.terms.as_deref(), args.labels.as_deref())?;
        Ok(ScenarioAnalysisInput {
            principal: inv.principal,
            return_spec: inv.return_spec(),
            cdi_annual_rate: inv.cdi,
            category: inv.category.into(),
            terms,
        })
    })?;

    info!("running term scenarios");
    let result = aggregator::analyze_term_scenarios(&scenario_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_terms_pairs_labels_by_position() {
        let terms = build_terms(&[30, 400, 90], &["short".to_string()]);
        assert_eq!(terms[0], ScenarioTerm::labelled(30, "short"));
        assert_eq!(terms[1], ScenarioTerm::new(400));
        assert_eq!(terms[2].display_label(), "3m");
    }

    #[test]
    fn test_labels_without_terms_rejected() {
        let labels = vec!["short".to_string()];
        let err = term_selection(None, Some(labels.as_slice())).unwrap_err();
        assert!(err.to_string().contains("--labels requires --terms"));
    }

    #[test]
    fn test_no_terms_selects_standard_preset() {
        assert!(matches!(term_selection(None, None).unwrap(), TermSelection::Standard));
    }

    #[test]
    fn test_out_of_range_term_rejected() {
        assert!(term_selection(Some(&[30, 0][..]), None).is_err());
        assert!(term_selection(Some(&[MAX_TERM_DAYS + 1][..]), None).is_err());
    }
}
