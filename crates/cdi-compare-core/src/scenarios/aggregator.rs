use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::cdi::CdiEquivalence;
use crate::returns::comparison::{evaluate_investment, InvestmentInput};
use crate::returns::compound::ReturnResult;
use crate::scenarios::terms::{resolve_terms, ScenarioTerm, TermSelection, MAX_SCENARIOS};
use crate::tax::brackets::TaxRegimeRates;
use crate::types::*;
use crate::CdiCompareResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Outcome of one term in a batch comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub term_days: u32,
    pub label: String,
    pub tax_rates: TaxRegimeRates,
    pub returns: ReturnResult,
    pub net_annual_rate_old: Percent,
    pub net_annual_rate_new: Percent,
    pub cdi: CdiEquivalence,
    /// Proposed net final amount minus current net final amount.
    pub difference: Money,
    /// Signed difference relative to the current net final amount, in percent.
    pub difference_pct: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Best scenario, and the proposed regime pays more.
    Gain,
    /// Best scenario, but every term loses under the proposed regime.
    SmallestLoss,
    /// Worst scenario, and the proposed regime pays less.
    Loss,
    /// Worst scenario, but every term gains under the proposed regime.
    SmallestGain,
}

/// Best or worst scenario of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInsight {
    /// Position in the evaluated sequence.
    pub index: usize,
    pub label: String,
    pub term_days: u32,
    pub difference: Money,
    pub difference_pct: Percent,
    pub kind: InsightKind,
}

/// Input for a batch comparison across terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioAnalysisInput {
    pub principal: Money,
    pub return_spec: ReturnSpec,
    pub cdi_annual_rate: Percent,
    #[serde(default)]
    pub category: InvestmentCategory,
    #[serde(default)]
    pub terms: TermSelection,
}

impl ScenarioAnalysisInput {
    /// The investment held constant across terms. Its term is replaced per scenario.
    pub fn base_investment(&self) -> InvestmentInput {
        InvestmentInput {
            principal: self.principal,
            return_spec: self.return_spec,
            cdi_annual_rate: self.cdi_annual_rate,
            term_days: 1,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub scenarios: Vec<ScenarioResult>,
    pub best: Option<ScenarioInsight>,
    pub worst: Option<ScenarioInsight>,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate `base` at every term, in the order given.
///
/// Principal, return quote, CDI and category come from `base`; only the
/// term changes. An empty term list yields an empty result.
pub fn evaluate_scenarios(
    base: &InvestmentInput,
    terms: &[ScenarioTerm],
) -> CdiCompareResult<Vec<ScenarioResult>> {
    terms
        .iter()
        .map(|term| {
            let comparison = evaluate_investment(&base.with_term(term.days))?;
            let final_old = comparison.returns.final_amount_old;
            let difference_pct = if final_old > Decimal::ZERO {
                comparison.difference / final_old * dec!(100)
            } else {
                Decimal::ZERO
            };
            Ok(ScenarioResult {
                term_days: term.days,
                label: term.display_label(),
                tax_rates: comparison.tax_rates,
                returns: comparison.returns,
                net_annual_rate_old: comparison.net_annual_rate_old,
                net_annual_rate_new: comparison.net_annual_rate_new,
                cdi: comparison.cdi_equivalence,
                difference: comparison.difference,
                difference_pct,
            })
        })
        .collect()
}

/// Index of the scenario with the largest difference. Ties keep the
/// first occurrence; `None` for an empty slice.
pub fn select_best(scenarios: &[ScenarioResult]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, s) in scenarios.iter().enumerate() {
        match best {
            Some(b) if s.difference <= scenarios[b].difference => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Index of the scenario with the smallest difference. Ties keep the
/// first occurrence; `None` for an empty slice.
pub fn select_worst(scenarios: &[ScenarioResult]) -> Option<usize> {
    let mut worst: Option<usize> = None;
    for (i, s) in scenarios.iter().enumerate() {
        match worst {
            Some(w) if s.difference >= scenarios[w].difference => {}
            _ => worst = Some(i),
        }
    }
    worst
}

fn insight(scenarios: &[ScenarioResult], index: usize, kind: InsightKind) -> ScenarioInsight {
    let s = &scenarios[index];
    ScenarioInsight {
        index,
        label: s.label.clone(),
        term_days: s.term_days,
        difference: s.difference,
        difference_pct: s.difference_pct,
        kind,
    }
}

/// Best and worst scenarios with their classification.
pub fn summarize(
    scenarios: &[ScenarioResult],
) -> (Option<ScenarioInsight>, Option<ScenarioInsight>) {
    let best = select_best(scenarios).map(|i| {
        let kind = if scenarios[i].difference > Decimal::ZERO {
            InsightKind::Gain
        } else {
            InsightKind::SmallestLoss
        };
        insight(scenarios, i, kind)
    });
    let worst = select_worst(scenarios).map(|i| {
        let kind = if scenarios[i].difference < Decimal::ZERO {
            InsightKind::Loss
        } else {
            InsightKind::SmallestGain
        };
        insight(scenarios, i, kind)
    });
    (best, worst)
}

/// Compare both regimes across a list of terms and pick the best and
/// worst terms for the investor.
pub fn analyze_term_scenarios(
    input: &ScenarioAnalysisInput,
) -> CdiCompareResult<ComputationOutput<ScenarioAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let base = input.base_investment();
    base.validate()?;

    let (terms, truncated) = resolve_terms(&input.terms)?;
    if truncated {
        warn!(max = MAX_SCENARIOS, "custom term list truncated");
        warnings.push(format!(
            "Only the first {MAX_SCENARIOS} terms were evaluated"
        ));
    }

    let scenarios = evaluate_scenarios(&base, &terms)?;
    let (best, worst) = summarize(&scenarios);

    if scenarios.is_empty() {
        warnings.push("No terms supplied; nothing to compare".into());
    }

    debug!(
        count = scenarios.len(),
        best = ?best.as_ref().map(|b| b.term_days),
        worst = ?worst.as_ref().map(|w| w.term_days),
        "evaluated term scenarios"
    );

    let assumptions = serde_json::json!({
        "principal": input.principal.to_string(),
        "return_spec": input.return_spec,
        "cdi_annual_rate": input.cdi_annual_rate.to_string(),
        "category": input.category,
        "terms": terms.iter().map(|t| t.days).collect::<Vec<_>>(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Per-term regime comparison; best/worst by signed final-amount difference",
        &assumptions,
        warnings,
        elapsed,
        ScenarioAnalysis {
            scenarios,
            best,
            worst,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn taxable_base() -> InvestmentInput {
        InvestmentInput {
            principal: dec!(10000),
            return_spec: ReturnSpec::PercentOfCdi(dec!(100)),
            cdi_annual_rate: dec!(14.65),
            term_days: 1,
            category: InvestmentCategory::Taxable,
        }
    }

    #[test]
    fn test_preserves_caller_order() {
        let terms = vec![
            ScenarioTerm::new(720),
            ScenarioTerm::new(30),
            ScenarioTerm::new(365),
        ];
        let results = evaluate_scenarios(&taxable_base(), &terms).unwrap();
        let days: Vec<u32> = results.iter().map(|r| r.term_days).collect();
        assert_eq!(days, vec![720, 30, 365]);
        assert_eq!(results[0].label, "1y11m");
    }

    #[test]
    fn test_empty_terms_no_selection() {
        let results = evaluate_scenarios(&taxable_base(), &[]).unwrap();
        assert!(results.is_empty());
        assert_eq!(select_best(&results), None);
        assert_eq!(select_worst(&results), None);
        assert_eq!(summarize(&results), (None, None));
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        // 720 loses, 365 and 360 both break even
        let terms = vec![
            ScenarioTerm::new(720),
            ScenarioTerm::labelled(365, "first"),
            ScenarioTerm::labelled(360, "second"),
        ];
        let results = evaluate_scenarios(&taxable_base(), &terms).unwrap();
        assert_eq!(results[1].difference, results[2].difference);
        assert_eq!(select_best(&results), Some(1));
        assert_eq!(select_worst(&results), Some(0));
    }

    #[test]
    fn test_identical_terms_tie_on_both_ends() {
        let terms = vec![ScenarioTerm::labelled(30, "a"), ScenarioTerm::labelled(30, "b")];
        let results = evaluate_scenarios(&taxable_base(), &terms).unwrap();
        assert_eq!(select_best(&results), Some(0));
        assert_eq!(select_worst(&results), Some(0));
    }

    #[test]
    fn test_exempt_insights_are_losses() {
        let base = InvestmentInput {
            category: InvestmentCategory::TaxExempt,
            ..taxable_base()
        };
        let results = evaluate_scenarios(&base, &crate::scenarios::terms::standard_terms()).unwrap();
        let (best, worst) = summarize(&results);
        let best = best.unwrap();
        let worst = worst.unwrap();
        assert_eq!(best.kind, InsightKind::SmallestLoss);
        assert_eq!(best.term_days, 30);
        assert_eq!(worst.kind, InsightKind::Loss);
        assert_eq!(worst.term_days, 1080);
    }

    #[test]
    fn test_analysis_truncation_warns() {
        let input = ScenarioAnalysisInput {
            principal: dec!(10000),
            return_spec: ReturnSpec::PercentOfCdi(dec!(100)),
            cdi_annual_rate: dec!(14.65),
            category: InvestmentCategory::Taxable,
            terms: TermSelection::Custom((1..=7).map(|i| ScenarioTerm::new(i * 100)).collect()),
        };
        let output = analyze_term_scenarios(&input).unwrap();
        assert_eq!(output.result.scenarios.len(), MAX_SCENARIOS);
        assert!(output.warnings.iter().any(|w| w.contains("first 6")));
    }
}
