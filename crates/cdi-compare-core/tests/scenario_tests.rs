use cdi_compare_core::returns::comparison::{self, InvestmentInput};
use cdi_compare_core::scenarios::aggregator::{self, InsightKind, ScenarioAnalysisInput};
use cdi_compare_core::scenarios::terms::{ScenarioTerm, TermSelection};
use cdi_compare_core::{InvestmentCategory, ReturnSpec};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn analysis_input(category: InvestmentCategory, terms: TermSelection) -> ScenarioAnalysisInput {
    ScenarioAnalysisInput {
        principal: dec!(10000),
        return_spec: ReturnSpec::PercentOfCdi(dec!(100)),
        cdi_annual_rate: dec!(14.65),
        category,
        terms,
    }
}

// ===========================================================================
// Standard preset
// ===========================================================================

#[test]
fn test_standard_preset_taxable() {
    let output = aggregator::analyze_term_scenarios(&analysis_input(
        InvestmentCategory::Taxable,
        TermSelection::Standard,
    ))
    .unwrap();
    let a = &output.result;

    assert_eq!(a.scenarios.len(), 6);
    let labels: Vec<&str> = a.scenarios.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["1 month", "3 months", "6 months", "1 year", "2 years", "3 years"]
    );

    // 180 days moves from 20% to 17.5%, the largest gain on this preset
    let best = a.best.as_ref().unwrap();
    assert_eq!(best.term_days, 180);
    assert_eq!(best.index, 2);
    assert_eq!(best.kind, InsightKind::Gain);

    // Three years moves from 15% to 17.5% on the largest gross gain
    let worst = a.worst.as_ref().unwrap();
    assert_eq!(worst.term_days, 1080);
    assert_eq!(worst.kind, InsightKind::Loss);
    assert!(worst.difference < Decimal::ZERO);
    assert!(worst.difference_pct < Decimal::ZERO);
}

#[test]
fn test_one_year_breaks_even() {
    let output = aggregator::analyze_term_scenarios(&analysis_input(
        InvestmentCategory::Taxable,
        TermSelection::Standard,
    ))
    .unwrap();
    let one_year = &output.result.scenarios[3];
    assert_eq!(one_year.term_days, 365);
    assert_eq!(one_year.difference, Decimal::ZERO);
    assert_eq!(one_year.difference_pct, Decimal::ZERO);
}

#[test]
fn test_scenario_matches_single_comparison() {
    let base = InvestmentInput {
        principal: dec!(25000),
        return_spec: ReturnSpec::PreFixed(dec!(13.5)),
        cdi_annual_rate: dec!(14.65),
        term_days: 1,
        category: InvestmentCategory::Taxable,
    };
    let results = aggregator::evaluate_scenarios(&base, &[ScenarioTerm::new(200)]).unwrap();
    let single = comparison::evaluate_investment(&base.with_term(200)).unwrap();

    assert_eq!(results[0].returns, single.returns);
    assert_eq!(results[0].tax_rates, single.tax_rates);
    assert_eq!(results[0].cdi, single.cdi_equivalence);
    assert_eq!(results[0].difference, single.difference);
}

#[test]
fn test_cdi_equivalence_per_scenario() {
    let output = aggregator::analyze_term_scenarios(&analysis_input(
        InvestmentCategory::Taxable,
        TermSelection::Custom(vec![ScenarioTerm::new(720)]),
    ))
    .unwrap();
    let s = &output.result.scenarios[0];
    assert_eq!(s.cdi.gross, Some(dec!(100)));
    assert_eq!(s.cdi.net_old, Some(dec!(85)));
    assert_eq!(s.cdi.net_new, Some(dec!(82.5)));
    assert_eq!(s.label, "1y11m");
}

// ===========================================================================
// Degenerate inputs
// ===========================================================================

#[test]
fn test_empty_term_list() {
    let output = aggregator::analyze_term_scenarios(&analysis_input(
        InvestmentCategory::Taxable,
        TermSelection::Custom(vec![]),
    ))
    .unwrap();
    assert!(output.result.scenarios.is_empty());
    assert_eq!(output.result.best, None);
    assert_eq!(output.result.worst, None);
    assert_eq!(output.warnings.len(), 1);
}

#[test]
fn test_zero_cdi_in_batch() {
    let mut input = analysis_input(InvestmentCategory::TaxExempt, TermSelection::Standard);
    input.return_spec = ReturnSpec::PreFixed(dec!(12));
    input.cdi_annual_rate = Decimal::ZERO;

    let output = aggregator::analyze_term_scenarios(&input).unwrap();
    for s in &output.result.scenarios {
        assert_eq!(s.cdi.gross, None);
        assert_eq!(s.cdi.net_old, None);
        assert_eq!(s.cdi.net_new, None);
    }
}

#[test]
fn test_invalid_principal_rejected_even_without_terms() {
    let mut input = analysis_input(InvestmentCategory::Taxable, TermSelection::Custom(vec![]));
    input.principal = dec!(-1);
    assert!(aggregator::analyze_term_scenarios(&input).is_err());
}

#[test]
fn test_custom_labels_paired_with_terms() {
    let output = aggregator::analyze_term_scenarios(&analysis_input(
        InvestmentCategory::Taxable,
        TermSelection::Custom(vec![
            ScenarioTerm::labelled(1000, "long"),
            ScenarioTerm::new(15),
            ScenarioTerm::labelled(200, "mid"),
        ]),
    ))
    .unwrap();
    let pairs: Vec<(u32, &str)> = output
        .result
        .scenarios
        .iter()
        .map(|s| (s.term_days, s.label.as_str()))
        .collect();
    assert_eq!(pairs, vec![(1000, "long"), (15, "15d"), (200, "mid")]);
}

#[test]
fn test_analysis_input_from_json_defaults_to_standard() {
    let input: ScenarioAnalysisInput = serde_json::from_str(
        r#"{
            "principal": "10000",
            "return_spec": { "type": "percent_of_cdi", "value": "100" },
            "cdi_annual_rate": "14.65"
        }"#,
    )
    .unwrap();
    assert_eq!(input.terms, TermSelection::Standard);
    assert_eq!(input.category, InvestmentCategory::Taxable);

    let custom: TermSelection =
        serde_json::from_str(r#"{ "kind": "custom", "terms": [{ "days": 45 }] }"#).unwrap();
    assert_eq!(custom, TermSelection::Custom(vec![ScenarioTerm::new(45)]));
}
