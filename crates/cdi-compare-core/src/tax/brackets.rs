use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::CdiCompareError;
use crate::types::*;
use crate::CdiCompareResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Flat rate charged on taxable investments under the proposed regime.
pub const PROPOSED_TAXABLE_RATE: Rate = dec!(0.175);

/// Flat rate charged on currently exempt investments under the proposed regime.
pub const PROPOSED_EXEMPT_RATE: Rate = dec!(0.05);

/// Current regressive table as (minimum term in days, rate), longest first.
const REGRESSIVE_TABLE: [(u32, Rate); 4] = [
    (720, dec!(0.15)),
    (360, dec!(0.175)),
    (180, dec!(0.20)),
    (0, dec!(0.225)),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Withholding-tax rates applicable to one investment under both regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegimeRates {
    pub old_rate: Rate,
    pub new_rate: Rate,
}

impl TaxRegimeRates {
    pub fn rate(&self, regime: Regime) -> Rate {
        match regime {
            Regime::Current => self.old_rate,
            Regime::Proposed => self.new_rate,
        }
    }

    /// Rate change from current to proposed, in percentage points (signed).
    pub fn change_pp(&self) -> Percent {
        (self.new_rate - self.old_rate) * dec!(100)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRateQuery {
    pub category: InvestmentCategory,
    pub term_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRateReport {
    pub category: InvestmentCategory,
    pub term_days: u32,
    pub rates: TaxRegimeRates,
    /// Bracket of the current regressive table the term falls in.
    pub bracket: String,
    /// |new - old| in percentage points.
    pub rate_difference_pp: Percent,
}

// ---------------------------------------------------------------------------
// Bracket resolution
// ---------------------------------------------------------------------------

/// Current-regime rate for a taxable investment held for `term_days`.
///
/// Brackets are closed on the lower bound: 180, 360 and 720 days already
/// belong to the cheaper bracket.
pub fn resolve_old_regime_rate(term_days: u32) -> Rate {
    REGRESSIVE_TABLE
        .iter()
        .find(|(min_days, _)| term_days >= *min_days)
        .map(|(_, rate)| *rate)
        .unwrap_or(dec!(0.225))
}

/// Human-readable description of the bracket `term_days` falls in.
pub fn bracket_description(term_days: u32) -> String {
    match term_days {
        720..=u32::MAX => "720 days or more".to_string(),
        360..=719 => "360 to 719 days".to_string(),
        180..=359 => "180 to 359 days".to_string(),
        _ => "up to 179 days".to_string(),
    }
}

/// Apply the category rules to a bracket rate, producing both regimes' rates.
pub fn apply_category_override(bracket_rate: Rate, category: InvestmentCategory) -> TaxRegimeRates {
    match category {
        InvestmentCategory::Taxable => TaxRegimeRates {
            old_rate: bracket_rate,
            new_rate: PROPOSED_TAXABLE_RATE,
        },
        InvestmentCategory::TaxExempt => TaxRegimeRates {
            old_rate: Decimal::ZERO,
            new_rate: PROPOSED_EXEMPT_RATE,
        },
    }
}

/// Both regimes' rates for a category and term.
pub fn regime_rates(category: InvestmentCategory, term_days: u32) -> TaxRegimeRates {
    let rates = apply_category_override(resolve_old_regime_rate(term_days), category);
    debug!(
        ?category,
        term_days,
        old_rate = %rates.old_rate,
        new_rate = %rates.new_rate,
        "resolved regime rates"
    );
    rates
}

/// Tax-rate lookup wrapped in the standard envelope.
pub fn regime_rates_for(
    query: &TaxRateQuery,
) -> CdiCompareResult<ComputationOutput<TaxRateReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if query.term_days == 0 {
        return Err(CdiCompareError::InvalidInput {
            field: "term_days".into(),
            reason: "Term must be at least 1 day".into(),
        });
    }

    let rates = regime_rates(query.category, query.term_days);

    if query.category == InvestmentCategory::TaxExempt {
        warnings.push(
            "Tax-exempt investments pay no tax today; the bracket table does not apply".into(),
        );
    }

    let report = TaxRateReport {
        category: query.category,
        term_days: query.term_days,
        rates,
        bracket: bracket_description(query.term_days),
        rate_difference_pp: rates.change_pp().abs(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Regressive withholding-tax table (current) vs flat proposed rates",
        &serde_json::json!({
            "category": query.category,
            "term_days": query.term_days,
            "proposed_taxable_rate": PROPOSED_TAXABLE_RATE.to_string(),
            "proposed_exempt_rate": PROPOSED_EXEMPT_RATE.to_string(),
        }),
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
