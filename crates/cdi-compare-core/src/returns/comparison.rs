use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::cdi::{to_cdi_percent, CdiEquivalence};
use crate::error::CdiCompareError;
use crate::returns::compound::{compute_returns, gross_annual_rate, net_annual_rate, ReturnResult};
use crate::tax::brackets::{regime_rates, TaxRegimeRates};
use crate::types::*;
use crate::CdiCompareResult;

/// Terms at or below this many days sit in the steepest current bracket.
const SHORT_TERM_DAYS: u32 = 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One investment to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub principal: Money,
    pub return_spec: ReturnSpec,
    /// CDI annual rate, in percent.
    pub cdi_annual_rate: Percent,
    pub term_days: u32,
    #[serde(default)]
    pub category: InvestmentCategory,
}

impl InvestmentInput {
    /// Same investment held for a different term.
    pub fn with_term(&self, term_days: u32) -> Self {
        Self {
            term_days,
            ..self.clone()
        }
    }

    /// Boundary checks the engine repeats on its own entry points.
    pub fn validate(&self) -> CdiCompareResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(CdiCompareError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.cdi_annual_rate < Decimal::ZERO {
            return Err(CdiCompareError::InvalidInput {
                field: "cdi_annual_rate".into(),
                reason: "CDI rate cannot be negative".into(),
            });
        }
        if self.term_days == 0 {
            return Err(CdiCompareError::InvalidInput {
                field: "term_days".into(),
                reason: "Term must be at least 1 day".into(),
            });
        }
        Ok(())
    }
}

/// Whether moving to the proposed regime helps the investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Advantageous,
    Disadvantageous,
}

/// Single-scenario comparison of the current and proposed regimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnComparison {
    pub tax_rates: TaxRegimeRates,
    pub returns: ReturnResult,
    /// Yield as a percentage of CDI; `None` when CDI is zero.
    pub cdi_percentage: Option<Percent>,
    pub net_annual_rate_old: Percent,
    pub net_annual_rate_new: Percent,
    pub cdi_equivalence: CdiEquivalence,
    pub tax_paid_old: Money,
    pub tax_paid_new: Money,
    /// Current tax minus proposed tax; negative is an extra cost.
    pub tax_saving: Money,
    /// Proposed net final amount minus current net final amount.
    pub difference: Money,
    /// |difference| relative to the current net final amount, in percent.
    pub difference_pct: Percent,
    /// |tax change| relative to the current tax, in percent.
    pub tax_difference_pct: Percent,
    /// |rate change| in percentage points.
    pub tax_rate_difference_pp: Percent,
    pub verdict: Verdict,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate one investment under both regimes, without the envelope.
pub fn evaluate_investment(input: &InvestmentInput) -> CdiCompareResult<ReturnComparison> {
    input.validate()?;

    let rates = regime_rates(input.category, input.term_days);
    let gross_rate = gross_annual_rate(input.return_spec, input.cdi_annual_rate)?;
    let returns = compute_returns(input.principal, gross_rate, input.term_days, &rates)?;

    let cdi_percentage = match input.return_spec {
        ReturnSpec::PercentOfCdi(pct) => Some(pct),
        ReturnSpec::PreFixed(flat) => to_cdi_percent(flat, input.cdi_annual_rate),
    };

    let net_annual_rate_old = net_annual_rate(gross_rate, rates.old_rate);
    let net_annual_rate_new = net_annual_rate(gross_rate, rates.new_rate);

    let gross_gain = returns.gross_gain(input.principal);
    let tax_paid_old = gross_gain * rates.old_rate;
    let tax_paid_new = gross_gain * rates.new_rate;
    let difference = returns.difference();

    let difference_pct = if returns.final_amount_old > Decimal::ZERO {
        (difference / returns.final_amount_old * dec!(100)).abs()
    } else {
        Decimal::ZERO
    };
    let tax_difference_pct = if tax_paid_old.is_zero() {
        Decimal::ZERO
    } else {
        ((tax_paid_new - tax_paid_old) / tax_paid_old * dec!(100)).abs()
    };

    let verdict = if returns.final_amount_new > returns.final_amount_old {
        Verdict::Advantageous
    } else {
        Verdict::Disadvantageous
    };

    debug!(
        term_days = input.term_days,
        gross_annual_rate = %gross_rate,
        difference = %difference,
        ?verdict,
        "evaluated investment"
    );

    Ok(ReturnComparison {
        tax_rates: rates,
        returns,
        cdi_percentage,
        net_annual_rate_old,
        net_annual_rate_new,
        cdi_equivalence: CdiEquivalence::new(
            gross_rate,
            net_annual_rate_old,
            net_annual_rate_new,
            input.cdi_annual_rate,
        ),
        tax_paid_old,
        tax_paid_new,
        tax_saving: tax_paid_old - tax_paid_new,
        difference,
        difference_pct,
        tax_difference_pct,
        tax_rate_difference_pp: rates.change_pp().abs(),
        verdict,
    })
}

/// Compare the current and proposed regimes for one investment.
pub fn compare_returns(
    input: &InvestmentInput,
) -> CdiCompareResult<ComputationOutput<ReturnComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let comparison = evaluate_investment(input)?;

    if input.category == InvestmentCategory::Taxable && input.term_days <= SHORT_TERM_DAYS {
        warnings.push(format!(
            "Terms up to {SHORT_TERM_DAYS} days pay the top current rate of {}%; \
             the regime change is most pronounced here",
            comparison.tax_rates.old_rate * dec!(100)
        ));
    }
    if comparison.cdi_percentage.is_none() {
        warnings.push("CDI rate is zero; CDI-equivalence figures are not applicable".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound return (1 + r)^(d/365) - 1 with withholding tax on the return only",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "return_spec": input.return_spec,
            "cdi_annual_rate": input.cdi_annual_rate.to_string(),
            "term_days": input.term_days,
            "category": input.category,
        }),
        warnings,
        elapsed,
        comparison,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
