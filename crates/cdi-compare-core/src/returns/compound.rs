use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::cdi::from_cdi_percent;
use crate::error::CdiCompareError;
use crate::tax::brackets::TaxRegimeRates;
use crate::types::*;
use crate::CdiCompareResult;

/// Day-count basis: fractional-year compounding over a 365-day year.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Returns derived from one investment under both regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnResult {
    /// Effective gross annual rate, in percent.
    pub gross_annual_rate: Percent,
    pub gross_period_return: Rate,
    pub net_period_return_old: Rate,
    pub net_period_return_new: Rate,
    pub final_amount_gross: Money,
    pub final_amount_old: Money,
    pub final_amount_new: Money,
}

impl ReturnResult {
    /// Gross gain over the period.
    pub fn gross_gain(&self, principal: Money) -> Money {
        self.final_amount_gross - principal
    }

    /// New-regime net outcome minus current-regime net outcome.
    pub fn difference(&self) -> Money {
        self.final_amount_new - self.final_amount_old
    }
}

/// Effective gross annual rate for a return quote.
pub fn gross_annual_rate(spec: ReturnSpec, cdi_annual_rate: Percent) -> CdiCompareResult<Percent> {
    match spec {
        ReturnSpec::PercentOfCdi(pct) => from_cdi_percent(pct, cdi_annual_rate).ok_or_else(|| {
            CdiCompareError::InvalidInput {
                field: "return_spec".into(),
                reason: format!("{pct}% of a {cdi_annual_rate}% CDI is out of range"),
            }
        }),
        ReturnSpec::PreFixed(rate) => Ok(rate),
    }
}

/// Compounded return over `days` for an annual rate given in percent:
/// `(1 + rate/100)^(days/365) - 1`.
pub fn compound_return(annual_rate_pct: Percent, days: u32) -> CdiCompareResult<Rate> {
    if annual_rate_pct <= dec!(-100) {
        return Err(CdiCompareError::InvalidRateDomain {
            annual_rate_pct,
        });
    }
    if days == 0 {
        return Err(CdiCompareError::InvalidInput {
            field: "days".into(),
            reason: "Compounding period must be at least 1 day".into(),
        });
    }
    if annual_rate_pct.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let base = Decimal::ONE + annual_rate_pct / dec!(100);
    let exponent = Decimal::from(days) / DAYS_PER_YEAR;
    let growth = base
        .checked_powd(exponent)
        .ok_or_else(|| CdiCompareError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: format!("Compounding {annual_rate_pct}% over {days} days overflows"),
        })?;
    Ok(growth - Decimal::ONE)
}

/// Return left after withholding tax at `tax_rate`. Tax applies to the
/// return only, never to principal.
pub fn net_return(gross_period_return: Rate, tax_rate: Rate) -> Rate {
    gross_period_return * (Decimal::ONE - tax_rate)
}

/// Annual rate after withholding tax, in percent.
pub fn net_annual_rate(gross_annual_rate: Percent, tax_rate: Rate) -> Percent {
    gross_annual_rate * (Decimal::ONE - tax_rate)
}

pub fn final_amount(principal: Money, period_return: Rate) -> Money {
    principal * (Decimal::ONE + period_return)
}

/// Gross, current-regime and proposed-regime returns for one term.
pub fn compute_returns(
    principal: Money,
    gross_annual_rate: Percent,
    term_days: u32,
    rates: &TaxRegimeRates,
) -> CdiCompareResult<ReturnResult> {
    let gross_period_return = compound_return(gross_annual_rate, term_days)?;
    let net_period_return_old = net_return(gross_period_return, rates.old_rate);
    let net_period_return_new = net_return(gross_period_return, rates.new_rate);

    Ok(ReturnResult {
        gross_annual_rate,
        gross_period_return,
        net_period_return_old,
        net_period_return_new,
        final_amount_gross: final_amount(principal, gross_period_return),
        final_amount_old: final_amount(principal, net_period_return_old),
        final_amount_new: final_amount(principal, net_period_return_new),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn test_zero_rate_is_exactly_zero() {
        for days in [1, 30, 365, 1080, 3650] {
            assert_eq!(compound_return(Decimal::ZERO, days).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_one_year_equals_annual_rate() {
        let r = compound_return(dec!(14.65), 365).unwrap();
        approx(r, dec!(0.1465), dec!(0.000000001));
    }

    #[test]
    fn test_thirty_days_at_cdi() {
        let r = compound_return(dec!(14.65), 30).unwrap();
        approx(r, dec!(0.011300122038951), dec!(0.0000001));
    }

    #[test]
    fn test_two_years_compounds() {
        let r = compound_return(dec!(14.65), 730).unwrap();
        approx(r, dec!(0.31446225), dec!(0.000000001));
    }

    #[test]
    fn test_rate_at_or_below_minus_100_rejected() {
        assert!(matches!(
            compound_return(dec!(-100), 30),
            Err(CdiCompareError::InvalidRateDomain { .. })
        ));
        assert!(matches!(
            compound_return(dec!(-150), 30),
            Err(CdiCompareError::InvalidRateDomain { .. })
        ));
    }

    #[test]
    fn test_negative_rate_above_floor_is_defined() {
        let r = compound_return(dec!(-50), 365).unwrap();
        approx(r, dec!(-0.5), dec!(0.000000001));
        assert!(r >= dec!(-1));
    }

    #[test]
    fn test_zero_days_rejected() {
        assert!(compound_return(dec!(10), 0).is_err());
    }

    #[test]
    fn test_gross_annual_rate_interpretation() {
        assert_eq!(
            gross_annual_rate(ReturnSpec::PercentOfCdi(dec!(100)), dec!(14.65)).unwrap(),
            dec!(14.65)
        );
        assert_eq!(
            gross_annual_rate(ReturnSpec::PercentOfCdi(dec!(120)), dec!(10)).unwrap(),
            dec!(12)
        );
        assert_eq!(
            gross_annual_rate(ReturnSpec::PreFixed(dec!(14)), dec!(14.65)).unwrap(),
            dec!(14)
        );
    }

    #[test]
    fn test_gross_annual_rate_out_of_range() {
        let result = gross_annual_rate(ReturnSpec::PercentOfCdi(Decimal::MAX), dec!(1000));
        assert!(matches!(result, Err(CdiCompareError::InvalidInput { .. })));
    }

    #[test]
    fn test_net_return_taxes_only_the_return() {
        assert_eq!(net_return(dec!(0.10), dec!(0.225)), dec!(0.0775));
        assert_eq!(final_amount(dec!(1000), dec!(0.0775)), dec!(1077.5));
        assert_eq!(net_annual_rate(dec!(14), dec!(0.15)), dec!(11.9));
    }

    #[test]
    fn test_compute_returns_identities() {
        let rates = TaxRegimeRates {
            old_rate: dec!(0.225),
            new_rate: dec!(0.175),
        };
        let r = compute_returns(dec!(10000), dec!(14.65), 30, &rates).unwrap();
        assert_eq!(
            r.final_amount_gross,
            dec!(10000) * (Decimal::ONE + r.gross_period_return)
        );
        assert_eq!(
            r.net_period_return_old,
            r.gross_period_return * (Decimal::ONE - dec!(0.225))
        );
        assert!(r.final_amount_new > r.final_amount_old);
        approx(r.final_amount_old, dec!(10087.575945801873), dec!(0.001));
        approx(r.final_amount_new, dec!(10093.226006821347), dec!(0.001));
    }
}
