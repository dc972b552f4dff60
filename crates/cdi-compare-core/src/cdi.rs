use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::error::CdiCompareError;
use crate::types::{with_metadata, ComputationOutput, Percent};
use crate::CdiCompareResult;

/// CDI-equivalence of a gross rate and its two net counterparts.
///
/// Every figure is `None` when the CDI rate is zero, since no
/// percentage of a zero benchmark is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdiEquivalence {
    pub gross: Option<Percent>,
    pub net_old: Option<Percent>,
    pub net_new: Option<Percent>,
}

impl CdiEquivalence {
    pub fn new(
        gross_annual: Percent,
        net_old_annual: Percent,
        net_new_annual: Percent,
        cdi_annual_rate: Percent,
    ) -> Self {
        Self {
            gross: to_cdi_percent(gross_annual, cdi_annual_rate),
            net_old: to_cdi_percent(net_old_annual, cdi_annual_rate),
            net_new: to_cdi_percent(net_new_annual, cdi_annual_rate),
        }
    }
}

/// Express an annual rate as a percentage of the CDI rate.
///
/// Returns `None` (not applicable) when `cdi_annual_rate` is zero.
pub fn to_cdi_percent(annual_rate: Percent, cdi_annual_rate: Percent) -> Option<Percent> {
    if cdi_annual_rate.is_zero() {
        warn!(%annual_rate, "CDI rate is zero; CDI equivalence not applicable");
        return None;
    }
    let percent = annual_rate
        .checked_div(cdi_annual_rate)
        .and_then(|ratio| ratio.checked_mul(dec!(100)));
    if percent.is_none() {
        warn!(%annual_rate, %cdi_annual_rate, "CDI equivalence out of decimal range");
    }
    percent
}

/// Absolute annual rate for a yield quoted as a percentage of CDI.
///
/// `None` when the product leaves the decimal range.
pub fn from_cdi_percent(percent_of_cdi: Percent, cdi_annual_rate: Percent) -> Option<Percent> {
    (percent_of_cdi / dec!(100)).checked_mul(cdi_annual_rate)
}

/// True when the figure beats 100% of CDI.
pub fn beats_cdi(percent_of_cdi: Option<Percent>) -> bool {
    matches!(percent_of_cdi, Some(p) if p > dec!(100))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdiQuery {
    /// Annual rate, in percent.
    pub annual_rate: Percent,
    pub cdi_annual_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdiConversion {
    pub annual_rate: Percent,
    pub cdi_annual_rate: Percent,
    /// `None` when not applicable (zero CDI or out of range).
    pub percent_of_cdi: Option<Percent>,
    pub beats_cdi: bool,
}

/// CDI-equivalence of a single annual rate, wrapped in the standard envelope.
pub fn cdi_equivalence_for(query: &CdiQuery) -> CdiCompareResult<ComputationOutput<CdiConversion>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if query.cdi_annual_rate < Decimal::ZERO {
        return Err(CdiCompareError::InvalidInput {
            field: "cdi_annual_rate".into(),
            reason: "CDI rate cannot be negative".into(),
        });
    }

    let percent_of_cdi = to_cdi_percent(query.annual_rate, query.cdi_annual_rate);
    if percent_of_cdi.is_none() {
        warnings.push("CDI equivalence is not applicable for this CDI rate".into());
    }

    let conversion = CdiConversion {
        annual_rate: query.annual_rate,
        cdi_annual_rate: query.cdi_annual_rate,
        percent_of_cdi,
        beats_cdi: beats_cdi(percent_of_cdi),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annual rate / CDI annual rate x 100",
        &serde_json::json!({
            "annual_rate": query.annual_rate.to_string(),
            "cdi_annual_rate": query.cdi_annual_rate.to_string(),
        }),
        warnings,
        elapsed,
        conversion,
    ))
}
