//! Stand-alone calculators: required monthly SIP for a target corpus, loan EMI,
//! and periodic compound interest. Rates are fractional.

use serde::Serialize;

use super::error::{PlanError, Result};

/// Longest SIP period or loan tenure accepted, in years.
const MAX_TERM_YEARS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub emi: f64,
    pub total_amount: f64,
    pub total_interest: f64,
}

/// Monthly SIP (paid at the start of each month) needed to reach
/// `target_corpus` after `years`.
///
/// With a positive `inflation` the return is first converted to a real rate,
/// so the corpus is read in today's money. The result is rounded to the
/// nearest unit.
pub fn required_monthly_sip(
    target_corpus: f64,
    annual_return: f64,
    years: u32,
    inflation: f64,
) -> Result<f64> {
    if !target_corpus.is_finite() || target_corpus <= 0.0 {
        return Err(PlanError::invalid("target corpus", "must be > 0"));
    }
    if years == 0 || years > MAX_TERM_YEARS {
        return Err(PlanError::invalid(
            "time period",
            format!("must be between 1 and {MAX_TERM_YEARS} years"),
        ));
    }
    if !annual_return.is_finite() || annual_return <= -1.0 {
        return Err(PlanError::invalid("rate of return", "must be > -100%"));
    }
    if !inflation.is_finite() || inflation <= -1.0 {
        return Err(PlanError::invalid("inflation", "must be > -100%"));
    }

    let real_return = if inflation > 0.0 {
        (1.0 + annual_return) / (1.0 + inflation) - 1.0
    } else {
        annual_return
    };
    let monthly_rate = real_return / 12.0;
    let months = years * 12;

    if monthly_rate.abs() < 1e-12 {
        return Ok((target_corpus / months as f64).round());
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    let sip = target_corpus * monthly_rate / ((growth - 1.0) * (1.0 + monthly_rate));
    Ok(sip.round())
}

/// Equated monthly instalment for a loan, rounded to the nearest unit.
pub fn emi(principal: f64, annual_rate: f64, tenure_years: u32) -> Result<EmiBreakdown> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(PlanError::invalid("loan amount", "must be > 0"));
    }
    if tenure_years == 0 || tenure_years > MAX_TERM_YEARS {
        return Err(PlanError::invalid(
            "loan tenure",
            format!("must be between 1 and {MAX_TERM_YEARS} years"),
        ));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(PlanError::invalid("interest rate", "must be >= 0"));
    }

    let monthly_rate = annual_rate / 12.0;
    let months = tenure_years * 12;
    let emi = if monthly_rate == 0.0 {
        principal / months as f64
    } else {
        let growth = (1.0 + monthly_rate).powi(months as i32);
        principal * monthly_rate * growth / (growth - 1.0)
    }
    .round();

    let total_amount = emi * months as f64;
    Ok(EmiBreakdown {
        emi,
        total_amount,
        total_interest: total_amount - principal,
    })
}

/// `principal` compounded `frequency` times a year for `years`.
pub fn compound_interest(principal: f64, annual_rate: f64, years: f64, frequency: u32) -> f64 {
    let frequency = frequency.max(1) as f64;
    principal * (1.0 + annual_rate / frequency).powf(frequency * years)
}
