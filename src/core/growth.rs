/// Compounds `amount` annually for `years` at `rate`.
///
/// A zero amount stays zero regardless of the rate; zero years and a zero
/// rate are both identities.
pub fn inflate(amount: f64, years: u32, rate: f64) -> f64 {
    if amount == 0.0 || years == 0 {
        return amount;
    }
    amount * growth_factor(rate, years)
}

/// Grows a single deposit monthly at `annual_rate / 12` for `months`.
pub fn future_value_monthly(amount: f64, months: u32, annual_rate: f64) -> f64 {
    amount * growth_factor(annual_rate / 12.0, months)
}

/// Discounts `amount` back `months` at `annual_inflation / 12` per month.
pub fn discount_monthly(amount: f64, months: u32, annual_inflation: f64) -> f64 {
    let factor = growth_factor(annual_inflation / 12.0, months);
    if factor <= 0.0 || !factor.is_finite() {
        return 0.0;
    }
    amount / factor
}

fn growth_factor(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(periods.min(i32::MAX as u32) as i32)
}
