//! Display helpers for rupee amounts and ratios. Every helper maps NaN and
//! infinities to a zero-valued string instead of printing them.

const LAKH: f64 = 100_000.0;

/// Whole rupees with Indian digit grouping.
/// e.g. `1234567.4` → `"₹12,34,567"`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }
    let rounded = amount.round();
    let grouped = group_indian(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// A fractional ratio as a percentage with one decimal, e.g. `0.2` → `"20.0%"`.
pub fn format_percentage(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "0%".to_string();
    }
    format!("{:.1}%", ratio * 100.0)
}

pub fn format_lakhs(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0 L".to_string();
    }
    format!("₹{:.2} L", amount / LAKH)
}

pub fn format_crores(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0 Cr".to_string();
    }
    format!("₹{:.2} Cr", amount / crate::core::CRORE)
}

/// Groups an unsigned digit string as `xx,xx,xxx`: the last three digits,
/// then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs: Vec<&str> = head
        .as_bytes()
        .rchunks(2)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect();
    pairs.push(tail);
    pairs.join(",")
}
