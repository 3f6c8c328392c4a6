use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Exact decimal quotient as `f64`; a non-positive denominator yields `+inf`.
///
/// Infinity is the maximal-risk signal and compares above every finite band edge.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator <= Decimal::ZERO {
        return f64::INFINITY;
    }

    numerator
        .checked_div(denominator)
        .and_then(|quotient| quotient.to_f64())
        .unwrap_or(f64::INFINITY)
}
