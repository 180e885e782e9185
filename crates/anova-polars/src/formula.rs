//! Formula strings for the report operations
//!
//! Inputs are expected to be sanitized identifiers.

/// `response ~ C(group)`
pub fn one_way_formula(response: &str, group: &str) -> String {
    format!("{response} ~ C({group})")
}

/// `response ~ C(f1) + C(f2) + C(f1):C(f2)`
pub fn two_way_formula(response: &str, factor1: &str, factor2: &str) -> String {
    format!("{response} ~ C({factor1}) + C({factor2}) + C({factor1}):C({factor2})")
}
