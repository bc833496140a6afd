//! Routing of user input to the math or search endpoint.

use once_cell::sync::Lazy;
use regex::Regex;

/// Which backend a user turn is sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Math,
    Search,
}

static BINARY_OPERATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\s*[+\-*/×÷]\s*\d+").expect("valid operation pattern"));

static CALCULATION_STEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)сколько|вычисл|реш|посчита").expect("valid calculation pattern")
});

static PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d+\s*процент").expect("valid percent pattern"));

static MATH_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)корень|факториал|степен").expect("valid function pattern")
});

static PURE_EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d\s+\-*/×÷().,%^=]+$").expect("valid expression pattern")
});

/// Picks the route for `text`. Any single pattern hit means math.
pub fn classify(text: &str) -> Route {
    let trimmed = text.trim();
    let is_math = BINARY_OPERATION.is_match(text)
        || CALCULATION_STEM.is_match(text)
        || PERCENT.is_match(text)
        || MATH_FUNCTION.is_match(text)
        || (!trimmed.is_empty() && PURE_EXPRESSION.is_match(trimmed));

    if is_math { Route::Math } else { Route::Search }
}
