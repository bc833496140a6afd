use super::{DispatchResult, MathRequest, MathResponse, MathService, format_number};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const MAX_FACTORIAL: u64 = 20;
const MAX_EXPONENT: f64 = 100.0;

static SQUARE_ROOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:(?:квадратный\s+)?корень\s+(?:из\s+)?|sqrt\s*\(?\s*)(\d+\.?\d*)")
        .expect("valid root pattern")
});
static FACTORIAL_BANG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*!").expect("valid factorial pattern"));
static FACTORIAL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"факториал\w*\s+(\d+)").expect("valid factorial pattern"));
static PERCENT_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.?\d*)\s*(?:%|процент\w*)\s*(?:от|из)?\s*(\d+\.?\d*)")
        .expect("valid percent pattern")
});
static POWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+\.?\d*)\s*в\s+степени\s*(\d+\.?\d*)").expect("valid power pattern")
});
static WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[а-яА-ЯёЁ\s]+").expect("valid word pattern"));
static NON_ARITHMETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9+\-*/().^]").expect("valid arithmetic pattern"));

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SolveError {
    #[error("Деление на ноль")]
    DivisionByZero,

    #[error("Факториал слишком большого числа (max 20)")]
    FactorialTooLarge,

    #[error("Степень слишком большая (max 100)")]
    ExponentTooLarge,

    #[error("Результат слишком большой")]
    Overflow,

    #[error("Не удалось распознать математическое выражение")]
    Unrecognized,

    #[error("Не удалось вычислить выражение: {0}")]
    Unevaluable(String),
}

/// A solved expression, shaped like the math endpoint's success body.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub result: Value,
    pub explanation: String,
    pub steps: Vec<String>,
}

/// In-process stand-in for the math endpoint.
///
/// Handles square roots, factorials, percentages, powers and plain
/// arithmetic. Failures come back as a `{error}` body, never as a transport
/// error.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalMathService;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MathService for LocalMathService {
    async fn evaluate(&self, request: &MathRequest) -> DispatchResult<MathResponse> {
        if request.expression.is_empty() {
            return Ok(MathResponse::failure("Expression parameter is required"));
        }

        Ok(match solve(&request.expression) {
            Ok(solution) => MathResponse {
                result: Some(solution.result),
                explanation: Some(solution.explanation),
                steps: solution.steps,
                error: None,
            },
            Err(err) => {
                tracing::debug!(expression = %request.expression, %err, "local solve failed");
                MathResponse::failure(format!("Ошибка вычисления: {err}"))
            }
        })
    }
}

pub fn solve(expression: &str) -> Result<Solution, SolveError> {
    let normalized = expression.to_lowercase().trim().replace('×', "*").replace('÷', "/");

    if (normalized.contains("корень") || normalized.contains("sqrt"))
        && let Some(value) = capture_number(&SQUARE_ROOT, &normalized, 1)
    {
        let result = finite(value.sqrt())?;
        let (value, shown) = (format_number(value), format_number(result));
        return Ok(Solution {
            result: number(result),
            explanation: format!("Квадратный корень из {value}"),
            steps: vec![format!("√{value} = {shown}")],
        });
    }

    if normalized.contains("факториал") || normalized.contains('!') {
        let operand = FACTORIAL_BANG
            .captures(&normalized)
            .or_else(|| FACTORIAL_WORD.captures(&normalized))
            .and_then(|caps| caps[1].parse::<u64>().ok());
        if let Some(n) = operand {
            if n > MAX_FACTORIAL {
                return Err(SolveError::FactorialTooLarge);
            }
            let result: u64 = (1..=n).product();
            return Ok(Solution {
                result: Value::from(result),
                explanation: format!("Факториал числа {n}"),
                steps: vec![format!("{n}! = {result}")],
            });
        }
    }

    if (normalized.contains("процент") || normalized.contains('%'))
        && let Some(caps) = PERCENT_OF.captures(&normalized)
        && let (Ok(percent), Ok(base)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>())
    {
        let result = finite(percent * base / 100.0)?;
        let (percent, base, shown) = (
            format_number(percent),
            format_number(base),
            format_number(result),
        );
        return Ok(Solution {
            result: number(result),
            explanation: format!("{percent}% от {base}"),
            steps: vec![format!(
                "{percent}% от {base} = ({percent}/100) × {base} = {shown}"
            )],
        });
    }

    if normalized.contains("степен")
        && let Some(caps) = POWER.captures(&normalized)
        && let (Ok(base), Ok(exponent)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>())
    {
        if exponent > MAX_EXPONENT {
            return Err(SolveError::ExponentTooLarge);
        }
        let result = finite(base.powf(exponent))?;
        let (base, exponent, shown) = (
            format_number(base),
            format_number(exponent),
            format_number(result),
        );
        return Ok(Solution {
            result: number(result),
            explanation: format!("{base} в степени {exponent}"),
            steps: vec![format!("{base}^{exponent} = {shown}")],
        });
    }

    let arithmetic = normalized.replace(['х', 'x'], "*");
    let without_words = WORDS.replace_all(&arithmetic, "");
    let clean = NON_ARITHMETIC.replace_all(&without_words, "").into_owned();
    if clean.is_empty() {
        return Err(SolveError::Unrecognized);
    }

    let result = evaluate_arithmetic(&clean)
        .map_err(|_| SolveError::Unevaluable(expression.to_string()))?;
    if result.is_infinite() {
        return Err(if divides_by_zero(&clean) {
            SolveError::DivisionByZero
        } else {
            SolveError::Overflow
        });
    }
    if result.is_nan() {
        return Err(SolveError::Unevaluable(expression.to_string()));
    }

    Ok(Solution {
        result: number(result),
        explanation: format!("Результат вычисления: {clean}"),
        steps: vec![format!("{clean} = {}", format_number(result))],
    })
}

fn evaluate_arithmetic(expression: &str) -> Result<f64, fasteval::Error> {
    fasteval::ez_eval(expression, &mut fasteval::EmptyNamespace)
}

fn finite(value: f64) -> Result<f64, SolveError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolveError::Overflow)
    }
}

/// True when some `/` in the cleaned expression has a divisor that evaluates
/// to zero.
fn divides_by_zero(expression: &str) -> bool {
    expression.match_indices('/').any(|(idx, _)| {
        divisor_after(&expression[idx + 1..])
            .and_then(|divisor| evaluate_arithmetic(divisor).ok())
            == Some(0.0)
    })
}

/// The operand right after a `/`: an optionally signed number or a
/// parenthesized group. Input is ASCII only.
fn divisor_after(rest: &str) -> Option<&str> {
    let unsigned = rest.trim_start_matches(['+', '-']);
    let sign_len = rest.len() - unsigned.len();

    let end = if unsigned.starts_with('(') {
        let mut depth = 0usize;
        let mut close = None;
        for (idx, c) in unsigned.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        close = Some(idx + 1);
                        break;
                    }
                }
                _ => {}
            }
        }
        close?
    } else {
        unsigned
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(unsigned.len())
    };

    (end > 0).then(|| &rest[..sign_len + end])
}

fn capture_number(pattern: &Regex, text: &str, group: usize) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(group))
        .and_then(|m| m.as_str().parse().ok())
}

fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
