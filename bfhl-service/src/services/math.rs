//! Numeric kernels: fibonacci, prime filter, HCF, LCM.
//!
//! Inputs arrive as raw JSON values because the payloads are heterogeneous:
//! the prime filter silently drops non-integers, while HCF and LCM reject
//! them. Argument violations are typed `BadRequest` so the handler
//! maps them to 400 without inspecting message text.

use serde_json::Value;

use crate::error::AppError;

/// Longest prefix whose terms all fit in a `u64`.
/// fib(93) = 12_200_160_415_121_876_738 is the last in-range term.
const MAX_FIBONACCI_TERMS: u64 = 94;

fn bad(msg: impl Into<String>) -> AppError {
    AppError::BadRequest(msg.into())
}

/// First `n` fibonacci terms, starting `0, 1, 1, 2, …`.
pub fn fibonacci(n: f64) -> Result<Vec<u64>, AppError> {
    if n < 0.0 {
        return Err(bad("Fibonacci index must be non-negative"));
    }
    if n.fract() != 0.0 || !n.is_finite() {
        return Err(bad("Fibonacci index must be an integer"));
    }

    let n = n as u64;
    if n > MAX_FIBONACCI_TERMS {
        return Err(bad(format!(
            "Fibonacci index must be {MAX_FIBONACCI_TERMS} or less"
        )));
    }

    let mut result = Vec::with_capacity(n as usize);
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        result.push(a);
        // the final iteration wraps in `b`, which is never pushed
        (a, b) = (b, a.wrapping_add(b));
    }
    Ok(result)
}

/// Retain elements that are prime integers, sorted ascending.
///
/// Non-integer and non-numeric entries are dropped, not rejected; only the
/// array-level shape check (done by the dispatcher) can fail a `prime` request.
pub fn filter_primes(values: &[Value]) -> Vec<i64> {
    let mut primes: Vec<i64> = values
        .iter()
        .filter_map(to_integer)
        .filter(|&n| is_prime(n))
        .collect();
    primes.sort_unstable();
    primes
}

fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3i64;
    // `i <= n / i` avoids overflowing `i * i` near i64::MAX
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Euclidean GCD over absolute values; `gcd(a, 0) = |a|`.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Left fold of GCD over the sequence.
pub fn hcf(values: &[Value]) -> Result<i64, AppError> {
    let ints = integer_values(values, "HCF")?;

    // A single-element fold returns the element unchanged, sign included.
    let Some((first, rest)) = ints.split_first() else {
        return Err(bad("HCF input must be a non-empty array"));
    };
    if rest.is_empty() {
        return Ok(*first);
    }

    let mut acc = first.unsigned_abs() as u128;
    for &v in rest {
        acc = gcd(acc, v.unsigned_abs() as u128);
    }
    i64::try_from(acc).map_err(|_| bad("HCF values must be within the 64-bit integer range"))
}

/// Left fold of `lcm(a, b) = |a·b| / gcd(a, b)`, computed exactly in `u128`.
pub fn lcm(values: &[Value]) -> Result<i64, AppError> {
    let ints = integer_values(values, "LCM")?;

    let Some((first, rest)) = ints.split_first() else {
        return Err(bad("LCM input must be a non-empty array"));
    };
    if rest.is_empty() {
        return Ok(*first);
    }

    let mut acc = first.unsigned_abs() as u128;
    for &v in rest {
        let b = v.unsigned_abs() as u128;
        let g = gcd(acc, b);
        if g == 0 {
            // lcm(0, 0); keep the fold going instead of dividing by zero
            acc = 0;
            continue;
        }
        acc = (acc / g)
            .checked_mul(b)
            .ok_or_else(|| bad("LCM result must fit in a 64-bit integer"))?;
    }
    i64::try_from(acc).map_err(|_| bad("LCM result must fit in a 64-bit integer"))
}

/// Shared HCF/LCM argument validation: non-empty, all integers.
fn integer_values(values: &[Value], op: &str) -> Result<Vec<i64>, AppError> {
    if values.is_empty() {
        return Err(bad(format!("{op} input must be a non-empty array")));
    }
    values
        .iter()
        .map(|v| to_integer(v).ok_or_else(|| bad(format!("All {op} values must be integers"))))
        .collect()
}

/// A JSON value counts as an integer when it is a number with no fractional
/// part, the way `Number.isInteger` treats `3.0` as an integer.
fn to_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|x| x.fract() == 0.0 && *x >= i64::MIN as f64 && *x <= i64::MAX as f64)
        .map(|x| x as i64)
}
