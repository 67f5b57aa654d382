//! Factorization Module
//!
//! The expensive pure computation served by the factor service, plus parsing
//! of request input.

use thiserror::Error;

// == Factor Error ==
/// Errors raised while reading or factoring a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactorError {
    /// Zero has no prime factorization
    #[error("0 has no prime factorization")]
    Zero,

    /// Input is not a decimal number in range
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
}

// == Factorize ==
/// Returns the prime factors of `n` in ascending order, with multiplicity.
///
/// `factorize(1)` is the empty product. Uses trial division, so the cost
/// grows with the square root of the largest prime factor.
pub fn factorize(n: u64) -> Result<Vec<u64>, FactorError> {
    if n == 0 {
        return Err(FactorError::Zero);
    }

    let mut factors = Vec::new();
    let mut rest = n;

    while rest % 2 == 0 {
        factors.push(2);
        rest /= 2;
    }

    let mut divisor = 3u64;
    // `divisor <= rest / divisor` avoids overflowing `divisor * divisor`
    while divisor <= rest / divisor {
        while rest % divisor == 0 {
            factors.push(divisor);
            rest /= divisor;
        }
        divisor += 2;
    }

    if rest > 1 {
        factors.push(rest);
    }

    Ok(factors)
}

// == Parse Number ==
/// Reads a number from request text.
pub fn parse_number(raw: &str) -> Result<u64, FactorError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FactorError::InvalidNumber(raw.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| FactorError::InvalidNumber(raw.to_string()))
}
