//! CPF (Cadastro de Pessoas Físicas) identifiers
//!
//! A CPF is 11 decimal digits: a 9-digit base followed by two check digits,
//! each a weighted sum modulo 11. It has a digits-only *normalized* form
//! (`52998224725`) and a *formatted* form (`529.982.247-25`).

use std::fmt;

use crate::shared::{DomainError, DomainResult};

/// Number of digits in a CPF
pub const CPF_LENGTH: usize = 11;

const BASE_LENGTH: usize = 9;

/// Strip every non-digit character.
///
/// Fails with [`DomainError::InvalidFormat`] when the input is empty or
/// whitespace only. Input without any digit normalizes to an empty string.
pub fn normalize(raw: &str) -> DomainResult<String> {
    if raw.trim().is_empty() {
        return Err(DomainError::InvalidFormat("CPF must not be empty".into()));
    }
    Ok(raw.chars().filter(char::is_ascii_digit).collect())
}

/// Check a CPF in any punctuation. Never fails; malformed input is just invalid.
pub fn is_valid(raw: &str) -> bool {
    let Ok(digits) = normalize(raw) else {
        return false;
    };
    let digits: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();
    if digits.len() != CPF_LENGTH {
        return false;
    }
    // Repeated-digit sequences pass the checksum but are never issued
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let first = check_digit(&digits[..BASE_LENGTH]);
    let second = check_digit(&digits[..BASE_LENGTH + 1]);
    first == digits[9] && second == digits[10]
}

/// Render 11 normalized digits as `ddd.ddd.ddd-dd`.
pub fn format(normalized: &str) -> DomainResult<String> {
    if normalized.len() != CPF_LENGTH || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidFormat(format!(
            "expected {} digits, got {:?}",
            CPF_LENGTH, normalized
        )));
    }
    Ok(format!(
        "{}.{}.{}-{}",
        &normalized[0..3],
        &normalized[3..6],
        &normalized[6..9],
        &normalized[9..11]
    ))
}

/// Weights run from `len + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(d, w)| d * w)
        .sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// A CPF that passed checksum validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf {
    digits: String,
    formatted: String,
}

impl Cpf {
    /// Normalize and validate.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits = normalize(raw)?;
        if !is_valid(&digits) {
            return Err(DomainError::InvalidIdentifier(raw.trim().to_string()));
        }
        let formatted = format(&digits)?;
        Ok(Self { digits, formatted })
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}
