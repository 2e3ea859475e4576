//! Input validation applied before any request is built.

use crate::error::StockTraderError;

pub const MAX_SYMBOL_LENGTH: usize = 12;
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Strip ASCII control characters, trim whitespace, and enforce a
/// byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, StockTraderError> {
    if input.len() > max_len {
        return Err(StockTraderError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(StockTraderError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a stock symbol: 1-12 chars, ASCII alphanumeric plus `.` and `-`.
/// Returns the uppercased form the ledger keys stocks by.
pub fn validate_symbol(input: &str) -> Result<String, StockTraderError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_SYMBOL_LENGTH {
        return Err(StockTraderError::InvalidInput(format!(
            "symbol must be 1-{} characters",
            MAX_SYMBOL_LENGTH
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(StockTraderError::InvalidInput(format!(
            "symbol '{}' contains characters outside A-Z, 0-9, '.', '-'",
            trimmed
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Validate a username: control-stripped, trimmed, 1-64 bytes.
pub fn validate_username(input: &str) -> Result<String, StockTraderError> {
    sanitize_text(input, MAX_USERNAME_LENGTH)
}

/// Validate a share count: must be a positive whole number.
pub fn validate_amount(amount: i64) -> Result<i64, StockTraderError> {
    if amount <= 0 {
        return Err(StockTraderError::InvalidInput(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Validate a payment: must be a positive, finite number.
pub fn validate_payment(payment: f64) -> Result<f64, StockTraderError> {
    if !payment.is_finite() || payment <= 0.0 {
        return Err(StockTraderError::InvalidInput(format!(
            "payment must be a positive number, got {}",
            payment
        )));
    }
    Ok(payment)
}
