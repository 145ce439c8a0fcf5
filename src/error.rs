use thiserror::Error;

/// Errors surfaced by the logging/leaderboard core.
///
/// `Validation` is recovered locally and shown to the user as a usage hint.
/// `Storage` propagates to the handler layer, which logs it.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("invalid amount: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Parse a `/log` argument as liters. Rejects anything that is not a
/// finite positive number.
pub fn parse_amount(raw: &str) -> Result<f64, BotError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BotError::Validation("missing amount".into()));
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        Ok(v) => Err(BotError::Validation(format!("not a positive amount: {v}"))),
        Err(_) => Err(BotError::Validation(format!("not a number: {trimmed}"))),
    }
}
