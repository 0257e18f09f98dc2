use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RiskScoreError {
    #[error("Risk score error: {0}")]
    InvalidFormat(String),
    #[error("Risk score error: {0} is outside of [0, 100]")]
    OutOfRange(Decimal)
}
