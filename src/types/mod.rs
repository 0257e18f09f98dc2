mod errors;
mod risk_score;

pub use errors::RiskScoreError;
pub use risk_score::RiskScore;

pub type TransactionId = String;
pub type AccountName = String;
