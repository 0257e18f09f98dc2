use crate::types::errors::RiskScoreError;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MIN_SCORE: Decimal = Decimal::ZERO;
const MAX_SCORE: Decimal = Decimal::ONE_HUNDRED;

/// A risk score assigned upstream, constrained to the closed range `[0, 100]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(into = "Decimal")]
pub struct RiskScore(Decimal);

impl RiskScore {
    pub fn new(value: Decimal) -> Result<Self, RiskScoreError> {
        if value < MIN_SCORE || value > MAX_SCORE {
            return Err(RiskScoreError::OutOfRange(value));
        }

        Ok(RiskScore(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for RiskScore {
    type Error = RiskScoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        RiskScore::new(value)
    }
}

impl From<RiskScore> for Decimal {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = RiskScoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RiskScore::new(Decimal::from(value))
    }
}

impl Display for RiskScore {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for RiskScore {
    type Err = RiskScoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(RiskScoreError::InvalidFormat("Value is an empty string".to_string()));
        }

        let decimal = Decimal::from_str(value).map_err(|error| {
            RiskScoreError::InvalidFormat(format!("Value is not a decimal: {error}"))
        })?;

        RiskScore::new(decimal)
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        RiskScore::from_str(&value).map_err(de::Error::custom)
    }
}
