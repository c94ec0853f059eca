//! Summary statistics over the rate field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::UserRecord;

/// Failure raised when statistics are requested for zero records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatisticsError {
    /// No records were supplied; min, max, and mean are all undefined.
    #[error("cannot compute statistics over an empty collection")]
    EmptyInput,
}

/// Rate extrema and arithmetic mean for a collection of users.
///
/// Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateStatistics {
    /// Smallest rate in the collection.
    #[schema(example = 10)]
    pub min_rate: i32,
    /// Largest rate in the collection.
    #[schema(example = 60)]
    pub max_rate: i32,
    /// Arithmetic mean of all rates, without integer truncation.
    #[schema(example = 35.828)]
    pub average_rate: f64,
}

impl RateStatistics {
    /// Compute statistics over `records`.
    ///
    /// Pure function of the input; fails on an empty slice.
    pub fn compute(records: &[UserRecord]) -> Result<Self, StatisticsError> {
        let mut rates = records.iter().map(|record| record.rate);
        let first = rates.next().ok_or(StatisticsError::EmptyInput)?;

        let (mut min_rate, mut max_rate, mut sum) = (first, first, f64::from(first));
        for rate in rates {
            min_rate = min_rate.min(rate);
            max_rate = max_rate.max(rate);
            sum += f64::from(rate);
        }

        Ok(Self {
            min_rate,
            max_rate,
            average_rate: sum / records.len() as f64,
        })
    }
}
