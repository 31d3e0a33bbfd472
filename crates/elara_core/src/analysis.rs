//! The persisted analysis document.

use crate::NormalizedResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized result stamped with its generation time.
///
/// The timestamp is always supplied by the caller at the moment the
/// analysis is produced; a model-supplied `generated_at` never reaches this
/// record. Serialized flat: `generated_at` alongside the result fields.
///
/// # Examples
///
/// ```
/// use elara_core::{AnalysisRecord, NormalizedResult};
///
/// let record = AnalysisRecord::stamp(NormalizedResult::fallback("offline"));
/// let json = serde_json::to_value(&record).unwrap();
/// assert!(json["generated_at"].is_string());
/// assert_eq!(json["suggestions"], serde_json::json!([]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// When the analysis was generated
    pub generated_at: DateTime<Utc>,
    /// Normalized analysis fields
    #[serde(flatten)]
    pub result: NormalizedResult,
}

impl AnalysisRecord {
    /// Stamp a result with the current time.
    pub fn stamp(result: NormalizedResult) -> Self {
        Self::at(result, Utc::now())
    }

    /// Stamp a result with an explicit time.
    pub fn at(result: NormalizedResult, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            result,
        }
    }
}
