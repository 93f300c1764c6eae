use crate::{
    configuration::NOT_AFTER_DISPLAY_FORMAT,
    products::{status::Status, unexpected::Unexpected},
};
use chrono::{DateTime, Utc};
use serde::Serialize;


/// Alias Type for Vec<EvaluationResult>
pub type EvaluationResults = Vec<EvaluationResult>;


#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Outcome of a single host check: either classified validity or an error
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Certificate fetched and classified
    Checked {
        /// Classification, never ERROR
        status: Status,

        /// Signed whole days left
        days_left: i64,

        /// Leaf certificate not-after
        not_after: DateTime<Utc>,
    },

    /// Certificate couldn't be evaluated
    Failed {
        /// Error description
        error: String,
    },
}


#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// EvaluationResult holds the per-host product of a run
pub struct EvaluationResult {
    /// Checked host
    pub hostname: String,

    /// Checked port
    pub port: u16,

    /// What happened
    #[serde(flatten)]
    pub outcome: Outcome,
}


impl EvaluationResult {
    /// New classified result
    pub fn checked(
        hostname: &str,
        port: u16,
        status: Status,
        days_left: i64,
        not_after: DateTime<Utc>,
    ) -> EvaluationResult {
        EvaluationResult {
            hostname: hostname.to_string(),
            port,
            outcome: Outcome::Checked {
                status,
                days_left,
                not_after,
            },
        }
    }


    /// New error result
    pub fn error(hostname: &str, port: u16, error: &Unexpected) -> EvaluationResult {
        EvaluationResult {
            hostname: hostname.to_string(),
            port,
            outcome: Outcome::Failed {
                error: error.to_string(),
            },
        }
    }


    /// Status of the result, ERROR for failures
    pub fn status(&self) -> Status {
        match self.outcome {
            Outcome::Checked { status, .. } => status,
            Outcome::Failed { .. } => Status::Error,
        }
    }


    /// Days left, only for checked results
    pub fn days_left(&self) -> Option<i64> {
        match self.outcome {
            Outcome::Checked { days_left, .. } => Some(days_left),
            Outcome::Failed { .. } => None,
        }
    }


    /// Not-after, only for checked results
    pub fn not_after(&self) -> Option<DateTime<Utc>> {
        match self.outcome {
            Outcome::Checked { not_after, .. } => Some(not_after),
            Outcome::Failed { .. } => None,
        }
    }


    /// Error description, only for failures
    pub fn error_description(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Checked { .. } => None,
            Outcome::Failed { error } => Some(error),
        }
    }
}


/// Not-after rendered the way OpenSSL prints it
pub fn display_not_after(not_after: DateTime<Utc>) -> String {
    not_after.format(NOT_AFTER_DISPLAY_FORMAT).to_string()
}
