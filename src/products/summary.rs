use crate::products::{evaluation::EvaluationResult, status::Status};
use serde::Serialize;
use std::fmt;


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Process exit signal of a run
pub enum ExitSignal {
    /// Everything fine
    Ok,

    /// Something expires soon
    Warn,

    /// Something expired, failed to check, or a side effect failed
    Fail,
}


impl ExitSignal {
    /// Exit code consumed by automation
    pub fn code(&self) -> i32 {
        match self {
            ExitSignal::Ok => 0,
            ExitSignal::Warn => 2,
            ExitSignal::Fail => 1,
        }
    }
}


impl fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitSignal::Ok => f.write_str("OK"),
            ExitSignal::Warn => f.write_str("WARN"),
            ExitSignal::Fail => f.write_str("FAIL"),
        }
    }
}


#[derive(Debug, Copy, Clone, Default, Serialize, PartialEq, Eq)]
/// Tally of a single run
pub struct RunSummary {
    /// Hosts with status OK
    #[serde(rename = "OK")]
    pub ok: usize,

    /// Hosts with status EXPIRES SOON
    #[serde(rename = "EXPIRES SOON")]
    pub expires_soon: usize,

    /// Hosts with status EXPIRED
    #[serde(rename = "EXPIRED")]
    pub expired: usize,

    /// Hosts with status ERROR
    #[serde(rename = "ERROR")]
    pub error: usize,

    /// Failed side effects (alert/reminder delivery, persistence), reported only when any
    #[serde(rename = "FAILED", skip_serializing_if = "is_zero")]
    pub failed_side_effects: usize,
}


impl RunSummary {
    /// Fold evaluation results of enabled hosts
    pub fn fold<'a, I>(results: I) -> RunSummary
    where
        I: IntoIterator<Item = &'a EvaluationResult>,
    {
        results
            .into_iter()
            .fold(RunSummary::default(), |summary, result| {
                summary.with(result.status())
            })
    }


    /// Summary with one more host in given status
    pub fn with(mut self, status: Status) -> RunSummary {
        match status {
            Status::Ok => self.ok += 1,
            Status::ExpiresSoon => self.expires_soon += 1,
            Status::Expired => self.expired += 1,
            Status::Error => self.error += 1,
        }
        self
    }


    /// Record failed side effects
    pub fn record_failures(&mut self, count: usize) {
        self.failed_side_effects += count;
    }


    /// Count for given status
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Ok => self.ok,
            Status::ExpiresSoon => self.expires_soon,
            Status::Expired => self.expired,
            Status::Error => self.error,
        }
    }


    /// Number of tallied hosts
    pub fn total(&self) -> usize {
        Status::ALL.iter().map(|status| self.count(*status)).sum()
    }


    /// Exit signal, highest severity wins
    pub fn exit_signal(&self) -> ExitSignal {
        if self.error > 0 || self.expired > 0 || self.failed_side_effects > 0 {
            ExitSignal::Fail
        } else if self.expires_soon > 0 {
            ExitSignal::Warn
        } else {
            ExitSignal::Ok
        }
    }
}


fn is_zero(count: &usize) -> bool {
    *count == 0
}
