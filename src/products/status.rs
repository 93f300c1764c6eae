use crate::configuration::{EXPIRED_THRESHOLD_DAYS, EXPIRES_SOON_THRESHOLD_DAYS};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;


const SECONDS_PER_DAY: i64 = 86_400;


#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Health of a single host certificate
pub enum Status {
    /// More than two weeks of validity left
    #[serde(rename = "OK")]
    Ok,

    /// Between zero and fourteen days left
    #[serde(rename = "EXPIRES SOON")]
    ExpiresSoon,

    /// Already past not-after
    #[serde(rename = "EXPIRED")]
    Expired,

    /// Certificate couldn't be fetched at all
    #[serde(rename = "ERROR")]
    Error,
}


impl Status {
    /// All statuses in report order
    pub const ALL: [Status; 4] = [
        Status::Ok,
        Status::ExpiresSoon,
        Status::Expired,
        Status::Error,
    ];


    /// Status label as used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::ExpiresSoon => "EXPIRES SOON",
            Status::Expired => "EXPIRED",
            Status::Error => "ERROR",
        }
    }


    /// Whether the contact should get an alert
    pub fn is_alerting(&self) -> bool {
        matches!(self, Status::ExpiresSoon | Status::Expired)
    }
}


impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


/// Whole days between now and not-after, floored (negative once expired)
pub fn days_left(now: DateTime<Utc>, not_after: DateTime<Utc>) -> i64 {
    let delta = not_after - now;
    let mut seconds = delta.num_seconds();
    // num_seconds truncates toward zero, floor the sub-second remainder too
    if delta < Duration::seconds(seconds) {
        seconds -= 1;
    }
    seconds.div_euclid(SECONDS_PER_DAY)
}


/// Classify certificate validity. Never yields [`Status::Error`]
pub fn classify(now: DateTime<Utc>, not_after: DateTime<Utc>) -> (Status, i64) {
    let days = days_left(now, not_after);
    let status = if days < EXPIRED_THRESHOLD_DAYS {
        Status::Expired
    } else if days <= EXPIRES_SOON_THRESHOLD_DAYS {
        Status::ExpiresSoon
    } else {
        Status::Ok
    };
    (status, days)
}
