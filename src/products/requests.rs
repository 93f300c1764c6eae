use crate::products::status::Status;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;


#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Alert to send for an expiring or expired certificate
pub struct NotificationRequest {
    /// Host the alert is about
    pub hostname: String,

    /// Recipient
    pub contact: String,

    /// Not-after, OpenSSL style
    pub not_after_display: String,

    /// Signed days left
    pub days_left: i64,

    /// EXPIRES SOON or EXPIRED
    pub status: Status,
}


#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Calendar reminder to renew a certificate
pub struct ReminderRequest {
    /// Host the reminder is about
    pub hostname: String,

    /// Port of the host entry
    pub port: u16,

    /// Recipient
    pub contact: String,

    /// When the calendar event starts (not-after minus the reminder window)
    pub remind_at: DateTime<Utc>,

    /// Certificate not-after
    pub not_after: DateTime<Utc>,
}


#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// New dedup marker to persist for a host
pub struct ExpiryUpdate {
    /// Host to update
    pub hostname: String,

    /// Port of the host entry, so entries sharing a hostname keep separate markers
    pub port: u16,

    /// New `ending_date`
    pub new_last_recorded_expiry: NaiveDate,
}
