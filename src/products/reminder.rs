use crate::{
    configuration::MARKER_DATE_FORMAT,
    products::{status::days_left, unexpected::Unexpected},
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::warn;


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Decision of the reminder dedup engine
pub enum ReminderDecision {
    /// Send the reminder now and persist the given marker (the certificate not-after date)
    Fire(NaiveDate),

    /// Nothing to send
    Hold,
}


impl ReminderDecision {
    /// Should the reminder go out now?
    pub fn send_now(&self) -> bool {
        matches!(self, ReminderDecision::Fire(_))
    }


    /// Marker to persist, only when firing
    pub fn new_last_recorded_expiry(&self) -> Option<NaiveDate> {
        match self {
            ReminderDecision::Fire(marker) => Some(*marker),
            ReminderDecision::Hold => None,
        }
    }
}


/// Decide whether a renewal reminder is due.
///
/// Preconditions (checked by the caller, not here): reminders are enabled for
/// the run and the host has a contact address.
///
/// The reminder is eligible only within `reminder_window_days` of not-after.
/// It fires when no marker was recorded yet, or once `now` is strictly past the
/// recorded marker taken as midnight UTC. The new marker is the not-after date,
/// so an unchanged certificate never fires twice before its marker elapses.
pub fn decide_reminder(
    now: DateTime<Utc>,
    not_after: DateTime<Utc>,
    last_recorded_expiry: Option<NaiveDate>,
    reminder_window_days: i64,
) -> ReminderDecision {
    if days_left(now, not_after) > reminder_window_days {
        return ReminderDecision::Hold;
    }
    match last_recorded_expiry {
        Some(marker) if marker_instant(marker).map_or(false, |midnight| now <= midnight) => {
            ReminderDecision::Hold
        }
        _ => ReminderDecision::Fire(not_after.date_naive()),
    }
}


/// Midnight UTC of the marker date
pub fn marker_instant(marker: NaiveDate) -> Option<DateTime<Utc>> {
    marker
        .and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}


/// Parse a persisted marker. Malformed values are reported and treated as absent
pub fn parse_marker(raw: Option<&str>, hostname: &str) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
    NaiveDate::parse_from_str(raw, MARKER_DATE_FORMAT)
        .map_err(|_| Unexpected::MalformedPersistedState(raw.to_string(), hostname.to_string()))
        .map_err(|err| warn!("{}", err))
        .ok()
}


/// Render a marker the way it's persisted
pub fn format_marker(marker: NaiveDate) -> String {
    marker.format(MARKER_DATE_FORMAT).to_string()
}
