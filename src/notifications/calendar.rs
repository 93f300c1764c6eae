use crate::{
    configuration::{ICS_DATETIME_FORMAT, REMINDER_EVENT_MINUTES},
    products::requests::ReminderRequest,
};
use chrono::{DateTime, Duration, Utc};


fn ics_datetime(instant: DateTime<Utc>) -> String {
    instant.format(ICS_DATETIME_FORMAT).to_string()
}


/// Build an iCalendar REQUEST with a single renewal event starting at `remind_at`
pub fn build_ics(request: &ReminderRequest, organizer: &str, stamp: DateTime<Utc>) -> String {
    let start = request.remind_at;
    let end = start + Duration::minutes(REMINDER_EVENT_MINUTES);
    let uid = format!(
        "{}-{}@certmole",
        request.hostname,
        ics_datetime(request.not_after)
    );
    let description = format!(
        "Certificate for {} expires on {}.",
        request.hostname,
        request.not_after.format("%Y-%m-%d %H:%M:%S UTC")
    );

    [
        String::from("BEGIN:VCALENDAR"),
        String::from("PRODID:-//certmole//EN"),
        String::from("VERSION:2.0"),
        String::from("METHOD:REQUEST"),
        String::from("BEGIN:VEVENT"),
        format!("UID:{}", uid),
        format!("DTSTAMP:{}", ics_datetime(stamp)),
        format!("DTSTART:{}", ics_datetime(start)),
        format!("DTEND:{}", ics_datetime(end)),
        format!("SUMMARY:Renew TLS certificate: {}", request.hostname),
        format!("DESCRIPTION:{}", description),
        format!("ORGANIZER:MAILTO:{}", organizer),
        format!("ATTENDEE;CN={0}:MAILTO:{0}", request.contact),
        String::from("SEQUENCE:0"),
        String::from("STATUS:CONFIRMED"),
        String::from("TRANSP:OPAQUE"),
        String::from("END:VEVENT"),
        String::from("END:VCALENDAR"),
    ]
    .iter()
    .map(|line| format!("{}\r\n", line))
    .collect()
}
