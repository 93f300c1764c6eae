use crate::{
    notifications::calendar::build_ics,
    products::{
        requests::{NotificationRequest, ReminderRequest},
        status::Status,
        unexpected::Unexpected,
    },
};
use chrono::{DateTime, Utc};
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    Message,
};


fn mailbox(address: &str, hostname: &str) -> Result<Mailbox, Unexpected> {
    address
        .parse::<Mailbox>()
        .map_err(|err| Unexpected::Message(hostname.to_string(), format!("{}: {}", address, err)))
}


/// Subject line of an alert
pub fn alert_subject(request: &NotificationRequest) -> String {
    match request.status {
        Status::Expired => format!("[ALERT] TLS certificate expired for {}", request.hostname),
        _ => {
            format!(
                "[ALERT] TLS certificate expiring soon for {}",
                request.hostname
            )
        }
    }
}


/// HTML body of an alert
pub fn alert_html(request: &NotificationRequest) -> String {
    let (color, headline, details) = match request.status {
        Status::Expired => {
            (
                "#dc3545",
                "TLS certificate expired",
                format!(
                    "The certificate expired <strong>{}</strong> day(s) ago.",
                    request.days_left.abs()
                ),
            )
        }
        _ => {
            (
                "#fd7e14",
                "TLS certificate expires soon",
                format!(
                    "The certificate expires in <strong>{}</strong> day(s).",
                    request.days_left
                ),
            )
        }
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #333;">
    <h2 style="color: {color};">{headline}: {hostname}</h2>
    <p>{details}</p>
    <p><strong>Not valid after:</strong> {not_after}</p>
    <p style="color: #666; font-size: 12px;">Generated by certmole</p>
</body>
</html>"#,
        color = color,
        headline = headline,
        hostname = request.hostname,
        details = details,
        not_after = request.not_after_display,
    )
}


/// Build alert message for an expiring or expired certificate
pub fn alert_message(from: &str, request: &NotificationRequest) -> Result<Message, Unexpected> {
    Message::builder()
        .from(mailbox(from, &request.hostname)?)
        .to(mailbox(&request.contact, &request.hostname)?)
        .subject(alert_subject(request))
        .singlepart(SinglePart::html(alert_html(request)))
        .map_err(|err| Unexpected::Message(request.hostname.clone(), err.to_string()))
}


/// Plain text part of a reminder
pub fn reminder_text(request: &ReminderRequest, window_days: i64) -> String {
    format!(
        "A calendar reminder is attached.\n\n\
         {} certificate expires on {}.\n\
         Reminder scheduled for {} ({} days before).",
        request.hostname,
        request.not_after.format("%Y-%m-%d %H:%M:%S UTC"),
        request.remind_at.format("%Y-%m-%d %H:%M:%S UTC"),
        window_days
    )
}


/// Build reminder message with ICS attachment
pub fn reminder_message(
    from: &str,
    request: &ReminderRequest,
    window_days: i64,
    stamp: DateTime<Utc>,
) -> Result<Message, Unexpected> {
    let message_error = |cause: String| Unexpected::Message(request.hostname.clone(), cause);
    let filename = format!("renew-{}.ics", request.hostname);
    let calendar_type = ContentType::parse(&format!(
        "text/calendar; method=REQUEST; name=\"{}\"",
        filename
    ))
    .map_err(|err| message_error(err.to_string()))?;
    let ics = build_ics(request, from, stamp);

    Message::builder()
        .from(mailbox(from, &request.hostname)?)
        .to(mailbox(&request.contact, &request.hostname)?)
        .subject(format!(
            "[REMINDER] Renew TLS certificate: {}",
            request.hostname
        ))
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(reminder_text(request, window_days)))
                .singlepart(Attachment::new(filename).body(ics, calendar_type)),
        )
        .map_err(|err| message_error(err.to_string()))
}
