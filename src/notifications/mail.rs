use crate::{
    config::SmtpConfig,
    notifications::render::{alert_message, reminder_message},
    products::{
        requests::{NotificationRequest, ReminderRequest},
        unexpected::Unexpected,
    },
};
use chrono::{DateTime, Utc};
use lettre::{transport::smtp::authentication::Credentials, Message, SmtpTransport, Transport};
use tracing::{debug, error, info};


/// Anything able to deliver an e-mail message
pub trait Courier: Send {
    /// Deliver single message
    fn deliver(&self, message: &Message) -> Result<(), String>;
}


impl Courier for SmtpTransport {
    fn deliver(&self, message: &Message) -> Result<(), String> {
        self.send(message)
            .map(|response| debug!("SMTP response: {:?}", response.code()))
            .map_err(|err| err.to_string())
    }
}


/// Build SMTP transport from configuration
pub fn smtp_transport(smtp: &SmtpConfig) -> Result<SmtpTransport, Unexpected> {
    let builder = if smtp.starttls {
        SmtpTransport::starttls_relay(&smtp.server)
            .map_err(|err| Unexpected::Message(smtp.server.clone(), err.to_string()))?
    } else {
        SmtpTransport::builder_dangerous(&smtp.server)
    };
    let builder = match (&smtp.username, &smtp.password) {
        (Some(username), Some(password)) => {
            builder.credentials(Credentials::new(username.clone(), password.clone()))
        }
        (..) => builder,
    };
    Ok(builder.port(smtp.port).build())
}


#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Outcome of delivering alerts and reminders
pub struct Delivery {
    /// Messages that couldn't be built or sent
    pub failures: usize,

    /// Host entries (hostname, port) whose reminder went out
    pub reminded: Vec<(String, u16)>,
}


/// Build and deliver all alerts and reminders, one failure never stops the others
pub fn dispatch(
    courier: &dyn Courier,
    from: &str,
    notifications: &[NotificationRequest],
    reminders: &[ReminderRequest],
    window_days: i64,
    now: DateTime<Utc>,
) -> Delivery {
    let mut delivery = Delivery::default();

    for request in notifications {
        let sent = alert_message(from, request).and_then(|message| {
            courier.deliver(&message).map_err(|cause| {
                Unexpected::Delivery {
                    kind: String::from("alert email"),
                    contact: request.contact.clone(),
                    host: request.hostname.clone(),
                    cause,
                }
            })
        });
        match sent {
            Ok(()) => info!("Alert ({}) sent to: {} for: {}", request.status, request.contact, request.hostname),
            Err(err) => {
                error!("{}", err);
                delivery.failures += 1;
            }
        }
    }

    for request in reminders {
        let sent = reminder_message(from, request, window_days, now).and_then(|message| {
            courier.deliver(&message).map_err(|cause| {
                Unexpected::Delivery {
                    kind: String::from("ICS reminder"),
                    contact: request.contact.clone(),
                    host: request.hostname.clone(),
                    cause,
                }
            })
        });
        match sent {
            Ok(()) => {
                info!("Reminder sent to: {} for: {}", request.contact, request.hostname);
                delivery
                    .reminded
                    .push((request.hostname.clone(), request.port));
            }
            Err(err) => {
                error!("{}", err);
                delivery.failures += 1;
            }
        }
    }

    delivery
}
