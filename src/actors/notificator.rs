use crate::{
    notifications::mail::{dispatch, Courier, Delivery},
    products::{
        requests::{NotificationRequest, ReminderRequest},
        unexpected::Unexpected,
    },
};
use actix::prelude::*;
use chrono::{DateTime, Utc};
use lettre::message::Mailbox;
use std::fmt;
use tracing::debug;


/// Notificator actor delivering alerts and renewal reminders
pub struct Notificator {
    courier: Box<dyn Courier>,
    from: String,
    window_days: i64,
}


impl Notificator {
    /// New notificator sending from given address
    pub fn new(courier: Box<dyn Courier>, from: &str, window_days: i64) -> Notificator {
        Notificator {
            courier,
            from: from.to_string(),
            window_days,
        }
    }
}


impl fmt::Debug for Notificator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notificator")
            .field("from", &self.from)
            .field("window_days", &self.window_days)
            .finish()
    }
}


/// Alerts and reminders to deliver
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Delivery, Unexpected>")]
pub struct Deliver {
    /// Alerts
    pub notifications: Vec<NotificationRequest>,

    /// Reminders
    pub reminders: Vec<ReminderRequest>,

    /// Calendar stamp
    pub now: DateTime<Utc>,
}


impl Handler<Deliver> for Notificator {
    type Result = Result<Delivery, Unexpected>;

    fn handle(&mut self, msg: Deliver, _ctx: &mut Self::Context) -> Self::Result {
        debug!(
            "Delivering {} alert(s) and {} reminder(s)",
            msg.notifications.len(),
            msg.reminders.len()
        );
        self.from
            .parse::<Mailbox>()
            .map_err(|err| Unexpected::Message(String::from("sender"), format!("{}: {}", self.from, err)))?;
        Ok(dispatch(
            self.courier.as_ref(),
            &self.from,
            &msg.notifications,
            &msg.reminders,
            self.window_days,
            msg.now,
        ))
    }
}


impl Actor for Notificator {
    type Context = SyncContext<Self>;
}
