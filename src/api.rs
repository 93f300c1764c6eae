use crate::{
    checks::{certificate::CertificateSource, host::HostTarget},
    configuration::REMINDER_WINDOW_DAYS,
    products::{
        evaluation::{display_not_after, EvaluationResult, EvaluationResults},
        reminder::{decide_reminder, parse_marker, ReminderDecision},
        requests::{ExpiryUpdate, NotificationRequest, ReminderRequest},
        status::classify,
        summary::RunSummary,
    },
};
use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use tracing::{debug, error, info};


/**
    Public library API for certificate evaluation runs
 **/


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// What a run is allowed to emit besides results
pub struct RunOptions {
    /// Emit alerts for EXPIRES SOON / EXPIRED hosts with a contact
    pub notify: bool,

    /// Evaluate renewal reminders for hosts with a contact
    pub remind: bool,

    /// Reminder window in days
    pub reminder_window_days: i64,
}


impl Default for RunOptions {
    fn default() -> RunOptions {
        RunOptions {
            notify: true,
            remind: false,
            reminder_window_days: REMINDER_WINDOW_DAYS,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything a single host evaluation produced
pub struct HostEvaluation {
    /// Classified result or error
    pub result: EvaluationResult,

    /// Alert to send
    pub notification: Option<NotificationRequest>,

    /// Reminder to send
    pub reminder: Option<ReminderRequest>,

    /// Marker to persist once the reminder went out
    pub update: Option<ExpiryUpdate>,
}


impl HostEvaluation {
    fn failed(result: EvaluationResult) -> HostEvaluation {
        HostEvaluation {
            result,
            notification: None,
            reminder: None,
            update: None,
        }
    }
}


/// Evaluate single enabled host: fetch, classify, then alert and reminder decisions
pub fn evaluate_host<S>(
    source: &S,
    host: &HostTarget,
    now: DateTime<Utc>,
    options: &RunOptions,
) -> HostEvaluation
where
    S: CertificateSource + ?Sized,
{
    let hostname = host.hostname();
    let port = host.port();

    if let Err(err) = host.validate() {
        error!("{}", err);
        return HostEvaluation::failed(EvaluationResult::error(hostname, port, &err));
    }

    let facts = match source.fetch(hostname, port) {
        Ok(facts) => facts,
        Err(err) => {
            error!("{}", err);
            return HostEvaluation::failed(EvaluationResult::error(hostname, port, &err));
        }
    };

    let (status, days_left) = classify(now, facts.not_after);
    debug!(
        "{}:{} -> {} ({} days left)",
        hostname, port, status, days_left
    );
    let result = EvaluationResult::checked(hostname, port, status, days_left, facts.not_after);

    let notification = match host.contact() {
        Some(contact) if options.notify && status.is_alerting() => {
            Some(NotificationRequest {
                hostname: hostname.to_string(),
                contact: contact.to_string(),
                not_after_display: display_not_after(facts.not_after),
                days_left,
                status,
            })
        }
        _ => None,
    };

    let decision = match host.contact() {
        Some(_) if options.remind => {
            decide_reminder(
                now,
                facts.not_after,
                parse_marker(host.ending_date.as_deref(), hostname),
                options.reminder_window_days,
            )
        }
        _ => ReminderDecision::Hold,
    };

    let (reminder, update) = match (decision, host.contact()) {
        (ReminderDecision::Fire(marker), Some(contact)) => {
            info!("Renewal reminder due for: {} (expires: {})", hostname, marker);
            (
                Some(ReminderRequest {
                    hostname: hostname.to_string(),
                    port,
                    contact: contact.to_string(),
                    remind_at: facts.not_after - Duration::days(options.reminder_window_days),
                    not_after: facts.not_after,
                }),
                Some(ExpiryUpdate {
                    hostname: hostname.to_string(),
                    port,
                    new_last_recorded_expiry: marker,
                }),
            )
        }
        _ => (None, None),
    };

    HostEvaluation {
        result,
        notification,
        reminder,
        update,
    }
}


/// Evaluate all enabled hosts in parallel. Output keeps input order, disabled hosts are skipped
pub fn evaluate_hosts<S>(
    source: &S,
    hosts: &[HostTarget],
    now: DateTime<Utc>,
    options: &RunOptions,
) -> Vec<HostEvaluation>
where
    S: CertificateSource + Sync + ?Sized,
{
    hosts
        .par_iter()
        .filter(|host| {
            if !host.enabled() {
                debug!("Host: {} disabled, skipped", host.hostname());
            }
            host.enabled()
        })
        .map(|host| evaluate_host(source, host, now, options))
        .collect()
}


#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Products of a whole run
pub struct RunReport {
    /// Per-host results, in host order
    pub results: EvaluationResults,

    /// Alerts to send
    pub notifications: Vec<NotificationRequest>,

    /// Reminders to send
    pub reminders: Vec<ReminderRequest>,

    /// Markers to persist once reminders went out
    pub updates: Vec<ExpiryUpdate>,

    /// Tally and exit signal
    pub summary: RunSummary,
}


impl RunReport {
    /// Split host evaluations into results, outbound requests and the summary
    pub fn from_evaluations(evaluations: Vec<HostEvaluation>) -> RunReport {
        let mut report = evaluations
            .into_iter()
            .fold(RunReport::default(), |mut report, evaluation| {
                report.results.push(evaluation.result);
                report.notifications.extend(evaluation.notification);
                report.reminders.extend(evaluation.reminder);
                report.updates.extend(evaluation.update);
                report
            });
        report.summary = RunSummary::fold(&report.results);
        report
    }


    /// Markers of hosts whose reminder was actually delivered
    pub fn delivered_updates(&self, reminded: &[(String, u16)]) -> Vec<ExpiryUpdate> {
        self.updates
            .iter()
            .filter(|update| {
                reminded
                    .iter()
                    .any(|(hostname, port)| *hostname == update.hostname && *port == update.port)
            })
            .cloned()
            .collect()
    }
}


/// Evaluate hosts and build the run report
pub fn run<S>(
    source: &S,
    hosts: &[HostTarget],
    now: DateTime<Utc>,
    options: &RunOptions,
) -> RunReport
where
    S: CertificateSource + Sync + ?Sized,
{
    RunReport::from_evaluations(evaluate_hosts(source, hosts, now, options))
}
