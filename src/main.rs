//! "Certificate Mole" checker

//! Checks TLS certificates of configured sites, sends alerts and renewal reminders

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    unstable_features,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    bad_style,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true
)]
// For development:
// #![allow(dead_code, unused_imports, unused_variables, deprecated)]


use actix::prelude::*;
use certmole::{outputs::console::*, *};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;


/// TLS cert checker: quiet by default (emails only)
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "certmole", version, about, long_about = None)]
struct Args {
    /// Do not send ANY emails (alerts or reminders)
    #[arg(long = "no-mail")]
    no_mail: bool,

    /// Print per-site table + Summary block
    #[arg(short = 'S', long)]
    summary: bool,

    /// Print only the summary as JSON
    #[arg(short = 'J', long)]
    json: bool,

    /// Send an ICS reminder before expiry, deduplicated via ending_date in the sites file
    #[arg(short = 'R', long)]
    reminder: bool,

    /// Sites file (overrides configuration)
    #[arg(short = 'f', long = "sites", value_name = "FILE")]
    sites: Option<String>,
}


/// Initial setup of the tracing subscriber, RUST_LOG overrides configured level
fn setup_logger(config: &Config) {
    let filter = EnvFilter::builder()
        .with_default_directive(config.get_log_level().into())
        .from_env_lossy();
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Couldn't initialize logger: {}", err);
    }
}


/// Deliver alerts and reminders through the Notificator actor
async fn deliver(config: &Config, report: &RunReport, now: chrono::DateTime<Utc>) -> Result<Delivery, Unexpected> {
    let smtp = config.smtp();
    let transport = smtp_transport(&smtp)?;
    let window_days = config.reminder_window_days();
    let from = smtp.from;
    let notificator = SyncArbiter::start(1, move || {
        Notificator::new(Box::new(transport.clone()), &from, window_days)
    });
    notificator
        .send(Deliver {
            notifications: report.notifications.clone(),
            reminders: report.reminders.clone(),
            now,
        })
        .await
        .map_err(|err| Unexpected::Message(String::from("Notificator"), err.to_string()))?
}


/// Single run: load sites, check, notify, persist, report. Returns exit code
async fn execute(args: &Args, config: &Config) -> i32 {
    let sites_file = args.sites.clone().unwrap_or_else(|| config.sites_file());
    let mut hosts = match load_sites(&sites_file) {
        Ok(hosts) if !hosts.is_empty() => hosts,
        Ok(_) => {
            error!("No valid sites defined in: '{}'", sites_file);
            return ExitSignal::Fail.code();
        }
        Err(err) => {
            error!("{}", err);
            return ExitSignal::Fail.code();
        }
    };

    let options = RunOptions {
        notify: !args.no_mail,
        remind: args.reminder && !args.no_mail,
        reminder_window_days: config.reminder_window_days(),
    };
    let now = Utc::now();

    let fetcher = TlsFetcher::new(config.connection_timeout());
    let cert_checker = SyncArbiter::start(1, move || CertChecker::new(fetcher));
    let evaluations = match cert_checker
        .send(Inspect {
            hosts: hosts.clone(),
            now,
            options,
        })
        .await
    {
        Ok(evaluations) => evaluations,
        Err(err) => {
            error!("CertChecker failed: {}", err);
            return ExitSignal::Fail.code();
        }
    };
    let mut report = RunReport::from_evaluations(evaluations);
    info!(
        "Checks took: {}s. Results count: {}.",
        (Utc::now() - now).num_seconds(),
        report.results.len()
    );

    if !report.notifications.is_empty() || !report.reminders.is_empty() {
        match deliver(config, &report, now).await {
            Ok(delivery) => {
                report.summary.record_failures(delivery.failures);
                let updates = report.delivered_updates(&delivery.reminded);
                if apply_updates(&mut hosts, &updates) > 0 {
                    if let Err(err) = save_sites(&sites_file, &hosts) {
                        error!("{}", err);
                        report.summary.record_failures(1);
                    }
                }
            }
            Err(err) => {
                error!("{}", err);
                report
                    .summary
                    .record_failures(report.notifications.len() + report.reminders.len());
            }
        }
    }

    if args.json {
        match render_json(&report.summary) {
            Ok(json) => println!("{}", json),
            Err(err) => error!("Summary serialization failure: {}", err),
        }
    } else if args.summary {
        print!("{}", render_table(&report.results));
        print!("{}", render_summary(&report.summary));
    }

    let signal = report.summary.exit_signal();
    debug!("Exit signal: {}", signal);
    signal.code()
}


#[actix_macros::main]
async fn main() {
    let mut args = Args::parse();
    // --no-mail alone shows table and summary, -J prints JSON instead
    if args.no_mail && !(args.summary || args.json) {
        args.summary = true;
    }

    let loaded = Config::load();
    let config = loaded.clone().unwrap_or_default();
    setup_logger(&config);
    info!("Starting Certmole v{}", env!("CARGO_PKG_VERSION"));
    if let Err(err) = loaded {
        error!("{}", err);
    }

    let code = execute(&args, &config).await;
    std::process::exit(code)
}
