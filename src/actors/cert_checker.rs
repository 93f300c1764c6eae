use crate::{
    api::{evaluate_hosts, HostEvaluation, RunOptions},
    checks::{certificate::TlsFetcher, host::HostTargets},
};
use actix::prelude::*;
use chrono::{DateTime, Utc};
use tracing::info;


/// CertChecker actor for TLS certificate expiry checks
#[derive(Debug, Copy, Clone)]
pub struct CertChecker {
    fetcher: TlsFetcher,
}


impl CertChecker {
    /// New checker using given fetcher
    pub fn new(fetcher: TlsFetcher) -> CertChecker {
        CertChecker { fetcher }
    }
}


impl Actor for CertChecker {
    type Context = SyncContext<Self>;
}


/// Actor message wrapper: hosts to inspect at given instant
#[derive(Message, Debug, Clone)]
#[rtype(result = "Vec<HostEvaluation>")]
pub struct Inspect {
    /// Hosts (disabled ones are skipped)
    pub hosts: HostTargets,

    /// Instant the whole run is evaluated at
    pub now: DateTime<Utc>,

    /// Alert and reminder switches
    pub options: RunOptions,
}


impl Handler<Inspect> for CertChecker {
    type Result = Vec<HostEvaluation>;

    fn handle(&mut self, msg: Inspect, _ctx: &mut Self::Context) -> Self::Result {
        info!("Inspecting {} host(s)…", msg.hosts.len());
        evaluate_hosts(&self.fetcher, &msg.hosts, msg.now, &msg.options)
    }
}
