use crate::{
    checks::host::{HostTarget, HostTargets},
    products::{reminder::format_marker, requests::ExpiryUpdate, unexpected::Unexpected},
    utilities::{read_text_file, write_with_backup},
};
use serde_json::Value;
use std::io::ErrorKind;
use tracing::{debug, error, info};


/// Load host targets from the sites file. Invalid entries are reported and skipped
pub fn load_sites(path: &str) -> Result<HostTargets, Unexpected> {
    let contents = read_text_file(path).map_err(|err| {
        match err.kind() {
            ErrorKind::NotFound => Unexpected::SitesNotFound(path.to_string()),
            _ => Unexpected::SitesInvalid(path.to_string(), err.to_string()),
        }
    })?;
    let entries = match serde_json::from_str(&contents) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => return Err(Unexpected::SitesNotAList),
        Err(err) => return Err(Unexpected::SitesInvalid(path.to_string(), err.to_string())),
    };

    let hosts = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            HostTarget::from_entry(index + 1, entry)
                .map_err(|err| error!("{}. Skipped.", err))
                .ok()
        })
        .collect::<HostTargets>();
    debug!("Loaded {} host(s) from: {}", hosts.len(), path);
    Ok(hosts)
}


/// Apply new dedup markers to hosts matching hostname and port, returns number of changed hosts
pub fn apply_updates(hosts: &mut [HostTarget], updates: &[ExpiryUpdate]) -> usize {
    updates
        .iter()
        .map(|update| {
            let marker = format_marker(update.new_last_recorded_expiry);
            hosts
                .iter_mut()
                .filter(|host| host.hostname() == update.hostname && host.port() == update.port)
                .map(|host| {
                    info!(
                        "Recording ending_date: {} for: {}:{}",
                        marker, update.hostname, update.port
                    );
                    host.ending_date = Some(marker.clone());
                })
                .count()
        })
        .sum()
}


/// Store host targets back to the sites file (previous version kept as .bak)
pub fn save_sites(path: &str, hosts: &[HostTarget]) -> Result<(), Unexpected> {
    let persistence_error = |cause: String| Unexpected::Persistence(path.to_string(), cause);
    let json = serde_json::to_string_pretty(hosts).map_err(|err| persistence_error(err.to_string()))?;
    write_with_backup(path, &format!("{}\n", json)).map_err(|err| persistence_error(err.to_string()))
}
