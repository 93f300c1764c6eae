use serde::{Deserialize, Serialize};
use thiserror::Error;


#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq, Hash)]
/// Unexpected results of a run, from per-host check failures to side effects
pub enum Unexpected {
    /// Network, DNS, timeout, handshake or trust failure while fetching a certificate
    #[error("{host}:{port} -> {cause}")]
    ConnectivityOrTls {
        /// Checked host
        host: String,

        /// Checked port
        port: u16,

        /// Human readable cause
        cause: String,
    },

    /// Stored dedup marker that can't be parsed as a date
    #[error("Malformed ending_date: \"{0}\" for host: {1}. Treated as absent")]
    MalformedPersistedState(String, String),

    /// Host target violating the loader contract
    #[error("Invalid host target: {0}")]
    Configuration(String),

    /// Unreadable or invalid configuration file, defaults are used instead
    #[error("Configuration error: {1} in file: {0}. Using defaults")]
    ConfigInvalid(String, String),

    /// Missing sites file
    #[error("JSON file '{0}' not found.")]
    SitesNotFound(String),

    /// Sites file isn't valid JSON (or can't be read)
    #[error("Invalid JSON in '{0}': {1}")]
    SitesInvalid(String, String),

    /// Sites file root isn't a list
    #[error("JSON root should be a list of site objects.")]
    SitesNotAList,

    /// Failed to write the sites file back
    #[error("Failed to update '{0}': {1}")]
    Persistence(String, String),

    /// Failed to build an e-mail message
    #[error("Failed to build message for {0}: {1}")]
    Message(String, String),

    /// Failed to deliver an e-mail message
    #[error("Failed to send {kind} to {contact} for {host}: {cause}")]
    Delivery {
        /// Alert or reminder
        kind: String,

        /// Recipient
        contact: String,

        /// Host the message is about
        host: String,

        /// Transport failure details
        cause: String,
    },
}
