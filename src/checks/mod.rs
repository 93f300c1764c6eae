/// Host targets:
pub mod host;

/// TLS certificate fetcher:
pub mod certificate;
