/// Actors module

/// sync TLS certificate expiry check actor
pub mod cert_checker;

/// sync alert and reminder delivery actor
pub mod notificator;
