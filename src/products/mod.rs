/// Check errors and failed side effects
pub mod unexpected;

/// Status taxonomy and classifier
pub mod status;

/// Per-host evaluation results
pub mod evaluation;

/// Renewal reminder dedup engine
pub mod reminder;

/// Outbound requests for notification, reminder and persistence collaborators
pub mod requests;

/// Run aggregator
pub mod summary;
