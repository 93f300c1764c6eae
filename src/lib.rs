//! "Certificate Mole" utility

//! TLS certificate expiry checks with alerts and deduplicated renewal reminders

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    unstable_features,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    bad_style,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    unused_extern_crates
)]
#![warn(dead_code, unused_imports, unused_variables, unused_qualifications)]

// For development:
// #![allow(dead_code, unused_imports, unused_variables, deprecated)]


/// Use MiMalloc as default allocator:
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;


pub use crate::{
    actors::{cert_checker::*, notificator::*},
    api::*,
    checks::{certificate::*, host::*},
    config::*,
    configuration::*,
    inputs::sites::*,
    notifications::mail::*,
    products::{
        evaluation::*, reminder::*, requests::*, status::*, summary::*, unexpected::*,
    },
};
pub use tracing::{debug, error, info, instrument, trace, warn};


//
// Public modules:
//

/// Configuration defaults:
pub mod configuration;

/// Dynamic config:
pub mod config;

/// Utilities and helpers:
pub mod utilities;

/// Host targets and the certificate fetcher:
pub mod checks;

/// Check products: statuses, results, reminder decisions, summaries:
pub mod products;

/// Sites file input and persistence:
pub mod inputs;

/// Alert and reminder rendering and delivery:
pub mod notifications;

/// Console output:
pub mod outputs;

/// Run API functions:
pub mod api;

/// Actors:
pub mod actors;

//
// Private modules:
//

/// Tests:
mod tests;
