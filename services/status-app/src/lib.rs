//! Status App Library
//!
//! Platform status page plus `/ping`, `/warn`, `/error` and `/kill`
//! diagnostics. Diagnostic events are forwarded to a log collector through
//! [`collector_client`].

pub mod config;
pub mod logging;
pub mod platform;
pub mod routes;
pub mod startup;
pub mod status_page;

pub use config::Config;
pub use platform::StatusIndex;
pub use routes::{router, AppState, ProcessExit, Terminator};
