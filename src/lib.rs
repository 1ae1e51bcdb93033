#![doc(test(attr(deny(warnings))))]

//! Budget Report turns transaction rows and budget records into custom report
//! payloads: per-interval series, per-group summaries, grand totals and a
//! chart legend, all driven by a declarative report definition.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod report;
pub mod source;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Report tracing initialized.");
    });
}
