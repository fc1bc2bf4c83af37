#![doc(test(attr(deny(warnings))))]

//! Listing Wizard implements the multi-step flow that collects a property
//! listing (type, basic info, location, services, rules, common areas,
//! units, media) and submits it to the property service.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod steps;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Listing wizard tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
