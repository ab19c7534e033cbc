#![doc(test(attr(deny(warnings))))]

//! Commit Inquiry drives multi-step prompt wizards with back navigation,
//! nested sub-wizards and shared answer records, and uses them to compose
//! conventional commit messages.

pub mod cli;
pub mod commit;
pub mod config;
pub mod errors;
pub mod inquiry;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("commit_inquiry tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
