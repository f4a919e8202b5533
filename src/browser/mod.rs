//! Browser session and site navigation
//!
//! This module owns the single Chrome session the whole crawl runs in:
//! - Launching Chrome with the configured options (headless toggle,
//!   automation-fingerprint suppression, window size)
//! - Low-level page primitives: bounded element waits, forced clicks,
//!   script evaluation
//! - The [`Navigator`], which drives the site's fixed topic → block → quiz
//!   hierarchy
//! - The [`SiteSession`] trait, the seam the orchestrator depends on

mod navigator;
mod session;
mod traits;

pub use navigator::Navigator;
pub use session::Session;
pub use traits::{Choice, SiteSession};
