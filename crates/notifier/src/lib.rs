//! Discord notification building and webhook delivery.
//!
//! The flow is classify → build → deliver:
//! - [`builder::classify`] picks the release or push rendering
//! - [`builder::build_notification`] turns the event into an embed
//! - [`webhook::deliver`] validates the target and POSTs the payload once

pub mod builder;
pub mod format;
pub mod webhook;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;
