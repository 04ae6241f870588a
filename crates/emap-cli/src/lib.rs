//! Library components of the email-map administration CLI.

pub mod logging;
pub mod plan;
