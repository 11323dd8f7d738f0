//! Library components of the importkit CLI.

pub mod logging;
pub mod report;
