// Federation Severance Notifier - core library
//
// Computes which local accounts lose connections when a remote instance is
// suspended, and delivers a personal DM to each of them ahead of time.
// External collaborators (the instance database and the messaging API) sit
// behind traits in kernel/ so the pipeline is testable end to end.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
