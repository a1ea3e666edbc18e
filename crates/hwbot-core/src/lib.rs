//! Core domain + application logic for the homework status bot.
//!
//! The upstream review API and Telegram live behind ports (traits) implemented
//! in adapter crates; this crate owns validation, translation and the loop.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod homework;
pub mod logging;
pub mod messaging;
pub mod notifier;
pub mod poller;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
