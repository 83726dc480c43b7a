//! # standup-core
//!
//! Report parsing and formatting, core types, traits, configuration, and
//! error handling for the Standup bot.

pub mod config;
pub mod error;
pub mod message;
pub mod report;
pub mod traits;
