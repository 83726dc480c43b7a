//! # standup-channels
//!
//! Messaging platform integrations for Standup.

pub mod telegram;
pub mod utils;
