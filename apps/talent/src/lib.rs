//! # talent
//!
//! Library half of the Talent Compass binary: CLI definitions, configuration
//! resolution and text reports. Exposed as a library so integration tests
//! can drive commands without spawning a process.

pub mod cli;
pub mod config;
pub mod report;
