//! Test helpers shared across crates.
//!
//! This crate provides temporary configuration directories and argument
//! vector builders.

pub mod argv;
pub mod config;
