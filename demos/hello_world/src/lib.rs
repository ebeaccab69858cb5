//! Greeting demo for `record_args`.
//!
//! The binary registers a [`greeting::Greeting`] record, so every field is
//! settable as `--Greeting.<field>` on the command line or under a
//! `Greeting` key in a `--config` file.

pub mod error;
pub mod greeting;
