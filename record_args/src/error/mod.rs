//! Error types produced by registration and resolution.

mod constructors;
mod types;

pub use types::ArgsError;

#[cfg(test)]
mod tests;
