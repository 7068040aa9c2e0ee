//! A small tokio actor runtime and the actor that runs generation calls.
pub mod actor;
pub mod builder;
pub mod generator;
pub mod system;

pub use generator::{GenerateCmd, GeneratorActor};

/// Mailbox size for the generator. Only one call is outstanding at a time.
pub const GENERATOR_MAILBOX: usize = 4;
