//! Shared scenario primitives
//!
//! Fixture writing, external command invocation, host state observation,
//! assertion accumulation, and guaranteed cleanup. Scenarios compose these
//! in a fixed order: write fixture → invoke tool → read state → assert →
//! release registered cleanups.

pub mod checks;
pub mod cleanup;
pub mod fixture;
pub mod invoke;
pub mod state;

pub use checks::Checker;
pub use cleanup::CleanupStack;
pub use invoke::Invocation;
pub use state::{HostFs, MemReader, StateReader};
