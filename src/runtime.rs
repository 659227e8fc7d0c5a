//! Runtime for executing chat turns
//!
//! Bridges the external agent runtime's event feed to transcript snapshots.

mod driver;
mod error;
mod remote;
pub mod traits;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // Public API re-exports
pub use driver::{Turn, TurnDriver, TurnState};
#[allow(unused_imports)] // Public API re-exports
pub use error::{RunError, RunErrorKind};
pub use remote::RemoteRunner;
#[allow(unused_imports)] // Public API re-exports
pub use traits::*;
