//! oslab - small demos of OS and runtime facilities
//!
//! Each module is a self-contained demo of one facility:
//!
//! - [`shm`] / [`ticker`]: shared memory between processes, with a counter
//!   protocol (one publisher, any number of watchers)
//! - [`trace`]: bounded stack capture with symbol resolution
//! - [`exec`]: shell command execution with exit-status forwarding
//! - [`record`]: struct-literal initialization
//! - [`crypto`]: toy Diffie-Hellman, prime, and RSA demos with a self-test
//!   driver
//!
//! The `oslab` binary exposes each demo as a subcommand.

pub mod crypto;
pub mod error;
pub mod exec;
pub mod record;
pub mod shm;
pub mod ticker;
pub mod trace;

pub use error::{Error, Result};
pub use shm::ShmRegion;
pub use ticker::{TickPublisher, TickWatcher, TICK_COUNT};
