//! Error types shared by every demo module

use std::io;
use thiserror::Error;

/// Result type for oslab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the demo modules
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to create a shared memory object
    #[error("failed to create shared memory '{name}': {source}")]
    ShmCreate {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Failed to open an existing shared memory object
    #[error("failed to open shared memory '{name}': {source}")]
    ShmOpen {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Failed to map a shared memory object
    #[error("failed to map shared memory: {0}")]
    Mmap(#[source] io::Error),

    /// Failed to size a shared memory object
    #[error("failed to set shared memory size: {0}")]
    Truncate(#[source] io::Error),

    /// Shared memory name exceeds the name budget
    #[error("shared memory name too long: max {max} chars, got {got}")]
    NameTooLong { max: usize, got: usize },

    /// Region is smaller than the protocol header
    #[error("shared memory region too small: need {need} bytes, got {got}")]
    RegionTooSmall { need: usize, got: usize },

    /// The region does not carry a ticker header
    #[error("invalid ticker magic: expected 0x{expected:08X}, got 0x{got:08X}")]
    InvalidMagic { expected: u32, got: u32 },

    /// Publisher and watcher disagree on the header layout
    #[error("unsupported ticker version: expected {expected}, got {got}")]
    VersionMismatch { expected: u32, got: u32 },

    /// The watcher's poll deadline expired with no change
    #[error("timed out waiting for a counter change")]
    WatchTimeout,

    /// Failed to spawn the shell for a command
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Key exchange I/O failed
    #[error("key exchange failed: {0}")]
    Exchange(#[source] io::Error),

    /// The two sides of the exchange derived different secrets
    #[error("key exchange disagreement: server derived {server}, client derived {client}")]
    SecretMismatch { server: u64, client: u64 },

    /// Generator does not cover the residues of the modulus
    #[error("generator {generator} repeats residues mod {modulus}")]
    BadGenerator { generator: u64, modulus: u64 },

    /// Public exponent shares a factor with phi
    #[error("exponent {e} is not coprime with phi {phi}")]
    NotCoprime { e: u64, phi: u64 },

    /// A crypto self-test produced a wrong value
    #[error("self-test '{name}' failed: {detail}")]
    SelfTest { name: &'static str, detail: String },
}
