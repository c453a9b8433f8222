//! Source-input scanner and hasher for a compiler-output caching system.
//!
//! Two coupled responsibilities make up the hard part: detecting the three
//! temporal preprocessor macros (`__DATE__`, `__TIME__`, `__TIMESTAMP__`) at
//! SIMD throughput, and composing the right entropy into an incremental
//! hash when one is found. A loosely related command-output hasher rounds
//! out the crate, since it's the other canonical way cache-key material is
//! produced in this kind of system.
//!
//! This crate does not implement a cache key store, eviction policy,
//! manifest format, compiler argument parsing, configuration loading, or
//! CLI/daemon surface -- those are external collaborators.

// Allow pre-existing clippy lints across the codebase
#![allow(
    clippy::collapsible_if,
    clippy::needless_return,
    clippy::too_many_arguments
)]

pub mod buffer;
pub mod command_hash;
mod error;
pub mod hash_sink;
pub mod orchestrator;
pub mod scanner;
pub mod source_hash;

pub use buffer::PaddedBuffer;
pub use command_hash::run_and_hash;
pub use error::ScanError;
pub use hash_sink::{Blake2bSink, HashSink};
pub use orchestrator::run_all_and_hash;
pub use scanner::{scan, Findings, FOUND_DATE, FOUND_TIME, FOUND_TIMESTAMP};
pub use source_hash::{
    hash_buffer, hash_file, hash_file_default, is_precompiled_header_default, ScanConfig,
};
