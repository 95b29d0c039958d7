//! Common types shared by every stage of the engine.
//!
//! This module provides:
//! 1. **Constants:** Block geometry and table capacities.
//! 2. **Payloads:** The request/payload buffers the engine reads and annotates.
//! 3. **Errors:** Configuration error reporting.

/// Block geometry and table capacities.
pub mod constants;

/// Error types.
pub mod error;

/// Payload buffers and write requests.
pub mod payload;

pub use constants::{BLOCK_BITS, BLOCK_SIZE};
pub use error::ConfigError;
pub use payload::{PayloadBuffer, Target, WriteRequest};
