//! # Unit Components
//!
//! One module per engine component, leaf-first.

/// Word packing and symbol serialization.
pub mod packing;

/// Classifiers and multi-base search.
pub mod classify;

/// Static FPC.
pub mod fpc;

/// Static BDI.
pub mod bdi;





/// Statistics reporting.
pub mod stats;
