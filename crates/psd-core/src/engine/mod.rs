//! # Engine Module
//!
//! The stateful part of an expansion run.
//!
//! - **Configuration** ([`config`]) - Layer count, threshold schedule and display sizes
//! - **Partition** ([`partition`]) - Append-only, duplicate-free layers of admitted proteins
//! - **Admission** ([`admission`]) - The per-layer selective inclusion rule
//! - **Run state** ([`context`]) - Registry, partition and cumulative records owned by one run
//! - **Interaction sources** ([`source`]) - The fetch seam implemented by network clients
//! - **Progress** ([`progress`]) and **errors** ([`error`])

pub mod admission;
pub mod config;
pub mod context;
pub mod error;
pub mod partition;
pub mod progress;
pub mod source;
