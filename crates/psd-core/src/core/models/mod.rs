//! # Core Models Module
//!
//! Data structures describing the proteins seen during an expansion run.
//!
//! - [`protein`] - A protein and its weighted interaction mapping
//! - [`ids`] - Stable arena keys used to share proteins between the registry and layers
//!
//! Proteins are never constructed directly by callers; they are created by the
//! [`ProteinRegistry`](crate::core::registry::ProteinRegistry) the first time an
//! identifier is observed, and every other structure refers to them by [`ids::ProteinId`].

pub mod ids;
pub mod protein;
