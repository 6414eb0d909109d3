//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] data layer and the
//! [`crate::engine`] logic together into complete runs.
//!
//! - **Expansion Workflow** ([`expand`]) - Grows a seed interaction set into a
//!   layered protein network, one admission step per layer, and streams the
//!   admitted proteins and their interactions into a graph builder.

pub mod expand;
