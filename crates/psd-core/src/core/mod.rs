//! # Core Module
//!
//! Stateless building blocks of an expansion run.
//!
//! - **Proteins** ([`models`]) - Protein entities and the keys used to share them
//! - **Interaction files** ([`io`]) - Tab-separated record codec with malformed-line tolerance
//! - **Registry** ([`registry`]) - Run-wide deduplicated protein arena
//! - **Graph boundary** ([`graph`]) - Node/edge specifications handed to renderers
//!
//! Nothing in this module decides layer membership; that is the job of the
//! [`engine`](crate::engine).

pub mod graph;
pub mod io;
pub mod models;
pub mod registry;
