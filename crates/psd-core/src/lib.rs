//! # PSD Explorer Core Library
//!
//! Layer-by-layer expansion of a protein interaction network around a set of
//! seed proteins, such as the scaffolds of the postsynaptic density.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Protein`,
//!   `ProteinRegistry`), the interaction record codec and the graph model.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the layer partition, the
//!   connectivity-based admission rule and the abstraction over interaction
//!   data sources.
//!
//! - **[`workflows`]: The Public API.** Drives a complete expansion from a seed
//!   file to a layered network, reporting progress along the way.

pub mod core;
pub mod engine;
pub mod workflows;
