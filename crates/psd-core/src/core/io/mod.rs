//! Reading and writing of tab-separated interaction files.
//!
//! The [`tsv`] module understands both the legacy thirteen-column layout written
//! by this crate and the six-column layout returned by the STRING API, so seed
//! files, cached API responses and cumulative artifacts all go through one parser.

pub mod traits;
pub mod tsv;
