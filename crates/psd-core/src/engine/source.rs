use crate::core::io::tsv::InteractionTable;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// The strongest `limit` partners of every requested protein.
    BestPartners { limit: usize },
    /// Every known interaction among the requested proteins.
    Network,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to interaction source failed: {0}")]
    Request(String),

    #[error("Interaction source answered with status {status}: {message}")]
    Status { status: u16, message: String },
}

/// A remote or local provider of interaction records.
///
/// Implementations perform one blocking request per call and never retry;
/// the expansion workflow recovers from every error without aborting.
pub trait InteractionSource {
    fn fetch(&self, identifiers: &[String], mode: FetchMode)
    -> Result<InteractionTable, FetchError>;
}

impl<F> InteractionSource for F
where
    F: Fn(&[String], FetchMode) -> Result<InteractionTable, FetchError>,
{
    fn fetch(
        &self,
        identifiers: &[String],
        mode: FetchMode,
    ) -> Result<InteractionTable, FetchError> {
        self(identifiers, mode)
    }
}
