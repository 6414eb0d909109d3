use crate::config::StringSettings;
use crate::error::Result;
use psdexplorer::core::io::tsv::InteractionTable;
use psdexplorer::engine::source::{FetchError, FetchMode, InteractionSource};
use reqwest::blocking::Client;
use tracing::{debug, info};

const OUTPUT_FORMAT: &str = "tsv-no-header";
const IDENTIFIER_SEPARATOR: &str = "%0d";
const MAX_ERROR_BODY: usize = 200;

/// Blocking client for the STRING REST API.
#[derive(Debug)]
pub struct StringClient {
    http: Client,
    base_url: String,
    species: u32,
    caller_identity: String,
}

impl StringClient {
    pub fn new(settings: &StringSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("psdx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        debug!(
            "STRING client configured for {} (species {}, timeout {:?})",
            settings.base_url, settings.species, settings.timeout
        );
        Ok(Self {
            http,
            base_url: settings.base_url.clone(),
            species: settings.species,
            caller_identity: settings.caller_identity.clone(),
        })
    }

    pub fn endpoint(&self, mode: FetchMode) -> String {
        let method = match mode {
            FetchMode::BestPartners { .. } => "interaction_partners",
            FetchMode::Network => "network",
        };
        format!("{}/{}/{}", self.base_url, OUTPUT_FORMAT, method)
    }

    pub fn form_fields(&self, identifiers: &[String], mode: FetchMode) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("identifiers", identifiers.join(IDENTIFIER_SEPARATOR)),
            ("species", self.species.to_string()),
        ];
        if let FetchMode::BestPartners { limit } = mode {
            fields.push(("limit", limit.to_string()));
        }
        fields.push(("caller_identity", self.caller_identity.clone()));
        fields
    }
}

/// Reads a `tsv-no-header` body from either endpoint.
///
/// Both endpoints answer with the same thirteen columns: two STRING ids,
/// the two display names, the taxon, the combined score and seven channel
/// scores. Only the display names and the combined score are kept.
pub fn parse_response(body: &str) -> InteractionTable {
    InteractionTable::parse_api_str(body)
}

impl InteractionSource for StringClient {
    fn fetch(
        &self,
        identifiers: &[String],
        mode: FetchMode,
    ) -> std::result::Result<InteractionTable, FetchError> {
        if identifiers.is_empty() {
            return Ok(InteractionTable::new());
        }

        let url = self.endpoint(mode);
        info!("Requesting {} protein(s) from {}", identifiers.len(), url);
        let response = self
            .http
            .post(&url)
            .form(&self.form_fields(identifiers, mode))
            .send()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body.trim().chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let table = parse_response(&body);
        debug!("STRING returned {} record(s) from {}", table.len(), url);
        Ok(table)
    }
}
