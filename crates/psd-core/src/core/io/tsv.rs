use super::traits::InteractionFile;
use std::collections::HashSet;
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;
use tracing::debug;

pub const HEADER: &str = "#node1\tnode2\tnode1_string_id\tnode2_string_id\tneighborhood_on_chromosome\tgene_fusion\tphylogenetic_cooccurrence\thomology\tcoexpression\texperimentally_determined_interaction\tdatabase_annotated\tautomated_textmining\tcombined_score";

pub const PLACEHOLDER_COLUMNS: usize = 10;
pub const MAX_SCORE: f64 = 1000.0;

const LEGACY_COLUMNS: usize = 2 + PLACEHOLDER_COLUMNS + 1;
const API_MIN_COLUMNS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub query: String,
    pub partner: String,
    pub score: f64,
}

impl InteractionRecord {
    pub fn new(query: impl Into<String>, partner: impl Into<String>, score: f64) -> Self {
        Self {
            query: query.into(),
            partner: partner.into(),
            score,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Line has {found} columns, at least 6 are required")]
    TooFewColumns { found: usize },
    #[error("Protein name in column {column} is empty")]
    EmptyName { column: usize },
    #[error("Invalid combined score '{0}'")]
    InvalidScore(String),
    #[error("Combined score '{0}' is outside [0, 1000]")]
    ScoreOutOfRange(String),
}

#[derive(Debug, Error)]
pub enum InteractionFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TSV error: {0}")]
    Tsv(#[from] csv::Error),
}

/// Column arrangement of the lines in a record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// Files on disk. Lines with at least thirteen columns use the legacy
    /// layout (names in columns 1 and 2, score in column 13). Lines with six
    /// to twelve columns use the STRING API layout.
    File,
    /// STRING `tsv-no-header` response bodies. Names are always in columns 3
    /// and 4 and the combined score in column 6, whatever the line width.
    Api,
}

impl RecordLayout {
    fn columns(self, found: usize) -> Result<(usize, usize, usize), RecordError> {
        match (self, found) {
            (_, n) if n < API_MIN_COLUMNS => Err(RecordError::TooFewColumns { found }),
            (RecordLayout::File, n) if n >= LEGACY_COLUMNS => Ok((0, 1, LEGACY_COLUMNS - 1)),
            _ => Ok((2, 3, 5)),
        }
    }
}

/// Parses the fields of one record line laid out as `layout`.
pub fn parse_record_line(
    fields: &[&str],
    layout: RecordLayout,
) -> Result<InteractionRecord, RecordError> {
    let (query_col, partner_col, score_col) = layout.columns(fields.len())?;

    let query = fields[query_col].trim();
    let partner = fields[partner_col].trim();
    if query.is_empty() {
        return Err(RecordError::EmptyName {
            column: query_col + 1,
        });
    }
    if partner.is_empty() {
        return Err(RecordError::EmptyName {
            column: partner_col + 1,
        });
    }

    let raw_score = fields[score_col].trim();
    let score: f64 = raw_score
        .parse()
        .map_err(|_| RecordError::InvalidScore(raw_score.to_string()))?;
    if !score.is_finite() || !(0.0..=MAX_SCORE).contains(&score) {
        return Err(RecordError::ScoreOutOfRange(raw_score.to_string()));
    }

    Ok(InteractionRecord::new(query, partner, score))
}

/// Lazily yields the well-formed records of a tab-separated source.
///
/// Header lines (starting with `#`) and blank lines are ignored, malformed
/// lines are logged and skipped. Only reader failures are yielded as errors.
pub fn records<R: Read>(
    reader: R,
    layout: RecordLayout,
) -> impl Iterator<Item = Result<InteractionRecord, InteractionFileError>> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader);

    reader.into_records().filter_map(move |result| match result {
        Ok(row) => {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<&str> = row.iter().collect();
            match parse_record_line(&fields, layout) {
                Ok(record) => Some(Ok(record)),
                Err(e) => {
                    debug!("Skipping malformed interaction line {}: {}", line, e);
                    None
                }
            }
        }
        Err(e) if e.is_io_error() => Some(Err(e.into())),
        Err(e) => {
            debug!("Skipping unreadable interaction line: {}", e);
            None
        }
    })
}

/// An in-memory, restartable sequence of interaction records in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionTable {
    records: Vec<InteractionRecord>,
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<InteractionRecord>) -> Self {
        Self { records }
    }

    /// Parses a STRING API response body.
    pub fn parse_api_str(text: &str) -> Self {
        // A byte slice reader cannot fail, so every yielded item is a record.
        Self::from_records(
            records(text.as_bytes(), RecordLayout::Api)
                .filter_map(Result::ok)
                .collect(),
        )
    }

    pub fn push(&mut self, record: InteractionRecord) {
        self.records.push(record);
    }

    /// Appends all records of `other`, keeping their order.
    pub fn extend_from(&mut self, other: &InteractionTable) {
        self.records.extend(other.records.iter().cloned());
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Protein names in order of first appearance, without duplicates.
    pub fn proteins(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .flat_map(|r| [r.query.as_str(), r.partner.as_str()])
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

impl<'a> IntoIterator for &'a InteractionTable {
    type Item = &'a InteractionRecord;
    type IntoIter = std::slice::Iter<'a, InteractionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

pub struct TsvFile;

impl InteractionFile for TsvFile {
    type Error = InteractionFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<InteractionTable, Self::Error> {
        let records = records(reader, RecordLayout::File).collect::<Result<Vec<_>, _>>()?;
        Ok(InteractionTable::from_records(records))
    }

    fn write_to(table: &InteractionTable, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", HEADER)?;

        let mut tsv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .has_headers(false)
            .from_writer(writer);

        for record in table {
            let score = record.score.to_string();
            let mut row: Vec<&str> = Vec::with_capacity(LEGACY_COLUMNS);
            row.push(&record.query);
            row.push(&record.partner);
            row.extend(std::iter::repeat_n("0", PLACEHOLDER_COLUMNS));
            row.push(&score);
            tsv.write_record(&row)?;
        }
        tsv.flush()?;
        Ok(())
    }
}
