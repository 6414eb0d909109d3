use super::tsv::InteractionTable;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing interaction tables.
///
/// Implementors handle a concrete on-disk layout; callers only ever see the
/// parsed [`InteractionTable`].
pub trait InteractionFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads an interaction table from a buffered reader.
    ///
    /// Malformed record lines are skipped. Only failures of the underlying
    /// reader are reported as errors.
    fn read_from(reader: &mut impl BufRead) -> Result<InteractionTable, Self::Error>;

    /// Writes an interaction table, header line included, to a writer.
    fn write_to(table: &InteractionTable, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads an interaction table from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<InteractionTable, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes an interaction table to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    fn write_to_path<P: AsRef<Path>>(table: &InteractionTable, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
