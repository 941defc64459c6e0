//! Extraction of representative sequences from the allele archive.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::io::{self};
use std::path::PathBuf;

use noodles::fasta;
use noodles::fasta::record::Definition;

use crate::archive;
use crate::archive::Key;
use crate::metadata;

/// The extension of emitted sequence files.
pub const EXTENSION: &str = "fasta";

/// The delimiter between columns of the emitted key mapping table.
pub const DELIMITER: u8 = b'\t';

/// The columns of the emitted key mapping table.
pub const MAPPING_COLUMNS: [&str; 4] = ["Genome", "Gene", "ArchiveKey", "SequenceLength"];

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to extraction.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A CSV error.
    Csv(csv::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Mapping rows
////////////////////////////////////////////////////////////////////////////////////////

/// One row of the emitted key mapping table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MappingRow {
    /// The genome.
    genome: String,

    /// The gene.
    gene: String,

    /// The archive key the representative sequence was found under.
    key: Key,

    /// The length of the representative sequence.
    length: usize,
}

impl MappingRow {
    /// Creates a new mapping row.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::archive::Key;
    /// use pancore::extract::MappingRow;
    ///
    /// let row = MappingRow::new("X", "g1", Key::new("X", "gA", None), 4);
    /// assert_eq!(row.genome(), "X");
    /// assert_eq!(row.gene(), "g1");
    /// assert_eq!(row.key().to_string(), "X:gA");
    /// assert_eq!(row.length(), 4);
    /// ```
    pub fn new<G, E>(genome: G, gene: E, key: Key, length: usize) -> Self
    where
        G: Into<String>,
        E: Into<String>,
    {
        Self {
            genome: genome.into(),
            gene: gene.into(),
            key,
            length,
        }
    }

    /// Gets the genome.
    pub fn genome(&self) -> &str {
        &self.genome
    }

    /// Gets the gene.
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Gets the archive key the representative sequence was found under.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Gets the length of the representative sequence.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Writes the key mapping table as tab-separated values.
pub fn write_mapping<W>(rows: &[MappingRow], writer: W) -> Result<()>
where
    W: Write,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);

    writer.write_record(MAPPING_COLUMNS).map_err(Error::Csv)?;

    for row in rows {
        writer
            .write_record([
                row.genome(),
                row.gene(),
                row.key().to_string().as_str(),
                row.length().to_string().as_str(),
            ])
            .map_err(Error::Csv)?;
    }

    writer.flush().map_err(Error::Io)
}

////////////////////////////////////////////////////////////////////////////////////////
// Stats
////////////////////////////////////////////////////////////////////////////////////////

/// Counters accumulated while extracting sequences.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// The number of sequence files written.
    written: usize,

    /// The number of composed keys absent from the archive.
    missing: usize,

    /// The number of rows passed over because their representative columns
    /// never resolved.
    unresolved: usize,
}

impl Stats {
    /// Gets the number of sequence files written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Gets the number of composed keys absent from the archive.
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Gets the number of rows passed over because their representative
    /// columns never resolved.
    pub fn unresolved(&self) -> usize {
        self.unresolved
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Extractors
////////////////////////////////////////////////////////////////////////////////////////

/// An extractor of representative sequences.
///
/// For each resolved metadata row, the archive key is composed from the
/// representative genome, gene, and allele, and the record found under it is
/// rewritten to a single-record sequence file named after the (genome, gene)
/// pair of the row. The description is cleared in the process: downstream
/// consumers key on the emitted name alone.
#[derive(Debug)]
pub struct Extractor<'a> {
    /// The archive index to extract from.
    index: &'a archive::Index,

    /// The directory to write sequence files into.
    directory: PathBuf,
}

impl<'a> Extractor<'a> {
    /// Creates a new extractor.
    pub fn new<P>(index: &'a archive::Index, directory: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            index,
            directory: directory.into(),
        }
    }

    /// Extracts the representative sequence for each resolved row.
    ///
    /// Exactly one sequence file is written per row whose composed key was
    /// found in the archive. Unresolved rows and missing keys are counted
    /// and passed over, never raised. The output directory is created if it
    /// does not exist, and existing files are overwritten, so re-running
    /// over a partial output directory is safe.
    pub fn extract(&self, rows: &[metadata::Row]) -> Result<(Vec<MappingRow>, Stats)> {
        fs::create_dir_all(&self.directory).map_err(Error::Io)?;

        let mut mapping = Vec::new();
        let mut stats = Stats::default();

        for row in rows {
            let (genome, gene) = match (row.representative_genome(), row.representative_gene()) {
                (Some(genome), Some(gene)) => (genome, gene),
                _ => {
                    stats.unresolved += 1;
                    continue;
                }
            };

            let key = Key::new(genome, gene, row.allele().map(String::from));

            let record = match self.index.get(&key) {
                Some(record) => record,
                None => {
                    stats.missing += 1;
                    continue;
                }
            };

            let name = format!("{}_{}", row.genome(), row.gene());
            let path = self.directory.join(format!("{}.{}", name, EXTENSION));

            let definition = Definition::new(name, None);
            let renamed = fasta::Record::new(definition, record.sequence().clone());

            let file = File::create(path).map_err(Error::Io)?;
            let mut writer = fasta::io::Writer::new(BufWriter::new(file));
            writer.write_record(&renamed).map_err(Error::Io)?;

            mapping.push(MappingRow {
                genome: row.genome().to_string(),
                gene: row.gene().to_string(),
                length: record.sequence().len(),
                key,
            });

            stats.written += 1;
        }

        Ok((mapping, stats))
    }
}
