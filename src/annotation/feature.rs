//! A feature record within the annotation stream.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::annotation::Attributes;

/// The delimiter between fields in a feature record.
pub const DELIMITER: char = '\t';

/// The number of expected fields in a feature record.
pub const NUM_FIELDS: usize = 9;

/// The delimiter between the genome and contig components of the sequence
/// identifier.
pub const SEQID_DELIMITER: char = ':';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a feature record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the feature line.
    IncorrectNumberOfFields(usize),

    /// An invalid start position.
    InvalidStart(ParseIntError),

    /// An invalid end position.
    InvalidEnd(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(fields) => write!(
                f,
                "invalid number of fields in feature: expected {} fields, found {} fields",
                NUM_FIELDS, fields
            ),
            ParseError::InvalidStart(err) => write!(f, "invalid start position: {}", err),
            ParseError::InvalidEnd(err) => write!(f, "invalid end position: {}", err),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Record`].
#[derive(Debug)]
pub enum Error {
    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A feature record within the annotation stream.
///
/// A record is one tab-separated line of nine fields. The first field is the
/// sequence identifier (either a bare genome or `genome:contig`), and the
/// ninth holds the [`Attributes`]. The score, strand, and phase fields are not
/// consumed by this crate and are kept verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The sequence identifier.
    seqid: String,

    /// The annotation source.
    source: String,

    /// The feature type.
    kind: String,

    /// The start position.
    start: u64,

    /// The end position.
    end: u64,

    /// The score field, kept verbatim.
    score: String,

    /// The strand field, kept verbatim.
    strand: String,

    /// The phase field, kept verbatim.
    phase: String,

    /// The parsed attributes.
    attributes: Attributes,
}

impl Record {
    /// Gets the sequence identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::feature;
    ///
    /// let record = "X:contig_1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1"
    ///     .parse::<feature::Record>()?;
    ///
    /// assert_eq!(record.seqid(), "X:contig_1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn seqid(&self) -> &str {
        &self.seqid
    }

    /// Gets the genome component of the sequence identifier: the part before
    /// the first [`SEQID_DELIMITER`], or the whole identifier when there is
    /// none.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::feature;
    ///
    /// let record = "X:contig_1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1"
    ///     .parse::<feature::Record>()?;
    ///
    /// assert_eq!(record.genome(), "X");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn genome(&self) -> &str {
        self.seqid
            .split(SEQID_DELIMITER)
            .next()
            .unwrap_or(&self.seqid)
    }

    /// Gets the annotation source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Gets the feature type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Gets the start position.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the end position.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Gets the score field.
    pub fn score(&self) -> &str {
        &self.score
    }

    /// Gets the strand field.
    pub fn strand(&self) -> &str {
        &self.strand
    }

    /// Gets the phase field.
    pub fn phase(&self) -> &str {
        &self.phase
    }

    /// Gets the attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s.split(DELIMITER).collect::<Vec<_>>();
        if parts.len() != NUM_FIELDS {
            return Err(Error::Parse(ParseError::IncorrectNumberOfFields(
                parts.len(),
            )));
        }

        let start = parts[3]
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidStart(err)))?;
        let end = parts[4]
            .parse()
            .map_err(|err| Error::Parse(ParseError::InvalidEnd(err)))?;

        Ok(Record {
            seqid: parts[0].into(),
            source: parts[1].into(),
            kind: parts[2].into(),
            start,
            end,
            score: parts[5].into(),
            strand: parts[6].into(),
            phase: parts[7].into(),
            attributes: Attributes::from(parts[8]),
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seqid,
            self.source,
            self.kind,
            self.start,
            self.end,
            self.score,
            self.strand,
            self.phase,
            self.attributes
        )
    }
}
