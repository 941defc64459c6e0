//! The gene presence/absence matrix produced by pangenome clustering.

pub mod cell;
pub mod record;

use std::io;
use std::path::Path;

pub use cell::Cell;
pub use record::Record;

/// The minimum number of columns in the matrix header (the name column plus
/// at least one genome).
pub const MIN_HEADER_FIELDS: usize = 2;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing the matrix.
#[derive(Debug)]
pub enum ParseError {
    /// A header with fewer columns than [`MIN_HEADER_FIELDS`].
    MalformedHeader(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedHeader(fields) => write!(
                f,
                "malformed header: expected at least {} columns, found {} columns",
                MIN_HEADER_FIELDS, fields
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Matrix`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// An error from the underlying delimited reader.
    Csv(csv::Error),

    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Csv(err) => write!(f, "csv error: {err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Matrix
////////////////////////////////////////////////////////////////////////////////////////

/// The gene presence/absence matrix.
///
/// The first header column names the rows; every remaining column is a genome.
/// Rows are kept in file order and cells in header order, so downstream
/// tie-breaks that depend on ordering are reproducible across runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matrix {
    /// The genome identifiers, in header order.
    genomes: Vec<String>,

    /// The rows, in file order.
    rows: Vec<Record>,
}

impl Matrix {
    /// Reads a matrix from a comma-separated reader with a header row.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::content::Matrix;
    ///
    /// let data = b"Gene,X,Y\ng1,A1,A1\ng2,-,B2\n";
    /// let matrix = Matrix::try_from_reader(&data[..])?;
    ///
    /// assert_eq!(matrix.genomes(), ["X", "Y"]);
    /// assert_eq!(matrix.rows().len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_reader<R>(reader: R) -> Result<Self>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(Error::Csv)?.clone();
        if headers.len() < MIN_HEADER_FIELDS {
            return Err(Error::Parse(ParseError::MalformedHeader(headers.len())));
        }

        let genomes = headers.iter().skip(1).map(String::from).collect::<Vec<_>>();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(Error::Csv)?;

            let mut fields = record.iter();
            let name = fields.next().unwrap_or_default();
            let cells = fields.map(Cell::from).collect::<Vec<_>>();

            rows.push(Record::new(name, cells));
        }

        Ok(Matrix { genomes, rows })
    }

    /// Reads a matrix from a file, transparently decoding gzip when the path
    /// ends in `.gz`.
    pub fn try_from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        crate::input::open(path)
            .map_err(Error::Io)
            .and_then(Self::try_from_reader)
    }

    /// Gets the genome identifiers, in header order.
    pub fn genomes(&self) -> &[String] {
        &self.genomes
    }

    /// Gets the rows, in file order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Filters the matrix down to the strict single-copy core: the rows where
    /// every genome contributed exactly one gene call.
    ///
    /// The genome header and the relative row order are preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::content::Matrix;
    ///
    /// let data = b"Gene,X,Y\ng1,A1,A1\ng2,-,B2\ng3,C3,a;b\n";
    /// let matrix = Matrix::try_from_reader(&data[..])?;
    ///
    /// let core = matrix.strict_core();
    /// assert_eq!(core.rows().len(), 1);
    /// assert_eq!(core.rows()[0].name(), "g1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strict_core(&self) -> Matrix {
        Matrix {
            genomes: self.genomes.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.is_strict_single_copy())
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_reads_genomes_and_rows_in_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y,Z\ng1,A1,A1,A1\ng2,B2,-,B2\n";
        let matrix = Matrix::try_from_reader(&data[..])?;

        assert_eq!(matrix.genomes(), ["X", "Y", "Z"]);
        assert_eq!(matrix.rows().len(), 2);
        assert_eq!(matrix.rows()[0].name(), "g1");
        assert_eq!(matrix.rows()[1].name(), "g2");
        assert_eq!(matrix.rows()[1].cells()[1], Cell::Absent);

        Ok(())
    }

    #[test]
    pub fn test_single_column_header_is_malformed() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene\ng1\n";
        let err = Matrix::try_from_reader(&data[..]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "parse error: malformed header: expected at least 2 columns, found 1 columns"
        );

        Ok(())
    }

    #[test]
    pub fn test_empty_input_is_malformed() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Matrix::try_from_reader(&b""[..]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "parse error: malformed header: expected at least 2 columns, found 0 columns"
        );

        Ok(())
    }

    #[test]
    pub fn test_row_arity_mismatch_is_fatal() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y\ng1,A1\n";
        let result = Matrix::try_from_reader(&data[..]);

        assert!(matches!(result, Err(Error::Csv(_))));

        Ok(())
    }

    #[test]
    pub fn test_strict_core_selects_rows_where_every_cell_is_single()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y\n\
            keep,A1,A2\n\
            dash,-,B2\n\
            empty,,C2\n\
            multi,D1,a;b\n\
            keep2,E1,E2\n";
        let matrix = Matrix::try_from_reader(&data[..])?;

        let core = matrix.strict_core();
        let names = core.rows().iter().map(Record::name).collect::<Vec<_>>();
        assert_eq!(names, ["keep", "keep2"]);
        assert_eq!(core.genomes(), matrix.genomes());

        Ok(())
    }
}
