//! The flat allele sequence archive.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::BufRead;
use std::io::{self};
use std::path::Path;

use noodles::fasta;

pub mod key;

pub use key::Key;

/// An error related to an archive [`Index`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// An index of the allele sequence archive.
///
/// Header tokens are used verbatim as keys. Keys are not guaranteed unique
/// across the archive, and the first record seen for a key wins: later
/// records under the same key are dropped and counted, never surfaced as
/// errors. Records that fail to parse are likewise counted and passed over.
#[derive(Clone, Debug)]
pub struct Index {
    /// The sequence records, keyed by header token.
    records: HashMap<String, fasta::Record>,

    /// The number of duplicate keys dropped.
    collisions: usize,

    /// The number of malformed records passed over.
    skipped: usize,
}

impl Index {
    /// Attempts to index an archive from a reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b">X:gA\nACGT\n>X:gA\nTTTT\n>Y:gB\nCCCC";
    /// let index = pancore::archive::Index::try_from_reader(&data[..])?;
    ///
    /// assert_eq!(index.len(), 2);
    /// assert_eq!(index.collisions(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_reader<T>(reader: T) -> Result<Self>
    where
        T: BufRead,
    {
        let mut reader = fasta::io::Reader::new(reader);

        let mut records = HashMap::new();
        let mut collisions = 0;
        let mut skipped = 0;

        for result in reader.records() {
            match result {
                Ok(record) => {
                    let name = String::from_utf8_lossy(record.name()).to_string();

                    match records.entry(name) {
                        Entry::Vacant(entry) => {
                            entry.insert(record);
                        }
                        Entry::Occupied(_) => collisions += 1,
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::InvalidData => skipped += 1,
                Err(err) => return Err(Error::Io(err)),
            }
        }

        Ok(Index {
            records,
            collisions,
            skipped,
        })
    }

    /// Attempts to index an archive from a path.
    ///
    /// Files whose extension is `gz` are decompressed on the fly.
    pub fn try_from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        crate::input::open(path)
            .map_err(Error::Io)
            .and_then(Self::try_from_reader)
    }

    /// Gets the record stored under a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::archive::Key;
    ///
    /// let data = b">X:gA_1\nACGT";
    /// let index = pancore::archive::Index::try_from_reader(&data[..])?;
    ///
    /// let key = Key::new("X", "gA", Some(String::from("1")));
    /// let record = index.get(&key).unwrap();
    /// assert_eq!(record.sequence().len(), 4);
    ///
    /// assert!(index.get(&Key::new("X", "gB", None)).is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(&self, key: &Key) -> Option<&fasta::Record> {
        self.records.get(key.to_string().as_str())
    }

    /// Gets the number of records in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the index contains no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Gets the number of duplicate keys dropped while indexing.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Gets the number of malformed records passed over while indexing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_first_record_wins_on_duplicate_keys() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b">X:gA\nACGT\n>X:gA\nTTTTTTTT";
        let index = Index::try_from_reader(&data[..])?;

        assert_eq!(index.len(), 1);
        assert_eq!(index.collisions(), 1);

        let record = index.get(&Key::new("X", "gA", None)).unwrap();
        assert_eq!(record.sequence().len(), 4);

        Ok(())
    }

    #[test]
    pub fn test_indexing_is_idempotent() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b">X:gA\nACGT\n>X:gA\nTTTT\n>Y:gB\nCC";

        let first = Index::try_from_reader(&data[..])?;
        let second = Index::try_from_reader(&data[..])?;

        assert_eq!(first.len(), second.len());
        assert_eq!(first.collisions(), second.collisions());

        for (key, record) in &first.records {
            let other = second.records.get(key).unwrap();
            assert_eq!(record.sequence(), other.sequence());
        }

        Ok(())
    }

    #[test]
    pub fn test_empty_archive() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let index = Index::try_from_reader(&b""[..])?;

        assert!(index.is_empty());
        assert_eq!(index.collisions(), 0);
        assert_eq!(index.skipped(), 0);

        Ok(())
    }
}
