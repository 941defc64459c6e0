//! A builder for an [`Index`].

use std::collections::HashMap;
use std::io::BufRead;
use std::io::{self};

use crate::annotation::Entry;
use crate::annotation::Line;
use crate::annotation::Ortholog;
use crate::annotation::reader;
use crate::cluster;
use crate::resolve::Index;
use crate::resolve::Stats;

/// An error related to building an [`Index`].
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

/// A builder for an [`Index`].
#[allow(missing_debug_implementations)]
pub struct Builder;

impl Builder {
    /// Builds an [`Index`] from the builder.
    ///
    /// The entire annotation stream is consumed. Lines that fail to parse as
    /// feature records and feature records lacking the cluster markers are
    /// counted and passed over. Only I/O failures end the build early.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    ///
    /// let index = pancore::resolve::Builder::default().try_build_from(reader)?;
    /// assert_eq!(index.len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build_from<T>(&self, mut reader: reader::Reader<T>) -> Result<Index>
    where
        T: BufRead,
    {
        let mut orthologs = HashMap::<cluster::Id, Vec<Ortholog>>::new();
        let mut representatives = HashMap::<cluster::Id, String>::new();
        let mut stats = Stats::default();

        let mut buffer = String::new();

        loop {
            match reader.read_line(&mut buffer) {
                Ok(None) => break,
                Ok(Some(Line::Feature(record))) => {
                    stats.lines += 1;

                    match Entry::try_from_record(&record) {
                        Some(entry) => {
                            stats.entries += 1;
                            stats.dropped_orthologs += entry.dropped_orthologs();

                            representatives
                                .entry(entry.cluster().clone())
                                .or_insert_with(|| entry.genome().to_string());

                            orthologs
                                .entry(entry.cluster().clone())
                                .or_default()
                                .extend(entry.orthologs().iter().cloned());
                        }
                        None => stats.skipped += 1,
                    }
                }
                Ok(Some(_)) => {
                    stats.lines += 1;
                    stats.skipped += 1;
                }
                Err(reader::Error::Line(_)) => {
                    stats.lines += 1;
                    stats.malformed += 1;
                }
                Err(reader::Error::Io(err)) => return Err(Error::Io(err)),
            }
        }

        Ok(Index {
            orthologs,
            representatives,
            stats,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::annotation::Reader;

    #[test]
    pub fn test_first_write_wins_for_representative_genomes()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA
Y:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:Y:gB
Z:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:Z:gC
";

        let index = Builder::default().try_build_from(Reader::new(&data[..]))?;

        let cluster = "PEPPAN_g_1".parse::<cluster::Id>()?;
        assert_eq!(index.representative_genome(&cluster), Some("X"));

        Ok(())
    }

    #[test]
    pub fn test_ortholog_references_accumulate_in_file_order()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA
Y:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:Y:gB,X:gC
";

        let index = Builder::default().try_build_from(Reader::new(&data[..]))?;

        let cluster = "PEPPAN_g_1".parse::<cluster::Id>()?;
        let genes = index
            .orthologs(&cluster)
            .unwrap()
            .iter()
            .map(|ortholog| ortholog.gene())
            .collect::<Vec<_>>();

        assert_eq!(genes, ["gA", "gB", "gC"]);

        Ok(())
    }

    #[test]
    pub fn test_stats_count_every_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"##gff-version 3
X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA,oops
X:1\tProdigal\trepeat_region\t200\t290\t.\t+\t0\tID=repeat_1
not\ta\tfeature
";

        let index = Builder::default().try_build_from(Reader::new(&data[..]))?;

        assert_eq!(index.stats().lines(), 4);
        assert_eq!(index.stats().entries(), 1);
        assert_eq!(index.stats().skipped(), 2);
        assert_eq!(index.stats().malformed(), 1);
        assert_eq!(index.stats().dropped_orthologs(), 1);

        Ok(())
    }

    #[test]
    pub fn test_building_from_an_empty_stream() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let index = Builder::default().try_build_from(Reader::new(&b""[..]))?;

        assert!(index.is_empty());
        assert_eq!(index.stats().lines(), 0);

        Ok(())
    }
}
