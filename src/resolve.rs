//! Facilities for resolving clusters to representative gene calls.

use std::collections::HashMap;

use crate::annotation::Ortholog;
use crate::cluster;

pub mod builder;

pub use builder::Builder;

////////////////////////////////////////////////////////////////////////////////////////
// Stats
////////////////////////////////////////////////////////////////////////////////////////

/// Counters accumulated while indexing an annotation stream.
///
/// None of these are errors. The annotation stream freely mixes gene and
/// non-gene feature types, so a healthy run passes over most of its lines.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// The number of lines read.
    lines: usize,

    /// The number of entries retained.
    entries: usize,

    /// The number of lines passed over for lacking the cluster markers.
    skipped: usize,

    /// The number of lines that could not be parsed as feature records.
    malformed: usize,

    /// The number of ortholog references dropped while parsing entries.
    dropped_orthologs: usize,
}

impl Stats {
    /// Gets the number of lines read.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Gets the number of entries retained.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Gets the number of lines passed over for lacking the cluster markers.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Gets the number of lines that could not be parsed as feature records.
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Gets the number of ortholog references dropped while parsing entries.
    pub fn dropped_orthologs(&self) -> usize {
        self.dropped_orthologs
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Resolutions
////////////////////////////////////////////////////////////////////////////////////////

/// The outcome of resolving a single cluster against an [`Index`].
///
/// Both halves of the outcome are optional: a cluster that never appeared in
/// the annotation stream has no representative genome, and a cluster whose
/// ortholog references all point at other genomes has a representative genome
/// but no representative gene. Neither situation is an error.
#[derive(Clone, Debug)]
pub struct Resolution<'a> {
    /// The representative genome.
    genome: Option<&'a str>,

    /// The first ortholog reference belonging to the representative genome.
    ortholog: Option<&'a Ortholog>,

    /// The number of ortholog references belonging to the representative
    /// genome.
    matches: usize,
}

impl<'a> Resolution<'a> {
    /// Gets the representative genome.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA,Y:gB";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    /// let index = pancore::resolve::Builder::default().try_build_from(reader)?;
    ///
    /// let cluster = "PEPPAN_g_1".parse::<pancore::cluster::Id>()?;
    /// let resolution = index.resolve(&cluster);
    ///
    /// assert_eq!(resolution.genome(), Some("X"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn genome(&self) -> Option<&'a str> {
        self.genome
    }

    /// Gets the first ortholog reference belonging to the representative
    /// genome.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA,Y:gB";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    /// let index = pancore::resolve::Builder::default().try_build_from(reader)?;
    ///
    /// let cluster = "PEPPAN_g_1".parse::<pancore::cluster::Id>()?;
    /// let resolution = index.resolve(&cluster);
    ///
    /// assert_eq!(resolution.ortholog().map(|ortholog| ortholog.gene()), Some("gA"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn ortholog(&self) -> Option<&'a Ortholog> {
        self.ortholog
    }

    /// Gets the number of ortholog references belonging to the representative
    /// genome.
    pub fn matches(&self) -> usize {
        self.matches
    }

    /// Returns whether more than one ortholog reference matched the
    /// representative genome.
    ///
    /// Selection always takes the first match in file order, but the tie is
    /// surfaced so that it can be reported rather than swallowed.
    pub fn is_ambiguous(&self) -> bool {
        self.matches > 1
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Indexes
////////////////////////////////////////////////////////////////////////////////////////

/// An index of the annotation stream keyed by cluster.
///
/// The index holds two mappings: each cluster's ortholog references in file
/// order, and each cluster's first-seen genome. File order is load-bearing
/// here. The first genome observed for a cluster is its representative genome
/// for the rest of the run, and later observations never overwrite it.
#[derive(Clone, Debug, Default)]
pub struct Index {
    /// Ortholog references per cluster, in file order.
    orthologs: HashMap<cluster::Id, Vec<Ortholog>>,

    /// The first-seen genome per cluster.
    representatives: HashMap<cluster::Id, String>,

    /// Counters accumulated while building the index.
    stats: Stats,
}

impl Index {
    /// Gets the representative genome for a cluster.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    /// let index = pancore::resolve::Builder::default().try_build_from(reader)?;
    ///
    /// let cluster = "PEPPAN_g_1".parse::<pancore::cluster::Id>()?;
    /// assert_eq!(index.representative_genome(&cluster), Some("X"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn representative_genome(&self, cluster: &cluster::Id) -> Option<&str> {
        self.representatives.get(cluster).map(String::as_str)
    }

    /// Gets the ortholog references for a cluster in file order.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA,Y:gB";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    /// let index = pancore::resolve::Builder::default().try_build_from(reader)?;
    ///
    /// let cluster = "PEPPAN_g_1".parse::<pancore::cluster::Id>()?;
    /// let orthologs = index.orthologs(&cluster).unwrap();
    ///
    /// assert_eq!(orthologs.len(), 2);
    /// assert_eq!(orthologs[0].gene(), "gA");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn orthologs(&self, cluster: &cluster::Id) -> Option<&[Ortholog]> {
        self.orthologs.get(cluster).map(Vec::as_slice)
    }

    /// Gets the number of clusters in the index.
    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    /// Returns whether the index contains no clusters.
    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// Gets the counters accumulated while building the index.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Resolves a cluster to its representative genome and gene call.
    ///
    /// The representative gene is the first ortholog reference, in file
    /// order, whose genome equals the cluster's representative genome.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:Y:gB,X:gA";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    /// let index = pancore::resolve::Builder::default().try_build_from(reader)?;
    ///
    /// let cluster = "PEPPAN_g_1".parse::<pancore::cluster::Id>()?;
    /// let resolution = index.resolve(&cluster);
    ///
    /// assert_eq!(resolution.genome(), Some("X"));
    /// assert_eq!(resolution.ortholog().map(|ortholog| ortholog.gene()), Some("gA"));
    /// assert_eq!(resolution.matches(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn resolve(&self, cluster: &cluster::Id) -> Resolution<'_> {
        let genome = self.representative_genome(cluster);

        let mut ortholog = None;
        let mut matches = 0;

        if let Some(genome) = genome {
            for candidate in self.orthologs.get(cluster).into_iter().flatten() {
                if candidate.genome() == genome {
                    if ortholog.is_none() {
                        ortholog = Some(candidate);
                    }

                    matches += 1;
                }
            }
        }

        Resolution {
            genome,
            ortholog,
            matches,
        }
    }
}

#[cfg(test)]
pub mod tests {
    use crate::annotation::Reader;
    use crate::cluster;
    use crate::resolve::Builder;

    static DATA: &[u8] = b"##gff-version 3
X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA,X:gB,Y:gC
Y:1\tPEPPAN\tCDS\t100\t190\t.\t+\t0\tID=PEPPAN_g_2;inference=ortholog_group:Z:gD
";

    #[test]
    pub fn test_resolving_an_unseen_cluster() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let index = Builder::default().try_build_from(Reader::new(DATA))?;

        let cluster = "PEPPAN_g_99".parse::<cluster::Id>()?;
        let resolution = index.resolve(&cluster);

        assert_eq!(resolution.genome(), None);
        assert_eq!(resolution.ortholog(), None);
        assert_eq!(resolution.matches(), 0);
        assert!(!resolution.is_ambiguous());

        Ok(())
    }

    #[test]
    pub fn test_resolving_a_cluster_with_no_matching_ortholog()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let index = Builder::default().try_build_from(Reader::new(DATA))?;

        // The only reference for this cluster points at genome `Z`, not at
        // the representative genome `Y`.
        let cluster = "PEPPAN_g_2".parse::<cluster::Id>()?;
        let resolution = index.resolve(&cluster);

        assert_eq!(resolution.genome(), Some("Y"));
        assert_eq!(resolution.ortholog(), None);
        assert_eq!(resolution.matches(), 0);

        Ok(())
    }

    #[test]
    pub fn test_resolving_an_ambiguous_cluster() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let index = Builder::default().try_build_from(Reader::new(DATA))?;

        let cluster = "PEPPAN_g_1".parse::<cluster::Id>()?;
        let resolution = index.resolve(&cluster);

        assert_eq!(resolution.genome(), Some("X"));
        assert_eq!(
            resolution.ortholog().map(|ortholog| ortholog.gene()),
            Some("gA")
        );
        assert_eq!(resolution.matches(), 2);
        assert!(resolution.is_ambiguous());

        Ok(())
    }

    #[test]
    pub fn test_index_accessors() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let index = Builder::default().try_build_from(Reader::new(DATA))?;

        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());

        let cluster = "PEPPAN_g_1".parse::<cluster::Id>()?;
        let orthologs = index.orthologs(&cluster).unwrap();
        assert_eq!(orthologs.len(), 3);

        Ok(())
    }
}
