//! Gene entries retained from the annotation stream.

use nonempty::NonEmpty;

use crate::annotation::feature;
use crate::annotation::ortholog;
use crate::annotation::ortholog::Ortholog;
use crate::annotation::ortholog::strip_parenthetical;
use crate::cluster;

/// The attribute key carrying the cluster identifier.
pub const ID_KEY: &str = "ID";

/// The attribute key carrying inference metadata.
pub const INFERENCE_KEY: &str = "inference";

/// The marker prefix identifying an ortholog-group cross-reference within an
/// inference attribute.
pub const ORTHOLOG_GROUP_PREFIX: &str = "ortholog_group:";

/// The attribute key carrying the locus tag.
pub const LOCUS_TAG_KEY: &str = "locus_tag";

/// A gene entry retained from the annotation stream.
///
/// An entry is produced only for feature records that carry both markers: a
/// cluster identifier in their `ID` attribute and an ortholog-group
/// cross-reference in an `inference` attribute. The annotation stream mixes
/// gene and non-gene feature types, so records lacking either marker are
/// dropped without comment rather than treated as errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// The genome the feature belongs to.
    genome: String,

    /// The cluster identifier.
    cluster: cluster::Id,

    /// The cleaned locus tag, when present.
    locus_tag: Option<String>,

    /// The ortholog cross-references, in attribute order.
    orthologs: NonEmpty<Ortholog>,

    /// The number of malformed references dropped from the cross-reference
    /// list.
    dropped_orthologs: usize,
}

impl Entry {
    /// Attempts to extract a gene entry from a feature record.
    ///
    /// Returns [`None`] when the record lacks a cluster marker, lacks an
    /// ortholog-group cross-reference, or carries a cross-reference list with
    /// no parseable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::Entry;
    /// use pancore::annotation::feature;
    ///
    /// let record = "X:c1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\t\
    ///     ID=PEPPAN_g_1;inference=ortholog_group:X:g1:1,Y:g1:2"
    ///     .parse::<feature::Record>()?;
    ///
    /// let entry = Entry::try_from_record(&record).unwrap();
    /// assert_eq!(entry.genome(), "X");
    /// assert_eq!(entry.cluster().inner(), "PEPPAN_g_1");
    /// assert_eq!(entry.orthologs().len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_record(record: &feature::Record) -> Option<Self> {
        let cluster = record
            .attributes()
            .get(ID_KEY)?
            .parse::<cluster::Id>()
            .ok()?;

        let references = record
            .attributes()
            .get_all(INFERENCE_KEY)
            .find_map(|value| value.strip_prefix(ORTHOLOG_GROUP_PREFIX))?;

        let (orthologs, dropped_orthologs) = ortholog::parse_list(references);
        let orthologs = NonEmpty::from_vec(orthologs)?;

        let locus_tag = record
            .attributes()
            .get(LOCUS_TAG_KEY)
            .map(strip_parenthetical);

        Some(Entry {
            genome: record.genome().to_string(),
            cluster,
            locus_tag,
            orthologs,
            dropped_orthologs,
        })
    }

    /// Gets the genome.
    pub fn genome(&self) -> &str {
        &self.genome
    }

    /// Gets the cluster identifier.
    pub fn cluster(&self) -> &cluster::Id {
        &self.cluster
    }

    /// Gets the cleaned locus tag, when present.
    pub fn locus_tag(&self) -> Option<&str> {
        self.locus_tag.as_deref()
    }

    /// Gets the ortholog cross-references, in attribute order.
    pub fn orthologs(&self) -> &NonEmpty<Ortholog> {
        &self.orthologs
    }

    /// Gets the number of malformed references dropped from the
    /// cross-reference list.
    pub fn dropped_orthologs(&self) -> usize {
        self.dropped_orthologs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parses a feature record from the nine standard fields with the given
    /// attribute field.
    fn record(seqid: &str, attributes: &str) -> feature::Record {
        format!("{}\tPEPPAN\tCDS\t1\t90\t.\t+\t0\t{}", seqid, attributes)
            .parse::<feature::Record>()
            .unwrap()
    }

    #[test]
    pub fn test_entry_with_both_markers() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let record = record(
            "X:contig_1",
            "ID=PEPPAN_g_7;locus_tag=b0001(v2);inference=ortholog_group:X:g1:1,Y:g1(t):2(95.5%)",
        );

        let entry = Entry::try_from_record(&record).unwrap();
        assert_eq!(entry.genome(), "X");
        assert_eq!(entry.cluster().inner(), "PEPPAN_g_7");
        assert_eq!(entry.locus_tag(), Some("b0001"));
        assert_eq!(entry.orthologs().len(), 2);
        assert_eq!(entry.orthologs().first().genome(), "X");
        assert_eq!(entry.dropped_orthologs(), 0);

        Ok(())
    }

    #[test]
    pub fn test_record_without_id_is_skipped() {
        let record = record("X", "inference=ortholog_group:X:g1");
        assert!(Entry::try_from_record(&record).is_none());
    }

    #[test]
    pub fn test_record_with_non_cluster_id_is_skipped() {
        let record = record("X", "ID=contig_1;inference=ortholog_group:X:g1");
        assert!(Entry::try_from_record(&record).is_none());
    }

    #[test]
    pub fn test_record_without_ortholog_group_is_skipped() {
        let record = record("X", "ID=PEPPAN_g_1;inference=ab initio prediction");
        assert!(Entry::try_from_record(&record).is_none());
    }

    #[test]
    pub fn test_ortholog_group_among_repeated_inference_attributes()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let record = record(
            "X",
            "ID=PEPPAN_g_1;inference=ab initio prediction;inference=ortholog_group:Y:g2",
        );

        let entry = Entry::try_from_record(&record).unwrap();
        assert_eq!(entry.orthologs().len(), 1);
        assert_eq!(entry.orthologs().first().genome(), "Y");

        Ok(())
    }

    #[test]
    pub fn test_list_with_no_parseable_references_is_skipped() {
        let record = record("X", "ID=PEPPAN_g_1;inference=ortholog_group:junk");
        assert!(Entry::try_from_record(&record).is_none());
    }

    #[test]
    pub fn test_dropped_references_are_counted() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let record = record("X", "ID=PEPPAN_g_1;inference=ortholog_group:X:g1,junk,Y:g2");

        let entry = Entry::try_from_record(&record).unwrap();
        assert_eq!(entry.orthologs().len(), 2);
        assert_eq!(entry.dropped_orthologs(), 1);

        Ok(())
    }
}
