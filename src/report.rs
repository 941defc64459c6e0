//! A diagnostic audit over the emitted metadata.
//!
//! The audit recomputes everything it checks from the metadata rows alone
//! rather than trusting the resolution pass that produced them. It never
//! mutates prior outputs: a non-empty anomaly list is a warning for triage,
//! not a failure.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::cluster;
use crate::content::Matrix;
use crate::metadata::Row;

/// The maximum number of example rows carried per anomaly.
pub const MAX_EXAMPLES: usize = 3;

////////////////////////////////////////////////////////////////////////////////////////
// Anomalies
////////////////////////////////////////////////////////////////////////////////////////

/// A cluster mapped to more than one distinct representative gene.
///
/// Resolution assigns one representative gene per cluster, so every genome's
/// row for a cluster should agree. Disagreement means the metadata was
/// produced by divergent passes or edited after the fact.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Anomaly {
    /// The cluster-local identifier.
    local_id: String,

    /// The distinct representative genes observed, sorted.
    genes: Vec<String>,

    /// Deduplicated (genome, representative gene) example pairs, capped at
    /// [`MAX_EXAMPLES`].
    examples: Vec<(String, String)>,
}

impl Anomaly {
    /// Gets the cluster-local identifier.
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Gets the distinct representative genes observed.
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Gets the deduplicated (genome, representative gene) example pairs.
    pub fn examples(&self) -> &[(String, String)] {
        &self.examples
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Reports
////////////////////////////////////////////////////////////////////////////////////////

/// The outcome of auditing emitted metadata against the filtered matrix.
#[derive(Clone, Debug)]
pub struct Report {
    /// The number of distinct representative genes.
    distinct_genes: usize,

    /// The clusters mapped to more than one distinct representative gene.
    anomalies: Vec<Anomaly>,

    /// The number of genes in the filtered matrix.
    matrix_genes: usize,

    /// The number of distinct genes in the metadata.
    metadata_genes: usize,

    /// The number of genes shared between the two.
    shared_genes: usize,

    /// The number of metadata rows expected from the matrix shape.
    expected_rows: usize,

    /// The number of metadata rows observed.
    rows: usize,

    /// The clusters whose representative gene was selected among multiple
    /// matching ortholog references.
    ambiguous: Vec<cluster::Id>,
}

impl Report {
    /// Gets the number of distinct representative genes.
    pub fn distinct_genes(&self) -> usize {
        self.distinct_genes
    }

    /// Gets the clusters mapped to more than one distinct representative
    /// gene.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Gets the number of genes in the filtered matrix.
    pub fn matrix_genes(&self) -> usize {
        self.matrix_genes
    }

    /// Gets the number of distinct genes in the metadata.
    pub fn metadata_genes(&self) -> usize {
        self.metadata_genes
    }

    /// Gets the number of genes shared between the filtered matrix and the
    /// metadata.
    pub fn shared_genes(&self) -> usize {
        self.shared_genes
    }

    /// Gets the number of metadata rows expected from the matrix shape.
    pub fn expected_rows(&self) -> usize {
        self.expected_rows
    }

    /// Gets the number of metadata rows observed.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Gets the clusters whose representative gene was selected among
    /// multiple matching ortholog references.
    pub fn ambiguous(&self) -> &[cluster::Id] {
        &self.ambiguous
    }
}

/// Audits emitted metadata against the filtered matrix.
///
/// Three checks are recomputed from scratch: the count of distinct
/// representative genes, the clusters whose rows disagree on their
/// representative gene, and the overlap between the matrix's gene set and
/// the metadata's. Sentinel values are excluded throughout, matching how the
/// table renders unresolved rows.
///
/// # Examples
///
/// ```
/// use pancore::content::Matrix;
/// use pancore::metadata::Row;
///
/// let matrix = Matrix::try_from_reader(&b"Gene,X,Y\ng1,A1,A1\n"[..])?;
/// let rows = [
///     Row::new("g1", "X", "A1", Some("X".into()), Some("gA".into()), None),
///     Row::new("g1", "Y", "A1", Some("X".into()), Some("gA".into()), None),
/// ];
///
/// let report = pancore::report::audit(&matrix, &rows, &[]);
///
/// assert_eq!(report.distinct_genes(), 1);
/// assert!(report.anomalies().is_empty());
/// assert_eq!(report.rows(), report.expected_rows());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn audit(matrix: &Matrix, rows: &[Row], ambiguous: &[cluster::Id]) -> Report {
    let distinct_genes = rows
        .iter()
        .filter_map(Row::representative_gene)
        .collect::<HashSet<_>>()
        .len();

    let mut genes_by_cluster = BTreeMap::<&str, BTreeSet<&str>>::new();

    for row in rows {
        if let Some(gene) = row.representative_gene() {
            genes_by_cluster
                .entry(row.local_id())
                .or_default()
                .insert(gene);
        }
    }

    let mut anomalies = Vec::new();

    for (local_id, genes) in genes_by_cluster {
        if genes.len() < 2 {
            continue;
        }

        let mut examples = Vec::new();

        for row in rows {
            if row.local_id() != local_id {
                continue;
            }

            if let Some(gene) = row.representative_gene() {
                let example = (row.genome().to_string(), gene.to_string());

                if !examples.contains(&example) {
                    examples.push(example);
                }

                if examples.len() == MAX_EXAMPLES {
                    break;
                }
            }
        }

        anomalies.push(Anomaly {
            local_id: local_id.to_string(),
            genes: genes.into_iter().map(String::from).collect(),
            examples,
        });
    }

    let matrix_names = matrix
        .rows()
        .iter()
        .map(|record| record.name())
        .collect::<HashSet<_>>();

    let metadata_names = rows.iter().map(Row::gene).collect::<HashSet<_>>();

    Report {
        distinct_genes,
        anomalies,
        matrix_genes: matrix_names.len(),
        metadata_genes: metadata_names.len(),
        shared_genes: matrix_names.intersection(&metadata_names).count(),
        expected_rows: matrix.rows().len() * matrix.genomes().len(),
        rows: rows.len(),
        ambiguous: ambiguous.to_vec(),
    }
}
