//! The core gene metadata table.
//!
//! One row is emitted per (gene, genome) pair of the filtered matrix. Rows
//! whose cluster never resolved carry the [`SENTINEL`] in the representative
//! columns rather than failing the run. Triage happens downstream, over the
//! emitted table.

use std::collections::BTreeSet;
use std::io::Write;
use std::io::{self};

use crate::cluster;
use crate::content::Matrix;
use crate::resolve;

/// The sentinel recorded when a value could not be resolved.
pub const SENTINEL: &str = "NA";

/// The delimiter between columns of the emitted table.
pub const DELIMITER: u8 = b'\t';

/// The columns of the emitted table.
pub const COLUMNS: [&str; 5] = [
    "Gene",
    "Genome",
    "ClusterLocalID",
    "RepresentativeGenome",
    "RepresentativeGene",
];

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to writing a [`Table`].
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
// Rows
////////////////////////////////////////////////////////////////////////////////////////

/// One row of the core gene metadata table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    /// The gene, i.e., the row name from the gene content matrix.
    gene: String,

    /// The genome.
    genome: String,

    /// The cluster-local identifier, i.e., the raw cell value for this
    /// genome.
    local_id: String,

    /// The representative genome.
    representative_genome: Option<String>,

    /// The representative gene.
    representative_gene: Option<String>,

    /// The representative allele, if the annotation source encoded one.
    ///
    /// The allele is not a column of the emitted table. It is carried so
    /// that the archive key can be composed during extraction.
    allele: Option<String>,
}

impl Row {
    /// Creates a new metadata row.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::metadata::Row;
    ///
    /// let row = Row::new("g1", "X", "PEPPAN_g_1", Some("X".into()), Some("gA".into()), None);
    /// assert!(row.is_resolved());
    /// ```
    pub fn new<G, E, L>(
        gene: G,
        genome: E,
        local_id: L,
        representative_genome: Option<String>,
        representative_gene: Option<String>,
        allele: Option<String>,
    ) -> Self
    where
        G: Into<String>,
        E: Into<String>,
        L: Into<String>,
    {
        Self {
            gene: gene.into(),
            genome: genome.into(),
            local_id: local_id.into(),
            representative_genome,
            representative_gene,
            allele,
        }
    }

    /// Gets the gene.
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Gets the genome.
    pub fn genome(&self) -> &str {
        &self.genome
    }

    /// Gets the cluster-local identifier.
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Gets the representative genome.
    pub fn representative_genome(&self) -> Option<&str> {
        self.representative_genome.as_deref()
    }

    /// Gets the representative gene.
    pub fn representative_gene(&self) -> Option<&str> {
        self.representative_gene.as_deref()
    }

    /// Gets the representative allele, if the annotation source encoded one.
    pub fn allele(&self) -> Option<&str> {
        self.allele.as_deref()
    }

    /// Returns whether both representative halves of the row resolved.
    pub fn is_resolved(&self) -> bool {
        self.representative_genome.is_some() && self.representative_gene.is_some()
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Tables
////////////////////////////////////////////////////////////////////////////////////////

/// The core gene metadata table.
#[derive(Clone, Debug)]
pub struct Table {
    /// The rows of the table, in matrix order.
    rows: Vec<Row>,

    /// The clusters whose representative gene was selected among multiple
    /// matching ortholog references.
    ambiguous: Vec<cluster::Id>,
}

impl Table {
    /// Gets the rows of the table.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Gets the clusters whose representative gene was selected among
    /// multiple matching ortholog references.
    pub fn ambiguous(&self) -> &[cluster::Id] {
        &self.ambiguous
    }

    /// Writes the table as tab-separated values.
    ///
    /// Unresolved representative columns are rendered as the [`SENTINEL`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::content::Matrix;
    /// use pancore::resolve::Builder;
    ///
    /// let matrix = Matrix::try_from_reader(&b"Gene,X,Y\ng1,PEPPAN_g_1,PEPPAN_g_1\n"[..])?;
    /// let annotation = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA";
    /// let index = Builder::default().try_build_from(pancore::annotation::Reader::new(&annotation[..]))?;
    ///
    /// let table = pancore::metadata::table(&matrix.strict_core(), &index);
    ///
    /// let mut buffer = Vec::new();
    /// table.write(&mut buffer)?;
    ///
    /// let written = String::from_utf8(buffer)?;
    /// let mut lines = written.lines();
    ///
    /// assert_eq!(
    ///     lines.next(),
    ///     Some("Gene\tGenome\tClusterLocalID\tRepresentativeGenome\tRepresentativeGene")
    /// );
    /// assert_eq!(lines.next(), Some("g1\tX\tPEPPAN_g_1\tX\tgA"));
    /// assert_eq!(lines.next(), Some("g1\tY\tPEPPAN_g_1\tX\tgA"));
    /// assert_eq!(lines.next(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_writer(writer);

        writer.write_record(COLUMNS).map_err(Error::Csv)?;

        for row in &self.rows {
            writer
                .write_record([
                    row.gene(),
                    row.genome(),
                    row.local_id(),
                    row.representative_genome().unwrap_or(SENTINEL),
                    row.representative_gene().unwrap_or(SENTINEL),
                ])
                .map_err(Error::Csv)?;
        }

        writer.flush().map_err(Error::Io)
    }
}

/// Builds the metadata table for a matrix against an annotation index.
///
/// Rows are emitted in matrix order: all genomes of the first gene, then all
/// genomes of the second, and so on. Cells that do not parse as clusters and
/// clusters absent from the index both yield sentinel rows, never errors.
pub fn table(matrix: &Matrix, index: &resolve::Index) -> Table {
    let mut rows = Vec::new();
    let mut ambiguous = BTreeSet::new();

    for record in matrix.rows() {
        for (genome, cell) in matrix.genomes().iter().zip(record.cells()) {
            let local_id = cell.to_string();

            let mut representative_genome = None;
            let mut representative_gene = None;
            let mut allele = None;

            if let Ok(id) = local_id.parse::<cluster::Id>() {
                let resolution = index.resolve(&id);

                representative_genome = resolution.genome().map(String::from);
                representative_gene = resolution
                    .ortholog()
                    .map(|ortholog| ortholog.gene().to_string());
                allele = resolution
                    .ortholog()
                    .and_then(|ortholog| ortholog.allele())
                    .map(String::from);

                if resolution.is_ambiguous() {
                    ambiguous.insert(id);
                }
            }

            rows.push(Row {
                gene: record.name().to_string(),
                genome: genome.clone(),
                local_id,
                representative_genome,
                representative_gene,
                allele,
            });
        }
    }

    Table {
        rows,
        ambiguous: ambiguous.into_iter().collect(),
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::annotation::Reader;
    use crate::resolve::Builder;

    static ANNOTATION: &[u8] = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA:1,Y:gB
Y:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_2;inference=ortholog_group:Y:gC,Y:gD
";

    fn index() -> crate::resolve::Index {
        Builder::default()
            .try_build_from(Reader::new(ANNOTATION))
            .unwrap()
    }

    #[test]
    pub fn test_rows_follow_matrix_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y\ng1,PEPPAN_g_1,PEPPAN_g_1\ng2,PEPPAN_g_2,PEPPAN_g_2\n";
        let matrix = Matrix::try_from_reader(&data[..])?;

        let table = table(&matrix.strict_core(), &index());

        let pairs = table
            .rows()
            .iter()
            .map(|row| (row.gene(), row.genome()))
            .collect::<Vec<_>>();

        assert_eq!(
            pairs,
            [("g1", "X"), ("g1", "Y"), ("g2", "X"), ("g2", "Y")]
        );

        Ok(())
    }

    #[test]
    pub fn test_resolution_is_shared_across_a_cluster() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y\ng1,PEPPAN_g_1,PEPPAN_g_1\n";
        let matrix = Matrix::try_from_reader(&data[..])?;

        let table = table(&matrix.strict_core(), &index());

        for row in table.rows() {
            assert_eq!(row.representative_genome(), Some("X"));
            assert_eq!(row.representative_gene(), Some("gA"));
            assert_eq!(row.allele(), Some("1"));
        }

        Ok(())
    }

    #[test]
    pub fn test_unseen_clusters_yield_sentinel_rows() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y\ng9,PEPPAN_g_9,PEPPAN_g_9\n";
        let matrix = Matrix::try_from_reader(&data[..])?;

        let table = table(&matrix.strict_core(), &index());

        let mut buffer = Vec::new();
        table.write(&mut buffer)?;

        let written = String::from_utf8(buffer)?;
        assert!(written.contains("g9\tX\tPEPPAN_g_9\tNA\tNA"));

        for row in table.rows() {
            assert!(!row.is_resolved());
        }

        Ok(())
    }

    #[test]
    pub fn test_ambiguous_clusters_are_collected() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y\ng2,PEPPAN_g_2,PEPPAN_g_2\n";
        let matrix = Matrix::try_from_reader(&data[..])?;

        // Both references for this cluster point at the representative
        // genome `Y`, so selection is ambiguous and takes the first.
        let table = table(&matrix.strict_core(), &index());

        assert_eq!(table.ambiguous().len(), 1);
        assert_eq!(table.ambiguous()[0].inner(), "PEPPAN_g_2");

        for row in table.rows() {
            assert_eq!(row.representative_gene(), Some("gC"));
        }

        Ok(())
    }

    #[test]
    pub fn test_cardinality_matches_rows_times_genomes()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"Gene,X,Y,Z\ng1,PEPPAN_g_1,PEPPAN_g_1,PEPPAN_g_1\ng2,PEPPAN_g_2,PEPPAN_g_2,PEPPAN_g_2\n";
        let matrix = Matrix::try_from_reader(&data[..])?.strict_core();

        let table = table(&matrix, &index());

        assert_eq!(
            table.rows().len(),
            matrix.rows().len() * matrix.genomes().len()
        );

        Ok(())
    }
}
