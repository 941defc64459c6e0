//! A binary to resolve the outputs of a pangenome clustering run into a
//! canonical set of strict single-copy core genes.
//!
//! ```shell
//! cargo run --release --bin=pancore --features=binaries -- ./clustering-out ./core-genes
//! ```
//!
//! It achieves this by carrying out the following:
//!
//! * Filtering the gene content matrix down to the clusters present exactly
//!   once in every genome.
//! * Resolving each such cluster to a representative genome and gene from the
//!   annotation stream and writing the metadata table.
//! * Extracting the matching records from the allele archive into one renamed
//!   sequence file per (genome, gene) assignment, plus a key mapping table.
//! * Auditing the emitted metadata for cardinality and uniqueness anomalies.
//!
//! Incomplete inputs are tolerated wherever possible: unresolved clusters and
//! missing archive keys are reported and counted, not raised. The only fatal
//! conditions are inputs that cannot be found, read, or structurally parsed.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use pancore::annotation;
use pancore::archive;
use pancore::content::Matrix;
use pancore::extract;
use pancore::extract::Extractor;
use pancore::metadata;
use pancore::report;
use pancore::resolve;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The default location of the gene content matrix within the input
/// directory.
const DEFAULT_GENE_CONTENT: &str = "PEPPAN.PEPPAN.gene_content.csv";

/// The default location of the annotation stream within the input directory.
const DEFAULT_ANNOTATION: &str = "PEPPAN.PEPPAN.gff";

/// The default location of the allele archive within the input directory.
const DEFAULT_ALLELES: &str = "PEPPAN.allele.fna";

/// The file name of the emitted metadata table.
const METADATA_FILE: &str = "core_gene_metadata.tsv";

/// The file name of the emitted key mapping table.
const MAPPING_FILE: &str = "fasta_key_mapping.tsv";

/// The subdirectory of the output directory into which representative
/// sequences are written.
const SEQUENCES_DIR: &str = "representatives";

////////////////////////////////////////////////////////////////////////////////////////
// Arguments
////////////////////////////////////////////////////////////////////////////////////////

/// Resolves pangenome clusters into single-copy core genes.
#[derive(Parser)]
struct Args {
    /// The directory containing the clustering outputs.
    input_dir: PathBuf,

    /// The directory into which results are written.
    output_dir: PathBuf,

    /// If desired, a path to the gene content matrix (overriding the default
    /// location within the input directory).
    #[arg(long)]
    gene_content: Option<PathBuf>,

    /// If desired, a path to the annotation stream (overriding the default
    /// location within the input directory).
    #[arg(long)]
    annotation: Option<PathBuf>,

    /// If desired, a path to the allele archive (overriding the default
    /// location within the input directory).
    #[arg(long)]
    alleles: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,
}

impl Args {
    /// The path to the gene content matrix.
    fn gene_content(&self) -> PathBuf {
        self.gene_content
            .clone()
            .unwrap_or_else(|| self.input_dir.join(DEFAULT_GENE_CONTENT))
    }

    /// The path to the annotation stream.
    fn annotation(&self) -> PathBuf {
        self.annotation
            .clone()
            .unwrap_or_else(|| self.input_dir.join(DEFAULT_ANNOTATION))
    }

    /// The path to the allele archive.
    fn alleles(&self) -> PathBuf {
        self.alleles
            .clone()
            .unwrap_or_else(|| self.input_dir.join(DEFAULT_ALLELES))
    }
}


////////////////////////////////////////////////////////////////////////////////////////
// Summary
////////////////////////////////////////////////////////////////////////////////////////

/// Renders the human-readable run summary.
fn summary(report: &report::Report, extraction: &extract::Stats) -> String {
    let mut builder = tabled::builder::Builder::default();

    builder.push_record(["Metric", "Value"]);
    builder.push_record([
        "Strict single-copy core clusters",
        &report.matrix_genes().to_string(),
    ]);
    builder.push_record([
        "Metadata rows",
        &format!("{} (expected {})", report.rows(), report.expected_rows()),
    ]);
    builder.push_record([
        "Distinct representative genes",
        &report.distinct_genes().to_string(),
    ]);
    builder.push_record([
        "Row names shared with the matrix",
        &format!("{} of {}", report.shared_genes(), report.metadata_genes()),
    ]);
    builder.push_record(["Anomalous clusters", &report.anomalies().len().to_string()]);
    builder.push_record(["Ambiguous clusters", &report.ambiguous().len().to_string()]);
    builder.push_record(["Sequences written", &extraction.written().to_string()]);
    builder.push_record(["Archive keys missing", &extraction.missing().to_string()]);
    builder.push_record(["Unresolved rows", &extraction.unresolved().to_string()]);

    builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string()
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

fn run(args: &Args) -> Result<()> {
    let gene_content = args.gene_content();
    let annotation = args.annotation();
    let alleles = args.alleles();

    for path in [&gene_content, &annotation, &alleles] {
        if !path.is_file() {
            bail!("missing input file: `{}`", path.display());
        }
    }

    info!("gene content: reading {}", gene_content.display());
    let matrix = Matrix::try_from_path(&gene_content).context("reading the gene content matrix")?;
    info!(
        "gene content: {} clusters across {} genomes",
        matrix.rows().len(),
        matrix.genomes().len()
    );

    let strict = matrix.strict_core();
    info!(
        "gene content: {} strict single-copy core clusters",
        strict.rows().len()
    );

    info!("annotation: reading {}", annotation.display());
    let reader =
        annotation::Reader::try_from_path(&annotation).context("opening the annotation stream")?;
    let index = resolve::Builder
        .try_build_from(reader)
        .context("indexing the annotation stream")?;

    let stats = index.stats();
    info!(
        "annotation: {} entries across {} lines ({} skipped, {} malformed)",
        stats.entries(),
        stats.lines(),
        stats.skipped(),
        stats.malformed()
    );

    if stats.dropped_orthologs() > 0 {
        warn!(
            "annotation: dropped {} unparseable ortholog references",
            stats.dropped_orthologs()
        );
    }

    let table = metadata::table(&strict, &index);

    std::fs::create_dir_all(&args.output_dir).context("creating output directory")?;

    let metadata_path = args.output_dir.join(METADATA_FILE);
    info!("metadata: writing {}", metadata_path.display());

    let file = File::create(&metadata_path).context("creating the metadata table")?;
    table
        .write(BufWriter::new(file))
        .context("writing the metadata table")?;

    info!("alleles: reading {}", alleles.display());
    let archive = archive::Index::try_from_path(&alleles).context("indexing the allele archive")?;
    info!("alleles: {} records indexed", archive.len());

    if archive.collisions() > 0 {
        warn!(
            "alleles: {} duplicate keys (first record kept)",
            archive.collisions()
        );
    }

    if archive.skipped() > 0 {
        warn!("alleles: {} undecodable records skipped", archive.skipped());
    }

    let sequences_dir = args.output_dir.join(SEQUENCES_DIR);
    info!("sequences: writing {}", sequences_dir.display());

    let extractor = Extractor::new(&archive, &sequences_dir);
    let (mapping, extraction) = extractor
        .extract(table.rows())
        .context("extracting representative sequences")?;

    info!(
        "sequences: {} written ({} archive keys missing, {} rows unresolved)",
        extraction.written(),
        extraction.missing(),
        extraction.unresolved()
    );

    let mapping_path = args.output_dir.join(MAPPING_FILE);
    info!("mapping: writing {}", mapping_path.display());

    let file = File::create(&mapping_path).context("creating the key mapping table")?;
    extract::write_mapping(&mapping, BufWriter::new(file))
        .context("writing the key mapping table")?;

    let report = report::audit(&strict, table.rows(), table.ambiguous());

    for anomaly in report.anomalies() {
        warn!(
            "audit: cluster `{}` resolved to multiple representative genes: {}",
            anomaly.local_id(),
            anomaly.genes().join(", ")
        );

        for (genome, gene) in anomaly.examples() {
            warn!("  ↳ {genome}: {gene}");
        }
    }

    if !report.ambiguous().is_empty() {
        warn!(
            "audit: {} clusters had multiple ortholog references within their representative \
             genome (first taken)",
            report.ambiguous().len()
        );
    }

    println!("{}", summary(&report, &extraction));

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    run(&args)
}
