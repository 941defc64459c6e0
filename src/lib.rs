//! `pancore` is a crate for reconciling the outputs of a pangenome
//! clustering run into a canonical set of strict single-copy core genes,
//! each resolved to one representative sequence per genome.
//!
//! A clustering run leaves behind three files that describe the same genes
//! under three different naming conventions:
//!
//! - a **gene content matrix**, one row per cluster and one column per
//!   genome, whose cells hold cluster identifiers;
//! - an **annotation stream** of tab-separated feature records whose
//!   attributes tie clusters back to concrete gene calls through ortholog
//!   group references; and
//! - a flat **allele archive** of sequence records addressed by composite
//!   `genome:gene[_allele]` header tokens.
//!
//! None of the three agree on keys, so the work of this crate is identity
//! resolution: correlate them into one consistent mapping, pick a
//! deterministic representative sequence per cluster, and audit the result.
//!
//! ## Filtering and resolving
//!
//! [`content::Matrix`] reads the matrix and
//! [`content::Matrix::strict_core()`] keeps the rows present exactly once in
//! every genome. Independently, [`annotation::Reader`] streams the
//! annotation file and [`resolve::Builder`] folds it into a
//! [`resolve::Index`]: each cluster's ortholog references in file order,
//! plus the first genome seen for that cluster. That first genome is the
//! cluster's representative genome for the rest of the run. Later
//! observations never overwrite it, so re-running over the same inputs
//! reproduces the same choices.
//!
//! [`metadata::table()`] joins the two, emitting one row per (gene, genome)
//! pair of the filtered matrix. Clusters that never resolve are carried as
//! sentinel rows for later triage rather than failing the run.
//!
//! ```
//! use pancore::content::Matrix;
//! use pancore::resolve::Builder;
//!
//! let data = b"Gene,X,Y\ncoreA,PEPPAN_g_1,PEPPAN_g_1\naccB,PEPPAN_g_2,-\n";
//! let strict = Matrix::try_from_reader(&data[..])?.strict_core();
//! assert_eq!(strict.rows().len(), 1);
//!
//! let annotation =
//!     b"X:contig1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1;inference=ortholog_group:X:gA:1,Y:gB:2";
//! let reader = pancore::annotation::Reader::new(&annotation[..]);
//! let index = Builder::default().try_build_from(reader)?;
//!
//! let table = pancore::metadata::table(&strict, &index);
//! assert_eq!(table.rows().len(), 2);
//!
//! let row = &table.rows()[0];
//! assert_eq!(row.representative_genome(), Some("X"));
//! assert_eq!(row.representative_gene(), Some("gA"));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extracting sequences
//!
//! [`archive::Index`] indexes the allele archive by its header tokens,
//! keeping the first record seen per key. Duplicate keys are expected in
//! archives of this provenance and are counted, not raised.
//!
//! ```
//! use pancore::archive::Index;
//! use pancore::archive::Key;
//!
//! let index = Index::try_from_reader(&b">X:gA_1\nATGACGT\n>X:gA_1\nAAAA\n"[..])?;
//!
//! assert_eq!(index.len(), 1);
//! assert_eq!(index.collisions(), 1);
//!
//! let record = index.get(&Key::new("X", "gA", Some(String::from("1")))).unwrap();
//! assert_eq!(record.sequence().len(), 7);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`extract::Extractor`] then composes the archive key for each resolved
//! metadata row, writes one renamed sequence file per hit, and records the
//! key mapping alongside. Missing keys increment a counter and the run
//! carries on: partial archives are a reportable condition, not a fatal
//! one. Finally, [`report::audit()`] recomputes cluster cardinality and
//! representative-gene uniqueness from the emitted rows and reports any
//! divergence without mutating prior outputs.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod annotation;
pub mod archive;
pub mod cluster;
pub mod content;
pub mod extract;
mod input;
pub mod metadata;
pub mod report;
pub mod resolve;

pub use annotation::Line;

pub use self::annotation::Reader;
