//! The per-gene annotation stream paired with a gene content matrix.
//!
//! Each feature line in the stream describes one predicted gene. Lines whose
//! attributes carry both a cluster identifier and an ortholog group are the
//! interesting ones: they tie a cluster back to the concrete gene calls it was
//! built from. Everything else is passed over without comment.

pub mod attributes;
pub mod entry;
pub mod feature;
pub mod line;
pub mod ortholog;
pub mod reader;

pub use attributes::Attributes;
pub use entry::Entry;
pub use line::Line;
pub use ortholog::Ortholog;
pub use reader::Reader;
