//! A row of the gene presence/absence matrix.

use crate::content::Cell;

/// A row of the gene presence/absence matrix.
///
/// A record pairs the row name (the matrix's leading `Gene` column) with one
/// [`Cell`] per genome, in header order. The genome identifiers themselves live
/// on the containing [`Matrix`](crate::content::Matrix); cells are matched to
/// genomes by position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The row name.
    name: String,

    /// The cells, one per genome in header order.
    cells: Vec<Cell>,
}

impl Record {
    /// Creates a new record.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::content::Cell;
    /// use pancore::content::record::Record;
    ///
    /// let record = Record::new("g1", vec![Cell::from("A1"), Cell::from("-")]);
    /// assert_eq!(record.name(), "g1");
    /// assert_eq!(record.cells().len(), 2);
    /// ```
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Record {
            name: name.into(),
            cells,
        }
    }

    /// Gets the row name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the cells, in header order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns whether every genome contributed exactly one gene call.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::content::Cell;
    /// use pancore::content::record::Record;
    ///
    /// let record = Record::new("g1", vec![Cell::from("A1"), Cell::from("A1")]);
    /// assert!(record.is_strict_single_copy());
    ///
    /// let record = Record::new("g2", vec![Cell::from("A2"), Cell::from("a;b")]);
    /// assert!(!record.is_strict_single_copy());
    /// ```
    pub fn is_strict_single_copy(&self) -> bool {
        self.cells.iter().all(Cell::is_single_copy)
    }
}
