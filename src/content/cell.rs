//! A cell within the gene presence/absence matrix.

/// The marker for an absent cluster.
pub const ABSENT: &str = "-";

/// The delimiter between cluster-local gene ids within a multi-copy cell.
pub const MULTIPLICITY_DELIMITER: char = ';';

/// A cell within the gene presence/absence matrix.
///
/// A cell records how many gene calls a genome contributed to a cluster: none
/// (empty or [`ABSENT`]), exactly one, or several joined by
/// [`MULTIPLICITY_DELIMITER`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    /// The cluster is absent from the genome.
    Absent,

    /// The genome contributed exactly one gene call, with the contained
    /// cluster-local gene id.
    Present(String),

    /// The genome contributed multiple gene calls (a multi-copy cluster).
    Multiple(Vec<String>),
}

impl Cell {
    /// Returns whether the cell holds exactly one gene call.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::content::Cell;
    ///
    /// assert!(Cell::from("PEPPAN_g_1").is_single_copy());
    /// assert!(!Cell::from("-").is_single_copy());
    /// assert!(!Cell::from("PEPPAN_g_1;PEPPAN_g_2").is_single_copy());
    /// ```
    pub fn is_single_copy(&self) -> bool {
        matches!(self, Cell::Present(_))
    }

    /// Gets the cluster-local gene id when the cell holds exactly one.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::content::Cell;
    ///
    /// assert_eq!(Cell::from("PEPPAN_g_1").value(), Some("PEPPAN_g_1"));
    /// assert_eq!(Cell::from("").value(), None);
    /// ```
    pub fn value(&self) -> Option<&str> {
        match self {
            Cell::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() || s == ABSENT {
            Cell::Absent
        } else if s.contains(MULTIPLICITY_DELIMITER) {
            Cell::Multiple(
                s.split(MULTIPLICITY_DELIMITER)
                    .map(String::from)
                    .collect(),
            )
        } else {
            Cell::Present(s.into())
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Absent => write!(f, "{}", ABSENT),
            Cell::Present(value) => write!(f, "{}", value),
            Cell::Multiple(values) => {
                write!(
                    f,
                    "{}",
                    values
                        .iter()
                        .map(|value| value.as_str())
                        .collect::<Vec<_>>()
                        .join(";")
                )
            }
        }
    }
}
