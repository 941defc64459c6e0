//! Cluster identifiers assigned by the pangenome clustering step.

use std::str::FromStr;

/// The literal prefix for a cluster identifier.
pub const PREFIX: &str = "PEPPAN_g_";

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a cluster identifier.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid prefix.
    InvalidPrefix(String),

    /// An invalid numeric suffix.
    InvalidSuffix(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidPrefix(value) => {
                write!(f, "invalid prefix: expected \"{}\", found \"{}\"", PREFIX, value)
            }
            ParseError::InvalidSuffix(suffix) => {
                write!(
                    f,
                    "invalid suffix: expected one or more digits, found \"{}\"",
                    suffix
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Identifiers
////////////////////////////////////////////////////////////////////////////////////////

/// A cluster identifier.
///
/// Cluster identifiers are assigned by the clustering step and key three
/// otherwise unrelated inputs: cells of the gene presence/absence matrix, the
/// `ID` attribute of annotation features, and (indirectly, through ortholog
/// cross-references) the allele sequence archive.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id(String);

impl Id {
    /// Gets the inner representation of the identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::cluster;
    ///
    /// let id = "PEPPAN_g_00123".parse::<cluster::Id>()?;
    /// assert_eq!(id.inner(), "PEPPAN_g_00123");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn inner(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Id {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suffix = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| ParseError::InvalidPrefix(s.into()))?;

        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidSuffix(suffix.into()));
        }

        Ok(Id(s.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_valid_id() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let id = "PEPPAN_g_1".parse::<Id>()?;
        assert_eq!(id.inner(), "PEPPAN_g_1");
        assert_eq!(id.to_string(), "PEPPAN_g_1");
        Ok(())
    }

    #[test]
    pub fn test_invalid_prefix() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = "contig_1".parse::<Id>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid prefix: expected \"PEPPAN_g_\", found \"contig_1\""
        );
        Ok(())
    }

    #[test]
    pub fn test_missing_suffix() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = "PEPPAN_g_".parse::<Id>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid suffix: expected one or more digits, found \"\""
        );
        Ok(())
    }

    #[test]
    pub fn test_nonnumeric_suffix() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = "PEPPAN_g_12a".parse::<Id>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid suffix: expected one or more digits, found \"12a\""
        );
        Ok(())
    }

    #[test]
    pub fn test_ids_are_ordered_by_inner_value() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let a = "PEPPAN_g_00001".parse::<Id>()?;
        let b = "PEPPAN_g_00002".parse::<Id>()?;
        assert!(a < b);
        Ok(())
    }
}
