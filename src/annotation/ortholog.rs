//! Ortholog cross-references embedded in feature attributes.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// The delimiter between ortholog references in a cross-reference list.
pub const REFERENCE_DELIMITER: char = ',';

/// The delimiter between the components of an ortholog reference.
pub const COMPONENT_DELIMITER: char = ':';

/// The minimum number of components in an ortholog reference.
pub const MIN_COMPONENTS: usize = 2;

/// Matches a parenthetical suffix, e.g. the `(t)` in `gene_0042(t)`.
static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Matches a normalized allele number at the start of a component.
static ALLELE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^t?\d+").unwrap());

/// Strips parenthetical suffixes from a gene, allele, or locus-tag component.
pub(crate) fn strip_parenthetical(s: &str) -> String {
    PARENTHETICAL.replace_all(s, "").into_owned()
}

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing an ortholog reference.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of components in the reference.
    IncorrectNumberOfComponents(usize),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfComponents(components) => write!(
                f,
                "invalid number of components in ortholog reference: expected at least {} \
                 components, found {} components",
                MIN_COMPONENTS, components
            ),
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Orthologs
////////////////////////////////////////////////////////////////////////////////////////

/// An ortholog reference: one `genome:gene[:allele]` tuple from a
/// cross-reference list.
///
/// The gene component is stripped of parenthetical suffixes. The allele
/// component, when present, is stripped of parenthetical suffixes and then
/// normalized to its leading allele number (`t?\d+`); components that carry no
/// such number yield no allele. Components beyond the third are ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ortholog {
    /// The genome carrying the orthologous gene call.
    genome: String,

    /// The gene identifier.
    gene: String,

    /// The normalized allele number, when one is encoded.
    allele: Option<String>,
}

impl Ortholog {
    /// Gets the genome.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::ortholog::Ortholog;
    ///
    /// let ortholog = "X:gene_0001:1".parse::<Ortholog>()?;
    /// assert_eq!(ortholog.genome(), "X");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn genome(&self) -> &str {
        &self.genome
    }

    /// Gets the gene identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::ortholog::Ortholog;
    ///
    /// let ortholog = "X:gene_0042(t):2".parse::<Ortholog>()?;
    /// assert_eq!(ortholog.gene(), "gene_0042");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Gets the allele number, when one is encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::annotation::ortholog::Ortholog;
    ///
    /// let ortholog = "X:gene_0001:2(95.5%)".parse::<Ortholog>()?;
    /// assert_eq!(ortholog.allele(), Some("2"));
    ///
    /// let ortholog = "X:gene_0001".parse::<Ortholog>()?;
    /// assert_eq!(ortholog.allele(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn allele(&self) -> Option<&str> {
        self.allele.as_deref()
    }
}

impl FromStr for Ortholog {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s.split(COMPONENT_DELIMITER).collect::<Vec<_>>();
        if components.len() < MIN_COMPONENTS {
            return Err(ParseError::IncorrectNumberOfComponents(components.len()));
        }

        let gene = strip_parenthetical(components[1]);
        let allele = components.get(2).and_then(|component| {
            let component = strip_parenthetical(component);
            ALLELE
                .find(&component)
                .map(|number| number.as_str().to_string())
        });

        Ok(Ortholog {
            genome: components[0].into(),
            gene,
            allele,
        })
    }
}

impl std::fmt::Display for Ortholog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.genome, COMPONENT_DELIMITER, self.gene)?;

        if let Some(allele) = &self.allele {
            write!(f, "{}{}", COMPONENT_DELIMITER, allele)?;
        }

        Ok(())
    }
}

/// Parses a comma-separated cross-reference list, returning the references
/// that parsed and the count of malformed references that were dropped.
pub(crate) fn parse_list(s: &str) -> (Vec<Ortholog>, usize) {
    let mut orthologs = Vec::new();
    let mut dropped = 0;

    for reference in s.split(REFERENCE_DELIMITER) {
        match reference.parse::<Ortholog>() {
            Ok(ortholog) => orthologs.push(ortholog),
            Err(_) => dropped += 1,
        }
    }

    (orthologs, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_reference_without_allele() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ortholog = "GCA_000012345:gene_0001".parse::<Ortholog>()?;

        assert_eq!(ortholog.genome(), "GCA_000012345");
        assert_eq!(ortholog.gene(), "gene_0001");
        assert_eq!(ortholog.allele(), None);

        Ok(())
    }

    #[test]
    pub fn test_reference_with_numeric_allele() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ortholog = "X:gene_0001:12".parse::<Ortholog>()?;
        assert_eq!(ortholog.allele(), Some("12"));
        Ok(())
    }

    #[test]
    pub fn test_reference_with_truncated_allele() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ortholog = "X:gene_0001:t7".parse::<Ortholog>()?;
        assert_eq!(ortholog.allele(), Some("t7"));
        Ok(())
    }

    #[test]
    pub fn test_parenthetical_suffixes_are_stripped() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ortholog = "GCA_000067890:gene_0042(t):2(95.5%)".parse::<Ortholog>()?;

        assert_eq!(ortholog.gene(), "gene_0042");
        assert_eq!(ortholog.allele(), Some("2"));

        Ok(())
    }

    #[test]
    pub fn test_unrecognized_allele_component_yields_none()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ortholog = "X:gene_0001:x".parse::<Ortholog>()?;
        assert_eq!(ortholog.allele(), None);
        Ok(())
    }

    #[test]
    pub fn test_extra_components_are_ignored() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ortholog = "X:gene_0001:1:extra".parse::<Ortholog>()?;

        assert_eq!(ortholog.gene(), "gene_0001");
        assert_eq!(ortholog.allele(), Some("1"));

        Ok(())
    }

    #[test]
    pub fn test_too_few_components() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = "gene_0001".parse::<Ortholog>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of components in ortholog reference: expected at least 2 components, \
             found 1 components"
        );
        Ok(())
    }

    #[test]
    pub fn test_parse_list_drops_malformed_references() {
        let (orthologs, dropped) = parse_list("X:g1:1,bad,Y:g2");

        assert_eq!(orthologs.len(), 2);
        assert_eq!(orthologs[0].genome(), "X");
        assert_eq!(orthologs[1].genome(), "Y");
        assert_eq!(dropped, 1);
    }

    #[test]
    pub fn test_strip_parenthetical() {
        assert_eq!(strip_parenthetical("b0001(v2)"), "b0001");
        assert_eq!(strip_parenthetical("plain"), "plain");
        assert_eq!(strip_parenthetical("a(x)b(y)"), "ab");
    }

    #[test]
    pub fn test_display_round_trips_normalized_references()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let ortholog = "X:gene_0001:1".parse::<Ortholog>()?;
        assert_eq!(ortholog.to_string(), "X:gene_0001:1");

        let ortholog = "X:gene_0001".parse::<Ortholog>()?;
        assert_eq!(ortholog.to_string(), "X:gene_0001");

        Ok(())
    }
}
