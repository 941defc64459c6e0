//! Composite lookup keys for the sequence archive.

/// The delimiter between the genome and the gene.
pub const GENOME_DELIMITER: char = ':';

/// The delimiter between the gene and the allele.
pub const ALLELE_DELIMITER: char = '_';

/// A composite lookup key for the sequence archive.
///
/// Archive headers follow the `genome:gene` convention, with an allele
/// suffix (`genome:gene_allele`) when the annotation source distinguishes
/// alleles. The key mirrors that convention so that it can be composed from
/// a resolved ortholog reference and compared against header tokens
/// verbatim.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    /// The genome.
    genome: String,

    /// The gene.
    gene: String,

    /// The allele, if the annotation source encodes one.
    allele: Option<String>,
}

impl Key {
    /// Creates a new archive key.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::archive::Key;
    ///
    /// let key = Key::new("X", "gA", None);
    /// assert_eq!(key.to_string(), "X:gA");
    ///
    /// let key = Key::new("X", "gA", Some(String::from("1")));
    /// assert_eq!(key.to_string(), "X:gA_1");
    /// ```
    pub fn new<G, E>(genome: G, gene: E, allele: Option<String>) -> Self
    where
        G: Into<String>,
        E: Into<String>,
    {
        Self {
            genome: genome.into(),
            gene: gene.into(),
            allele,
        }
    }

    /// Gets the genome.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::archive::Key;
    ///
    /// let key = Key::new("X", "gA", None);
    /// assert_eq!(key.genome(), "X");
    /// ```
    pub fn genome(&self) -> &str {
        &self.genome
    }

    /// Gets the gene.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::archive::Key;
    ///
    /// let key = Key::new("X", "gA", None);
    /// assert_eq!(key.gene(), "gA");
    /// ```
    pub fn gene(&self) -> &str {
        &self.gene
    }

    /// Gets the allele, if one was encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use pancore::archive::Key;
    ///
    /// let key = Key::new("X", "gA", Some(String::from("1")));
    /// assert_eq!(key.allele(), Some("1"));
    /// ```
    pub fn allele(&self) -> Option<&str> {
        self.allele.as_deref()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.genome, GENOME_DELIMITER, self.gene)?;

        if let Some(allele) = &self.allele {
            write!(f, "{}{}", ALLELE_DELIMITER, allele)?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_display_without_an_allele() {
        let key = Key::new("GCF_000005845", "dnaA", None);
        assert_eq!(key.to_string(), "GCF_000005845:dnaA");
    }

    #[test]
    pub fn test_display_with_an_allele() {
        let key = Key::new("GCF_000005845", "dnaA", Some(String::from("2")));
        assert_eq!(key.to_string(), "GCF_000005845:dnaA_2");
    }
}
