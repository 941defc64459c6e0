//! A line within the annotation stream.

use std::str::FromStr;

use crate::annotation::feature;

/// The prefix for a comment or directive line.
pub const COMMENT_PREFIX: char = '#';

/// An error associated with parsing a line of the annotation stream.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid feature record.
    InvalidFeatureRecord(feature::ParseError, String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFeatureRecord(err, line) => {
                write!(f, "invalid feature record: {}\n\nline: {}", err, line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A line within the annotation stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty line.
    Empty,

    /// A comment or directive line, kept verbatim.
    Comment(String),

    /// A feature line.
    Feature(feature::Record),
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Empty => write!(f, ""),
            Line::Comment(line) => write!(f, "{}", line),
            Line::Feature(record) => write!(f, "{}", record),
        }
    }
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            Ok(Self::Empty)
        } else if s.starts_with(COMMENT_PREFIX) {
            Ok(Self::Comment(s.into()))
        } else {
            s.parse::<feature::Record>()
                .map(Line::Feature)
                .map_err(|e| match e {
                    feature::Error::Parse(err) => ParseError::InvalidFeatureRecord(err, s.into()),
                })
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    pub fn test_empty_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let line = "".parse::<Line>()?;
        assert_eq!(line, Line::Empty);
        Ok(())
    }

    #[test]
    pub fn test_comment_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let line = "##gff-version 3".parse::<Line>()?;
        assert!(matches!(line, Line::Comment(_)));
        assert_eq!(line.to_string(), "##gff-version 3");
        Ok(())
    }

    #[test]
    pub fn test_valid_feature_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let line = "X\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1".parse::<Line>()?;
        assert!(matches!(line, Line::Feature(_)));
        Ok(())
    }

    #[test]
    pub fn test_invalid_feature_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = "a\tb\tc".parse::<Line>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid feature record: invalid number of fields in feature: expected 9 fields, \
             found 3 fields\n\nline: a\tb\tc"
        );
        Ok(())
    }
}
