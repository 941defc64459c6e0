//! An annotation stream reader.

use std::io::BufRead;
use std::io::{self};
use std::iter;
use std::path::Path;

use crate::annotation::Line;
use crate::annotation::line;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line error.
    Line(line::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Line(err) => write!(f, "line error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// An annotation stream reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates an annotation stream reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1";
    /// let cursor = io::Cursor::new(data);
    ///
    /// let reader = pancore::annotation::Reader::new(cursor);
    /// assert_eq!(reader.inner().position(), 0);
    /// ```
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Gets a mutable reference to the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Read;
    ///
    /// let data = b"X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1";
    /// let mut reader = pancore::annotation::Reader::new(&data[..]);
    /// let mut buffer = vec![0; data.len()];
    ///
    /// reader.inner_mut().read_exact(&mut buffer).unwrap();
    /// assert_eq!(buffer, data[..]);
    /// ```
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Consumes self and returns the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::BufRead;
    ///
    /// let data = b"##gff-version 3\nX:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1";
    /// let reader = pancore::annotation::Reader::new(&data[..]);
    /// let mut lines = reader.into_inner().lines().map(|line| line.unwrap());
    ///
    /// assert_eq!(lines.next(), Some(String::from("##gff-version 3")));
    /// assert_eq!(
    ///     lines.next(),
    ///     Some(String::from("X:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1"))
    /// );
    /// assert_eq!(lines.next(), None);
    /// ```
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"##note\nX\tP\tCDS\t1\t9\t.\t+\t0\tID=g1";
    /// let mut reader = pancore::annotation::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 7);
    /// assert_eq!(buffer, "##note");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 23);
    /// assert_eq!(buffer, "X\tP\tCDS\t1\t9\t.\t+\t0\tID=g1");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(self.inner_mut(), buffer)
    }

    /// Attempts to read a [`Line`] from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// use pancore::annotation::Line;
    ///
    /// let data = b"##gff-version 3\n\nX:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1";
    /// let mut reader = pancore::annotation::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// assert!(matches!(
    ///     reader.read_line(&mut buffer)?,
    ///     Some(Line::Comment(_))
    /// ));
    /// assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Empty)));
    /// assert!(matches!(
    ///     reader.read_line(&mut buffer)?,
    ///     Some(Line::Feature(_))
    /// ));
    /// assert!(matches!(reader.read_line(&mut buffer)?, None));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self, buffer: &mut String) -> Result<Option<Line>, Error> {
        let read = self.read_line_raw(buffer).map_err(Error::Io)?;

        match read {
            0 => Ok(None),
            _ => {
                let line = buffer.parse::<Line>().map_err(Error::Line)?;
                Ok(Some(line))
            }
        }
    }

    /// Returns an iterator over the `Line`s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\nX:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1";
    /// let mut reader = pancore::annotation::Reader::new(&data[..]);
    ///
    /// let lines = reader.lines().collect::<Vec<_>>();
    /// assert_eq!(lines.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn lines(&mut self) -> impl Iterator<Item = io::Result<Line>> + '_ {
        let mut buffer = String::new();

        iter::from_fn(move || {
            buffer.clear();

            match self.read_line_raw(&mut buffer) {
                Ok(0) => None,
                Ok(_) => Some(
                    buffer
                        .parse()
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
                ),
                Err(e) => Some(Err(e)),
            }
        })
    }
}

impl Reader<Box<dyn BufRead>> {
    /// Attempts to open an annotation stream reader from a path.
    ///
    /// Files whose extension is `gz` are decompressed on the fly.
    pub fn try_from_path<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        crate::input::open(path).map(Self::from).map_err(Error::Io)
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

/// Reads a line from a buffered reader.
///
/// This method is copied almost directly from noodles-gtf. I repurposed it
/// because it captures pretty much exactly what I need to do for this reader.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_read_line_classifies_each_line() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"##gff-version 3\nX:1\tPEPPAN\tCDS\t1\t90\t.\t+\t0\tID=PEPPAN_g_1\n\n";
        let mut reader = Reader::new(&data[..]);

        let mut buffer = String::new();
        assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Comment(_))));
        assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Feature(_))));
        assert!(matches!(reader.read_line(&mut buffer)?, Some(Line::Empty)));
        assert!(matches!(reader.read_line(&mut buffer)?, None));

        Ok(())
    }

    #[test]
    fn test_read_line_surfaces_malformed_features() {
        let data = b"X:1\tPEPPAN\tCDS\n";
        let mut reader = Reader::new(&data[..]);

        let mut buffer = String::new();
        let err = reader.read_line(&mut buffer).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line error: invalid feature record: invalid number of fields in feature: expected 9 \
             fields, found 3 fields\n\nline: X:1\tPEPPAN\tCDS"
        );
    }
}
