//! Opening of input files shared across the pipeline.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// The extension treated as gzip-compressed input.
const GZIP_EXTENSION: &str = "gz";

/// Opens a file for buffered reading.
///
/// Files whose extension is `gz` are decompressed on the fly. A multi-member
/// decoder is used so that block-compressed inputs read through to the end
/// rather than stopping at the first member boundary.
pub(crate) fn open<P>(path: P) -> io::Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;

    match path.extension() {
        Some(extension) if extension == GZIP_EXTENSION => {
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
        }
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Read as _;
    use std::io::Write as _;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_open_plain_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("input")?;
        let path = dir.path().join("matrix.csv");
        fs::write(&path, b"Gene,X\n")?;

        let mut reader = open(&path)?;
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        assert_eq!(contents, "Gene,X\n");

        Ok(())
    }

    #[test]
    fn test_open_gzipped_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("input")?;
        let path = dir.path().join("matrix.csv.gz");

        let mut encoder = GzEncoder::new(File::create(&path)?, Compression::default());
        encoder.write_all(b"Gene,X\n")?;
        encoder.finish()?;

        let mut reader = open(&path)?;
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        assert_eq!(contents, "Gene,X\n");

        Ok(())
    }
}
