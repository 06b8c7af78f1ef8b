//! OPC Package handling
//!
//! A `Package` wraps a ZIP-based OPC container (.pptx) and gives random-access
//! byte reads of its parts by normalized path, the way the reader pipeline's
//! resource graph (C5) needs them.

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use zip::ZipArchive;

use crate::exc::{PptxError, Result};

enum Source {
    File(ZipArchive<std::io::BufReader<fs::File>>),
    Memory(ZipArchive<Cursor<Vec<u8>>>),
}

/// Represents an OPC package (ZIP file) opened for reading.
pub struct Package {
    source: Source,
    /// Lower-cased member name -> actual member name, so lookups tolerate
    /// the occasional case mismatch some producers leave in ZIP entries.
    names: HashMap<String, String>,
}

fn normalize(path: &str) -> String {
    path.trim_start_matches('/').replace('\\', "/")
}

impl Package {
    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let archive = ZipArchive::new(reader).map_err(|e| PptxError::Zip(e.to_string()))?;
        let names = index_names(&archive);
        Ok(Package {
            source: Source::File(archive),
            names,
        })
    }

    /// Open a package from an in-memory byte buffer.
    pub fn open_bytes(bytes: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(bytes.to_vec());
        let archive = ZipArchive::new(cursor).map_err(|e| PptxError::Zip(e.to_string()))?;
        let names = index_names(&archive);
        Ok(Package {
            source: Source::Memory(archive),
            names,
        })
    }

    /// Open a package from a reader that owns its bytes in memory.
    /// (Streaming `Read`-only sources are first buffered, since `ZipArchive`
    /// requires `Seek`.)
    pub fn open_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::open_bytes(&bytes)
    }

    /// Whether a part exists at the given path.
    pub fn exists(&self, path: &str) -> bool {
        self.names.contains_key(&normalize(path).to_lowercase())
    }

    /// Read the raw bytes of a part by its package-relative path
    /// (e.g. `"ppt/slides/slide1.xml"`).
    pub fn read(&mut self, path: &str) -> Result<Vec<u8>> {
        let key = normalize(path).to_lowercase();
        let actual = self
            .names
            .get(&key)
            .cloned()
            .ok_or_else(|| PptxError::NotFound(path.to_string()))?;
        let mut buf = Vec::new();
        match &mut self.source {
            Source::File(archive) => {
                let mut f = archive
                    .by_name(&actual)
                    .map_err(|_| PptxError::NotFound(path.to_string()))?;
                std::io::Read::read_to_end(&mut f, &mut buf)?;
            }
            Source::Memory(archive) => {
                let mut f = archive
                    .by_name(&actual)
                    .map_err(|_| PptxError::NotFound(path.to_string()))?;
                std::io::Read::read_to_end(&mut f, &mut buf)?;
            }
        }
        Ok(buf)
    }

    /// Read a part and return it as a UTF-8 string (lossy).
    pub fn read_string(&mut self, path: &str) -> Result<String> {
        let bytes = self.read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

}

fn index_names<R: std::io::Read + std::io::Seek>(archive: &ZipArchive<R>) -> HashMap<String, String> {
    let mut names = HashMap::with_capacity(archive.len());
    for name in archive.file_names() {
        names.insert(name.to_lowercase(), name.to_string());
    }
    names
}
