//! Physical access to a zip-packaged OPC archive.
//!
//! Reading pulls every zip entry into an in-memory map up front so the
//! package reader can walk the relationship graph without touching the
//! archive again; writing streams parts out with Deflate compression.

use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::PackURI;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Reader over the entries of a zip-packaged OPC archive.
pub struct PhysPkgReader {
    /// Entry name (no leading slash) to decompressed content
    entries: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Open an archive from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Open an archive from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            entries.insert(file.name().to_string(), blob);
        }

        Ok(Self { entries })
    }

    /// Take the content of a part out of the cache (zero-copy move).
    pub fn take_blob(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        self.entries
            .remove(pack_uri.membername())
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Borrow the content of a part.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.entries
            .get(pack_uri.membername())
            .map(Vec::as_slice)
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.entries.contains_key(pack_uri.membername())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Writer producing a zip-packaged OPC archive in memory.
pub struct PhysPkgWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write one part with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip.start_file(pack_uri.membername(), options)?;
        self.zip.write_all(blob)?;
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut writer = PhysPkgWriter::new();
        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        writer.write(&uri, b"<presentation/>").unwrap();
        let bytes = writer.finish().unwrap();

        let reader = PhysPkgReader::from_reader(Cursor::new(bytes)).unwrap();
        assert!(reader.contains(&uri));
        assert_eq!(reader.blob_for(&uri).unwrap(), b"<presentation/>");
    }

    #[test]
    fn missing_entry_is_part_not_found() {
        let mut writer = PhysPkgWriter::new();
        let uri = PackURI::new("/a.xml").unwrap();
        writer.write(&uri, b"<a/>").unwrap();
        let bytes = writer.finish().unwrap();

        let reader = PhysPkgReader::from_reader(Cursor::new(bytes)).unwrap();
        let missing = PackURI::new("/b.xml").unwrap();
        assert!(matches!(
            reader.blob_for(&missing),
            Err(OpcError::PartNotFound(_))
        ));
    }
}
