/// The in-memory OPC package.
///
/// `OpcPackage` holds the parts and relationships of an opened package and
/// supports the mutations this crate performs on a template: removing parts
/// (slide deletion), adding parts (new slides), and rewiring relationships.
/// Serialization back to a zip goes through `PackageWriter`.
use crate::opc::archive::PhysPkgReader;
use crate::opc::constants::relationship_type;
use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::{PACKAGE_URI, PackURI};
use crate::opc::part::Part;
use crate::opc::pkgreader::PackageReader;
use crate::opc::pkgwriter::PackageWriter;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

pub struct OpcPackage {
    /// Package-level relationships
    rels: crate::opc::rel::Relationships,

    /// All parts in the package, indexed by partname
    parts: HashMap<String, Part>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self {
            rels: crate::opc::rel::Relationships::new(PACKAGE_URI.to_string()),
            parts: HashMap::new(),
        }
    }

    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::unmarshal(PackageReader::from_phys_reader(PhysPkgReader::open(path)?)?)
    }

    /// Open a package from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::unmarshal(PackageReader::from_phys_reader(PhysPkgReader::from_reader(
            reader,
        )?)?)
    }

    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.pkg_srels() {
            package.rels.add_relationship(
                srel.reltype.clone(),
                srel.target_ref.clone(),
                srel.r_id.clone(),
                srel.is_external(),
            );
        }

        for spart in pkg_reader.take_sparts() {
            let mut part = Part::new(spart.partname, spart.content_type, spart.blob);
            for srel in &spart.srels {
                part.rels_mut().add_relationship(
                    srel.reltype.clone(),
                    srel.target_ref.clone(),
                    srel.r_id.clone(),
                    srel.is_external(),
                );
            }
            package.add_part(part);
        }

        Ok(package)
    }

    /// The main document part; for a presentation, `/ppt/presentation.xml`.
    pub fn main_document_part(&self) -> Result<&Part> {
        let rel = self
            .rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?;
        self.get_part(&rel.target_partname()?)
    }

    /// Partname of the main document part.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let rel = self
            .rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?;
        rel.target_partname()
    }

    pub fn get_part(&self, partname: &PackURI) -> Result<&Part> {
        self.parts
            .get(partname.as_str())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut Part> {
        self.parts
            .get_mut(partname.as_str())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn add_part(&mut self, part: Part) {
        self.parts.insert(part.partname().to_string(), part);
    }

    /// Remove a part. The part's relationships (and therefore its `.rels`
    /// stream) go with it; relationships *to* the part from elsewhere are
    /// the caller's responsibility.
    pub fn remove_part(&mut self, partname: &PackURI) -> Result<Part> {
        self.parts
            .remove(partname.as_str())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname.as_str())
    }

    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &crate::opc::rel::Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut crate::opc::rel::Relationships {
        &mut self.rels
    }

    /// Find the next free partname for a `%d` template, e.g.
    /// `/ppt/slides/slide%d.xml`.
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        let mut n = 1u32;
        loop {
            let candidate = template.replace("%d", &n.to_string());
            if !self.parts.contains_key(&candidate) {
                return PackURI::new(candidate).map_err(OpcError::InvalidPackUri);
            }
            n += 1;
            if n > 10_000 {
                return Err(OpcError::InvalidPackUri(
                    "Too many parts, cannot find next partname".to_string(),
                ));
            }
        }
    }

    /// Serialize the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PackageWriter::write(path, self)
    }

    /// Serialize the package to zip bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::content_type as ct;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    /// Smallest package the reader will accept: content types, package
    /// rels, and a presentation part.
    fn create_minimal_pptx() -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#).unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#).unwrap();

            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#).unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn open_minimal_package() {
        let pkg = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();
        assert_eq!(pkg.part_count(), 1);

        let main = pkg.main_document_part().unwrap();
        assert_eq!(main.content_type(), ct::PML_PRESENTATION_MAIN);
    }

    #[test]
    fn save_and_reopen() {
        let pkg = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();
        let bytes = pkg.to_bytes().unwrap();

        let reopened = OpcPackage::from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(reopened.part_count(), 1);
        assert!(reopened.main_document_part().is_ok());
    }

    #[test]
    fn remove_part_drops_it_from_serialization() {
        let mut pkg = OpcPackage::from_reader(Cursor::new(create_minimal_pptx())).unwrap();
        let partname = pkg.main_document_partname().unwrap();
        pkg.remove_part(&partname).unwrap();
        assert_eq!(pkg.part_count(), 0);

        let bytes = pkg.to_bytes().unwrap();
        // The part is gone from both the archive and the content types map.
        let reader = PhysPkgReader::from_reader(Cursor::new(bytes)).unwrap();
        assert!(!reader.contains(&partname));
    }

    #[test]
    fn next_partname_skips_existing() {
        let mut pkg = OpcPackage::new();
        pkg.add_part(Part::new(
            PackURI::new("/ppt/slides/slide1.xml").unwrap(),
            ct::PML_SLIDE.to_string(),
            Vec::new(),
        ));
        let next = pkg.next_partname("/ppt/slides/slide%d.xml").unwrap();
        assert_eq!(next.as_str(), "/ppt/slides/slide2.xml");
    }
}
