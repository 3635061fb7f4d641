//! Package writer for OPC packages.
//!
//! Serializes an in-memory package back to a zip: `[Content_Types].xml` is
//! regenerated from the parts actually present, then the package `.rels`,
//! then every part and its `.rels`. Parts removed from the package thereby
//! vanish from the content-types map without bookkeeping.

use crate::opc::constants::content_type as ct;
use crate::opc::error::{OpcError, Result};
use crate::opc::archive::PhysPkgWriter;
use crate::opc::package::OpcPackage;
use crate::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use std::collections::HashMap;
use std::path::Path;

pub struct PackageWriter;

impl PackageWriter {
    /// Write a package to a file. The write is not atomic: an interrupted
    /// save can leave a truncated file at `path`.
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize a package to zip bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys = PhysPkgWriter::new();

        Self::write_content_types(&mut phys, package)?;
        Self::write_pkg_rels(&mut phys, package)?;
        Self::write_parts(&mut phys, package)?;

        phys.finish()
    }

    fn write_content_types(phys: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let cti = ContentTypesItem::from_package(package);
        let uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        phys.write(&uri, cti.to_xml().as_bytes())
    }

    fn write_pkg_rels(phys: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let rels_uri = package_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        phys.write(&rels_uri, package.rels().to_xml().as_bytes())
    }

    fn write_parts(phys: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        // Stable part order keeps output byte-for-byte reproducible.
        let mut parts: Vec<_> = package.iter_parts().collect();
        parts.sort_by(|a, b| a.partname().as_str().cmp(b.partname().as_str()));

        for part in parts {
            phys.write(part.partname(), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = part
                    .partname()
                    .rels_uri()
                    .map_err(OpcError::InvalidPackUri)?;
                phys.write(&rels_uri, part.rels().to_xml().as_bytes())?;
            }
        }

        Ok(())
    }
}

/// Builder for `[Content_Types].xml` Default/Override elements.
struct ContentTypesItem {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());
        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext().to_lowercase();
        if Self::is_default_content_type(&ext, content_type) {
            self.defaults.insert(ext, content_type.to_string());
        } else {
            self.overrides
                .insert(partname.to_string(), content_type.to_string());
        }
    }

    fn is_default_content_type(ext: &str, content_type: &str) -> bool {
        matches!(
            (ext, content_type),
            ("rels", ct::OPC_RELATIONSHIPS)
                | ("xml", ct::XML)
                | ("bmp", ct::BMP)
                | ("gif", ct::GIF)
                | ("jpg", ct::JPEG)
                | ("jpeg", ct::JPEG)
                | ("png", ct::PNG)
                | ("tiff", ct::TIFF)
                | ("emf", ct::X_EMF)
                | ("wmf", ct::X_WMF)
        )
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push('\n');

        let mut exts: Vec<_> = self.defaults.keys().collect();
        exts.sort();
        for ext in exts {
            xml.push_str(&format!(
                r#"  <Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(&self.defaults[ext])
            ));
            xml.push('\n');
        }

        let mut partnames: Vec<_> = self.overrides.keys().collect();
        partnames.sort();
        for partname in partnames {
            xml.push_str(&format!(
                r#"  <Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(&self.overrides[partname])
            ));
            xml.push('\n');
        }

        xml.push_str("</Types>");
        xml
    }
}

#[inline]
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_xml_shape() {
        let mut cti = ContentTypesItem::new();
        cti.defaults
            .insert("png".to_string(), "image/png".to_string());
        cti.overrides.insert(
            "/ppt/presentation.xml".to_string(),
            ct::PML_PRESENTATION_MAIN.to_string(),
        );

        let xml = cti.to_xml();
        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Override PartName="/ppt/presentation.xml""#));
    }

    #[test]
    fn slide_parts_are_overrides() {
        let mut cti = ContentTypesItem::new();
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        cti.add_content_type(&slide, ct::PML_SLIDE);

        // xml extension default stays generic; the slide gets an Override
        assert_eq!(cti.defaults.get("xml").map(String::as_str), Some(ct::XML));
        assert_eq!(
            cti.overrides.get("/ppt/slides/slide1.xml").map(String::as_str),
            Some(ct::PML_SLIDE)
        );
    }
}
