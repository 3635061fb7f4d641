use crate::opc::packuri::PackURI;
use crate::opc::rel::Relationships;
/// A part within an OPC package.
///
/// Parts are the unit of content in a package: a partname, a content type,
/// the raw bytes, and the part's outgoing relationships. The presentation
/// layer treats part content as opaque bytes except where it patches XML in
/// place (the slide-ID list of the presentation part), so one concrete
/// struct covers every part in the package.
use memchr::memmem;

#[derive(Debug)]
pub struct Part {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl Part {
    pub fn new(partname: PackURI, content_type: String, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type,
            blob,
            rels,
        }
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Replace the part content. Used when a part's XML is rewritten
    /// (e.g. re-splicing the slide-ID list into presentation.xml).
    pub fn set_blob(&mut self, blob: Vec<u8>) {
        self.blob = blob;
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// Add or reuse a relationship to another part, returning its rId.
    /// `target_ref` is stored as given (relative to this part's base URI).
    pub fn relate_to(&mut self, target_ref: &str, reltype: &str) -> String {
        self.rels.get_or_add(reltype, target_ref).r_id().to_string()
    }

    /// Count `r:id="<rId>"` references inside the part content.
    pub fn rel_ref_count(&self, r_id: &str) -> usize {
        let pattern = format!(r#"r:id="{}""#, r_id);
        memmem::Finder::new(pattern.as_bytes())
            .find_iter(&self.blob)
            .count()
    }
}
