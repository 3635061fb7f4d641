/// The PackURI value type: a partname within an OPC package.
///
/// Partnames always begin with a forward slash and use forward slashes as
/// separators ("/ppt/slides/slide1.xml"). The accessors here cover what the
/// presentation layer needs: splitting a partname into directory and
/// filename, deriving the matching `.rels` partname, computing the relative
/// reference used as a relationship target, and reading the numeric suffix
/// of tuple partnames.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    uri: String,
}

impl PackURI {
    /// Create a new PackURI. The URI must begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Resolve a relative reference (e.g. "../slideLayouts/slideLayout1.xml")
    /// against a base URI (e.g. "/ppt/slides") into an absolute partname.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        // Package-absolute targets resolve to themselves.
        if relative_ref.starts_with('/') {
            return Self::new(relative_ref);
        }
        let joined = if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        Self::new(normalize_path(&joined))
    }

    /// The directory portion: "/ppt/slides" for "/ppt/slides/slide1.xml".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// The filename portion: "slide1.xml" for "/ppt/slides/slide1.xml".
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// The extension, without the leading period.
    pub fn ext(&self) -> &str {
        match self.filename().rfind('.') {
            Some(pos) => &self.filename()[pos + 1..],
            None => "",
        }
    }

    /// The numeric suffix of a tuple partname: Some(21) for
    /// "/ppt/slides/slide21.xml", None for "/ppt/presentation.xml".
    pub fn idx(&self) -> Option<u32> {
        let stem = match self.filename().rfind('.') {
            Some(pos) => &self.filename()[..pos],
            None => self.filename(),
        };
        // Start of the trailing digit run; a bare number with no name
        // prefix is not a tuple partname.
        let digits_at = stem
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        if digits_at == 0 {
            return None;
        }
        atoi_simd::parse::<u32, false, false>(stem[digits_at..].as_bytes()).ok()
    }

    /// The zip membername: the URI with the leading slash stripped.
    pub fn membername(&self) -> &str {
        if self.uri == "/" { "" } else { &self.uri[1..] }
    }

    /// The relative reference from `base_uri` to this partname, as written
    /// into a `.rels` Target attribute.
    pub fn relative_ref(&self, base_uri: &str) -> String {
        if base_uri == "/" {
            return self.membername().to_string();
        }

        let from: Vec<&str> = base_uri.split('/').filter(|s| !s.is_empty()).collect();
        let to: Vec<&str> = self.uri.split('/').filter(|s| !s.is_empty()).collect();
        let common = from
            .iter()
            .zip(to.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut result = String::new();
        for _ in common..from.len() {
            result.push_str("../");
        }
        for (i, part) in to.iter().enumerate().skip(common) {
            if i > common {
                result.push('/');
            }
            result.push_str(part);
        }
        result
    }

    /// The partname of the `.rels` part for this partname:
    /// "/ppt/_rels/presentation.xml.rels" for "/ppt/presentation.xml".
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let base = self.base_uri();
        let rels = if base == "/" {
            format!("/_rels/{}.rels", self.filename())
        } else {
            format!("{}/_rels/{}.rels", base, self.filename())
        };
        Self::new(rels)
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    let mut out = String::with_capacity(path.len());
    for part in parts {
        out.push('/');
        out.push_str(part);
    }
    if out.is_empty() { "/".to_string() } else { out }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself.
pub const PACKAGE_URI: &str = "/";

/// The partname of the [Content_Types].xml stream.
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";
