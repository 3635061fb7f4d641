/// Placeholder typing and layout placeholder discovery.
///
/// Slide layouts declare their content slots as `<p:ph>` elements with a
/// `type` attribute. Dispatch in this crate is by named kind, never by the
/// numeric codes the binary formats use, so a gap in handling is a visible
/// match arm rather than a swallowed lookup failure. Unknown type strings
/// are resolved according to an explicit tolerance chosen by the caller,
/// identically on every slide path.
use crate::pptx::error::{PptxError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Placeholder kinds named by the PresentationML `ST_PlaceholderType`
/// values this crate encounters in slide layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `title`
    Title,
    /// `ctrTitle` (title slide variant)
    CenterTitle,
    /// `subTitle`
    Subtitle,
    /// `body` (also the schema default when `type` is absent)
    Body,
    /// `dt`
    Date,
    /// `ftr`
    Footer,
    /// `sldNum`
    SlideNumber,
    /// `pic`
    Picture,
    /// `chart`
    Chart,
    /// `tbl`
    Table,
    /// `obj`
    Object,
    /// `media`
    Media,
}

impl PlaceholderKind {
    /// Parse a `type` attribute value. Returns None for strings outside
    /// the known set; the caller decides whether that is an error.
    pub fn from_type_attr(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "ctrTitle" => Some(Self::CenterTitle),
            "subTitle" => Some(Self::Subtitle),
            "body" => Some(Self::Body),
            "dt" => Some(Self::Date),
            "ftr" => Some(Self::Footer),
            "sldNum" => Some(Self::SlideNumber),
            "pic" => Some(Self::Picture),
            "chart" => Some(Self::Chart),
            "tbl" => Some(Self::Table),
            "obj" => Some(Self::Object),
            "media" => Some(Self::Media),
            _ => None,
        }
    }

    /// The attribute value this kind serializes as.
    pub fn type_attr(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CenterTitle => "ctrTitle",
            Self::Subtitle => "subTitle",
            Self::Body => "body",
            Self::Date => "dt",
            Self::Footer => "ftr",
            Self::SlideNumber => "sldNum",
            Self::Picture => "pic",
            Self::Chart => "chart",
            Self::Table => "tbl",
            Self::Object => "obj",
            Self::Media => "media",
        }
    }

    /// Whether this kind receives the slide title.
    pub fn is_title(self) -> bool {
        matches!(self, Self::Title | Self::CenterTitle)
    }
}

/// How to treat a layout placeholder whose `type` string is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderTolerance {
    /// Skip the placeholder and keep building the slide.
    #[default]
    Lenient,
    /// Fail the slide with `PptxError::UnknownPlaceholder`.
    Strict,
}

/// A placeholder discovered in a slide layout.
#[derive(Debug, Clone)]
pub struct LayoutPlaceholder {
    pub kind: PlaceholderKind,
    /// `idx` attribute, absent on primary placeholders
    pub idx: Option<u32>,
    /// Top edge in EMUs when the layout positions the shape itself;
    /// None when the position is inherited from the master.
    pub top_emu: Option<i64>,
}

/// Scan a slide layout's XML for its placeholder inventory.
///
/// Walks each `<p:sp>` in document order, pairing the `<p:ph>` declaration
/// with the shape's own `<a:off>` when present. Unknown placeholder types
/// are skipped or rejected per `tolerance`.
pub fn scan_layout_placeholders(
    layout_xml: &[u8],
    tolerance: PlaceholderTolerance,
) -> Result<Vec<LayoutPlaceholder>> {
    let mut reader = Reader::from_reader(layout_xml);
    reader.config_mut().trim_text(true);

    let mut placeholders = Vec::new();
    let mut sp_depth = 0usize;
    // Pending placeholder of the current <p:sp>, plus whether its type
    // string failed to resolve.
    let mut pending: Option<(Option<PlaceholderKind>, Option<u32>, String)> = None;
    let mut pending_top: Option<i64> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"sp" {
                    sp_depth += 1;
                    pending = None;
                    pending_top = None;
                }
            }
            Ok(Event::Empty(ref e)) if sp_depth > 0 => match e.local_name().as_ref() {
                b"ph" => {
                    let mut type_str = "body".to_string();
                    let mut idx = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"type" => type_str = attr.unescape_value()?.to_string(),
                            b"idx" => {
                                idx = atoi_simd::parse::<u32, false, false>(attr.value.as_ref()).ok();
                            }
                            _ => {}
                        }
                    }
                    let kind = PlaceholderKind::from_type_attr(&type_str);
                    pending = Some((kind, idx, type_str));
                }
                b"off" if pending.is_some() && pending_top.is_none() => {
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == b"y" {
                            pending_top = atoi_simd::parse::<i64, false, false>(attr.value.as_ref()).ok();
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"sp" && sp_depth > 0 {
                    sp_depth -= 1;
                    if let Some((kind, idx, type_str)) = pending.take() {
                        match kind {
                            Some(kind) => placeholders.push(LayoutPlaceholder {
                                kind,
                                idx,
                                top_emu: pending_top,
                            }),
                            None => match tolerance {
                                PlaceholderTolerance::Strict => {
                                    return Err(PptxError::UnknownPlaceholder(type_str));
                                }
                                PlaceholderTolerance::Lenient => {}
                            },
                        }
                    }
                    pending_top = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok(placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT_XML: &[u8] = br#"<?xml version="1.0"?>
<p:sldLayout xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"
             xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <p:cSld><p:spTree>
    <p:sp>
      <p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/>
        <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
      <p:spPr><a:xfrm><a:off x="914400" y="457200"/><a:ext cx="1" cy="1"/></a:xfrm></p:spPr>
    </p:sp>
    <p:sp>
      <p:nvSpPr><p:cNvPr id="3" name="Subtitle 2"/><p:cNvSpPr/>
        <p:nvPr><p:ph type="subTitle" idx="1"/></p:nvPr></p:nvSpPr>
      <p:spPr><a:xfrm><a:off x="914400" y="2743200"/><a:ext cx="1" cy="1"/></a:xfrm></p:spPr>
    </p:sp>
    <p:sp>
      <p:nvSpPr><p:cNvPr id="4" name="Footer 3"/><p:cNvSpPr/>
        <p:nvPr><p:ph type="ftr" idx="11"/></p:nvPr></p:nvSpPr>
      <p:spPr/>
    </p:sp>
  </p:spTree></p:cSld>
</p:sldLayout>"#;

    #[test]
    fn scans_kinds_indices_and_positions() {
        let phs =
            scan_layout_placeholders(LAYOUT_XML, PlaceholderTolerance::Lenient).unwrap();
        assert_eq!(phs.len(), 3);

        assert_eq!(phs[0].kind, PlaceholderKind::Title);
        assert_eq!(phs[0].idx, None);
        assert_eq!(phs[0].top_emu, Some(457_200));

        assert_eq!(phs[1].kind, PlaceholderKind::Subtitle);
        assert_eq!(phs[1].idx, Some(1));
        assert_eq!(phs[1].top_emu, Some(2_743_200));

        assert_eq!(phs[2].kind, PlaceholderKind::Footer);
        assert_eq!(phs[2].top_emu, None);
    }

    #[test]
    fn missing_type_defaults_to_body() {
        let xml = br#"<p:sldLayout xmlns:p="ns"><p:sp>
            <p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>
        </p:sp></p:sldLayout>"#;
        let phs = scan_layout_placeholders(xml, PlaceholderTolerance::Lenient).unwrap();
        assert_eq!(phs.len(), 1);
        assert_eq!(phs[0].kind, PlaceholderKind::Body);
    }

    #[test]
    fn unknown_type_respects_tolerance() {
        let xml = br#"<p:sldLayout xmlns:p="ns"><p:sp>
            <p:nvSpPr><p:nvPr><p:ph type="hologram"/></p:nvPr></p:nvSpPr><p:spPr/>
        </p:sp></p:sldLayout>"#;

        let lenient =
            scan_layout_placeholders(xml, PlaceholderTolerance::Lenient).unwrap();
        assert!(lenient.is_empty());

        let strict = scan_layout_placeholders(xml, PlaceholderTolerance::Strict);
        assert!(matches!(strict, Err(PptxError::UnknownPlaceholder(s)) if s == "hologram"));
    }

    #[test]
    fn title_roles() {
        assert!(PlaceholderKind::Title.is_title());
        assert!(PlaceholderKind::CenterTitle.is_title());
        assert!(!PlaceholderKind::Subtitle.is_title());
    }
}
