/// Theme color extraction.
///
/// A template's theme part (`/ppt/theme/theme1.xml`) carries a `clrScheme`
/// element with twelve named slots (dk1, lt1, dk2, lt2, accent1-6, hlink,
/// folHlink). Each slot resolves to either a literal `srgbClr` value or a
/// `sysClr` reference; for system colors the `lastClr` attribute (the last
/// concrete value the authoring application saw) stands in, and a slot with
/// neither stays absent. An empty scheme is not an error: downstream
/// palette construction falls back to hardcoded defaults.
use crate::opc::OpcPackage;
use crate::pptx::color::RgbColor;
use crate::pptx::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::BTreeMap;
use std::path::Path;

/// Scheme-slot name to resolved RGB value.
#[derive(Debug, Clone, Default)]
pub struct ThemeColorMap {
    colors: BTreeMap<String, RgbColor>,
}

/// The twelve slot names a color scheme defines, in schema order.
const SCHEME_SLOTS: [&[u8]; 12] = [
    b"dk1", b"lt1", b"dk2", b"lt2", b"accent1", b"accent2", b"accent3", b"accent4", b"accent5",
    b"accent6", b"hlink", b"folHlink",
];

impl ThemeColorMap {
    /// Extract theme colors from a template file.
    pub fn from_template<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pkg = OpcPackage::open(path)?;
        Self::from_package(&pkg)
    }

    /// Extract theme colors from an opened package.
    ///
    /// The first part under `/ppt/theme/` (lowest numeric suffix) is the
    /// scheme the presentation's master references; packages with no theme
    /// part yield an empty map.
    pub fn from_package(pkg: &OpcPackage) -> Result<Self> {
        let mut theme_parts: Vec<_> = pkg
            .iter_parts()
            .filter(|p| {
                p.partname().as_str().starts_with("/ppt/theme/theme")
                    && p.partname().ext() == "xml"
            })
            .collect();
        theme_parts.sort_by_key(|p| (p.partname().idx().unwrap_or(u32::MAX), p.partname().as_str().to_string()));

        match theme_parts.first() {
            Some(part) => Self::from_theme_xml(part.blob()),
            None => Ok(Self::default()),
        }
    }

    /// Parse a theme XML stream for its color scheme.
    pub fn from_theme_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut colors = BTreeMap::new();
        let mut in_color_scheme = false;
        let mut current_slot: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let tag = e.local_name();
                    match tag.as_ref() {
                        b"clrScheme" => in_color_scheme = true,
                        slot if in_color_scheme && SCHEME_SLOTS.contains(&slot) => {
                            current_slot =
                                Some(std::str::from_utf8(slot).unwrap_or_default().to_string());
                        }
                        b"srgbClr" if in_color_scheme => {
                            if let Some(slot) = current_slot.take() {
                                for attr in e.attributes().flatten() {
                                    if attr.key.as_ref() == b"val"
                                        && let Ok(val) = std::str::from_utf8(&attr.value)
                                        && let Some(rgb) = RgbColor::from_hex(val)
                                    {
                                        colors.insert(slot.clone(), rgb);
                                    }
                                }
                            }
                        }
                        b"sysClr" if in_color_scheme => {
                            // Only the last-known literal is usable; a bare
                            // system reference leaves the slot absent.
                            if let Some(slot) = current_slot.take() {
                                for attr in e.attributes().flatten() {
                                    if attr.key.as_ref() == b"lastClr"
                                        && let Ok(val) = std::str::from_utf8(&attr.value)
                                        && let Some(rgb) = RgbColor::from_hex(val)
                                    {
                                        colors.insert(slot.clone(), rgb);
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(e)) => {
                    if e.local_name().as_ref() == b"clrScheme" {
                        in_color_scheme = false;
                        current_slot = None;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(crate::pptx::error::PptxError::Xml(e.to_string())),
                _ => {}
            }
        }

        Ok(Self { colors })
    }

    /// Resolved color for a scheme slot, if the theme defined one.
    pub fn get(&self, slot: &str) -> Option<&RgbColor> {
        self.colors.get(slot)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate slots in name order (stable for reporting).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RgbColor)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME_XML: &[u8] = br#"<?xml version="1.0"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="001722"/></a:dk1>
      <a:lt1><a:sysClr val="window"/></a:lt1>
      <a:dk2><a:srgbClr val="F3F4F4"/></a:dk2>
      <a:lt2><a:srgbClr val="C0A171"/></a:lt2>
      <a:accent1><a:srgbClr val="82919B"/></a:accent1>
      <a:accent2><a:srgbClr val="9D788C"/></a:accent2>
      <a:accent3><a:srgbClr val="A3AB91"/></a:accent3>
      <a:accent4><a:srgbClr val="E1D2BB"/></a:accent4>
      <a:accent5><a:srgbClr val="D1D6D9"/></a:accent5>
      <a:accent6><a:srgbClr val="731C2F"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn literal_slots_extract_exactly() {
        let map = ThemeColorMap::from_theme_xml(THEME_XML).unwrap();
        assert_eq!(map.get("lt2"), Some(&RgbColor::new(0xC0, 0xA1, 0x71)));
        assert_eq!(map.get("accent6"), Some(&RgbColor::new(0x73, 0x1C, 0x2F)));
    }

    #[test]
    fn sys_color_uses_last_clr() {
        let map = ThemeColorMap::from_theme_xml(THEME_XML).unwrap();
        assert_eq!(map.get("dk1"), Some(&RgbColor::new(0x00, 0x17, 0x22)));
    }

    #[test]
    fn sys_color_without_last_clr_is_absent() {
        let map = ThemeColorMap::from_theme_xml(THEME_XML).unwrap();
        assert_eq!(map.get("lt1"), None);
        // 11 of the 12 slots resolved
        assert_eq!(map.len(), 11);
    }

    #[test]
    fn colors_outside_the_scheme_are_ignored() {
        let xml = br#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
            <a:srgbClr val="FF0000"/>
            <a:clrScheme><a:dk1><a:srgbClr val="000000"/></a:dk1></a:clrScheme>
            <a:fmtScheme><a:srgbClr val="00FF00"/></a:fmtScheme>
        </a:theme>"#;
        let map = ThemeColorMap::from_theme_xml(xml).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("dk1"), Some(&RgbColor::new(0, 0, 0)));
    }

    #[test]
    fn empty_scheme_is_not_an_error() {
        let xml = br#"<a:theme xmlns:a="ns"><a:clrScheme name="x"/></a:theme>"#;
        let map = ThemeColorMap::from_theme_xml(xml).unwrap();
        assert!(map.is_empty());
    }
}
