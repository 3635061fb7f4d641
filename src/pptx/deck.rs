/// Deck generation against a branded template.
///
/// The lifecycle is strictly linear: `Deck::open` loads the template and
/// derives the palette and content area, `delete_existing_slides` strips
/// the template's own slides, the `add_*_slide` methods append draft
/// slides, and `save` materializes the drafts into the package and writes
/// it out. A `Deck` only exists after a successful template load, so no
/// operation can run against an unloaded document.
use crate::opc::constants::{content_type as ct, relationship_type as rt};
use crate::opc::part::Part;
use crate::opc::{OpcPackage, PackURI};
use crate::pptx::color::RgbColor;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::geometry::{
    ContentArea, DEFAULT_SLIDE_HEIGHT_IN, DEFAULT_SLIDE_WIDTH_IN, Rect,
};
use crate::pptx::palette::Palette;
use crate::pptx::placeholder::{
    LayoutPlaceholder, PlaceholderKind, PlaceholderTolerance, scan_layout_placeholders,
};
use crate::pptx::shapes::{Align, BoxLabel, Shape, ShapeKind, escape_xml};
use crate::pptx::theme::ThemeColorMap;
use crate::pptx::units::emu_to_inches;
use memchr::memmem;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Slide layout used for the title slide.
const TITLE_LAYOUT: usize = 0;
/// Slide layout used for content slides.
const CONTENT_LAYOUT: usize = 2;

/// Subtitle placeholders above this line on the title layout are banner
/// artwork and get cleared; the one below it carries the subtitle text.
const SUBTITLE_MIN_TOP_IN: f64 = 2.5;

/// Deck-wide configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckConfig {
    /// How both slide paths treat unknown layout placeholder types.
    pub placeholder_tolerance: PlaceholderTolerance,
}

/// A slide entry in the presentation's `sldIdLst`.
#[derive(Debug, Clone)]
struct SlideEntry {
    id: u32,
    r_id: String,
}

pub struct Deck {
    pkg: OpcPackage,
    pres_partname: PackURI,
    theme: ThemeColorMap,
    palette: Palette,
    area: ContentArea,
    /// Layout partnames in master order (index 0 = title layout).
    layouts: Vec<PackURI>,
    /// Slides already materialized in the package.
    existing: Vec<SlideEntry>,
    /// Slides added since open/save, materialized on save.
    drafts: Vec<DraftSlide>,
    next_slide_id: u32,
    tolerance: PlaceholderTolerance,
}

impl Deck {
    /// Open a template and prepare it for generation.
    pub fn open<P: AsRef<Path>>(path: P, config: DeckConfig) -> Result<Self> {
        Self::from_package(OpcPackage::open(path)?, config)
    }

    /// Build a deck over an already-opened package.
    pub fn from_package(pkg: OpcPackage, config: DeckConfig) -> Result<Self> {
        let pres_partname = pkg.main_document_partname()?;
        {
            let main = pkg.get_part(&pres_partname)?;
            let content_type = main.content_type();
            if content_type != ct::PML_PRESENTATION_MAIN
                && content_type != ct::PML_PRES_MACRO_MAIN
            {
                return Err(PptxError::InvalidContentType {
                    expected: format!(
                        "{} or {}",
                        ct::PML_PRESENTATION_MAIN,
                        ct::PML_PRES_MACRO_MAIN
                    ),
                    got: content_type.to_string(),
                });
            }
        }

        let theme = ThemeColorMap::from_package(&pkg)?;
        let palette = Palette::from_theme(&theme);

        let pres_part = pkg.get_part(&pres_partname)?;
        let (slide_size, existing) = parse_presentation_xml(pres_part.blob())?;
        let area = match slide_size {
            Some((cx, cy)) => ContentArea::new(emu_to_inches(cx), emu_to_inches(cy)),
            None => ContentArea::new(DEFAULT_SLIDE_WIDTH_IN, DEFAULT_SLIDE_HEIGHT_IN),
        };

        let layouts = resolve_layouts(&pkg, &pres_partname)?;

        // Slide IDs live in [256, 2147483647]; continue above the template's.
        let next_slide_id = existing
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(256, |max| max.max(255) + 1);

        Ok(Self {
            pkg,
            pres_partname,
            theme,
            palette,
            area,
            layouts,
            existing,
            drafts: Vec::new(),
            next_slide_id,
            tolerance: config.placeholder_tolerance,
        })
    }

    /// Theme colors as extracted from the template.
    pub fn theme(&self) -> &ThemeColorMap {
        &self.theme
    }

    /// The semantic palette the slide builders draw from.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// The content area placements are authored against.
    pub fn content_area(&self) -> ContentArea {
        self.area
    }

    /// Slides currently in the deck (materialized plus drafted).
    pub fn slide_count(&self) -> usize {
        self.existing.len() + self.drafts.len()
    }

    /// Remove every slide the template shipped with, together with its
    /// relationship from the presentation part. Works on a snapshot of the
    /// slide-ID list, never a live view. Returns the number removed.
    pub fn delete_existing_slides(&mut self) -> Result<usize> {
        let entries = std::mem::take(&mut self.existing);
        let count = entries.len();

        for entry in entries {
            let pres_part = self.pkg.get_part_mut(&self.pres_partname)?;
            let rel = pres_part.rels_mut().remove(&entry.r_id).ok_or_else(|| {
                PptxError::InvalidTemplate(format!(
                    "slide id {} references missing relationship {}",
                    entry.id, entry.r_id
                ))
            })?;
            let partname = rel.target_partname()?;
            self.pkg.remove_part(&partname)?;
        }

        Ok(count)
    }

    /// Add the title slide. Title placeholders get `title` in gold 60pt
    /// bold; the subtitle placeholder positioned below the banner gets
    /// `subtitle`; any subtitle placeholder above it is cleared. A date
    /// line is placed as a free text box.
    pub fn add_title_slide(
        &mut self,
        title: &str,
        subtitle: &str,
        date: &str,
    ) -> Result<&mut DraftSlide> {
        let palette = self.palette;
        let placeholders = self.layout_placeholders(TITLE_LAYOUT)?;

        let mut draft = self.new_draft(TITLE_LAYOUT)?;
        for ph in &placeholders {
            if ph.kind.is_title() {
                draft.set_placeholder(ph, Some(title), 60, palette.gold, true)?;
            } else if ph.kind == PlaceholderKind::Subtitle {
                let top_in = ph.top_emu.map_or(0.0, emu_to_inches);
                if top_in > SUBTITLE_MIN_TOP_IN {
                    draft.set_placeholder(ph, Some(subtitle), 24, palette.dark_gray_blue, false)?;
                } else {
                    draft.set_placeholder(ph, None, 24, palette.dark_gray_blue, false)?;
                }
            }
            // Other placeholder kinds stay untouched: the slide inherits
            // them from the layout.
        }

        draft.add_text_box(
            Rect::new(0.83, 4.0, 16.0, 0.5),
            date,
            20,
            palette.dark_gray_blue,
            false,
            Align::Left,
        );

        self.drafts.push(draft);
        Ok(self.drafts.last_mut().expect("draft just pushed"))
    }

    /// Add a content slide. Title placeholders get `title` in gold 36pt
    /// bold; subtitle placeholders are cleared.
    pub fn add_content_slide(&mut self, title: &str) -> Result<&mut DraftSlide> {
        let palette = self.palette;
        let placeholders = self.layout_placeholders(CONTENT_LAYOUT)?;

        let mut draft = self.new_draft(CONTENT_LAYOUT)?;
        for ph in &placeholders {
            if ph.kind.is_title() {
                draft.set_placeholder(ph, Some(title), 36, palette.gold, true)?;
            } else if ph.kind == PlaceholderKind::Subtitle {
                draft.set_placeholder(ph, None, 24, palette.dark_gray_blue, false)?;
            }
        }

        self.drafts.push(draft);
        Ok(self.drafts.last_mut().expect("draft just pushed"))
    }

    fn layout_placeholders(&self, layout_idx: usize) -> Result<Vec<LayoutPlaceholder>> {
        let layout = self.layouts.get(layout_idx).ok_or_else(|| {
            PptxError::InvalidTemplate(format!(
                "template has no slide layout at index {}",
                layout_idx
            ))
        })?;
        let layout_part = self.pkg.get_part(layout)?;
        scan_layout_placeholders(layout_part.blob(), self.tolerance)
    }

    fn new_draft(&mut self, layout_idx: usize) -> Result<DraftSlide> {
        let layout = self.layouts.get(layout_idx).cloned().ok_or_else(|| {
            PptxError::InvalidTemplate(format!(
                "template has no slide layout at index {}",
                layout_idx
            ))
        })?;
        let slide_id = self.next_slide_id;
        self.next_slide_id += 1;
        Ok(DraftSlide::new(slide_id, layout))
    }

    /// Materialize drafted slides into the package and write it to `path`.
    /// The write is not atomic.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        for draft in std::mem::take(&mut self.drafts) {
            let partname = self.pkg.next_partname("/ppt/slides/slide%d.xml")?;
            let xml = draft.to_xml()?;

            let mut part = Part::new(partname.clone(), ct::PML_SLIDE.to_string(), xml.into_bytes());
            part.relate_to(
                &draft.layout.relative_ref(partname.base_uri()),
                rt::SLIDE_LAYOUT,
            );
            self.pkg.add_part(part);

            let pres_part = self.pkg.get_part_mut(&self.pres_partname)?;
            let r_id = pres_part.relate_to(
                &partname.relative_ref(self.pres_partname.base_uri()),
                rt::SLIDE,
            );
            self.existing.push(SlideEntry {
                id: draft.slide_id,
                r_id,
            });
        }

        let pres_part = self.pkg.get_part_mut(&self.pres_partname)?;
        let patched = splice_slide_id_list(pres_part.blob(), &self.existing)?;
        pres_part.set_blob(patched);

        self.pkg.save(path)?;
        Ok(())
    }
}

/// A slide under construction: placeholder text applied from the layout,
/// plus geometry shapes appended by the content builders.
pub struct DraftSlide {
    slide_id: u32,
    layout: PackURI,
    /// Pre-rendered placeholder `<p:sp>` chunks
    placeholder_xml: String,
    shapes: Vec<Shape>,
    /// Shape 1 is the group frame; placeholders and shapes follow.
    next_shape_id: u32,
}

impl DraftSlide {
    fn new(slide_id: u32, layout: PackURI) -> Self {
        Self {
            slide_id,
            layout,
            placeholder_xml: String::new(),
            shapes: Vec::new(),
            next_shape_id: 2,
        }
    }

    fn alloc_shape_id(&mut self) -> u32 {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        id
    }

    /// Emit a placeholder shape inheriting the layout's position and
    /// alignment. `None` text clears the placeholder.
    fn set_placeholder(
        &mut self,
        ph: &LayoutPlaceholder,
        text: Option<&str>,
        font_size: u32,
        color: RgbColor,
        bold: bool,
    ) -> Result<()> {
        let id = self.alloc_shape_id();
        let xml = &mut self.placeholder_xml;

        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{} {}"/>"#,
            id,
            placeholder_shape_name(ph.kind),
            id
        )
        .map_err(|e| PptxError::Xml(e.to_string()))?;
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
        xml.push_str("<p:nvPr>");
        match ph.idx {
            Some(idx) => write!(xml, r#"<p:ph type="{}" idx="{}"/>"#, ph.kind.type_attr(), idx)
                .map_err(|e| PptxError::Xml(e.to_string()))?,
            None => write!(xml, r#"<p:ph type="{}"/>"#, ph.kind.type_attr())
                .map_err(|e| PptxError::Xml(e.to_string()))?,
        }
        xml.push_str("</p:nvPr>");
        xml.push_str("</p:nvSpPr>");
        xml.push_str("<p:spPr/>");

        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr/>");
        xml.push_str("<a:lstStyle/>");
        match text {
            Some(text) if !text.is_empty() => {
                for line in text.split('\n') {
                    xml.push_str("<a:p>");
                    xml.push_str("<a:r>");
                    write!(xml, r#"<a:rPr lang="en-US" sz="{}""#, font_size * 100)
                        .map_err(|e| PptxError::Xml(e.to_string()))?;
                    if bold {
                        xml.push_str(r#" b="1""#);
                    }
                    xml.push_str(r#" dirty="0">"#);
                    write!(
                        xml,
                        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                        color.to_hex()
                    )
                    .map_err(|e| PptxError::Xml(e.to_string()))?;
                    xml.push_str("</a:rPr>");
                    write!(xml, "<a:t>{}</a:t>", escape_xml(line))
                        .map_err(|e| PptxError::Xml(e.to_string()))?;
                    xml.push_str("</a:r>");
                    xml.push_str("</a:p>");
                }
            }
            _ => xml.push_str("<a:p/>"),
        }
        xml.push_str("</p:txBody>");
        xml.push_str("</p:sp>");
        Ok(())
    }

    /// Add a rounded rectangle, optionally with a centered bold label.
    /// An empty label leaves the box unlabeled.
    pub fn add_rounded_box(
        &mut self,
        rect: Rect,
        fill: RgbColor,
        label: &str,
        font_size: u32,
        font_color: RgbColor,
    ) -> u32 {
        let id = self.alloc_shape_id();
        let label = (!label.is_empty()).then(|| BoxLabel {
            text: label.to_string(),
            font_size,
            color: font_color,
        });
        self.shapes.push(Shape {
            shape_id: id,
            kind: ShapeKind::RoundedBox { rect, fill, label },
        });
        id
    }

    /// Add a plain text box.
    pub fn add_text_box(
        &mut self,
        rect: Rect,
        text: &str,
        font_size: u32,
        color: RgbColor,
        bold: bool,
        align: Align,
    ) -> u32 {
        let id = self.alloc_shape_id();
        self.shapes.push(Shape {
            shape_id: id,
            kind: ShapeKind::TextBox {
                rect,
                text: text.to_string(),
                font_size,
                color,
                bold,
                align,
            },
        });
        id
    }

    /// Add a rounded box with a prominent title over a secondary subtitle.
    /// An empty subtitle yields a single-paragraph box.
    #[allow(clippy::too_many_arguments)]
    pub fn add_multiline_box(
        &mut self,
        rect: Rect,
        fill: RgbColor,
        title: &str,
        subtitle: &str,
        title_size: u32,
        subtitle_size: u32,
        font_color: RgbColor,
    ) -> u32 {
        let id = self.alloc_shape_id();
        self.shapes.push(Shape {
            shape_id: id,
            kind: ShapeKind::MultilineBox {
                rect,
                fill,
                title: title.to_string(),
                subtitle: (!subtitle.is_empty()).then(|| subtitle.to_string()),
                font_color,
                title_size,
                subtitle_size,
            },
        });
        id
    }

    /// Serialize the slide part XML.
    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096 + self.placeholder_xml.len());

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#);
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str(r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm>"#);
        xml.push_str("</p:grpSpPr>");

        xml.push_str(&self.placeholder_xml);
        for shape in &self.shapes {
            shape.to_xml(&mut xml)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

fn placeholder_shape_name(kind: PlaceholderKind) -> &'static str {
    use PlaceholderKind::*;
    match kind {
        Title | CenterTitle => "Title",
        Subtitle => "Subtitle",
        Body => "Text Placeholder",
        Date => "Date Placeholder",
        Footer => "Footer Placeholder",
        SlideNumber => "Slide Number Placeholder",
        Picture => "Picture Placeholder",
        Chart => "Chart Placeholder",
        Table => "Table Placeholder",
        Object => "Content Placeholder",
        Media => "Media Placeholder",
    }
}

/// Parse slide size and the slide-ID list out of presentation.xml.
fn parse_presentation_xml(xml: &[u8]) -> Result<(Option<(i64, i64)>, Vec<SlideEntry>)> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut slide_size = None;
    let mut entries = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"sldSz" => {
                    let mut cx = None;
                    let mut cy = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"cx" => cx = atoi_simd::parse::<i64, false, false>(attr.value.as_ref()).ok(),
                            b"cy" => cy = atoi_simd::parse::<i64, false, false>(attr.value.as_ref()).ok(),
                            _ => {}
                        }
                    }
                    if let (Some(cx), Some(cy)) = (cx, cy) {
                        slide_size = Some((cx, cy));
                    }
                }
                b"sldId" => {
                    let mut id = None;
                    let mut r_id = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"id" => id = atoi_simd::parse::<u32, false, false>(attr.value.as_ref()).ok(),
                            b"r:id" => r_id = Some(attr.unescape_value()?.to_string()),
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(r_id)) = (id, r_id) {
                        entries.push(SlideEntry { id, r_id });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e.to_string())),
            _ => {}
        }
    }

    Ok((slide_size, entries))
}

/// Resolve layout partnames in master order: presentation -> slide master
/// -> `sldLayoutIdLst` entries resolved through the master's rels.
fn resolve_layouts(pkg: &OpcPackage, pres_partname: &PackURI) -> Result<Vec<PackURI>> {
    let pres_part = pkg.get_part(pres_partname)?;
    let master_rel = pres_part
        .rels()
        .part_with_reltype(rt::SLIDE_MASTER)
        .map_err(|_| PptxError::InvalidTemplate("template has no slide master".to_string()))?;
    let master_partname = master_rel.target_partname()?;
    let master_part = pkg.get_part(&master_partname)?;

    let mut layout_r_ids = Vec::new();
    let mut reader = Reader::from_reader(master_part.blob());
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"sldLayoutId" {
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == b"r:id" {
                            layout_r_ids.push(attr.unescape_value()?.to_string());
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PptxError::Xml(e.to_string())),
            _ => {}
        }
    }

    let mut layouts = Vec::with_capacity(layout_r_ids.len());
    for r_id in layout_r_ids {
        let rel = master_part.rels().get(&r_id).ok_or_else(|| {
            PptxError::InvalidTemplate(format!(
                "slide master references missing layout relationship {}",
                r_id
            ))
        })?;
        layouts.push(rel.target_partname()?);
    }
    Ok(layouts)
}

/// Replace (or insert) the `<p:sldIdLst>` element in presentation.xml.
fn splice_slide_id_list(blob: &[u8], entries: &[SlideEntry]) -> Result<Vec<u8>> {
    let mut list = String::with_capacity(32 + entries.len() * 48);
    if entries.is_empty() {
        list.push_str("<p:sldIdLst/>");
    } else {
        list.push_str("<p:sldIdLst>");
        for entry in entries {
            write!(list, r#"<p:sldId id="{}" r:id="{}"/>"#, entry.id, entry.r_id)
                .map_err(|e| PptxError::Xml(e.to_string()))?;
        }
        list.push_str("</p:sldIdLst>");
    }

    if let Some(start) = memmem::find(blob, b"<p:sldIdLst") {
        let end = match memmem::find(&blob[start..], b"</p:sldIdLst>") {
            Some(close) => start + close + "</p:sldIdLst>".len(),
            // Self-closing form: the element ends at the first "/>".
            None => match memmem::find(&blob[start..], b"/>") {
                Some(close) => start + close + 2,
                None => {
                    return Err(PptxError::Xml(
                        "unterminated sldIdLst in presentation.xml".to_string(),
                    ));
                }
            },
        };
        let mut out = Vec::with_capacity(blob.len() + list.len());
        out.extend_from_slice(&blob[..start]);
        out.extend_from_slice(list.as_bytes());
        out.extend_from_slice(&blob[end..]);
        return Ok(out);
    }

    // Template shipped without a slide list; insert after the master list,
    // which the schema orders immediately before it.
    let anchor = b"</p:sldMasterIdLst>";
    if let Some(pos) = memmem::find(blob, anchor) {
        let at = pos + anchor.len();
        let mut out = Vec::with_capacity(blob.len() + list.len());
        out.extend_from_slice(&blob[..at]);
        out.extend_from_slice(list.as_bytes());
        out.extend_from_slice(&blob[at..]);
        return Ok(out);
    }

    Err(PptxError::Xml(
        "presentation.xml has neither sldIdLst nor sldMasterIdLst".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    const PRES_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/></p:sldIdLst><p:sldSz cx="18288000" cy="10287000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#;

    fn layout_xml(name: &str) -> String {
        format!(
            r#"<?xml version="1.0"?><p:sldLayout xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:cSld name="{}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="914400" y="914400"/><a:ext cx="9144000" cy="914400"/></a:xfrm></p:spPr></p:sp><p:sp><p:nvSpPr><p:cNvPr id="3" name="Subtitle 2"/><p:cNvSpPr/><p:nvPr><p:ph type="subTitle" idx="1"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="914400" y="2743200"/><a:ext cx="9144000" cy="914400"/></a:xfrm></p:spPr></p:sp></p:spTree></p:cSld></p:sldLayout>"#,
            name
        )
    }

    /// A template with a master, three layouts, a theme, and two slides.
    fn create_template() -> Vec<u8> {
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
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout3.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
  <Override PartName="/ppt/slides/slide2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
</Types>"#).unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#).unwrap();

            writer.start_file("ppt/presentation.xml", options).unwrap();
            writer.write_all(PRES_XML).unwrap();

            writer
                .start_file("ppt/_rels/presentation.xml.rels", options)
                .unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
</Relationships>"#).unwrap();

            writer
                .start_file("ppt/slideMasters/slideMaster1.xml", options)
                .unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<p:sldMaster xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
    <p:sldLayoutId id="2147483650" r:id="rId2"/>
    <p:sldLayoutId id="2147483651" r:id="rId3"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#).unwrap();

            writer
                .start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)
                .unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout3.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#).unwrap();

            for (i, name) in [(1, "Title Slide"), (2, "Section"), (3, "Title and Content")] {
                writer
                    .start_file(format!("ppt/slideLayouts/slideLayout{}.xml", i), options)
                    .unwrap();
                writer.write_all(layout_xml(name).as_bytes()).unwrap();
                writer
                    .start_file(
                        format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i),
                        options,
                    )
                    .unwrap();
                writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#).unwrap();
            }

            for i in [1, 2] {
                writer
                    .start_file(format!("ppt/slides/slide{}.xml", i), options)
                    .unwrap();
                writer.write_all(br#"<?xml version="1.0"?>
<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld></p:sld>"#).unwrap();
                writer
                    .start_file(format!("ppt/slides/_rels/slide{}.xml.rels", i), options)
                    .unwrap();
                writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout3.xml"/>
</Relationships>"#).unwrap();
            }

            writer.start_file("ppt/theme/theme1.xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Brand">
  <a:themeElements><a:clrScheme name="Brand">
    <a:dk1><a:srgbClr val="001722"/></a:dk1>
    <a:lt1><a:srgbClr val="979A9B"/></a:lt1>
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
  </a:clrScheme></a:themeElements>
</a:theme>"#).unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    fn open_deck() -> Deck {
        let pkg = OpcPackage::from_reader(Cursor::new(create_template())).unwrap();
        Deck::from_package(pkg, DeckConfig::default()).unwrap()
    }

    #[test]
    fn open_reads_slides_size_and_theme() {
        let deck = open_deck();
        assert_eq!(deck.slide_count(), 2);
        // sldSz 18288000x10287000 EMU = 20in x 11.25in
        assert_eq!(deck.content_area().canvas_width(), 20.0);
        assert_eq!(deck.content_area().width(), 17.0);
        // accent6 overrides the burgundy fallback
        assert_eq!(deck.palette().burgundy, RgbColor::new(0x73, 0x1C, 0x2F));
        assert_eq!(deck.layouts.len(), 3);
    }

    #[test]
    fn delete_existing_slides_leaves_zero_slides_and_rels() {
        let mut deck = open_deck();
        let removed = deck.delete_existing_slides().unwrap();
        assert_eq!(removed, 2);
        assert_eq!(deck.slide_count(), 0);

        let pres = deck.pkg.get_part(&deck.pres_partname).unwrap();
        assert!(pres.rels().all_with_reltype(rt::SLIDE).is_empty());
        assert!(!deck
            .pkg
            .contains_part(&PackURI::new("/ppt/slides/slide1.xml").unwrap()));
        assert!(!deck
            .pkg
            .contains_part(&PackURI::new("/ppt/slides/slide2.xml").unwrap()));
    }

    #[test]
    fn save_and_reopen_round_trips_slide_count() {
        let mut deck = open_deck();
        deck.delete_existing_slides().unwrap();

        deck.add_title_slide("提案", "サブタイトル", "2026.01.16").unwrap();
        let slide = deck.add_content_slide("現状の課題").unwrap();
        slide.add_rounded_box(
            Rect::new(1.0, 3.0, 7.0, 0.8),
            RgbColor::new(0, 23, 34),
            "見出し",
            24,
            RgbColor::new(255, 255, 255),
        );
        assert_eq!(deck.slide_count(), 2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pptx");
        deck.save(&path).unwrap();

        let reopened = Deck::open(&path, DeckConfig::default()).unwrap();
        assert_eq!(reopened.slide_count(), 2);
    }

    #[test]
    fn title_slide_styles_title_and_subtitle_placeholders() {
        let mut deck = open_deck();
        deck.delete_existing_slides().unwrap();
        let draft = deck.add_title_slide("タイトル", "サブ", "2026.01.XX").unwrap();

        let xml = draft.to_xml().unwrap();
        // Title: gold, 60pt, bold
        assert!(xml.contains(r#"sz="6000" b="1" dirty="0"><a:solidFill><a:srgbClr val="C0A171"/>"#));
        // Subtitle at 3in top: dark gray blue, 24pt
        assert!(xml.contains(r#"sz="2400" dirty="0"><a:solidFill><a:srgbClr val="82919B"/>"#));
        assert!(xml.contains("<a:t>タイトル</a:t>"));
        assert!(xml.contains("<a:t>サブ</a:t>"));
        assert!(xml.contains("<a:t>2026.01.XX</a:t>"));
    }

    #[test]
    fn content_slide_clears_subtitle() {
        let mut deck = open_deck();
        deck.delete_existing_slides().unwrap();
        let draft = deck.add_content_slide("課題").unwrap();

        let xml = draft.to_xml().unwrap();
        assert!(xml.contains(r#"sz="3600" b="1""#));
        assert!(xml.contains("<a:t>課題</a:t>"));
        // Cleared subtitle serializes as an empty paragraph.
        assert!(xml.contains(r#"<p:ph type="subTitle" idx="1"/>"#));
        assert!(xml.contains("<a:p/>"));
    }

    #[test]
    fn splice_replaces_existing_list() {
        let entries = vec![SlideEntry {
            id: 300,
            r_id: "rId9".to_string(),
        }];
        let out = splice_slide_id_list(PRES_XML, &entries).unwrap();
        let s = std::str::from_utf8(&out).unwrap();
        assert!(s.contains(r#"<p:sldIdLst><p:sldId id="300" r:id="rId9"/></p:sldIdLst>"#));
        assert!(!s.contains(r#"r:id="rId2""#));
        // Everything around the list survives.
        assert!(s.contains("<p:sldMasterIdLst>"));
        assert!(s.contains(r#"<p:sldSz cx="18288000" cy="10287000"/>"#));
    }

    #[test]
    fn splice_empty_list_collapses_element() {
        let out = splice_slide_id_list(PRES_XML, &[]).unwrap();
        let s = std::str::from_utf8(&out).unwrap();
        assert!(s.contains("<p:sldIdLst/>"));
        assert!(!s.contains("<p:sldId "));
    }

    #[test]
    fn splice_inserts_when_list_absent() {
        let xml = br#"<p:presentation xmlns:p="ns"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldSz cx="1" cy="1"/></p:presentation>"#;
        let entries = vec![SlideEntry {
            id: 256,
            r_id: "rId2".to_string(),
        }];
        let out = splice_slide_id_list(xml, &entries).unwrap();
        let s = std::str::from_utf8(&out).unwrap();
        let master_end = s.find("</p:sldMasterIdLst>").unwrap();
        let list_at = s.find("<p:sldIdLst>").unwrap();
        assert!(list_at > master_end);
        assert!(list_at < s.find("<p:sldSz").unwrap());
    }
}
