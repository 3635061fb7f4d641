/// Shape serialization for generated slides.
///
/// Three shape forms cover the whole deck: a rounded box with an optional
/// centered bold label, a plain text box, and a rounded box stacking a
/// title paragraph over a subtitle paragraph. Shapes serialize straight to
/// PresentationML `<p:sp>` markup; a label containing newlines becomes one
/// paragraph per line.
use crate::pptx::color::RgbColor;
use crate::pptx::error::{PptxError, Result};
use crate::pptx::geometry::Rect;
use crate::pptx::units::pt_to_centipoints;
use std::fmt::Write as FmtWrite;

/// Escape XML special characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Paragraph alignment, serialized as the `algn` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn attr(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

/// A shape queued on a draft slide.
#[derive(Debug, Clone)]
pub(crate) struct Shape {
    pub(crate) shape_id: u32,
    pub(crate) kind: ShapeKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeKind {
    RoundedBox {
        rect: Rect,
        fill: RgbColor,
        label: Option<BoxLabel>,
    },
    TextBox {
        rect: Rect,
        text: String,
        font_size: u32,
        color: RgbColor,
        bold: bool,
        align: Align,
    },
    MultilineBox {
        rect: Rect,
        fill: RgbColor,
        title: String,
        subtitle: Option<String>,
        font_color: RgbColor,
        title_size: u32,
        subtitle_size: u32,
    },
}

/// Centered bold label inside a rounded box.
#[derive(Debug, Clone)]
pub(crate) struct BoxLabel {
    pub(crate) text: String,
    pub(crate) font_size: u32,
    pub(crate) color: RgbColor,
}

impl Shape {
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match &self.kind {
            ShapeKind::RoundedBox { rect, fill, label } => {
                self.write_rounded_box(xml, rect, *fill, label.as_ref())
            }
            ShapeKind::TextBox {
                rect,
                text,
                font_size,
                color,
                bold,
                align,
            } => self.write_text_box(xml, rect, text, *font_size, *color, *bold, *align),
            ShapeKind::MultilineBox {
                rect,
                fill,
                title,
                subtitle,
                font_color,
                title_size,
                subtitle_size,
            } => self.write_multiline_box(
                xml,
                rect,
                *fill,
                title,
                subtitle.as_deref(),
                *font_color,
                *title_size,
                *subtitle_size,
            ),
        }
    }

    fn write_rounded_box(
        &self,
        xml: &mut String,
        rect: &Rect,
        fill: RgbColor,
        label: Option<&BoxLabel>,
    ) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Rounded Rectangle {}"/>"#,
            self.shape_id, self.shape_id
        )
        .map_err(|e| PptxError::Xml(e.to_string()))?;
        xml.push_str("<p:cNvSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        self.write_sp_pr(xml, rect, Some(fill), true)?;

        if let Some(label) = label {
            xml.push_str("<p:txBody>");
            xml.push_str(r#"<a:bodyPr wrap="square" anchor="ctr" rtlCol="0"/>"#);
            xml.push_str("<a:lstStyle/>");
            for line in label.text.split('\n') {
                write_paragraph(xml, line, label.font_size, label.color, true, Align::Center)?;
            }
            xml.push_str("</p:txBody>");
        }

        xml.push_str("</p:sp>");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn write_text_box(
        &self,
        xml: &mut String,
        rect: &Rect,
        text: &str,
        font_size: u32,
        color: RgbColor,
        bold: bool,
        align: Align,
    ) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Text Box {}"/>"#,
            self.shape_id, self.shape_id
        )
        .map_err(|e| PptxError::Xml(e.to_string()))?;
        xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        self.write_sp_pr(xml, rect, None, false)?;

        xml.push_str("<p:txBody>");
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"/>"#);
        xml.push_str("<a:lstStyle/>");
        for line in text.split('\n') {
            write_paragraph(xml, line, font_size, color, bold, align)?;
        }
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn write_multiline_box(
        &self,
        xml: &mut String,
        rect: &Rect,
        fill: RgbColor,
        title: &str,
        subtitle: Option<&str>,
        font_color: RgbColor,
        title_size: u32,
        subtitle_size: u32,
    ) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Rounded Rectangle {}"/>"#,
            self.shape_id, self.shape_id
        )
        .map_err(|e| PptxError::Xml(e.to_string()))?;
        xml.push_str("<p:cNvSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        self.write_sp_pr(xml, rect, Some(fill), true)?;

        xml.push_str("<p:txBody>");
        xml.push_str(r#"<a:bodyPr wrap="square" anchor="ctr" rtlCol="0"/>"#);
        xml.push_str("<a:lstStyle/>");
        for line in title.split('\n') {
            write_paragraph(xml, line, title_size, font_color, true, Align::Center)?;
        }
        if let Some(subtitle) = subtitle {
            for line in subtitle.split('\n') {
                write_paragraph(xml, line, subtitle_size, font_color, false, Align::Center)?;
            }
        }
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");
        Ok(())
    }

    /// Shared `<p:spPr>`: transform, geometry, fill, outline. Rounded
    /// boxes use the roundRect preset with the corner radius pinned at
    /// 10% of the shorter side (`val 10000`); text boxes stay rectangular
    /// and unfilled.
    fn write_sp_pr(
        &self,
        xml: &mut String,
        rect: &Rect,
        fill: Option<RgbColor>,
        rounded: bool,
    ) -> Result<()> {
        let (x, y, cx, cy) = rect.to_emu();

        xml.push_str("<p:spPr>");
        xml.push_str("<a:xfrm>");
        write!(xml, r#"<a:off x="{}" y="{}"/>"#, x, y)
            .map_err(|e| PptxError::Xml(e.to_string()))?;
        write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, cx, cy)
            .map_err(|e| PptxError::Xml(e.to_string()))?;
        xml.push_str("</a:xfrm>");

        if rounded {
            xml.push_str(r#"<a:prstGeom prst="roundRect"><a:avLst><a:gd name="adj" fmla="val 10000"/></a:avLst></a:prstGeom>"#);
        } else {
            xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        }

        match fill {
            Some(color) => {
                xml.push_str("<a:solidFill>");
                write!(xml, r#"<a:srgbClr val="{}"/>"#, color.to_hex())
                    .map_err(|e| PptxError::Xml(e.to_string()))?;
                xml.push_str("</a:solidFill>");
                xml.push_str("<a:ln><a:noFill/></a:ln>");
            }
            None => xml.push_str("<a:noFill/>"),
        }

        xml.push_str("</p:spPr>");
        Ok(())
    }
}

/// Write one `<a:p>` with a single formatted run.
pub(crate) fn write_paragraph(
    xml: &mut String,
    text: &str,
    font_size: u32,
    color: RgbColor,
    bold: bool,
    align: Align,
) -> Result<()> {
    xml.push_str("<a:p>");
    write!(xml, r#"<a:pPr algn="{}"/>"#, align.attr())
        .map_err(|e| PptxError::Xml(e.to_string()))?;
    xml.push_str("<a:r>");

    write!(
        xml,
        r#"<a:rPr lang="en-US" sz="{}""#,
        pt_to_centipoints(font_size)
    )
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

    write!(xml, "<a:t>{}</a:t>", escape_xml(text)).map_err(|e| PptxError::Xml(e.to_string()))?;
    xml.push_str("</a:r>");
    xml.push_str("</a:p>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(kind: ShapeKind) -> Shape {
        Shape { shape_id: 2, kind }
    }

    #[test]
    fn rounded_box_has_round_rect_geometry() {
        let mut xml = String::new();
        shape(ShapeKind::RoundedBox {
            rect: Rect::new(1.0, 2.8, 7.0, 0.8),
            fill: RgbColor::new(0, 23, 34),
            label: Some(BoxLabel {
                text: "見出し".to_string(),
                font_size: 24,
                color: RgbColor::new(255, 255, 255),
            }),
        })
        .to_xml(&mut xml)
        .unwrap();

        assert!(xml.contains(r#"<a:prstGeom prst="roundRect">"#));
        assert!(xml.contains(r#"<a:gd name="adj" fmla="val 10000"/>"#));
        assert!(xml.contains(r#"<a:srgbClr val="001722"/>"#));
        assert!(xml.contains(r#"sz="2400" b="1""#));
        assert!(xml.contains(r#"anchor="ctr""#));
        assert!(xml.contains("<a:t>見出し</a:t>"));
    }

    #[test]
    fn unlabeled_rounded_box_has_no_text_body() {
        let mut xml = String::new();
        shape(ShapeKind::RoundedBox {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            fill: RgbColor::new(255, 0, 0),
            label: None,
        })
        .to_xml(&mut xml)
        .unwrap();

        assert!(!xml.contains("<p:txBody>"));
    }

    #[test]
    fn text_box_escapes_and_aligns() {
        let mut xml = String::new();
        shape(ShapeKind::TextBox {
            rect: Rect::new(1.0, 1.0, 5.0, 0.5),
            text: "Before & After".to_string(),
            font_size: 16,
            color: RgbColor::new(0, 23, 34),
            bold: false,
            align: Align::Center,
        })
        .to_xml(&mut xml)
        .unwrap();

        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains("<a:t>Before &amp; After</a:t>"));
        assert!(!xml.contains(r#" b="1""#));
    }

    #[test]
    fn newlines_split_into_paragraphs() {
        let mut xml = String::new();
        shape(ShapeKind::TextBox {
            rect: Rect::new(0.0, 0.0, 5.0, 2.0),
            text: "one\ntwo\nthree".to_string(),
            font_size: 14,
            color: RgbColor::new(0, 0, 0),
            bold: false,
            align: Align::Left,
        })
        .to_xml(&mut xml)
        .unwrap();

        assert_eq!(xml.matches("<a:p>").count(), 3);
    }

    #[test]
    fn multiline_box_stacks_title_and_subtitle() {
        let mut xml = String::new();
        shape(ShapeKind::MultilineBox {
            rect: Rect::new(1.0, 3.0, 3.0, 2.8),
            fill: RgbColor::new(0, 23, 34),
            title: "見えない".to_string(),
            subtitle: Some("在庫状況が不明".to_string()),
            font_color: RgbColor::new(255, 255, 255),
            title_size: 22,
            subtitle_size: 14,
        })
        .to_xml(&mut xml)
        .unwrap();

        assert_eq!(xml.matches("<a:p>").count(), 2);
        let title_at = xml.find(r#"sz="2200""#).unwrap();
        let subtitle_at = xml.find(r#"sz="1400""#).unwrap();
        assert!(title_at < subtitle_at);
    }
}
