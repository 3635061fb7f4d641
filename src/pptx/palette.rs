/// Semantic palette derived from the template's theme.
///
/// The deck's builders never touch raw scheme slots; they speak in the
/// brand vocabulary below. Each entry maps one scheme slot to one semantic
/// name with a hardcoded fallback, so a template with a sparse or missing
/// color scheme still renders in the house style. Adding a color is a
/// one-line edit to `from_theme`.
use crate::pptx::color::RgbColor;
use crate::pptx::theme::ThemeColorMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dark_navy: RgbColor,
    pub gray: RgbColor,
    pub light_gray: RgbColor,
    pub gold: RgbColor,
    pub dark_gray_blue: RgbColor,
    pub mauve: RgbColor,
    pub sage_green: RgbColor,
    pub beige: RgbColor,
    pub light_gray_blue: RgbColor,
    pub burgundy: RgbColor,
    pub white: RgbColor,
}

impl Palette {
    /// Build the palette from a theme map. Pure; slots the theme did not
    /// resolve take the fallback literal.
    pub fn from_theme(theme: &ThemeColorMap) -> Self {
        let pick = |slot: &str, default: RgbColor| theme.get(slot).copied().unwrap_or(default);

        Self {
            dark_navy: pick("dk1", RgbColor::new(0, 23, 34)),
            gray: pick("lt1", RgbColor::new(151, 154, 155)),
            light_gray: pick("dk2", RgbColor::new(243, 244, 244)),
            gold: pick("lt2", RgbColor::new(192, 161, 113)),
            dark_gray_blue: pick("accent1", RgbColor::new(130, 145, 155)),
            mauve: pick("accent2", RgbColor::new(157, 120, 140)),
            sage_green: pick("accent3", RgbColor::new(163, 171, 145)),
            beige: pick("accent4", RgbColor::new(225, 210, 187)),
            light_gray_blue: pick("accent5", RgbColor::new(209, 214, 217)),
            burgundy: pick("accent6", RgbColor::new(223, 51, 72)),
            white: RgbColor::new(255, 255, 255),
        }
    }
}

impl Default for Palette {
    /// The palette with every slot unresolved: all fallback literals.
    fn default() -> Self {
        Self::from_theme(&ThemeColorMap::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_theme_yields_defaults() {
        let p = Palette::default();
        assert_eq!(p.dark_navy, RgbColor::new(0, 23, 34));
        assert_eq!(p.gold, RgbColor::new(192, 161, 113));
        assert_eq!(p.burgundy, RgbColor::new(223, 51, 72));
        assert_eq!(p.white, RgbColor::new(255, 255, 255));
    }

    #[test]
    fn theme_slot_overrides_default() {
        // accent6 differing from the fallback proves override behavior
        // rather than coincidental equality.
        let xml = br#"<a:theme xmlns:a="ns"><a:clrScheme name="x">
            <a:accent6><a:srgbClr val="731C2F"/></a:accent6>
        </a:clrScheme></a:theme>"#;
        let theme = ThemeColorMap::from_theme_xml(xml).unwrap();
        let p = Palette::from_theme(&theme);
        assert_eq!(p.burgundy, RgbColor::new(0x73, 0x1C, 0x2F));
        // Unresolved slots still fall back.
        assert_eq!(p.gold, RgbColor::new(192, 161, 113));
    }

    #[test]
    fn theme_matching_the_default_is_indistinguishable() {
        let xml = br#"<a:theme xmlns:a="ns"><a:clrScheme name="x">
            <a:accent6><a:srgbClr val="DF3348"/></a:accent6>
        </a:clrScheme></a:theme>"#;
        let theme = ThemeColorMap::from_theme_xml(xml).unwrap();
        let p = Palette::from_theme(&theme);
        assert_eq!(p.burgundy, RgbColor::new(223, 51, 72));
    }
}
