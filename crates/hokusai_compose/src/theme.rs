//! Per-style page themes.

use hokusai_core::Style;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// CSS hex notation, as used in caption markup.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Opaque RGBA pixel.
    pub fn rgba(&self) -> image::Rgba<u8> {
        let [r, g, b] = self.0;
        image::Rgba([r, g, b, 255])
    }
}

/// Visual parameters of a page, resolved from a style tag.
///
/// Pixel sizes are given for a 512 px panel and scaled with the panel edge.
#[derive(Debug, Clone, Copy, PartialEq, derive_getters::Getters)]
pub struct StyleTheme {
    /// Theme name ("manga", "comic", ...)
    #[getter(skip)]
    name: &'static str,
    /// Page background
    page: Rgb,
    /// Panel and caption box outlines
    border: Rgb,
    /// Caption box fill
    caption_fill: Rgb,
    /// Caption text color
    caption_text: Rgb,
    /// Outline width at 512 px
    border_px: u32,
    /// Space between cells at 512 px
    gutter_px: u32,
    /// Space around the grid at 512 px
    margin_px: u32,
    /// Caption box height as a fraction of the panel edge
    caption_ratio: f32,
    /// Font size as a fraction of the caption box height
    font_ratio: f32,
    /// Font family list for caption text
    #[getter(skip)]
    font_family: &'static str,
}

const MANGA: StyleTheme = StyleTheme {
    name: "manga",
    page: Rgb([255, 255, 255]),
    border: Rgb([0, 0, 0]),
    caption_fill: Rgb([255, 255, 255]),
    caption_text: Rgb([0, 0, 0]),
    border_px: 4,
    gutter_px: 16,
    margin_px: 24,
    caption_ratio: 0.28,
    font_ratio: 0.16,
    font_family: "'Noto Sans', 'DejaVu Sans', sans-serif",
};

const COMIC: StyleTheme = StyleTheme {
    name: "comic",
    page: Rgb([250, 244, 222]),
    border: Rgb([20, 20, 20]),
    caption_fill: Rgb([255, 233, 140]),
    caption_text: Rgb([20, 20, 20]),
    border_px: 5,
    gutter_px: 20,
    margin_px: 28,
    caption_ratio: 0.26,
    font_ratio: 0.17,
    font_family: "'Comic Neue', 'Comic Sans MS', 'DejaVu Sans', sans-serif",
};

const NOIR: StyleTheme = StyleTheme {
    name: "noir",
    page: Rgb([18, 18, 18]),
    border: Rgb([225, 225, 225]),
    caption_fill: Rgb([0, 0, 0]),
    caption_text: Rgb([240, 240, 240]),
    border_px: 3,
    gutter_px: 18,
    margin_px: 24,
    caption_ratio: 0.28,
    font_ratio: 0.15,
    font_family: "'DejaVu Serif', serif",
};

const WATERCOLOR: StyleTheme = StyleTheme {
    name: "watercolor",
    page: Rgb([248, 244, 236]),
    border: Rgb([120, 108, 96]),
    caption_fill: Rgb([255, 252, 245]),
    caption_text: Rgb([62, 52, 42]),
    border_px: 2,
    gutter_px: 22,
    margin_px: 32,
    caption_ratio: 0.30,
    font_ratio: 0.15,
    font_family: "'DejaVu Serif', serif",
};

const PLAIN: StyleTheme = StyleTheme {
    name: "default",
    border_px: 3,
    ..MANGA
};

impl StyleTheme {
    /// Resolve the theme for a style tag; unknown tags get a plain white page.
    ///
    /// # Examples
    ///
    /// ```
    /// use hokusai_compose::StyleTheme;
    /// use hokusai_core::Style;
    ///
    /// assert_eq!(StyleTheme::for_style(&Style::new("NOIR")).name(), "noir");
    /// assert_eq!(StyleTheme::for_style(&Style::new("vaporwave")).name(), "default");
    /// ```
    pub fn for_style(style: &Style) -> Self {
        match style.as_str().to_ascii_lowercase().as_str() {
            "manga" => MANGA,
            "comic" => COMIC,
            "noir" => NOIR,
            "watercolor" => WATERCOLOR,
            _ => PLAIN,
        }
    }

    /// Theme name ("manga", "comic", ...).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Font family list for caption text.
    pub fn font_family(&self) -> &'static str {
        self.font_family
    }

    /// Scale a 512 px measurement to `edge`, never below one pixel.
    pub(crate) fn scaled(px: u32, edge: u32) -> u32 {
        ((px as u64 * edge as u64 + 256) / 512).max(1) as u32
    }
}
