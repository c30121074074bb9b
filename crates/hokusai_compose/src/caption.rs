//! Caption boxes, rendered as SVG text and rasterized with resvg.

use crate::StyleTheme;
use hokusai_error::{ComposeError, ComposeErrorKind, ComposeStage};
use std::path::Path;
use std::sync::Arc;

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.55;
const LINE_HEIGHT: f32 = 1.25;

/// Greedy word wrap to at most `max_lines` lines of `max_chars` characters.
///
/// Words longer than a line are split. When the text does not fit, the last
/// line ends with an ellipsis.
///
/// # Examples
///
/// ```
/// use hokusai_compose::wrap_caption;
///
/// let lines = wrap_caption("The robot picks up a brush for the first time.", 16, 4);
/// assert_eq!(lines, vec!["The robot picks", "up a brush for", "the first time."]);
///
/// let clipped = wrap_caption("one two three four five six", 9, 2);
/// assert_eq!(clipped, vec!["one two", "three…"]);
/// ```
pub fn wrap_caption(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
            if needed <= max_chars {
                if used > 0 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // Word alone is too long for a line
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(max_chars.saturating_sub(1));
            while chars.last() == Some(&' ') {
                chars.pop();
            }
            *last = chars.into_iter().chain(std::iter::once('…')).collect();
        }
    }
    lines
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Rasterizes caption boxes with a shared font database.
#[derive(Clone)]
pub struct CaptionRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for CaptionRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionRenderer")
            .field("faces", &self.fontdb.faces().count())
            .finish()
    }
}

impl CaptionRenderer {
    /// Load system fonts plus `.ttf`/`.otf`/`.ttc` files from `font_dir`.
    #[tracing::instrument]
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.faces().count(), "Loaded caption fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Renderer over an existing font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Number of loaded font faces.
    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }

    /// SVG markup for a caption box of `width` x `height`.
    pub fn markup(
        &self,
        text: &str,
        width: u32,
        height: u32,
        border: u32,
        theme: &StyleTheme,
    ) -> String {
        let font_size = ((height as f32) * theme.font_ratio()).max(8.0).round();
        let line_height = font_size * LINE_HEIGHT;
        let padding = (font_size * 0.6).round() + border as f32;
        let inner_width = (width as f32 - 2.0 * padding).max(font_size);
        let inner_height = (height as f32 - 2.0 * padding).max(line_height);

        let max_chars = (inner_width / (font_size * GLYPH_ADVANCE)).floor() as usize;
        let max_lines = ((inner_height / line_height).floor() as usize).max(1);
        let lines = wrap_caption(text, max_chars, max_lines);

        let block = lines.len() as f32 * line_height;
        let first_baseline = (height as f32 - block) / 2.0 + font_size;
        let center = width as f32 / 2.0;
        let inset = border as f32 / 2.0;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            theme.caption_fill().hex()
        ));
        svg.push_str(&format!(
            r#"<rect x="{i}" y="{i}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            width as f32 - border as f32,
            height as f32 - border as f32,
            theme.border().hex(),
            border,
            i = inset
        ));
        svg.push_str(&format!(
            r#"<text font-family="{}" font-size="{}" fill="{}" text-anchor="middle">"#,
            escape_xml(theme.font_family()),
            font_size,
            theme.caption_text().hex()
        ));
        for (i, line) in lines.iter().enumerate() {
            svg.push_str(&format!(
                r#"<tspan x="{}" y="{}">{}</tspan>"#,
                center,
                first_baseline + i as f32 * line_height,
                escape_xml(line)
            ));
        }
        svg.push_str("</text></svg>");
        svg
    }

    /// Rasterize a caption box to premultiplied RGBA8.
    ///
    /// # Errors
    ///
    /// - [`ComposeErrorKind::CaptionRender`] if the markup cannot be parsed
    /// - [`ComposeErrorKind::CanvasAllocation`] if the pixmap cannot be allocated
    pub fn rasterize(
        &self,
        text: &str,
        width: u32,
        height: u32,
        border: u32,
        theme: &StyleTheme,
    ) -> Result<Vec<u8>, ComposeError> {
        let markup = self.markup(text, width, height, border, theme);
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&markup, &options).map_err(|e| {
            ComposeError::new(
                ComposeErrorKind::CaptionRender(e.to_string()),
                ComposeStage::RenderingCaptions,
            )
        })?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            ComposeError::new(
                ComposeErrorKind::CanvasAllocation(format!("caption pixmap {}x{}", width, height)),
                ComposeStage::RenderingCaptions,
            )
        })?;
        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());
        Ok(pixmap.take())
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "Font directory not readable");
        return;
    };

    for path in entries.flatten().map(|entry| entry.path()) {
        let is_font = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
            .unwrap_or(false);
        if is_font && path.is_file() {
            if let Err(e) = db.load_font_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Skipping font file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hokusai_core::Style;

    fn renderer() -> CaptionRenderer {
        CaptionRenderer::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_caption("abcdefghij", 4, 5), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_caption("   ", 10, 3).is_empty());
    }

    #[test]
    fn test_markup_escapes_text() {
        let theme = StyleTheme::for_style(&Style::default());
        let svg = renderer().markup("Tom & <Jerry>", 400, 120, 4, &theme);
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!svg.contains("<Jerry>"));
    }

    #[test]
    fn test_rasterized_box_is_opaque_and_filled() {
        let theme = StyleTheme::for_style(&Style::new("comic"));
        let pixels = renderer().rasterize("Kapow!", 200, 60, 3, &theme).unwrap();

        assert_eq!(pixels.len(), 200 * 60 * 4);
        assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
        // Center pixel sits in the caption fill (no fonts loaded, so no glyphs)
        let center = ((30 * 200 + 100) * 4) as usize;
        assert_eq!(&pixels[center..center + 3], &theme.caption_fill().0);
    }
}
