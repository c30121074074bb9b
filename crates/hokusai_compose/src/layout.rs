//! Page grid computation.

use crate::StyleTheme;
use hokusai_core::{PanelPlacement, Quality, Rect, Style};
use hokusai_error::{ComposeError, ComposeErrorKind, ComposeStage};

/// Largest canvas edge the composer will allocate.
pub const MAX_CANVAS_EDGE: u32 = 16_384;

/// Panel edge length in pixels for a quality tier.
pub fn panel_edge(quality: Quality) -> u32 {
    match quality {
        Quality::Draft => 384,
        Quality::Standard => 512,
        Quality::High => 768,
    }
}

/// Canvas size and panel placement for one page.
///
/// # Examples
///
/// ```
/// use hokusai_compose::PageLayout;
/// use hokusai_core::{Quality, Style};
///
/// let layout = PageLayout::compute(3, &Style::default(), Quality::Standard).unwrap();
/// assert_eq!((*layout.columns(), *layout.rows()), (2, 2));
/// assert_eq!(layout.placements().len(), 3);
/// assert_eq!(layout, PageLayout::compute(3, &Style::default(), Quality::Standard).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct PageLayout {
    /// Canvas width
    width: u32,
    /// Canvas height
    height: u32,
    /// Grid columns
    columns: u32,
    /// Grid rows
    rows: u32,
    /// Panel image edge
    panel_edge: u32,
    /// Outline width
    border: u32,
    /// Resolved theme
    theme: StyleTheme,
    /// One placement per panel, in reading order
    placements: Vec<PanelPlacement>,
}

impl PageLayout {
    /// Lay out `panel_count` panels.
    ///
    /// Grids are one column for a single panel, two columns up to four
    /// panels, and three beyond that. A partially filled last row is
    /// centered.
    ///
    /// # Errors
    ///
    /// - [`ComposeErrorKind::NoPanels`] for zero panels
    /// - [`ComposeErrorKind::UnsupportedDimensions`] when the canvas would
    ///   exceed [`MAX_CANVAS_EDGE`] on either axis
    #[track_caller]
    pub fn compute(panel_count: usize, style: &Style, quality: Quality) -> Result<Self, ComposeError> {
        if panel_count == 0 {
            return Err(ComposeError::new(ComposeErrorKind::NoPanels, ComposeStage::LayingOut));
        }

        let theme = StyleTheme::for_style(style);
        let edge = panel_edge(quality);
        let border = StyleTheme::scaled(*theme.border_px(), edge);
        let gutter = StyleTheme::scaled(*theme.gutter_px(), edge) as u64;
        let margin = StyleTheme::scaled(*theme.margin_px(), edge) as u64;
        let caption_height = ((edge as f32) * theme.caption_ratio()).round() as u64;

        let count = panel_count as u64;
        let columns: u64 = match panel_count {
            1 => 1,
            2..=4 => 2,
            _ => 3,
        };
        let rows = count.div_ceil(columns);

        let cell_width = edge as u64 + 2 * border as u64;
        let frame_height = edge as u64 + 2 * border as u64;
        let cell_height = frame_height + caption_height;

        let width = 2 * margin + columns * cell_width + (columns - 1) * gutter;
        let height = 2 * margin + rows * cell_height + (rows - 1) * gutter;

        if width > MAX_CANVAS_EDGE as u64 || height > MAX_CANVAS_EDGE as u64 {
            return Err(ComposeError::new(
                ComposeErrorKind::UnsupportedDimensions(format!(
                    "{} panels need a {}x{} canvas (max {}x{})",
                    panel_count, width, height, MAX_CANVAS_EDGE, MAX_CANVAS_EDGE
                )),
                ComposeStage::LayingOut,
            ));
        }

        let placements = (0..count)
            .map(|slot| {
                let row = slot / columns;
                let column = slot % columns;
                let in_row = (count - row * columns).min(columns);
                let indent = (columns - in_row) * (cell_width + gutter) / 2;

                let x = margin + indent + column * (cell_width + gutter);
                let y = margin + row * (cell_height + gutter);

                // Bounded by the canvas check above
                let image = Rect::new(
                    (x + border as u64) as u32,
                    (y + border as u64) as u32,
                    edge,
                    edge,
                );
                let caption = Rect::new(
                    x as u32,
                    (y + frame_height) as u32,
                    cell_width as u32,
                    caption_height as u32,
                );
                PanelPlacement {
                    slot: slot as usize,
                    image,
                    caption,
                }
            })
            .collect();

        Ok(Self {
            width: width as u32,
            height: height as u32,
            columns: columns as u32,
            rows: rows as u32,
            panel_edge: edge,
            border,
            theme,
            placements,
        })
    }

    /// Outline rectangle around a placement's image.
    pub fn frame(&self, placement: &PanelPlacement) -> Rect {
        Rect::new(
            placement.image.x - self.border,
            placement.image.y - self.border,
            placement.image.width + 2 * self.border,
            placement.image.height + 2 * self.border,
        )
    }
}
