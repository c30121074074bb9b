//! The composition state machine.

use crate::{CaptionRenderer, PageLayout, Rgb};
use hokusai_core::{CompositeArtifact, GenerationOutcome, Quality, Rect, Style};
use hokusai_error::{ComposeError, ComposeErrorKind, ComposeStage};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::Path;
use tracing::{debug, instrument};

/// Composes generation outcomes into single-page comics.
///
/// Holds only the caption font database; every call works on its own canvas,
/// so one composer can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct ComicComposer {
    captions: CaptionRenderer,
}

impl ComicComposer {
    /// Create a composer, loading system fonts and any fonts in `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        Self {
            captions: CaptionRenderer::new(font_dir),
        }
    }

    /// Create a composer around an existing caption renderer.
    pub fn with_captions(captions: CaptionRenderer) -> Self {
        Self { captions }
    }

    /// Lay out `outcome` on one page.
    ///
    /// Stages run in order: laying out panels, rendering captions,
    /// normalizing color mode. The first failure is terminal and carries the
    /// stage it happened in. The returned artifact is always RGB8.
    ///
    /// # Errors
    ///
    /// - [`ComposeErrorKind::NoPanels`] if the outcome has no panels
    /// - [`ComposeErrorKind::Misaligned`] if panels and captions differ in count
    /// - [`ComposeErrorKind::UnsupportedDimensions`] for zero-sized panel
    ///   images or an oversized page
    /// - [`ComposeErrorKind::CanvasAllocation`] if the canvas cannot be allocated
    /// - [`ComposeErrorKind::CaptionRender`] if a caption cannot be rasterized
    #[instrument(skip(self, outcome), fields(panels = outcome.panels().len(), style = %style, quality = %quality))]
    pub fn compose(
        &self,
        outcome: &GenerationOutcome,
        style: &Style,
        quality: Quality,
    ) -> Result<CompositeArtifact, ComposeError> {
        let mut stage = ComposeStage::Idle;
        let panels = outcome.panels();
        let story = outcome.story();

        if panels.is_empty() {
            return Err(ComposeError::new(ComposeErrorKind::NoPanels, stage));
        }
        if panels.len() != story.len() {
            return Err(ComposeError::new(
                ComposeErrorKind::Misaligned {
                    panels: panels.len(),
                    captions: story.len(),
                },
                stage,
            ));
        }

        stage = advance(stage, ComposeStage::LayingOut);
        let layout = PageLayout::compute(panels.len(), style, quality)?;
        let theme = *layout.theme();
        let mut canvas = allocate_canvas(*layout.width(), *layout.height(), *theme.page())?;

        for (placement, panel) in layout.placements().iter().zip(panels) {
            let source = panel.image();
            if source.width() == 0 || source.height() == 0 {
                return Err(ComposeError::new(
                    ComposeErrorKind::UnsupportedDimensions(format!(
                        "panel {} image is {}x{}",
                        panel.index() + 1,
                        source.width(),
                        source.height()
                    )),
                    stage,
                ));
            }

            fill_rect(&mut canvas, layout.frame(placement), *theme.border());
            let fitted = source
                .resize_to_fill(placement.image.width, placement.image.height, FilterType::Lanczos3)
                .to_rgba8();
            imageops::overlay(
                &mut canvas,
                &fitted,
                placement.image.x as i64,
                placement.image.y as i64,
            );
        }

        stage = advance(stage, ComposeStage::RenderingCaptions);
        for (placement, caption) in layout.placements().iter().zip(story) {
            let rect = placement.caption;
            let pixels = self
                .captions
                .rasterize(caption, rect.width, rect.height, *layout.border(), &theme)?;
            blend_premultiplied(&mut canvas, rect, &pixels);
        }

        stage = advance(stage, ComposeStage::NormalizingColor);
        let page = DynamicImage::ImageRgba8(canvas).to_rgb8();

        advance(stage, ComposeStage::Composed);
        Ok(CompositeArtifact::new(
            page,
            layout.placements().clone(),
            style.clone(),
            quality,
        ))
    }
}

fn advance(from: ComposeStage, to: ComposeStage) -> ComposeStage {
    debug!(from = %from, to = %to, "Composition stage");
    to
}

fn allocate_canvas(width: u32, height: u32, fill: Rgb) -> Result<RgbaImage, ComposeError> {
    let len = width as usize * height as usize * 4;
    let mut buffer: Vec<u8> = Vec::new();
    buffer.try_reserve_exact(len).map_err(|e| {
        ComposeError::new(
            ComposeErrorKind::CanvasAllocation(format!("{}x{}: {}", width, height, e)),
            ComposeStage::LayingOut,
        )
    })?;
    let [r, g, b] = fill.0;
    for _ in 0..(width as usize * height as usize) {
        buffer.extend_from_slice(&[r, g, b, 255]);
    }
    RgbaImage::from_raw(width, height, buffer).ok_or_else(|| {
        ComposeError::new(
            ComposeErrorKind::CanvasAllocation(format!("{}x{}: buffer size mismatch", width, height)),
            ComposeStage::LayingOut,
        )
    })
}

fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Rgb) {
    let pixel = color.rgba();
    for y in rect.y..rect.bottom().min(canvas.height()) {
        for x in rect.x..rect.right().min(canvas.width()) {
            canvas.put_pixel(x, y, pixel);
        }
    }
}

/// Source-over blend of a premultiplied RGBA8 buffer into `rect`.
fn blend_premultiplied(canvas: &mut RgbaImage, rect: Rect, pixels: &[u8]) {
    for (i, src) in pixels.chunks_exact(4).enumerate() {
        let x = rect.x + (i as u32 % rect.width);
        let y = rect.y + (i as u32 / rect.width);
        if x >= canvas.width() || y >= canvas.height() {
            continue;
        }
        let dst = canvas.get_pixel_mut(x, y);
        let inverse = 255 - src[3] as u16;
        for channel in 0..3 {
            let under = (dst.0[channel] as u16 * inverse + 127) / 255;
            dst.0[channel] = (src[channel] as u16 + under).min(255) as u8;
        }
        dst.0[3] = 255;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_opaque_replaces() {
        let mut canvas = RgbaImage::from_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        blend_premultiplied(&mut canvas, Rect::new(1, 0, 1, 1), &[200, 100, 50, 255]);
        assert_eq!(canvas.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(canvas.get_pixel(1, 0).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_blend_transparent_keeps_canvas() {
        let mut canvas = RgbaImage::from_pixel(1, 1, image::Rgba([10, 20, 30, 255]));
        blend_premultiplied(&mut canvas, Rect::new(0, 0, 1, 1), &[0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_allocate_canvas_fills() {
        let canvas = allocate_canvas(3, 2, Rgb([1, 2, 3])).unwrap();
        assert!(canvas.pixels().all(|p| p.0 == [1, 2, 3, 255]));
    }
}
