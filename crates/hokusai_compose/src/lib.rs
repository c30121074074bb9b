//! Page composition for Hokusai.
//!
//! [`ComicComposer`] lays the surviving panels of a request out on a grid,
//! prints each caption in a box under its panel and returns an RGB
//! [`CompositeArtifact`](hokusai_core::CompositeArtifact).
//!
//! Layout is a pure function of panel count, style and quality (see
//! [`PageLayout::compute`]), so identical inputs always give identical pages.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod caption;
mod composer;
mod layout;
mod theme;

pub use caption::{CaptionRenderer, wrap_caption};
pub use composer::ComicComposer;
pub use layout::{MAX_CANVAS_EDGE, PageLayout, panel_edge};
pub use theme::{Rgb, StyleTheme};
