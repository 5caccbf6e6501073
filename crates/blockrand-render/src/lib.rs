//! Heatmap rendering for block randomization schedules.
//!
//! Lays an [`AllocationGrid`](blockrand_core::AllocationGrid) out as a
//! colored heatmap (blocks as rows, positions as columns, subject ids as
//! cell text, a discrete treatment legend) and saves it as PNG and SVG.
//!
//! The same drawing code runs on the `plotters` bitmap and SVG backends;
//! only the pixels-per-inch factor differs.

mod error;
pub mod figure;
mod heatmap;
pub mod output;
pub mod palette;

pub use error::{RenderError, Result};
pub use figure::Figure;
pub use output::{
    DEFAULT_BASENAME, DEFAULT_DPI, DEFAULT_OUTPUT_DIR, OutputFormat, RenderOptions, SavedPlots,
    crop_to_content, render_png, render_svg, save_heatmap,
};
pub use palette::{SET1, annotation_color, treatment_palette};
