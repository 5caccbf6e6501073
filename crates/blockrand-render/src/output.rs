//! Rendering to PNG and SVG and saving into the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, imageops};
use plotters::backend::{BitMapBackend, SVGBackend};
use plotters::drawing::{DrawingAreaErrorKind, IntoDrawingArea};
use tracing::{debug, info};

use blockrand_core::AllocationGrid;

use crate::error::{RenderError, Result};
use crate::figure::Figure;
use crate::heatmap::draw_heatmap;

/// Default raster resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 400;
/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "plots";
/// Default file name stem shared by both outputs.
pub const DEFAULT_BASENAME: &str = "01_block-randomization";

/// User units per inch in the SVG output.
const SVG_UNITS_PER_INCH: f64 = 100.0;
/// Margin kept around the drawn content when cropping, in inches.
const CROP_PAD_IN: f64 = 0.1;

/// Image formats the heatmap can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Where and how the heatmap is written.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output_dir: PathBuf,
    pub basename: String,
    pub dpi: u32,
    pub formats: Vec<OutputFormat>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            basename: DEFAULT_BASENAME.to_string(),
            dpi: DEFAULT_DPI,
            formats: vec![OutputFormat::Png, OutputFormat::Svg],
        }
    }
}

impl RenderOptions {
    /// Path of the file written for `format`: `{output_dir}/{basename}.{ext}`.
    pub fn path_for(&self, format: OutputFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.basename, format.extension()))
    }
}

/// Files produced by [`save_heatmap`].
#[derive(Debug, Clone, Default)]
pub struct SavedPlots {
    /// Set when the output directory did not exist beforehand.
    pub created_dir: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Renders the grid and writes one file per requested format.
///
/// The output directory is created if absent.
///
/// # Errors
///
/// Returns an error if the grid is empty, the directory cannot be created,
/// drawing fails or a file cannot be written.
pub fn save_heatmap(grid: &AllocationGrid, options: &RenderOptions) -> Result<SavedPlots> {
    ensure_drawable(grid)?;
    let created_dir = ensure_output_dir(&options.output_dir)?;
    let mut files = Vec::with_capacity(options.formats.len());
    for &format in &options.formats {
        let path = options.path_for(format);
        match format {
            OutputFormat::Png => {
                let image = render_png(grid, options.dpi)?;
                image
                    .save_with_format(&path, image::ImageFormat::Png)
                    .map_err(|source| RenderError::Encode {
                        path: path.clone(),
                        source,
                    })?;
            }
            OutputFormat::Svg => {
                let svg = render_svg(grid)?;
                fs::write(&path, svg).map_err(|source| RenderError::Write {
                    path: path.clone(),
                    source,
                })?;
            }
        }
        info!(path = %path.display(), "saved heatmap");
        files.push(path);
    }
    Ok(SavedPlots { created_dir, files })
}

/// Renders the heatmap as an RGB raster cropped to its content.
///
/// # Errors
///
/// Returns [`RenderError::EmptyGrid`] for an empty grid and
/// [`RenderError::Draw`] when the bitmap backend fails, e.g. when no
/// sans-serif font is available.
pub fn render_png(grid: &AllocationGrid, dpi: u32) -> Result<RgbImage> {
    ensure_drawable(grid)?;
    let figure = Figure::new(grid, f64::from(dpi));
    let (width, height) = figure.size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_heatmap(&root, grid, &figure).map_err(draw_error)?;
        root.present().map_err(draw_error)?;
    }
    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| RenderError::Draw("raster buffer size mismatch".to_string()))?;
    let pad = figure.px(CROP_PAD_IN).max(0) as u32;
    let cropped = crop_to_content(&image, Rgb([255, 255, 255]), pad);
    debug!(
        width = cropped.width(),
        height = cropped.height(),
        dpi,
        "rendered raster heatmap"
    );
    Ok(cropped)
}

/// Renders the heatmap as an SVG document sized to its content.
///
/// # Errors
///
/// Returns [`RenderError::EmptyGrid`] for an empty grid and
/// [`RenderError::Draw`] when the SVG backend fails.
pub fn render_svg(grid: &AllocationGrid) -> Result<String> {
    ensure_drawable(grid)?;
    let figure = Figure::new(grid, SVG_UNITS_PER_INCH);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, figure.size()).into_drawing_area();
        draw_heatmap(&root, grid, &figure).map_err(draw_error)?;
        root.present().map_err(draw_error)?;
    }
    Ok(svg)
}

/// Crops `image` to the bounding box of pixels differing from
/// `background`, keeping `pad` pixels on each side where available.
///
/// An image with no content is returned unchanged.
pub fn crop_to_content(image: &RgbImage, background: Rgb<u8>, pad: u32) -> RgbImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel == background {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let Some((x0, y0, x1, y1)) = bounds else {
        return image.clone();
    };
    let left = x0.saturating_sub(pad);
    let top = y0.saturating_sub(pad);
    let right = (x1 + pad).min(image.width() - 1);
    let bottom = (y1 + pad).min(image.height() - 1);
    imageops::crop_imm(image, left, top, right - left + 1, bottom - top + 1).to_image()
}

fn ensure_drawable(grid: &AllocationGrid) -> Result<()> {
    if grid.rows() == 0 || grid.columns == 0 {
        return Err(RenderError::EmptyGrid);
    }
    Ok(())
}

/// Creates `dir` if needed, returning it when it was newly created.
fn ensure_output_dir(dir: &Path) -> Result<Option<PathBuf>> {
    if dir.is_dir() {
        return Ok(None);
    }
    fs::create_dir_all(dir).map_err(|source| RenderError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    info!(path = %dir.display(), "created output directory");
    Ok(Some(dir.to_path_buf()))
}

fn draw_error<E>(error: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Draw(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    #[test]
    fn crop_keeps_content_and_pad() {
        let mut image = RgbImage::from_pixel(100, 80, WHITE);
        image.put_pixel(40, 30, Rgb([0, 0, 0]));
        image.put_pixel(60, 50, Rgb([200, 0, 0]));

        let cropped = crop_to_content(&image, WHITE, 5);
        assert_eq!(cropped.dimensions(), (31, 31));
        assert_eq!(*cropped.get_pixel(5, 5), Rgb([0, 0, 0]));
        assert_eq!(*cropped.get_pixel(25, 25), Rgb([200, 0, 0]));
    }

    #[test]
    fn crop_clamps_pad_at_edges() {
        let mut image = RgbImage::from_pixel(20, 20, WHITE);
        image.put_pixel(0, 19, Rgb([1, 2, 3]));
        let cropped = crop_to_content(&image, WHITE, 4);
        assert_eq!(cropped.dimensions(), (5, 5));
    }

    #[test]
    fn blank_image_is_not_cropped() {
        let image = RgbImage::from_pixel(10, 6, WHITE);
        assert_eq!(crop_to_content(&image, WHITE, 2).dimensions(), (10, 6));
    }

    #[test]
    fn default_paths_use_basename() {
        let options = RenderOptions::default();
        assert_eq!(
            options.path_for(OutputFormat::Png),
            Path::new("plots").join("01_block-randomization.png")
        );
        assert_eq!(
            options.path_for(OutputFormat::Svg),
            Path::new("plots").join("01_block-randomization.svg")
        );
    }
}
