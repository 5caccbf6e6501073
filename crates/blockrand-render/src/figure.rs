//! Figure geometry.
//!
//! All measurements are kept in inches and points and converted to backend
//! pixels through a single pixels-per-inch factor, so the raster and vector
//! outputs share one layout.

use blockrand_core::AllocationGrid;

pub const TITLE: &str = "Block randomization of samples by block";
pub const X_LABEL: &str = "Treatment sequence within block";
pub const Y_LABEL: &str = "Block";
pub const LEGEND_TITLE: &str = "Treatment";

pub const TITLE_PT: f64 = 14.0;
pub const SUBTITLE_PT: f64 = 10.0;
pub const LABEL_PT: f64 = 10.0;
pub const TICK_PT: f64 = 10.0;
pub const ANNOTATION_PT: f64 = 10.0;
pub const LEGEND_PT: f64 = 10.0;
pub const GRIDLINE_PT: f64 = 2.0;

const PLOT_WIDTH_IN: f64 = 7.2;
const ROW_HEIGHT_IN: f64 = 0.6;
const MIN_HEIGHT_IN: f64 = 4.0;
const TOP_IN: f64 = 0.95;
const BOTTOM_IN: f64 = 0.5;
const MIN_LEFT_IN: f64 = 1.0;
const Y_LABEL_BAND_IN: f64 = 0.45;
const TICK_GAP_IN: f64 = 0.08;
const LEGEND_OFFSET_IN: f64 = 0.25;
const LEGEND_PATCH_IN: f64 = 0.18;
const LEGEND_ROW_IN: f64 = 0.28;
const LEGEND_PAD_IN: f64 = 0.1;
const RIGHT_PAD_IN: f64 = 0.15;
/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_EM: f64 = 0.6;

/// Pixel rectangle as `[(left, top), (right, bottom)]`.
pub type PixelRect = [(i32, i32); 2];

/// Layout of one heatmap figure at a given resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    ppi: f64,
    rows: usize,
    columns: usize,
    legend_entries: usize,
    left_in: f64,
    legend_width_in: f64,
    height_in: f64,
}

impl Figure {
    pub fn new(grid: &AllocationGrid, ppi: f64) -> Self {
        let widest_tick = grid
            .blocks
            .iter()
            .map(|block| block.as_str().chars().count())
            .max()
            .unwrap_or(0);
        let widest_legend = grid
            .treatments
            .labels()
            .iter()
            .map(|label| label.chars().count())
            .chain(std::iter::once(LEGEND_TITLE.len()))
            .max()
            .unwrap_or(0);
        let left_in = (Y_LABEL_BAND_IN + text_width_in(widest_tick, TICK_PT) + TICK_GAP_IN)
            .max(MIN_LEFT_IN);
        let legend_width_in = LEGEND_PATCH_IN
            + LEGEND_PAD_IN
            + text_width_in(widest_legend, LEGEND_PT)
            + LEGEND_PAD_IN;
        Self {
            ppi,
            rows: grid.rows(),
            columns: grid.columns,
            legend_entries: grid.treatments.len(),
            left_in,
            legend_width_in,
            height_in: (grid.rows() as f64 * ROW_HEIGHT_IN).max(MIN_HEIGHT_IN),
        }
    }

    pub fn width_in(&self) -> f64 {
        self.left_in + PLOT_WIDTH_IN + LEGEND_OFFSET_IN + self.legend_width_in + RIGHT_PAD_IN
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    /// Canvas size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (
            (self.width_in() * self.ppi).round() as u32,
            (self.height_in * self.ppi).round() as u32,
        )
    }

    /// Converts a length in points to pixels.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.ppi / 72.0
    }

    pub fn px(&self, inches: f64) -> i32 {
        (inches * self.ppi).round() as i32
    }

    /// Plot area, excluding titles, axis labels and legend.
    pub fn plot_rect(&self) -> PixelRect {
        [
            (self.px(self.left_in), self.px(TOP_IN)),
            (
                self.px(self.left_in + PLOT_WIDTH_IN),
                self.px(self.height_in - BOTTOM_IN),
            ),
        ]
    }

    /// Cell rectangle; row 0 sits at the bottom of the plot.
    pub fn cell_rect(&self, row: usize, column: usize) -> PixelRect {
        let [(left, top), (right, bottom)] = self.plot_rect();
        let cell_width = f64::from(right - left) / self.columns.max(1) as f64;
        let cell_height = f64::from(bottom - top) / self.rows.max(1) as f64;
        let x0 = left + (column as f64 * cell_width).round() as i32;
        let x1 = left + ((column + 1) as f64 * cell_width).round() as i32;
        let y0 = bottom - ((row + 1) as f64 * cell_height).round() as i32;
        let y1 = bottom - (row as f64 * cell_height).round() as i32;
        [(x0, y0), (x1, y1)]
    }

    pub fn cell_center(&self, row: usize, column: usize) -> (i32, i32) {
        center(self.cell_rect(row, column))
    }

    /// Anchor for the right edge of a block's tick label.
    pub fn tick_anchor(&self, row: usize) -> (i32, i32) {
        let [(left, _), _] = self.plot_rect();
        let (_, y) = self.cell_center(row, 0);
        (left - self.px(TICK_GAP_IN), y)
    }

    pub fn title_anchor(&self) -> (i32, i32) {
        (self.px(self.width_in() / 2.0), self.px(0.3))
    }

    pub fn subtitle_anchor(&self) -> (i32, i32) {
        let [(left, _), (right, _)] = self.plot_rect();
        ((left + right) / 2, self.px(0.68))
    }

    pub fn x_label_anchor(&self) -> (i32, i32) {
        let [(left, _), (right, bottom)] = self.plot_rect();
        ((left + right) / 2, bottom + self.px(BOTTOM_IN / 2.0))
    }

    pub fn y_label_anchor(&self) -> (i32, i32) {
        let [(_, top), (_, bottom)] = self.plot_rect();
        (self.px(Y_LABEL_BAND_IN / 2.0), (top + bottom) / 2)
    }

    /// Frame enclosing the legend title and entries.
    pub fn legend_frame(&self) -> PixelRect {
        let [(_, top), (right, _)] = self.plot_rect();
        let x0 = right + self.px(LEGEND_OFFSET_IN);
        let height_in = LEGEND_ROW_IN * (self.legend_entries + 1) as f64 + LEGEND_PAD_IN;
        [
            (x0, top),
            (x0 + self.px(self.legend_width_in), top + self.px(height_in)),
        ]
    }

    pub fn legend_title_anchor(&self) -> (i32, i32) {
        let [(x0, y0), _] = self.legend_frame();
        (x0 + self.px(LEGEND_PAD_IN), y0 + self.px(LEGEND_ROW_IN / 2.0 + LEGEND_PAD_IN / 2.0))
    }

    /// Color patch of the legend entry for treatment `code`.
    pub fn legend_patch(&self, code: usize) -> PixelRect {
        let [(x0, y0), _] = self.legend_frame();
        let center_in = LEGEND_PAD_IN / 2.0 + LEGEND_ROW_IN * (code as f64 + 1.5);
        let half = LEGEND_PATCH_IN / 2.0;
        let left = x0 + self.px(LEGEND_PAD_IN);
        [
            (left, y0 + self.px(center_in - half)),
            (
                left + self.px(LEGEND_PATCH_IN),
                y0 + self.px(center_in + half),
            ),
        ]
    }

    pub fn legend_label_anchor(&self, code: usize) -> (i32, i32) {
        let [_, (right, _)] = self.legend_patch(code);
        let (_, y) = center(self.legend_patch(code));
        (right + self.px(LEGEND_PAD_IN), y)
    }
}

fn text_width_in(chars: usize, points: f64) -> f64 {
    chars as f64 * CHAR_WIDTH_EM * points / 72.0
}

fn center(rect: PixelRect) -> (i32, i32) {
    let [(x0, y0), (x1, y1)] = rect;
    ((x0 + x1) / 2, (y0 + y1) / 2)
}
