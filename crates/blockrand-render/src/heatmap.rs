//! Backend-independent heatmap drawing.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::element::{Rectangle, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{
    BLACK, Color, FontDesc, FontFamily, FontStyle, FontTransform, RGBColor, WHITE,
};

use blockrand_core::AllocationGrid;

use crate::figure::{
    ANNOTATION_PT, Figure, GRIDLINE_PT, LABEL_PT, LEGEND_PT, LEGEND_TITLE, SUBTITLE_PT, TICK_PT,
    TITLE, TITLE_PT, X_LABEL, Y_LABEL,
};
use crate::palette::{annotation_color, treatment_palette};

const LEGEND_FRAME: RGBColor = RGBColor(0xCC, 0xCC, 0xCC);

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Draws the whole figure onto `root`.
///
/// Rows are blocks with the first block at the bottom, columns are
/// positions within the block. Each occupied cell is filled with its
/// treatment color and labelled with the subject id.
pub(crate) fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &AllocationGrid,
    figure: &Figure,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let palette = treatment_palette(grid.treatments.len());

    draw_cells(root, grid, figure, &palette)?;
    draw_titles(root, grid, figure)?;
    draw_axes(root, grid, figure)?;
    draw_legend(root, grid, figure, &palette)
}

fn draw_cells<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &AllocationGrid,
    figure: &Figure,
    palette: &[RGBColor],
) -> DrawResult<DB> {
    let gridline = WHITE.stroke_width(figure.pt(GRIDLINE_PT).round().max(1.0) as u32);
    for row in 0..grid.rows() {
        for column in 0..grid.columns {
            let Some((code, id)) = grid.cell(row, column) else {
                continue;
            };
            let Some(&fill) = palette.get(code) else {
                continue;
            };
            let rect = figure.cell_rect(row, column);
            root.draw(&Rectangle::new(rect, fill.filled()))?;
            root.draw(&Rectangle::new(rect, gridline))?;
            root.draw(&Text::new(
                id.to_string(),
                figure.cell_center(row, column),
                text_style(figure, ANNOTATION_PT)
                    .color(&annotation_color(fill))
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
        }
    }
    Ok(())
}

fn draw_titles<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &AllocationGrid,
    figure: &Figure,
) -> DrawResult<DB> {
    let centered = Pos::new(HPos::Center, VPos::Center);
    root.draw(&Text::new(
        TITLE,
        figure.title_anchor(),
        text_style(figure, TITLE_PT).color(&BLACK).pos(centered),
    ))?;
    root.draw(&Text::new(
        grid.subtitle(),
        figure.subtitle_anchor(),
        text_style(figure, SUBTITLE_PT).color(&BLACK).pos(centered),
    ))
}

/// Axis labels and block tick labels. The x axis carries no ticks.
fn draw_axes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &AllocationGrid,
    figure: &Figure,
) -> DrawResult<DB> {
    let centered = Pos::new(HPos::Center, VPos::Center);
    root.draw(&Text::new(
        X_LABEL,
        figure.x_label_anchor(),
        text_style(figure, LABEL_PT).color(&BLACK).pos(centered),
    ))?;
    root.draw(&Text::new(
        Y_LABEL,
        figure.y_label_anchor(),
        text_style(figure, LABEL_PT)
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(centered),
    ))?;
    for (row, block) in grid.blocks.iter().enumerate() {
        root.draw(&Text::new(
            block.as_str(),
            figure.tick_anchor(row),
            text_style(figure, TICK_PT)
                .color(&BLACK)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }
    Ok(())
}

/// Discrete legend mapping each color to its treatment label.
fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    grid: &AllocationGrid,
    figure: &Figure,
    palette: &[RGBColor],
) -> DrawResult<DB> {
    root.draw(&Rectangle::new(
        figure.legend_frame(),
        LEGEND_FRAME.stroke_width(figure.pt(0.8).round().max(1.0) as u32),
    ))?;
    root.draw(&Text::new(
        LEGEND_TITLE,
        figure.legend_title_anchor(),
        text_style(figure, LEGEND_PT)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center)),
    ))?;
    let entries = grid.treatments.labels().iter().zip(palette.iter().copied());
    for (code, (label, color)) in entries.enumerate() {
        root.draw(&Rectangle::new(figure.legend_patch(code), color.filled()))?;
        root.draw(&Text::new(
            label.as_str(),
            figure.legend_label_anchor(code),
            text_style(figure, LEGEND_PT)
                .color(&BLACK)
                .pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }
    Ok(())
}

fn text_style(figure: &Figure, points: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, figure.pt(points), FontStyle::Normal)
}
