//! Console tables for the generated schedule.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use blockrand_model::{AllocationSummary, AnnotatedRecord};
use blockrand_render::SavedPlots;

/// Print the record table, the details table and any size adjustment note.
pub fn print_schedule(records: &[AnnotatedRecord], summary: &AllocationSummary) {
    println!("Generated Block Randomization Data:");
    println!("{}", records_table(records));
    println!();
    println!("{}", details_table(summary));
    if let Some(warning) = summary.adjustment_warning() {
        eprintln!("warning: {warning}");
    }
    println!();
}

/// Print where the images went.
pub fn print_saved(saved: &SavedPlots) {
    if let Some(dir) = &saved.created_dir {
        println!("Created directory: {}", dir.display());
    }
    for path in &saved.files {
        println!("Plot saved to {}", path.display());
    }
}

/// One row per subject, in generation order.
pub fn records_table(records: &[AnnotatedRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("id"),
        header_cell("block.id"),
        header_cell("block.size"),
        header_cell("treatment"),
        header_cell("position_in_block"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(record.record.id),
            Cell::new(record.record.block_id.as_str()),
            dim_cell(record.record.block_size),
            treatment_cell(&record.record.treatment, record.treatment_code),
            Cell::new(record.position_in_block),
        ]);
    }
    table
}

/// Generation details: target versus actual allocation size.
pub fn details_table(summary: &AllocationSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Detail"), header_cell("Value")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 1, CellAlignment::Right);
    let actual = if summary.is_adjusted() {
        Cell::new(summary.actual_allocation_size)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(summary.actual_allocation_size)
    };
    table.add_row(vec![
        Cell::new("Target Sample Size"),
        Cell::new(summary.target_sample_size),
    ]);
    table.add_row(vec![Cell::new("Actual Allocation Size"), actual]);
    table.add_row(vec![
        Cell::new("Number of Blocks"),
        Cell::new(summary.num_blocks),
    ]);
    table.add_row(vec![
        Cell::new("Block Size Used"),
        Cell::new(summary.block_size),
    ]);
    table.add_row(vec![
        Cell::new("Treatments"),
        Cell::new(summary.num_treatments),
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn treatment_cell(label: &str, code: usize) -> Cell {
    let colors = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Magenta,
        Color::DarkYellow,
        Color::Yellow,
        Color::DarkRed,
        Color::DarkMagenta,
        Color::Grey,
    ];
    Cell::new(label).fg(colors[code % colors.len()])
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
