//! Randomization run with explicit stages.
//!
//! The stages run in order:
//! 1. **Generate**: build the block-randomized allocation sequence
//! 2. **Lay out**: derive positions and treatment codes, pivot into a grid
//! 3. **Render**: draw the grid as a heatmap and save the images
//!
//! Printing the console tables between stages 2 and 3 is left to the caller.

use std::time::Instant;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info_span};

use blockrand_core::{AllocationGrid, AllocationSchedule, annotate, generate_block_randomization};
use blockrand_model::{AnnotatedRecord, RandomizationConfig};
use blockrand_render::{RenderOptions, SavedPlots, save_heatmap};

// ============================================================================
// Stage 1: Generate
// ============================================================================

/// Generate the allocation sequence, seeded when `seed` is given.
pub fn generate(config: &RandomizationConfig, seed: Option<u64>) -> Result<AllocationSchedule> {
    let span = info_span!(
        "generate",
        target = config.target,
        arms = config.arms(),
        multiplier = config.multiplier,
        seeded = seed.is_some()
    );
    let _guard = span.enter();
    let schedule = match seed {
        Some(seed) => generate_block_randomization(config, &mut StdRng::seed_from_u64(seed)),
        None => generate_block_randomization(config, &mut rand::thread_rng()),
    }
    .context("invalid randomization configuration")?;
    Ok(schedule)
}

// ============================================================================
// Stage 2: Lay out
// ============================================================================

/// Annotated records and the display grid derived from them.
#[derive(Debug)]
pub struct LayoutResult {
    pub records: Vec<AnnotatedRecord>,
    pub grid: AllocationGrid,
}

/// Annotate the sequence and lay it onto the block × position grid.
pub fn lay_out(schedule: &AllocationSchedule) -> LayoutResult {
    let (records, codes) = annotate(&schedule.records);
    let grid = AllocationGrid::from_annotated(&records, codes);
    debug!(
        rows = grid.rows(),
        columns = grid.columns,
        treatments = grid.treatments.len(),
        "laid out allocation grid"
    );
    LayoutResult { records, grid }
}

// ============================================================================
// Stage 3: Render
// ============================================================================

/// Draw the heatmap and write the requested image files.
pub fn render(grid: &AllocationGrid, options: &RenderOptions) -> Result<SavedPlots> {
    let span = info_span!(
        "render",
        output_dir = %options.output_dir.display(),
        dpi = options.dpi
    );
    let _guard = span.enter();
    let start = Instant::now();
    let saved = save_heatmap(grid, options).with_context(|| {
        format!(
            "failed to save heatmap to {}",
            options.output_dir.display()
        )
    })?;
    debug!(
        files = saved.files.len(),
        duration_ms = start.elapsed().as_millis(),
        "render complete"
    );
    Ok(saved)
}
