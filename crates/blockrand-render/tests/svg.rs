//! Integration tests for vector output and saving.

use rand::SeedableRng;
use rand::rngs::StdRng;

use blockrand_core::{AllocationGrid, annotate, generate_block_randomization};
use blockrand_model::RandomizationConfig;
use blockrand_render::{
    OutputFormat, RenderError, RenderOptions, SET1, render_svg, save_heatmap,
};

fn grid_for(config: &RandomizationConfig) -> AllocationGrid {
    let mut rng = StdRng::seed_from_u64(2024);
    let schedule = generate_block_randomization(config, &mut rng).expect("valid config");
    let (records, codes) = annotate(&schedule.records);
    AllocationGrid::from_annotated(&records, codes)
}

fn hex(color: plotters::style::RGBColor) -> String {
    let plotters::style::RGBColor(r, g, b) = color;
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Trimmed contents of every `<text>` element.
fn text_nodes(svg: &str) -> Vec<String> {
    svg.split("<text")
        .skip(1)
        .filter_map(|chunk| {
            let (_, rest) = chunk.split_once('>')?;
            let (content, _) = rest.split_once("</text>")?;
            Some(content.trim().to_string())
        })
        .collect()
}

#[test]
fn svg_contains_titles_labels_and_ids() {
    let grid = grid_for(&RandomizationConfig::default());
    let svg = render_svg(&grid).expect("render svg");
    assert!(svg.contains("<svg"));

    let texts = text_nodes(&svg);
    let has = |needle: &str| texts.iter().any(|text| text == needle);
    assert!(has("Block randomization of samples by block"));
    assert!(has("3 blocks with 10 samples per block, randomized to 2 treatments"));
    assert!(has("Treatment sequence within block"));
    assert!(has("Block"));
    for block in ["Block 1", "Block 2", "Block 3"] {
        assert!(has(block), "missing tick {block}");
    }
    for id in 1..=30 {
        assert!(has(&id.to_string()), "missing subject id {id}");
    }
    assert!(has("Treatment"));
    assert!(has("Control"));
}

#[test]
fn svg_fills_use_set1_colors() {
    let grid = grid_for(&RandomizationConfig::default());
    let svg = render_svg(&grid).expect("render svg").to_uppercase();
    assert!(svg.contains(&hex(SET1[0])));
    assert!(svg.contains(&hex(SET1[1])));
    assert!(!svg.contains(&hex(SET1[2])));
}

#[test]
fn save_creates_directory_and_writes_svg() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output_dir = temp.path().join("plots");
    let options = RenderOptions {
        output_dir: output_dir.clone(),
        basename: "schedule".to_string(),
        formats: vec![OutputFormat::Svg],
        ..RenderOptions::default()
    };
    let grid = grid_for(&RandomizationConfig::default().with_target(12));

    let saved = save_heatmap(&grid, &options).expect("save heatmap");
    assert_eq!(saved.created_dir.as_deref(), Some(output_dir.as_path()));
    assert_eq!(saved.files, vec![output_dir.join("schedule.svg")]);
    let written = std::fs::read_to_string(&saved.files[0]).expect("read svg");
    assert!(written.contains("2 blocks with 10 samples per block"));

    let again = save_heatmap(&grid, &options).expect("save again");
    assert_eq!(again.created_dir, None);
}

#[test]
fn unwritable_directory_is_an_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let blocker = temp.path().join("occupied");
    std::fs::write(&blocker, b"not a directory").expect("write file");
    let options = RenderOptions {
        output_dir: blocker.join("plots"),
        formats: vec![OutputFormat::Svg],
        ..RenderOptions::default()
    };
    let grid = grid_for(&RandomizationConfig::default());

    let error = save_heatmap(&grid, &options).expect_err("directory under a file");
    assert!(matches!(error, RenderError::CreateDir { .. }));
}

#[test]
fn empty_grid_is_rejected() {
    let (records, codes) = annotate(&[]);
    let grid = AllocationGrid::from_annotated(&records, codes);
    assert!(matches!(render_svg(&grid), Err(RenderError::EmptyGrid)));
}
