//! Integration tests for the comparison pipeline.
//!
//! Tests cover:
//! - Identical inputs score 1.0 with no regions
//! - Swapping baseline and candidate gives the same score
//! - Inputs of different sizes are normalized before comparison
//! - Raising the area thresholds never adds regions
//! - Edge-spanning strips are suppressed
//! - A real content change is boxed on both annotated images, including
//!   changes touching the image edge

mod common;

use common::*;
use image::imageops::{self, FilterType};
use image::Rgb;
use visdiff::analyze;

fn engine_into(dir: &std::path::Path) -> DiffEngine {
    DiffEngine::new(DiffOptions::default().with_output_dir(dir.join("out")))
}

#[test]
fn test_identical_images_score_one() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = save(dir.path(), "page.png", &screenshot(80, 60));

    let report = engine_into(dir.path()).compare(&path, &path)?;

    assert!((report.score - 1.0).abs() < 1e-9, "score was {}", report.score);
    assert!(report.regions.is_empty());
    assert_eq!(report.suppressed, 0);
    assert!(report.passes(0.99));

    Ok(())
}

#[test]
fn test_swapping_inputs_keeps_score() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let mut changed = screenshot(80, 60);
    fill(&mut changed, 20, 20, 20, 10, BUTTON_RED);

    let a = save(dir.path(), "a.png", &screenshot(80, 60));
    let b = save(dir.path(), "b.png", &changed);

    let forward = engine_into(dir.path()).compare(&a, &b)?;
    let backward = engine_into(dir.path()).compare(&b, &a)?;

    assert!((forward.score - backward.score).abs() < 1e-12);
    assert_eq!(forward.regions.len(), backward.regions.len());
    assert!(forward.score < 1.0);

    Ok(())
}

#[test]
fn test_resized_copy_scores_close_to_one() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let original = gradient(80, 60);
    let enlarged = imageops::resize(&original, 100, 75, FilterType::CatmullRom);

    let a = save(dir.path(), "small.png", &original);
    let b = save(dir.path(), "large.png", &enlarged);

    let report = engine_into(dir.path()).compare(&a, &b)?;

    assert_eq!((report.width, report.height), (100, 75));
    assert!(report.score > 0.95, "score was {}", report.score);

    Ok(())
}

#[test]
fn test_larger_min_areas_never_add_regions() -> anyhow::Result<()> {
    let base = screenshot(120, 80);
    let mut changed = base.clone();
    fill(&mut changed, 20, 20, 20, 10, BUTTON_RED);
    fill(&mut changed, 70, 50, 4, 3, INK);
    fill(&mut changed, 90, 20, 12, 12, Rgb([0, 160, 0]));
    fill(&mut changed, 60, 70, 2, 2, INK);

    let thresholds = [(0, 0), (3, 10), (8, 40), (20, 100), (200, 400), (10_000, 10_000)];
    let mut previous = usize::MAX;
    for (small, big) in thresholds {
        let options = DiffOptions::default().with_min_areas(small, big);
        let count = analyze(&base, &changed, &options)?.regions.len();
        assert!(
            count <= previous,
            "min areas ({small}, {big}) produced {count} regions, previous {previous}"
        );
        previous = count;
    }
    assert_eq!(previous, 0);

    Ok(())
}

#[test]
fn test_full_width_stripe_is_suppressed() -> anyhow::Result<()> {
    let base = image::RgbImage::from_pixel(60, 40, WHITE);
    let mut changed = base.clone();
    fill(&mut changed, 0, 0, 60, 1, INK);

    let analysis = analyze(&base, &changed, &DiffOptions::default())?;

    assert!(analysis.score < 1.0);
    assert!(analysis.regions.is_empty(), "regions: {:?}", analysis.regions);
    assert_eq!(analysis.suppressed, 1);

    Ok(())
}

#[test]
fn test_changed_button_is_boxed() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let mut changed = screenshot(80, 60);
    fill(&mut changed, 20, 20, 20, 10, BUTTON_RED);

    let a = save(dir.path(), "a.png", &screenshot(80, 60));
    let b = save(dir.path(), "b.png", &changed);

    let report = engine_into(dir.path()).compare(&a, &b)?;

    assert!(report.score < 1.0, "score was {}", report.score);
    assert!(
        report
            .regions
            .iter()
            .all(|r| r.x + r.width <= 80 && r.y + r.height <= 60)
    );

    let fine = report
        .regions
        .iter()
        .find(|r| r.pass == DetectionPass::Fine)
        .expect("colour pass should box the button");
    assert_eq!((fine.x, fine.y, fine.width, fine.height), (20, 20, 20, 10));

    let marked_a = image::open(&report.artefacts.baseline_marked)?.to_rgb8();
    let marked_b = image::open(&report.artefacts.candidate_marked)?.to_rgb8();
    assert_eq!(*marked_a.get_pixel(fine.x, fine.y), Rgb([255, 0, 0]));
    assert_eq!(*marked_b.get_pixel(fine.x, fine.y), Rgb([255, 0, 0]));

    Ok(())
}

#[test]
fn test_change_at_left_edge_is_boxed() -> anyhow::Result<()> {
    let base = screenshot(120, 80);
    let mut changed = base.clone();
    fill(&mut changed, 0, 30, 24, 16, BUTTON_RED);

    let analysis = analyze(&base, &changed, &DiffOptions::default())?;

    let fine: Vec<&Region> = analysis
        .regions
        .iter()
        .filter(|r| r.pass == DetectionPass::Fine)
        .collect();
    assert_eq!(fine.len(), 1, "regions: {:?}", analysis.regions);
    assert_eq!((fine[0].x, fine[0].y, fine[0].width, fine[0].height), (0, 30, 24, 16));
    assert!(analysis.regions.iter().any(|r| r.pass == DetectionPass::Coarse));

    Ok(())
}

#[test]
fn test_tighter_delta_e_flags_subtle_shift() -> anyhow::Result<()> {
    let base = screenshot(80, 60);
    let mut changed = base.clone();
    fill(&mut changed, 20, 20, 20, 10, Rgb([0, 96, 206]));

    let loose = analyze(&base, &changed, &DiffOptions::default())?;
    let tight = analyze(
        &base,
        &changed,
        &DiffOptions::default().with_delta_e_threshold(1.0),
    )?;

    let fine_count = |regions: &[Region]| {
        regions
            .iter()
            .filter(|r| r.pass == DetectionPass::Fine)
            .count()
    };
    assert_eq!(fine_count(&loose.regions), 0);
    assert_eq!(fine_count(&tight.regions), 1);

    Ok(())
}
