mod common;

use common::fixtures::*;
use common::{SolidRasterizer, TestResult};
use reportly::{ExportConfig, ExportPipelineBuilder, OversizePolicy, ReportSource};
use reportly_layout::test_utils::{
    FixedMeasure, assert_document_invariants, chart as chart_block, page_indices,
};
use reportly_layout::{
    Bitmap, BlockMeasure, ContentBlock, LayoutConfig, LayoutError, PageGeometry, Paginator,
    SpacingRules, TextMeasure,
};

fn untitled() -> ExportConfig {
    ExportConfig {
        title: None,
        ..ExportConfig::default()
    }
}

#[test]
fn oversized_chart_goes_alone_onto_the_next_page() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    // 400pt of content height with a 15pt margin.
    let geometry = PageGeometry::new(300.0, 430.0, 15.0)?;
    let measure = FixedMeasure::new(10.0).with("intro", 50.0).with("big chart", 500.0);
    let paginator = Paginator::with_measure(LayoutConfig::default(), measure);

    let blocks = vec![ContentBlock::paragraph("intro"), chart_block("big chart")];
    let document = paginator.paginate(&blocks, &geometry)?;

    assert_eq!(document.page_count(), 2);
    assert_eq!(document.pages[0].blocks.len(), 1);
    assert_eq!(document.pages[0].blocks[0].block, ContentBlock::paragraph("intro"));
    assert_eq!(document.pages[1].blocks.len(), 1);
    assert_eq!(document.pages[1].blocks[0].height, 500.0);
    assert_eq!(document.pages[1].blocks[0].y, 15.0);
    Ok(())
}

#[test]
fn geometry_errors_come_before_any_page() {
    let geometry = PageGeometry {
        width: 300.0,
        height: 20.0,
        margin: 15.0,
    };
    let result = Paginator::default().paginate(&[ContentBlock::paragraph("x")], &geometry);
    assert!(matches!(result, Err(LayoutError::InvalidGeometry { .. })));
}

#[tokio::test]
async fn long_reports_keep_every_block_and_respect_the_page() -> TestResult {
    let insights = many_insights(60);
    let insight_refs: Vec<&str> = insights.iter().map(String::as_str).collect();
    let charts = (0..5)
        .map(|i| chart(&plot_markup(&format!("c{i}")), &format!("Chart {i}")))
        .collect();
    let source = ReportSource::from_payload(&payload(&"Long summary. ".repeat(80), &insight_refs, charts));

    let rasterizer = SolidRasterizer::default();
    let pipeline = ExportPipelineBuilder::new()
        .with_config(untitled())
        .with_rasterizer(&rasterizer)
        .build()?;
    let document = pipeline.layout(&source).await?;

    // 2 summary blocks + 1 heading + 60 bullets + 5 charts
    let placed: Vec<usize> = page_indices(&document).into_iter().flatten().collect();
    assert_eq!(placed.len(), 68);
    assert!(document.page_count() > 3);

    let blocks: Vec<ContentBlock> = document
        .pages
        .iter()
        .flat_map(|p| p.blocks.iter().map(|b| b.block.clone()))
        .collect();
    assert_document_invariants(&document, &blocks, &TextMeasure::default(), &SpacingRules::default());
    Ok(())
}

#[tokio::test]
async fn layout_is_deterministic() -> TestResult {
    let insights = many_insights(25);
    let insight_refs: Vec<&str> = insights.iter().map(String::as_str).collect();
    let source = ReportSource::from_payload(&payload(
        "Summary",
        &insight_refs,
        vec![chart(&plot_markup("c"), "Chart")],
    ));
    let rasterizer = SolidRasterizer::default();
    let pipeline = ExportPipelineBuilder::new()
        .with_config(untitled())
        .with_rasterizer(&rasterizer)
        .build()?;

    let first = pipeline.layout(&source).await?;
    let second = pipeline.layout(&source).await?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn shrink_to_fit_keeps_tall_charts_on_the_page() -> TestResult {
    let geometry = PageGeometry::a4();
    let tall = ContentBlock::chart(Bitmap::new(100, 400, vec![0u8; 100 * 400 * 3]), "Tall");
    let blocks = vec![tall];

    let accept = Paginator::default().paginate(&blocks, &geometry)?;
    assert!(accept.pages[0].blocks[0].height > geometry.max_content_height());

    let config = LayoutConfig {
        oversize: OversizePolicy::ShrinkToFit,
        ..LayoutConfig::default()
    };
    let shrunk = Paginator::new(config).paginate(&blocks, &geometry)?;
    assert!(shrunk.pages[0].blocks[0].height <= geometry.max_content_height() + 0.01);
    Ok(())
}

#[test]
fn text_measure_grows_with_content() {
    let measure = TextMeasure::default();
    let short = measure.measure(&ContentBlock::paragraph("One line."), 500.0);
    let long = measure.measure(&ContentBlock::paragraph("Many words here. ".repeat(100)), 500.0);
    assert!(long > short * 5.0);
}
