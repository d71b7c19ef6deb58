use reportly_layout::{Bitmap, BlockKind, ContentBlock};
use reportly_report::{BlockRenderError, ChartSlot, ReportBuilder, ReportSource, chart_target};
use serde_json::json;

/// Runs the builder the way an export does: charts with a drawable element
/// get a bitmap, the rest are reported missing.
fn build(payload: serde_json::Value) -> Vec<ContentBlock> {
    let source = ReportSource::from_payload(&payload);
    let slots = source
        .charts
        .iter()
        .map(|chart| match chart_target(&chart.markup) {
            Some(_) => ChartSlot::Rendered {
                bitmap: Bitmap::new(10, 6, vec![0u8; 10 * 6 * 3]),
                caption: chart.caption.clone(),
            },
            None => ChartSlot::Missing {
                caption: chart.caption.clone(),
                reason: BlockRenderError::MissingChartElement,
            },
        })
        .collect();
    ReportBuilder::default().build(&source, slots)
}

#[test]
fn analysis_service_payload_becomes_ordered_blocks() {
    let _ = env_logger::builder().is_test(true).try_init();

    let blocks = build(json!({
        "analysis": {
            "summary": "Analysis summary",
            "insights": ["ignored: visualization insights win"]
        },
        "visualizations": {
            "summary": "Visualization summary",
            "insights": ["Sales peak in December", "Returns cluster after promotions"],
            "charts": [
                { "html": "<div><div id=\"a1\" class=\"plotly-graph-div\"></div></div>", "description": "Monthly sales" },
                { "html": "", "description": "Return rate" }
            ]
        }
    }));

    let kinds: Vec<BlockKind> = blocks.iter().map(ContentBlock::kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Heading,
            BlockKind::Paragraph,
            BlockKind::Heading,
            BlockKind::BulletItem,
            BlockKind::BulletItem,
            BlockKind::ChartImage,
            BlockKind::Paragraph,
        ]
    );
    assert_eq!(blocks[1], ContentBlock::paragraph("Visualization summary"));
    assert_eq!(blocks[3], ContentBlock::bullet("Sales peak in December"));
    assert_eq!(blocks[6], ContentBlock::paragraph("[Chart unavailable] Return rate"));
}

#[test]
fn empty_payload_still_has_a_summary() {
    let blocks = build(json!({ "visualizations": { "charts": "nope" } }));
    assert_eq!(
        blocks,
        vec![
            ContentBlock::heading("Executive Summary", 2),
            ContentBlock::paragraph("No summary available"),
        ]
    );
}
