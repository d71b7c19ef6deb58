use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageBuffer, ImageFormat, Rgb};
use serde_json::{Value, json};
use std::io::Cursor;

/// Chart markup shaped like the output of a plotting library: a wrapper div,
/// the plot div and the drawing script.
pub fn plot_markup(id: &str) -> String {
    format!(
        r#"<div><div id="{id}" class="plotly-graph-div" style="height:600px; width:100%;"></div><script type="text/javascript">Plotly.newPlot("{id}", []);</script></div>"#
    )
}

/// The fragment the analysis service returns when it fails to draw a chart.
pub fn chart_error_markup(message: &str) -> String {
    format!(r#"<div class="chart-error">Chart generation error: {message}</div>"#)
}

/// Plot markup that also carries a pre-rendered PNG snapshot.
pub fn plot_markup_with_png(id: &str, width: u32, height: u32) -> String {
    let img = ImageBuffer::from_pixel(width, height, Rgb([46u8, 77, 140]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode test png");
    format!(
        r#"<div id="{id}" class="plotly-graph-div"><img src="data:image/png;base64,{}"></div>"#,
        STANDARD.encode(bytes)
    )
}

pub fn chart(html: &str, description: &str) -> Value {
    json!({ "html": html, "description": description })
}

pub fn payload(summary: &str, insights: &[&str], charts: Vec<Value>) -> Value {
    json!({
        "analysis": { "summary": summary, "insights": insights },
        "visualizations": { "charts": charts }
    })
}

pub fn many_insights(count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| {
            format!(
                "Insight {i}: revenue in segment {i} moved against the quarterly trend, \
                 driven mostly by changes in order volume rather than in price."
            )
        })
        .collect()
}
