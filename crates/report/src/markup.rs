//! Chart markup inspection.
//!
//! Chart markup is an HTML fragment: one or more `<div>` elements plus the
//! script that draws into them. Only the element the chart is drawn into
//! matters here; the markup is otherwise passed through to the rasterizer
//! untouched.

use regex::Regex;
use std::sync::LazyLock;

const PLOT_CLASS: &str = "plotly-graph-div";

static DIV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<div\b([^>]*)>").expect("BUG: invalid DIV_RE regex literal")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(?:^|\s)(id|class)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("BUG: invalid ATTR_RE regex literal")
});

/// The element a chart is drawn into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartTarget {
    pub element_id: Option<String>,
    pub classes: Vec<String>,
}

impl ChartTarget {
    pub fn is_plot(&self) -> bool {
        self.classes.iter().any(|c| c == PLOT_CLASS)
    }
}

/// Finds the plot element in `markup`.
///
/// Only a `<div>` carrying the plot class counts. Markup without one, such as
/// the `chart-error` fragment the analysis service returns when it could not
/// draw a chart, has no target.
pub fn chart_target(markup: &str) -> Option<ChartTarget> {
    DIV_RE
        .captures_iter(markup)
        .map(|caps| parse_attributes(caps.get(1).map_or("", |m| m.as_str())))
        .find(ChartTarget::is_plot)
}

fn parse_attributes(attributes: &str) -> ChartTarget {
    let mut target = ChartTarget::default();
    for caps in ATTR_RE.captures_iter(attributes) {
        let value = (2..=4)
            .find_map(|i| caps.get(i))
            .map_or("", |m| m.as_str());
        match caps[1].to_ascii_lowercase().as_str() {
            "id" if target.element_id.is_none() && !value.is_empty() => {
                target.element_id = Some(value.to_string());
            }
            "class" => {
                target
                    .classes
                    .extend(value.split_whitespace().map(str::to_string));
            }
            _ => {}
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_the_plot_element() {
        let markup = r#"<div>
            <div id="3f2a" class="plotly-graph-div js-plotly-plot" style="height:100%"></div>
            <script type="text/javascript">Plotly.newPlot("3f2a", [])</script>
        </div>"#;
        let target = chart_target(markup).unwrap();
        assert_eq!(target.element_id.as_deref(), Some("3f2a"));
        assert!(target.is_plot());
    }

    #[test]
    fn unquoted_attributes_and_uppercase_tags() {
        let target = chart_target("<DIV id=chart-1 CLASS=plotly-graph-div data-x='1'></DIV>").unwrap();
        assert_eq!(target.element_id.as_deref(), Some("chart-1"));
        assert!(target.is_plot());
    }

    #[test]
    fn data_attributes_are_not_ids() {
        let target = chart_target(r#"<div data-id="nope" class='a  plotly-graph-div'></div>"#).unwrap();
        assert_eq!(target.element_id, None);
        assert_eq!(target.classes, vec!["a", "plotly-graph-div"]);
    }

    #[test]
    fn divs_without_the_plot_class_are_not_targets() {
        let error = r#"<div class="chart-error">Chart generation error: 'revenue' column not found</div>"#;
        assert_eq!(chart_target(error), None);
        assert_eq!(chart_target("<div id='c1'><p>loading</p></div>"), None);
    }

    #[test]
    fn markup_without_div_has_no_target() {
        assert_eq!(chart_target(""), None);
        assert_eq!(chart_target("<script>draw()</script>"), None);
        assert_eq!(chart_target("<divider></divider>"), None);
    }
}
