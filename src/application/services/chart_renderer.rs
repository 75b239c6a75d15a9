use serde_json::{Value, json};

use crate::domain::chart::ChartType;
use crate::domain::table::Table;

#[derive(Debug, PartialEq)]
pub enum RenderError {
    UnsupportedType(String),
    Failed(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::UnsupportedType(chart_type) => {
                write!(f, "Unsupported chart type: {}", chart_type)
            }
            RenderError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Produces a declarative, JSON-serializable Plotly figure (traces plus
/// layout) for a resolved chart configuration. Every chart type except pie
/// titles its axes with the column names; line charts also rotate the X tick
/// labels for readability.
pub fn render(chart_type: &str, table: &Table, x: &str, y: &str) -> Result<Value, RenderError> {
    let kind: ChartType = chart_type
        .parse()
        .map_err(|_| RenderError::UnsupportedType(chart_type.to_string()))?;

    match build_figure(kind, table, x, y) {
        Ok(figure) => {
            tracing::debug!(chart_type, "generated chart figure");
            Ok(figure)
        }
        Err(cause) => {
            tracing::error!(chart_type, %cause, "error generating chart");
            Err(RenderError::Failed(cause))
        }
    }
}

fn build_figure(kind: ChartType, table: &Table, x: &str, y: &str) -> Result<Value, String> {
    let xs = table
        .column_values(x)
        .ok_or_else(|| format!("column '{}' not found", x))?;
    let ys = table
        .column_values(y)
        .ok_or_else(|| format!("column '{}' not found", y))?;

    let figure = match kind {
        ChartType::Line => json!({
            "data": [{ "type": "scatter", "mode": "lines", "x": xs, "y": ys }],
            "layout": {
                "title": { "text": "Line Chart" },
                "xaxis": { "title": { "text": x }, "tickangle": -45 },
                "yaxis": { "title": { "text": y } },
            },
        }),
        ChartType::Bar => json!({
            "data": [{ "type": "bar", "x": xs, "y": ys }],
            "layout": {
                "title": { "text": "Bar Chart" },
                "xaxis": { "title": { "text": x } },
                "yaxis": { "title": { "text": y } },
            },
        }),
        ChartType::Pie => {
            let values = numeric_values(&ys, y)?;
            json!({
                "data": [{ "type": "pie", "labels": xs, "values": values }],
                "layout": { "title": { "text": "Pie Chart" } },
            })
        }
        ChartType::Scatter => json!({
            "data": [{ "type": "scatter", "mode": "markers", "x": xs, "y": ys }],
            "layout": {
                "title": { "text": "Scatter Plot" },
                "xaxis": { "title": { "text": x } },
                "yaxis": { "title": { "text": y } },
            },
        }),
        ChartType::Heatmap => json!({
            "data": [{ "type": "histogram2d", "x": xs, "y": ys }],
            "layout": {
                "title": { "text": "Heatmap" },
                "xaxis": { "title": { "text": x } },
                "yaxis": { "title": { "text": y } },
            },
        }),
    };

    Ok(figure)
}

fn numeric_values(values: &[Value], column: &str) -> Result<Vec<f64>, String> {
    values
        .iter()
        .map(|value| {
            value
                .as_f64()
                .ok_or_else(|| format!("non-numeric value {} in column '{}'", value, column))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::from_csv(b"category,value\nnorth,10\nsouth,25\n").unwrap()
    }

    #[test]
    fn test_line_chart_sets_axis_titles_and_tickangle() {
        let figure = render("line", &sample_table(), "category", "value").unwrap();

        assert_eq!(figure["layout"]["xaxis"]["title"]["text"], "category");
        assert_eq!(figure["layout"]["yaxis"]["title"]["text"], "value");
        assert_eq!(figure["layout"]["xaxis"]["tickangle"], -45);
    }

    #[test]
    fn test_pie_chart_has_no_axis_titles() {
        let figure = render("pie", &sample_table(), "category", "value").unwrap();

        assert!(figure["layout"].get("xaxis").is_none());
        assert!(figure["layout"].get("yaxis").is_none());
        assert_eq!(figure["data"][0]["type"], "pie");
        assert_eq!(figure["data"][0]["labels"][0], "north");
        assert_eq!(figure["data"][0]["values"][1], 25.0);
    }

    #[test]
    fn test_bar_chart_sets_axis_titles_without_tickangle() {
        let figure = render("bar", &sample_table(), "category", "value").unwrap();

        assert_eq!(figure["layout"]["xaxis"]["title"]["text"], "category");
        assert!(figure["layout"]["xaxis"].get("tickangle").is_none());
    }

    #[test]
    fn test_unsupported_type_is_rejected() {
        let result = render("sunburst", &sample_table(), "category", "value");
        assert_eq!(
            result,
            Err(RenderError::UnsupportedType("sunburst".to_string()))
        );
    }

    #[test]
    fn test_pie_with_non_numeric_values_fails() {
        let table = Table::from_csv(b"category,value\nnorth,high\n").unwrap();
        let result = render("pie", &table, "category", "value");
        assert!(matches!(result, Err(RenderError::Failed(_))));
    }

    #[test]
    fn test_figure_is_plain_json() {
        let figure = render("scatter", &sample_table(), "category", "value").unwrap();
        let round_trip: Value =
            serde_json::from_str(&serde_json::to_string(&figure).unwrap()).unwrap();
        assert_eq!(figure, round_trip);
    }
}
