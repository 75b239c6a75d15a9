use std::str::FromStr;

/// The chart families the renderer knows how to draw. The resolved
/// configuration keeps the type as a free string until render time, so
/// caller-supplied overrides stay untouched and unknown types are rejected
/// in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Scatter,
    Heatmap,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
            ChartType::Heatmap => "heatmap",
        }
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ChartType::Line),
            "bar" => Ok(ChartType::Bar),
            "pie" => Ok(ChartType::Pie),
            "scatter" => Ok(ChartType::Scatter),
            "heatmap" => Ok(ChartType::Heatmap),
            other => Err(format!("Unsupported chart type: {}", other)),
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved chart configuration. `y` is only ever `None` for tables with a
/// single column, which validation normally rules out before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub chart_type: String,
    pub x: String,
    pub y: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_round_trip() {
        for name in ["line", "bar", "pie", "scatter", "heatmap"] {
            let parsed: ChartType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_chart_type_is_rejected() {
        let result = "sunburst".parse::<ChartType>();
        assert_eq!(result, Err("Unsupported chart type: sunburst".to_string()));
    }
}
