use canopy_core::metric::leading_number;
use canopy_core::models::{AnalysisResult, ChartDataset, ChartKind, ChartSpec, Rgba};

pub const DATASET_LABEL: &str = "Tree Analysis Metrics";

pub const METRIC_LABELS: [&str; 3] = [
    "Trees Detected",
    "Area Covered (km²)",
    "Tree Density (per km²)",
];

const FILL_ALPHA: f32 = 0.6;

/// Bar colors in label order
pub const METRIC_COLORS: [Rgba; 3] = [
    Rgba::new(54, 162, 235, FILL_ALPHA),
    Rgba::new(75, 192, 192, FILL_ALPHA),
    Rgba::new(255, 206, 86, FILL_ALPHA),
];

/// Bar chart of tree count, covered area and density.
///
/// Area and density come from the leading number of their display strings,
/// `NaN` when they don't start with one.
pub fn metrics_chart(result: &AnalysisResult) -> ChartSpec {
    let data = vec![
        result.tree_count as f64,
        leading_number(&result.area),
        leading_number(&result.density),
    ];

    ChartSpec {
        kind: ChartKind::Bar,
        labels: METRIC_LABELS.iter().map(|l| l.to_string()).collect(),
        datasets: vec![ChartDataset {
            label: DATASET_LABEL.to_string(),
            data,
            background_colors: METRIC_COLORS.to_vec(),
            border_colors: METRIC_COLORS.iter().map(|c| c.with_alpha(1.0)).collect(),
            border_width: 1,
        }],
        y_begin_at_zero: true,
    }
}
