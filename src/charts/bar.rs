use super::{chart_error, sequential_color, BAR_SIZE, BAR_TITLE, CHART_FONT};
use crate::error::ReportResult;
use crate::types::SupplierSummary;
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;
use tracing::debug;

/// Upper bound of the value axis, leaving headroom above the tallest bar
pub(crate) fn value_axis_max(summary: &[SupplierSummary]) -> f64 {
    let max = summary.iter().map(|s| s.total_cost).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

pub(super) fn render(summary: &[SupplierSummary], path: &Path, text: bool) -> ReportResult<()> {
    let root = BitMapBackend::new(path, BAR_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error(path))?;

    let bars = summary.len().max(1);
    let y_max = value_axis_max(summary);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if text {
        builder
            .caption(BAR_TITLE, (CHART_FONT, 24).into_font())
            .x_label_area_size(100)
            .y_label_area_size(80);
    }
    let mut chart = builder
        .build_cartesian_2d((0..bars).into_segmented(), 0f64..y_max)
        .map_err(chart_error(path))?;

    let supplier_label = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => summary
            .get(*i)
            .map(|s| s.supplier.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };
    let dollars = |v: &f64| format!("${:.0}", v);

    // Without a font there are no label areas, so the mesh is skipped
    if text {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars)
            .x_label_formatter(&supplier_label)
            .x_label_style(
                (CHART_FONT, 14)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&dollars)
            .y_desc("Total Cost ($)")
            .axis_desc_style((CHART_FONT, 16).into_font())
            .draw()
            .map_err(chart_error(path))?;
    }

    chart
        .draw_series(summary.iter().enumerate().map(|(idx, row)| {
            let color = sequential_color(idx, summary.len());
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0.0),
                    (SegmentValue::Exact(idx + 1), row.total_cost.max(0.0)),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(chart_error(path))?;

    root.present().map_err(chart_error(path))?;
    debug!(path = %path.display(), bars = summary.len(), "rendered bar chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn summary_rows() -> Vec<SupplierSummary> {
        vec![
            SupplierSummary {
                supplier: "B".to_string(),
                quantity: 1.0,
                total_cost: 100.0,
                lead_time: None,
            },
            SupplierSummary {
                supplier: "A".to_string(),
                quantity: 6.0,
                total_cost: 40.0,
                lead_time: None,
            },
        ]
    }

    #[test]
    fn test_render_without_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bar_chart.png");

        render(&summary_rows(), &path, false).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_render_without_text_single_bar() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bar_chart.png");

        render(&summary_rows()[..1], &path, false).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_render_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("bar_chart.png");

        let err = render(&summary_rows(), &path, false).unwrap_err();
        assert!(err.to_string().contains("bar_chart.png"), "{err}");
    }

    #[test]
    fn test_value_axis_max() {
        let summary = summary_rows();
        assert!((value_axis_max(&summary) - 110.0).abs() < 1e-9);
        assert_eq!(value_axis_max(&[]), 1.0);
    }
}
