use super::{category_color, chart_error, CHART_FONT, LINE_SIZE, LINE_TITLE};
use crate::error::ReportResult;
use crate::types::CleanedTable;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// One supplier's (lead time, total cost) trace
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Trace {
    pub supplier: String,
    pub points: Vec<(f64, f64)>,
}

/// Traces per supplier, in first-seen order. Points are sorted by lead time;
/// repeated lead times of one supplier collapse to their mean cost. Rows
/// without a supplier or lead time are not plotted.
pub(crate) fn traces(cleaned: &CleanedTable) -> Vec<Trace> {
    let mut traces: Vec<Trace> = Vec::new();

    for record in &cleaned.records {
        let (Some(supplier), Some(lead_time)) = (record.supplier.as_deref(), record.lead_time)
        else {
            continue;
        };
        let point = (lead_time, record.total_cost);
        match traces.iter_mut().find(|t| t.supplier == supplier) {
            Some(trace) => trace.points.push(point),
            None => traces.push(Trace {
                supplier: supplier.to_string(),
                points: vec![point],
            }),
        }
    }

    for trace in &mut traces {
        trace.points.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut merged: Vec<(f64, f64, usize)> = Vec::with_capacity(trace.points.len());
        for &(x, y) in &trace.points {
            match merged.last_mut() {
                Some(last) if last.0 == x => {
                    last.1 += y;
                    last.2 += 1;
                }
                _ => merged.push((x, y, 1)),
            }
        }
        trace.points = merged
            .into_iter()
            .map(|(x, sum, n)| (x, sum / n as f64))
            .collect();
    }

    traces
}

/// Padded axis range covering every value; a single value gets ±1
fn padded_range(values: impl Iterator<Item = f64>, floor_at_zero: bool) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let min = if floor_at_zero { min.min(0.0) } else { min };
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    let lo = if floor_at_zero && min >= 0.0 { min } else { min - pad };
    (lo, max + pad)
}

pub(super) fn render(cleaned: &CleanedTable, path: &Path, text: bool) -> ReportResult<()> {
    let root = BitMapBackend::new(path, LINE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error(path))?;

    let traces = traces(cleaned);
    let all_points = || traces.iter().flat_map(|t| t.points.iter().copied());
    let (x_lo, x_hi) = padded_range(all_points().map(|p| p.0), false);
    let (y_lo, y_hi) = padded_range(all_points().map(|p| p.1), true);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if text {
        builder
            .caption(LINE_TITLE, (CHART_FONT, 24).into_font())
            .x_label_area_size(50)
            .y_label_area_size(80);
    }
    let mut chart = builder
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(chart_error(path))?;

    let dollars = |v: &f64| format!("${:.0}", v);
    let days = |v: &f64| format!("{:.0}", v);

    let mut mesh = chart.configure_mesh();
    if text {
        mesh.x_desc("Lead Time (days)")
            .y_desc("Total Cost ($)")
            .x_label_formatter(&days)
            .y_label_formatter(&dollars)
            .axis_desc_style((CHART_FONT, 16).into_font());
    } else {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw().map_err(chart_error(path))?;

    for (idx, trace) in traces.iter().enumerate() {
        let color = category_color(idx);

        chart
            .draw_series(LineSeries::new(trace.points.iter().copied(), color.stroke_width(2)))
            .map_err(chart_error(path))?
            .label(trace.supplier.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .draw_series(
                trace
                    .points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )
            .map_err(chart_error(path))?;
    }

    if text && !traces.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((CHART_FONT, 14).into_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_error(path))?;
    }

    root.present().map_err(chart_error(path))?;
    debug!(path = %path.display(), series = traces.len(), "rendered line chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, CleanedRecord, CleaningStats};
    use pretty_assertions::assert_eq;

    fn record(supplier: Option<&str>, total_cost: f64, lead_time: Option<f64>) -> CleanedRecord {
        CleanedRecord {
            supplier: supplier.map(str::to_string),
            unit_cost: total_cost,
            quantity: 1.0,
            lead_time,
            total_cost,
            cells: vec![CellValue::Empty],
        }
    }

    fn table(records: Vec<CleanedRecord>) -> CleanedTable {
        CleanedTable {
            headers: vec![],
            records,
            stats: CleaningStats::default(),
        }
    }

    #[test]
    fn test_traces_multi_point_per_supplier() {
        let traces = traces(&table(vec![
            record(Some("A"), 20.0, Some(7.0)),
            record(Some("B"), 100.0, Some(3.0)),
            record(Some("A"), 20.0, Some(2.0)),
        ]));

        assert_eq!(
            traces,
            vec![
                Trace {
                    supplier: "A".to_string(),
                    points: vec![(2.0, 20.0), (7.0, 20.0)],
                },
                Trace {
                    supplier: "B".to_string(),
                    points: vec![(3.0, 100.0)],
                },
            ]
        );
    }

    #[test]
    fn test_traces_average_repeated_lead_time() {
        let traces = traces(&table(vec![
            record(Some("A"), 10.0, Some(5.0)),
            record(Some("A"), 30.0, Some(5.0)),
        ]));
        assert_eq!(traces[0].points, vec![(5.0, 20.0)]);
    }

    #[test]
    fn test_traces_skip_unplottable_rows() {
        let traces = traces(&table(vec![
            record(None, 10.0, Some(5.0)),
            record(Some("A"), 30.0, None),
        ]));
        assert!(traces.is_empty());
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(std::iter::empty(), false), (0.0, 1.0));
        assert_eq!(padded_range([4.0].into_iter(), false), (3.0, 5.0));
        assert_eq!(padded_range([0.0, 100.0].into_iter(), true), (0.0, 105.0));
        let (lo, hi) = padded_range([10.0, 20.0].into_iter(), false);
        assert!((lo - 9.5).abs() < 1e-9 && (hi - 20.5).abs() < 1e-9);
    }
}
