use super::{chart_error, sequential_color, CHART_FONT, PIE_SIZE, PIE_TITLE};
use crate::error::ReportResult;
use crate::types::SupplierSummary;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use std::path::Path;
use tracing::{debug, warn};

/// Slices start at 12 o'clock and run counter-clockwise
const START_ANGLE_DEG: f64 = 90.0;
const ARC_STEP_DEG: f64 = 1.0;

/// A slice's share of the whole and its angular extent, in degrees
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice<'a> {
    pub label: &'a str,
    pub share: f64,
    pub start: f64,
    pub sweep: f64,
}

/// Slices for suppliers with positive spend, in summary order
pub(crate) fn slices(summary: &[SupplierSummary]) -> Vec<Slice<'_>> {
    let total: f64 = summary
        .iter()
        .map(|s| s.total_cost)
        .filter(|c| *c > 0.0)
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = START_ANGLE_DEG;
    let mut out = Vec::with_capacity(summary.len());
    for row in summary {
        if row.total_cost <= 0.0 {
            warn!(supplier = %row.supplier, "non-positive spend left out of pie chart");
            continue;
        }
        let share = row.total_cost / total;
        let sweep = share * 360.0;
        out.push(Slice {
            label: &row.supplier,
            share,
            start,
            sweep,
        });
        start += sweep;
    }
    out
}

fn point_at(center: (i32, i32), radius: f64, angle_deg: f64) -> (i32, i32) {
    let rad = angle_deg * PI / 180.0;
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

fn wedge(center: (i32, i32), radius: f64, slice: &Slice) -> Vec<(i32, i32)> {
    let steps = (slice.sweep / ARC_STEP_DEG).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = slice.start + slice.sweep * i as f64 / steps as f64;
        points.push(point_at(center, radius, angle));
    }
    points
}

pub(super) fn render(summary: &[SupplierSummary], path: &Path, text: bool) -> ReportResult<()> {
    let root = BitMapBackend::new(path, PIE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error(path))?;

    let area = if text {
        root.titled(PIE_TITLE, (CHART_FONT, 24).into_font())
            .map_err(chart_error(path))?
    } else {
        root.clone()
    };

    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    // Square canvas and a circle: equal aspect ratio
    let radius = f64::from(width.min(height)) * 0.36;

    let slices = slices(summary);
    let count = slices.len();

    for (idx, slice) in slices.iter().enumerate() {
        let color = sequential_color(idx, count);
        area.draw(&Polygon::new(wedge(center, radius, slice), color.filled()))
            .map_err(chart_error(path))?;
    }

    if text {
        let centered = Pos::new(HPos::Center, VPos::Center);
        let label_style = TextStyle::from((CHART_FONT, 16).into_font()).pos(centered);
        let pct_style = TextStyle::from((CHART_FONT, 14).into_font())
            .color(&WHITE)
            .pos(centered);

        for slice in &slices {
            let mid = slice.start + slice.sweep / 2.0;
            area.draw(&Text::new(
                slice.label.to_string(),
                point_at(center, radius * 1.15, mid),
                label_style.clone(),
            ))
            .map_err(chart_error(path))?;
            area.draw(&Text::new(
                format!("{:.1}%", slice.share * 100.0),
                point_at(center, radius * 0.6, mid),
                pct_style.clone(),
            ))
            .map_err(chart_error(path))?;
        }
    }

    root.present().map_err(chart_error(path))?;
    debug!(path = %path.display(), slices = count, "rendered pie chart");
    Ok(())
}
