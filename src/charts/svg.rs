//! Plotters-powered SVG rendering of chart specs.
//!
//! Each spec becomes one SVG file. Styling comes from [`ChartStyle`]; nothing
//! here reads or writes global plotting state.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::charts::spec::{Bins, ChartSpec};
use crate::domain::ChartStyle;
use crate::error::AppError;

type DrawResult = Result<(), Box<dyn std::error::Error>>;
type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Draw every spec into `out_dir`, in order, returning the written paths.
pub fn render_all(specs: &[ChartSpec], style: &ChartStyle, out_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| AppError::io(format!("Failed to create chart dir '{}': {e}", out_dir.display())))?;

    let mut paths = Vec::with_capacity(specs.len());
    for spec in specs {
        let path = out_dir.join(spec.file_name());
        render(spec, style, &path)
            .map_err(|e| AppError::render(format!("Failed to draw chart '{}': {e}", path.display())))?;
        debug!(path = %path.display(), title = %spec.title(), "chart written");
        paths.push(path);
    }
    Ok(paths)
}

fn render(spec: &ChartSpec, style: &ChartStyle, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let title = spec.title();
    let (x_desc, y_desc) = spec.axis_labels();
    let labels = Labels {
        title: &title,
        x_desc,
        y_desc,
    };

    match spec {
        ChartSpec::TimeSeries { location, points } => draw_time_series(&root, style, &labels, location, points)?,
        ChartSpec::TopBar { bars } => draw_top_bar(&root, style, &labels, bars)?,
        ChartSpec::Histogram { bins } => draw_histogram(&root, style, &labels, bins)?,
        ChartSpec::Scatter { points, .. } => draw_scatter(&root, style, &labels, points)?,
    }

    root.present()?;
    Ok(())
}

struct Labels<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Axis upper bound with a little headroom; never degenerate.
fn upper_bound(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 { max * 1.05 } else { 1.0 }
}

fn draw_time_series(
    root: &Area<'_>,
    style: &ChartStyle,
    labels: &Labels<'_>,
    location: &str,
    points: &[(NaiveDate, f64)],
) -> DrawResult {
    let start = points.first().map(|(d, _)| *d).unwrap_or(NaiveDate::MIN);
    // Days since the first point keep the x axis a plain integer range.
    let series: Vec<(i64, f64)> = points
        .iter()
        .map(|(d, v)| ((*d - start).num_days(), *v))
        .collect();
    let x_max = series.last().map(|(x, _)| *x).unwrap_or(0).max(1);
    let y_max = upper_bound(series.iter().map(|(_, v)| *v).fold(0.0, f64::max));

    let mut chart = ChartBuilder::on(root)
        .caption(labels.title, (style.font_family.as_str(), style.title_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0i64..x_max, 0f64..y_max)?;

    let grid = rgb(style.grid);
    let format_day = |x: &i64| {
        start
            .checked_add_signed(Duration::days(*x))
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .bold_line_style(&grid)
        .x_labels(6)
        .x_label_formatter(&format_day)
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .label_style((style.font_family.as_str(), style.label_size))
        .draw()?;

    let color = rgb(style.primary);
    chart
        .draw_series(LineSeries::new(series, &color))?
        .label(format!("New cases - {location}"))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((style.font_family.as_str(), style.label_size))
        .draw()?;

    Ok(())
}

fn draw_top_bar(root: &Area<'_>, style: &ChartStyle, labels: &Labels<'_>, bars: &[(String, f64)]) -> DrawResult {
    let n = bars.len().max(1) as u32;
    let x_max = upper_bound(bars.iter().map(|(_, v)| *v).fold(0.0, f64::max));
    let names: Vec<String> = bars.iter().map(|(name, _)| name.clone()).collect();

    let mut chart = ChartBuilder::on(root)
        .caption(labels.title, (style.font_family.as_str(), style.title_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(140)
        .build_cartesian_2d(0f64..x_max, (0u32..n).into_segmented())?;

    let grid = rgb(style.grid);
    let location_name = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => names.get(*i as usize).cloned().unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };
    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .bold_line_style(&grid)
        .disable_y_mesh()
        .y_labels(bars.len().max(1))
        .y_label_formatter(&location_name)
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .label_style((style.font_family.as_str(), style.label_size))
        .draw()?;

    let color = rgb(style.primary);
    chart.draw_series(bars.iter().enumerate().map(|(i, (_, v))| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [(0.0, SegmentValue::Exact(i)), (*v, SegmentValue::Exact(i + 1))],
            color.filled(),
        );
        bar.set_margin(6, 6, 0, 0);
        bar
    }))?;

    Ok(())
}

fn draw_histogram(root: &Area<'_>, style: &ChartStyle, labels: &Labels<'_>, bins: &Bins) -> DrawResult {
    let x_min = bins.edges.first().copied().unwrap_or(0.0);
    let x_max = bins.edges.last().copied().unwrap_or(1.0);
    let y_max = upper_bound(bins.counts.iter().copied().max().unwrap_or(0) as f64);

    let mut chart = ChartBuilder::on(root)
        .caption(labels.title, (style.font_family.as_str(), style.title_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    let grid = rgb(style.grid);
    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .bold_line_style(&grid)
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .label_style((style.font_family.as_str(), style.label_size))
        .draw()?;

    let color = rgb(style.primary);
    let bars = || {
        bins.counts
            .iter()
            .enumerate()
            .map(|(i, c)| [(bins.edges[i], 0.0), (bins.edges[i + 1], *c as f64)])
    };
    chart.draw_series(bars().map(|corners| Rectangle::new(corners, color.filled())))?;
    // Black bin outlines.
    chart.draw_series(bars().map(|corners| Rectangle::new(corners, BLACK.stroke_width(1))))?;

    Ok(())
}

fn draw_scatter(root: &Area<'_>, style: &ChartStyle, labels: &Labels<'_>, points: &[(f64, f64)]) -> DrawResult {
    let x_max = upper_bound(points.iter().map(|(x, _)| *x).fold(0.0, f64::max));
    let y_max = upper_bound(points.iter().map(|(_, y)| *y).fold(0.0, f64::max));

    let mut chart = ChartBuilder::on(root)
        .caption(labels.title, (style.font_family.as_str(), style.title_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    let grid = rgb(style.grid);
    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .bold_line_style(&grid)
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .label_style((style.font_family.as_str(), style.label_size))
        .draw()?;

    let color = rgb(style.primary);
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, color.mix(0.6).filled())),
    )?;

    Ok(())
}
