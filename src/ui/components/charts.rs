use anyhow::{anyhow, Result};
use dioxus::prelude::*;
use plotters::prelude::*;

use crate::domain::entities::planet::{DiscoveryChart, HistogramBin, MethodCount, TimelinePoint};

pub const CHART_WIDTH: u32 = 720;
pub const CHART_HEIGHT: u32 = 280;
pub const MAX_AXIS_LABELS: usize = 15;

const BAR_COLOR: RGBColor = RGBColor(47, 111, 222);
const MARKER_COLOR: RGBColor = RGBColor(210, 64, 64);
const TEXT_COLOR: RGBColor = RGBColor(70, 70, 70);

#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

pub fn timeline_bars(points: &[TimelinePoint]) -> Vec<BarDatum> {
    points
        .iter()
        .map(|point| BarDatum {
            label: point.disc_year.to_string(),
            value: point.count as f64,
        })
        .collect()
}

pub fn method_bars(counts: &[MethodCount]) -> Vec<BarDatum> {
    counts
        .iter()
        .map(|entry| BarDatum {
            label: entry.disc_method.clone(),
            value: entry.count as f64,
        })
        .collect()
}

/// Every n-th category keeps its axis label so at most
/// [`MAX_AXIS_LABELS`] are drawn.
pub fn label_stride(count: usize) -> usize {
    count.div_ceil(MAX_AXIS_LABELS).max(1)
}

pub fn axis_label(bars: &[BarDatum], idx: usize) -> String {
    if idx % label_stride(bars.len()) != 0 {
        return String::new();
    }
    bars.get(idx).map(|bar| bar.label.clone()).unwrap_or_default()
}

fn value_ceiling(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Replaces the fixed pixel size with a viewBox so the chart scales with its container.
pub fn make_svg_responsive(svg: String, width: u32, height: u32) -> String {
    let needle = format!("width=\"{width}\" height=\"{height}\"");
    if svg.contains(&needle) {
        svg.replace(
            &needle,
            &format!(
                "viewBox=\"0 0 {width} {height}\" width=\"100%\" height=\"100%\" preserveAspectRatio=\"xMidYMid meet\""
            ),
        )
    } else {
        svg
    }
}

pub fn render_bar_chart(bars: &[BarDatum], width: u32, height: u32) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|err| anyhow!("failed to fill chart background: {err}"))?;

        let count = bars.len().max(1) as u32;
        let max = bars.iter().map(|bar| bar.value).fold(0.0_f64, f64::max);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..count).into_segmented(), 0.0..value_ceiling(max))
            .map_err(|err| anyhow!("failed to build chart axes: {err}"))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len().max(1))
            .y_labels(5)
            .axis_style(TEXT_COLOR)
            .label_style(("sans-serif", 11, &TEXT_COLOR))
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => {
                    axis_label(bars, *idx as usize)
                }
                SegmentValue::Last => String::new(),
            })
            .y_label_formatter(&|value| format!("{value:.0}"))
            .draw()
            .map_err(|err| anyhow!("failed to draw chart mesh: {err}"))?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(2)
                    .data(
                        bars.iter()
                            .enumerate()
                            .map(|(idx, bar)| (idx as u32, bar.value)),
                    ),
            )
            .map_err(|err| anyhow!("failed to draw bars: {err}"))?;

        root.present()
            .map_err(|err| anyhow!("failed to finish chart: {err}"))?;
    }
    Ok(make_svg_responsive(svg, width, height))
}

fn histogram_domain(bins: &[HistogramBin]) -> (f64, f64) {
    let start = bins.iter().map(|bin| bin.start).fold(f64::INFINITY, f64::min);
    let end = bins.iter().map(|bin| bin.end).fold(f64::NEG_INFINITY, f64::max);
    if start.is_finite() && end.is_finite() && end > start {
        (start, end)
    } else {
        (0.0, 1.0)
    }
}

/// Draws the bins plus vertical markers for the mean and sigma bounds.
pub fn render_histogram(chart_data: &DiscoveryChart, width: u32, height: u32) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|err| anyhow!("failed to fill chart background: {err}"))?;

        let (start, end) = histogram_domain(&chart_data.bins);
        let max = chart_data
            .bins
            .iter()
            .map(|bin| bin.count as f64)
            .fold(0.0_f64, f64::max);
        let ceiling = value_ceiling(max);

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(start..end, 0.0..ceiling)
            .map_err(|err| anyhow!("failed to build chart axes: {err}"))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(10)
            .y_labels(5)
            .axis_style(TEXT_COLOR)
            .label_style(("sans-serif", 11, &TEXT_COLOR))
            .x_label_formatter(&|value| format!("{value:.0}"))
            .y_label_formatter(&|value| format!("{value:.0}"))
            .draw()
            .map_err(|err| anyhow!("failed to draw chart mesh: {err}"))?;

        chart
            .draw_series(chart_data.bins.iter().map(|bin| {
                Rectangle::new(
                    [(bin.start, 0.0), (bin.end, bin.count as f64)],
                    BAR_COLOR.mix(0.8).filled(),
                )
            }))
            .map_err(|err| anyhow!("failed to draw bins: {err}"))?;

        let markers = [chart_data.mean, chart_data.lower, chart_data.upper];
        for x in markers.into_iter().flatten().filter(|x| x.is_finite()) {
            chart
                .draw_series(LineSeries::new(
                    [(x, 0.0), (x, ceiling)],
                    MARKER_COLOR.stroke_width(2),
                ))
                .map_err(|err| anyhow!("failed to draw marker: {err}"))?;
        }

        root.present()
            .map_err(|err| anyhow!("failed to finish chart: {err}"))?;
    }
    Ok(make_svg_responsive(svg, width, height))
}

#[component]
pub fn ChartPanel(
    #[props(into)] title: String,
    #[props(!optional)] svg: Option<String>,
    loading: bool,
    empty: bool,
) -> Element {
    rsx! {
        div {
            style: "border: 1px solid #ddd; border-radius: 8px; background: #fff; padding: 10px 12px;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "{title}" }
            if empty && !loading {
                p { style: "color: #666;", "No data to chart." }
            } else if let Some(svg) = svg {
                div {
                    style: "width: 100%; aspect-ratio: 18 / 7; min-height: 160px;",
                    dangerous_inner_html: "{svg}"
                }
            } else {
                div {
                    style: "width: 100%; aspect-ratio: 18 / 7; min-height: 160px; border-radius: 6px; background: #eef0f3;"
                }
            }
        }
    }
}
