//! Canvas-based chart primitives shared by the trend, funnel and attach
//! views: a rate line with point markers, bar panels with an overlay line,
//! and the tiny sparkline strings used in table cells.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    symbols::Marker,
    widgets::{
        Block, Paragraph,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::core::format;
use crate::core::metrics::{RatePoint, TrendPoint};
use crate::core::normalize;
use crate::tui::theme::Theme;

/// Logical canvas size; everything is drawn in this coordinate space
const W: f64 = 100.0;
const H: f64 = 100.0;

const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A one-line sparkline: each value becomes a block glyph scaled by the
/// series maximum. Empty or all-zero series produce bottom glyphs.
pub fn sparkline_string(trend: &[f64]) -> String {
    let max = trend.iter().copied().fold(0.0, f64::max);
    trend
        .iter()
        .map(|v| {
            if max <= 0.0 {
                SPARK_GLYPHS[0]
            } else {
                let level = (v / max * (SPARK_GLYPHS.len() - 1) as f64).round() as usize;
                SPARK_GLYPHS[level.min(SPARK_GLYPHS.len() - 1)]
            }
        })
        .collect()
}

/// Render a rate-over-time line chart inside `block`: min/mid/max axis
/// labels on the left, the line with point markers in the middle, first and
/// last period labels underneath.
pub fn render_rate_trend(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    block: Block,
    points: &[RatePoint],
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if points.is_empty() || inner.height < 4 || inner.width < 12 {
        return;
    }

    let values: Vec<f64> = points.iter().map(|p| p.rate).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(inner);
    let axis = columns[0];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(columns[1]);
    let plot = rows[0];
    let x_labels = rows[1];

    // Axis labels at the top, middle and bottom of the plot column
    let labels = [
        (axis.y, format::pct1(max)),
        (axis.y + axis.height.saturating_sub(2) / 2, format::pct1((max + min) / 2.0)),
        (axis.y + axis.height.saturating_sub(2), format::pct1(min)),
    ];
    for (y, text) in labels {
        let row = Rect {
            x: axis.x,
            y,
            width: axis.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(text).style(theme.muted_style()).alignment(Alignment::Right),
            row,
        );
    }

    let line_color = theme.chart_line;
    let series = values.clone();
    let canvas = Canvas::default()
        .x_bounds([0.0, W])
        .y_bounds([0.0, H])
        .marker(Marker::Braille)
        .paint(move |ctx| {
            let xs = normalize::x_positions(series.len(), W);
            let ys = normalize::y_positions(&series, H);
            for i in 1..series.len() {
                ctx.draw(&CanvasLine {
                    x1: xs[i - 1],
                    y1: H - ys[i - 1],
                    x2: xs[i],
                    y2: H - ys[i],
                    color: line_color,
                });
            }
            let coords: Vec<(f64, f64)> =
                xs.iter().zip(ys.iter()).map(|(x, y)| (*x, H - *y)).collect();
            ctx.draw(&Points {
                coords: &coords,
                color: line_color,
            });
        });
    frame.render_widget(canvas, plot);

    // First and last period under the plot
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        frame.render_widget(
            Paragraph::new(first.period.clone()).style(theme.muted_style()),
            x_labels,
        );
        frame.render_widget(
            Paragraph::new(last.period.clone())
                .style(theme.muted_style())
                .alignment(Alignment::Right),
            x_labels,
        );
    }
}

/// Render one metric's trend panel: a bar per period plus a muted overlay
/// line for the comparison series (scaled by the bar maximum, like the
/// bars).
pub fn render_metric_panel(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    block: Block,
    series: &[TrendPoint],
    overlay: &[f64],
    color: Color,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if series.is_empty() || inner.height < 3 || inner.width < 8 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let plot = rows[0];
    let x_labels = rows[1];

    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let max = values.iter().copied().fold(0.0, f64::max).max(f64::MIN_POSITIVE);
    let overlay: Vec<f64> = overlay.to_vec();
    let overlay_color = theme.chart_overlay;

    let canvas = Canvas::default()
        .x_bounds([0.0, W])
        // Headroom: the overlay may run slightly above the tallest bar
        .y_bounds([0.0, H * 1.15])
        .marker(Marker::Braille)
        .paint(move |ctx| {
            let slot = W / values.len() as f64;
            // Overlay line behind the bars
            for i in 1..overlay.len() {
                ctx.draw(&CanvasLine {
                    x1: (i as f64 - 0.5) * slot,
                    y1: overlay[i - 1] / max * H,
                    x2: (i as f64 + 0.5) * slot,
                    y2: overlay[i] / max * H,
                    color: overlay_color,
                });
            }
            for (i, value) in values.iter().enumerate() {
                let x = (i as f64 + 0.5) * slot;
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: 0.0,
                    x2: x,
                    y2: value / max * H,
                    color,
                });
            }
        });
    frame.render_widget(canvas, plot);

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        frame.render_widget(
            Paragraph::new(first.period.clone()).style(theme.muted_style()),
            x_labels,
        );
        frame.render_widget(
            Paragraph::new(last.period.clone())
                .style(theme.muted_style())
                .alignment(Alignment::Right),
            x_labels,
        );
    }
}
