//! Plotters-powered chart widget for the dashboard panels.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - one code path for all three series kinds (line, bar, area)
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{Background, SeriesKind, SeriesPoint};
use crate::report::format::month_label;

/// Single series color for all panels.
const SERIES_RGB: RGBColor = RGBColor(0, 120, 200);

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: points, kind, and background are
/// computed by the pipeline outside the render call. This keeps `render()`
/// focused on drawing and makes the data prep testable separately.
pub struct SalesChart<'a> {
    /// Chart-ready points in month order.
    pub points: &'a [SeriesPoint],
    /// How to draw the series.
    pub kind: SeriesKind,
    /// Plot background, toggled by the click counter.
    pub background: Background,
}

impl Widget for SalesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 16 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        if self.points.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No data for the current selection.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.points.len();

        // Index-based x axis: one slot per point, with half-slot padding so
        // bars at the edges stay inside the plotting area.
        let x0 = -0.5;
        let x1 = n as f64 - 0.5;

        let mut y_min = 0.0_f64;
        let mut y_max = f64::NEG_INFINITY;
        for p in self.points {
            y_min = y_min.min(p.value);
            y_max = y_max.max(p.value);
        }
        if !y_max.is_finite() || y_max <= y_min {
            y_max = y_min + 1.0;
        }
        let pad = ((y_max - y_min).abs() * 0.05).max(1e-9);
        let y0 = if y_min < 0.0 { y_min - pad } else { y_min };
        let y1 = y_max + pad;

        let (r, g, b) = self.background.rgb();
        let background = RGBColor(r, g, b);

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            // The toggled background fills the plotting area uniformly.
            root.fill(&background)?;

            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // Mesh lines are disabled to reduce visual clutter in
            // low-resolution terminal rendering; the filled background plus
            // axes are enough for a dashboard panel. Labels are dark so they
            // stay readable on both background variants.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(3.min(n))
                .y_labels(4)
                .x_label_formatter(&|v| {
                    let i = v.round();
                    if i < 0.0 || i >= n as f64 {
                        return String::new();
                    }
                    month_label(self.points[i as usize].month)
                })
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&BLACK))
                .axis_style(&BLACK)
                .bold_line_style(&BLACK)
                .draw()?;

            match self.kind {
                SeriesKind::Line => {
                    chart.draw_series(LineSeries::new(
                        self.points
                            .iter()
                            .enumerate()
                            .map(|(i, p)| (i as f64, p.value)),
                        &SERIES_RGB,
                    ))?;
                }
                SeriesKind::Bar => {
                    chart.draw_series(self.points.iter().enumerate().map(|(i, p)| {
                        let x = i as f64;
                        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, p.value)], SERIES_RGB.filled())
                    }))?;
                }
                SeriesKind::Area => {
                    chart.draw_series(
                        AreaSeries::new(
                            self.points
                                .iter()
                                .enumerate()
                                .map(|(i, p)| (i as f64, p.value)),
                            0.0,
                            SERIES_RGB.mix(0.4),
                        )
                        .border_style(&SERIES_RGB),
                    )?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
