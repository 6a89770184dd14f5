//! Plotters-powered monthly trend chart widget for Ratatui.
//!
//! Plotters gives us axis + tick rendering for free; the output is drawn into
//! the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::Month;

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call, so `render()`
/// only draws.
pub struct MonthlyTrendChart<'a> {
    /// `(month index, sales)` for all 12 months, in calendar order.
    pub points: &'a [(f64, f64)],
    /// Top of the y axis (bottom is always 0).
    pub y_max: f64,
    pub y_label: &'a str,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> MonthlyTrendChart<'a> {
    /// Chart series from the engine's 12-month grouping.
    pub fn series(by_month: &[(Month, f64)]) -> (Vec<(f64, f64)>, f64) {
        let points: Vec<(f64, f64)> = by_month
            .iter()
            .map(|&(month, v)| (month.index() as f64, v))
            .collect();
        let max = points.iter().map(|&(_, y)| y).fold(0.0_f64, f64::max);
        let y_max = if max > 0.0 { max * 1.05 } else { 1.0 };
        (points, y_max)
    }
}

fn month_tick(v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    Month::ALL
        .get(idx as usize)
        .map(|m| m.abbrev().to_string())
        .unwrap_or_default()
}

impl<'a> Widget for MonthlyTrendChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 30 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let y_max = self.y_max;
        if !(y_max.is_finite() && y_max > 0.0) {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 9)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(-0.5_f64..11.5_f64, 0.0_f64..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .x_labels(12)
                .y_labels(5)
                .x_label_formatter(&|v| month_tick(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(96, 125, 139); // slate
            let point_color = RGBColor(211, 47, 47); // red

            chart.draw_series(LineSeries::new(self.points.iter().copied(), &line_color))?;

            // `Circle` radii are mis-scaled by the ratatui backend; a pixel
            // dot is the reliable marker.
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), point_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_on_whole_months() {
        assert_eq!(month_tick(0.0), "Jan");
        assert_eq!(month_tick(11.0), "Dec");
        assert_eq!(month_tick(2.5), "");
        assert_eq!(month_tick(-0.5), "");
        assert_eq!(month_tick(12.0), "");
    }

    #[test]
    fn series_pads_the_top() {
        let by_month: Vec<(Month, f64)> = Month::ALL
            .into_iter()
            .map(|m| (m, if m == Month::Jun { 200.0 } else { 0.0 }))
            .collect();
        let (points, y_max) = MonthlyTrendChart::series(&by_month);
        assert_eq!(points.len(), 12);
        assert_eq!(points[5], (5.0, 200.0));
        assert!((y_max - 210.0).abs() < 1e-9);
    }

    #[test]
    fn series_of_zeros_has_unit_range() {
        let zeros: Vec<(Month, f64)> = Month::ALL.into_iter().map(|m| (m, 0.0)).collect();
        let (_, y_max) = MonthlyTrendChart::series(&zeros);
        assert_eq!(y_max, 1.0);
    }
}
