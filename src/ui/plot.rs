use eframe::egui::{self, Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::{SeriesColors, named_color};
use crate::data::series::{HoverMode, PlotSpec};

// ---------------------------------------------------------------------------
// Indicator comparison plot
// ---------------------------------------------------------------------------

/// Render a [`PlotSpec`] as a line chart.
pub fn comparison_plot(ui: &mut Ui, spec: &PlotSpec) {
    let layout = &spec.layout;
    let colors = SeriesColors::new(&spec.series);

    let name_length = layout.hover_label.name_length;

    ui.heading(layout.title);

    let mut plot = Plot::new("comparison_plot")
        .x_axis_label(layout.x_axis_title)
        .y_axis_label(layout.y_axis_title)
        .height(420.0)
        .show_background(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            let year = value.x.round() as i32;
            if name.is_empty() {
                return format!("Year: {year}");
            }
            let name: String = match name_length {
                Some(n) => name.chars().take(n).collect(),
                None => name.to_string(),
            };
            format!("{name}\nYear: {year}\nValue: {:.4}", value.y)
        });
    plot = match layout.hover_mode {
        HoverMode::X => plot.show_x(true).show_y(false),
    };
    if layout.show_legend {
        plot = plot.legend(Legend::default());
    }

    egui::Frame::default()
        .fill(named_color(layout.background).unwrap_or(Color32::WHITE))
        .show(ui, |ui: &mut Ui| {
            plot.show(ui, |plot_ui| {
                for series in &spec.series {
                    let name = series.name();
                    let color = colors.color_for(series);

                    // Lines sharing a name share one legend entry.
                    for segment in series.segments() {
                        let points = PlotPoints::new(segment);
                        let line = Line::new(points).name(&name).color(color).width(1.5);
                        plot_ui.line(line);
                    }
                }
            });
        });
}
