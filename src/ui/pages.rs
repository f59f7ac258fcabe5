use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Feedback};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// About the Dataset
// ---------------------------------------------------------------------------

const ABOUT: &str = "The primary World Bank collection of development indicators, compiled \
from officially-recognized international sources. It presents the most current and accurate \
global development data available, and includes national, regional and global estimates.";

const TOPICS: &str = "Agriculture and Food Security, Climate Change, Economic Growth, \
Education, Energy and Extractives, Environment and Natural Resources, Financial Sector \
Development, Gender, Health, Nutrition and Population, Macroeconomic Vulnerability and Debt, \
Poverty, Private Sector Development, Public Sector Management, Social Development, Social \
Protection and Labor, Trade, Urban Development";

pub fn about(ui: &mut Ui, state: &mut AppState) {
    ui.heading("About the dataset");
    ui.label(ABOUT);
    ui.add_space(6.0);
    ui.label(RichText::new("Topics").strong());
    ui.label(TOPICS);
    ui.add_space(6.0);
    ui.label("Type: Time Series");
    ui.label("Periodicity: Annual");
    ui.label("Temporal Coverage: 1960 - 2020");
    ui.separator();

    ui.heading("Take a look at the dataset here:");
    let options = state.dataset().country_names.clone();
    if let Some(country) = panels::multi_select(
        ui,
        "table_countries",
        "Choose Countries/Categories",
        &options,
        &state.table_countries,
    ) {
        state.toggle_table_country(&country);
    }

    if state.table.is_some() {
        ui.add_space(6.0);
        table::country_table(ui, state);
        ui.horizontal(|ui: &mut Ui| {
            ui.label("Tip: Click on the column names to sort values");
            if ui.button("Export CSV…").clicked() {
                panels::export_table_dialog(state);
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Interactive Plots
// ---------------------------------------------------------------------------

pub fn interactive_plots(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Interactive Plots for World Development Indicators");
    ui.label("Produce plots for various indicators and for various countries.");

    ui.columns(2, |cols| {
        egui::CollapsingHeader::new("How to use")
            .default_open(false)
            .show(&mut cols[0], |ui: &mut Ui| {
                ui.label(
                    "Choose countries: select the countries that you want to compare.\n\n\
                     Enter minimum percentage of Data Present: indicators below this share \
                     of years with a value are hidden. Type a number from 1 to 100.\n\n\
                     Choose Indicators: select the indicators that you want to compare.",
                );
            });
        egui::CollapsingHeader::new("Tips to use")
            .default_open(false)
            .show(&mut cols[1], |ui: &mut Ui| {
                ui.label(
                    "• Bigger countries have more values present for their indicators.\n\
                     • Very few indicators have 100% or 99% data present, but many have \
                     more than 98%.\n\
                     • Drag with the secondary button to zoom into a region of the plot.\n\
                     • Enabling the legend shows which line belongs to which series.",
                );
            });
    });
    ui.separator();

    egui::CollapsingHeader::new("Advanced Settings")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Enter minimum percentage of Data Present");
                let mut text = state.min_percent.clone();
                if ui
                    .add(egui::TextEdit::singleline(&mut text).desired_width(60.0))
                    .changed()
                {
                    state.set_min_percent(text);
                }
                ui.add_space(20.0);
                let mut show = state.show_legend;
                if ui.checkbox(&mut show, "Show Legend").changed() {
                    state.set_show_legend(show);
                }
            });
        });
    ui.separator();

    let countries = state.dataset().country_names.clone();
    if let Some(country) = panels::multi_select(
        ui,
        "plot_countries",
        "Choose Countries/Categories",
        &countries,
        &state.countries,
    ) {
        state.toggle_country(&country);
    }
    ui.add_space(6.0);

    match state.indicator_options.clone() {
        Ok(options) => {
            if let Some(indicator) = panels::multi_select(
                ui,
                "plot_indicators",
                "Choose Indicators",
                &options,
                &state.indicators,
            ) {
                state.toggle_indicator(&indicator);
            }
        }
        Err(msg) => {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    }

    if let Some(spec) = state.plot.clone() {
        ui.add_space(8.0);
        plot::comparison_plot(ui, &spec);
    }
    ui.separator();

    insight_form(ui, state);
}

fn insight_form(ui: &mut Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Submit an Insight")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("Your current plot will be saved for reference");
            ui.label("Enter your name");
            ui.text_edit_singleline(&mut state.draft.name);
            ui.label("Enter Insight");
            ui.text_edit_multiline(&mut state.draft.insight);

            if ui.button("Submit").clicked() {
                state.submit_insight();
            }
            match &state.feedback {
                Some(Feedback::Success(msg)) => {
                    ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
                }
                Some(Feedback::Error(msg)) => {
                    ui.label(RichText::new(msg).color(Color32::RED));
                }
                None => {}
            }

            ui.label(
                RichText::new(
                    "Note: once you submit an insight it is sent for review. If it is deemed \
                     interesting it will be posted on the 'Interesting Insights' page.",
                )
                .small(),
            );
        });
}

// ---------------------------------------------------------------------------
// Interesting Insights
// ---------------------------------------------------------------------------

pub fn insights(ui: &mut Ui) {
    ui.heading("Interesting Insights");
    ui.label("Reviewed insights will appear here.");
}
