use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::save_csv;
use crate::data::model::NameSet;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.label("Go To");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.title());
    }

    ui.separator();
    let ds = state.dataset();
    ui.label(format!(
        "{} countries/categories\n{} indicator rows",
        ds.country_names.len(),
        ds.len()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_export = state.table.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export table…"))
                .clicked()
            {
                export_table_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.page.title());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Multi-select
// ---------------------------------------------------------------------------

/// A searchable checklist. Returns the option the user toggled, if any.
pub fn multi_select(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    selected: &NameSet,
) -> Option<String> {
    let mut toggled = None;
    let search_id = egui::Id::new(id).with("search");
    let mut search = ui.data_mut(|d| d.get_temp::<String>(search_id).unwrap_or_default());

    ui.strong(label);

    // Chips for the current selection; clicking one removes it.
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for name in selected {
            if ui.small_button(format!("{name} ✕")).clicked() {
                toggled = Some(name.clone());
            }
        }
    });

    egui::CollapsingHeader::new(format!("{}/{} selected", selected.len(), options.len()))
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.add(egui::TextEdit::singleline(&mut search).hint_text("Search…"));
            let needle = search.to_lowercase();

            ScrollArea::vertical()
                .id_salt(id)
                .max_height(220.0)
                .show(ui, |ui: &mut Ui| {
                    for option in options
                        .iter()
                        .filter(|o| needle.is_empty() || o.to_lowercase().contains(&needle))
                    {
                        let mut checked = selected.contains(option);
                        if ui.checkbox(&mut checked, option.as_str()).changed() {
                            toggled = Some(option.clone());
                        }
                    }
                });
        });

    ui.data_mut(|d| d.insert_temp(search_id, search));
    toggled
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_table_dialog(state: &mut AppState) {
    let Some(table) = &state.table else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export country table")
        .set_file_name("country_table.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match save_csv(table, &path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export table: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
