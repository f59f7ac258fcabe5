use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::table::{CountryTable, TableColumn};
use crate::state::AppState;

/// Render the country table with clickable, sortable headers.
pub fn country_table(ui: &mut Ui, state: &mut AppState) {
    let Some(table) = &state.table else {
        return;
    };

    let columns = CountryTable::columns();
    let headers = CountryTable::headers();
    let sort = state.table_sort;
    let mut clicked: Option<TableColumn> = None;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(480.0)
            .column(Column::auto().at_least(120.0))
            .column(Column::auto())
            .column(Column::initial(260.0).clip(true))
            .column(Column::auto())
            .columns(Column::auto().at_least(60.0), columns.len() - 4)
            .header(22.0, |mut header| {
                for (&column, title) in columns.iter().zip(&headers) {
                    header.col(|ui| {
                        let marker = match sort {
                            Some((c, false)) if c == column => " ⬆",
                            Some((c, true)) if c == column => " ⬇",
                            _ => "",
                        };
                        let label = RichText::new(format!("{title}{marker}")).strong();
                        if ui.button(label).clicked() {
                            clicked = Some(column);
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.len(), |mut row| {
                    let data = &table.rows[row.index()];
                    for &column in &columns {
                        row.col(|ui| {
                            let text = match column {
                                TableColumn::DataPresent => {
                                    format!("{:.2}", data.data_present_percent)
                                }
                                _ => data.text(column),
                            };
                            ui.label(text);
                        });
                    }
                });
            });
    });

    if let Some(column) = clicked {
        state.sort_table(column);
    }
}
