use std::sync::Arc;

use crate::config::Config;
use crate::data::cache::QueryCache;
use crate::data::filter::distinct_indicators;
use crate::data::insight::InsightDraft;
use crate::data::model::{IndicatorDataset, NameSet};
use crate::data::series::PlotSpec;
use crate::data::table::{CountryTable, TableColumn};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    About,
    InteractivePlots,
    Insights,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::About, Page::InteractivePlots, Page::Insights];

    pub fn title(self) -> &'static str {
        match self {
            Page::About => "About the Dataset",
            Page::InteractivePlots => "Interactive Plots",
            Page::Insights => "Interesting Insights",
        }
    }
}

/// Outcome of the last insight submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub cache: QueryCache,
    pub page: Page,

    // ---- Interactive Plots page ----
    pub countries: NameSet,
    pub min_percent: String,
    pub show_legend: bool,
    pub indicators: NameSet,
    /// Choices for the indicator selector, or why there are none.
    pub indicator_options: Result<Vec<String>, String>,
    /// Built only when at least one indicator is selected.
    pub plot: Option<Arc<PlotSpec>>,
    pub draft: InsightDraft,
    pub feedback: Option<Feedback>,

    // ---- About page ----
    pub table_countries: NameSet,
    pub table: Option<CountryTable>,
    pub table_sort: Option<(TableColumn, bool)>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<IndicatorDataset>, config: &Config) -> Self {
        let countries: NameSet = config
            .default_countries
            .iter()
            .filter(|c| dataset.has_country(c))
            .cloned()
            .collect();

        let mut state = Self {
            cache: QueryCache::new(dataset),
            page: Page::InteractivePlots,
            countries,
            min_percent: config.min_percent.clone(),
            show_legend: config.show_legend,
            indicators: NameSet::new(),
            indicator_options: Ok(Vec::new()),
            plot: None,
            draft: InsightDraft::default(),
            feedback: None,
            table_countries: NameSet::new(),
            table: None,
            table_sort: None,
            status_message: None,
        };
        state.refresh_indicators();
        state
    }

    pub fn dataset(&self) -> &IndicatorDataset {
        self.cache.dataset()
    }

    /// Recompute indicator choices after the country set or threshold
    /// changed. Selected indicators that are no longer offered are dropped;
    /// an unparsable threshold leaves the selection alone.
    pub fn refresh_indicators(&mut self) {
        self.indicator_options = self
            .cache
            .indicator_list(&self.countries, &self.min_percent)
            .map(|list| distinct_indicators(&list))
            .map_err(|e| e.to_string());
        if let Ok(options) = &self.indicator_options {
            self.indicators.retain(|name| options.contains(name));
        }
        self.refresh_plot();
    }

    /// Rebuild the plot after the selection or legend flag changed.
    pub fn refresh_plot(&mut self) {
        self.plot = if self.indicators.is_empty() {
            None
        } else {
            Some(
                self.cache
                    .comparison_plot(&self.countries, &self.indicators, self.show_legend),
            )
        };
    }

    pub fn toggle_country(&mut self, country: &str) {
        toggle(&mut self.countries, country);
        self.refresh_indicators();
    }

    pub fn set_min_percent(&mut self, text: String) {
        self.min_percent = text;
        self.refresh_indicators();
    }

    pub fn toggle_indicator(&mut self, indicator: &str) {
        toggle(&mut self.indicators, indicator);
        self.refresh_plot();
    }

    pub fn set_show_legend(&mut self, show: bool) {
        self.show_legend = show;
        self.refresh_plot();
    }

    pub fn submit_insight(&mut self) {
        self.feedback = Some(match self.draft.submit(&self.indicators) {
            Ok(msg) => Feedback::Success(msg.to_string()),
            Err(e) => Feedback::Error(e.to_string()),
        });
    }

    pub fn toggle_table_country(&mut self, country: &str) {
        toggle(&mut self.table_countries, country);
        self.refresh_table();
    }

    /// Click on a header: sort by it, flipping direction on repeat clicks.
    pub fn sort_table(&mut self, column: TableColumn) {
        let descending = matches!(self.table_sort, Some((c, false)) if c == column);
        self.table_sort = Some((column, descending));
        self.refresh_table();
    }

    fn refresh_table(&mut self) {
        self.table = if self.table_countries.is_empty() {
            None
        } else {
            let mut table = (*self.cache.country_table(&self.table_countries)).clone();
            if let Some((column, descending)) = self.table_sort {
                table.sort_by(column, descending);
            }
            Some(table)
        };
    }
}

fn toggle(set: &mut NameSet, name: &str) {
    if !set.remove(name) {
        set.insert(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::*;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset()), &Config::default())
    }

    #[test]
    fn defaults_preselect_known_countries() {
        let mut config = Config::default();
        config.default_countries.push("Atlantis".into());
        let s = AppState::new(Arc::new(sample_dataset()), &config);
        assert_eq!(s.countries, names(&["India", "United States"]));
        assert_eq!(s.page, Page::InteractivePlots);
        assert_eq!(s.indicator_options, Ok(vec![GDP.to_string()]));
        assert!(s.plot.is_none());
    }

    #[test]
    fn selecting_an_indicator_builds_the_plot() {
        let mut s = state();
        s.toggle_indicator(GDP);
        let plot = s.plot.clone().unwrap();
        assert_eq!(plot.series.len(), 2);
        assert!(!plot.layout.show_legend);

        s.set_show_legend(true);
        assert!(s.plot.as_ref().unwrap().layout.show_legend);

        s.toggle_indicator(GDP);
        assert!(s.plot.is_none());
    }

    #[test]
    fn bad_threshold_is_reported_inline() {
        let mut s = state();
        s.set_min_percent("ninety".into());
        assert!(s.indicator_options.as_ref().unwrap_err().contains("ninety"));
        s.set_min_percent("0".into());
        assert_eq!(s.indicator_options, Ok(vec![GDP.to_string(), LITERACY.to_string()]));
    }

    #[test]
    fn raising_the_threshold_drops_indicators_no_longer_offered() {
        let mut s = state();
        s.set_min_percent("0".into());
        s.toggle_indicator(GDP);
        s.toggle_indicator(LITERACY);
        assert_eq!(s.plot.as_ref().unwrap().series.len(), 4);

        s.set_min_percent("98".into());
        assert_eq!(s.indicators, names(&[GDP]));
        let plot = s.plot.clone().unwrap();
        assert!(plot.series.iter().all(|series| series.indicator == GDP));

        // A typo in the threshold keeps the current selection.
        s.set_min_percent("9x".into());
        assert_eq!(s.indicators, names(&[GDP]));
    }

    #[test]
    fn deselecting_every_country_clears_the_plot() {
        let mut s = state();
        s.toggle_indicator(GDP);
        s.toggle_country("India");
        s.toggle_country("United States");
        assert!(s.indicators.is_empty());
        assert!(s.plot.is_none());
    }

    #[test]
    fn insight_needs_a_plotted_indicator() {
        let mut s = state();
        s.draft.name = "Asha".into();
        s.draft.insight = "US GDP is complete".into();
        s.submit_insight();
        assert!(matches!(s.feedback, Some(Feedback::Error(_))));

        s.toggle_indicator(GDP);
        s.submit_insight();
        assert!(matches!(s.feedback, Some(Feedback::Success(_))));
    }

    #[test]
    fn table_sorts_and_clears() {
        let mut s = state();
        assert!(s.table.is_none());
        s.toggle_table_country("United States");
        assert_eq!(s.table.as_ref().unwrap().len(), 2);

        s.sort_table(TableColumn::DataPresent);
        assert_eq!(s.table.as_ref().unwrap().rows[0].data_present_percent, 0.0);
        s.sort_table(TableColumn::DataPresent);
        assert_eq!(s.table.as_ref().unwrap().rows[0].data_present_percent, 100.0);

        s.toggle_table_country("United States");
        assert!(s.table.is_none());
    }
}
