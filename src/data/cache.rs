use std::collections::HashMap;
use std::sync::Arc;

use crate::error::QueryResult;

use super::filter::{indicators_meeting, parse_min_percent};
use super::model::{IndicatorDataset, NameSet};
use super::series::{PlotSpec, comparison_plot};
use super::table::{CountryTable, country_table};

type PlotKey = (NameSet, NameSet, bool);

/// Entries kept per memo table before it is flushed.
pub const DEFAULT_CAPACITY: usize = 64;

/// Memoized queries over the loaded dataset.
///
/// The dataset never changes after load, so results stay valid forever and
/// are keyed by their arguments. Each memo table holds at most `capacity`
/// entries; a full table is cleared before the next insert.
pub struct QueryCache {
    dataset: Arc<IndicatorDataset>,
    capacity: usize,
    tables: HashMap<NameSet, Arc<CountryTable>>,
    indicators: HashMap<(NameSet, String), Arc<Vec<String>>>,
    plots: HashMap<PlotKey, Arc<PlotSpec>>,
}

impl QueryCache {
    pub fn new(dataset: Arc<IndicatorDataset>) -> Self {
        Self::with_capacity(dataset, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(dataset: Arc<IndicatorDataset>, capacity: usize) -> Self {
        Self {
            dataset,
            capacity: capacity.max(1),
            tables: HashMap::new(),
            indicators: HashMap::new(),
            plots: HashMap::new(),
        }
    }

    pub fn dataset(&self) -> &IndicatorDataset {
        &self.dataset
    }

    pub fn country_table(&mut self, countries: &NameSet) -> Arc<CountryTable> {
        if let Some(hit) = self.tables.get(countries) {
            return Arc::clone(hit);
        }
        log::debug!("Building country table for {countries:?}");
        let table = Arc::new(country_table(&self.dataset, countries));
        make_room(&mut self.tables, self.capacity);
        self.tables.insert(countries.clone(), Arc::clone(&table));
        table
    }

    /// Parse errors are returned every time and never cached.
    pub fn indicator_list(
        &mut self,
        countries: &NameSet,
        min_percent: &str,
    ) -> QueryResult<Arc<Vec<String>>> {
        let key = (countries.clone(), min_percent.to_string());
        if let Some(hit) = self.indicators.get(&key) {
            return Ok(Arc::clone(hit));
        }
        let min = parse_min_percent(min_percent)?;
        let table = self.country_table(countries);
        let list = Arc::new(indicators_meeting(&table, min));
        log::debug!(
            "{} indicator rows meet {min}% for {} countries",
            list.len(),
            countries.len()
        );
        make_room(&mut self.indicators, self.capacity);
        self.indicators.insert(key, Arc::clone(&list));
        Ok(list)
    }

    pub fn comparison_plot(
        &mut self,
        countries: &NameSet,
        indicators: &NameSet,
        show_legend: bool,
    ) -> Arc<PlotSpec> {
        let key = (countries.clone(), indicators.clone(), show_legend);
        if let Some(hit) = self.plots.get(&key) {
            return Arc::clone(hit);
        }
        log::debug!("Building comparison plot for {indicators:?}");
        let plot = Arc::new(comparison_plot(
            &self.dataset,
            countries,
            indicators,
            show_legend,
        ));
        make_room(&mut self.plots, self.capacity);
        self.plots.insert(key, Arc::clone(&plot));
        plot
    }
}

fn make_room<K, V>(memo: &mut HashMap<K, V>, capacity: usize) {
    if memo.len() >= capacity {
        log::debug!("Flushing {} cached results", memo.len());
        memo.clear();
    }
}
