use std::collections::BTreeSet;

use crate::error::{QueryError, QueryResult};

use super::model::{IndicatorDataset, NameSet};
use super::table::{CountryTable, country_table};

/// Parse the minimum-percentage text field. No range check: values outside
/// 0..=100 simply select everything or nothing.
pub fn parse_min_percent(input: &str) -> QueryResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|source| QueryError::InvalidPercent {
            input: input.to_string(),
            source,
        })
}

/// Indicator names of the rows in `table` whose completeness is at least
/// `min_percent`, in row order. Duplicates across countries are kept.
pub fn indicators_meeting(table: &CountryTable, min_percent: i64) -> Vec<String> {
    table
        .rows
        .iter()
        .filter(|row| row.data_present_percent >= min_percent as f64)
        .map(|row| row.record.indicator_name.clone())
        .collect()
}

/// Indicator names for `countries` that have at least `min_percent` of
/// their years present.
pub fn indicator_list(
    dataset: &IndicatorDataset,
    countries: &NameSet,
    min_percent: &str,
) -> QueryResult<Vec<String>> {
    let min = parse_min_percent(min_percent)?;
    Ok(indicators_meeting(&country_table(dataset, countries), min))
}

/// Collapse repeated names, keeping the first occurrence.
pub fn distinct_indicators(names: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    names
        .iter()
        .filter(|n| seen.insert(n.as_str()))
        .cloned()
        .collect()
}
