use std::cmp::Ordering;

use super::model::{
    DATA_PRESENT_COLUMN, ID_COLUMNS, IndicatorDataset, IndicatorRecord, NameSet, YEAR_COUNT,
    year_headers,
};

// ---------------------------------------------------------------------------
// CountryTable – the rows for a country selection
// ---------------------------------------------------------------------------

/// A source row together with its completeness metric.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub record: IndicatorRecord,
    /// Share of years 1960..=2020 with a value, in percent.
    pub data_present_percent: f64,
}

/// A column of [`CountryTable`] in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    CountryName,
    CountryCode,
    IndicatorName,
    IndicatorCode,
    DataPresent,
    /// Offset into the year range, 0 = 1960.
    Year(usize),
}

/// Rows of the source table for a set of countries, in source order.
///
/// Columns are presented as the four identifying columns, then
/// `Data Present in %`, then the years.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    pub rows: Vec<CountryRow>,
}

/// Percentage of non-absent year values in `record`.
pub fn data_present_percent(record: &IndicatorRecord) -> f64 {
    record.present_count() as f64 / YEAR_COUNT as f64 * 100.0
}

/// Select the rows for `countries` and compute their completeness.
///
/// Unknown country names match nothing; an empty set yields an empty table.
pub fn country_table(dataset: &IndicatorDataset, countries: &NameSet) -> CountryTable {
    let rows = dataset
        .records_for(countries)
        .map(|record| CountryRow {
            data_present_percent: data_present_percent(record),
            record: record.clone(),
        })
        .collect();
    CountryTable { rows }
}

impl CountryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All columns in presentation order.
    pub fn columns() -> Vec<TableColumn> {
        [
            TableColumn::CountryName,
            TableColumn::CountryCode,
            TableColumn::IndicatorName,
            TableColumn::IndicatorCode,
            TableColumn::DataPresent,
        ]
        .into_iter()
        .chain((0..YEAR_COUNT).map(TableColumn::Year))
        .collect()
    }

    /// Header text for every column, in presentation order.
    pub fn headers() -> Vec<String> {
        ID_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .chain(std::iter::once(DATA_PRESENT_COLUMN.to_string()))
            .chain(year_headers())
            .collect()
    }

    /// Sort rows by `column`. Absent values go last in either direction.
    pub fn sort_by(&mut self, column: TableColumn, descending: bool) {
        self.rows.sort_by(|a, b| {
            let ord = match column {
                TableColumn::Year(i) => {
                    match (a.record.values[i], b.record.values[i]) {
                        (Some(x), Some(y)) => x.total_cmp(&y),
                        (Some(_), None) => return Ordering::Less,
                        (None, Some(_)) => return Ordering::Greater,
                        (None, None) => Ordering::Equal,
                    }
                }
                TableColumn::DataPresent => a.data_present_percent.total_cmp(&b.data_present_percent),
                _ => a.text(column).cmp(&b.text(column)),
            };
            if descending { ord.reverse() } else { ord }
        });
    }
}

impl CountryRow {
    /// Cell text for display and export. Absent values render as "".
    pub fn text(&self, column: TableColumn) -> String {
        let r = &self.record;
        match column {
            TableColumn::CountryName => r.country_name.clone(),
            TableColumn::CountryCode => r.country_code.clone(),
            TableColumn::IndicatorName => r.indicator_name.clone(),
            TableColumn::IndicatorCode => r.indicator_code.clone(),
            TableColumn::DataPresent => format!("{:.6}", self.data_present_percent),
            TableColumn::Year(i) => r.values[i].map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::*;

    #[test]
    fn only_requested_countries_are_returned() {
        let ds = sample_dataset();
        let table = country_table(&ds, &names(&["India", "Brazil"]));
        assert_eq!(table.len(), 3);
        for row in &table.rows {
            assert!(["India", "Brazil"].contains(&row.record.country_name.as_str()));
            assert!((0.0..=100.0).contains(&row.data_present_percent));
        }
    }

    #[test]
    fn complete_and_empty_rows_hit_the_bounds() {
        let ds = sample_dataset();
        let table = country_table(&ds, &names(&["United States"]));
        let pct: Vec<f64> = table.rows.iter().map(|r| r.data_present_percent).collect();
        assert_eq!(pct, vec![100.0, 0.0]);
    }

    #[test]
    fn india_gdp_with_two_missing_years() {
        let ds = sample_dataset();
        let table = country_table(&ds, &names(&["India", "United States"]));
        let india = &table.rows[0];
        assert_eq!(india.record.indicator_name, GDP);
        assert!((india.data_present_percent - 96.7213).abs() < 1e-3);
        assert_eq!(india.data_present_percent, 59.0 / 61.0 * 100.0);
    }

    #[test]
    fn unknown_or_empty_selection_is_empty() {
        let ds = sample_dataset();
        assert!(country_table(&ds, &names(&["Atlantis"])).is_empty());
        assert!(country_table(&ds, &NameSet::new()).is_empty());
    }

    #[test]
    fn row_values_survive_the_reordering() {
        let ds = sample_dataset();
        let table = country_table(&ds, &names(&["India", "United States", "Brazil"]));
        let originals: Vec<&IndicatorRecord> = ds.records.iter().collect();
        assert_eq!(table.len(), originals.len());
        for (row, original) in table.rows.iter().zip(originals) {
            assert_eq!(&row.record, original);
        }

        let headers = CountryTable::headers();
        assert_eq!(headers.len(), 4 + 1 + YEAR_COUNT);
        assert_eq!(headers[4], DATA_PRESENT_COLUMN);
        assert_eq!(headers[5], "1960");
        assert_eq!(CountryTable::columns().len(), headers.len());
    }

    #[test]
    fn sorting_puts_absent_values_last() {
        let ds = sample_dataset();
        let mut table = country_table(&ds, &names(&["India", "United States"]));

        table.sort_by(TableColumn::DataPresent, true);
        assert_eq!(table.rows[0].data_present_percent, 100.0);
        assert_eq!(table.rows[3].data_present_percent, 0.0);

        // 1960 is absent for India's rows and the empty US row.
        for descending in [false, true] {
            table.sort_by(TableColumn::Year(0), descending);
            assert_eq!(table.rows[0].record.country_name, "United States");
            assert_eq!(table.rows[0].record.indicator_name, GDP);
            assert!(table.rows[1..].iter().all(|r| r.record.values[0].is_none()));
        }

        table.sort_by(TableColumn::CountryName, false);
        assert_eq!(table.rows[0].record.country_name, "India");
    }
}
