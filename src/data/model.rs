use std::collections::BTreeSet;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Year range
// ---------------------------------------------------------------------------

/// First year covered by every record.
pub const FIRST_YEAR: i32 = 1960;
/// Last year covered by every record (inclusive).
pub const LAST_YEAR: i32 = 2020;
/// Number of year columns (1960..=2020).
pub const YEAR_COUNT: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

/// Headers of the four identifying columns, in file order.
pub const ID_COLUMNS: [&str; 4] = [
    "Country Name",
    "Country Code",
    "Indicator Name",
    "Indicator Code",
];

/// Header of the computed completeness column.
pub const DATA_PRESENT_COLUMN: &str = "Data Present in %";

pub fn years() -> RangeInclusive<i32> {
    FIRST_YEAR..=LAST_YEAR
}

/// Header text for every year column, `"1960"` through `"2020"`.
pub fn year_headers() -> Vec<String> {
    years().map(|y| y.to_string()).collect()
}

/// A set of names as selected by the user. Ordered so that selection order
/// never matters for lookups or cache keys.
pub type NameSet = BTreeSet<String>;

// ---------------------------------------------------------------------------
// IndicatorRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One (country, indicator) pair and its annual values.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRecord {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    /// One slot per year in [`years`]; `None` means the value is absent.
    pub values: Vec<Option<f64>>,
}

impl IndicatorRecord {
    /// Value for a calendar year, `None` if absent or out of range.
    pub fn value_for(&self, year: i32) -> Option<f64> {
        if !years().contains(&year) {
            return None;
        }
        self.values
            .get((year - FIRST_YEAR) as usize)
            .copied()
            .flatten()
    }

    /// Number of years with a value present.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// IndicatorDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table. Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct IndicatorDataset {
    /// All records in file order.
    pub records: Vec<IndicatorRecord>,
    /// Distinct country names in first-seen order.
    pub country_names: Vec<String>,
}

impl IndicatorDataset {
    /// Build the country index from the loaded records.
    pub fn from_records(records: Vec<IndicatorRecord>) -> Self {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut country_names = Vec::new();
        for rec in &records {
            if seen.insert(rec.country_name.clone()) {
                country_names.push(rec.country_name.clone());
            }
        }

        IndicatorDataset {
            records,
            country_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record belongs to `country`.
    pub fn has_country(&self, country: &str) -> bool {
        self.country_names.iter().any(|c| c == country)
    }

    /// Records whose country name is in `countries`, in file order.
    pub fn records_for<'a>(
        &'a self,
        countries: &'a NameSet,
    ) -> impl Iterator<Item = &'a IndicatorRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| countries.contains(&r.country_name))
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------
