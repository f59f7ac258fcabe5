use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_YEAR: i32 = 1960;
const LAST_YEAR: i32 = 2020;

/// Deterministic noise source (SplitMix64); the sample file must be the
/// same on every run.
struct Noise(u64);

impl Noise {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct Row {
    country: (&'static str, &'static str),
    indicator: (&'static str, &'static str),
    values: Vec<Option<f64>>,
}

/// A noisy exponential trend. Coverage starts at `first_year` and each
/// later year is dropped with probability `gap_rate`.
fn generate_series(
    noise: &mut Noise,
    start: f64,
    growth: f64,
    first_year: i32,
    gap_rate: f64,
) -> Vec<Option<f64>> {
    let mut level = start;
    (FIRST_YEAR..=LAST_YEAR)
        .map(|year| {
            level *= 1.0 + growth + (noise.unit() - 0.5) * growth;
            if year < first_year || noise.unit() < gap_rate {
                None
            } else {
                Some((level * 100.0).round() / 100.0)
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let mut noise = Noise(42);

    let countries = [
        ("India", "IND", 1.0),
        ("United States", "USA", 4.0),
        ("China", "CHN", 1.5),
        ("Brazil", "BRA", 0.8),
        ("Nigeria", "NGA", 0.3),
        ("Germany", "DEU", 2.5),
        ("World", "WLD", 20.0),
    ];

    // (name, code, base level, growth, first year, gap rate)
    let indicators = [
        ("GDP (current US$)", "NY.GDP.MKTP.CD", 3.7e10, 0.07, 1960, 0.0),
        ("Population, total", "SP.POP.TOTL", 4.5e8, 0.02, 1960, 0.0),
        ("Life expectancy at birth, total (years)", "SP.DYN.LE00.IN", 45.0, 0.006, 1960, 0.01),
        ("CO2 emissions (kt)", "EN.ATM.CO2E.KT", 1.2e5, 0.04, 1960, 0.05),
        ("Inflation, consumer prices (annual %)", "FP.CPI.TOTL.ZG", 5.0, 0.01, 1961, 0.02),
        ("Access to electricity (% of population)", "EG.ELC.ACCS.ZS", 40.0, 0.02, 1990, 0.1),
        (
            "Literacy rate, adult total (% of people ages 15 and above)",
            "SE.ADT.LITR.ZS",
            50.0,
            0.01,
            1981,
            0.6,
        ),
    ];

    let mut rows = Vec::new();
    for &(country, country_code, scale) in &countries {
        for &(name, code, base, growth, first_year, gap_rate) in &indicators {
            rows.push(Row {
                country: (country, country_code),
                indicator: (name, code),
                values: generate_series(&mut noise, base * scale, growth, first_year, gap_rate),
            });
        }
    }

    write_csv("WDIData.csv", &rows)?;
    write_parquet("WDIData.parquet", &rows)?;

    println!(
        "Wrote {} indicator rows ({} countries × {} indicators) to WDIData.csv and WDIData.parquet",
        rows.len(),
        countries.len(),
        indicators.len()
    );
    Ok(())
}

/// The WDI export layout, including the empty trailing column its
/// exporter leaves behind.
fn write_csv(path: &str, rows: &[Row]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<String> = ["Country Name", "Country Code", "Indicator Name", "Indicator Code"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend((FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()));
    header.push(String::new());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.country.0.to_string(),
            row.country.1.to_string(),
            row.indicator.0.to_string(),
            row.indicator.1.to_string(),
        ];
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
        );
        record.push(String::new());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> anyhow::Result<()> {
    let text_column = |f: fn(&Row) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let mut fields = vec![
        Field::new("Country Name", DataType::Utf8, false),
        Field::new("Country Code", DataType::Utf8, false),
        Field::new("Indicator Name", DataType::Utf8, false),
        Field::new("Indicator Code", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        text_column(|r| r.country.0),
        text_column(|r| r.country.1),
        text_column(|r| r.indicator.0),
        text_column(|r| r.indicator.1),
    ];

    for (i, year) in (FIRST_YEAR..=LAST_YEAR).enumerate() {
        let mut builder = Float64Builder::with_capacity(rows.len());
        for row in rows {
            builder.append_option(row.values[i]);
        }
        fields.push(Field::new(year.to_string(), DataType::Float64, true));
        columns.push(Arc::new(builder.finish()));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_are_reproducible() {
        let a = generate_series(&mut Noise(7), 100.0, 0.05, 1990, 0.2);
        let b = generate_series(&mut Noise(7), 100.0, 0.05, 1990, 0.2);
        assert_eq!(a, b);
        assert_eq!(a.len(), (LAST_YEAR - FIRST_YEAR + 1) as usize);
        // Nothing before the first covered year.
        assert!(a[..30].iter().all(Option::is_none));
    }

    #[test]
    fn noise_stays_in_unit_interval() {
        let mut noise = Noise(1);
        assert!((0..1000).map(|_| noise.unit()).all(|u| (0.0..1.0).contains(&u)));
    }
}
