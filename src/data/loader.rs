use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{ID_COLUMNS, IndicatorDataset, IndicatorRecord, YEAR_COUNT, year_headers};

/// Identifying columns plus year columns; anything after this is the
/// spurious trailing column.
const KNOWN_COLUMNS: usize = ID_COLUMNS.len() + YEAR_COUNT;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the WDI export: 4 identifying columns, `1960`..`2020`,
///   and a trailing empty column left by the exporter
/// * `.parquet` – the same columns by name; extra columns are ignored
pub fn load_file(path: &Path) -> Result<IndicatorDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading dataset from {}", path.display()))?;

    log::info!(
        "Loaded {} indicator rows for {} countries from {}",
        dataset.len(),
        dataset.country_names.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<IndicatorDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse WDI-shaped CSV from any reader.
pub fn read_csv<R: Read>(source: R) -> Result<IndicatorDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_csv_header(&headers)?;
    if headers.len() > KNOWN_COLUMNS {
        log::debug!(
            "Dropping trailing column {:?}",
            headers.get(KNOWN_COLUMNS).unwrap_or_default()
        );
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        if row.len() < KNOWN_COLUMNS {
            bail!(
                "CSV row {row_no}: expected at least {KNOWN_COLUMNS} fields, found {}",
                row.len()
            );
        }

        let text = |i: usize| row.get(i).unwrap_or_default().to_string();
        let values = (ID_COLUMNS.len()..KNOWN_COLUMNS)
            .map(|i| parse_value(row.get(i).unwrap_or_default(), row_no, &headers[i]))
            .collect::<Result<Vec<_>>>()?;

        records.push(IndicatorRecord {
            country_name: text(0),
            country_code: text(1),
            indicator_name: text(2),
            indicator_code: text(3),
            values,
        });
    }

    Ok(IndicatorDataset::from_records(records))
}

/// The first 65 headers are fixed; at most one trailing column may follow.
fn check_csv_header(headers: &csv::StringRecord) -> Result<()> {
    if headers.len() < KNOWN_COLUMNS || headers.len() > KNOWN_COLUMNS + 1 {
        bail!(
            "Malformed header: expected {KNOWN_COLUMNS} columns plus one trailing column, found {}",
            headers.len()
        );
    }

    let expected = ID_COLUMNS
        .iter()
        .map(|s| s.to_string())
        .chain(year_headers());
    for (i, (found, want)) in headers.iter().zip(expected).enumerate() {
        let found = found.trim_start_matches('\u{feff}').trim();
        if found != want {
            bail!("Malformed header: column {i} should be '{want}', found '{found}'");
        }
    }
    Ok(())
}

/// Empty fields (and NaN) are absent; anything else must be a number.
fn parse_value(s: &str, row: usize, year: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let v = s
        .parse::<f64>()
        .with_context(|| format!("Row {row}, year {year}: '{s}' is not a number"))?;
    Ok((!v.is_nan()).then_some(v))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet copy of the table.
///
/// Expected schema:
/// - the four identifying columns as Utf8 or LargeUtf8
/// - `1960`..`2020` as nullable Float64, Float32, Int64 or Int32
///
/// Other columns (including pandas' `Unnamed: 65`) are ignored.
fn load_parquet(path: &Path) -> Result<IndicatorDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let year_names = year_headers();
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let id_cols = ID_COLUMNS
            .iter()
            .map(|name| column(&batch, name))
            .collect::<Result<Vec<_>>>()?;
        let year_cols = year_names
            .iter()
            .map(|name| column(&batch, name))
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            let ids = id_cols
                .iter()
                .map(|col| string_at(col, row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Row {row}: reading identifying columns"))?;
            let values = year_cols
                .iter()
                .zip(&year_names)
                .map(|(col, year)| {
                    number_at(col, row).with_context(|| format!("Row {row}, year {year}"))
                })
                .collect::<Result<Vec<_>>>()?;

            let [country_name, country_code, indicator_name, indicator_code]: [String; 4] = ids
                .try_into()
                .map_err(|_| anyhow::anyhow!("Row {row}: expected four identifying values"))?;

            records.push(IndicatorRecord {
                country_name,
                country_code,
                indicator_name,
                indicator_code,
                values,
            });
        }
    }

    Ok(IndicatorDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column(batch: &RecordBatch, name: &str) -> Result<ArrayRef> {
    batch
        .column_by_name(name)
        .cloned()
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

fn string_at(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

fn number_at(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let v = match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        // A year nobody reported anything for comes out of pandas as all-null.
        DataType::Null => return Ok(None),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok((!v.is_nan()).then_some(v))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{
        Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, NullArray,
        StringArray,
    };
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::FIRST_YEAR;

    fn header(trailing: bool) -> String {
        let mut cols: Vec<String> = ID_COLUMNS.iter().map(|s| s.to_string()).collect();
        cols.extend(year_headers());
        let mut line = cols.join(",");
        if trailing {
            line.push(',');
        }
        line
    }

    fn row(country: &str, indicator: &str, values: &[&str]) -> String {
        let mut fields = vec![
            country.to_string(),
            "XXX".to_string(),
            format!("\"{indicator}\""),
            "NY.GDP.MKTP.CD".to_string(),
        ];
        for i in 0..YEAR_COUNT {
            fields.push(values.get(i).copied().unwrap_or("").to_string());
        }
        format!("{},", fields.join(","))
    }

    #[test]
    fn trailing_column_is_dropped() {
        let csv = format!(
            "{}\n{}\n",
            header(true),
            row("India", "GDP (current US$)", &["1.5", "", "0"])
        );
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        let rec = &ds.records[0];
        assert_eq!(rec.country_name, "India");
        assert_eq!(rec.indicator_name, "GDP (current US$)");
        assert_eq!(rec.values.len(), YEAR_COUNT);
        assert_eq!(rec.value_for(FIRST_YEAR), Some(1.5));
        assert_eq!(rec.value_for(FIRST_YEAR + 1), None);
        assert_eq!(rec.value_for(FIRST_YEAR + 2), Some(0.0));
    }

    #[test]
    fn header_without_trailing_column_is_accepted() {
        let mut line = row("Brazil", "Population, total", &["70000000"]);
        line.pop();
        let csv = format!("{}\n{line}\n", header(false));
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.country_names, vec!["Brazil"]);
    }

    #[test]
    fn malformed_header_is_fatal() {
        let csv = header(true).replace("1975", "Year 1975");
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Year 1975"));

        let short = "Country Name,Country Code,Indicator Name,Indicator Code,1960\n";
        assert!(read_csv(short.as_bytes()).is_err());
    }

    #[test]
    fn non_numeric_year_value_is_an_error() {
        let csv = format!("{}\n{}\n", header(true), row("India", "GDP", &["n/a"]));
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("'n/a' is not a number"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("WDIData.csv")).is_err());
        assert!(load_file(&dir.path().join("WDIData.xlsx")).is_err());
    }

    /// Two rows; 1960..=1963 exercise every numeric type the loader reads
    /// and the rest are Float64 with the second row absent.
    fn parquet_columns(with_indicator_code: bool) -> (Vec<Field>, Vec<ArrayRef>) {
        let mut fields = vec![
            Field::new("Country Name", DataType::LargeUtf8, false),
            Field::new("Country Code", DataType::Utf8, false),
            Field::new("Indicator Name", DataType::Utf8, false),
        ];
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(LargeStringArray::from(vec!["India", "Brazil"])),
            Arc::new(StringArray::from(vec!["IND", "BRA"])),
            Arc::new(StringArray::from(vec!["GDP (current US$)", "GDP (current US$)"])),
        ];
        if with_indicator_code {
            fields.push(Field::new("Indicator Code", DataType::Utf8, false));
            columns.push(Arc::new(StringArray::from(vec!["NY.GDP.MKTP.CD"; 2])));
        }

        fields.push(Field::new("1960", DataType::Float32, true));
        columns.push(Arc::new(Float32Array::from(vec![Some(1.5), None])));
        fields.push(Field::new("1961", DataType::Int64, true));
        columns.push(Arc::new(Int64Array::from(vec![Some(7), Some(0)])));
        fields.push(Field::new("1962", DataType::Int32, true));
        columns.push(Arc::new(Int32Array::from(vec![Some(3), None])));
        fields.push(Field::new("1963", DataType::Null, true));
        columns.push(Arc::new(NullArray::new(2)));
        for year in 1964..=2020 {
            fields.push(Field::new(year.to_string(), DataType::Float64, true));
            columns.push(Arc::new(Float64Array::from(vec![Some(year as f64), None])));
        }

        fields.push(Field::new("Unnamed: 65", DataType::Utf8, true));
        columns.push(Arc::new(StringArray::from(vec![None::<&str>, None])));
        (fields, columns)
    }

    fn write_parquet(path: &Path, (fields, columns): (Vec<Field>, Vec<ArrayRef>)) {
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn loads_parquet_with_mixed_year_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("WDIData.parquet");
        write_parquet(&path, parquet_columns(true));

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.country_names, vec!["India", "Brazil"]);
        let (india, brazil) = (&ds.records[0], &ds.records[1]);
        assert_eq!(india.indicator_code, "NY.GDP.MKTP.CD");
        assert_eq!(india.values.len(), YEAR_COUNT);

        assert_eq!(india.value_for(1960), Some(1.5));
        assert_eq!(india.value_for(1961), Some(7.0));
        assert_eq!(india.value_for(1962), Some(3.0));
        assert_eq!(india.value_for(2020), Some(2020.0));

        // Nulls are absent, a stored zero is not.
        assert_eq!(brazil.value_for(1960), None);
        assert_eq!(brazil.value_for(1961), Some(0.0));
        assert_eq!(brazil.value_for(1962), None);
        assert_eq!(brazil.value_for(1990), None);

        // The all-null year column is absent for every row.
        assert_eq!(india.value_for(1963), None);
        assert_eq!(brazil.value_for(1963), None);
        assert_eq!(india.present_count(), YEAR_COUNT - 1);
        assert_eq!(brazil.present_count(), 1);
    }

    #[test]
    fn parquet_without_an_identifying_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("WDIData.parquet");
        write_parquet(&path, parquet_columns(false));

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'Indicator Code' column"));
    }

    #[test]
    fn loads_csv_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("WDIData.csv");
        let csv = format!(
            "{}\n{}\n{}\n",
            header(true),
            row("India", "GDP", &["1"]),
            row("India", "Population, total", &["2"])
        );
        std::fs::write(&path, csv).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.country_names, vec!["India"]);
    }
}
