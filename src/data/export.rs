use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::table::CountryTable;

/// Write `table` as CSV in presentation column order.
pub fn write_csv<W: Write>(table: &CountryTable, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(CountryTable::headers())
        .context("writing CSV header")?;

    let columns = CountryTable::columns();
    for row in &table.rows {
        writer
            .write_record(columns.iter().map(|&c| row.text(c)))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Save `table` to `path`.
pub fn save_csv(table: &CountryTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, file)?;
    log::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
