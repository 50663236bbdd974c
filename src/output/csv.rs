// Frequency CSV export: `token,count` per line, no header.
//
// Tokens never contain commas or quotes (punctuation is stripped before
// counting), so no quoting is needed.

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::text::frequency::FrequencyTable;

/// Render the table as CSV text.
pub fn format_csv(table: &FrequencyTable) -> String {
    let mut out = String::new();
    for (token, count) in table.entries() {
        out.push_str(token);
        out.push(',');
        out.push_str(&count.to_string());
        out.push('\n');
    }
    out
}

/// Write the table to `path` as UTF-8 CSV.
pub fn write_csv(path: &Path, table: &FrequencyTable) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_csv(table).as_bytes())
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write CSV file {}", path.display()))?;
    info!(path = %path.display(), rows = table.len(), "Frequencies exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_csv() {
        let table = FrequencyTable::from_tokens(&["paz", "niñez", "paz"]);
        assert_eq!(format_csv(&table), "paz,2\nniñez,1\n");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.csv");
        write_csv(&path, &FrequencyTable::from_tokens(&["hola mundo", "hola mundo"])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hola mundo,2\n");
    }
}
