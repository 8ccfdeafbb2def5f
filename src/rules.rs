//! Income tax rules table
//!
//! A read-only CSV resource loaded once per run and embedded verbatim
//! into the computation prompt. The contents are opaque to this crate:
//! columns are keyed by header, never interpreted.

use crate::error::InterviewError;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Column-keyed view of the rules CSV
#[derive(Debug, Clone)]
pub struct RulesTable {
    columns: BTreeMap<String, Vec<String>>,
}

impl RulesTable {
    /// Load the rules CSV. A missing or empty file is fatal.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            InterviewError::ResourceError(format!(
                "failed to read rules table {}: {}",
                path.display(),
                e
            ))
        })?;

        let table = Self::parse(&raw)?;

        info!(
            path = %path.display(),
            columns = table.columns.len(),
            "Rules table loaded"
        );

        Ok(table)
    }

    fn parse(raw: &str) -> crate::Result<Self> {
        let mut lines = raw.lines().filter(|l| !l.trim().is_empty());

        let header = lines.next().ok_or_else(|| {
            InterviewError::ResourceError("rules table is empty".to_string())
        })?;

        let headers: Vec<String> = header.split(',').map(|h| h.trim().to_string()).collect();

        let mut columns: BTreeMap<String, Vec<String>> =
            headers.iter().map(|h| (h.clone(), Vec::new())).collect();

        for line in lines {
            let cells: Vec<&str> = line.split(',').collect();
            for (i, header) in headers.iter().enumerate() {
                let cell = cells.get(i).map(|c| c.trim()).unwrap_or("");
                if let Some(column) = columns.get_mut(header) {
                    column.push(cell.to_string());
                }
            }
        }

        Ok(Self { columns })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Serialized form embedded into the computation prompt
    pub fn to_prompt_text(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
regime,slab_from,slab_to,rate_percent
old_regime,0,250000,0
old_regime,250000,500000,5
new_regime,0,300000,0
";

    #[test]
    fn test_parse_column_keyed() {
        let table = RulesTable::parse(SAMPLE_CSV).unwrap();
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.columns["regime"].len(), 3);
        assert_eq!(table.columns["rate_percent"][1], "5");
    }

    #[test]
    fn test_parse_rejects_empty_file() {
        let err = RulesTable::parse("").unwrap_err();
        assert!(matches!(err, InterviewError::ResourceError(_)));
    }

    #[test]
    fn test_prompt_text_contains_cells() {
        let table = RulesTable::parse(SAMPLE_CSV).unwrap();
        let text = table.to_prompt_text().unwrap();
        assert!(text.contains("slab_from"));
        assert!(text.contains("250000"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let table = RulesTable::load(file.path()).unwrap();
        assert_eq!(table.column_count(), 4);
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = RulesTable::load(Path::new("no/such/itr_rules.csv")).unwrap_err();
        assert!(matches!(err, InterviewError::ResourceError(_)));
    }
}
