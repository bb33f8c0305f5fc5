// Reads worksheet exports saved as one CSV file per sub-table.

use log::debug;

use std::path::Path;

use snow_scheduling::table::{RawRow, RawValue, RowSource, SourceLocator, TableError};

use crate::sched::{check_credential, locator_parts};

/// Source adapter over CSV exports: the container is a directory, the
/// sub-table `T` maps to `<container>/T.csv`. The first record is the
/// header and supplies the field names.
pub struct CsvSource;

impl RowSource for CsvSource {
    fn fetch(&self, locator: &SourceLocator) -> Result<Vec<RawRow>, TableError> {
        let (credential, container, sub_table) = locator_parts(locator)?;
        check_credential(credential)?;

        if !Path::new(container).is_dir() {
            return Err(TableError::ContainerNotFound(container.to_string()));
        }
        let path = Path::new(container).join(format!("{}.csv", sub_table));
        if !path.exists() {
            return Err(TableError::SubTableNotFound(sub_table.to_string()));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .from_path(&path)
            .map_err(|e| TableError::UnreadableSource(format!("{}: {}", path.display(), e)))?;
        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| TableError::UnreadableSource(format!("{}: {}", path.display(), e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        debug!("fetch: {:?} header: {:?}", sub_table, headers);

        let mut res: Vec<RawRow> = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            // Header is line 1.
            let lineno = idx + 2;
            let record = record.map_err(|e| TableError::MalformedRow {
                lineno,
                message: e.to_string(),
            })?;
            let mut raw = RawRow::new();
            for (field, value) in headers.iter().zip(record.iter()) {
                raw.insert(field.clone(), RawValue::Str(value.to_string()));
            }
            res.push(raw);
        }
        Ok(res)
    }
}
