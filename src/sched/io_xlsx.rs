// Reads workbook exports (xlsx) of the scheduling spreadsheet.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;

use std::path::Path;

use snow_scheduling::table::{RawRow, RawValue, RowSource, SourceLocator, TableError};

use crate::sched::{check_credential, locator_parts};

/// Source adapter over an Excel workbook: the container is the workbook
/// path, the sub-table is a worksheet name. The first worksheet row is
/// the header and supplies the field names.
pub struct XlsxSource;

impl RowSource for XlsxSource {
    fn fetch(&self, locator: &SourceLocator) -> Result<Vec<RawRow>, TableError> {
        let (credential, container, sub_table) = locator_parts(locator)?;
        check_credential(credential)?;

        if !Path::new(container).exists() {
            return Err(TableError::ContainerNotFound(container.to_string()));
        }
        let mut workbook: Xlsx<_> = open_workbook(container)
            .map_err(|e| TableError::UnreadableSource(format!("{}: {}", container, e)))?;
        let wrange = workbook
            .worksheet_range(sub_table)
            .ok_or_else(|| TableError::SubTableNotFound(sub_table.to_string()))?
            .map_err(|e| TableError::UnreadableSource(format!("{}: {}", sub_table, e)))?;

        let mut rows_iter = wrange.rows();
        let header = match rows_iter.next() {
            Some(h) => h,
            None => return Ok(Vec::new()),
        };
        let field_names: Vec<Option<String>> = header
            .iter()
            .map(|cell| match cell {
                DataType::String(s) => Some(s.trim().to_string()),
                _ => None,
            })
            .collect();
        debug!("fetch: {:?} header: {:?}", sub_table, field_names);

        let mut res: Vec<RawRow> = Vec::new();
        for (idx, row) in rows_iter.enumerate() {
            // Header is line 1.
            let lineno = idx + 2;
            let mut raw = RawRow::new();
            for (field, cell) in field_names.iter().zip(row.iter()) {
                let field = match field {
                    Some(f) => f,
                    None => continue,
                };
                raw.insert(field.clone(), read_cell(cell, field, lineno)?);
            }
            res.push(raw);
        }
        Ok(res)
    }
}

fn read_cell(cell: &DataType, field: &str, lineno: usize) -> Result<RawValue, TableError> {
    match cell {
        DataType::String(s) => Ok(RawValue::Str(s.clone())),
        DataType::Int(i) => Ok(RawValue::Num(*i)),
        DataType::Float(f) if f.fract() == 0.0 => Ok(RawValue::Num(*f as i64)),
        // Checkbox columns come through as booleans.
        DataType::Bool(b) => Ok(RawValue::Str(b.to_string())),
        DataType::Empty => Ok(RawValue::Str(String::new())),
        other => Err(TableError::MalformedRow {
            lineno,
            message: format!("cell {:?} in field '{}'", other, field),
        }),
    }
}
