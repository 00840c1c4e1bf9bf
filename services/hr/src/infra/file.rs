//! Roster file parsing for bulk imports. CSV and Excel uploads both come
//! out as raw [`ImportRow`]s; validation happens downstream so row numbers
//! in import reports line up with the file an HR admin is looking at.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::domain::types::ImportRow;
use crate::error::HrServiceError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parse a roster upload into raw rows. The format is picked from the file
/// extension: `.csv`, `.xlsx`, or `.xls`.
pub fn parse_rows(bytes: &[u8], filename: &str) -> Result<Vec<ImportRow>, HrServiceError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "csv" => parse_csv_rows(bytes),
        "xlsx" | "xls" => parse_sheet_rows(bytes),
        _ => Err(HrServiceError::UnsupportedFile),
    }
}

fn parse_csv_rows(bytes: &[u8]) -> Result<Vec<ImportRow>, HrServiceError> {
    let data = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => rest,
        None => bytes,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|_| HrServiceError::InvalidFile)?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let columns = column_map(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|_| HrServiceError::InvalidFile)?;
        let field = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
        };
        rows.push(row_from_fields(field));
    }
    Ok(rows)
}

fn parse_sheet_rows(bytes: &[u8]) -> Result<Vec<ImportRow>, HrServiceError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|_| HrServiceError::InvalidFile)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        _ => return Err(HrServiceError::InvalidFile),
    };

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| c.to_string().trim().to_lowercase())
            .collect(),
        None => return Err(HrServiceError::InvalidFile),
    };
    let columns = column_map(&headers)?;

    let mut rows = Vec::new();
    for sheet_row in sheet_rows {
        let field = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|&i| sheet_row.get(i))
                .and_then(cell_text)
        };
        let row = row_from_fields(field);
        // Spreadsheet ranges can trail off into formatting-only rows.
        if row_is_blank(&row) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Header name to column index. The first occurrence of a repeated header
/// wins. An email column is required; everything else is optional.
fn column_map(headers: &[String]) -> Result<HashMap<String, usize>, HrServiceError> {
    let mut columns = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        if !header.is_empty() {
            columns.entry(header.clone()).or_insert(i);
        }
    }
    if !columns.contains_key("email") {
        return Err(HrServiceError::InvalidFile);
    }
    Ok(columns)
}

fn row_from_fields(field: impl Fn(&str) -> Option<String>) -> ImportRow {
    ImportRow {
        name: field("name"),
        email: field("email"),
        password: field("password"),
        dob: field("dob"),
        gender: field("gender"),
        address: field("address"),
        phone: field("phone"),
        marital_status: field("marital_status"),
        external_id: field("external_id"),
        dependents: vec![],
    }
}

fn row_is_blank(row: &ImportRow) -> bool {
    row.name.is_none()
        && row.email.is_none()
        && row.password.is_none()
        && row.dob.is_none()
        && row.gender.is_none()
        && row.address.is_none()
        && row.phone.is_none()
        && row.marital_status.is_none()
        && row.external_id.is_none()
}

/// Render a spreadsheet cell as trimmed text. Date cells come out as
/// `YYYY-MM-DD` so they parse the same as CSV date fields.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => String::new(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => d.date().format("%Y-%m-%d").to_string(),
            None => String::new(),
        },
        other => other.to_string(),
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}
