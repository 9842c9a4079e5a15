//! Read temple rows from a spreadsheet
//!
//! Only the first worksheet is consulted. The header row is matched
//! case-insensitively against the column names the scrape exports
//! (`name`, `category`, `type`, `subtypes`, `city`, `us_state`, `phone`,
//! `site`, `rating`, `reviews`, `email_1`, `full_address`, `street`,
//! `description`); unknown columns are ignored.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::import::record::RawRow;

/// Read every data row of the first worksheet, in sheet order. Rows with
/// no recognized content at all are skipped.
pub fn read_temple_workbook<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("Spreadsheet has no worksheets: {}", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    parse_range(&range)
}

fn parse_range(range: &Range<Data>) -> Result<Vec<RawRow>> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        bail!("Worksheet is empty");
    };

    // Column name -> index, case-insensitive
    let headers: HashMap<String, usize> = header_row
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| match cell {
            Data::String(s) if !s.trim().is_empty() => Some((s.trim().to_lowercase(), i)),
            _ => None,
        })
        .collect();

    if !headers.contains_key("name") {
        bail!("Worksheet has no 'name' column");
    }

    let mut parsed = Vec::new();
    for row in rows {
        let get = |column: &str| {
            headers
                .get(column)
                .and_then(|&i| row.get(i))
                .and_then(cell_to_string)
        };

        let raw = RawRow {
            name: get("name"),
            category: get("category"),
            type_: get("type"),
            subtypes: get("subtypes"),
            city: get("city"),
            us_state: get("us_state"),
            phone: get("phone"),
            site: get("site"),
            rating: get("rating"),
            reviews: get("reviews"),
            email_1: get("email_1"),
            full_address: get("full_address"),
            street: get("street"),
            description: get("description"),
        };

        if raw == RawRow::default() {
            continue;
        }
        parsed.push(raw);
    }

    Ok(parsed)
}

/// Render a cell as text; empty and error cells become None. Integral
/// floats drop the trailing `.0` so phone and review columns survive
/// Excel's numeric coercion.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format!("{}", dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_coercions() {
        assert_eq!(cell_to_string(&Data::Empty), None);
        assert_eq!(cell_to_string(&Data::String("  ".to_string())), None);
        assert_eq!(
            cell_to_string(&Data::String(" Sri Temple ".to_string())),
            Some("Sri Temple".to_string())
        );
        assert_eq!(cell_to_string(&Data::Int(120)), Some("120".to_string()));
        // Review counts arrive as floats from Excel
        assert_eq!(cell_to_string(&Data::Float(120.0)), Some("120".to_string()));
        assert_eq!(cell_to_string(&Data::Float(4.5)), Some("4.5".to_string()));
    }

    #[test]
    fn test_parse_range_maps_headers_case_insensitively() {
        let mut range = Range::new((0, 0), (2, 3));
        range.set_value((0, 0), Data::String("Name".to_string()));
        range.set_value((0, 1), Data::String("CITY".to_string()));
        range.set_value((0, 2), Data::String("us_state".to_string()));
        range.set_value((0, 3), Data::String("ignored_column".to_string()));
        range.set_value((1, 0), Data::String("Sri Temple".to_string()));
        range.set_value((1, 1), Data::String("Fremont".to_string()));
        range.set_value((1, 2), Data::String("CA".to_string()));
        range.set_value((2, 0), Data::String("Jain Center".to_string()));

        let rows = parse_range(&range).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("Sri Temple"));
        assert_eq!(rows[0].city.as_deref(), Some("Fremont"));
        assert_eq!(rows[0].us_state.as_deref(), Some("CA"));
        assert_eq!(rows[1].name.as_deref(), Some("Jain Center"));
        assert_eq!(rows[1].city, None);
    }

    #[test]
    fn test_parse_range_requires_name_column() {
        let mut range = Range::new((0, 0), (0, 0));
        range.set_value((0, 0), Data::String("city".to_string()));
        assert!(parse_range(&range).is_err());
    }

    #[test]
    fn test_parse_range_skips_fully_empty_rows() {
        let mut range = Range::new((0, 0), (2, 0));
        range.set_value((0, 0), Data::String("name".to_string()));
        range.set_value((2, 0), Data::String("Sri Temple".to_string()));

        let rows = parse_range(&range).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
