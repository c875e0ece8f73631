use rust_xlsxwriter::{Format, Workbook};

use crate::domain::model::{CellValue, DataTable};
use crate::utils::error::Result;

/// Width of each column in character units: the longest rendered value or
/// header in that column, plus two for padding.
pub fn column_widths(table: &DataTable) -> Vec<usize> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let mut width = header.len();
            for row in &table.rows {
                width = width.max(row[index].render().len());
            }
            width + 2
        })
        .collect()
}

/// Serializes the views into a styled workbook, one sheet per view with a
/// bold header row and content-sized columns. The workbook is assembled in
/// a scratch file that is removed on every exit path.
pub fn render_workbook(sheets: &[DataTable]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for table in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.name)?;

        for (col, header) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (row_index, row) in table.rows.iter().enumerate() {
            let row_num = (row_index + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    CellValue::Text(s) => worksheet.write_string(row_num, col as u16, s)?,
                    CellValue::Float(v) => worksheet.write_number(row_num, col as u16, *v)?,
                    CellValue::Int(v) => worksheet.write_number(row_num, col as u16, *v as f64)?,
                    CellValue::Date(d) => {
                        worksheet.write_string(row_num, col as u16, d.to_string())?
                    }
                };
            }
        }

        for (col, width) in column_widths(table).iter().enumerate() {
            worksheet.set_column_width(col as u16, *width as f64)?;
        }
    }

    let scratch = tempfile::Builder::new()
        .prefix("analytics_report")
        .suffix(".xlsx")
        .tempfile()?;
    workbook.save(scratch.path())?;
    let bytes = std::fs::read(scratch.path())?;

    tracing::debug!("rendered workbook: {} sheets, {} bytes", sheets.len(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_table() -> DataTable {
        DataTable {
            name: "Widths",
            columns: vec!["A", "B"],
            rows: vec![
                vec![CellValue::Int(1), CellValue::Text("x".to_string())],
                vec![CellValue::Int(22), CellValue::Text("yy".to_string())],
            ],
        }
    }

    #[test]
    fn test_column_width_is_longest_rendered_value_plus_padding() {
        let widths = column_widths(&two_column_table());
        // max(len("A"), len("1"), len("22")) + 2
        assert_eq!(widths, vec![4, 4]);
    }

    #[test]
    fn test_header_can_dominate_column_width() {
        let table = DataTable {
            name: "Headers",
            columns: vec!["Transaction Count"],
            rows: vec![vec![CellValue::Int(7)]],
        };
        assert_eq!(column_widths(&table), vec!["Transaction Count".len() + 2]);
    }

    #[test]
    fn test_render_workbook_produces_xlsx_bytes() {
        let bytes = render_workbook(&[two_column_table()]).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_workbook_rejects_duplicate_sheet_names() {
        let sheets = vec![two_column_table(), two_column_table()];
        assert!(render_workbook(&sheets).is_err());
    }
}
