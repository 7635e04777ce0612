use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::app::*;

/// Adds the names found in the first column of a worksheet.
///
/// Without a worksheet name, the workbook must contain a single worksheet.
pub fn read_excel_roster(
    path: &str,
    worksheet_name: Option<&str>,
    roster: &mut Roster,
) -> AppResult<usize> {
    let wrange = get_range(path, worksheet_name)?;
    let mut names: Vec<String> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let name = match row.first() {
            Some(DataType::String(s)) => s.clone(),
            Some(DataType::Int(i)) => i.to_string(),
            Some(DataType::Float(f)) => f.to_string(),
            Some(DataType::Empty) | None => continue,
            Some(x) => {
                return Err(AppError::ExcelWrongCellType {
                    lineno: idx as u64 + 1,
                    content: format!("{:?}", x),
                });
            }
        };
        names.push(name);
    }
    debug!("read_excel_roster: {:?}: {} cells", path, names.len());
    Ok(roster.ingest_names(names))
}

fn get_range(path: &str, worksheet_name_o: Option<&str>) -> AppResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_roster: path: {:?} worksheet: {:?}",
        path, worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
                path,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_excel_roster: path: {:?} worksheet: {:?}",
                    path, worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => {
                let names: Vec<String> = all_worksheets.iter().map(|(n, _)| n.clone()).collect();
                whatever!(
                    "{} has several worksheets ({:?}), choose one with --excel-worksheet-name",
                    path,
                    names
                )
            }
        }
    }
}
