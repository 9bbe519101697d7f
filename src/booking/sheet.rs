//! Reads a booking file into a header row plus string rows.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};

use crate::booking::result::{ErrorKind, Result};

/// Cell text the tabular reader treats as missing.
static NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A loaded booking sheet.
///
/// Every cell is already stringified; missing cells are empty strings.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}
impl Sheet {
    /**
    Loads the first worksheet of `path`, treating `header_row` as the header.

    Workbooks (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`) go through calamine, `csv` files
    through the csv reader.

    # Errors

    Fails if the file cannot be opened or parsed, has no worksheet, or ends
    before `header_row`.
    */
    pub fn from_path<P>(path: P, header_row: usize) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Self::from_csv_path(path, header_row),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::from_workbook_path(path, header_row),
            _ => Err(ErrorKind::UnsupportedExtension(ext)),
        }
    }
    fn from_workbook_path(path: &Path, header_row: usize) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ErrorKind::NoWorksheet)??;
        Self::from_range(&range, header_row)
    }
    /// Builds a sheet from a calamine range.
    ///
    /// calamine trims leading blank rows and columns off a range, so the
    /// range start is added back to keep `header_row` absolute.
    fn from_range(range: &Range<Data>, header_row: usize) -> Result<Self> {
        let Some((start_row, start_col)) = range.start() else {
            return Err(ErrorKind::MissingHeader(header_row));
        };
        let (start_row, start_col) = (start_row as usize, start_col as usize);
        let Some(skip) = header_row.checked_sub(start_row) else {
            return Err(ErrorKind::MissingHeader(header_row));
        };

        let mut rows = range.rows().skip(skip);
        let Some(header) = rows.next() else {
            return Err(ErrorKind::MissingHeader(header_row));
        };
        let leading = vec![String::new(); start_col];
        let header_cells = leading
            .iter()
            .cloned()
            .chain(header.iter().map(cell_to_string))
            .collect();
        let body = rows
            .map(|row| {
                leading
                    .iter()
                    .cloned()
                    .chain(row.iter().map(cell_to_string))
                    .collect()
            })
            .collect();
        Ok(Self::from_parts(header_cells, body))
    }
    /// Reads a csv file, locating the header by physical line.
    ///
    /// The csv reader skips empty lines, so records are matched against the
    /// line they start on. If the header line itself is empty the sheet gets
    /// no headers.
    fn from_csv_path(path: &Path, header_row: usize) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        // Positions are 1-based lines
        let header_line = header_row as u64 + 1;
        let mut header_cells = None;
        let mut body = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |pos| pos.line());
            if line < header_line {
                continue;
            }
            let cells = record.iter().map(na_to_empty).collect::<Vec<String>>();
            if header_cells.is_some() {
                body.push(cells);
            } else if line == header_line {
                header_cells = Some(cells);
            } else {
                header_cells = Some(Vec::new());
                body.push(cells);
            }
        }
        let Some(header_cells) = header_cells else {
            return Err(ErrorKind::MissingHeader(header_row));
        };
        Ok(Self::from_parts(header_cells, body))
    }
    /// Names the header cells and drops blank rows.
    fn from_parts(header_cells: Vec<String>, body: Vec<Vec<String>>) -> Self {
        let headers = name_headers(header_cells);
        let rows = body
            .into_iter()
            .filter(|row: &Vec<String>| row.iter().any(|cell| !cell.is_empty()))
            .collect();
        Self { headers, rows }
    }
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Blank headers become `Unnamed: <col>`, repeats get `.1`, `.2`, ... suffixes.
///
/// A suffixed name that is already taken is suffixed again (`A.1.1`).
fn name_headers(cells: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    cells
        .into_iter()
        .enumerate()
        .map(|(col, cell)| {
            let mut name = if cell.trim().is_empty() {
                format!("Unnamed: {col}")
            } else {
                cell
            };
            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{name}.{count}");
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), count + 1);
            name
        })
        .collect()
}

fn na_to_empty(text: &str) -> String {
    if NA_MARKERS.contains(&text) {
        String::new()
    } else {
        text.to_string()
    }
}

/// Stringifies a workbook cell the way the booking sheets are read.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => na_to_empty(s),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_nan() => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
