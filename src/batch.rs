//! One pass over the booking directory.

use crate::booking::columns::{ColumnMap, Field};
use crate::booking::record::RowNormalizer;
use crate::booking::result::Result as SheetResult;
use crate::booking::sheet::Sheet;
use crate::config::{Config, FileOrder};
use crate::mock::MockData;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/**
Lists the booking files in `config.source_dir`.

Returns `None` if the directory does not exist. Order follows
[`Config::file_order`]; with [`FileOrder::Listing`] it is whatever the
platform returns and may differ between runs.
*/
pub fn list_booking_files(config: &Config) -> Result<Option<Vec<String>>> {
    let dir = &config.source_dir;
    if !dir.is_dir() {
        return Ok(None);
    }
    let mut files = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|ft| !ft.is_dir()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| config.accepts(name))
        .collect::<Vec<String>>();
    if config.file_order == FileOrder::Lexical {
        files.sort();
    }
    Ok(Some(files))
}

/// Loads one file and appends its qualifying rows to `data`.
///
/// Returns the number of records added.
fn collect_file(path: &Path, config: &Config, data: &mut MockData) -> SheetResult<usize> {
    let sheet = Sheet::from_path(path, config.header_row)?;
    let columns = ColumnMap::from_headers(sheet.headers());
    log::debug!(
        "{}: truck column {:?}, resolved {:?}",
        path.display(),
        columns.truck(),
        Field::ALL
            .iter()
            .map(|f| (f, columns.column(*f)))
            .collect::<Vec<_>>()
    );

    let uploaded_date = chrono::Local::now()
        .format(&config.defaults.upload_format)
        .to_string();
    let normalizer = RowNormalizer::new(&columns, &config.defaults, uploaded_date);

    let before = data.len();
    data.extend(sheet.rows().iter().filter_map(|row| normalizer.normalize(row)));
    let added = data.len() - before;
    log::debug!(
        "{}: {} of {} rows kept",
        path.display(),
        added,
        sheet.len()
    );
    Ok(added)
}

/**
Converts every booking file into the mock script.

Returns the number of records written, or `None` when the source
directory is missing (nothing is written in that case).

# Errors

A file that fails to load is reported and skipped. Only listing the
directory or writing the output fails the run.
*/
pub fn run(config: &Config) -> Result<Option<usize>> {
    let Some(files) = list_booking_files(config)? else {
        println!("Directory {} not found.", config.source_dir.display());
        return Ok(None);
    };
    println!("Found {} files.", files.len());

    let mut data = MockData::default();
    for file_name in &files {
        let path = config.source_dir.join(file_name);
        if let Err(e) = collect_file(&path, config, &mut data) {
            println!("Error processing {file_name}: {e}");
            log::debug!("skipped {}: {:?}", path.display(), e);
        }
    }

    if data.is_empty() {
        log::info!("no qualifying rows in {} files", files.len());
    }
    data.write_to(&config.output_path, &config.variable)?;
    println!(
        "Successfully generated {} with {} entries.",
        config.output_path.display(),
        data.len()
    );
    Ok(Some(data.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::{tempdir, TempDir};

    fn config_in(dir: &TempDir) -> Config {
        Config {
            source_dir: dir.path().join("booking_file"),
            output_path: dir.path().join("mockData.js"),
            ..Config::default()
        }
    }
    /// Writes a workbook with three decorative rows, `headers` on row 4,
    /// then `rows`.
    fn write_booking(path: &Path, headers: &[&str], rows: &[&[&str]]) {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, "Booking Report").unwrap();
        ws.write_string(1, 0, "Vientiane Depot").unwrap();
        for (col, header) in headers.iter().enumerate() {
            ws.write_string(3, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    ws.write_string(4 + r as u32, col as u16, *cell).unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }
    fn read_output(config: &Config) -> serde_json::Value {
        let script = fs::read_to_string(&config.output_path).unwrap();
        let body = script
            .strip_prefix("window.MOCK_DATA = ")
            .and_then(|s| s.strip_suffix(";\n"))
            .unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn missing_directory_writes_nothing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_in(&dir);
        assert_eq!(run(&config).unwrap(), None);
        assert!(!config.output_path.exists());
    }
    #[test]
    fn empty_directory_writes_empty_array() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::create_dir(&config.source_dir).unwrap();
        assert_eq!(run(&config).unwrap(), Some(0));
        assert_eq!(read_output(&config), serde_json::json!([]));
    }
    #[test]
    fn lists_only_booking_files_sorted() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::create_dir(&config.source_dir).unwrap();
        for name in ["b.xlsx", "a.csv", "notes.txt", "~$b.xlsx"] {
            fs::write(config.source_dir.join(name), "").unwrap();
        }
        fs::create_dir(config.source_dir.join("old.xlsx")).unwrap();
        let files = list_booking_files(&config).unwrap().unwrap();
        assert_eq!(files, vec!["a.csv", "b.xlsx"]);

        let listing = Config {
            file_order: FileOrder::Listing,
            ..config
        };
        let mut files = list_booking_files(&listing).unwrap().unwrap();
        files.sort();
        assert_eq!(files, vec!["a.csv", "b.xlsx"]);
    }
    #[test]
    fn three_of_four_rows_qualify() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::create_dir(&config.source_dir).unwrap();
        write_booking(
            &config.source_dir.join("booking.xlsx"),
            &["Job  No.", "Truck In No.", "Container\nOut 1", "Container In", "Customer"],
            &[
                &["J-1", "TRK01", "OUT1", "IN1", "Acme"],
                &["J-2", "TRK02", "", "CONT1234", "Acme"],
                &["J-3", "", "OUT3", "", "Ghost"],
                &["J-4", "TRK04", "null", "", "Beta"],
            ],
        );

        assert_eq!(run(&config).unwrap(), Some(3));
        let out = read_output(&config);
        let records = out.as_array().unwrap();
        assert_eq!(records.len(), 3);
        for rec in records {
            assert_eq!(rec["status"], "Pending");
            assert_eq!(rec["isBL"], false);
            assert_eq!(rec["timestamp"], 1738200000000i64);
        }
        assert_eq!(records[0]["id"], "TRK01_J-1");
        assert_eq!(records[0]["container"], "OUT1");
        assert_eq!(records[1]["container"], "CONT1234");
        assert_eq!(records[2]["container"], "-");
        assert_eq!(records[2]["truckSize"], "-");
    }
    #[test]
    fn bad_file_is_skipped() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::create_dir(&config.source_dir).unwrap();
        fs::write(config.source_dir.join("a_broken.xlsx"), b"not a workbook").unwrap();
        write_booking(
            &config.source_dir.join("b_good.xlsx"),
            &["Truck In No.", "Job No."],
            &[&["TRK01", "J-1"]],
        );

        assert_eq!(run(&config).unwrap(), Some(1));
        assert_eq!(read_output(&config)[0]["id"], "TRK01_J-1");
    }
    #[test]
    fn records_follow_file_then_row_order() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::create_dir(&config.source_dir).unwrap();
        write_booking(
            &config.source_dir.join("2_second.xlsx"),
            &["Truck In No."],
            &[&["TRK03"], &["TRK04"]],
        );
        fs::copy("tests/data/bookings.csv", config.source_dir.join("1_first.csv")).unwrap();

        run(&config).unwrap();
        let trucks = read_output(&config)
            .as_array()
            .unwrap()
            .iter()
            .map(|rec| rec["truck"].as_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(trucks, vec!["TRK01", "TRK 02", "TRK03", "TRK03", "TRK04"]);
    }
    #[test]
    fn csv_fixture_normalizes() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::create_dir(&config.source_dir).unwrap();
        fs::copy("tests/data/bookings.csv", config.source_dir.join("bookings.csv")).unwrap();

        assert_eq!(run(&config).unwrap(), Some(3));
        let out = read_output(&config);
        assert_eq!(out[0]["id"], "TRK01_J-5");
        assert_eq!(out[0]["container"], "CONT0001");
        assert_eq!(out[0]["truckSize"], "6W");
        assert_eq!(out[0]["customer"], "ບໍລິສັດ ລາວ");
        assert_eq!(out[1]["id"], "TRK_02_J-6");
        assert_eq!(out[1]["container"], "CONT1234");
        assert_eq!(out[1]["remark"], "-");
        assert_eq!(out[2]["trailer"], "-");
        assert_eq!(out[2]["container"], "CONT5555");

        let script = fs::read_to_string(&config.output_path).unwrap();
        assert!(script.contains("ບໍລິສັດ ລາວ"));
    }
}
