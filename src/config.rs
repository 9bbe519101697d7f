use std::path::PathBuf;

/// Fixed values written into every [`BookingRecord`].
///
/// [`BookingRecord`]: crate::booking::record::BookingRecord
#[derive(Debug, Clone)]
pub struct RecordDefaults {
    pub status: String,
    pub u_date: String,
    pub u_time: String,
    pub gate_out: String,
    pub is_bl: bool,
    pub timestamp: i64,
    /// `chrono` format string for the per-file upload time.
    pub upload_format: String,
}
impl Default for RecordDefaults {
    fn default() -> Self {
        RecordDefaults {
            status: "Pending".to_string(),
            u_date: "2026-01-30".to_string(),
            u_time: "08:00".to_string(),
            gate_out: "-".to_string(),
            is_bl: false,
            timestamp: 1_738_200_000_000,
            upload_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

/// Order in which booking files are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrder {
    /// Filenames sorted byte-wise before processing.
    Lexical,
    /// Whatever order the platform lists the directory in. Not stable.
    ///
    /// Not selected by the default run.
    #[allow(dead_code)]
    Listing,
}

/**
Settings for a single run.

There are no flags or environment variables; [`Config::default`] holds the
constants the run uses.
*/
#[derive(Debug, Clone)]
pub struct Config {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
    /// Zero-based sheet row holding the column headers. Rows above it are
    /// decorative.
    pub header_row: usize,
    /// Lowercase extensions accepted as booking files.
    pub extensions: Vec<String>,
    pub file_order: FileOrder,
    /// Name of the `window` global the output script assigns.
    pub variable: String,
    pub defaults: RecordDefaults,
}
impl Default for Config {
    fn default() -> Self {
        Config {
            source_dir: PathBuf::from("booking_file"),
            output_path: PathBuf::from("mockData.js"),
            header_row: 3,
            extensions: ["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            file_order: FileOrder::Lexical,
            variable: "MOCK_DATA".to_string(),
            defaults: RecordDefaults::default(),
        }
    }
}
impl Config {
    /// Returns `true` if `file_name` carries one of the accepted extensions.
    ///
    /// Office lock files (`~$Book.xlsx`) are never accepted.
    pub fn accepts(&self, file_name: &str) -> bool {
        if file_name.starts_with("~$") {
            return false;
        }
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|accepted| *accepted == ext)
    }
}
