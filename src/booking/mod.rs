pub mod columns;
pub mod record;
pub mod sheet;

pub mod result {
    use thiserror::Error;
    #[derive(Debug, Error)]
    pub enum ErrorKind {
        #[error("Unsupported file extension: {0}")]
        UnsupportedExtension(String),
        #[error("Unable to read workbook: {0}")]
        Workbook(#[from] calamine::Error),
        #[error("Unable to read csv: {0}")]
        Csv(#[from] csv::Error),
        #[error("Workbook contains no worksheets")]
        NoWorksheet,
        #[error("Sheet ends before header row {0}")]
        MissingHeader(usize),
    }
    pub type Result<T> = std::result::Result<T, ErrorKind>;
}
