use crate::booking::columns::{ColumnMap, Field};
use crate::config::RecordDefaults;
use serde::Serialize;

/// Stand-in for any blank or null-like value.
pub const PLACEHOLDER: &str = "-";

/// Job part of the id when the sheet has no job-number column at all.
const NO_JOB: &str = "NOJOB";

/// Trims `raw`, mapping null-like text (`nan`, `none`, `null`, blank) to [`PLACEHOLDER`].
pub fn clean_value(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.to_lowercase().as_str() {
        "nan" | "none" | "" | "null" => PLACEHOLDER.to_string(),
        _ => trimmed.to_string(),
    }
}

/// One booking row as the browser mock expects it.
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub job: String,
    pub truck: String,
    pub trailer: String,
    pub container: String,
    pub truck_size: String,
    pub container_size: String,
    pub remark: String,
    pub customer: String,
    pub status: String,
    pub u_date: String,
    pub u_time: String,
    pub uploaded_date: String,
    pub gate_out: String,
    #[serde(rename = "isBL")]
    pub is_bl: bool,
    pub timestamp: i64,
}

/**
Turns the rows of one sheet into [`BookingRecord`]s.

Holds the sheet's [`ColumnMap`], the run defaults, and the upload time
stamped on every record from this sheet.
*/
#[derive(Debug)]
pub struct RowNormalizer<'a> {
    columns: &'a ColumnMap,
    defaults: &'a RecordDefaults,
    uploaded_date: String,
}
impl<'a> RowNormalizer<'a> {
    pub fn new(columns: &'a ColumnMap, defaults: &'a RecordDefaults, uploaded_date: String) -> Self {
        Self {
            columns,
            defaults,
            uploaded_date,
        }
    }
    /// Cleaned value of `field`, or [`PLACEHOLDER`] when the column is unresolved.
    fn field(&self, row: &[String], field: Field) -> String {
        self.columns
            .get(row, field)
            .map(clean_value)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
    /// Container out wins; container in is only read when out is blank.
    fn container(&self, row: &[String]) -> String {
        let out = self.field(row, Field::ContainerOut);
        if out != PLACEHOLDER {
            return out;
        }
        self.field(row, Field::ContainerIn)
    }
    /**
    Normalizes a single row.

    Returns `None` when the truck cell is missing, blank, or null-like, since
    a booking without a truck is not shown in the mock.
    */
    pub fn normalize(&self, row: &[String]) -> Option<BookingRecord> {
        let truck = clean_value(self.columns.truck_cell(row)?);
        if truck == PLACEHOLDER {
            return None;
        }
        let job = self.field(row, Field::JobNumber);
        let id_job = match self.columns.has(Field::JobNumber) {
            true => job.as_str(),
            false => NO_JOB,
        };
        let id = format!("{truck}_{id_job}").replace(' ', "_");

        Some(BookingRecord {
            id,
            job,
            trailer: self.field(row, Field::Trailer),
            container: self.container(row),
            truck_size: self.field(row, Field::TruckSize),
            container_size: self.field(row, Field::ContainerSize),
            remark: self.field(row, Field::Remark),
            customer: self.field(row, Field::Customer),
            truck,
            status: self.defaults.status.clone(),
            u_date: self.defaults.u_date.clone(),
            u_time: self.defaults.u_time.clone(),
            uploaded_date: self.uploaded_date.clone(),
            gate_out: self.defaults.gate_out.clone(),
            is_bl: self.defaults.is_bl,
            timestamp: self.defaults.timestamp,
        })
    }
}
