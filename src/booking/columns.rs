//! Fuzzy header resolution.
use std::collections::HashMap;

/// Header the truck number is read from. Matched exactly, never fuzzily.
pub const TRUCK_COLUMN: &str = "Truck In No.";

/// Semantic columns looked up by fuzzy header match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ContainerOut,
    ContainerIn,
    TruckSize,
    ContainerSize,
    Remark,
    JobNumber,
    Trailer,
    Customer,
}
impl Field {
    pub const ALL: [Field; 8] = [
        Field::ContainerOut,
        Field::ContainerIn,
        Field::TruckSize,
        Field::ContainerSize,
        Field::Remark,
        Field::JobNumber,
        Field::Trailer,
        Field::Customer,
    ];
    /// Header names tried for this field, highest priority first.
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            Field::ContainerOut => &["Container Out 1", "Container Out"],
            Field::ContainerIn => &[
                "Container In 1",
                "Container In No.",
                "Container In",
                "Container No.",
            ],
            Field::TruckSize => &["TRUCK / Size **", "TRUCK / SIZE", "Truck Size"],
            Field::ContainerSize => &["CONTAINER / SIZE*", "CONTAINER / SIZE", "Container Size"],
            Field::Remark => &["Remark", "REMARK"],
            // The double space is how the sheets spell it.
            Field::JobNumber => &["Job  No.", "JobNo"],
            Field::Trailer => &["Trailer In No.", "Trailer No."],
            Field::Customer => &["Customer Name", "Customer"],
        }
    }
}

/// Lowercases `header` and drops every whitespace character, newlines included.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/**
Returns the index of the header matching the first viable candidate.

For each candidate in order, an exact match on the normalized form wins;
failing that, the first header (left to right) whose normalized form
contains the normalized candidate is taken. `None` when no candidate hits.

Two headers that normalize to the same text resolve to the rightmost one,
the same way a map keyed on the normalized name would keep the last insert.
*/
pub fn resolve_column<S>(headers: &[S], candidates: &[&str]) -> Option<usize>
where
    S: AsRef<str>,
{
    let normalized = headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect::<Vec<String>>();

    // Keep first-seen order for the containment scan
    let mut exact: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for (idx, norm) in normalized.iter().enumerate() {
        if exact.insert(norm.as_str(), idx).is_none() {
            order.push(norm.as_str());
        }
    }

    for candidate in candidates {
        let target = normalize_header(candidate);
        if let Some(idx) = exact.get(target.as_str()) {
            return Some(*idx);
        }
        if let Some(hit) = order.iter().find(|norm| norm.contains(target.as_str())) {
            return exact.get(hit).copied();
        }
    }
    None
}

/**
Per-sheet lookup from semantic field to column index.

Built once from a sheet's header row so the row loop only indexes.
*/
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    truck: Option<usize>,
    fields: HashMap<Field, usize>,
}
impl ColumnMap {
    pub fn from_headers<S>(headers: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let truck = headers.iter().position(|h| h.as_ref() == TRUCK_COLUMN);
        let fields = Field::ALL
            .iter()
            .filter_map(|field| {
                resolve_column(headers, field.candidates()).map(|idx| (*field, idx))
            })
            .collect();
        Self { truck, fields }
    }
    /// Column index of the fixed truck header, if present.
    pub fn truck(&self) -> Option<usize> {
        self.truck
    }
    pub fn column(&self, field: Field) -> Option<usize> {
        self.fields.get(&field).copied()
    }
    /// Returns `true` if `field` resolved to a column.
    pub fn has(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }
    /// Raw cell for `field` in `row`; `None` if the field is unresolved.
    ///
    /// A resolved column past the end of a short row reads as empty.
    pub fn get<'a>(&self, row: &'a [String], field: Field) -> Option<&'a str> {
        self.column(field)
            .map(|idx| row.get(idx).map(String::as_str).unwrap_or(""))
    }
    pub fn truck_cell<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        self.truck
            .map(|idx| row.get(idx).map(String::as_str).unwrap_or(""))
    }
}
