use crate::booking::record::BookingRecord;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Container for every [`BookingRecord`] emitted in a run, in emit order.
#[derive(Debug, Default)]
pub struct MockData {
    records: Vec<BookingRecord>,
}
impl MockData {
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /**
    Renders the records as a browser script assigning `window.<variable>`.

    The array is pretty printed with 2-space indentation and non-ASCII text
    is kept as is.
    */
    pub fn to_script(&self, variable: &str) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.records)?;
        Ok(format!("window.{variable} = {json};\n"))
    }
    /// Writes the script to `path`, replacing whatever is there.
    pub fn write_to<P>(&self, path: P, variable: &str) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let script = self.to_script(variable)?;
        fs::write(path, script.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("wrote {} bytes to {}", script.len(), path.display());
        Ok(())
    }
}
impl Extend<BookingRecord> for MockData {
    fn extend<I: IntoIterator<Item = BookingRecord>>(&mut self, iter: I) {
        self.records.extend(iter)
    }
}
impl FromIterator<BookingRecord> for MockData {
    fn from_iter<I: IntoIterator<Item = BookingRecord>>(iter: I) -> Self {
        MockData {
            records: Vec::from_iter(iter),
        }
    }
}
