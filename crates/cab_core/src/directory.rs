//! The driver roster: a flat CSV of drivers, reloaded fresh per search.
//!
//! Matching is exact, case-insensitive equality on the location column.
//! There is no index, no fuzzy search, and no ranking beyond load order.

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

/// One row of the driver roster.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverRecord {
    pub id: String,
    pub name: String,
    pub rating: f64,
    #[serde(rename = "eta")]
    pub eta_minutes: u32,
    pub base_fare: f64,
    pub contact_number: String,
    pub location: String,
}

/// Errors raised while loading the roster.
#[derive(Debug)]
pub enum DirectoryError {
    /// Missing columns, non-numeric numerics, or an unreadable file.
    Csv(csv::Error),
    /// The same driver id appeared twice.
    DuplicateId(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Csv(err) => write!(f, "failed to read driver roster: {err}"),
            DirectoryError::DuplicateId(id) => write!(f, "duplicate driver id: {id}"),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryError::Csv(err) => Some(err),
            DirectoryError::DuplicateId(_) => None,
        }
    }
}

impl From<csv::Error> for DirectoryError {
    fn from(err: csv::Error) -> Self {
        DirectoryError::Csv(err)
    }
}

/// Load-ordered collection of drivers with unique ids.
#[derive(Debug, Clone, Default)]
pub struct DriverDirectory {
    records: Vec<DriverRecord>,
}

impl DriverDirectory {
    /// Load the roster from a CSV file with header columns
    /// `id, name, rating, eta, base_fare, contact_number, location`.
    ///
    /// A malformed row fails the whole load; nothing is recovered.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv_reader(reader)
    }

    /// Load the roster from any reader yielding the same CSV layout.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        Self::from_csv_reader(csv::Reader::from_reader(reader))
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DirectoryError> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        for row in reader.deserialize() {
            let record: DriverRecord = row?;
            if !seen.insert(record.id.clone()) {
                return Err(DirectoryError::DuplicateId(record.id));
            }
            records.push(record);
        }
        tracing::info!(drivers = records.len(), "driver roster loaded");
        Ok(Self { records })
    }

    /// All drivers whose location equals `query` case-insensitively,
    /// in load order. An unknown location yields an empty vec, not an error.
    pub fn matching_location(&self, query: &str) -> Vec<&DriverRecord> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.location.to_lowercase() == query)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&DriverRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[DriverRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
id,name,rating,eta,base_fare,contact_number,location
1,Alice,4.8,5,10.0,555-0100,Downtown
2,Bob,4.2,8,12.5,555-0101,Uptown
3,Cara,4.9,3,9.0,555-0102,downtown
";

    fn sample_directory() -> DriverDirectory {
        DriverDirectory::from_reader(SAMPLE.as_bytes()).expect("sample roster should load")
    }

    #[test]
    fn loads_all_rows_in_order() {
        let directory = sample_directory();
        assert_eq!(directory.len(), 3);
        assert_eq!(directory.records()[0].name, "Alice");
        assert_eq!(directory.records()[2].name, "Cara");
    }

    #[test]
    fn matching_is_case_insensitive_and_ordered() {
        let directory = sample_directory();
        for query in ["downtown", "DOWNTOWN", "DownTown"] {
            let matches = directory.matching_location(query);
            assert_eq!(matches.len(), 2, "query {query:?}");
            assert_eq!(matches[0].name, "Alice");
            assert_eq!(matches[1].name, "Cara");
        }
    }

    #[test]
    fn single_row_scenario() {
        let csv = "\
id,name,rating,eta,base_fare,contact_number,location
1,Alice,4.8,5,10.0,555-0100,Downtown
";
        let directory = DriverDirectory::from_reader(csv.as_bytes()).expect("roster should load");
        let matches = directory.matching_location("downtown");
        assert_eq!(matches.len(), 1);
        let alice = matches[0];
        assert_eq!(alice.id, "1");
        assert_eq!(alice.rating, 4.8);
        assert_eq!(alice.eta_minutes, 5);
        assert_eq!(alice.base_fare, 10.0);
        assert_eq!(alice.contact_number, "555-0100");
        assert!(directory.matching_location("Uptown").is_empty());
    }

    #[test]
    fn unknown_location_returns_empty_not_error() {
        let directory = sample_directory();
        assert!(directory.matching_location("Nowhereville").is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let directory = sample_directory();
        assert_eq!(directory.get("2").map(|d| d.name.as_str()), Some("Bob"));
        assert!(directory.get("99").is_none());
    }

    #[test]
    fn non_numeric_rating_fails_the_load() {
        let csv = "\
id,name,rating,eta,base_fare,contact_number,location
1,Alice,not-a-number,5,10.0,555-0100,Downtown
";
        let result = DriverDirectory::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DirectoryError::Csv(_))));
    }

    #[test]
    fn missing_column_fails_the_load() {
        let csv = "\
id,name,rating,eta,base_fare
1,Alice,4.8,5,10.0
";
        let result = DriverDirectory::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DirectoryError::Csv(_))));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let csv = "\
id,name,rating,eta,base_fare,contact_number,location
1,Alice,4.8,5,10.0,555-0100,Downtown
1,Bob,4.2,8,12.5,555-0101,Uptown
";
        let result = DriverDirectory::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(DirectoryError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn load_csv_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be creatable");
        file.write_all(SAMPLE.as_bytes()).expect("sample should be written");
        let directory =
            DriverDirectory::load_csv(file.path()).expect("roster should load from disk");
        assert_eq!(directory.len(), 3);
    }
}
