//! Loaded documents.
//!
//! A [`Document`] is immutable once built. JSON keeps its nesting; CSV
//! becomes a sequence of flat string-keyed maps, one per record, so the
//! same walkers serve both formats.

pub mod loader;
pub mod value;

pub use loader::load;
pub use value::{Scalar, Value};

use std::io::Read;

/// Source format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    format: Format,
    root: Value,
}

impl Document {
    pub fn new(format: Format, root: Value) -> Self {
        Self { format, root }
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let parsed: serde_json::Value = serde_json::from_str(s)?;
        Ok(Self::from_json_value(parsed))
    }

    pub fn from_json_value(value: serde_json::Value) -> Self {
        Self::new(Format::Json, Value::from(value))
    }

    /// Read a header row plus records. Short records contribute only the
    /// fields they have; a repeated header keeps the last column's value.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut records = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let mut row = Value::Map(Vec::with_capacity(headers.len()));
            for (name, field) in headers.iter().zip(record.iter()) {
                row.insert(name.to_string(), Value::string(field));
            }
            records.push(row);
        }

        Ok(Self::new(Format::Csv, Value::Sequence(records)))
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// True when there is nothing to index
    pub fn is_empty(&self) -> bool {
        self.root.is_empty_container()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_extension("JSON"), Some(Format::Json));
        assert_eq!(Format::from_extension("csv"), Some(Format::Csv));
        assert_eq!(Format::from_extension("yaml"), None);
    }

    #[test]
    fn test_csv_records_become_maps() {
        let data = "name,age\nAlice,30\nBob,25\n";
        let doc = Document::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(doc.format(), Format::Csv);

        let Value::Sequence(rows) = doc.root() else {
            panic!("expected sequence of records");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some(&Value::string("Bob")));
        assert_eq!(rows[1].get("age"), Some(&Value::string("25")));
    }

    #[test]
    fn test_csv_short_record_and_duplicate_header() {
        let data = "a,b,a\n1,2,3\n4\n";
        let doc = Document::from_csv_reader(data.as_bytes()).unwrap();
        let Value::Sequence(rows) = doc.root() else {
            panic!("expected sequence of records");
        };
        assert_eq!(rows[0].get("a"), Some(&Value::string("3")));
        assert_eq!(rows[1].get("a"), Some(&Value::string("4")));
        assert_eq!(rows[1].get("b"), None);
    }

    #[test]
    fn test_empty_documents() {
        assert!(Document::from_json_str("{}").unwrap().is_empty());
        assert!(Document::from_json_str("[]").unwrap().is_empty());
        assert!(Document::from_csv_reader("name,age\n".as_bytes()).unwrap().is_empty());
        assert!(!Document::from_json_str(r#"{"a": 1}"#).unwrap().is_empty());
    }
}
