use crate::document::{Document, Format};
use crate::error::LoadError;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;

/// Load a `.json` or `.csv` file.
///
/// A missing file is reported as [`LoadError::NotFound`] so callers can
/// tell it apart from a file that exists but does not parse.
pub fn load(path: &Path) -> Result<Document, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();

    let format = Format::from_extension(&extension).ok_or_else(|| LoadError::Unsupported {
        path: path.to_path_buf(),
        extension: extension.clone(),
    })?;

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let reader = BufReader::new(file);

    let doc = match format {
        Format::Json => {
            let parsed: serde_json::Value =
                serde_json::from_reader(reader).map_err(|e| LoadError::Json {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            Document::from_json_value(parsed)
        }
        Format::Csv => Document::from_csv_reader(reader).map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?,
    };

    debug!(path = %path.display(), ?format, "document loaded");
    Ok(doc)
}
