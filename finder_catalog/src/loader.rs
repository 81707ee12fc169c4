//! CSV reading into [`Catalog`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use finder_core::{BuildingRecord, Catalog};
use tracing::{info, warn};

use crate::columns::{ColumnMap, Field};
use crate::error::{CatalogError, Result};

/// Load the building catalog from a CSV file.
///
/// Row order is preserved; it decides ties in the matcher.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let catalog = read_records(file, path)?;
    info!(
        path = %path.display(),
        buildings = catalog.len(),
        "Loaded building catalog"
    );
    Ok(catalog)
}

/// Load the building catalog from any reader, e.g. an in-memory buffer.
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<Catalog> {
    read_records(reader, Path::new("<reader>"))
}

fn read_records<R: Read>(reader: R, origin: &Path) -> Result<Catalog> {
    let csv_error = |source| CatalogError::CsvRead {
        path: origin.to_path_buf(),
        source,
    };

    // Rows with a wrong column count are kept; missing cells read as empty.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(CatalogError::MissingHeader {
            path: origin.to_path_buf(),
        });
    }

    let columns = ColumnMap::from_headers(&headers);
    if columns.recognized() == 0 {
        warn!(
            path = %origin.display(),
            "No known building columns in header; every record will be empty"
        );
    } else if !columns.has_field(Field::Code) {
        warn!(path = %origin.display(), "Catalog has no building code column");
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        records.push(BuildingRecord {
            campus_kr: columns.value(Field::CampusKr, &row),
            campus_en: columns.value(Field::CampusEn, &row),
            name_kr: columns.value(Field::NameKr, &row),
            name_en: columns.value(Field::NameEn, &row),
            map_link: columns.value(Field::MapLink, &row),
            nickname: columns.value(Field::Nickname, &row),
            code: columns.value(Field::Code, &row),
        });
    }

    Ok(Catalog::new(records))
}
