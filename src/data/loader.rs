use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CoffeeShop, Segment, ShopDataset, clean_display_name};

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

pub const COL_NAME: &str = "OrganizationName";
pub const COL_LATITUDE: &str = "OrganizationLatitude";
pub const COL_LONGITUDE: &str = "OrganizationLongitude";
pub const COL_RATING: &str = "RateStars";
pub const COL_REVIEWS: &str = "ReviewsTotalCount";
pub const COL_NUGAS: &str = "Nugas_Score_Normalized";
pub const COL_NONGKRONG: &str = "Nongkrong_Score_Normalized";

/// Columns that must be present; latitude/longitude are optional.
const REQUIRED_COLUMNS: [&str; 5] = [COL_NAME, COL_RATING, COL_REVIEWS, COL_NUGAS, COL_NONGKRONG];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal problems with the source file. Per-record issues never produce
/// these; they degrade to a sentinel name or a dropped row instead.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("malformed source data: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and classify a shop dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names (the usual case)
/// * `.json`    – records-oriented array of objects with the same fields
/// * `.parquet` – flat scalar columns with the same names
pub fn load_file(path: &Path) -> Result<ShopDataset, DataSourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let shops = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataSourceError::UnsupportedFormat(other.to_string())),
    };

    Ok(ShopDataset::from_shops(shops))
}

struct CacheEntry {
    path: PathBuf,
    modified: Option<SystemTime>,
    dataset: Arc<ShopDataset>,
}

static CACHE: Mutex<Option<CacheEntry>> = Mutex::new(None);

/// Memoized [`load_file`], keyed on (path, modification time).
///
/// The source is static reference data, so an unchanged file is never
/// re-read within the process lifetime. Touching or replacing the file
/// invalidates the entry on the next call.
pub fn load_cached(path: &Path) -> Result<Arc<ShopDataset>, DataSourceError> {
    let modified = std::fs::metadata(path)
        .map_err(|source| DataSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .modified()
        .ok();

    let mut cache = CACHE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(entry) = cache.as_ref() {
        if entry.path == path && entry.modified == modified {
            log::debug!("dataset cache hit for {}", path.display());
            return Ok(Arc::clone(&entry.dataset));
        }
    }

    let dataset = Arc::new(load_file(path)?);
    *cache = Some(CacheEntry {
        path: path.to_path_buf(),
        modified,
        dataset: Arc::clone(&dataset),
    });
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row assembly shared by the three loaders
// ---------------------------------------------------------------------------

/// Raw field values of one row before validation.
struct RawRow {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    rating: Option<f64>,
    reviews: Option<f64>,
    nugas: Option<f64>,
    nongkrong: Option<f64>,
}

/// Turn a raw row into a shop, or drop it when a required numeric field is
/// unparsable. Dropping is per-record; the load as a whole continues.
fn build_shop(row: RawRow, row_no: usize) -> Option<CoffeeShop> {
    let (Some(rating), Some(reviews), Some(nugas), Some(nongkrong)) =
        (row.rating, row.reviews, row.nugas, row.nongkrong)
    else {
        log::warn!("row {row_no}: unparsable numeric field, record skipped");
        return None;
    };

    let organization_name = row.name.clone().unwrap_or_default();
    let display_name = clean_display_name(row.name.as_deref());

    Some(CoffeeShop {
        organization_name,
        display_name,
        latitude: row.latitude,
        longitude: row.longitude,
        rate_stars: rating,
        reviews_total_count: reviews.max(0.0) as u32,
        nugas_score: nugas,
        nongkrong_score: nongkrong,
        // Placeholder until ShopDataset::from_shops classifies the corpus.
        segment: Segment::GeneralPurpose,
    })
}

fn parse_f64(s: Option<&str>) -> Option<f64> {
    s.and_then(|v| v.trim().parse::<f64>().ok())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<CoffeeShop>, DataSourceError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| match e.into_kind() {
        csv::ErrorKind::Io(source) => DataSourceError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => DataSourceError::Malformed(format!("{other:?}")),
    })?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataSourceError::Malformed(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let position = |name: &'static str| -> Result<usize, DataSourceError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(DataSourceError::MissingColumn(name))
    };

    let name_idx = position(COL_NAME)?;
    let rating_idx = position(COL_RATING)?;
    let reviews_idx = position(COL_REVIEWS)?;
    let nugas_idx = position(COL_NUGAS)?;
    let nongkrong_idx = position(COL_NONGKRONG)?;
    // Optional: shops without coordinates stay off the map only.
    let lat_idx = headers.iter().position(|h| h == COL_LATITUDE);
    let lon_idx = headers.iter().position(|h| h == COL_LONGITUDE);

    let mut shops = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| DataSourceError::Malformed(format!("CSV row {row_no}: {e}")))?;

        let field = |idx: usize| record.get(idx).filter(|s| !s.trim().is_empty());

        let row = RawRow {
            name: field(name_idx).map(str::to_string),
            latitude: lat_idx.and_then(|i| parse_f64(field(i))),
            longitude: lon_idx.and_then(|i| parse_f64(field(i))),
            rating: parse_f64(field(rating_idx)),
            reviews: parse_f64(field(reviews_idx)),
            nugas: parse_f64(field(nugas_idx)),
            nongkrong: parse_f64(field(nongkrong_idx)),
        };
        shops.extend(build_shop(row, row_no));
    }

    Ok(shops)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "OrganizationName": "Alamat: Jl. Malioboro, Yogyakarta",
///     "OrganizationLatitude": -7.79,
///     "OrganizationLongitude": 110.36,
///     "RateStars": 4.6,
///     "ReviewsTotalCount": 312,
///     "Nugas_Score_Normalized": 0.81,
///     "Nongkrong_Score_Normalized": 0.44
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<CoffeeShop>, DataSourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)
        .map_err(|e| DataSourceError::Malformed(format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| DataSourceError::Malformed("expected top-level JSON array".to_string()))?;

    if let Some(first) = records.first() {
        let obj = first.as_object().ok_or_else(|| {
            DataSourceError::Malformed("expected an array of JSON objects".to_string())
        })?;
        for col in REQUIRED_COLUMNS {
            if !obj.contains_key(col) {
                return Err(DataSourceError::MissingColumn(col));
            }
        }
    }

    let mut shops = Vec::with_capacity(records.len());
    for (row_no, rec) in records.iter().enumerate() {
        let Some(obj) = rec.as_object() else {
            log::warn!("row {row_no}: not a JSON object, record skipped");
            continue;
        };
        let num = |key: &str| obj.get(key).and_then(JsonValue::as_f64);
        let row = RawRow {
            name: obj
                .get(COL_NAME)
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            latitude: num(COL_LATITUDE),
            longitude: num(COL_LONGITUDE),
            rating: num(COL_RATING),
            reviews: num(COL_REVIEWS),
            nugas: num(COL_NUGAS),
            nongkrong: num(COL_NONGKRONG),
        };
        shops.extend(build_shop(row, row_no));
    }

    Ok(shops)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns named as in the CSV schema.
/// Works with files written by both Pandas (`df.to_parquet()`) and Polars
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<CoffeeShop>, DataSourceError> {
    let file = std::fs::File::open(path).map_err(|source| DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataSourceError::Malformed(format!("reading parquet metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| DataSourceError::Malformed(format!("building parquet reader: {e}")))?;

    let mut shops = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| DataSourceError::Malformed(format!("reading record batch: {e}")))?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<ArrayRef, DataSourceError> {
            schema
                .index_of(name)
                .map(|i| Arc::clone(batch.column(i)))
                .map_err(|_| DataSourceError::MissingColumn(name))
        };

        let names = column(COL_NAME)?;
        let ratings = column(COL_RATING)?;
        let reviews = column(COL_REVIEWS)?;
        let nugas = column(COL_NUGAS)?;
        let nongkrong = column(COL_NONGKRONG)?;
        let lats = schema
            .index_of(COL_LATITUDE)
            .map(|i| Arc::clone(batch.column(i)))
            .ok();
        let lons = schema
            .index_of(COL_LONGITUDE)
            .map(|i| Arc::clone(batch.column(i)))
            .ok();

        for row in 0..batch.num_rows() {
            let raw = RawRow {
                name: cell_string(&names, row),
                latitude: lats.as_ref().and_then(|c| cell_f64(c, row)),
                longitude: lons.as_ref().and_then(|c| cell_f64(c, row)),
                rating: cell_f64(&ratings, row),
                reviews: cell_f64(&reviews, row),
                nugas: cell_f64(&nugas, row),
                nongkrong: cell_f64(&nongkrong, row),
            };
            shops.extend(build_shop(raw, row_no));
            row_no += 1;
        }
    }

    Ok(shops)
}

// -- Arrow helpers --

/// Read one cell as f64, accepting the numeric types Pandas/Polars emit.
fn cell_f64(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}

/// Read one cell as text; non-string columns yield None (sentinel name).
fn cell_string(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const HEADER: &str = "OrganizationName,OrganizationLatitude,OrganizationLongitude,RateStars,ReviewsTotalCount,Nugas_Score_Normalized,Nongkrong_Score_Normalized\n";

    #[test]
    fn csv_round_trip_classifies_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "shops.csv",
            &format!(
                "{HEADER}\
                 Kopi A,-7.79,110.36,4.6,312,0.9,0.8\n\
                 Kopi B,-7.80,110.37,4.8,120,0.2,0.8\n\
                 Kopi C,,,4.2,80,0.9,0.1\n\
                 Kopi D,-7.81,110.38,4.9,500,0.1,0.1\n"
            ),
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 4);
        let segments: Vec<Segment> = ds.shops.iter().map(|s| s.segment).collect();
        assert_eq!(
            segments,
            vec![
                Segment::AllRounder,
                Segment::SocialHotspot,
                Segment::ProductivityHub,
                Segment::GeneralPurpose,
            ]
        );
        // Blank coordinates stay off the map but keep the record.
        assert!(!ds.shops[2].has_coordinates());
        assert!(ds.shops[3].has_coordinates());
    }

    #[test]
    fn csv_missing_required_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "bad.csv",
            "OrganizationName,RateStars\nKopi A,4.6\n",
        );
        match load_file(&path) {
            Err(DataSourceError::MissingColumn(col)) => assert_eq!(col, COL_REVIEWS),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_bad_numeric_row_is_dropped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "partial.csv",
            &format!(
                "{HEADER}\
                 Kopi A,-7.79,110.36,not-a-number,312,0.9,0.8\n\
                 Kopi B,-7.80,110.37,4.8,120,0.2,0.8\n"
            ),
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.shops[0].display_name, "Kopi B");
    }

    #[test]
    fn csv_blank_name_gets_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "anon.csv",
            &format!("{HEADER},-7.79,110.36,4.6,312,0.9,0.8\n"),
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.shops[0].display_name, "Unknown Name");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataSourceError::Io { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("shops.xlsx")).unwrap_err();
        assert!(matches!(err, DataSourceError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_loader_reads_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "shops.json",
            r#"[
                {"OrganizationName": "Alamat: Jl. Malioboro, Yogyakarta",
                 "OrganizationLatitude": -7.79, "OrganizationLongitude": 110.36,
                 "RateStars": 4.6, "ReviewsTotalCount": 312,
                 "Nugas_Score_Normalized": 0.9, "Nongkrong_Score_Normalized": 0.8}
            ]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.shops[0].display_name, "Jl. Malioboro");
        assert_eq!(ds.shops[0].reviews_total_count, 312);
    }

    #[test]
    fn cache_returns_same_dataset_for_unchanged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "cached.csv",
            &format!("{HEADER}Kopi A,-7.79,110.36,4.6,312,0.9,0.8\n"),
        );
        let first = load_cached(&path).unwrap();
        let second = load_cached(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
