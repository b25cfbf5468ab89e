use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use summarizer_core::{has_csv_extension, CsvRow};
use summarizer_logging::{app_debug, app_info};

use crate::decode::{decode_text, DecodeError};

/// Accepted names for the review text column, in priority order.
pub const TEXT_COLUMN_ALIASES: &[&str] = &[
    "original_text",
    "text",
    "content",
    "review",
    "feedback",
    "comment",
];
const ID_COLUMN_ALIASES: &[&str] = &["id"];
const PRODUCT_COLUMN_ALIASES: &[&str] = &["product"];

#[derive(Debug, Clone)]
pub struct CsvSettings {
    pub max_bytes: u64,
    pub max_rows: usize,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_rows: 2000,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("файл {0} не является CSV")]
    NotCsv(String),
    #[error("файл слишком большой (макс. {max_bytes} байт, получено {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("не удалось прочитать файл: {0}")]
    Io(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("не найдена колонка с текстом. Поддерживаемые имена: {0}")]
    MissingTextColumn(String),
    #[error("некорректный CSV: {0}")]
    Malformed(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::Malformed(err.to_string())
    }
}

/// Read and parse a CSV file of reviews from disk.
pub fn load_csv(path: &Path, settings: &CsvSettings) -> Result<Vec<CsvRow>, CsvError> {
    if !has_csv_extension(path) {
        return Err(CsvError::NotCsv(path.display().to_string()));
    }
    let size = fs::metadata(path)
        .map_err(|err| CsvError::Io(err.to_string()))?
        .len();
    if size > settings.max_bytes {
        return Err(CsvError::TooLarge {
            max_bytes: settings.max_bytes,
            actual: size,
        });
    }
    let bytes = fs::read(path).map_err(|err| CsvError::Io(err.to_string()))?;
    let rows = parse_csv(&bytes, settings)?;
    app_info!("Loaded {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Parse CSV bytes with a header row into review rows.
///
/// Rows without review text are skipped. Parsing stops at `max_rows` rows.
pub fn parse_csv(bytes: &[u8], settings: &CsvSettings) -> Result<Vec<CsvRow>, CsvError> {
    let decoded = decode_text(bytes)?;
    app_debug!("CSV decoded as {}", decoded.encoding_label);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(decoded.text.as_bytes());

    let headers = reader.headers()?.clone();
    let content_idx = find_column(&headers, TEXT_COLUMN_ALIASES)
        .ok_or_else(|| CsvError::MissingTextColumn(TEXT_COLUMN_ALIASES.join(", ")))?;
    let id_idx = find_column(&headers, ID_COLUMN_ALIASES);
    let product_idx = find_column(&headers, PRODUCT_COLUMN_ALIASES);

    let mut rows = Vec::new();
    for record in reader.records() {
        if rows.len() >= settings.max_rows {
            break;
        }
        let record = record?;
        let content = field(&record, Some(content_idx));
        if content.is_empty() {
            continue;
        }
        rows.push(CsvRow {
            product: field(&record, product_idx),
            id: field(&record, id_idx),
            content,
        });
    }
    Ok(rows)
}

/// Alias order wins over column order.
fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(alias))
    })
}

fn field(record: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
