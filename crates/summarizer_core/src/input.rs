use std::path::Path;

/// Extensions accepted by the server-side file endpoint.
pub const UPLOAD_EXTENSIONS: &[&str] = &["csv", "json", "jsonl"];

/// One review taken from an uploaded CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvRow {
    pub product: String,
    pub id: String,
    pub content: String,
}

impl CsvRow {
    pub fn new(
        product: impl Into<String>,
        id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            id: id.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("nothing to summarize")]
    Empty,
}

/// Join CSV rows into one text block, one row per paragraph.
///
/// Rows with an id are prefixed with an `ID: <id>` line.
pub fn join_rows(rows: &[CsvRow]) -> String {
    rows.iter()
        .map(|row| {
            let id = row.id.trim();
            if id.is_empty() {
                row.content.clone()
            } else {
                format!("ID: {id}\n{}", row.content)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Produce the payload sent to the API.
///
/// Parsed CSV rows take precedence over the raw input field.
pub fn normalize_input(raw: &str, rows: Option<&[CsvRow]>) -> Result<String, InputError> {
    let text = match rows {
        Some(rows) if !rows.is_empty() => join_rows(rows).trim().to_string(),
        _ => raw.trim().to_string(),
    };
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(text)
}

/// Count whitespace-delimited non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn has_csv_extension(path: &Path) -> bool {
    has_extension(path, &["csv"])
}

pub(crate) fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_csv_extension(Path::new("reviews.CSV")));
        assert!(!has_csv_extension(Path::new("reviews.csv.txt")));
        assert!(!has_csv_extension(Path::new("reviews")));
    }

    #[test]
    fn rows_without_id_are_not_prefixed() {
        let rows = vec![CsvRow::new("", "", "A"), CsvRow::new("", " 7 ", "B")];
        assert_eq!(join_rows(&rows), "A\n\nID: 7\nB");
    }
}
