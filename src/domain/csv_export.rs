use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// A row that can be looked up by column name.
///
/// Columns the row does not know about render as empty cells.
pub trait CsvRecord {
    fn field(&self, name: &str) -> Option<&str>;
}

impl CsvRecord for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl CsvRecord for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// A rendered CSV ready to be served as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    /// Suggested attachment name, always ending in `.csv`.
    pub filename: String,
    pub body: String,
    pub row_count: usize,
}

impl CsvDownload {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Render `rows` as CSV with one header line and one line per row.
///
/// Lines are joined with `\n` and there is no trailing newline.
pub fn render_csv<'a, R, I>(rows: I, schema: &[&str]) -> String
where
    R: CsvRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut out = schema.join(",");
    for row in rows {
        out.push('\n');
        let line = schema
            .iter()
            .map(|name| escape_field(row.field(name).unwrap_or("")))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
    }
    out
}

/// Quote a cell if it contains a double quote, comma or newline.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains(['"', ',', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
