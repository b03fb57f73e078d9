//! CSV export helpers
//!
//! Downloads are sent as `application/octet-stream` attachments with the
//! length known up front.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// A row type that can be written as one CSV line.
pub trait CsvRecord {
    fn headers() -> &'static [&'static str];
    fn fields(&self) -> Vec<String>;
}

/// Quote a field when it holds a separator, a quote or a line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_line(out: &mut String, fields: impl IntoIterator<Item = impl AsRef<str>>) {
    let line: Vec<String> = fields.into_iter().map(|f| escape(f.as_ref())).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

pub fn to_csv<R: CsvRecord>(rows: &[R]) -> String {
    let mut out = String::new();
    write_line(&mut out, R::headers().iter());
    for row in rows {
        write_line(&mut out, row.fields());
    }
    out
}

/// Render rows as a downloadable CSV file.
pub fn csv_attachment<R: CsvRecord>(filename: &str, rows: &[R]) -> Response {
    let body = to_csv(rows);
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
        ],
        body,
    )
        .into_response()
}

pub fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, Option<i32>);

    impl CsvRecord for Row {
        fn headers() -> &'static [&'static str] {
            &["name", "value"]
        }

        fn fields(&self) -> Vec<String> {
            vec![self.0.to_string(), opt(&self.1)]
        }
    }

    #[test]
    fn fields_are_quoted_only_when_needed() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = to_csv(&[Row("Ana", Some(3)), Row("Bia, Jr", None)]);
        assert_eq!(csv, "name,value\r\nAna,3\r\n\"Bia, Jr\",\r\n");
    }

    #[test]
    fn attachment_headers_are_set() {
        let response = csv_attachment("volunteers.csv", &[Row("Ana", None)]);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"volunteers.csv\""
        );
        assert_eq!(headers[header::CONTENT_LENGTH], "18");
    }
}
