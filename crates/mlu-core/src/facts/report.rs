//! Ordered label/value report and its text rendering.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// Column width the `label:` prefix is padded to.
pub const DEFAULT_LABEL_WIDTH: usize = 15;

/// Ordered mapping from label to resolved value.
///
/// Insertion order is report order. Re-inserting a label replaces the
/// value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactReport {
    entries: Vec<(String, String)>,
}

impl FactReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// One `label:` line per entry, padded to `width`, joined by `\n`.
    ///
    /// Line breaks inside a value are written as `\n` / `\r` so each entry
    /// stays on one line. Serialized values are left untouched.
    pub fn render(&self, width: usize) -> String {
        self.entries
            .iter()
            .map(|(label, value)| {
                format!("{:<width$} {}", format!("{label}:"), single_line(value))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn single_line(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r']) {
        Cow::Owned(value.replace('\n', "\\n").replace('\r', "\\r"))
    } else {
        Cow::Borrowed(value)
    }
}

impl fmt::Display for FactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_LABEL_WIDTH))
    }
}

impl Serialize for FactReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<L, V> FromIterator<(L, V)> for FactReport
where
    L: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (L, V)>>(iter: T) -> Self {
        let mut report = Self::new();
        for (label, value) in iter {
            report.insert(label, value);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut report = FactReport::new();
        report.insert("python", "3.10.12");
        report.insert("hostname", "box");
        report.insert("python", "3.11.0");

        assert_eq!(report.len(), 2);
        assert_eq!(report.labels().collect::<Vec<_>>(), vec!["python", "hostname"]);
        assert_eq!(report.get("python"), Some("3.11.0"));
    }

    #[test]
    fn test_render_escapes_line_breaks() {
        let report: FactReport = [("virtualenv", "(venv)\n$ "), ("hostname", "box")]
            .into_iter()
            .collect();

        let text = report.render(DEFAULT_LABEL_WIDTH);
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text, "virtualenv:     (venv)\\n$ \nhostname:       box");
        assert_eq!(report.get("virtualenv"), Some("(venv)\n$ "));
    }

    #[test]
    fn test_render_pads_labels() {
        let report: FactReport = [("python", "3.10.12"), ("nvidia driver", "535.104.05")]
            .into_iter()
            .collect();

        assert_eq!(
            report.render(DEFAULT_LABEL_WIDTH),
            "python:         3.10.12\nnvidia driver:  535.104.05"
        );
    }

    #[test]
    fn test_render_one_line_per_entry_in_order() {
        let report: FactReport = [("a", "1"), ("torch", ""), ("pytorch-lightning", "2.0.0")]
            .into_iter()
            .collect();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), report.len());
        for ((label, value), line) in report.iter().zip(&lines) {
            assert!(!line.is_empty());
            assert!(line.starts_with(&format!("{label}:")));
            assert!(line.ends_with(value));
        }
    }

    #[test]
    fn test_long_label_is_not_truncated() {
        let report: FactReport = [("pytorch-lightning", "2.0.0")].into_iter().collect();
        assert_eq!(report.to_string(), "pytorch-lightning: 2.0.0");
    }

    #[test]
    fn test_empty_report_renders_empty_string() {
        assert_eq!(FactReport::new().to_string(), "");
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let report: FactReport = [("python", "3.10.12"), ("hostname", "box")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"python":"3.10.12","hostname":"box"}"#);
    }
}
