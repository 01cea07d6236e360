//! Serialize the normalized mapping and write it out.

use crate::error::NormalizeError;
use crate::model::Normalized;
use std::fs;
use std::path::Path;

/// Default output path when `--output_file` is not given.
pub const DEFAULT_OUTPUT_FILE: &str = "normalized-pe_classification_export.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    /// `.json` selects JSON, everything else is YAML.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

pub fn render_output(data: &Normalized, format: OutputFormat) -> Result<String, NormalizeError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(data).map_err(|e| NormalizeError::Serialize(e.to_string()))
        }
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(data)
                .map_err(|e| NormalizeError::Serialize(e.to_string()))?;
            text.push('\n');
            Ok(text)
        }
    }
}

/// Render fully, then write in one pass; nothing is created if rendering fails.
pub fn write_output(path: &Path, data: &Normalized) -> Result<(), NormalizeError> {
    let text = render_output(data, OutputFormat::for_path(path))?;
    fs::write(path, text).map_err(|e| NormalizeError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::load::records_from_value;
    use crate::model::{NormalizeOptions, normalize};
    use pretty_assertions::assert_eq;

    fn sample() -> Normalized {
        let doc = serde_yaml::from_str(
            "A: {name: A, type: x}\nB: {name: B, type: x}\nC: {name: C, type: y}\n",
        )
        .unwrap();
        let records = records_from_value(doc).unwrap();
        normalize(&records, NormalizeOptions::default()).unwrap().1
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::for_path(Path::new("out.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::for_path(Path::new("OUT.JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::for_path(Path::new("out.yaml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::for_path(Path::new("out")), OutputFormat::Yaml);
        assert_eq!(
            OutputFormat::for_path(Path::new(DEFAULT_OUTPUT_FILE)),
            OutputFormat::Yaml
        );
    }

    #[test]
    fn yaml_output_keeps_entry_order() {
        let text = render_output(&sample(), OutputFormat::Yaml).unwrap();
        assert_eq!(
            text,
            "Migration Group 1:\n  type: x\n  nodes:\n  - A\n  - B\nC:\n  type: y\n  nodes:\n  - C\n"
        );
    }

    #[test]
    fn json_output_is_equivalent() {
        let text = render_output(&sample(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "Migration Group 1": {"type": "x", "nodes": ["A", "B"]},
                "C": {"type": "y", "nodes": ["C"]}
            })
        );
    }

    #[test]
    fn empty_output_is_empty_mapping() {
        let text = render_output(&Normalized::new(), OutputFormat::Yaml).unwrap();
        assert_eq!(text, "{}\n");
    }

    #[test]
    fn writes_file_and_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normalized.yaml");
        write_output(&path, &sample()).unwrap();
        let written: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["C"]["nodes"][0], serde_yaml::Value::from("C"));

        let missing_dir = dir.path().join("no-such-dir").join("out.yaml");
        let err = write_output(&missing_dir, &sample()).unwrap_err();
        assert!(matches!(err, NormalizeError::Io { .. }));
        assert!(!missing_dir.exists());
    }
}
