use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read and deserialize a JSON document from `path`, or stdin when `path` is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("failed to read {what} from stdin"))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {what} from {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("invalid {what} JSON"))
}

#[cfg(test)]
mod tests {
    use yield_core::entities::LineItem;

    use super::read_json;

    #[test]
    fn reads_line_items_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","name":"A","spend":600,"cpm_revenue":5,"margin_pct":20,"kpi_actual":8}]"#,
        )
        .unwrap();

        let items: Vec<LineItem> = read_json(&path, "line items").unwrap();
        assert_eq!(items.len(), 1);
        assert!((items[0].spend - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_json_names_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "[{").unwrap();

        let err = read_json::<Vec<LineItem>>(&path, "line items").unwrap_err();
        assert!(err.to_string().contains("invalid line items JSON"));
    }
}
