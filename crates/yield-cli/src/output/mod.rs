use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print `value` for json/raw, or `rows` as a table. Used where the table view
/// is a projection of a richer document.
pub fn output_with_rows<T: Serialize, R: Serialize>(
    value: &T,
    rows: &R,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => output(rows, format),
        OutputFormat::Json | OutputFormat::Raw => output(value, format),
    }
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_value_table(value: &Value) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_array_table(items)),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_table(&["key", "value"], &rows, options()))
        }
        scalar => Ok(table::render_table(
            &["value"],
            &[vec![value_to_cell(scalar)]],
            options(),
        )),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    // Column order follows the first appearance of each field, which for
    // derived `Serialize` types is declaration order.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v
            .as_f64()
            .filter(|_| v.is_f64())
            .map_or_else(|| v.to_string(), format_number),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

/// Currency-style amounts print with two decimals; finer values keep up to
/// four.
fn format_number(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    if (value - cents).abs() < 1e-9 {
        format!("{value:.2}")
    } else {
        format!("{value:.4}")
    }
}
