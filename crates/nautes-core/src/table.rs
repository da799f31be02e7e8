//! Table rendering
//!
//! Rows are computed from `serde_json::Value` instances, walking each column's
//! field path alongside the schema that produced it. Missing values, nulls
//! along the path and mapping intermediates all render as empty cells.

use crate::projector::{ColumnProjection, Projection};
use crate::schema::{Field, FieldKind, Scalar};
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::{self, Write};

/// Maximum number of list values shown in one cell.
pub const MAX_LIST_VALUES: usize = 5;

const MIN_WIDTH: usize = 6;
const PADDING: usize = 3;

/// A rendered grid of cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Renders instances using the projection derived from `fields`.
    ///
    /// Every instance produces one primary row. When at least one merge
    /// targets a visible column, a row holding the merged values and a blank
    /// spacer row follow it.
    pub fn render(projection: &Projection, fields: &[Field], items: &[Value]) -> Self {
        let headers = projection.headers();
        let columns: Vec<&ColumnProjection> = projection.primary_columns().collect();
        let mut rows = Vec::with_capacity(items.len());

        for item in items {
            let mut primary = Vec::with_capacity(columns.len());
            let mut merged = Vec::with_capacity(columns.len());
            let mut has_merges = false;

            for column in &columns {
                primary.push(cell(item, fields, column));

                let sources: Vec<String> = projection
                    .merges_into(column)
                    .filter_map(|m| projection.find_column(&m.from_field_path))
                    .map(|source| cell(item, fields, source))
                    .collect();
                has_merges |= !sources.is_empty();
                merged.push(sources.join(","));
            }

            rows.push(primary);
            if has_merges {
                rows.push(merged);
                rows.push(vec![String::new(); columns.len()]);
            }
        }

        Self { headers, rows }
    }

    /// Writes the uppercased header and every row, aligned into columns.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let width = self.headers.len();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(
            self.headers
                .iter()
                .map(|h| sanitize(&h.to_uppercase()))
                .collect::<Vec<_>>(),
        );
        for row in &self.rows {
            lines.push(row.iter().take(width).map(|c| sanitize(c)).collect());
        }

        let widths = column_widths(&lines);
        for line in &lines {
            let mut text = String::new();
            for (i, cell) in line.iter().enumerate() {
                if i + 1 == line.len() {
                    text.push_str(cell);
                } else {
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    text.push_str(cell);
                    text.extend(std::iter::repeat_n(' ', pad));
                }
            }
            writeln!(out, "{text}")?;
        }
        Ok(())
    }
}

fn column_widths(lines: &[Vec<String>]) -> Vec<usize> {
    let count = lines.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![MIN_WIDTH; count];
    for line in lines {
        // the last cell of a line is never aligned
        for (i, cell) in line.iter().enumerate().take(line.len().saturating_sub(1)) {
            widths[i] = widths[i].max(cell.chars().count() + PADDING);
        }
    }
    widths
}

/// Neutralizes terminal control characters in server-supplied text.
///
/// The cell is cut at the first line break or form feed and marked with
/// `...`; ESC and CR become the visible sequences `^[` and `\r`.
pub fn sanitize(cell: &str) -> String {
    let (printable, truncated) = match cell.find(|c| matches!(c, '\x0c' | '\n' | '\r')) {
        Some(at) => (&cell[..at], true),
        None => (cell, false),
    };
    let mut escaped = printable.replace('\x1b', "^[").replace('\r', "\\r");
    if truncated {
        escaped.push_str("...");
    }
    escaped
}

/// Extracts the display text of one column from an instance.
pub fn cell(item: &Value, fields: &[Field], column: &ColumnProjection) -> String {
    extract(
        item,
        fields,
        column.field_path.segments(),
        column.subfield.as_deref(),
    )
}

fn extract(value: &Value, fields: &[Field], path: &[&str], subfield: Option<&str>) -> String {
    let Some((head, rest)) = path.split_first() else {
        return String::new();
    };
    let Some(field) = fields.iter().find(|f| f.name == *head) else {
        return String::new();
    };
    let child = match value.as_object().and_then(|map| map.get(*head)) {
        Some(child) if !child.is_null() => child,
        _ => return String::new(),
    };

    let kind = field.kind.unwrap_optional();
    if rest.is_empty() {
        return render_leaf(child, kind, subfield);
    }

    match kind {
        FieldKind::Struct(schema) => extract(child, &schema(), rest, subfield),
        FieldKind::List(elem) => match elem.unwrap_optional() {
            FieldKind::Struct(schema) => aggregate(child, &schema(), rest, subfield),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

/// Collects one value per list element, deduplicated and sorted.
fn aggregate(list: &Value, fields: &[Field], path: &[&str], subfield: Option<&str>) -> String {
    let Some(elements) = list.as_array() else {
        return String::new();
    };
    let values: BTreeSet<String> = elements
        .iter()
        .map(|element| extract(element, fields, path, subfield))
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        return String::new();
    }

    let values: Vec<String> = values.into_iter().collect();
    format!("[{}] {}", values.len(), join_capped(&values))
}

fn render_leaf(value: &Value, kind: &FieldKind, subfield: Option<&str>) -> String {
    match kind {
        FieldKind::Scalar(scalar) => render_scalar(value, *scalar),
        FieldKind::List(elem) => match (elem.unwrap_optional(), value.as_array()) {
            (FieldKind::Scalar(scalar), Some(elements)) => {
                let values: Vec<String> = elements
                    .iter()
                    .map(|element| render_scalar(element, *scalar))
                    .collect();
                join_capped(&values)
            }
            _ => String::new(),
        },
        FieldKind::Struct(schema) => match subfield {
            Some(subfield) => render_members(value, &schema(), subfield),
            None => String::new(),
        },
        FieldKind::Map | FieldKind::Optional(_) => String::new(),
    }
}

/// Shows `subfield` of every present member of a structure, e.g. the
/// component names of a components list.
fn render_members(value: &Value, fields: &[Field], subfield: &str) -> String {
    let mut values: Vec<String> = fields
        .iter()
        .filter_map(|f| value.get(f.name))
        .filter_map(|member| member.get(subfield))
        .map(plain_text)
        .filter(|v| !v.is_empty())
        .collect();
    values.sort();
    format!("[{}] {}", values.len(), join_capped(&values))
}

fn render_scalar(value: &Value, scalar: Scalar) -> String {
    match (scalar, value) {
        (Scalar::Str, Value::String(s)) => s.clone(),
        (Scalar::Bool, Value::Bool(b)) => b.to_string(),
        (Scalar::Int, Value::Number(n)) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string()))
            .unwrap_or_default(),
        (Scalar::Float, Value::Number(n)) => {
            n.as_f64().map(|f| format!("{f:.6}")).unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn join_capped(values: &[String]) -> String {
    if values.len() > MAX_LIST_VALUES {
        format!("{}...", values[..MAX_LIST_VALUES].join(","))
    } else {
        values.join(",")
    }
}
