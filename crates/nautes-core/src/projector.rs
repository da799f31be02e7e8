//! Column projection
//!
//! Walks a payload schema depth-first in declaration order and flattens the
//! annotated fields into display columns plus merge directives.

use crate::error::{NautesError, Result};
use crate::schema::{Field, FieldKind};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Sequence of wire names leading from the root instance to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(pub Vec<&'static str>);

impl FieldPath {
    fn child(&self, name: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name);
        Self(segments)
    }

    pub fn segments(&self) -> &[&'static str] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// One display column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProjection {
    pub display_name: String,
    pub field_path: FieldPath,
    /// For struct-valued columns, the member of each sub-structure shown.
    pub subfield: Option<String>,
}

/// Folds the `from` column into the rendered cell of the `to` column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeDirective {
    pub from_field_path: FieldPath,
    pub from_display_name: String,
    /// `None` while the target display name matches no column.
    pub to_field_path: Option<FieldPath>,
    pub to_display_name: String,
}

impl MergeDirective {
    pub fn is_resolved(&self) -> bool {
        self.to_field_path.is_some()
    }
}

/// Columns and merges derived from one payload type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub columns: Vec<ColumnProjection>,
    pub merges: Vec<MergeDirective>,
}

/// Derives the display projection of a payload schema.
pub fn project(fields: &[Field]) -> Projection {
    let mut projection = Projection::default();
    walk(fields, &FieldPath::default(), &mut projection);

    let Projection { columns, merges } = &mut projection;
    for merge in merges.iter_mut() {
        // the last column carrying the target name wins
        merge.to_field_path = columns
            .iter()
            .rev()
            .find(|c| c.display_name == merge.to_display_name)
            .map(|c| c.field_path.clone());
        if merge.to_field_path.is_none() {
            warn!(
                from = %merge.from_display_name,
                to = %merge.to_display_name,
                "merge target column not found, source column hidden"
            );
        }
    }

    projection
}

fn walk(fields: &[Field], prefix: &FieldPath, out: &mut Projection) {
    for field in fields {
        let path = prefix.child(field.name);
        let kind = field.kind.unwrap_optional();

        if let (Some(column), FieldKind::Struct(_)) = (field.column, kind) {
            let (display, subfield) = match column.split_once(':') {
                Some((display, subfield)) => (display, Some(subfield.to_string())),
                None => (column, None),
            };
            record(out, display, field.merge_to, path, subfield);
            continue;
        }

        match kind {
            FieldKind::Struct(schema) => walk(&schema(), &path, out),
            FieldKind::List(elem) => match elem.unwrap_optional() {
                FieldKind::Struct(schema) => walk(&schema(), &path, out),
                _ => leaf(field, path, out),
            },
            FieldKind::Map => {}
            FieldKind::Scalar(_) => leaf(field, path, out),
            FieldKind::Optional(_) => unreachable!("optional layers are stripped above"),
        }
    }
}

fn leaf(field: &Field, path: FieldPath, out: &mut Projection) {
    if let Some(display) = field.column {
        record(out, display, field.merge_to, path, None);
    }
}

fn record(
    out: &mut Projection,
    display: &str,
    merge_to: Option<&str>,
    path: FieldPath,
    subfield: Option<String>,
) {
    if let Some(target) = merge_to {
        out.merges.push(MergeDirective {
            from_field_path: path.clone(),
            from_display_name: display.to_string(),
            to_field_path: None,
            to_display_name: target.to_string(),
        });
    }
    out.columns.push(ColumnProjection {
        display_name: display.to_string(),
        field_path: path,
        subfield,
    });
}

impl Projection {
    /// Whether the column is folded into another one and hidden.
    ///
    /// A source stays hidden even when its target column does not exist.
    pub fn is_merge_source(&self, column: &ColumnProjection) -> bool {
        self.merges
            .iter()
            .any(|m| m.from_field_path == column.field_path)
    }

    /// Merges targeting the column, in discovery order.
    pub fn merges_into<'a>(
        &'a self,
        column: &'a ColumnProjection,
    ) -> impl Iterator<Item = &'a MergeDirective> + 'a {
        self.merges
            .iter()
            .filter(move |m| m.to_field_path.as_ref() == Some(&column.field_path))
    }

    /// Columns that get their own position in a row.
    pub fn primary_columns(&self) -> impl Iterator<Item = &ColumnProjection> {
        self.columns.iter().filter(|c| !self.is_merge_source(c))
    }

    pub fn find_column(&self, path: &FieldPath) -> Option<&ColumnProjection> {
        self.columns.iter().find(|c| &c.field_path == path)
    }

    /// Header names, one per primary column.
    pub fn headers(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut headers = Vec::new();

        for column in &self.columns {
            let mut name = column.display_name.clone();
            if seen.contains(&name) {
                name = format!("{name}-2");
            }
            seen.insert(name.clone());

            if self.is_merge_source(column) {
                continue;
            }

            let sources: Vec<&str> = self
                .merges_into(column)
                .map(|m| m.from_display_name.as_str())
                .collect();
            if !sources.is_empty() {
                name = format!("{} / {}", name, sources.join(" / "));
            }
            headers.push(name);
        }

        headers
    }

    /// Fails on the first merge whose target column does not exist.
    pub fn validate(&self) -> Result<()> {
        match self.merges.iter().find(|m| !m.is_resolved()) {
            Some(merge) => Err(NautesError::UnresolvedMerge {
                from: merge.from_display_name.clone(),
                to: merge.to_display_name.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Tabular;

    struct Flat;
    impl Tabular for Flat {
        fn fields() -> Vec<Field> {
            vec![
                Field::string("a").column("X").merge_to("Y"),
                Field::string("b").column("Y"),
                Field::string("hidden"),
                Field::map("labels").column("Labels"),
            ]
        }
    }

    struct Repo;
    impl Tabular for Repo {
        fn fields() -> Vec<Field> {
            vec![
                Field::string("path").column("path"),
                Field::string("visibility").column("visibility").merge_to("path"),
            ]
        }
    }

    struct Git;
    impl Tabular for Git {
        fn fields() -> Vec<Field> {
            vec![Field::nested::<Repo>("gitlab").optional()]
        }
    }

    struct Component;
    impl Tabular for Component {
        fn fields() -> Vec<Field> {
            vec![Field::string("name"), Field::string("namespace")]
        }
    }

    struct Components;
    impl Tabular for Components {
        fn fields() -> Vec<Field> {
            vec![
                Field::nested::<Component>("gateway").optional(),
                Field::nested::<Component>("pipeline").optional(),
            ]
        }
    }

    struct Trigger;
    impl Tabular for Trigger {
        fn fields() -> Vec<Field> {
            vec![Field::string("event_source").column("EventSource")]
        }
    }

    struct Root;
    impl Tabular for Root {
        fn fields() -> Vec<Field> {
            vec![
                Field::string("name").column("name"),
                Field::nested::<Git>("git").optional(),
                Field::nested::<Components>("components_list").column("ComponentsList:name"),
                Field::nested::<Trigger>("triggers").list().optional(),
                Field::string("projects").list().column("projects"),
                Field::string("name_again").column("name"),
            ]
        }
    }

    fn path(segments: &[&'static str]) -> FieldPath {
        FieldPath(segments.to_vec())
    }

    #[test]
    fn test_merge_into_existing_column() {
        let projection = project(&Flat::fields());

        assert_eq!(projection.columns.len(), 2);
        assert_eq!(projection.merges.len(), 1);
        assert_eq!(projection.merges[0].to_field_path, Some(path(&["b"])));
        assert_eq!(projection.headers(), vec!["Y / X".to_string()]);
    }

    #[test]
    fn test_nested_paths_are_prefixed() {
        let projection = project(&Root::fields());
        let paths: Vec<String> = projection
            .columns
            .iter()
            .map(|c| c.field_path.to_string())
            .collect();

        assert_eq!(
            paths,
            vec![
                "name",
                "git.gitlab.path",
                "git.gitlab.visibility",
                "components_list",
                "triggers.event_source",
                "projects",
                "name_again",
            ]
        );
        let merge = &projection.merges[0];
        assert_eq!(merge.from_field_path, path(&["git", "gitlab", "visibility"]));
        assert_eq!(merge.to_field_path, Some(path(&["git", "gitlab", "path"])));
    }

    #[test]
    fn test_struct_column_subfield() {
        let projection = project(&Root::fields());
        let column = projection
            .find_column(&path(&["components_list"]))
            .expect("components column");

        assert_eq!(column.display_name, "ComponentsList");
        assert_eq!(column.subfield.as_deref(), Some("name"));
    }

    #[test]
    fn test_headers_dedupe_and_merge() {
        let projection = project(&Root::fields());
        assert_eq!(
            projection.headers(),
            vec![
                "name",
                "path / visibility",
                "ComponentsList",
                "EventSource",
                "projects",
                "name-2",
            ]
        );
    }

    #[test]
    fn test_projection_is_stable() {
        let first = project(&Root::fields());
        let second = project(&Root::fields());
        assert_eq!(first, second);
        assert_eq!(first.headers(), second.headers());
    }

    #[test]
    fn test_unresolved_merge_hides_source() {
        struct Typo;
        impl Tabular for Typo {
            fn fields() -> Vec<Field> {
                vec![
                    Field::string("a").column("A").merge_to("Missing"),
                    Field::string("b").column("B"),
                ]
            }
        }

        let projection = project(&Typo::fields());
        assert_eq!(projection.headers(), vec!["B"]);
        assert!(matches!(
            projection.validate(),
            Err(NautesError::UnresolvedMerge { ref to, .. }) if to == "Missing"
        ));
    }

    #[test]
    fn test_merge_targets_last_matching_column() {
        struct Shared;
        impl Tabular for Shared {
            fn fields() -> Vec<Field> {
                vec![
                    Field::string("first").column("Y"),
                    Field::string("a").column("X").merge_to("Y"),
                    Field::string("second").column("Y"),
                ]
            }
        }

        let projection = project(&Shared::fields());
        assert_eq!(projection.merges[0].to_field_path, Some(path(&["second"])));
        assert_eq!(projection.headers(), vec!["Y", "Y-2 / X"]);
    }
}
