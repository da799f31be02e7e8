//! Output formats for `get`

use crate::error::{NautesError, Result};
use crate::projector::project;
use crate::schema::Field;
use crate::table::Table;
use serde_json::Value;
use std::io::Write;
use std::str::FromStr;

/// How retrieved items are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table (`wide`, or no format given)
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = NautesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "wide" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(NautesError::UnknownOutputFormat(other.to_string())),
        }
    }
}

/// Items retrieved by one `get`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub items: Vec<Value>,
    /// Exactly one name was requested; JSON/YAML print the item unwrapped.
    pub single: bool,
}

impl Listing {
    pub fn write<W: Write>(&self, format: OutputFormat, fields: &[Field], out: &mut W) -> Result<()> {
        match format {
            OutputFormat::Table => {
                Table::render(&project(fields), fields, &self.items).write(out)?;
            }
            OutputFormat::Json => {
                let text = serde_json::to_string_pretty(&self.document())
                    .map_err(|e| NautesError::decode("json output", e))?;
                writeln!(out, "{text}")?;
            }
            OutputFormat::Yaml => {
                let text = serde_yaml::to_string(&self.document())
                    .map_err(|e| NautesError::decode("yaml output", e))?;
                write!(out, "{text}")?;
            }
        }
        Ok(())
    }

    fn document(&self) -> Value {
        match self.items.as_slice() {
            [item] if self.single => item.clone(),
            items => Value::Array(items.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Environment;
    use crate::schema::Tabular;
    use serde_json::json;

    fn render(listing: &Listing, format: OutputFormat) -> String {
        let mut out = Vec::new();
        listing
            .write(format, &Environment::fields(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn dev() -> Value {
        json!({ "name": "dev", "product": "shop", "cluster": "c1", "env_type": "test" })
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!("".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("wide".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(NautesError::UnknownOutputFormat(ref f)) if f == "xml"
        ));
    }

    #[test]
    fn test_single_item_is_unwrapped() {
        let listing = Listing {
            items: vec![dev()],
            single: true,
        };
        let text = render(&listing, OutputFormat::Json);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, dev());
        assert!(text.starts_with("{\n  \"name\": \"dev\""));
    }

    #[test]
    fn test_multiple_items_stay_wrapped() {
        let listing = Listing {
            items: vec![dev()],
            single: false,
        };
        let parsed: Value = serde_json::from_str(&render(&listing, OutputFormat::Json)).unwrap();
        assert_eq!(parsed, json!([dev()]));
    }

    #[test]
    fn test_empty_list_is_not_null() {
        let listing = Listing::default();
        assert_eq!(render(&listing, OutputFormat::Json), "[]\n");
        assert_eq!(render(&listing, OutputFormat::Yaml), "[]\n");
    }

    #[test]
    fn test_yaml_output() {
        let listing = Listing {
            items: vec![dev()],
            single: true,
        };
        let text = render(&listing, OutputFormat::Yaml);
        assert!(text.starts_with("name: dev\n"));
        assert!(text.contains("env_type: test\n"));
    }

    #[test]
    fn test_table_output() {
        let listing = Listing {
            items: vec![dev()],
            single: true,
        };
        let text = render(&listing, OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[0].ends_with("ENV_TYPE"));
        assert!(lines[1].starts_with("dev"));
    }
}
