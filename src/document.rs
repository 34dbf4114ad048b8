//! Reading binding input from TOML documents.
//!
//! Tables become mappings and keep document order; every other value must
//! be a string, integer, float or boolean.

use std::path::Path;

use tracing::{debug, instrument};

use crate::domain::Data;
use crate::error::{FormtreeError, FormtreeResult};

/// Parses a TOML document into a `Data` mapping.
pub fn parse_data(content: &str) -> FormtreeResult<Data> {
    toml::from_str(content).map_err(|e| FormtreeError::Data {
        message: e.to_string(),
    })
}

/// Reads and parses a TOML data file.
#[instrument(level = "debug")]
pub fn load_data(path: &Path) -> FormtreeResult<Data> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FormtreeError::io(format!("read {}", path.display()), e))?;
    let data = parse_data(&content).map_err(|e| match e {
        FormtreeError::Data { message } => FormtreeError::Data {
            message: format!("{}: {}", path.display(), message),
        },
        other => other,
    })?;
    debug!(path = %path.display(), "loaded data document");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scalar;

    #[test]
    fn given_nested_tables_when_parsing_then_builds_ordered_mapping() {
        let data = parse_data(
            r#"
name = "Apple MacBook"
description = "A decent laptop."

[photo]
caption = "Front photo."
image = "photo1.png"
"#,
        )
        .unwrap();

        let keys: Vec<&String> = data.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["name", "description", "photo"]);
        assert_eq!(
            data.get("photo").and_then(|p| p.get("image")),
            Some(&Data::from("photo1.png"))
        );
    }

    #[test]
    fn given_typed_values_when_parsing_then_keeps_scalar_kinds() {
        let data = parse_data("count = 3\nprice = 9.5\nactive = true\n").unwrap();
        assert_eq!(data.get("count").and_then(Data::as_scalar), Some(&Scalar::Integer(3)));
        assert_eq!(data.get("price").and_then(Data::as_scalar), Some(&Scalar::Float(9.5)));
        assert_eq!(data.get("active").and_then(Data::as_scalar), Some(&Scalar::Bool(true)));
    }

    #[test]
    fn given_array_value_when_parsing_then_data_error() {
        let err = parse_data("tags = [\"a\", \"b\"]\n").unwrap_err();
        assert!(matches!(err, FormtreeError::Data { .. }));
    }

    #[test]
    fn given_missing_file_when_loading_then_io_error() {
        let err = load_data(Path::new("/nonexistent/data.toml")).unwrap_err();
        assert!(matches!(err, FormtreeError::Io { .. }));
    }
}
