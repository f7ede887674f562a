//! Splitting a service response into per-component definitions

use serde_json::{Map, Value};

use crate::artifact::ArtifactKind;
use crate::{Error, Result};

/// Component key to the definition that belongs in its file.
pub type DefinitionTree = Map<String, Value>;

/// Element name used for style keys that carry no element part.
pub const ROOT_ELEMENT: &str = "root";

/// Turn the raw response for `kind` into a [`DefinitionTree`].
///
/// Style responses are flat, keyed `<component>-<element>`, and are regrouped
/// per component. Theme and config responses are already keyed per file.
pub fn split(kind: ArtifactKind, response: Value) -> Result<DefinitionTree> {
    let Value::Object(map) = response else {
        return Err(Error::InvalidPayload {
            kind,
            message: format!("expected an object, got {}", type_name(&response)),
        });
    };

    Ok(match kind {
        ArtifactKind::Style => split_style(map),
        ArtifactKind::Theme | ArtifactKind::Config => map,
    })
}

fn split_style(flat: Map<String, Value>) -> DefinitionTree {
    let mut tree = DefinitionTree::new();
    for (key, definition) in flat {
        let (component, element) = key.split_once('-').unwrap_or((key.as_str(), ROOT_ELEMENT));
        let slot = tree
            .entry(component.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(elements) = slot {
            elements.insert(element.to_string(), definition);
        }
    }
    tree
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
