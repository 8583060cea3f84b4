//! In-memory JSON project document.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while parsing or editing a project document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON is valid but its top level is not an object.
    #[error("top-level value is {found}, expected an object")]
    NotAnObject {
        /// JSON type that was found.
        found: &'static str,
    },

    /// The designated section exists but is not an object.
    #[error("\"{section}\" is {found}, expected an object")]
    SectionNotAnObject {
        /// Section name.
        section: String,
        /// JSON type that was found.
        found: &'static str,
    },

    /// The document could not be serialized.
    #[error("cannot serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A parsed project file whose top level is a JSON object.
///
/// Key order is preserved, so everything outside the edited section is
/// written back in the same order it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDocument {
    root: Map<String, Value>,
    trailing_newline: bool,
}

impl ProjectDocument {
    /// Parses `text` as a project document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] for invalid JSON and
    /// [`DocumentError::NotAnObject`] if the top level is not an object.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(root) => Ok(Self { root, trailing_newline: text.ends_with('\n') }),
            other => Err(DocumentError::NotAnObject { found: type_name(&other) }),
        }
    }

    /// Returns `true` if a top-level field named `key` exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Returns a top-level field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Returns the nested object `name`, if present and an object.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.root.get(name).and_then(Value::as_object)
    }

    /// Returns the nested object `name`, inserting an empty one if absent.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::SectionNotAnObject`] if `name` holds a
    /// non-object value.
    pub fn section_mut_or_insert(
        &mut self,
        name: &str,
    ) -> Result<&mut Map<String, Value>, DocumentError> {
        let entry = self.root.entry(name).or_insert_with(|| Value::Object(Map::new()));
        let found = type_name(entry);
        entry.as_object_mut().ok_or_else(|| DocumentError::SectionNotAnObject {
            section: name.to_string(),
            found,
        })
    }

    /// Sets `section.key = value`, creating the section if needed.
    ///
    /// Returns `true` if the stored value changed.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::SectionNotAnObject`] if the section is not an
    /// object.
    pub fn set_variable(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<bool, DocumentError> {
        let section = self.section_mut_or_insert(section)?;
        let new = Value::String(value.to_string());
        let changed = section.get(key) != Some(&new);
        section.insert(key.to_string(), new);
        Ok(changed)
    }

    /// Serializes with two-space indentation, keeping a trailing newline if
    /// the source had one.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Serialize`] if serialization fails.
    pub fn to_pretty_string(&self) -> Result<String, DocumentError> {
        let mut text = serde_json::to_string_pretty(&self.root).map_err(DocumentError::Serialize)?;
        if self.trailing_newline {
            text.push('\n');
        }
        Ok(text)
    }
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
