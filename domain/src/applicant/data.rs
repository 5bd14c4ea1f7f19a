//! Path-addressed applicant answer document.
//!
//! [`ApplicantData`] wraps a JSON object and supports typed reads and
//! structure-creating writes by [`Path`]. Missing nodes read as `None`;
//! writes materialize intermediate objects on the way down.

use crate::applicant::path::Path;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The answers an applicant has given, as a JSON document (Entity component)
///
/// A fresh document is `{"applicant":{}}` — every answer lives somewhere
/// under the `applicant` subtree by convention, though the type itself does
/// not enforce that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantData {
    data: Value,
}

impl ApplicantData {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut root = Map::new();
        root.insert("applicant".to_string(), Value::Object(Map::new()));
        Self {
            data: Value::Object(root),
        }
    }

    /// Parse a document from its JSON text. The root must be an object.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let data: Value = serde_json::from_str(json)?;
        if !data.is_object() {
            return Err(DomainError::NotAnObject(Path::root()));
        }
        Ok(Self { data })
    }

    /// Serialize the document to compact JSON text.
    pub fn as_json_string(&self) -> String {
        self.data.to_string()
    }

    /// The underlying JSON document.
    pub fn as_value(&self) -> &Value {
        &self.data
    }

    /// Read the raw value at `path`, if present.
    pub fn read(&self, path: &Path) -> Option<&Value> {
        let mut node = &self.data;
        for segment in path.segments() {
            node = node.as_object()?.get(segment)?;
        }
        Some(node)
    }

    /// Read a string value at `path`.
    pub fn read_string(&self, path: &Path) -> Option<String> {
        self.read(path)?.as_str().map(str::to_string)
    }

    /// Read an integer value at `path`.
    pub fn read_integer(&self, path: &Path) -> Option<i64> {
        self.read(path)?.as_i64()
    }

    /// True when a value (of any type) exists at `path`.
    pub fn has_path(&self, path: &Path) -> bool {
        self.read(path).is_some()
    }

    /// Write `value` at `path`, creating intermediate objects as needed.
    ///
    /// Fails with [`DomainError::NotAnObject`] when an existing intermediate
    /// node is a scalar or array, and [`DomainError::EmptyRootPath`] for the
    /// root path — the document root cannot be replaced wholesale.
    pub fn put(&mut self, path: &Path, value: Value) -> Result<(), DomainError> {
        if path.is_root() {
            return Err(DomainError::EmptyRootPath);
        }

        let segments: Vec<&str> = path.segments().collect();
        let (key, parents) = segments
            .split_last()
            .ok_or(DomainError::EmptyRootPath)?;

        let mut node = &mut self.data;
        let mut walked = Path::root();
        for segment in parents {
            walked = walked.join(segment);
            let map = node
                .as_object_mut()
                .ok_or_else(|| DomainError::NotAnObject(walked.parent().unwrap_or_else(Path::root)))?;
            node = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        let map = node
            .as_object_mut()
            .ok_or_else(|| DomainError::NotAnObject(walked))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    /// Write a string value at `path`.
    pub fn put_string(&mut self, path: &Path, value: &str) -> Result<(), DomainError> {
        self.put(path, Value::String(value.to_string()))
    }

    /// Write an integer value at `path`.
    pub fn put_integer(&mut self, path: &Path, value: i64) -> Result<(), DomainError> {
        self.put(path, Value::Number(value.into()))
    }
}

impl Default for ApplicantData {
    fn default() -> Self {
        Self::new()
    }
}
