use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single show as submitted by the caller.
///
/// Fields are kept as raw JSON so that no type validation happens beyond what
/// the filter and projection need. Absent fields deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogEntry {
    pub drm: Option<Value>,
    pub episode_count: Option<Value>,
    pub image: Option<Value>,
    pub slug: Option<Value>,
    pub title: Option<Value>,
}

impl CatalogEntry {
    /// Reads an entry out of an arbitrary payload element.
    ///
    /// Anything that is not a JSON object has no fields, so it becomes an
    /// empty entry which the filter will never keep.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// `drm` must be the boolean `true`, not merely truthy.
    #[must_use]
    pub fn has_drm(&self) -> bool {
        matches!(self.drm, Some(Value::Bool(true)))
    }

    /// Only JSON numbers count; numeric strings and missing values do not.
    #[must_use]
    pub fn has_episodes(&self) -> bool {
        self.episode_count
            .as_ref()
            .and_then(Value::as_f64)
            .is_some_and(|count| count > 0.0)
    }

    /// An absent or null `image` cannot be dereferenced for projection.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// The nested `image.showImage` value, `null` included. `None` when the
    /// key is absent or `image` is not an object.
    #[must_use]
    pub fn show_image(&self) -> Option<&Value> {
        self.image
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|image| image.get("showImage"))
    }
}

/// The reduced shape returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
}
