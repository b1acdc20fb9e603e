//! Sparse-patch field values.
//!
//! A [`Patch<T>`] distinguishes a field that was omitted from an update
//! request ([`Patch::Keep`]) from one explicitly sent as `null`
//! ([`Patch::Clear`]) and from one carrying a new value ([`Patch::Set`]).
//!
//! Request DTOs mark patch fields with `#[serde(default)]` so that omission
//! deserializes to `Keep`:
//!
//! ```
//! use promon_core::patch::Patch;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct UpdateThing {
//!     #[serde(default)]
//!     description: Patch<String>,
//! }
//!
//! let omitted: UpdateThing = serde_json::from_str("{}").unwrap();
//! assert_eq!(omitted.description, Patch::Keep);
//!
//! let cleared: UpdateThing = serde_json::from_str(r#"{"description": null}"#).unwrap();
//! assert_eq!(cleared.description, Patch::Clear);
//! ```

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field omitted: leave the stored value unchanged.
    #[default]
    Keep,
    /// Field sent as `null`: clear the stored value.
    Clear,
    /// Field sent with a value: overwrite the stored value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Apply the patch to a nullable stored value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }

    /// Collapse a patch on a non-nullable field into an optional overwrite.
    ///
    /// `Clear` is rejected with a validation error naming `field`.
    pub fn into_required(self, field: &str) -> Result<Option<T>, CoreError> {
        match self {
            Patch::Keep => Ok(None),
            Patch::Clear => Err(CoreError::Validation(format!("{field} cannot be cleared"))),
            Patch::Set(value) => Ok(Some(value)),
        }
    }

    /// Split into a `(touched, value)` pair for `CASE WHEN $touched THEN $value`
    /// style SQL updates on nullable columns.
    pub fn into_sql_parts(self) -> (bool, Option<T>) {
        match self {
            Patch::Keep => (false, None),
            Patch::Clear => (true, None),
            Patch::Set(value) => (true, Some(value)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}
