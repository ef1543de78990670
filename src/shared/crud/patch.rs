use serde::{Deserialize, Deserializer};

//
// ──────────────────────────────────────────────────────────
// PatchField (explicit partial-update semantics)
// ──────────────────────────────────────────────────────────
// - Unset: field not provided => keep stored value
// - Null: explicitly null => clear the column (nullable fields only)
// - Value(v): replace with v
//
// Pair with #[serde(default)] so an omitted field stays Unset.
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Unset
    }
}

impl<T> PatchField<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, PatchField::Unset)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            PatchField::Value(v) => Some(v),
            _ => None,
        }
    }

    /// `None` when the field should be left alone, `Some(None)` to clear it.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            PatchField::Unset => None,
            PatchField::Null => Some(None),
            PatchField::Value(v) => Some(Some(v)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PatchField<U> {
        match self {
            PatchField::Unset => PatchField::Unset,
            PatchField::Null => PatchField::Null,
            PatchField::Value(v) => PatchField::Value(f(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => PatchField::Value(v),
            None => PatchField::Null,
        })
    }
}
