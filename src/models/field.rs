use serde::{Deserialize, Deserializer};

/// Presence of one attribute in a partial update.
///
/// A key missing from the input is `Absent`. A key that is present is
/// `Present(value)`; for nullable columns `value` is itself an `Option`, so an
/// explicit `null` becomes `Present(None)` and clears the column.
///
/// Struct fields of this type must carry `#[serde(default)]` so a missing key
/// deserializes to `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Field::Present)
    }
}
