//! Wire representation of a single user attribute

use serde::{Deserialize, Serialize};

/// A `(Name, Value)` pair as exchanged with the user pool
///
/// Either side may be missing on the wire; missing fields deserialize as
/// empty strings and such attributes are not considered present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAttribute {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Value", default)]
    pub value: String,
}

impl ProviderAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether both name and value are non-empty
    pub fn is_present(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }
}

/// Drop attributes without both a name and a non-empty value
pub fn present_attributes(attributes: Vec<ProviderAttribute>) -> Vec<ProviderAttribute> {
    attributes.into_iter().filter(|a| a.is_present()).collect()
}
