//! Schema-driven conversion between user records and attribute lists

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::{ProviderAttribute, UserAttribute};

/// スキーマ構築エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("Duplicate attribute key: {0}")]
    DuplicateKey(String),
}

/// Type-erased binding of one record field to its attribute rules
trait FieldCodec<A>: Send + Sync {
    fn cognito_name(&self) -> String;
    fn encode(&self, record: &A, fill_defaults: bool) -> Option<String>;
    fn decode(&self, key: &str, record: &mut A, raw: Option<&str>);
}

struct Field<T, G, M> {
    attribute: UserAttribute<T>,
    get: G,
    get_mut: M,
}

impl<A, T, G, M> FieldCodec<A> for Field<T, G, M>
where
    T: Clone + Send + Sync,
    G: Fn(&A) -> &Option<T> + Send + Sync,
    M: Fn(&mut A) -> &mut Option<T> + Send + Sync,
{
    fn cognito_name(&self) -> String {
        self.attribute.cognito_name().to_string()
    }

    fn encode(&self, record: &A, fill_defaults: bool) -> Option<String> {
        match (self.get)(record) {
            Some(value) => Some(self.attribute.stringify(value)),
            None if fill_defaults => self
                .attribute
                .default_value()
                .map(|value| self.attribute.stringify(value)),
            None => None,
        }
    }

    fn decode(&self, key: &str, record: &mut A, raw: Option<&str>) {
        let value = match raw {
            Some(raw) => match self.attribute.parse(raw) {
                Some(value) => Some(value),
                None => {
                    warn!(
                        "Attribute {} for field {} could not be parsed, using default",
                        self.attribute.cognito_name(),
                        key
                    );
                    self.attribute.default_value().cloned()
                }
            },
            None => self.attribute.default_value().cloned(),
        };
        *(self.get_mut)(record) = value;
    }
}

/// The application's user schema: field key → attribute rules
///
/// Fields keep their declaration order, which is also the order of encoded
/// attributes. The structure is immutable once built and cheap to clone.
pub struct UserStructure<A> {
    fields: Arc<Vec<(String, Box<dyn FieldCodec<A>>)>>,
}

impl<A> Clone for UserStructure<A> {
    fn clone(&self) -> Self {
        Self {
            fields: Arc::clone(&self.fields),
        }
    }
}

impl<A> fmt::Debug for UserStructure<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.fields
                    .iter()
                    .map(|(key, field)| (key.as_str(), field.cognito_name())),
            )
            .finish()
    }
}

impl<A: Default> UserStructure<A> {
    pub fn builder() -> UserStructureBuilder<A> {
        UserStructureBuilder { fields: Vec::new() }
    }

    /// Declared field keys, in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// User pool attribute name bound to `key`
    pub fn cognito_name(&self, key: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, field)| field.cognito_name())
    }

    /// Build the attribute list for a (partial) record
    ///
    /// Fields set on the record are always emitted. Unset fields emit their
    /// default only when `fill_defaults` is true and a default is declared.
    pub fn encode(&self, record: &A, fill_defaults: bool) -> Vec<ProviderAttribute> {
        self.fields
            .iter()
            .filter_map(|(_, field)| {
                field
                    .encode(record, fill_defaults)
                    .map(|value| ProviderAttribute::new(field.cognito_name(), value))
            })
            .collect()
    }

    /// Build a record from an attribute list
    ///
    /// Every declared field is assigned: the parsed value when the attribute
    /// is present, otherwise the declared default (or `None`). Attributes
    /// missing a name or value are ignored; on duplicate names the last one
    /// wins.
    pub fn decode(&self, attributes: &[ProviderAttribute]) -> A {
        let by_name: HashMap<&str, &str> = attributes
            .iter()
            .filter(|a| a.is_present())
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect();

        let mut record = A::default();
        for (key, field) in self.fields.iter() {
            let raw = by_name.get(field.cognito_name().as_str()).copied();
            field.decode(key, &mut record, raw);
        }
        record
    }
}

/// Builder for [`UserStructure`]
pub struct UserStructureBuilder<A> {
    fields: Vec<(String, Box<dyn FieldCodec<A>>)>,
}

impl<A: Default> UserStructureBuilder<A> {
    /// Declare a field with its attribute rules and accessors
    pub fn attribute<T, G, M>(
        mut self,
        key: impl Into<String>,
        attribute: UserAttribute<T>,
        get: G,
        get_mut: M,
    ) -> Self
    where
        T: Clone + Send + Sync + 'static,
        G: Fn(&A) -> &Option<T> + Send + Sync + 'static,
        M: Fn(&mut A) -> &mut Option<T> + Send + Sync + 'static,
        A: 'static,
    {
        self.fields.push((
            key.into(),
            Box::new(Field {
                attribute,
                get,
                get_mut,
            }),
        ));
        self
    }

    pub fn build(self) -> Result<UserStructure<A>, StructureError> {
        let mut seen = HashSet::new();
        for (key, _) in &self.fields {
            if !seen.insert(key.as_str()) {
                return Err(StructureError::DuplicateKey(key.clone()));
            }
        }

        Ok(UserStructure {
            fields: Arc::new(self.fields),
        })
    }
}
