//! Per-field conversion rules

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::CognitoAttributeName;

type ParseFn<T> = Arc<dyn Fn(&str) -> Option<T> + Send + Sync>;
type StringifyFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How one application field maps to one user pool attribute
///
/// `parse` and `stringify` are opaque to the codec; they are expected to be
/// inverses of each other for the round trip to hold. A parser returning
/// `None` makes the field fall back to its default.
pub struct UserAttribute<T> {
    cognito_name: CognitoAttributeName,
    parse: ParseFn<T>,
    stringify: StringifyFn<T>,
    default_value: Option<T>,
}

impl<T> UserAttribute<T>
where
    T: FromStr + ToString + 'static,
{
    /// Attribute using `FromStr` / `ToString`; identity for `String`
    pub fn new(cognito_name: CognitoAttributeName) -> Self {
        Self::custom(
            cognito_name,
            |raw: &str| raw.parse::<T>().ok(),
            |value: &T| value.to_string(),
        )
    }
}

impl<T> UserAttribute<T> {
    /// Attribute with caller-supplied conversions
    pub fn custom<P, S>(cognito_name: CognitoAttributeName, parse: P, stringify: S) -> Self
    where
        P: Fn(&str) -> Option<T> + Send + Sync + 'static,
        S: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            cognito_name,
            parse: Arc::new(parse),
            stringify: Arc::new(stringify),
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn cognito_name(&self) -> &CognitoAttributeName {
        &self.cognito_name
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default_value.as_ref()
    }

    pub fn parse(&self, raw: &str) -> Option<T> {
        (self.parse)(raw)
    }

    pub fn stringify(&self, value: &T) -> String {
        (self.stringify)(value)
    }
}

impl<T: Clone> Clone for UserAttribute<T> {
    fn clone(&self) -> Self {
        Self {
            cognito_name: self.cognito_name.clone(),
            parse: Arc::clone(&self.parse),
            stringify: Arc::clone(&self.stringify),
            default_value: self.default_value.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for UserAttribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAttribute")
            .field("cognito_name", &self.cognito_name)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_attribute_is_identity() {
        let attr = UserAttribute::<String>::new(CognitoAttributeName::Email);
        assert_eq!(attr.parse("a@b.com"), Some("a@b.com".to_string()));
        assert_eq!(attr.stringify(&"a@b.com".to_string()), "a@b.com");
        assert!(attr.default_value().is_none());
    }

    #[test]
    fn test_typed_attribute_parses_with_from_str() {
        let attr = UserAttribute::<bool>::new(CognitoAttributeName::EmailVerified).with_default(false);
        assert_eq!(attr.parse("true"), Some(true));
        assert_eq!(attr.parse("yes"), None);
        assert_eq!(attr.stringify(&true), "true");
        assert_eq!(attr.default_value(), Some(&false));
    }

    #[test]
    fn test_custom_conversions() {
        let attr = UserAttribute::custom(
            CognitoAttributeName::custom("tags"),
            |raw| Some(raw.split(',').map(str::to_string).collect::<Vec<_>>()),
            |tags: &Vec<String>| tags.join(","),
        );
        let tags = attr.parse("a,b").unwrap();
        assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(attr.stringify(&tags), "a,b");
        assert_eq!(attr.cognito_name().to_string(), "custom:tags");
    }
}
