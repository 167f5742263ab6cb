//! User attribute mapping for Cognito user pools
//!
//! This crate converts between typed application user records and the flat,
//! string-valued attribute lists exchanged with the user pool. The mapping is
//! described once as a [`UserStructure`] and then used in both directions.
//!
//! ```
//! use cognito_rust_attributes::{CognitoAttributeName, ProviderAttribute, UserAttribute, UserStructure};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Profile {
//!     email: Option<String>,
//!     first_name: Option<String>,
//! }
//!
//! let structure = UserStructure::<Profile>::builder()
//!     .attribute("email", UserAttribute::new(CognitoAttributeName::Email), |p| &p.email, |p| &mut p.email)
//!     .attribute("firstName", UserAttribute::new(CognitoAttributeName::GivenName), |p| &p.first_name, |p| &mut p.first_name)
//!     .build()
//!     .unwrap();
//!
//! let profile = Profile { email: Some("a@b.com".to_string()), first_name: None };
//! let attributes = structure.encode(&profile, false);
//! assert_eq!(attributes, vec![ProviderAttribute::new("email", "a@b.com")]);
//! assert_eq!(structure.decode(&attributes), profile);
//! ```

mod attribute;
mod name;
mod structure;
mod user_attribute;

pub use attribute::*;
pub use name::*;
pub use structure::*;
pub use user_attribute::*;
