//! Newtype uids for type-safe entity references.
//!
//! Use the `define_uid!` macro to create type-safe uid wrappers that prevent
//! accidentally mixing uids from different entity types. CoffeeCorner records
//! are keyed by opaque string uids (`prod_1`, `cat_hot`, CMS entry uids), so
//! the wrappers hold a `String` rather than a serial integer.

/// Macro to define a type-safe uid wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use coffeecorner_core::define_uid;
/// define_uid!(UserUid);
/// define_uid!(ProductUid);
///
/// let user = UserUid::new("user_1");
/// let product = ProductUid::new("prod_1");
///
/// // These are different types, so this won't compile:
/// // let _: UserUid = product;
/// ```
#[macro_export]
macro_rules! define_uid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new uid from anything string-like.
            #[must_use]
            pub fn new(uid: impl Into<String>) -> Self {
                Self(uid.into())
            }

            /// Get the uid as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the uid and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(uid: String) -> Self {
                Self(uid)
            }
        }

        impl From<&str> for $name {
            fn from(uid: &str) -> Self {
                Self(uid.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(uid: $name) -> Self {
                uid.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity uids
define_uid!(UserUid);
define_uid!(ProductUid);
define_uid!(CategoryUid);
define_uid!(ProfileUid);
define_uid!(AvatarId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_construction() {
        let uid = ProductUid::new("prod_1");
        assert_eq!(uid.as_str(), "prod_1");
        assert_eq!(uid.to_string(), "prod_1");
    }

    #[test]
    fn test_uid_from_str() {
        let uid: UserUid = "user_42".into();
        assert_eq!(uid.into_inner(), "user_42");
    }

    #[test]
    fn test_uid_serde_transparent() {
        let uid = CategoryUid::new("cat_hot");
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"cat_hot\"");

        let parsed: CategoryUid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, uid);
    }
}
