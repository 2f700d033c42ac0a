//! Command-line option fields.
//!
//! A [`Field`] is one option as the caller supplied it. It validates its own
//! content and renders to fully formed tokens (`--flag=value`); list and map
//! fields render one token per element, in insertion order.

use crate::error::{ArenaError, Result};

/// A single typed command-line option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// `--flag=value`.
    String {
        /// Flag, including its dashes.
        flag: String,
        /// Value; must be non-empty.
        value: String,
    },
    /// `--flag` with no value.
    Bool {
        /// Flag, including its dashes.
        flag: String,
    },
    /// `--flag=v1 --flag=v2 ...`.
    StringList {
        /// Flag, including its dashes.
        flag: String,
        /// Values; must be non-empty.
        values: Vec<String>,
    },
    /// `--flag=k1<sep>v1 --flag=k2<sep>v2 ...`.
    StringMap {
        /// Flag, including its dashes.
        flag: String,
        /// Entries in caller order; must be non-empty.
        entries: Vec<(String, String)>,
        /// Separator between key and value.
        separator: char,
    },
}

impl Field {
    /// A `--flag=value` field.
    #[must_use]
    pub fn string(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::String {
            flag: flag.into(),
            value: value.into(),
        }
    }

    /// A value-less switch.
    #[must_use]
    pub fn bool(flag: impl Into<String>) -> Self {
        Self::Bool { flag: flag.into() }
    }

    /// A repeated `--flag=value` field.
    #[must_use]
    pub fn list<I, S>(flag: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StringList {
            flag: flag.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A repeated `--flag=key<separator>value` field.
    #[must_use]
    pub fn map<I, K, V>(flag: impl Into<String>, entries: I, separator: char) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::StringMap {
            flag: flag.into(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            separator,
        }
    }

    /// The flag this field renders.
    #[must_use]
    pub fn flag(&self) -> &str {
        match self {
            Self::String { flag, .. }
            | Self::Bool { flag }
            | Self::StringList { flag, .. }
            | Self::StringMap { flag, .. } => flag,
        }
    }

    /// Check the field carries the content it needs.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateArgs` error naming the flag if the flag or the
    /// required value(s) are empty. A `Bool` field never fails.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Bool { .. } => Ok(()),
            Self::String { flag, value } => {
                if flag.is_empty() || value.is_empty() {
                    Err(ArenaError::validate_args(format!(
                        "failed to validate flag {flag}, value is empty"
                    )))
                } else {
                    Ok(())
                }
            }
            Self::StringList { flag, values } if values.is_empty() => Err(
                ArenaError::validate_args(format!("failed to validate flag {flag}, values are empty")),
            ),
            Self::StringMap { flag, entries, .. } if entries.is_empty() => Err(
                ArenaError::validate_args(format!("failed to validate flag {flag}, values are empty")),
            ),
            Self::StringList { .. } | Self::StringMap { .. } => Ok(()),
        }
    }

    /// Render to command-line tokens.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        match self {
            Self::String { flag, value } => vec![format!("{flag}={value}")],
            Self::Bool { flag } => vec![flag.clone()],
            Self::StringList { flag, values } => {
                values.iter().map(|v| format!("{flag}={v}")).collect()
            }
            Self::StringMap {
                flag,
                entries,
                separator,
            } => entries
                .iter()
                .map(|(k, v)| format!("{flag}={k}{separator}{v}"))
                .collect(),
        }
    }
}

/// Validate every field in order and concatenate their tokens.
///
/// # Errors
///
/// Returns the first field's validation error.
pub fn render_all(fields: &[Field]) -> Result<Vec<String>> {
    let mut tokens = Vec::with_capacity(fields.len());
    for field in fields {
        field.validate()?;
        tokens.extend(field.render());
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_string_field_renders_flag_equals_value() {
        let field = Field::string("--name", "tf-test");
        assert!(field.validate().is_ok());
        assert_eq!(field.render(), ["--name=tf-test"]);
    }

    #[test]
    fn test_bool_field_always_valid() {
        let field = Field::bool("--rdma");
        assert!(field.validate().is_ok());
        assert_eq!(field.render(), ["--rdma"]);
    }

    #[test]
    fn test_map_field_keeps_insertion_order_and_separator() {
        let field = Field::map("--data", [("pvc-b", "/b"), ("pvc-a", "/a")], ':');
        assert_eq!(field.render(), ["--data=pvc-b:/b", "--data=pvc-a:/a"]);
    }

    #[test_case(Field::string("--name", "") ; "empty value")]
    #[test_case(Field::string("", "x") ; "empty flag")]
    #[test_case(Field::list("--toleration", Vec::<String>::new()) ; "empty list")]
    #[test_case(Field::map("--env", Vec::<(String, String)>::new(), '=') ; "empty map")]
    fn test_empty_content_fails_validation(field: Field) {
        let err = field.validate().unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.message().contains(field.flag()));
    }

    #[test]
    fn test_render_all_stops_at_first_invalid_field() {
        let fields = [
            Field::string("--name", "ok"),
            Field::string("--image", ""),
            Field::list("--toleration", Vec::<String>::new()),
        ];
        let err = render_all(&fields).unwrap_err();
        assert!(err.message().contains("--image"));
    }

    proptest! {
        #[test]
        fn prop_string_field_valid_iff_value_non_empty(value in ".{0,16}") {
            let field = Field::string("--flag", value.clone());
            prop_assert_eq!(field.validate().is_ok(), !value.is_empty());
            prop_assert_eq!(field.render().len(), 1);
        }

        #[test]
        fn prop_list_field_renders_one_token_per_value(values in proptest::collection::vec("[a-z0-9]{1,8}", 0..8)) {
            let field = Field::list("--toleration", values.clone());
            prop_assert_eq!(field.validate().is_ok(), !values.is_empty());
            prop_assert_eq!(field.render().len(), values.len());
        }

        #[test]
        fn prop_map_field_renders_one_token_per_entry(
            entries in proptest::collection::vec(("[a-z]{1,6}", "[a-z0-9/]{1,6}"), 0..8)
        ) {
            let field = Field::map("--env", entries.clone(), '=');
            prop_assert_eq!(field.validate().is_ok(), !entries.is_empty());
            let tokens = field.render();
            prop_assert_eq!(tokens.len(), entries.len());
            for (token, (k, v)) in tokens.iter().zip(&entries) {
                prop_assert_eq!(token, &format!("--env={k}={v}"));
            }
        }

        #[test]
        fn prop_rendering_is_deterministic(values in proptest::collection::vec("[a-z]{1,4}", 1..5)) {
            let field = Field::list("--task-images", values);
            prop_assert_eq!(field.render(), field.render());
        }
    }
}
