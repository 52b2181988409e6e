use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::VarTriple;

/// Everything that can go wrong while resolving a record.
///
/// Every variant names the logical key, and the variable involved where there
/// is one, so the message points at the setting the operator has to fix.
/// Values are never echoed back since they may be secrets.
#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum EnvsecError {
    #[error("Only one of {vars} may be set")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(help("set only one of the direct, __FILE and __SECRET variables"))
    )]
    MutuallyExclusive { key: String, vars: VarTriple },

    #[error("Failed to open {path} (from {var}): {source}")]
    FileOpen {
        var: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to stat {path} (from {var}): {source}")]
    FileStat {
        var: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path} (from {var}): {source}")]
    FileRead {
        var: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Content of {path} (from {var}) is empty")]
    EmptyFile { var: String, path: PathBuf },

    #[error("Invalid path '{path}' in {var}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(help("paths must stay inside the configured root and contain no '.' or '..' segments"))
    )]
    InvalidPath { var: String, path: String },

    #[error("Missing required value for {key}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(help("set {key}, {key}__FILE or {key}__SECRET"))
    )]
    MissingRequired { key: String },

    #[error("Value of {var} is not valid UTF-8")]
    InvalidUnicode { var: String },

    #[error("Invalid integer value for {key}: {source}")]
    InvalidInteger { key: String, source: ParseIntError },

    #[error("Invalid boolean value for {key}: expected one of 1, t, true, 0, f, false")]
    InvalidBoolean { key: String },

    #[error("Unsupported field type {type_name} for {key}")]
    UnsupportedType {
        key: String,
        type_name: &'static str,
    },

    #[error("Failed to load {key}: {source}")]
    Field {
        key: String,
        source: Box<EnvsecError>,
    },
}

impl EnvsecError {
    /// Wrap a resolver or coercer error with the field's key.
    ///
    /// `MissingRequired` already names the key and is passed through as is.
    pub(crate) fn for_field(key: &str, err: EnvsecError) -> Self {
        match err {
            EnvsecError::MissingRequired { .. } | EnvsecError::Field { .. } => err,
            other => EnvsecError::Field {
                key: key.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with any per-field wrapping removed.
    pub fn root(&self) -> &EnvsecError {
        match self {
            EnvsecError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// The logical key this error belongs to.
    pub fn key(&self) -> Option<&str> {
        match self {
            EnvsecError::MutuallyExclusive { key, .. }
            | EnvsecError::MissingRequired { key }
            | EnvsecError::InvalidInteger { key, .. }
            | EnvsecError::InvalidBoolean { key }
            | EnvsecError::UnsupportedType { key, .. }
            | EnvsecError::Field { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutually_exclusive_names_all_three() {
        let err = EnvsecError::MutuallyExclusive {
            key: "STR".into(),
            vars: VarTriple::new("STR"),
        };
        let msg = err.to_string();
        assert!(msg.contains("STR,"));
        assert!(msg.contains("STR__FILE"));
        assert!(msg.contains("STR__SECRET"));
    }

    #[test]
    fn empty_file_names_var_and_path() {
        let err = EnvsecError::EmptyFile {
            var: "TOKEN__FILE".into(),
            path: "/run/secrets/TOKEN".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TOKEN__FILE"));
        assert!(msg.contains("/run/secrets/TOKEN"));
    }

    #[test]
    fn file_stat_names_var_and_path() {
        let err = EnvsecError::FileStat {
            var: "TOKEN__FILE".into(),
            path: "/run/secrets/TOKEN".into(),
            source: std::io::Error::other("stale handle"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to stat /run/secrets/TOKEN (from TOKEN__FILE): stale handle"
        );
    }

    #[test]
    fn invalid_unicode_names_var_only() {
        let err = EnvsecError::InvalidUnicode {
            var: "STR__SECRET".into(),
        };
        assert_eq!(err.to_string(), "Value of STR__SECRET is not valid UTF-8");
        assert_eq!(err.key(), None);
    }

    #[test]
    fn messages_are_sentence_cased() {
        let errors = [
            EnvsecError::MutuallyExclusive {
                key: "STR".into(),
                vars: VarTriple::new("STR"),
            },
            EnvsecError::MissingRequired { key: "str".into() },
        ];
        for err in errors {
            let msg = err.to_string();
            assert!(msg.starts_with(char::is_uppercase), "{msg}");
        }
    }

    #[test]
    fn field_wrapping_keeps_root() {
        let err = EnvsecError::for_field("BOL", EnvsecError::InvalidBoolean { key: "BOL".into() });
        assert!(err.to_string().starts_with("Failed to load BOL"));
        assert!(matches!(err.root(), EnvsecError::InvalidBoolean { .. }));
        assert_eq!(err.key(), Some("BOL"));
    }

    #[test]
    fn missing_required_is_not_wrapped() {
        let err = EnvsecError::for_field("DB", EnvsecError::MissingRequired { key: "DB".into() });
        assert!(matches!(err, EnvsecError::MissingRequired { .. }));
        assert_eq!(err.to_string(), "Missing required value for DB");
    }
}
