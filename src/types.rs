use std::fmt;

/// Suffix of the variable that names a file holding the value.
pub const FILE_SUFFIX: &str = "__FILE";

/// Suffix of the variable that selects a secret under the secrets directory.
pub const SECRET_SUFFIX: &str = "__SECRET";

/// Default prefix prepended to secret names (Docker/Swarm secrets mount).
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets/";

/// Default filesystem root for indirected reads.
pub const DEFAULT_ROOT: &str = "/";

/// An option token from a field directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOption {
    /// The field must resolve to a value or the pass fails.
    Required,
    /// Any token that is not recognized. Kept for diagnostics, otherwise inert.
    Other(String),
}

impl FieldOption {
    fn parse(token: &str) -> Self {
        match token {
            "required" => FieldOption::Required,
            other => FieldOption::Other(other.to_string()),
        }
    }
}

/// A parsed field directive of the form `KEY[,option...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub options: Vec<FieldOption>,
}

impl Directive {
    /// Parse `KEY[,option...]`.
    ///
    /// Returns `None` when the directive carries no key, which callers treat
    /// as "this field is not resolved from the environment". Empty option
    /// tokens (e.g. a trailing comma) are dropped.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',');
        let key = parts.next().unwrap_or_default().trim();
        if key.is_empty() {
            return None;
        }
        let options = parts
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(FieldOption::parse)
            .collect();
        Some(Directive {
            key: key.to_string(),
            options,
        })
    }

    pub fn is_required(&self) -> bool {
        self.options.contains(&FieldOption::Required)
    }

    pub fn vars(&self) -> VarTriple {
        VarTriple::new(&self.key)
    }
}

/// Which indirection a key resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `KEY` holds the value itself.
    Direct,
    /// `KEY__FILE` names a file whose trimmed content is the value.
    File,
    /// `KEY__SECRET` names a secret under the secrets directory.
    Secret,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Direct => write!(f, "direct"),
            Mode::File => write!(f, "file"),
            Mode::Secret => write!(f, "secret"),
        }
    }
}

/// The three candidate variable names for one logical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarTriple {
    pub direct: String,
    pub file: String,
    pub secret: String,
}

impl VarTriple {
    pub fn new(key: &str) -> Self {
        VarTriple {
            direct: key.to_string(),
            file: format!("{key}{FILE_SUFFIX}"),
            secret: format!("{key}{SECRET_SUFFIX}"),
        }
    }
}

impl fmt::Display for VarTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} and {}", self.direct, self.file, self.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_key() {
        let d = Directive::parse("PORT").unwrap();
        assert_eq!(d.key, "PORT");
        assert!(d.options.is_empty());
        assert!(!d.is_required());
    }

    #[test]
    fn required_option() {
        let d = Directive::parse("DATABASE_URL,required").unwrap();
        assert_eq!(d.key, "DATABASE_URL");
        assert!(d.is_required());
    }

    #[test]
    fn unknown_options_are_kept_but_inert() {
        let d = Directive::parse("HOST, notempty ,required,").unwrap();
        assert_eq!(
            d.options,
            vec![
                FieldOption::Other("notempty".into()),
                FieldOption::Required
            ]
        );
        assert!(d.is_required());
    }

    #[test]
    fn empty_directive_is_skipped() {
        assert_eq!(Directive::parse(""), None);
        assert_eq!(Directive::parse(",required"), None);
    }

    #[test]
    fn triple_names() {
        let t = VarTriple::new("TOKEN");
        assert_eq!(t.direct, "TOKEN");
        assert_eq!(t.file, "TOKEN__FILE");
        assert_eq!(t.secret, "TOKEN__SECRET");
        assert_eq!(t.to_string(), "TOKEN, TOKEN__FILE and TOKEN__SECRET");
    }
}
