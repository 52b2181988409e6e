//! Declaring which fields of a record are read from the environment.
//!
//! A record implements [`EnvSchema`] by registering each field together with
//! its directive, in declaration order:
//!
//! ```ignore
//! impl EnvSchema for AppConfig {
//!     fn declare<'a>(&'a mut self, fields: &mut Fields<'a>) {
//!         fields
//!             .field("DATABASE_URL,required", &mut self.database_url)
//!             .field("PORT", &mut self.port);
//!     }
//! }
//! ```
//!
//! or lets [`env_schema!`](crate::env_schema) write that impl. The declaration
//! list is rebuilt on every pass and discarded afterwards.

use std::any::{Any, type_name};

use crate::types::Directive;

/// A record whose fields can be populated from the environment.
pub trait EnvSchema {
    /// Register every environment-backed field, in declaration order.
    fn declare<'a>(&'a mut self, fields: &mut Fields<'a>);
}

/// One declared field: its directive and a mutable handle on its storage.
pub struct FieldDecl<'a> {
    pub directive: Directive,
    pub(crate) slot: &'a mut dyn Any,
    pub(crate) type_name: &'static str,
}

impl std::fmt::Debug for FieldDecl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDecl")
            .field("directive", &self.directive)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Ordered list of declared fields, built by [`EnvSchema::declare`].
#[derive(Debug, Default)]
pub struct Fields<'a> {
    decls: Vec<FieldDecl<'a>>,
}

impl<'a> Fields<'a> {
    pub fn new() -> Self {
        Fields { decls: Vec::new() }
    }

    /// Collect the declarations of `record`.
    pub fn of<S: EnvSchema + ?Sized>(record: &'a mut S) -> Self {
        let mut fields = Fields::new();
        record.declare(&mut fields);
        fields
    }

    /// Register `slot` under `directive` (`KEY[,option...]`).
    ///
    /// A directive without a key registers nothing.
    pub fn field<T: Any>(&mut self, directive: &str, slot: &'a mut T) -> &mut Self {
        match Directive::parse(directive) {
            Some(directive) => self.decls.push(FieldDecl {
                directive,
                slot,
                type_name: type_name::<T>(),
            }),
            None => tracing::trace!(directive, "skipping field without a key"),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// The parsed directives, in declaration order.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.decls.iter().map(|d| &d.directive)
    }
}

impl<'a> IntoIterator for Fields<'a> {
    type Item = FieldDecl<'a>;
    type IntoIter = std::vec::IntoIter<FieldDecl<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.decls.into_iter()
    }
}

/// Define a struct and its [`EnvSchema`] implementation together.
///
/// Fields followed by `=> "KEY[,option...]"` are read from the environment;
/// fields without a directive are left alone.
///
/// ```ignore
/// envsec::env_schema! {
///     #[derive(Debug, Default)]
///     pub struct AppConfig {
///         pub database_url: String => "DATABASE_URL,required",
///         pub port: i64 => "PORT",
///         pub debug: bool => "DEBUG",
///         pub started_at: Option<u64>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! env_schema {
    (
        $(#[$smeta:meta])*
        $svis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $directive:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$smeta])*
        $svis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field : $ty,
            )*
        }

        impl $crate::EnvSchema for $name {
            fn declare<'a>(&'a mut self, fields: &mut $crate::Fields<'a>) {
                $(
                    $( fields.field($directive, &mut self.$field); )?
                )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{Simple, Tagged};
    use crate::types::FieldOption;

    #[test]
    fn declaration_order_is_preserved() {
        let mut record = Simple::default();
        let fields = Fields::of(&mut record);
        let keys: Vec<&str> = fields.directives().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["STR", "INT", "BOL"]);
    }

    #[test]
    fn fields_without_directive_are_skipped() {
        let mut record = Tagged::default();
        let fields = Fields::of(&mut record);
        assert_eq!(fields.len(), 2);
        let keys: Vec<&str> = fields.directives().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["DATABASE_URL", "WORKERS"]);
    }

    #[test]
    fn options_are_parsed() {
        let mut record = Tagged::default();
        let fields = Fields::of(&mut record);
        let first = fields.directives().next().unwrap();
        assert_eq!(first.options, vec![FieldOption::Required]);
    }

    #[test]
    fn empty_directive_registers_nothing() {
        let mut a = String::new();
        let mut b = 0i64;
        let mut fields = Fields::new();
        fields.field("", &mut a).field(",required", &mut b);
        assert!(fields.is_empty());
    }

    #[test]
    fn slot_type_is_recorded() {
        let mut port = 0i64;
        let mut fields = Fields::new();
        fields.field("PORT", &mut port);
        let decl = fields.into_iter().next().unwrap();
        assert_eq!(decl.type_name, "i64");
    }
}
