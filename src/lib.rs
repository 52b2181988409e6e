//! Populate typed configuration fields from environment variables, with
//! transparent redirection to files and mounted secrets.
//!
//! Every field is tied to a logical key `K`. Its value can come from one of
//! three places:
//!
//! | Variable        | Value                                                      |
//! |-----------------|------------------------------------------------------------|
//! | `K`             | the variable itself, as is                                 |
//! | `K__FILE`       | trimmed content of the file the variable names             |
//! | `K__SECRET`     | trimmed content of `<secrets_dir><name>`, where `name` is the variable's value or `K` when empty |
//!
//! This is the convention container images use to keep credentials out of
//! the environment: `POSTGRES_PASSWORD=...` during development,
//! `POSTGRES_PASSWORD__SECRET=` under Docker Swarm or Kubernetes where the
//! secret is mounted at `/run/secrets/POSTGRES_PASSWORD`.
//!
//! ```ignore
//! envsec::env_schema! {
//!     #[derive(Debug, Default)]
//!     pub struct AppConfig {
//!         pub database_url: String => "DATABASE_URL,required",
//!         pub port: i64 => "PORT",
//!         pub debug: bool => "DEBUG",
//!     }
//! }
//!
//! let mut config = AppConfig { port: 8080, ..Default::default() };
//! envsec::load(&mut config)?;
//! ```
//!
//! # Declaring fields
//!
//! A record opts in by implementing [`EnvSchema`]: it registers each field
//! with a directive `KEY[,option...]` on a [`Fields`] list. The
//! [`env_schema!`] macro writes that impl for you. Fields are processed in
//! declaration order. A field with no directive is never touched.
//!
//! The only recognized option is `required`: the pass fails with
//! [`EnvsecError::MissingRequired`] when none of the three variables yields
//! a value. Other option tokens are accepted and ignored.
//!
//! Supported field types are `String`, `i64`, `i32`, `isize` and `bool`.
//! Booleans accept `1`, `t`, `true`, `0`, `f` and `false` in any ASCII case.
//! Registering any other type compiles, but fails with
//! [`EnvsecError::UnsupportedType`] as soon as a value for it is found.
//!
//! # Resolution rules
//!
//! - **At most one** of `K`, `K__FILE` and `K__SECRET` may be set. A variable
//!   set to the empty string counts as set.
//! - A direct value is used verbatim. An empty direct value means "no value":
//!   the field keeps its current content (or the pass fails if the field is
//!   `required`).
//! - File content is trimmed. A file that is empty after trimming is an error,
//!   not an absent value.
//! - Fields that resolve to nothing keep whatever value they had before the
//!   pass, so defaults are simply the record's initial values.
//!
//! # Files and the root directory
//!
//! File paths are resolved under a root directory (default `/`). One leading
//! `/` is stripped and the rest must be a clean relative path: no `.` or `..`
//! segments and no empty segments. Anything else fails with
//! [`EnvsecError::InvalidPath`] before the file is opened. Point the root at
//! a temporary directory in tests, or at a chroot-like prefix in embedded
//! setups, with [`EnvsecBuilder::root`].
//!
//! # Environment side effects
//!
//! Secret mode works by synthesizing `K__FILE` and then following the file
//! path. Both `K__SECRET` and `K__FILE` are removed from the environment once
//! the key has been resolved, whether or not resolution succeeded, so child
//! processes never inherit them and a later field or pass never sees stale
//! state. Direct variables are left in place.
//!
//! Because the process environment is global, passes that use it
//! ([`load`], [`Envsec::load`]) must not run concurrently. Use
//! [`Envsec::load_from`] with a [`MemoryEnv`] to resolve against an
//! isolated environment instead.
//!
//! # Errors
//!
//! The pass stops at the first failing field. Fields written before that
//! point keep their new values. Resolver and conversion errors are wrapped
//! in [`EnvsecError::Field`] with the offending key; use
//! [`EnvsecError::root`] to match on the underlying cause. Errors never
//! include variable values or file contents.
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default), [`ResolverArgs`] exposes
//! `--secrets-dir` and `--env-root` flags (falling back to
//! `ENVSEC_SECRETS_DIR` / `ENVSEC_ROOT`) that build an [`Envsec`].

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod coerce;
mod environment;
mod file;
mod resolve;
mod schema;

#[cfg(test)]
mod fixtures;

pub use builder::{Envsec, EnvsecBuilder, load};
#[cfg(feature = "clap")]
pub use cli::ResolverArgs;
pub use coerce::parse_bool;
pub use environment::{Environment, MemoryEnv, ProcessEnv};
pub use error::EnvsecError;
pub use schema::{EnvSchema, FieldDecl, Fields};
pub use types::{Directive, FieldOption, Mode, VarTriple};
