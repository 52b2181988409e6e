use std::path::{Path, PathBuf};

use crate::environment::{Environment, ProcessEnv};
use crate::error::EnvsecError;
use crate::resolve::{self, ResolveContext};
use crate::schema::{EnvSchema, Fields};
use crate::types::{Directive, VarTriple};

/// A configured resolver. Cheap to clone, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envsec {
    ctx: ResolveContext,
}

impl Envsec {
    pub fn builder() -> EnvsecBuilder {
        EnvsecBuilder::new()
    }

    /// Directory that `__FILE` paths and secrets are read from.
    pub fn root(&self) -> &Path {
        &self.ctx.root
    }

    /// Prefix prepended to secret names.
    pub fn secrets_dir(&self) -> &str {
        &self.ctx.secrets_dir
    }

    /// Populate `record` from the process environment.
    ///
    /// `__FILE` and `__SECRET` variables consumed by the pass are removed from
    /// the process environment. Passes must not run concurrently.
    pub fn load<S: EnvSchema + ?Sized>(&self, record: &mut S) -> Result<(), EnvsecError> {
        self.load_from(record, &mut ProcessEnv)
    }

    /// Populate `record` from `env`.
    pub fn load_from<S, E>(&self, record: &mut S, env: &mut E) -> Result<(), EnvsecError>
    where
        S: EnvSchema + ?Sized,
        E: Environment + ?Sized,
    {
        let fields = Fields::of(record);
        tracing::debug!(
            fields = fields.len(),
            root = %self.ctx.root.display(),
            "loading record from environment"
        );
        resolve::load_fields(&self.ctx, fields, env)
    }

    /// Resolve a single directive (`KEY[,option...]`) without a record.
    ///
    /// Returns `Ok(None)` for an empty directive, or when the key has no value
    /// and is not required.
    pub fn resolve<E: Environment + ?Sized>(
        &self,
        directive: &str,
        env: &mut E,
    ) -> Result<Option<String>, EnvsecError> {
        match Directive::parse(directive) {
            Some(d) => resolve::resolve(&self.ctx, &d, env),
            None => Ok(None),
        }
    }

    /// The variables `record` reads, in declaration order. Nothing is resolved.
    pub fn variables<S: EnvSchema + ?Sized>(record: &mut S) -> Vec<(Directive, VarTriple)> {
        Fields::of(record)
            .directives()
            .map(|d| (d.clone(), d.vars()))
            .collect()
    }
}

/// Builder for [`Envsec`].
#[derive(Debug, Clone, Default)]
pub struct EnvsecBuilder {
    root: Option<PathBuf>,
    secrets_dir: Option<String>,
}

impl EnvsecBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Directory that indirected paths are resolved against (default: `/`).
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Prefix prepended to secret names (default: `/run/secrets/`).
    ///
    /// This is a plain string prefix, so include the trailing `/` for a
    /// directory.
    pub fn secrets_dir(mut self, dir: impl Into<String>) -> Self {
        self.secrets_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Envsec {
        let defaults = ResolveContext::default();
        Envsec {
            ctx: ResolveContext {
                root: self.root.unwrap_or(defaults.root),
                secrets_dir: self.secrets_dir.unwrap_or(defaults.secrets_dir),
            },
        }
    }

    /// Shorthand for `.build().load(record)`.
    pub fn load<S: EnvSchema + ?Sized>(self, record: &mut S) -> Result<(), EnvsecError> {
        self.build().load(record)
    }
}

/// Populate `record` from the process environment with default settings:
/// root `/` and secrets under `/run/secrets/`.
pub fn load<S: EnvSchema + ?Sized>(record: &mut S) -> Result<(), EnvsecError> {
    Envsec::default().load(record)
}
