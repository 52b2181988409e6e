//! Core resolution: decide where each key's value comes from, read it, and
//! write it into the record.
//!
//! For a logical key `K` three variables are candidates:
//!
//! 1. `K` — the value itself, returned untrimmed.
//! 2. `K__FILE` — a path under the root whose trimmed content is the value.
//! 3. `K__SECRET` — a secret name (empty means `K`). It is turned into
//!    `K__FILE=<secrets_dir><name>` and then handled exactly like file mode.
//!
//! At most one of them may be set. Presence is what counts, an empty value is
//! still "set". Every `__FILE` and `__SECRET` variable that a resolution reads
//! or synthesizes is removed from the environment before the next field is
//! processed, whether the resolution succeeded or not.
//!
//! The pass walks fields in declaration order and stops at the first error.
//! Fields written before that error keep their new values.

use std::path::PathBuf;

use crate::coerce::coerce;
use crate::environment::{Environment, ScopedVars};
use crate::error::EnvsecError;
use crate::file;
use crate::schema::Fields;
use crate::types::{DEFAULT_ROOT, DEFAULT_SECRETS_DIR, Directive, Mode, VarTriple};

/// Settings shared by every resolution of a pass. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    /// Directory that indirected paths are resolved against.
    pub root: PathBuf,
    /// Prefix prepended to secret names, usually ending in `/`.
    pub secrets_dir: String,
}

impl Default for ResolveContext {
    fn default() -> Self {
        ResolveContext {
            root: PathBuf::from(DEFAULT_ROOT),
            secrets_dir: DEFAULT_SECRETS_DIR.to_string(),
        }
    }
}

/// Resolve one key.
///
/// Returns `Ok(None)` when no variable yields a value and the key is not
/// required. An empty direct value counts as no value.
pub fn resolve<E: Environment + ?Sized>(
    ctx: &ResolveContext,
    directive: &Directive,
    env: &mut E,
) -> Result<Option<String>, EnvsecError> {
    let key = directive.key.as_str();
    let value = read_env_var(ctx, key, env)?;

    match value {
        Some(v) if !v.is_empty() => Ok(Some(v)),
        _ if directive.is_required() => Err(EnvsecError::MissingRequired {
            key: key.to_string(),
        }),
        _ => {
            tracing::debug!(key, "no value, leaving field untouched");
            Ok(None)
        }
    }
}

fn read_env_var<E: Environment + ?Sized>(
    ctx: &ResolveContext,
    key: &str,
    env: &mut E,
) -> Result<Option<String>, EnvsecError> {
    let vars = VarTriple::new(key);
    let mut scope = ScopedVars::new(env);

    let set = [
        scope.is_set(&vars.direct),
        scope.is_set(&vars.file),
        scope.is_set(&vars.secret),
    ];
    if set.iter().filter(|s| **s).count() > 1 {
        return Err(EnvsecError::MutuallyExclusive {
            key: key.to_string(),
            vars,
        });
    }

    if set[0] {
        let value = scope.var(&vars.direct)?;
        tracing::debug!(key, mode = %Mode::Direct, "resolved");
        return Ok(value);
    }

    // Consumed variables are registered before they are read so that a
    // failed read still clears them.
    let mut mode = Mode::File;
    if set[2] {
        scope.clear_on_drop(&vars.secret);
        let secret = scope.var(&vars.secret)?.unwrap_or_default();
        let name = if secret.is_empty() { key } else { secret.as_str() };
        scope.set(&vars.file, &format!("{}{name}", ctx.secrets_dir));
        mode = Mode::Secret;
    } else if !set[1] {
        return Ok(None);
    }

    scope.clear_on_drop(&vars.file);
    let path = scope.var(&vars.file)?.unwrap_or_default();

    let value = file::read_trimmed(&ctx.root, &vars.file, &path)?;
    if value.is_empty() {
        return Err(EnvsecError::EmptyFile {
            var: vars.file,
            path: PathBuf::from(path),
        });
    }

    tracing::debug!(key, %mode, "resolved");
    Ok(Some(value))
}

/// Run one pass over `fields`, writing every resolved value into its slot.
pub fn load_fields<E: Environment + ?Sized>(
    ctx: &ResolveContext,
    fields: Fields<'_>,
    env: &mut E,
) -> Result<(), EnvsecError> {
    for decl in fields {
        let key = decl.directive.key.as_str();
        let value = resolve(ctx, &decl.directive, env)
            .map_err(|e| EnvsecError::for_field(key, e))?;
        if let Some(value) = value {
            coerce(decl.slot, decl.type_name, &value, key)
                .map_err(|e| EnvsecError::for_field(key, e))?;
        }
    }
    Ok(())
}
