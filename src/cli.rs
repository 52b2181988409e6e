//! Clap adapter for envsec.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It lets an
//! application expose the resolver settings as flags, with environment
//! fallbacks, by flattening [`ResolverArgs`] into its own parser:
//!
//! ```ignore
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     envsec: ResolverArgs,
//! }
//!
//! let envsec = cli.envsec.into_envsec();
//! envsec.load(&mut config)?;
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::builder::{Envsec, EnvsecBuilder};
use crate::types::{DEFAULT_ROOT, DEFAULT_SECRETS_DIR};

/// Command-line flags controlling where indirected values are read from.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ResolverArgs {
    /// Prefix prepended to secret names selected through `KEY__SECRET`.
    #[arg(long, env = "ENVSEC_SECRETS_DIR", default_value = DEFAULT_SECRETS_DIR)]
    pub secrets_dir: String,

    /// Directory that `KEY__FILE` paths and secrets are resolved against.
    #[arg(long = "env-root", env = "ENVSEC_ROOT", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,
}

impl ResolverArgs {
    pub fn into_builder(self) -> EnvsecBuilder {
        Envsec::builder()
            .root(self.root)
            .secrets_dir(self.secrets_dir)
    }

    pub fn into_envsec(self) -> Envsec {
        self.into_builder().build()
    }
}
