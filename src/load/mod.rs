//! Orchestration of a gene model sequence load.
//!
//! A run moves through `Init -> Processing -> Finalizing -> Done`:
//!
//! 1. **Init**: resolve the gene model logical database, build the identifier
//!    and sequence key caches, open the association file and, when loading
//!    sequences, clear what previous runs persisted
//! 2. **Processing**: normalize and classify every FASTA record in input order
//! 3. **Finalizing**: commit the association file and flush the persister
//! 4. **Done**: the [`RunReport`] is available
//!
//! Any error before `Done` aborts the run without leaving a partial
//! association file behind.
//!
//! [`RunReport`]: report::RunReport

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cache::CacheError;
use crate::parsing::ParseError;

pub mod config;
pub mod controller;
pub mod persist;
pub mod report;

use config::ConfigError;
use controller::RunState;
use persist::PersistError;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read FASTA input: {0}")]
    Input(#[from] ParseError),

    #[error("Failed to persist sequence: {0}")]
    Persist(#[from] PersistError),

    #[error("Run is in state {actual:?}, expected {expected:?}")]
    State {
        expected: RunState,
        actual: RunState,
    },
}

impl LoadError {
    pub(crate) fn output(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Output {
            path: path.to_path_buf(),
            source,
        }
    }
}
