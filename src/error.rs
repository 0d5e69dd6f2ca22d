use std::io;
use std::path::PathBuf;

use thiserror::Error;

const INVALID_ARGUMENTS_EXIT_CODE: i32 = 2;
const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum Error {
    // Carries clap's rendered help or version text.
    #[error("{0}")]
    HelpRequested(clap::Error),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("no entry point configured (set ARCRUN_ENTRY to the solver program)")]
    EntryPointNotConfigured,

    #[error("failed to start entry point {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("entry point {program:?} terminated without an exit status")]
    Terminated { program: PathBuf },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::HelpRequested(_) => 0,
            Error::InvalidArguments(_) => INVALID_ARGUMENTS_EXIT_CODE,
            Error::EntryPointNotConfigured | Error::Spawn { .. } | Error::Terminated { .. } => {
                FAILURE_EXIT_CODE
            }
        }
    }
}
