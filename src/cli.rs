use clap::{ErrorKind, Parser};

use crate::error::Error;
use crate::prelude::{Depth, OsString, PathBuf, TaskId};

#[derive(Parser, Debug)]
#[clap(
    name = "arcrun",
    version,
    about = "Validate arguments and hand them to the solver",
    allow_negative_numbers = true
)]
struct Cli {
    /// Directory holding the tasks.
    #[clap(value_parser)]
    directory: PathBuf,
    /// Run only this task. Negative or omitted means all tasks.
    #[clap(value_parser)]
    task_id: Option<i64>,
    /// Bound on the search depth. Negative or omitted means unbounded.
    #[clap(value_parser)]
    max_depth: Option<i64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum TaskSelector {
    #[display(fmt = "all tasks")]
    All,
    #[display(fmt = "task #{}", _0)]
    Only(TaskId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum DepthLimit {
    #[display(fmt = "unbounded")]
    Unbounded,
    #[display(fmt = "max depth {}", _0)]
    Max(Depth),
}

// Negative values are the solver's "not specified".
fn non_negative(name: &str, value: Option<i64>) -> Result<Option<u32>, Error> {
    match value {
        None => Ok(None),
        Some(v) if v < 0 => Ok(None),
        Some(v) => u32::try_from(v)
            .map(Some)
            .map_err(|_| Error::InvalidArguments(format!("{name} {v} is too large"))),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub directory: PathBuf,
    pub task: TaskSelector,
    pub depth: DepthLimit,
}

impl Invocation {
    /// Parses the process argument list. The first item is the program name.
    pub fn parse_from<I, T>(args: I) -> Result<Invocation, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => Ok(Invocation {
                directory: cli.directory,
                task: non_negative("task_id", cli.task_id)?
                    .map_or(TaskSelector::All, TaskSelector::Only),
                depth: non_negative("max_depth", cli.max_depth)?
                    .map_or(DepthLimit::Unbounded, DepthLimit::Max),
            }),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                Err(Error::HelpRequested(e))
            }
            Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => Err(
                Error::InvalidArguments("missing required directory argument".to_string()),
            ),
            Err(e) => Err(Error::InvalidArguments(clap_message(&e))),
        }
    }

    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![format!("directory: {}", self.directory.display())];
        if let TaskSelector::Only(_) = self.task {
            lines.push(format!("running only {}", self.task));
        }
        if let DepthLimit::Max(_) = self.depth {
            lines.push(format!("using {}", self.depth));
        }
        lines
    }
}

// First line of clap's report, without the "error: " prefix and usage block.
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first.strip_prefix("error:").unwrap_or(first).trim().to_string()
}
