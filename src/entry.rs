use std::process::Command;

use crate::cli::{DepthLimit, TaskSelector};
use crate::error::Error;
use crate::prelude::{debug, warn, OsString, Path, PathBuf, Status};

const ENTRY_ENV: &str = "ARCRUN_ENTRY";

// The solver reads -1 as "not specified" for both numbers.
const UNSPECIFIED: &str = "-1";

pub trait EntryPoint {
    fn run(
        &mut self,
        task: TaskSelector,
        depth: DepthLimit,
        directory: &Path,
    ) -> Result<Status, Error>;
}

/// Runs an external solver program as `<program> <task> <depth> <directory>`.
#[derive(Debug, Clone, Default)]
pub struct CommandEntryPoint {
    program: Option<PathBuf>,
}

impl CommandEntryPoint {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandEntryPoint {
            program: Some(program.into()),
        }
    }

    pub fn from_env() -> Self {
        CommandEntryPoint {
            program: std::env::var_os(ENTRY_ENV)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    fn command_args(task: TaskSelector, depth: DepthLimit, directory: &Path) -> Vec<OsString> {
        let task = match task {
            TaskSelector::All => UNSPECIFIED.to_string(),
            TaskSelector::Only(id) => id.to_string(),
        };
        let depth = match depth {
            DepthLimit::Unbounded => UNSPECIFIED.to_string(),
            DepthLimit::Max(depth) => depth.to_string(),
        };
        vec![task.into(), depth.into(), directory.as_os_str().to_owned()]
    }
}

impl EntryPoint for CommandEntryPoint {
    fn run(
        &mut self,
        task: TaskSelector,
        depth: DepthLimit,
        directory: &Path,
    ) -> Result<Status, Error> {
        let program = self.program.as_ref().ok_or(Error::EntryPointNotConfigured)?;
        let args = Self::command_args(task, depth, directory);
        debug!("entry point: {:?} ({task}, {depth}) {:?}", program, directory);

        let status = Command::new(program)
            .args(&args)
            .status()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        match status.code() {
            Some(code) => {
                if code != 0 {
                    warn!("entry point exited with status {code}");
                }
                Ok(code)
            }
            None => Err(Error::Terminated {
                program: program.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_args() {
        assert_eq!(
            CommandEntryPoint::command_args(
                TaskSelector::Only(3),
                DepthLimit::Max(5),
                Path::new("data/")
            ),
            vec!["3", "5", "data/"]
        );
        assert_eq!(
            CommandEntryPoint::command_args(
                TaskSelector::All,
                DepthLimit::Unbounded,
                Path::new("data/")
            ),
            vec!["-1", "-1", "data/"]
        );
    }

    #[test]
    fn not_configured() {
        let mut entry = CommandEntryPoint::default();
        assert!(matches!(
            entry.run(TaskSelector::All, DepthLimit::Unbounded, Path::new(".")),
            Err(Error::EntryPointNotConfigured)
        ));
    }

    #[test]
    fn missing_program() {
        let mut entry = CommandEntryPoint::new("/nonexistent/arcrun-solver");
        assert!(matches!(
            entry.run(TaskSelector::All, DepthLimit::Unbounded, Path::new(".")),
            Err(Error::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn child_status_is_returned() {
        let mut entry = CommandEntryPoint::new("false");
        let status = entry
            .run(TaskSelector::Only(1), DepthLimit::Max(2), Path::new("."))
            .unwrap();
        assert_eq!(status, 1);

        let mut entry = CommandEntryPoint::new("true");
        let status = entry
            .run(TaskSelector::All, DepthLimit::Unbounded, Path::new("."))
            .unwrap();
        assert_eq!(status, 0);
    }
}
