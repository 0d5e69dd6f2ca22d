use crate::cli::Invocation;
use crate::echo::Echo;
use crate::entry::EntryPoint;
use crate::error::Error;
use crate::prelude::{OsString, Status};

/// Parses `args`, echoes what was parsed and calls `entry` once.
pub fn launch<I, T>(
    args: I,
    echo: &mut dyn Echo,
    entry: &mut dyn EntryPoint,
) -> Result<Status, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let invocation = Invocation::parse_from(args)?;
    for line in invocation.describe() {
        echo.echo(&line);
    }
    let Invocation {
        directory,
        task,
        depth,
    } = invocation;
    entry.run(task, depth, &directory)
}
