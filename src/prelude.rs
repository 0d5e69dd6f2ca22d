pub use anyhow::{bail, ensure, Context, Result};
pub use log::*;
pub use serde::{Deserialize, Serialize};
pub use std::collections::BTreeMap;
pub use std::ffi::OsString;
pub use std::path::{Path, PathBuf};

pub type TaskId = u32;
pub type Depth = u32;

pub type Status = i32;

pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).context(format!("path is not found?: {:?}", path))
}

pub fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content).context(format!("can not write: {:?}", path))
}
