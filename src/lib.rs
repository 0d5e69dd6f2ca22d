mod prelude;

pub mod cli;
pub mod echo;
pub mod entry;
pub mod error;
pub mod frontend;
pub mod submission;

pub use error::Error;
