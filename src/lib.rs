use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub mod cli;
pub mod libquiz;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to open the csv file: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Trouble reading file! (line {line}: {reason})")]
    Parse { line: u64, reason: String },
    #[error("cannot read answer: {0}")]
    Input(#[source] io::Error),
    #[error("cannot write to console: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
