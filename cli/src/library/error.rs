use std::io::{self, Write};

use thiserror::Error;

use crate::library::api::ApiError;

#[derive(Debug, Error)]
pub enum PruneError {
    #[error("API error occurred: {0}")]
    Api(#[from] ApiError),
    #[error("Unexpected Error: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl From<io::Error> for PruneError {
    fn from(error: io::Error) -> Self {
        PruneError::Unexpected(anyhow::Error::new(error).context("Failed to write output"))
    }
}

impl PruneError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PruneError::Api(_) => 1,
            PruneError::Unexpected(_) => 2,
        }
    }

    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            PruneError::Api(error) => {
                writeln!(out, "API error occurred")?;

                for detail in &error.errors {
                    writeln!(out, "code: {}, msg: {}", detail.code, detail.message)?;
                }
            }
            PruneError::Unexpected(error) => writeln!(out, "Unexpected Error: {:#}", error)?,
        }

        out.flush()
    }
}
