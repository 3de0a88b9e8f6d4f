//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::AppError;

/// Map domain errors to the message printed on stderr.
pub fn map_error(e: &AppError) -> String {
    format!("dirprint: {}", e)
}
