//! Simulation error taxonomy

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Every cell on the grid is occupied
    #[error("no free cell left on the {width}x{height} grid")]
    GridFull { width: i32, height: i32 },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
