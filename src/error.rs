use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use thiserror::Error;

/// Errors raised before any output grid is allocated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClearnessError {
    /// An input grid has zero rows or zero columns
    #[error("{name} grid is empty")]
    EmptyGrid { name: &'static str },

    /// Measured and reference grids do not share dimensions
    #[error(
        "measured grid is {}x{} but reference grid is {}x{}",
        .measured.0, .measured.1, .reference.0, .reference.1
    )]
    ShapeMismatch {
        measured: (usize, usize),
        reference: (usize, usize),
    },

    /// Region descriptor disagrees with the samples it describes
    #[error(
        "region extent is {}x{} but grid is {}x{}",
        .extent.0, .extent.1, .grid.0, .grid.1
    )]
    ExtentMismatch {
        extent: (usize, usize),
        grid: (usize, usize),
    },
}

impl ClearnessError {
    /// True for every caller-side input error (missing or inconsistent grids).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyGrid { .. } | Self::ShapeMismatch { .. } | Self::ExtentMismatch { .. }
        )
    }
}

impl From<ClearnessError> for PyErr {
    fn from(err: ClearnessError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
