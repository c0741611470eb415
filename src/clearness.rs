//! Clearness index: ratio of measured shortwave to top-of-atmosphere shortwave.
//!
//! Only interior pixels are evaluated; the outermost ring of the output is
//! always no-data. Division is unguarded, so a zero reference sample yields
//! `inf` or `NaN` in the output.

use log::{debug, log_enabled, warn, Level};
use ndarray::{s, Array1, Array2, ArrayView2, Zip};
use ndarray_stats::QuantileExt;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;

use crate::error::ClearnessError;
use crate::grid::{check_extent, is_novalue, replace_novalue, set_novalue_border, Grid, NODATA};

/// Clearness index parameters
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ClearnessParams {
    /// Sentinel written to the output border
    #[pyo3(get, set)]
    pub nodata: f32,
    /// Input samples equal to this value are turned into NaN before dividing
    #[pyo3(get, set)]
    pub input_novalue: Option<f32>,
    /// Split interior rows across the rayon pool
    #[pyo3(get, set)]
    pub parallel: bool,
}

#[pymethods]
impl ClearnessParams {
    #[new]
    #[pyo3(signature = (nodata=NODATA, input_novalue=None, parallel=true))]
    pub fn new(nodata: f32, input_novalue: Option<f32>, parallel: bool) -> Self {
        Self {
            nodata,
            input_novalue,
            parallel,
        }
    }
}

impl Default for ClearnessParams {
    fn default() -> Self {
        Self::new(NODATA, None, true)
    }
}

/// Statistics over the valid (finite, non-sentinel) samples of a grid.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct CiSummary {
    #[pyo3(get)]
    pub count: usize,
    #[pyo3(get)]
    pub min: Option<f32>,
    #[pyo3(get)]
    pub max: Option<f32>,
    #[pyo3(get)]
    pub mean: Option<f32>,
}

impl CiSummary {
    pub fn from_grid(grid: ArrayView2<f32>, nodata: f32) -> Self {
        let valid: Array1<f32> = grid
            .iter()
            .copied()
            .filter(|&v| v.is_finite() && !is_novalue(v, nodata))
            .collect();

        Self {
            count: valid.len(),
            min: valid.min().ok().copied(),
            max: valid.max().ok().copied(),
            mean: valid.mean(),
        }
    }
}

fn validate_inputs(
    measured: &ArrayView2<f32>,
    reference: &ArrayView2<f32>,
) -> Result<(), ClearnessError> {
    if measured.is_empty() {
        return Err(ClearnessError::EmptyGrid { name: "measured" });
    }
    if reference.is_empty() {
        return Err(ClearnessError::EmptyGrid { name: "reference" });
    }
    if measured.dim() != reference.dim() {
        return Err(ClearnessError::ShapeMismatch {
            measured: measured.dim(),
            reference: reference.dim(),
        });
    }
    Ok(())
}

/// Clearness index on raw arrays. Pure Rust, no PyO3.
pub fn clearness_index_pure(
    measured: ArrayView2<f32>,
    reference: ArrayView2<f32>,
    params: &ClearnessParams,
) -> Result<Array2<f32>, ClearnessError> {
    validate_inputs(&measured, &reference)?;

    // Masked copies only exist when the caller asked for sentinel replacement
    let masked = params
        .input_novalue
        .map(|nv| (replace_novalue(measured, nv), replace_novalue(reference, nv)));
    let (measured, reference) = match &masked {
        Some((m, r)) => (m.view(), r.view()),
        None => (measured.view(), reference.view()),
    };

    let (rows, cols) = measured.dim();
    let mut result = Array2::from_elem((rows, cols), params.nodata);

    if rows < 3 || cols < 3 {
        warn!("{rows}x{cols} grid has no interior pixels, output is all no-data");
        return Ok(result);
    }

    let measured_interior = measured.slice(s![1..rows - 1, 1..cols - 1]);
    let reference_interior = reference.slice(s![1..rows - 1, 1..cols - 1]);
    debug!(
        "clearness index over {rows}x{cols} grid ({}x{} interior, parallel={})",
        rows - 2,
        cols - 2,
        params.parallel
    );

    if log_enabled!(Level::Warn) {
        let zero_refs = reference_interior.iter().filter(|&&v| v == 0.0).count();
        if zero_refs > 0 {
            warn!("{zero_refs} interior reference samples are zero, ratio will be inf/NaN there");
        }
    }

    if params.parallel {
        Zip::from(result.slice_mut(s![1..rows - 1, 1..cols - 1]))
            .and(measured_interior)
            .and(reference_interior)
            .par_for_each(|ci, &swrb_measured, &swrb_top| *ci = swrb_measured / swrb_top);
    } else {
        for r in 1..rows - 1 {
            for c in 1..cols - 1 {
                let swrb_measured = measured[[r, c]];
                let swrb_top = reference[[r, c]];
                result[[r, c]] = swrb_measured / swrb_top;
            }
        }
    }

    set_novalue_border(&mut result, params.nodata);

    debug!("{:?}", CiSummary::from_grid(result.view(), params.nodata));
    Ok(result)
}

/// Clearness index on grids; the output inherits the input region extent.
///
/// Every extent present on either input must match its grid's shape. The
/// inputs' own `nodata` values are not consulted: their sentinel samples are
/// divided like any other value (set `params.input_novalue` to mask them), and
/// the output sentinel is always `params.nodata`.
pub fn compute_clearness_index(
    measured: &Grid,
    reference: &Grid,
    params: &ClearnessParams,
) -> Result<Grid, ClearnessError> {
    for grid in [measured, reference] {
        if let Some(extent) = &grid.extent {
            check_extent(extent, grid.dim())?;
        }
    }
    let extent = measured.extent.as_ref().or(reference.extent.as_ref()).cloned();

    let data = clearness_index_pure(measured.view(), reference.view(), params)?;
    Ok(Grid {
        data,
        nodata: params.nodata,
        extent,
    })
}

/// Clearness index (PyO3 wrapper).
///
/// Args:
///     measured: 2D float32 array of measured shortwave radiation.
///     reference: 2D float32 array of top-of-atmosphere shortwave, same shape.
///     params: Optional ClearnessParams (defaults: nodata=-9999, no masking, parallel).
///
/// Returns:
///     2D float32 clearness index, no-data on the one-pixel border.
#[pyfunction]
#[pyo3(signature = (measured, reference, params=None))]
pub fn clearness_index<'py>(
    py: Python<'py>,
    measured: PyReadonlyArray2<'py, f32>,
    reference: PyReadonlyArray2<'py, f32>,
    params: Option<PyRef<'py, ClearnessParams>>,
) -> PyResult<Bound<'py, PyArray2<f32>>> {
    let params = params.map(|p| (*p).clone()).unwrap_or_default();
    let result = clearness_index_pure(measured.as_array(), reference.as_array(), &params)?;
    Ok(result.into_pyarray(py))
}

/// Summary statistics of a clearness index grid, skipping no-data.
#[pyfunction]
#[pyo3(signature = (grid, nodata=NODATA))]
pub fn summarize(grid: PyReadonlyArray2<'_, f32>, nodata: f32) -> CiSummary {
    CiSummary::from_grid(grid.as_array(), nodata)
}
