//! Raster grid with a no-data sentinel and an opaque region descriptor.
//!
//! The region descriptor is carried from input to output untouched; nothing
//! in this crate interprets coordinates or the CRS identifier.

use ndarray::{s, Array2, ArrayView2};

use crate::error::ClearnessError;

/// No-data value used by upstream rasters.
pub const NODATA: f32 = -9999.0;

/// Geographic bounds and resolution of a grid, passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionExtent {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub x_res: f64,
    pub y_res: f64,
    pub rows: usize,
    pub cols: usize,
    /// CRS identifier (e.g. "EPSG:32632"), never parsed here
    pub crs: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub data: Array2<f32>,
    pub nodata: f32,
    pub extent: Option<RegionExtent>,
}

impl Grid {
    pub fn new(data: Array2<f32>, nodata: f32) -> Self {
        Self {
            data,
            nodata,
            extent: None,
        }
    }

    /// Grid of `rows x cols` samples, all set to `nodata`.
    pub fn filled(rows: usize, cols: usize, nodata: f32) -> Self {
        Self::new(Array2::from_elem((rows, cols), nodata), nodata)
    }

    /// Attach a region descriptor. Its rows/cols must match the samples.
    pub fn with_extent(mut self, extent: RegionExtent) -> Result<Self, ClearnessError> {
        check_extent(&extent, self.dim())?;
        self.extent = Some(extent);
        Ok(self)
    }

    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    #[inline]
    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at (row, col), or None when out of bounds or unavailable.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.data
            .get((row, col))
            .copied()
            .filter(|&v| !is_novalue(v, self.nodata))
    }
}

pub(crate) fn check_extent(
    extent: &RegionExtent,
    grid: (usize, usize),
) -> Result<(), ClearnessError> {
    if (extent.rows, extent.cols) != grid {
        return Err(ClearnessError::ExtentMismatch {
            extent: (extent.rows, extent.cols),
            grid,
        });
    }
    Ok(())
}

/// A sample is unavailable if it is NaN or equals the sentinel.
#[inline]
pub fn is_novalue(value: f32, nodata: f32) -> bool {
    value.is_nan() || value == nodata
}

/// Copy of `input` with every `novalue` sample replaced by NaN.
pub fn replace_novalue(input: ArrayView2<f32>, novalue: f32) -> Array2<f32> {
    input.mapv(|v| if v == novalue { f32::NAN } else { v })
}

/// Overwrite the outermost ring of pixels with `nodata`.
pub fn set_novalue_border(grid: &mut Array2<f32>, nodata: f32) {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return;
    }
    grid.slice_mut(s![0, ..]).fill(nodata);
    grid.slice_mut(s![rows - 1, ..]).fill(nodata);
    grid.slice_mut(s![.., 0]).fill(nodata);
    grid.slice_mut(s![.., cols - 1]).fill(nodata);
}
