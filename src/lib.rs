use pyo3::prelude::*;

mod clearness;
mod error;
mod grid;

pub use clearness::{clearness_index_pure, compute_clearness_index, CiSummary, ClearnessParams};
pub use error::ClearnessError;
pub use grid::{is_novalue, replace_novalue, set_novalue_border, Grid, RegionExtent, NODATA};

#[pymodule]
#[pyo3(name = "clearness")]
fn clearness_module(py_module: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register submodules
    register_clearness_module(py_module)?;

    py_module.add("NODATA", NODATA)?;
    py_module.add(
        "__doc__",
        "Clearness index (measured / top-of-atmosphere shortwave) rasters implemented in Rust.",
    )?;

    Ok(())
}

fn register_clearness_module(py_module: &Bound<'_, PyModule>) -> PyResult<()> {
    let submodule = PyModule::new(py_module.py(), "clearness")?;
    submodule.add("__doc__", "Clearness index calculation.")?;
    submodule.add_class::<clearness::ClearnessParams>()?;
    submodule.add_class::<clearness::CiSummary>()?;
    submodule.add_function(wrap_pyfunction!(clearness::clearness_index, &submodule)?)?;
    submodule.add_function(wrap_pyfunction!(clearness::summarize, &submodule)?)?;
    py_module.add_submodule(&submodule)?;
    Ok(())
}
