use cordex_core::python::{catalog, climatology, labels};
use pyo3::prelude::*;
use pyo3::wrap_pymodule;

#[pymodule]
#[pyo3(name = "_lib")]
fn cordex_prep(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_wrapped(wrap_pymodule!(climatology))?;
    m.add_wrapped(wrap_pymodule!(catalog))?;
    m.add_wrapped(wrap_pymodule!(labels))?;

    set_path(m, "cordex_prep._lib.climatology", "climatology")?;
    set_path(m, "cordex_prep._lib.catalog", "catalog")?;
    set_path(m, "cordex_prep._lib.labels", "labels")?;

    Ok(())
}

/// Register a submodule in `sys.modules` so `import cordex_prep._lib.<name>` works
fn set_path(m: &Bound<'_, PyModule>, path: &str, module: &str) -> PyResult<()> {
    let code = format!(
        "\
import sys
sys.modules['{path}'] = {module}
    "
    );
    m.py().run_bound(&code, None, Some(&m.dict()))
}
