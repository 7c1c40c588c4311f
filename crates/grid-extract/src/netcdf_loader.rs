//! NetCDF grid files read through the native netcdf library.
//!
//! Every numeric variable is read as f64. Packed variables are unpacked with
//! `scale_factor`/`add_offset`, and raw `_FillValue`/`missing_value` entries
//! become NaN before unpacking. A one-dimensional variable named after its own
//! dimension is a coordinate; `time` is decoded from its CF `units`.

use std::path::Path;
use tracing::{debug, info};

use crate::axes::TIME_AXIS;
use crate::cf_time::decode_cf_time;
use crate::dataset::{CoordinateAxis, GridVariable, GriddedDataset};
use crate::error::{GridError, Result};
use crate::loader::GridLoader;

/// Loads `.nc` files with libnetcdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetCdfLoader;

impl NetCdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl GridLoader for NetCdfLoader {
    fn load(&self, path: &Path) -> Result<GriddedDataset> {
        let file = netcdf::open(path)
            .map_err(|e| GridError::load(format!("failed to open {}: {}", path.display(), e)))?;

        let mut dataset = GriddedDataset::new();

        for var in file.variables() {
            let name = var.name();
            let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
            let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

            let raw: Vec<f64> = match var.get_values::<f64, _>(..) {
                Ok(values) => values,
                Err(e) => {
                    debug!(variable = %name, error = %e, "Skipping non-numeric variable");
                    continue;
                }
            };

            let is_coordinate = dims.len() == 1 && dims[0] == name;

            if is_coordinate && name == TIME_AXIS {
                let units = get_str_attr(&var, "units").ok_or_else(|| {
                    GridError::load(format!("'{}' in {} has no units", name, path.display()))
                })?;
                dataset.insert_coord(name, CoordinateAxis::Time(decode_cf_time(&raw, &units)?));
                continue;
            }

            let values = unpack(&var, raw);

            if is_coordinate {
                dataset.insert_coord(name, CoordinateAxis::Numeric(values));
            } else {
                dataset.insert_variable(name, GridVariable::new(&dims, shape, values)?);
            }
        }

        info!(
            path = %path.display(),
            coords = ?dataset.coord_names().collect::<Vec<_>>(),
            variables = ?dataset.variable_names().collect::<Vec<_>>(),
            "Loaded NetCDF grid"
        );

        Ok(dataset)
    }
}

/// Mask fill values to NaN, then apply scale and offset.
fn unpack(var: &netcdf::Variable, raw: Vec<f64>) -> Vec<f64> {
    let fill_value = get_f64_attr(var, "_FillValue");
    let missing_value = get_f64_attr(var, "missing_value");
    let scale_factor = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);

    raw.into_iter()
        .map(|val| {
            if Some(val) == fill_value || Some(val) == missing_value {
                f64::NAN
            } else {
                val * scale_factor + add_offset
            }
        })
        .collect()
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when probing optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
