//! Loading of spiral design parameters from TOML files.

use std::{ fs::read_to_string, path::Path };
use serde::de::DeserializeOwned;
use thiserror::Error;
use vdspiral::params::VdsParams;

/// Returned when a parameter file can't be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot load the parameter file: {0}")]
    FileLoad(#[from] std::io::Error),

    #[error("cannot read the parameter file: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("invalid parameters: {0}")]
    Invalid(#[from] vdspiral::error::InputError),
}

/// Parse any deserializable parameter type from a TOML string.
pub fn from_str<P>(src: &str) -> Result<P, LoadError>
where P: DeserializeOwned
{
    Ok(toml::from_str(src)?)
}

/// Load and validate spiral design parameters from a TOML file.
pub fn load<P>(path: P) -> Result<VdsParams, LoadError>
where P: AsRef<Path>
{
    let src = read_to_string(path)?;
    let params: VdsParams = from_str(&src)?;
    params.validate()?;
    Ok(params)
}
