// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line and environment configuration.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

pub const USAGE: &str = "\
Usage: exterior-dims <scene.json> [options]

Options:
  --config <file.xml>        Configuration file (default: $EXTERIOR_DIMS_DATA_DIR/DimConfigurations/ExteriorPlanDimensions.xml)
  --configuration <id>       Configuration to use instead of EXTERIOR_DIMS_DEFAULT_EXTERIOR_CONFIGURATION
  --export-walls <file.xml>  Write the faces of the selected walls as an XML curve dump
  -h, --help                 Show this message

Environment:
  EXTERIOR_DIMS_DATA_DIR     Data directory (default: ./.exterior-dims)
  EXTERIOR_DIMS_MODEL_UNITS  'mm' or 'ft' (default: mm)
  EXTERIOR_DIMS_MIN_WALL_WIDTH, EXTERIOR_DIMS_EXTERIOR_FACE_MIN_WIDTH_BETWEEN,
  EXTERIOR_DIMS_EXTERIOR_MIN_WIDTH_FACE_REMOVE  Face filtering settings
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelUnits {
    Millimetres,
    Feet,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scene: PathBuf,
    /// Explicit configuration file, otherwise the store in `data_dir`.
    pub config_file: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub configuration: Option<Uuid>,
    pub export_walls: Option<PathBuf>,
    pub units: ModelUnits,
}

impl Config {
    /// `None` when help was requested.
    pub fn from_args<I>(args: I) -> Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut scene = None;
        let mut config_file = None;
        let mut configuration = None;
        let mut export_walls = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .with_context(|| format!("{flag} needs a value"))
            };
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--config" => config_file = Some(PathBuf::from(value("--config")?)),
                "--configuration" => {
                    let id = value("--configuration")?;
                    configuration = Some(
                        Uuid::parse_str(&id)
                            .with_context(|| format!("'{id}' is not a configuration id"))?,
                    );
                }
                "--export-walls" => export_walls = Some(PathBuf::from(value("--export-walls")?)),
                flag if flag.starts_with('-') => bail!("unknown option {flag}"),
                path if scene.is_none() => scene = Some(PathBuf::from(path)),
                extra => bail!("unexpected argument {extra}"),
            }
        }

        let Some(scene) = scene else {
            bail!("missing scene file");
        };
        Ok(Some(Self {
            scene,
            config_file,
            data_dir: std::env::var("EXTERIOR_DIMS_DATA_DIR")
                .unwrap_or_else(|_| "./.exterior-dims".into())
                .into(),
            configuration,
            export_walls,
            units: match std::env::var("EXTERIOR_DIMS_MODEL_UNITS").as_deref() {
                Ok("ft") | Ok("feet") => ModelUnits::Feet,
                _ => ModelUnits::Millimetres,
            },
        }))
    }
}
