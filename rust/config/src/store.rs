// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! XML persistence of exterior configurations.
//!
//! The file is shared with other dimensioning commands, so saving only
//! replaces the `ExteriorConfigurations` element and leaves its siblings
//! untouched.

use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chain::{ChainMode, DimensionChain, DEFAULT_ELEMENT_OFFSET};
use crate::chains::ChainList;
use crate::configuration::ExteriorConfiguration;
use crate::error::{Error, Result};

const ROOT: &str = "Configurations";
const EXTERIOR_CONFIGURATIONS: &str = "ExteriorConfigurations";

/// Sub directory and file name used under a user data directory.
pub const STORE_DIRECTORY: &str = "DimConfigurations";
pub const STORE_FILE_NAME: &str = "ExteriorPlanDimensions.xml";

// ============================================================================
// XML shape
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ConfigurationsXml {
    #[serde(rename = "ExteriorConfigurations", default)]
    exterior: Option<ExteriorConfigurationsXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "ExteriorConfigurations")]
struct ExteriorConfigurationsXml {
    #[serde(rename = "ExteriorConfiguration", default)]
    items: Vec<ExteriorConfigurationXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExteriorConfigurationXml {
    #[serde(rename = "@Id", default)]
    id: Option<String>,
    #[serde(rename = "@Name", default)]
    name: Option<String>,
    #[serde(rename = "@TopDimensions", default)]
    top: Option<String>,
    #[serde(rename = "@BottomDimensions", default)]
    bottom: Option<String>,
    #[serde(rename = "@LeftDimensions", default)]
    left: Option<String>,
    #[serde(rename = "@RightDimensions", default)]
    right: Option<String>,
    #[serde(rename = "Chain", default)]
    chains: Vec<ChainXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ChainXml {
    #[serde(rename = "@Walls", default)]
    walls: Option<String>,
    #[serde(rename = "@IntersectingWalls", default)]
    intersecting_walls: Option<String>,
    #[serde(rename = "@Openings", default)]
    openings: Option<String>,
    #[serde(rename = "@Grids", default)]
    grids: Option<String>,
    #[serde(rename = "@ExtremeGrids", default)]
    extreme_grids: Option<String>,
    #[serde(rename = "@ElementOffset", default)]
    element_offset: Option<String>,
    #[serde(rename = "@Overall", default)]
    overall: Option<String>,
}

/// Case-insensitive `true`/`false`, surrounding whitespace ignored.
fn parse_flag(value: Option<&str>) -> Option<bool> {
    let value = value?.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn format_flag(value: bool) -> Option<String> {
    Some(if value { "True" } else { "False" }.to_owned())
}

impl ChainXml {
    fn to_chain(&self) -> DimensionChain {
        let flag = |v: &Option<String>| parse_flag(v.as_deref());
        let walls = flag(&self.walls).unwrap_or(true);
        let intersecting_walls = flag(&self.intersecting_walls).unwrap_or(false);
        let openings = flag(&self.openings).unwrap_or(false);
        let grids = flag(&self.grids).unwrap_or(false);
        let extreme_grids = flag(&self.extreme_grids).unwrap_or(false);
        let overall = flag(&self.overall).unwrap_or(false);

        let element_offset = self
            .element_offset
            .as_deref()
            .and_then(|v| v.trim().parse::<i32>().ok())
            .unwrap_or(DEFAULT_ELEMENT_OFFSET);

        // Hand-edited files may set several primary flags; the narrowest wins.
        let mode = if extreme_grids {
            ChainMode::ExtremeGrids
        } else if overall {
            ChainMode::Overall
        } else if grids {
            ChainMode::Grids
        } else if walls {
            ChainMode::Walls {
                intersecting_walls,
                openings,
            }
        } else {
            ChainMode::ExtremeGrids
        };

        DimensionChain::new(mode, element_offset)
    }

    fn from_chain(chain: &DimensionChain) -> Self {
        Self {
            walls: format_flag(chain.walls()),
            intersecting_walls: format_flag(chain.intersecting_walls()),
            openings: format_flag(chain.openings()),
            grids: format_flag(chain.grids()),
            extreme_grids: format_flag(chain.extreme_grids()),
            element_offset: Some(chain.element_offset().to_string()),
            overall: format_flag(chain.overall()),
        }
    }
}

impl ExteriorConfigurationXml {
    fn to_configuration(&self) -> Result<ExteriorConfiguration> {
        let raw_id = self.id.as_deref().ok_or(Error::MissingId)?;
        let id = Uuid::parse_str(raw_id.trim()).map_err(|source| Error::InvalidId {
            value: raw_id.to_owned(),
            source,
        })?;
        let flag = |v: &Option<String>| parse_flag(v.as_deref());

        Ok(ExteriorConfiguration {
            id,
            name: self.name.clone().unwrap_or_default(),
            top_dimensions: flag(&self.top).unwrap_or(false),
            bottom_dimensions: flag(&self.bottom).unwrap_or(true),
            left_dimensions: flag(&self.left).unwrap_or(true),
            right_dimensions: flag(&self.right).unwrap_or(false),
            chains: ChainList::from_chains(self.chains.iter().map(ChainXml::to_chain).collect()),
        })
    }

    fn from_configuration(config: &ExteriorConfiguration) -> Self {
        Self {
            id: Some(config.id.to_string()),
            name: Some(config.name.clone()),
            top: format_flag(config.top_dimensions),
            bottom: format_flag(config.bottom_dimensions),
            left: format_flag(config.left_dimensions),
            right: format_flag(config.right_dimensions),
            chains: config.chains.iter().map(ChainXml::from_chain).collect(),
        }
    }
}

// ============================================================================
// Parsing and writing
// ============================================================================

/// Reads every exterior configuration from a settings document.
pub fn parse_configurations(document: &str) -> Result<Vec<ExteriorConfiguration>> {
    let parsed: ConfigurationsXml = quick_xml::de::from_str(document)?;
    parsed
        .exterior
        .map(|e| e.items)
        .unwrap_or_default()
        .iter()
        .map(ExteriorConfigurationXml::to_configuration)
        .collect()
}

/// The `ExteriorConfigurations` element for `configurations`.
pub fn configurations_to_xml(configurations: &[ExteriorConfiguration]) -> Result<String> {
    let element = ExteriorConfigurationsXml {
        items: configurations
            .iter()
            .map(ExteriorConfigurationXml::from_configuration)
            .collect(),
    };
    Ok(quick_xml::se::to_string(&element)?)
}

/// Replaces the `ExteriorConfigurations` child of the root element with
/// `element`, appending it as the root's last child.
pub fn splice_exterior_configurations(document: &str, element: &str) -> Result<String> {
    let mut reader = Reader::from_str(document);
    let mut depth = 0usize;
    let mut existing: Option<(usize, usize)> = None;
    let mut root_close: Option<usize> = None;
    let mut empty_root: Option<(usize, usize)> = None;

    loop {
        let before = reader.buffer_position();
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 1 && e.name().as_ref() == EXTERIOR_CONFIGURATIONS.as_bytes() {
                    reader.read_to_end(e.name())?;
                    existing = Some((before, reader.buffer_position()));
                } else {
                    depth += 1;
                }
            }
            Event::Empty(e) => {
                if depth == 0 && e.name().as_ref() == ROOT.as_bytes() {
                    empty_root = Some((before, reader.buffer_position()));
                } else if depth == 1 && e.name().as_ref() == EXTERIOR_CONFIGURATIONS.as_bytes() {
                    existing = Some((before, reader.buffer_position()));
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_close = Some(before);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((start, end)) = empty_root {
        return Ok(format!(
            "{}<{ROOT}>{element}</{ROOT}>{}",
            &document[..start],
            &document[end..]
        ));
    }

    let close = match root_close {
        Some(close) => close,
        None => return Ok(format!("<{ROOT}>{element}</{ROOT}>")),
    };

    let mut out = String::with_capacity(document.len() + element.len());
    match existing {
        Some((start, end)) => {
            out.push_str(&document[..start]);
            out.push_str(&document[end..close]);
        }
        None => out.push_str(&document[..close]),
    }
    out.push_str(element);
    out.push_str(&document[close..]);
    Ok(out)
}

/// Picks the configuration named by the user's default setting.
///
/// No default set means nothing is selected. A default that matches none of
/// the stored configurations falls back to the first one.
pub fn select_default(
    configurations: &[ExteriorConfiguration],
    default_id: Option<Uuid>,
) -> Option<&ExteriorConfiguration> {
    let id = default_id?;
    configurations
        .iter()
        .find(|c| c.id == id)
        .or_else(|| configurations.first())
}

// ============================================================================
// File store
// ============================================================================

/// Configuration file on disk.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    path: PathBuf,
}

impl ConfigurationStore {
    /// Opens `path`, creating its directory and an empty `<Configurations/>`
    /// document when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&path, format!("<{ROOT}/>"))?;
            tracing::debug!(path = %path.display(), "created configuration file");
        }
        Ok(Self { path })
    }

    /// Store at `<data_dir>/DimConfigurations/ExteriorPlanDimensions.xml`.
    pub fn in_data_directory(data_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open(
            data_dir
                .as_ref()
                .join(STORE_DIRECTORY)
                .join(STORE_FILE_NAME),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<ExteriorConfiguration>> {
        let document = std::fs::read_to_string(&self.path)?;
        let configurations = parse_configurations(&document)?;
        tracing::debug!(count = configurations.len(), "loaded exterior configurations");
        Ok(configurations)
    }

    /// Always rewrites the whole `ExteriorConfigurations` element.
    pub fn save(&self, configurations: &[ExteriorConfiguration]) -> Result<()> {
        let document = std::fs::read_to_string(&self.path)?;
        let element = configurations_to_xml(configurations)?;
        let updated = splice_exterior_configurations(&document, &element)?;
        std::fs::write(&self.path, updated)?;
        tracing::debug!(count = configurations.len(), "saved exterior configurations");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "4f1c2d3e-5a6b-4c7d-8e9f-0a1b2c3d4e5f";

    #[test]
    fn test_flag_parsing() {
        assert_eq!(parse_flag(Some("True")), Some(true));
        assert_eq!(parse_flag(Some(" false ")), Some(false));
        assert_eq!(parse_flag(Some("yes")), None);
        assert_eq!(parse_flag(None), None);
    }

    #[test]
    fn test_chain_defaults() {
        let xml = format!(
            r#"<Configurations><ExteriorConfigurations>
                 <ExteriorConfiguration Id="{ID}" Name="A">
                   <Chain/>
                   <Chain Walls="garbage" ElementOffset="x"/>
                   <Chain Walls="False"/>
                   <Chain Grids="true" Walls="true"/>
                 </ExteriorConfiguration>
               </ExteriorConfigurations></Configurations>"#
        );
        let configs = parse_configurations(&xml).unwrap();
        let chains = configs[0].chains.as_slice();
        assert_eq!(chains.len(), 4);
        assert_eq!(chains[0], DimensionChain::default());
        assert_eq!(chains[1], DimensionChain::default());
        assert!(chains[2].extreme_grids());
        assert!(chains[3].grids());
    }

    #[test]
    fn test_configuration_defaults() {
        let xml = format!(
            r#"<Configurations><ExteriorConfigurations><ExteriorConfiguration Id="{ID}"/></ExteriorConfigurations></Configurations>"#
        );
        let configs = parse_configurations(&xml).unwrap();
        let config = &configs[0];
        assert_eq!(config.id.to_string(), ID);
        assert_eq!(config.name, "");
        assert!(config.bottom_dimensions && config.left_dimensions);
        assert!(!config.top_dimensions && !config.right_dimensions);
        assert_eq!(config.chains.len(), 1);
    }

    #[test]
    fn test_missing_and_bad_ids() {
        let missing = "<Configurations><ExteriorConfigurations><ExteriorConfiguration Name=\"x\"/></ExteriorConfigurations></Configurations>";
        assert!(matches!(parse_configurations(missing), Err(Error::MissingId)));

        let bad = "<Configurations><ExteriorConfigurations><ExteriorConfiguration Id=\"nope\"/></ExteriorConfigurations></Configurations>";
        assert!(matches!(parse_configurations(bad), Err(Error::InvalidId { .. })));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_configurations("<Configurations/>").unwrap().is_empty());
    }

    #[test]
    fn test_splice_into_empty_root() {
        let out = splice_exterior_configurations("<Configurations/>", "<ExteriorConfigurations/>")
            .unwrap();
        assert_eq!(out, "<Configurations><ExteriorConfigurations/></Configurations>");
    }

    #[test]
    fn test_splice_keeps_siblings() {
        let doc = "<?xml version=\"1.0\"?>\n<Configurations><Other A=\"1\"><X/></Other><ExteriorConfigurations><ExteriorConfiguration Id=\"old\"/></ExteriorConfigurations><Tail/></Configurations>";
        let out = splice_exterior_configurations(doc, "<ExteriorConfigurations/>").unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\"?>\n<Configurations><Other A=\"1\"><X/></Other><Tail/><ExteriorConfigurations/></Configurations>"
        );
    }

    #[test]
    fn test_select_default() {
        let a = ExteriorConfiguration::new("a");
        let b = ExteriorConfiguration::new("b");
        let configs = vec![a.clone(), b.clone()];

        assert!(select_default(&configs, None).is_none());
        assert_eq!(select_default(&configs, Some(b.id)).map(|c| &c.name), Some(&b.name));
        assert_eq!(
            select_default(&configs, Some(Uuid::new_v4())).map(|c| &c.name),
            Some(&a.name)
        );
        assert!(select_default(&[], Some(a.id)).is_none());
    }
}
