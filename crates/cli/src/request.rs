//! JSON request and response types.
//!
//! Requests describe lengths in inches; they are converted to layout units
//! with the request's resolution before reaching the engine.

use std::fs;
use std::path::Path;

use printpack_core::{Config, Item, Layout, LayoutSummary, PageSize, Resolution};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request format version.
pub const API_VERSION: &str = "1.0";

/// Errors that can occur while reading a layout request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{0}")]
    Layout(#[from] printpack_core::Error),

    #[error("Unknown page size: {0}")]
    UnknownPage(String),
}

/// One photograph in a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemRequest {
    /// Identifier echoed back in the layout.
    pub id: String,

    /// Original pixel width.
    pub width: u32,

    /// Original pixel height.
    pub height: u32,

    /// Target diagonal in inches; the global diagonal when absent.
    #[serde(default)]
    pub diagonal: Option<f64>,
}

/// Page and spacing settings, in inches.
///
/// Every field is optional so a request file can override only some of the
/// command-line settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigRequest {
    /// Preset page name (letter, legal, a3, a4, a5).
    #[serde(default)]
    pub page: Option<String>,

    /// Custom page width in inches; requires `page_height`.
    #[serde(default)]
    pub page_width: Option<f64>,

    /// Custom page height in inches; requires `page_width`.
    #[serde(default)]
    pub page_height: Option<f64>,

    /// Turn the page sideways.
    #[serde(default)]
    pub landscape: Option<bool>,

    /// Layout units per inch.
    #[serde(default)]
    pub dpi: Option<f64>,

    /// Page margin in inches.
    #[serde(default)]
    pub margin: Option<f64>,

    /// Gap between photos in inches.
    #[serde(default)]
    pub gap: Option<f64>,

    /// Default photo diagonal in inches.
    #[serde(default)]
    pub diagonal: Option<f64>,
}

impl ConfigRequest {
    /// Returns `self` with every field set in `overrides` replaced.
    pub fn overridden_by(self, overrides: &ConfigRequest) -> Self {
        Self {
            page: overrides.page.clone().or(self.page),
            page_width: overrides.page_width.or(self.page_width),
            page_height: overrides.page_height.or(self.page_height),
            landscape: overrides.landscape.or(self.landscape),
            dpi: overrides.dpi.or(self.dpi),
            margin: overrides.margin.or(self.margin),
            gap: overrides.gap.or(self.gap),
            diagonal: overrides.diagonal.or(self.diagonal),
        }
    }

    /// Returns the resolution, 96 units per inch unless set.
    pub fn resolution(&self) -> Resolution {
        self.dpi.map(Resolution::new).unwrap_or_default()
    }

    /// Returns the physical page size.
    pub fn page_size(&self) -> Result<PageSize, RequestError> {
        let page = match (self.page_width, self.page_height) {
            (Some(w), Some(h)) => PageSize::custom_inches(w, h),
            _ => match &self.page {
                Some(name) => PageSize::from_name(name)
                    .ok_or_else(|| RequestError::UnknownPage(name.clone()))?,
                None => PageSize::LETTER,
            },
        };
        Ok(if self.landscape.unwrap_or(false) {
            page.landscape()
        } else {
            page
        })
    }

    /// Builds and validates the engine configuration.
    pub fn to_config(&self) -> Result<Config, RequestError> {
        let res = self.resolution();
        let config = Config::new()
            .with_page(self.page_size()?, res)
            .with_margin(res.inches(self.margin.unwrap_or(0.1)))
            .with_gap(res.inches(self.gap.unwrap_or(0.0)))
            .with_target_diagonal(res.inches(self.diagonal.unwrap_or(5.0)));
        config.validate()?;
        Ok(config)
    }
}

/// A full layout request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutRequest {
    /// Request format version.
    #[serde(default)]
    pub version: Option<String>,

    /// Photographs to lay out, in placement order.
    pub items: Vec<ItemRequest>,

    /// Settings overriding the command line.
    #[serde(default)]
    pub config: Option<ConfigRequest>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequestFile {
    Full(LayoutRequest),
    Items(Vec<ItemRequest>),
}

impl LayoutRequest {
    /// Parses a request, accepting either a full object or a bare item array.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        let request = match serde_json::from_str::<RequestFile>(json)? {
            RequestFile::Full(request) => request,
            RequestFile::Items(items) => LayoutRequest {
                version: None,
                items,
                config: None,
            },
        };
        if let Some(version) = &request.version {
            if version != API_VERSION {
                log::warn!("request version {} differs from {}", version, API_VERSION);
            }
        }
        Ok(request)
    }

    /// Reads a request from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RequestError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Converts the items to engine items using `resolution`.
    pub fn to_items(&self, resolution: Resolution) -> Result<Vec<Item>, RequestError> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, req)| {
                if req.id.trim().is_empty() {
                    return Err(printpack_core::Error::InvalidItem(format!(
                        "item {} has an empty id",
                        i
                    ))
                    .into());
                }
                let item = Item::new(req.id.clone(), req.width, req.height);
                Ok(match req.diagonal {
                    Some(d) => item.with_diagonal(resolution.inches(d)),
                    None => item,
                })
            })
            .collect()
    }
}

/// A layout written back to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResponse {
    /// Response format version.
    pub version: String,

    /// Units per inch used for every length below.
    pub units_per_inch: f64,

    /// Page width in layout units.
    pub page_width: f64,

    /// Page height in layout units.
    pub page_height: f64,

    /// Page margin in layout units.
    pub margin: f64,

    /// The computed layout.
    pub layout: Layout,

    /// Summary statistics.
    pub summary: LayoutSummary,
}

impl LayoutResponse {
    /// Creates a response for `layout` computed with `config`.
    pub fn new(layout: Layout, config: &Config, resolution: Resolution) -> Self {
        Self {
            version: API_VERSION.to_string(),
            units_per_inch: resolution.units_per_inch(),
            page_width: config.page_width,
            page_height: config.page_height,
            margin: config.margin,
            summary: layout.summary(),
            layout,
        }
    }

    /// Writes the response as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), RequestError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use printpack_core::{DiagonalSize, LayoutEngine};

    #[test]
    fn test_parse_full_request() {
        let json = r#"{
            "version": "1.0",
            "items": [
                {"id": "a.jpg", "width": 4000, "height": 3000},
                {"id": "b.jpg", "width": 3000, "height": 4000, "diagonal": 7.0}
            ],
            "config": {"page": "a4", "margin": 0.25}
        }"#;

        let request = LayoutRequest::from_json(json).unwrap();

        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[1].diagonal, Some(7.0));
        let config = request.config.unwrap();
        assert_eq!(config.page.as_deref(), Some("a4"));
        assert_eq!(config.margin, Some(0.25));
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{"id": "x", "width": 10, "height": 20}]"#;
        let request = LayoutRequest::from_json(json).unwrap();
        assert_eq!(request.items.len(), 1);
        assert!(request.config.is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            LayoutRequest::from_json("{\"items\": 3}"),
            Err(RequestError::JsonError(_))
        ));
    }

    #[test]
    fn test_to_items_converts_inches() {
        let request = LayoutRequest::from_json(
            r#"[{"id": "a", "width": 10, "height": 10, "diagonal": 2.0},
                {"id": "b", "width": 10, "height": 10}]"#,
        )
        .unwrap();

        let items = request.to_items(Resolution::new(300.0)).unwrap();

        assert_eq!(items[0].target_diagonal, DiagonalSize::Custom(600.0));
        assert_eq!(items[1].target_diagonal, DiagonalSize::Global);
    }

    #[test]
    fn test_empty_id_rejected() {
        let request =
            LayoutRequest::from_json(r#"[{"id": " ", "width": 10, "height": 10}]"#).unwrap();
        assert!(matches!(
            request.to_items(Resolution::SCREEN),
            Err(RequestError::Layout(printpack_core::Error::InvalidItem(_)))
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config = ConfigRequest::default().to_config().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_override() {
        let flags = ConfigRequest {
            page: Some("letter".into()),
            margin: Some(0.5),
            gap: Some(0.1),
            ..Default::default()
        };
        let file = ConfigRequest {
            margin: Some(0.25),
            landscape: Some(true),
            ..Default::default()
        };

        let merged = flags.overridden_by(&file);
        let config = merged.to_config().unwrap();

        assert_relative_eq!(config.margin, 24.0);
        assert_relative_eq!(config.gap, 9.6, epsilon = 1e-9);
        assert_relative_eq!(config.page_width, 1056.0);
        assert_relative_eq!(config.page_height, 816.0);
    }

    #[test]
    fn test_custom_page_and_unknown_preset() {
        let custom = ConfigRequest {
            page_width: Some(4.0),
            page_height: Some(6.0),
            dpi: Some(300.0),
            ..Default::default()
        };
        let config = custom.to_config().unwrap();
        assert_relative_eq!(config.page_width, 1200.0);
        assert_relative_eq!(config.page_height, 1800.0);

        let unknown = ConfigRequest {
            page: Some("tabloid".into()),
            ..Default::default()
        };
        assert!(matches!(
            unknown.to_config(),
            Err(RequestError::UnknownPage(_))
        ));

        let negative = ConfigRequest {
            gap: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(negative.to_config(), Err(RequestError::Layout(_))));
    }

    #[test]
    fn test_response_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");

        let config = Config::default();
        let layout = LayoutEngine::new(config.clone())
            .layout(&[Item::new("a", 4000, 3000)])
            .unwrap();
        let response = LayoutResponse::new(layout.clone(), &config, Resolution::SCREEN);
        response.save_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: LayoutResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back.layout, layout);
        assert_eq!(back.summary.placed, 1);
        assert_eq!(back.units_per_inch, 96.0);
    }
}
