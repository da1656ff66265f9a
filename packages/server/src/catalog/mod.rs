//! Product catalog for the solar panel storefront.
//!
//! The catalog is embedded at compile time from `data/catalog.json` and
//! validated once on startup, so handlers can assume a well formed data set.

pub mod datasheet;

pub use datasheet::{DatasheetRecord, DatasheetRegistry};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

static CATALOG_JSON: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse embedded catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid catalog data: {0}")]
    Invalid(String),
}

/// Extended electrical and mechanical parameters shown on a product page.
///
/// Every field is optional since not all panels publish the full parameter set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PanelDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_cells: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_glass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction_box: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_system_voltage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_series_fuse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_temp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iec_fire_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_tolerance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_coeff_pmax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_coeff_voc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_coeff_isc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_power_voltage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_power_current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_circuit_voltage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_circuit_current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_cables: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pallet_dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolarPanel {
    pub id: String,
    pub brand: String,
    pub series: String,
    pub model: String,
    pub power_range: String,
    pub min_power: u32,
    pub max_power: u32,
    pub cell_type: String,
    pub module_type: String,
    pub efficiency: String,
    pub dimensions: String,
    pub weight: String,
    pub warranty: String,
    pub features: Vec<String>,
    pub applications: Vec<String>,
    /// Filename of the downloadable datasheet, if one is published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasheet: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<PanelDetails>,
}

/// Nominal power bands the storefront lets customers filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
pub enum PowerBand {
    #[serde(rename = "under-450")]
    Under450,
    #[serde(rename = "450-500")]
    From450To500,
    #[serde(rename = "500-600")]
    From500To600,
    #[serde(rename = "over-600")]
    Over600,
}

impl PowerBand {
    /// A panel matches a band when its wattage range overlaps it.
    pub fn matches(self, min_power: u32, max_power: u32) -> bool {
        match self {
            PowerBand::Under450 => max_power < 450,
            PowerBand::From450To500 => min_power < 500 && max_power > 450,
            PowerBand::From500To600 => min_power < 600 && max_power > 500,
            PowerBand::Over600 => min_power > 600,
        }
    }
}

/// Query parameters accepted by the product listing endpoint.
///
/// All filters are optional and combined with logical AND.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Substring match against model and series, case insensitive.
    pub search: Option<String>,
    /// Nominal power band, e.g. `450-500`.
    pub power: Option<PowerBand>,
    /// Substring match against the module type, case insensitive.
    pub module_type: Option<String>,
    /// Substring match against the application list, case insensitive.
    pub application: Option<String>,
    /// Exact series name.
    pub series: Option<String>,
    /// Exact brand name.
    pub brand: Option<String>,
}

impl ProductQuery {
    pub fn matches(&self, panel: &SolarPanel) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !panel.model.to_lowercase().contains(&needle)
                && !panel.series.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(band) = self.power {
            if !band.matches(panel.min_power, panel.max_power) {
                return false;
            }
        }
        if let Some(module_type) = &self.module_type {
            if !panel
                .module_type
                .to_lowercase()
                .contains(&module_type.to_lowercase())
            {
                return false;
            }
        }
        if let Some(application) = &self.application {
            let needle = application.to_lowercase();
            if !panel
                .applications
                .iter()
                .any(|a| a.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        if let Some(series) = &self.series {
            if &panel.series != series {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if &panel.brand != brand {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    panels: Vec<SolarPanel>,
}

impl Catalog {
    /// Parses and validates the embedded catalog.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(CATALOG_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let panels: Vec<SolarPanel> = serde_json::from_str(raw)?;
        if panels.is_empty() {
            return Err(CatalogError::Invalid("catalog contains no panels".into()));
        }
        let mut seen = HashSet::new();
        for panel in &panels {
            if panel.id.trim().is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "panel '{}' has an empty id",
                    panel.model
                )));
            }
            if !seen.insert(panel.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate panel id '{}'",
                    panel.id
                )));
            }
            if panel.min_power > panel.max_power {
                return Err(CatalogError::Invalid(format!(
                    "panel '{}' has min_power {} above max_power {}",
                    panel.id, panel.min_power, panel.max_power
                )));
            }
        }
        Ok(Self { panels })
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SolarPanel> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Returns the panels matching every filter in `query`, in catalog order.
    pub fn filter(&self, query: &ProductQuery) -> Vec<&SolarPanel> {
        self.panels.iter().filter(|p| query.matches(p)).collect()
    }
}
