//! Structured datasheet content keyed by the published PDF filename.
//!
//! Product pages render these tables inline so customers can compare
//! electrical parameters without opening the PDF.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CatalogError;

static DATASHEETS_JSON: &str = include_str!("../../data/datasheets.json");

/// One column of the electrical characteristics table (values at STC).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PowerPoint {
    /// Nominal maximum power in watts.
    pub power: u32,
    pub vmp: String,
    pub imp: String,
    pub voc: String,
    pub isc: String,
    pub efficiency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MechanicalSpecs {
    pub cell_type: String,
    pub cells: String,
    pub dimensions: String,
    pub weight: String,
    pub front_glass: String,
    pub frame: String,
    pub junction_box: String,
    pub protection_class: String,
    pub iec_fire_type: String,
    pub operating_temp: String,
    pub max_system_voltage: String,
    pub max_series_fuse: String,
    pub power_tolerance: String,
    pub temp_coeff_pmax: String,
    pub temp_coeff_voc: String,
    pub temp_coeff_isc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyTerms {
    pub product: String,
    pub power: String,
    pub first_year_degradation: String,
    pub annual_degradation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackagingSpecs {
    pub pallet_dimensions: String,
    pub packing_detail: String,
    pub output_cables: String,
    pub connector_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatasheetRecord {
    pub series: String,
    pub power_range: String,
    pub module_type: String,
    pub cell_type: String,
    pub specifications: Vec<PowerPoint>,
    pub mechanical_specs: MechanicalSpecs,
    pub features: Vec<String>,
    pub warranty: WarrantyTerms,
    pub certifications: Vec<String>,
    pub packaging: PackagingSpecs,
}

#[derive(Debug, Clone)]
pub struct DatasheetRegistry {
    records: HashMap<String, DatasheetRecord>,
}

impl DatasheetRegistry {
    /// Parses and validates the embedded datasheet tables.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(DATASHEETS_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let records: HashMap<String, DatasheetRecord> = serde_json::from_str(raw)?;
        for (filename, record) in &records {
            if filename.trim().is_empty() {
                return Err(CatalogError::Invalid(
                    "datasheet entry has an empty filename key".into(),
                ));
            }
            if record.specifications.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "datasheet '{filename}' has no power points"
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn get(&self, filename: &str) -> Option<&DatasheetRecord> {
        self.records.get(filename)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
