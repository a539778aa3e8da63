// src/inventory/transform.rs

use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::form_urlencoded;

use super::options::{OptionLookup, VehicleOption};
use super::raw::{OptionType, RawInventoryRecord};

const DETAILS_URL: &str = "https://smartpath.toyota.com/inventory/details";
const MODEL_PREFIX: &str = "Corolla Hybrid ";
const EXTRA_COST_COLOR_MARKER: &str = "[extra_cost_color]";
const EXTRA_COST_COLOR_LABEL: &str = "(+$500)";

static EST_DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}/\d{2}/\d{2} - \d{2}/\d{2}/\d{2}").expect("date range pattern is valid")
});

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("snapshot is not a JSON array")]
    NotAnArray,
    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

/// Lifecycle state derived from the free-text inventory status.
///
/// Declaration order is the sort order: available < transit < build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Available,
    Transit,
    Build,
}

impl Status {
    pub fn from_inventory_status(text: &str) -> Self {
        if text.contains("build") {
            Status::Build
        } else if text.contains("transit") {
            Status::Transit
        } else {
            Status::Available
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Transit => "transit",
            Status::Build => "build",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vehicle, flattened for the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub vin: String,
    pub distance: f64,
    pub dealer: String,
    pub model: String,
    pub color: String,
    pub seating: String,
    pub msrp: f64,
    pub tsrp: f64,
    pub markup: f64,
    pub price: f64,
    pub dio_tsrp: f64,
    pub dio_price: f64,
    pub port_options: Vec<Rc<VehicleOption>>,
    pub dealer_options: Vec<Rc<VehicleOption>>,
    pub factory_options: Vec<Rc<VehicleOption>>,
    pub status: Status,
    pub est_date: String,
    pub presold: bool,
    pub link: String,
}

pub fn est_date(text: &str) -> String {
    EST_DATE_RANGE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn model_name(raw: &str) -> String {
    raw.replacen(MODEL_PREFIX, "", 1)
}

pub fn color_name(raw: &str) -> String {
    raw.replacen(EXTRA_COST_COLOR_MARKER, EXTRA_COST_COLOR_LABEL, 1)
}

pub fn details_link(dealer_cd: &str, vin: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("source", "t1")
        .append_pair("dealerCd", dealer_cd)
        .append_pair("vin", vin)
        .append_pair("type", "new")
        .finish();
    format!("{DETAILS_URL}?{query}")
}

/// Maps one raw record onto a row, resolving its options through `lookup`.
pub fn transform_record(raw: &RawInventoryRecord, lookup: &mut OptionLookup) -> InventoryRow {
    let options = raw
        .options
        .as_deref()
        .map(|options| lookup.normalize(options))
        .unwrap_or_default();

    let of_type = |wanted: OptionType| -> Vec<Rc<VehicleOption>> {
        options
            .iter()
            .filter(|o| o.option_type == wanted)
            .cloned()
            .collect()
    };

    // advertizedPrice of 0 means "not advertised"
    let price = raw
        .price
        .advertized_price
        .filter(|p| *p != 0.0)
        .unwrap_or(raw.price.selling_price);

    let status_text = raw.inventory_status.as_deref().unwrap_or_default();

    InventoryRow {
        vin: raw.vin.clone(),
        distance: raw.distance,
        dealer: raw.dealer_marketing_name.clone(),
        model: model_name(&raw.model.marketing_name),
        color: color_name(&raw.ext_color.marketing_name),
        seating: raw.int_color.marketing_name.clone(),
        msrp: raw.price.base_msrp,
        tsrp: raw.price.total_msrp,
        markup: price - raw.price.total_msrp,
        price,
        dio_tsrp: raw.price.dio_total_msrp.unwrap_or_default(),
        dio_price: raw.price.dio_total_dealer_selling_price.unwrap_or_default(),
        port_options: of_type(OptionType::Port),
        dealer_options: of_type(OptionType::Dealer),
        factory_options: of_type(OptionType::Factory),
        status: Status::from_inventory_status(status_text),
        est_date: est_date(status_text),
        presold: raw.is_pre_sold.unwrap_or(false),
        link: details_link(&raw.dealer_cd, &raw.vin),
    }
}

/// Decodes a whole snapshot and transforms every record with one shared lookup.
///
/// Any record that does not match the raw schema fails the snapshot.
pub fn transform_snapshot(snapshot: Value) -> Result<Vec<InventoryRow>, TransformError> {
    let Value::Array(records) = snapshot else {
        return Err(TransformError::NotAnArray);
    };

    let mut lookup = OptionLookup::new();
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let raw: RawInventoryRecord = serde_json::from_value(record).map_err(|e| {
            TransformError::MalformedRecord {
                index,
                reason: e.to_string(),
            }
        })?;
        rows.push(transform_record(&raw, &mut lookup));
    }

    debug!(
        rows = rows.len(),
        unique_options = lookup.len(),
        "Transformed snapshot"
    );

    Ok(rows)
}
