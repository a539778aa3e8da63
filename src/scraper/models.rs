use serde::{Deserialize, Serialize};
use serde_json::Value;

// response
//  └── data
//       └── locateVehiclesByZip
//            ├── pagination
//            │    ├── pageNo
//            │    └── totalPages
//            └── vehicleSummary[]   (raw inventory records, kept as-is)

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<GraphqlData>,
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlData {
    pub locate_vehicles_by_zip: Option<LocateVehicles>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateVehicles {
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub vehicle_summary: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_no: u32,
    pub total_pages: u32,
}

/// One page of the paginated search.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryPage {
    pub page_no: u32,
    pub total_pages: u32,
    pub vehicles: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateVariables<'a> {
    pub zip_code: &'a str,
    pub brand: &'a str,
    pub page_no: u32,
    pub page_size: u32,
    pub series_codes: &'a str,
    pub distance: u32,
}

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: LocateVariables<'a>,
}
