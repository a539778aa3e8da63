use serde::{Deserialize, Serialize};

// vehicleSummary[]
//  ├── vin
//  ├── distance
//  ├── dealerCd / dealerMarketingName
//  ├── model
//  │    └── marketingName
//  ├── extColor / intColor
//  │    └── marketingName
//  ├── price
//  │    ├── baseMsrp
//  │    ├── totalMsrp
//  │    ├── advertizedPrice
//  │    ├── sellingPrice
//  │    ├── dioTotalMsrp
//  │    └── dioTotalDealerSellingPrice
//  ├── options[]
//  │    ├── optionCd
//  │    ├── marketingName
//  │    ├── marketingLongName
//  │    └── optionType (F | P | D)
//  ├── inventoryStatus
//  └── isPreSold

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInventoryRecord {
    pub vin: String,
    pub distance: f64,
    pub dealer_cd: String,
    pub dealer_marketing_name: String,

    pub model: MarketingName,
    pub ext_color: MarketingName,
    pub int_color: MarketingName,

    pub price: RawPrice,

    #[serde(default)]
    pub options: Option<Vec<RawOption>>,

    #[serde(default)]
    pub inventory_status: Option<String>,
    #[serde(default)]
    pub is_pre_sold: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingName {
    pub marketing_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    pub base_msrp: f64,
    pub total_msrp: f64,
    pub selling_price: f64,

    // The API spells it this way.
    #[serde(default)]
    pub advertized_price: Option<f64>,

    #[serde(default)]
    pub dio_total_msrp: Option<f64>,
    #[serde(default)]
    pub dio_total_dealer_selling_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOption {
    pub option_cd: String,
    pub marketing_name: String,
    #[serde(default)]
    pub marketing_long_name: Option<String>,
    pub option_type: OptionType,
}

/// Where an option gets installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OptionType {
    #[serde(rename = "F")]
    Factory,
    #[serde(rename = "P")]
    Port,
    #[serde(rename = "D")]
    Dealer,
}

impl OptionType {
    /// Factory first, dealer last (mandatory -> optional).
    pub fn rank(self) -> u8 {
        match self {
            OptionType::Factory => 0,
            OptionType::Port => 1,
            OptionType::Dealer => 2,
        }
    }
}
