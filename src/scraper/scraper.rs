// scraper.rs
use crate::config::Config;
use crate::scraper::models::{
    GraphqlRequest, GraphqlResponse, InventoryPage, LocateVariables,
};
use crate::scraper::ScraperError;
use crate::inventory::SnapshotStore;
use chrono::{Local, NaiveDate};
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use reqwest::StatusCode;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

const BRAND: &str = "TOYOTA";
const PAGE_SIZE: u32 = 50;

const LOCATE_VEHICLES_QUERY: &str = r#"
query locateVehiclesByZip($zipCode: String, $brand: String, $pageNo: Int, $pageSize: Int, $seriesCodes: String, $distance: Int) {
  locateVehiclesByZip(zipCode: $zipCode, brand: $brand, pageNo: $pageNo, pageSize: $pageSize, seriesCodes: $seriesCodes, distance: $distance) {
    pagination { pageNo pageSize totalPages totalRecords }
    vehicleSummary {
      vin stockNum brand year isPreSold inventoryStatus distance
      dealerCd dealerMarketingName dealerWebsite
      model { modelCd marketingName marketingTitle }
      extColor { colorCd marketingName colorHexCd }
      intColor { colorCd marketingName colorHexCd }
      price {
        advertizedPrice nonSpAdvertizedPrice totalMsrp sellingPrice
        dph dioTotalMsrp dioTotalDealerSellingPrice dealerCashApplied baseMsrp
      }
      options { optionCd marketingName marketingLongName optionType packageInd }
    }
  }
}
"#;

/// Anything that can hand out numbered inventory pages.
pub trait PageSource {
    fn fetch_page(&self, page_no: u32) -> Result<InventoryPage, ScraperError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub max_backoff: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_backoff: Duration::from_secs(10),
            max_jitter: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    fn delay(&self, attempt: u32) -> Duration {
        let base = std::cmp::min(Duration::from_secs(2 * u64::from(attempt)), self.max_backoff);
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=jitter_ms)
        };
        base + Duration::from_millis(jitter)
    }
}

pub struct InventoryScraper {
    client: Client,
    graphql_url: String,
    zip_code: String,
    series_code: String,
    distance: u32,
}

impl InventoryScraper {
    pub fn new(config: &Config) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.toyota.com"));
        let referer = format!("{}/{}", config.inventory_url.trim_end_matches('/'), config.model);
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer)
                .map_err(|e| ScraperError::Network(format!("invalid referer '{referer}': {e}")))?,
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self {
            client,
            graphql_url: config.graphql_url.clone(),
            zip_code: config.zipcode.clone(),
            series_code: config.model.clone(),
            distance: config.radius,
        })
    }
}

impl PageSource for InventoryScraper {
    fn fetch_page(&self, page_no: u32) -> Result<InventoryPage, ScraperError> {
        let body = GraphqlRequest {
            query: LOCATE_VEHICLES_QUERY,
            variables: LocateVariables {
                zip_code: &self.zip_code,
                brand: BRAND,
                page_no,
                page_size: PAGE_SIZE,
                series_codes: &self.series_code,
                distance: self.distance,
            },
        };

        let resp = self
            .client
            .post(&self.graphql_url)
            .json(&body)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN {
            return Err(ScraperError::Blocked(format!("HTTP {status} from {}", self.graphql_url)));
        }

        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::Network(format!("HTTP {status}: {text}")));
        }

        parse_page(&text)
    }
}

pub fn parse_page(text: &str) -> Result<InventoryPage, ScraperError> {
    let resp: GraphqlResponse =
        serde_json::from_str(text).map_err(|e| ScraperError::JsonParse(e.to_string()))?;

    if let Some(errors) = resp.errors.filter(|e| !e.is_empty()) {
        return Err(ScraperError::UnexpectedShape(format!(
            "GraphQL errors: {}",
            Value::Array(errors)
        )));
    }

    let located = resp
        .data
        .and_then(|d| d.locate_vehicles_by_zip)
        .ok_or_else(|| ScraperError::UnexpectedShape("locateVehiclesByZip missing".into()))?;

    let pagination = located
        .pagination
        .ok_or_else(|| ScraperError::UnexpectedShape("pagination missing".into()))?;

    Ok(InventoryPage {
        page_no: pagination.page_no,
        total_pages: pagination.total_pages,
        vehicles: located.vehicle_summary,
    })
}

/// Fetches one page, retrying transient failures. A block aborts at once.
fn fetch_with_retry<S: PageSource>(
    source: &S,
    page_no: u32,
    retry: &RetryPolicy,
) -> Result<InventoryPage, ScraperError> {
    let mut attempt = 1;
    loop {
        match source.fetch_page(page_no) {
            Ok(page) => return Ok(page),
            Err(e) if e.is_retryable() && attempt < retry.max_attempts => {
                warn!("⚠️ Page {page_no} failed (attempt {attempt}): {e}");
                std::thread::sleep(retry.delay(attempt));
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Walks pages 1..=totalPages and concatenates every vehicle.
///
/// Stops when a response reports `pageNo == totalPages`, fails once
/// `max_pages` pages were read without getting there.
pub fn collect_all_pages<S: PageSource>(
    source: &S,
    max_pages: u32,
    retry: &RetryPolicy,
) -> Result<Vec<Value>, ScraperError> {
    let mut vehicles = Vec::new();

    for page_no in 1..=max_pages {
        let page = fetch_with_retry(source, page_no, retry)?;

        info!(
            "📄 Reading response {}/{}: [{} entries]",
            page.page_no,
            page.total_pages,
            page.vehicles.len()
        );
        vehicles.extend(page.vehicles);

        if page.page_no >= page.total_pages {
            return Ok(vehicles);
        }
    }

    Err(ScraperError::PageLimit(max_pages))
}

/// Scrapes the configured search and writes today's snapshot plus the undated latest one.
///
/// Nothing is written unless every page came back.
pub fn run_inventory_scrape(config: &Config) -> Result<Vec<PathBuf>, ScraperError> {
    let scraper = InventoryScraper::new(config)?;
    let store = config.snapshot_store();

    info!(
        "🧵 Scraping {} within {} mi of {}",
        config.model, config.radius, config.zipcode
    );

    let vehicles = collect_all_pages(&scraper, config.max_scrape_pages, &RetryPolicy::default())?;

    let paths = write_snapshots(&store, Local::now().date_naive(), &vehicles)?;

    info!("✅ Scrape complete: {} vehicles", vehicles.len());
    Ok(paths)
}

/// Writes the latest snapshot, then the dated copy.
fn write_snapshots(
    store: &SnapshotStore,
    date: NaiveDate,
    vehicles: &[Value],
) -> Result<Vec<PathBuf>, ScraperError> {
    let latest = store.write(None, vehicles)?;
    let dated = store.write(Some(date), vehicles).map_err(|e| {
        warn!(
            "⚠️ {} was updated but the dated copy failed",
            latest.display()
        );
        e
    })?;
    Ok(vec![latest, dated])
}
