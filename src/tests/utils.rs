use crate::config::Config;
use crate::router::{handle, AppState};
use astra::{Body, Response};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const MODEL: &str = "corollahybrid";
pub const DATED: &str = "2024_05_01";

static FIXTURE_SEQ: AtomicUsize = AtomicUsize::new(0);

/// A data dir with snapshots in it, removed on drop.
pub struct Fixture {
    pub app: AppState,
    pub dir: PathBuf,
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

impl Fixture {
    pub fn get(&self, uri: &str) -> Response {
        let req = http::Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        match handle(req, &self.app) {
            Ok(resp) => resp,
            Err(err) => crate::responses::error_response(err, uri.split('?').next().unwrap()),
        }
    }

    pub fn write(&self, date: Option<&str>, records: &[Value]) {
        let date = date.map(|d| NaiveDate::parse_from_str(d, "%Y_%m_%d").unwrap());
        self.app.store.write(date, records).unwrap();
    }
}

/// Latest snapshot: three cars at two dealers. Dated snapshot: one car.
pub fn fixture() -> Fixture {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "inventory_router_test_{nanos}_{}",
        FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed)
    ));

    let config = Config {
        model: MODEL.to_string(),
        data_dir: dir.clone(),
        ..Config::default()
    };
    let fixture = Fixture {
        app: AppState::new(config),
        dir,
    };

    fixture.write(
        None,
        &[
            record("VIN0001", 5.0, "Acme Toyota", 30000.0, "Available", json!([option("MF", "P"), option("2T", "F")])),
            record("VIN0002", 20.0, "Acme Toyota", 31000.0, "in transit", json!([option("MF", "P")])),
            record("VIN0003", 42.0, "Best Toyota", 28000.0, "build", json!(null)),
        ],
    );
    fixture.write(
        Some(DATED),
        &[record("VIN0100", 7.0, "Acme Toyota", 29500.0, "Available", json!([]))],
    );

    fixture
}

pub fn record(vin: &str, distance: f64, dealer: &str, selling: f64, status: &str, options: Value) -> Value {
    json!({
        "vin": vin,
        "distance": distance,
        "dealerCd": "04136",
        "dealerMarketingName": dealer,
        "model": { "marketingName": "Corolla Hybrid LE" },
        "extColor": { "marketingName": "Blueprint" },
        "intColor": { "marketingName": "Black Fabric" },
        "price": {
            "baseMsrp": 24000,
            "totalMsrp": 29000,
            "advertizedPrice": 0,
            "sellingPrice": selling
        },
        "options": options,
        "inventoryStatus": status,
        "isPreSold": false
    })
}

pub fn option(code: &str, option_type: &str) -> Value {
    json!({
        "optionCd": code,
        "marketingName": format!("{code} package"),
        "optionType": option_type
    })
}

pub fn body_string(mut resp: Response) -> String {
    let mut body = String::new();
    resp.body_mut().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}

pub fn header(resp: &Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
