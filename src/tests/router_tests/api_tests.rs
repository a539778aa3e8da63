// src/tests/router_tests/api_tests.rs

use crate::tests::utils::{body_json, fixture, header, record, DATED};
use serde_json::{json, Value};

#[test]
fn inventory_returns_transformed_rows() {
    let fx = fixture();
    let resp = fx.get("/api/inventory");

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "Content-Type"), "application/json");

    let rows = body_json(resp);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    let first = &rows[0];
    assert_eq!(first["vin"], "VIN0001");
    assert_eq!(first["price"], json!(30000.0));
    assert_eq!(first["markup"], json!(1000.0));
    assert_eq!(first["status"], "available");
    assert_eq!(first["portOptions"][0]["optionCd"], "MF");
    assert_eq!(first["factoryOptions"][0]["optionCd"], "2T");
    assert_eq!(first["dealerOptions"], json!([]));

    assert_eq!(rows[1]["status"], "transit");
    assert_eq!(rows[2]["status"], "build");
    assert_eq!(rows[2]["portOptions"], json!([]));
}

#[test]
fn inventory_reads_the_dated_snapshot() {
    let fx = fixture();
    let rows = body_json(fx.get(&format!("/api/inventory?date={DATED}")));

    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["vin"], "VIN0100");
}

#[test]
fn missing_snapshot_is_not_found() {
    let fx = fixture();
    let resp = fx.get("/api/inventory?date=2023_01_01");

    assert_eq!(resp.status(), 404);
    let body = body_json(resp);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[test]
fn malformed_date_is_rejected() {
    let fx = fixture();

    assert_eq!(fx.get("/api/inventory?date=..%2F..%2Fetc%2Fpasswd").status(), 400);
    assert_eq!(fx.get("/api/inventory?date=2024-05-01").status(), 400);
}

#[test]
fn malformed_record_fails_the_request() {
    let fx = fixture();
    let mut broken = record("VIN0200", 1.0, "Acme Toyota", 1.0, "Available", json!([]));
    broken.as_object_mut().unwrap().remove("price");
    fx.write(Some("2024_06_01"), &[broken]);

    let resp = fx.get("/api/inventory?date=2024_06_01");
    assert_eq!(resp.status(), 500);
    let message = body_json(resp)["error"].as_str().unwrap().to_string();
    assert!(message.contains("index 0"), "unexpected message: {message}");
}

#[test]
fn list_files_returns_dates_with_null_for_undated() {
    let fx = fixture();
    let resp = fx.get("/api/listFiles");

    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!([DATED, Value::Null]));
}

#[test]
fn unknown_route_is_not_found() {
    let fx = fixture();
    assert_eq!(fx.get("/api/nope").status(), 404);
    assert_eq!(fx.get("/nope").status(), 404);
}
