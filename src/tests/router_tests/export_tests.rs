// src/tests/router_tests/export_tests.rs

use crate::tests::utils::{fixture, header, DATED};
use std::io::Read;

#[test]
fn export_downloads_xlsx() {
    let fx = fixture();
    let mut resp = fx.get("/api/inventory.xlsx?filter_dealer=Acme_Toyota&sort=price.desc");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        header(&resp, "Content-Type"),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        header(&resp, "Content-Disposition"),
        "attachment; filename=\"corollahybrid.xlsx\""
    );

    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn export_names_dated_snapshots() {
    let fx = fixture();
    let resp = fx.get(&format!("/api/inventory.xlsx?date={DATED}"));

    assert_eq!(
        header(&resp, "Content-Disposition"),
        format!("attachment; filename=\"{DATED}_corollahybrid.xlsx\"")
    );
}
