// src/tests/router_tests/page_tests.rs

use crate::tests::utils::{body_string, fixture, header, DATED};

#[test]
fn table_page_renders_every_row() {
    let fx = fixture();
    let resp = fx.get("/");

    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "Content-Type").starts_with("text/html"));

    let body = body_string(resp);
    assert!(body.contains("3 of 3 rows"));
    assert!(body.contains("VIN0001"));
    assert!(body.contains("title=\"MF package\""));
    // seven filler rows pad the single page to ten
    assert_eq!(body.matches("class=\"filler\"").count(), 7);
    assert!(body.contains(DATED));
}

#[test]
fn query_filters_and_sorts_rows() {
    let fx = fixture();
    let body = body_string(fx.get("/?filter_dealer=Acme_Toyota&sort=price.desc"));

    assert!(body.contains("2 of 3 rows"));
    let first = body.find(">VIN0002<").unwrap();
    let second = body.find(">VIN0001<").unwrap();
    assert!(first < second, "price desc should list VIN0002 first");
    assert!(!body.contains(">VIN0003<"));
}

#[test]
fn option_filter_uses_any_semantics() {
    let fx = fixture();
    let body = body_string(fx.get("/?filter_factoryOptions=2T+XX"));
    assert!(body.contains("1 of 3 rows"));
}

#[test]
fn form_submission_redirects_to_canonical_url() {
    let fx = fixture();
    let resp = fx.get(
        "/?apply=1&sort=price.desc&filter_vin=&filter_distance_min=5&filter_distance_max=\
         &filter_dealer=Acme+Toyota&filter_dealer=Best+Toyota&size=10&date=",
    );

    assert_eq!(resp.status(), 303);
    assert_eq!(
        header(&resp, "Location"),
        "/?filter_distance=5%3A&filter_dealer=Acme_Toyota+Best_Toyota&sort=price.desc"
    );
}

#[test]
fn global_search_filters_across_columns() {
    let fx = fixture();
    let body = body_string(fx.get("/?q=best+toyota"));

    assert!(body.contains("1 of 3 rows"));
    assert!(body.contains(">VIN0003<"));

    let resp = fx.get("/?apply=1&q=+best+&filter_vin=&size=10");
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/?q=best");
}

#[test]
fn empty_form_submission_redirects_home() {
    let fx = fixture();
    let resp = fx.get("/?apply=1&filter_vin=&size=10");

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/");
}

#[test]
fn out_of_range_page_is_clamped() {
    let fx = fixture();
    let body = body_string(fx.get("/?page=99"));
    assert!(body.contains("Page 1 of 1"));
}

#[test]
fn garbage_query_is_ignored() {
    let fx = fixture();
    let resp = fx.get("/?filter_distance=abc&filter_bogus=1&sort=nope.sideways;price");

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("3 of 3 rows"));
}

#[test]
fn missing_snapshot_renders_error_page() {
    let fx = fixture();
    let resp = fx.get("/?date=2020_01_01");

    assert_eq!(resp.status(), 404);
    assert!(header(&resp, "Content-Type").starts_with("text/html"));
    assert!(body_string(resp).contains("Error 404"));
}
