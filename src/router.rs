use crate::config::Config;
use crate::errors::ServerError;
use crate::inventory::snapshot::parse_date;
use crate::inventory::{transform_snapshot, InventoryRow, SnapshotStore};
use crate::responses::{html_response, json_response, redirect_response, ResultResp};
use crate::spreadsheets::export_inventory_xlsx;
use crate::table::state::{is_form_submission, DATE_KEY};
use crate::table::{TableState, TableView};
use crate::templates::{inventory_page, InventoryPageVm};
use astra::Request;
use chrono::NaiveDate;
use tracing::debug;
use url::form_urlencoded;

/// Shared, read-only state handed to every worker.
pub struct AppState {
    pub config: Config,
    pub store: SnapshotStore,
    pub view: TableView,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: config.snapshot_store(),
            view: TableView::default(),
            config,
        }
    }
}

pub fn handle(req: Request, app: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = req.uri().query().unwrap_or("");
    debug!(%method, %path, %query, "request");

    match (method, path) {
        ("GET", "/") => table_page(app, query),
        ("GET", "/api/inventory") => inventory_json(app, query),
        ("GET", "/api/listFiles") => json_response(&app.store.list_dates()?),
        ("GET", "/api/inventory.xlsx") => inventory_export(app, query),
        _ => Err(ServerError::NotFound),
    }
}

fn table_page(app: &AppState, query: &str) -> ResultResp {
    let default_size = app.config.default_page_size;

    if is_form_submission(query) {
        let state = TableState::from_form(query, default_size);
        return redirect_response(&canonical_location(&state));
    }

    let state = TableState::from_query(query, default_size);
    let rows = load_rows(app, snapshot_date(state.date.as_deref())?)?;
    let dates = app.store.list_dates()?;

    html_response(inventory_page(&InventoryPageVm {
        view: &app.view,
        rows: &rows,
        state: &state,
        dates: &dates,
    }))
}

fn inventory_json(app: &AppState, query: &str) -> ResultResp {
    let date = form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == DATE_KEY)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty());

    let rows = load_rows(app, snapshot_date(date.as_deref())?)?;
    json_response(&rows)
}

fn inventory_export(app: &AppState, query: &str) -> ResultResp {
    let state = TableState::from_query(query, app.config.default_page_size);
    let date = snapshot_date(state.date.as_deref())?;
    let rows = load_rows(app, date)?;
    let arranged = app.view.arrange(&rows, &state);

    let filename = app.store.filename(date).replace(".json", ".xlsx");
    export_inventory_xlsx(&arranged, app.view.columns(), &filename)
}

/// Loads and normalizes one snapshot. Options are shared within this request only.
fn load_rows(app: &AppState, date: Option<NaiveDate>) -> Result<Vec<InventoryRow>, ServerError> {
    let snapshot = app.store.load(date)?;
    Ok(transform_snapshot(snapshot)?)
}

/// Anything but `YYYY_MM_DD` is rejected before it reaches the filesystem.
fn snapshot_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ServerError> {
    Ok(raw.map(parse_date).transpose()?)
}

fn canonical_location(state: &TableState) -> String {
    let query = state.to_query();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{query}")
    }
}
