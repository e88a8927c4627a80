use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rusqlite::Connection;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::domain::entities::envelope::{
    normalize, page_for_offset, pages_for_total, OffsetListing, PagedListing, PagerState,
    WireListing,
};
use crate::domain::entities::planet::{
    ChartKind, ChartRequest, DiscoveryChart, Dimension, HealthStatus, HistogramBin, MethodCount,
    Planet, PlanetCount, PlanetId, PlanetStats, TimelinePoint,
};
use crate::domain::entities::query::{
    CatalogField, CatalogQuery, CatalogSortField, ExplorerField, ExplorerQuery,
    ExplorerSortField, OffsetWindow, ParamValue, QueryKey, QueryParams,
};
use crate::infra::http::catalog::HttpCatalog;
use crate::infra::http::client::HttpClient;
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::settings::{load_setting, SqliteSettingsStore};
use crate::ui::components::charts::{
    axis_label, label_stride, render_bar_chart, render_histogram, timeline_bars, BarDatum,
};
use crate::ui::components::metric_cards::metric_cards;
use crate::ui::components::planet_table::{table_cells, table_headers};
use crate::ui::format::{format_count, format_dimension, format_measurement, PLACEHOLDER};
use crate::usecase::ports::catalog::{ApiError, CatalogApi, UNAVAILABLE_MESSAGE};
use crate::usecase::ports::settings::{SettingsError, SettingsStore};
use crate::usecase::services::catalog_service::CatalogService;
use crate::usecase::services::query_builder::{
    build_chart_params, build_explorer_filter_params, OffsetContract, PagedContract, QueryBuilder,
};
use crate::usecase::services::query_cell::{or_cancel, QueryCell, Resolution, RetainPolicy};
use crate::usecase::services::settings_service::{
    normalize_base_url, BaseUrlSource, SettingsService, API_BASE_URL_KEY,
};
use crate::{load_config_from, resolve_build_time_url, DEFAULT_API_BASE_URL};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("planet-catalog-{prefix}-{nanos}"))
}

fn planet(value: serde_json::Value) -> Planet {
    serde_json::from_value(value).expect("fixture should decode as a planet")
}

fn key_for(path: &str, params: &QueryParams) -> QueryKey {
    QueryKey::new("http://api.test", path, params)
}

fn param_names(params: &QueryParams) -> Vec<&'static str> {
    params.pairs().map(|(name, _)| name).collect()
}

fn query_string(params: &QueryParams) -> String {
    params
        .pairs()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

// ---------------------------------------------------------------------------
// Query builders
// ---------------------------------------------------------------------------

#[test]
fn catalog_builder_with_blank_filters_emits_only_paging_and_sort() {
    let mut query = CatalogQuery::default();
    query.set_filter(CatalogField::Name, "   ");
    query.set_filter(CatalogField::MinYear, "");

    let params = PagedContract::build(&query);

    assert_eq!(param_names(&params), vec!["limit", "page", "order_by", "order_dir"]);
    assert_eq!(
        query_string(&params),
        "limit=20&page=1&order_by=discovery_year&order_dir=desc"
    );
}

#[test]
fn catalog_builder_trims_text_and_drops_unparseable_years() {
    let mut query = CatalogQuery::default();
    query.set_filter(CatalogField::Method, " Transit ");
    query.set_filter(CatalogField::MinYear, "19x5");
    query.set_filter(CatalogField::MaxYear, " 2010 ");

    let params = PagedContract::build(&query);

    assert_eq!(
        params.get("method"),
        Some(&ParamValue::Text("Transit".to_string()))
    );
    assert!(!params.contains("min_year"));
    assert_eq!(params.get("max_year"), Some(&ParamValue::Int(2010)));
    assert!(!params.contains("name"));
}

#[test]
fn explorer_builder_never_sends_invalid_numbers() {
    let mut query = ExplorerQuery::default();
    query.set_filter(ExplorerField::Min(Dimension::Radius), "abc");
    query.set_filter(ExplorerField::Max(Dimension::Radius), "NaN");
    query.set_filter(ExplorerField::Min(Dimension::Mass), "inf");
    query.set_filter(ExplorerField::Max(Dimension::Mass), "1.5");
    query.set_filter(ExplorerField::Min(Dimension::DiscYear), "2001.5");
    query.set_filter(ExplorerField::Max(Dimension::DiscYear), "2020");

    let params = OffsetContract::build(&query);
    let wire = query_string(&params);

    assert!(!params.contains("min_rade"));
    assert!(!params.contains("max_rade"));
    assert!(!params.contains("min_masse"));
    assert_eq!(params.get("max_masse"), Some(&ParamValue::Float(1.5)));
    assert!(!params.contains("min_disc_year"));
    assert_eq!(params.get("max_disc_year"), Some(&ParamValue::Int(2020)));
    assert!(!wire.contains("NaN"));
    assert!(!wire.contains("inf"));
}

#[test]
fn explorer_builder_orders_params_and_sends_include_deleted_only_when_set() {
    let mut query = ExplorerQuery::default();
    query.set_filter(ExplorerField::DiscMethod, "Imaging");
    query.set_filter(ExplorerField::Min(Dimension::StarTemperature), "5000");

    let params = OffsetContract::build(&query);
    assert_eq!(
        param_names(&params),
        vec!["limit", "offset", "disc_method", "sort_by", "sort_order", "min_st_teff"]
    );
    assert!(!params.contains("include_deleted"));

    query.set_include_deleted(true);
    let params = OffsetContract::build(&query);
    assert_eq!(params.get("include_deleted"), Some(&ParamValue::Bool(true)));
    assert!(query_string(&params).contains("include_deleted=true"));
}

#[test]
fn explorer_stats_params_share_filters_but_not_paging() {
    let mut query = ExplorerQuery::default();
    query.set_filter(ExplorerField::Name, "Kepler");
    query.next_page();

    let params = build_explorer_filter_params(&query.filters);

    assert_eq!(param_names(&params), vec!["name"]);
}

#[test]
fn offset_window_clamps_limit_to_bounds() {
    assert_eq!(OffsetWindow::new(0, 0).limit(), 1);
    assert_eq!(OffsetWindow::new(500, 0).limit(), 200);
    assert_eq!(OffsetWindow::new(20, 0).previous().offset(), 0);
    assert_eq!(OffsetWindow::new(20, 40).next().offset(), 60);
}

#[test]
fn chart_request_is_clamped_before_it_reaches_the_wire() {
    let request = ChartRequest::new(ChartKind::Hist, 1, f64::NAN);
    assert_eq!(request.bins, 5);
    assert_eq!(request.sigma, 0.0);

    let params = build_chart_params(&ChartRequest {
        kind: ChartKind::Hist,
        bins: 10_000,
        sigma: 50.0,
    });
    assert_eq!(query_string(&params), "chart=hist&bins=200&sigma=10");
}

// ---------------------------------------------------------------------------
// Query state and keys
// ---------------------------------------------------------------------------

#[test]
fn changing_catalog_criteria_returns_to_first_page() {
    let mut query = CatalogQuery::default();

    query.go_to_page(4);
    query.set_filter(CatalogField::Name, "Kepler");
    assert_eq!(query.window.page(), 1);

    query.go_to_page(3);
    query.set_sort(CatalogSortField::Mass);
    assert_eq!(query.window.page(), 1);

    query.go_to_page(2);
    query.toggle_direction();
    assert_eq!(query.window.page(), 1);

    query.go_to_page(5);
    query.set_page_size(50);
    assert_eq!(query.window.page(), 1);
    assert_eq!(query.window.page_size(), 50);
}

#[test]
fn catalog_page_never_drops_below_one() {
    let mut query = CatalogQuery::default();
    query.go_to_page(0);

    assert_eq!(query.window.page(), 1);
}

#[test]
fn changing_explorer_criteria_returns_to_first_offset() {
    let mut query = ExplorerQuery::default();
    query.next_page();
    query.next_page();
    assert_eq!(query.window.offset(), 40);

    query.set_filter(ExplorerField::Max(Dimension::Radius), "2");
    assert_eq!(query.window.offset(), 0);

    query.next_page();
    query.set_sort(ExplorerSortField::Dimension(Dimension::Mass));
    assert_eq!(query.window.offset(), 0);
}

#[test]
fn query_key_ignores_entry_order_and_blank_fields() {
    let mut first = CatalogQuery::default();
    first.set_filter(CatalogField::Name, "Kepler");
    first.set_filter(CatalogField::MinYear, "2009");

    let mut second = CatalogQuery::default();
    second.set_filter(CatalogField::MinYear, "2009");
    second.set_filter(CatalogField::Method, "  ");
    second.set_filter(CatalogField::Name, "Kepler");

    assert_eq!(
        key_for("/planets", &PagedContract::build(&first)),
        key_for("/planets", &PagedContract::build(&second))
    );
}

#[test]
fn query_key_tracks_sort_direction_and_origin() {
    let query = CatalogQuery::default();
    let mut flipped = query.clone();
    flipped.toggle_direction();

    let params = PagedContract::build(&query);
    assert_ne!(
        key_for("/planets", &params),
        key_for("/planets", &PagedContract::build(&flipped))
    );
    assert_ne!(
        QueryKey::new("http://a.test", "/planets", &params),
        QueryKey::new("http://b.test", "/planets", &params)
    );
    assert!(key_for("/planets", &params)
        .to_string()
        .contains("order_dir=desc"));
}

// ---------------------------------------------------------------------------
// Envelope normalization and pager
// ---------------------------------------------------------------------------

#[test]
fn offset_listing_derives_page_numbers() {
    assert_eq!(page_for_offset(40, 20), 3);
    assert_eq!(pages_for_total(95, 20), 5);
    assert_eq!(pages_for_total(0, 20), 0);
    assert_eq!(page_for_offset(10, 0), 11);

    let envelope = normalize(WireListing::Offset(OffsetListing::<Planet> {
        items: Vec::new(),
        limit: 20,
        offset: 40,
        total: 95,
    }));

    assert_eq!(envelope.current_page, 3);
    assert_eq!(envelope.total_pages, 5);
    assert_eq!(envelope.total_count, 95);
}

#[test]
fn paged_listing_on_first_of_three_pages_enables_only_next() {
    let envelope = normalize(WireListing::Paged(PagedListing {
        results: vec![planet(json!({"id": 1, "name": "51 Pegasi b"}))],
        page: 1,
        pages: 3,
        total: 47,
    }));

    assert_eq!(envelope.total_count, 47);
    assert_eq!(
        envelope.pager(),
        PagerState {
            previous_enabled: false,
            next_enabled: true,
            current_page: 1,
            total_pages: 3,
        }
    );
}

#[test]
fn paged_listing_on_last_page_disables_next() {
    let envelope = normalize(WireListing::Paged(PagedListing::<Planet> {
        results: Vec::new(),
        page: 3,
        pages: 3,
        total: 47,
    }));

    let pager = envelope.pager();
    assert!(pager.previous_enabled);
    assert!(!pager.next_enabled);
}

#[test]
fn stale_pager_never_requests_past_the_reported_last_page() {
    let shown = normalize(WireListing::Paged(PagedListing::<Planet> {
        results: Vec::new(),
        page: 2,
        pages: 3,
        total: 47,
    }))
    .pager();
    let mut query = CatalogQuery::default();
    query.go_to_page(3);

    // Page three is in flight while page two is still on screen.
    for _ in 0..3 {
        if let Some(page) = shown.next_page() {
            query.go_to_page(page);
        }
        let params = PagedContract::build(&query);
        assert_eq!(params.get("page"), Some(&ParamValue::Int(3)));
    }

    assert_eq!(shown.previous_page(), Some(1));
    let last = normalize(WireListing::Paged(PagedListing::<Planet> {
        results: Vec::new(),
        page: 3,
        pages: 3,
        total: 47,
    }))
    .pager();
    assert_eq!(last.next_page(), None);
    assert_eq!(PagerState::disabled().previous_page(), None);
}

#[test]
fn offset_pager_saturates_on_huge_offsets() {
    let envelope = normalize(WireListing::Offset(OffsetListing::<Planet> {
        items: Vec::new(),
        limit: 200,
        offset: u64::MAX - 10,
        total: u64::MAX,
    }));

    let pager = envelope.pager();

    assert!(pager.previous_enabled);
    assert!(!pager.next_enabled);
}

#[test]
fn offset_pager_uses_offset_limit_and_total() {
    let at = |offset: u64| {
        normalize(WireListing::Offset(OffsetListing::<Planet> {
            items: Vec::new(),
            limit: 20,
            offset,
            total: 95,
        }))
        .pager()
    };

    assert!(!at(0).previous_enabled);
    assert!(at(0).next_enabled);
    assert!(at(60).next_enabled);
    assert!(!at(80).next_enabled);
    assert!(at(80).previous_enabled);
}

// ---------------------------------------------------------------------------
// Formatting and presentational helpers
// ---------------------------------------------------------------------------

#[test]
fn missing_measurements_render_as_placeholder() {
    assert_eq!(format_measurement(None, 2), PLACEHOLDER);
    assert_eq!(format_measurement(Some(f64::NAN), 2), PLACEHOLDER);
    assert_eq!(format_measurement(Some(0.0), 2), "0.00");
    assert_eq!(format_measurement(Some(5778.4), 0), "5778");

    let record = planet(json!({"id": 7, "name": "TOI-700 d", "rade": null, "masse": 1.72}));
    assert_eq!(format_dimension(&record, Dimension::Radius), PLACEHOLDER);
    assert_eq!(format_dimension(&record, Dimension::Mass), "1.72");
}

#[test]
fn table_cells_line_up_with_headers_and_never_show_zero_for_null() {
    let record = planet(json!({"id": 3, "name": "HD 209458 b", "disc_year": 1999}));

    let cells = table_cells(&record);

    assert_eq!(cells.len(), table_headers().len());
    assert_eq!(cells[0], "HD 209458 b");
    assert_eq!(cells[1], PLACEHOLDER);
    assert_eq!(cells[2], "1999");
    assert!(cells[3..].iter().all(|cell| cell == PLACEHOLDER));
}

#[test]
fn counts_are_grouped_by_thousands() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1_000), "1,000");
    assert_eq!(format_count(1_234_567), "1,234,567");
}

#[test]
fn metric_cards_fall_back_to_placeholder() {
    let stats = PlanetStats {
        count: 5_600,
        ..PlanetStats::default()
    };

    let cards = metric_cards(&stats);

    assert_eq!(cards.len(), 4);
    assert_eq!(cards[0].value, "5,600");
    assert!(cards[1..].iter().all(|card| card.value.starts_with(PLACEHOLDER)));
}

#[test]
fn dense_axes_keep_at_most_fifteen_labels() {
    let bars: Vec<BarDatum> = timeline_bars(
        &(1990..2030)
            .map(|year| TimelinePoint {
                disc_year: year,
                count: 1,
            })
            .collect::<Vec<_>>(),
    );

    assert_eq!(label_stride(bars.len()), 3);
    assert_eq!(axis_label(&bars, 0), "1990");
    assert_eq!(axis_label(&bars, 1), "");
    assert_eq!(axis_label(&bars, 3), "1993");
    let labelled = (0..bars.len())
        .filter(|idx| !axis_label(&bars, *idx).is_empty())
        .count();
    assert!(labelled <= 15);
}

#[test]
fn charts_render_as_responsive_svg() {
    let bars = vec![
        BarDatum {
            label: "Transit".to_string(),
            value: 4000.0,
        },
        BarDatum {
            label: "Radial Velocity".to_string(),
            value: 1100.0,
        },
    ];
    let svg = render_bar_chart(&bars, 400, 200).expect("bar chart should render");
    assert!(svg.contains("viewBox=\"0 0 400 200\""));

    let histogram = DiscoveryChart {
        chart: ChartKind::Hist,
        bins: vec![
            HistogramBin {
                start: 3000.0,
                end: 4000.0,
                count: 12,
            },
            HistogramBin {
                start: 4000.0,
                end: 5000.0,
                count: 30,
            },
        ],
        mean: Some(4300.0),
        lower: Some(3500.0),
        upper: None,
        series: Vec::new(),
    };
    let svg = render_histogram(&histogram, 400, 200).expect("histogram should render");
    assert!(svg.starts_with("<svg"));

    let empty = DiscoveryChart {
        bins: Vec::new(),
        mean: None,
        lower: None,
        ..histogram
    };
    assert!(empty.is_empty());
    assert!(render_histogram(&empty, 400, 200).is_ok());
}

// ---------------------------------------------------------------------------
// Settings storage and configuration
// ---------------------------------------------------------------------------

#[test]
fn init_db_creates_setting_table() {
    let temp_dir = unique_test_dir("init-db");
    let db_path = temp_dir.join("nested").join("settings.sqlite");

    let result = init_db(&db_path);
    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'setting'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1, "setting table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sqlite_settings_store_saves_overwrites_and_removes() {
    let temp_dir = unique_test_dir("settings-store");
    let store = SqliteSettingsStore::new(temp_dir.join("settings.sqlite"));
    store.init().expect("store init should succeed");

    assert_eq!(store.load("missing").expect("load should succeed"), None);

    store
        .save(API_BASE_URL_KEY, "http://first.test")
        .expect("save should succeed");
    store
        .save(API_BASE_URL_KEY, "http://second.test")
        .expect("overwrite should succeed");
    assert_eq!(
        load_setting(&store.db_path, API_BASE_URL_KEY).expect("load should succeed"),
        Some("http://second.test".to_string())
    );

    store.remove(API_BASE_URL_KEY).expect("remove should succeed");
    assert_eq!(store.load(API_BASE_URL_KEY).expect("load should succeed"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn base_url_validation_accepts_only_http() {
    assert_eq!(
        normalize_base_url(" https://api.example.org/v1/ ").expect("should accept https"),
        "https://api.example.org/v1"
    );
    assert!(matches!(
        normalize_base_url("ftp://api.example.org"),
        Err(SettingsError::InvalidUrl(_))
    ));
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(SettingsError::InvalidUrl(_))
    ));
    assert!(matches!(
        normalize_base_url("   "),
        Err(SettingsError::InvalidUrl(_))
    ));
}

#[test]
fn settings_service_persists_override_and_resets() {
    let temp_dir = unique_test_dir("settings-service");
    let store = Arc::new(SqliteSettingsStore::new(temp_dir.join("settings.sqlite")));
    let service = SettingsService::new(store.clone(), "http://127.0.0.1:8000");
    service.init().expect("init should succeed");

    let initial = service.resolve_base_url();
    assert_eq!(initial.source, BaseUrlSource::Embedded);
    assert_eq!(initial.url, "http://127.0.0.1:8000");

    let saved = service
        .update_base_url("https://planets.example.org/")
        .expect("update should succeed");
    assert_eq!(saved.url, "https://planets.example.org");

    let reopened = SettingsService::new(
        Arc::new(SqliteSettingsStore::new(store.db_path.clone())),
        "http://127.0.0.1:8000",
    );
    let resolved = reopened.resolve_base_url();
    assert_eq!(resolved.source, BaseUrlSource::Override);
    assert_eq!(resolved.url, "https://planets.example.org");

    assert!(service.update_base_url("file:///etc/passwd").is_err());
    assert_eq!(service.resolve_base_url().url, "https://planets.example.org");

    let reset = service.reset_base_url().expect("reset should succeed");
    assert_eq!(reset.source, BaseUrlSource::Embedded);
    assert_eq!(service.resolve_base_url().source, BaseUrlSource::Embedded);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

struct BrokenStore;

impl SettingsStore for BrokenStore {
    fn init(&self) -> Result<(), SettingsError> {
        Ok(())
    }

    fn load(&self, _key: &str) -> Result<Option<String>, SettingsError> {
        Err(SettingsError::Storage("disk unavailable".to_string()))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), SettingsError> {
        Err(SettingsError::Storage("disk unavailable".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), SettingsError> {
        Err(SettingsError::Storage("disk unavailable".to_string()))
    }
}

#[test]
fn unreadable_settings_fall_back_and_write_failures_surface() {
    let service = SettingsService::new(Arc::new(BrokenStore), "http://fallback.test");

    let resolved = service.resolve_base_url();
    assert_eq!(resolved.url, "http://fallback.test");
    assert_eq!(resolved.source, BaseUrlSource::Embedded);

    assert!(matches!(
        service.update_base_url("http://new.test"),
        Err(SettingsError::Storage(_))
    ));
}

#[test]
fn build_time_url_defaults_and_trims() {
    assert_eq!(resolve_build_time_url(None), DEFAULT_API_BASE_URL);
    assert_eq!(resolve_build_time_url(Some("  ")), DEFAULT_API_BASE_URL);
    assert_eq!(
        resolve_build_time_url(Some(" https://catalog.test/api/ ")),
        "https://catalog.test/api"
    );
}

#[test]
fn config_without_storage_uses_embedded_url() {
    let config = load_config_from(
        Err(anyhow::anyhow!("no data directory")),
        "http://embedded.test".to_string(),
    );

    assert!(config.settings.is_none());
    assert_eq!(config.catalog_url, "http://embedded.test");
    assert_eq!(config.explorer_endpoint.url, "http://embedded.test");
    assert_eq!(config.explorer_endpoint.source, BaseUrlSource::Embedded);
}

#[test]
fn config_reads_saved_override_for_explorer_only() {
    let temp_dir = unique_test_dir("config");
    let db_path = temp_dir.join("settings.sqlite");
    let store = SqliteSettingsStore::new(db_path.clone());
    store.init().expect("init should succeed");
    store
        .save(API_BASE_URL_KEY, "https://override.test")
        .expect("save should succeed");

    let config = load_config_from(Ok(db_path), "http://embedded.test".to_string());

    assert!(config.settings.is_some());
    assert_eq!(config.catalog_url, "http://embedded.test");
    assert_eq!(config.explorer_endpoint.url, "https://override.test");
    assert_eq!(config.explorer_endpoint.source, BaseUrlSource::Override);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

// ---------------------------------------------------------------------------
// Query cell lifecycle
// ---------------------------------------------------------------------------

fn listing_key(page: u32) -> QueryKey {
    let mut query = CatalogQuery::default();
    query.go_to_page(page);
    key_for("/planets", &PagedContract::build(&query))
}

#[test]
fn superseded_response_never_overwrites_newer_state() {
    let root = CancellationToken::new();
    let mut cell = QueryCell::<&str>::new(RetainPolicy::KeepPrevious);

    let first = cell.begin(listing_key(1), &root).expect("first request should start");
    let second = cell.begin(listing_key(2), &root).expect("second request should start");
    assert!(first.token().is_cancelled());

    assert_eq!(cell.resolve(second, Ok("page two")), Resolution::Committed);
    assert_eq!(cell.resolve(first, Ok("page one")), Resolution::Superseded);

    assert_eq!(cell.data(), Some(&"page two"));
    assert!(cell.begin(listing_key(2), &root).is_none(), "page two should be committed");
}

#[test]
fn late_failure_for_old_key_is_ignored() {
    let root = CancellationToken::new();
    let mut cell = QueryCell::<&str>::new(RetainPolicy::KeepPrevious);

    let first = cell.begin(listing_key(1), &root).expect("first request should start");
    let second = cell.begin(listing_key(2), &root).expect("second request should start");
    cell.resolve(second, Ok("page two"));

    assert_eq!(
        cell.resolve(first, Err(ApiError::Status { status: 500 })),
        Resolution::Superseded
    );
    assert!(cell.error().is_none());
}

#[test]
fn cancellation_is_not_reported_as_error() {
    let root = CancellationToken::new();
    let mut cell = QueryCell::<&str>::new(RetainPolicy::Clear);

    let ticket = cell.begin(listing_key(1), &root).expect("request should start");
    assert_eq!(cell.resolve(ticket, Err(ApiError::Cancelled)), Resolution::Cancelled);

    assert!(cell.error().is_none());
    assert!(!cell.is_loading());
}

#[test]
fn keep_previous_shows_old_data_while_next_page_loads() {
    let root = CancellationToken::new();
    let mut kept = QueryCell::<&str>::new(RetainPolicy::KeepPrevious);
    let mut cleared = QueryCell::<&str>::new(RetainPolicy::Clear);

    for cell in [&mut kept, &mut cleared] {
        let ticket = cell.begin(listing_key(1), &root).expect("request should start");
        cell.resolve(ticket, Ok("page one"));
        cell.begin(listing_key(2), &root).expect("next request should start");
        assert!(cell.is_loading());
    }

    assert_eq!(kept.data(), Some(&"page one"));
    assert_eq!(cleared.data(), None);
}

#[test]
fn identical_keys_are_deduplicated_until_invalidated() {
    let root = CancellationToken::new();
    let mut cell = QueryCell::<&str>::new(RetainPolicy::KeepPrevious);

    let ticket = cell.begin(listing_key(1), &root).expect("request should start");
    assert!(cell.begin(listing_key(1), &root).is_none(), "in-flight key should dedupe");

    cell.resolve(ticket, Ok("page one"));
    assert!(cell.begin(listing_key(1), &root).is_none(), "committed key should dedupe");

    cell.invalidate();
    assert!(cell.begin(listing_key(1), &root).is_some());
}

#[test]
fn failure_clears_data_and_allows_retry_of_same_key() {
    let root = CancellationToken::new();
    let mut cell = QueryCell::<&str>::new(RetainPolicy::KeepPrevious);

    let ticket = cell.begin(listing_key(1), &root).expect("request should start");
    cell.resolve(ticket, Ok("page one"));
    let ticket = cell.begin(listing_key(2), &root).expect("request should start");
    assert_eq!(
        cell.resolve(ticket, Err(ApiError::Transport("connection refused".to_string()))),
        Resolution::Failed
    );

    assert_eq!(cell.data(), None);
    assert_eq!(
        cell.error().map(ApiError::user_message),
        Some(UNAVAILABLE_MESSAGE)
    );
    assert!(cell.begin(listing_key(2), &root).is_some());
}

#[test]
fn cancelling_root_token_cancels_request_tokens() {
    let root = CancellationToken::new();
    let mut cell = QueryCell::<&str>::new(RetainPolicy::Clear);

    let ticket = cell.begin(listing_key(1), &root).expect("request should start");
    root.cancel();

    assert!(ticket.token().is_cancelled());
}

#[tokio::test]
async fn or_cancel_stops_waiting_once_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    let result: Result<(), ApiError> = or_cancel(std::future::pending(), &token).await;

    assert_eq!(result, Err(ApiError::Cancelled));
}

#[tokio::test]
async fn or_cancel_passes_through_completed_results() {
    let token = CancellationToken::new();

    let result = or_cancel(async { Ok::<_, ApiError>(42) }, &token).await;

    assert_eq!(result, Ok(42));
}

// ---------------------------------------------------------------------------
// Catalog service orchestration
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeApi {
    method_counts_status: Option<u16>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    fn failing_method_counts(status: u16) -> Self {
        Self {
            method_counts_status: Some(status),
            ..Self::default()
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        let mut calls = self.calls.lock().expect("calls lock").clone();
        calls.sort_unstable();
        calls
    }
}

#[async_trait]
impl CatalogApi for FakeApi {
    fn origin(&self) -> &str {
        "http://fake.test"
    }

    async fn list_paged(&self, params: &QueryParams) -> Result<PagedListing<Planet>, ApiError> {
        self.record("list_paged");
        let page = match params.get("page") {
            Some(ParamValue::Int(page)) => *page as u32,
            _ => 1,
        };
        Ok(PagedListing {
            results: vec![planet(json!({"id": 1, "name": "Kepler-22 b"}))],
            page,
            pages: 3,
            total: 47,
        })
    }

    async fn list_offset(&self, _params: &QueryParams) -> Result<OffsetListing<Planet>, ApiError> {
        self.record("list_offset");
        Ok(OffsetListing {
            items: vec![planet(json!({"id": 2, "name": "GJ 1214 b", "rade": 2.74}))],
            limit: 20,
            offset: 40,
            total: 95,
        })
    }

    async fn stats(&self, _params: &QueryParams) -> Result<PlanetStats, ApiError> {
        self.record("stats");
        Ok(PlanetStats {
            count: 95,
            ..PlanetStats::default()
        })
    }

    async fn timeline(&self) -> Result<Vec<TimelinePoint>, ApiError> {
        self.record("timeline");
        Ok(vec![
            TimelinePoint {
                disc_year: 2016,
                count: 1500,
            },
            TimelinePoint {
                disc_year: 1995,
                count: 1,
            },
        ])
    }

    async fn method_counts(&self) -> Result<Vec<MethodCount>, ApiError> {
        self.record("method_counts");
        if let Some(status) = self.method_counts_status {
            return Err(ApiError::Status { status });
        }
        Ok(vec![
            MethodCount {
                disc_method: "Imaging".to_string(),
                count: 80,
            },
            MethodCount {
                disc_method: "Transit".to_string(),
                count: 4000,
            },
            MethodCount {
                disc_method: "Astrometry".to_string(),
                count: 80,
            },
        ])
    }

    async fn count(&self) -> Result<PlanetCount, ApiError> {
        self.record("count");
        Ok(PlanetCount { count: 95 })
    }

    async fn planet(&self, id: PlanetId) -> Result<Planet, ApiError> {
        self.record("planet");
        Ok(planet(json!({"id": id.0, "name": "Found"})))
    }

    async fn planet_by_name(&self, name: &str) -> Result<Planet, ApiError> {
        self.record("planet_by_name");
        Ok(planet(json!({"id": 9, "name": name})))
    }

    async fn discovery_chart(&self, _params: &QueryParams) -> Result<DiscoveryChart, ApiError> {
        self.record("discovery_chart");
        Ok(DiscoveryChart {
            chart: ChartKind::Hist,
            bins: Vec::new(),
            mean: None,
            lower: None,
            upper: None,
            series: Vec::new(),
        })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record("health");
        Ok(HealthStatus {
            status: "ok".to_string(),
            timestamp: None,
        })
    }
}

#[tokio::test]
async fn explorer_snapshot_is_all_or_nothing() {
    let api = Arc::new(FakeApi::failing_method_counts(500));
    let service = CatalogService::new(api.clone());

    let result = service.explore(&ExplorerQuery::default()).await;

    assert_eq!(result, Err(ApiError::Status { status: 500 }));
    assert!(api.calls().contains(&"method_counts"));
}

#[tokio::test]
async fn explorer_snapshot_normalizes_offset_listing() {
    let service = CatalogService::new(Arc::new(FakeApi::default()));

    let snapshot = service
        .explore(&ExplorerQuery::default())
        .await
        .expect("snapshot should load");

    assert_eq!(snapshot.listing.current_page, 3);
    assert_eq!(snapshot.listing.total_pages, 5);
    assert_eq!(snapshot.stats.count, 95);
    assert_eq!(snapshot.method_counts.len(), 3);
}

#[tokio::test]
async fn browse_normalizes_paged_listing() {
    let service = CatalogService::new(Arc::new(FakeApi::default()));

    let envelope = service
        .browse(&CatalogQuery::default())
        .await
        .expect("listing should load");

    assert_eq!(envelope.records.len(), 1);
    assert_eq!(envelope.total_count, 47);
    assert!(!envelope.pager().previous_enabled);
    assert!(envelope.pager().next_enabled);
    assert_eq!(envelope.window, None);
}

#[tokio::test]
async fn aggregates_are_sorted_for_display() {
    let service = CatalogService::new(Arc::new(FakeApi::default()));

    let timeline = service.timeline().await.expect("timeline should load");
    let years: Vec<i32> = timeline.iter().map(|point| point.disc_year).collect();
    assert_eq!(years, vec![1995, 2016]);

    let counts = service.method_counts().await.expect("counts should load");
    let methods: Vec<&str> = counts.iter().map(|entry| entry.disc_method.as_str()).collect();
    assert_eq!(methods, vec!["Transit", "Astrometry", "Imaging"]);
}

#[test]
fn service_keys_are_scoped_to_origin_and_path() {
    let service = CatalogService::new(Arc::new(FakeApi::default()));

    let key = service.listing_key(&CatalogQuery::default());
    assert_eq!(
        key.to_string(),
        "http://fake.test/planets?limit=20&order_by=discovery_year&order_dir=desc&page=1"
    );
    assert_ne!(service.stats_key(), service.timeline_key());
    assert_ne!(service.planet_key(PlanetId(1)), service.planet_key(PlanetId(2)));
    assert_eq!(
        service.planet_by_name_key(" Kepler-22 b "),
        service.planet_by_name_key("Kepler-22 b")
    );
}

// ---------------------------------------------------------------------------
// HTTP adapter
// ---------------------------------------------------------------------------

#[test]
fn build_url_keeps_base_path_and_drops_empty_params() {
    let client = HttpClient::new("http://api.test/v2/").expect("base url should parse");
    let mut params = QueryParams::new();
    params.set("name", "");

    let url = client
        .build_url("/planets/stats", &params)
        .expect("url should build");
    assert_eq!(url.as_str(), "http://api.test/v2/planets/stats");

    params.set("limit", 20_u32);
    let url = client.build_url("/planets", &params).expect("url should build");
    assert_eq!(url.as_str(), "http://api.test/v2/planets?limit=20");
}

#[test]
fn http_client_rejects_unusable_base_urls() {
    assert!(matches!(
        HttpClient::new("not a url"),
        Err(ApiError::InvalidUrl(_))
    ));
    assert!(matches!(
        HttpClient::new("mailto:someone@example.org"),
        Err(ApiError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn http_catalog_requests_paged_listing_with_expected_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets"))
        .and(query_param("limit", "20"))
        .and(query_param("page", "1"))
        .and(query_param("order_by", "discovery_year"))
        .and(query_param("order_dir", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 1, "name": "51 Pegasi b", "disc_method": "Radial Velocity", "disc_year": 1995, "rade": null}
            ],
            "page": 1,
            "pages": 3,
            "total": 47
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = CatalogService::new(Arc::new(
        HttpCatalog::new(&server.uri()).expect("client should build"),
    ));
    let envelope = service
        .browse(&CatalogQuery::default())
        .await
        .expect("listing should load");

    assert_eq!(envelope.total_count, 47);
    assert_eq!(envelope.records[0].rade, None);
    assert_eq!(envelope.records[0].disc_year, Some(1995));
    assert!(envelope.pager().next_enabled);
    assert!(!envelope.pager().previous_enabled);
}

#[tokio::test]
async fn http_catalog_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/method-counts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = HttpCatalog::new(&server.uri()).expect("client should build");
    let result = api.method_counts().await;

    assert_eq!(result, Err(ApiError::Status { status: 500 }));
}

#[tokio::test]
async fn http_catalog_reports_malformed_body_as_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = HttpCatalog::new(&server.uri()).expect("client should build");

    assert!(matches!(api.count().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn http_catalog_reports_unreachable_host_as_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("should bind free port");
        listener.local_addr().expect("should read local addr").port()
    };

    let api = HttpCatalog::new(&format!("http://127.0.0.1:{port}")).expect("client should build");

    assert!(matches!(api.health().await, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn http_catalog_escapes_planet_name_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets/by-name/Kepler-22%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 22,
            "name": "Kepler-22 b",
            "is_deleted": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpCatalog::new(&server.uri()).expect("client should build");
    let found = api
        .planet_by_name(" Kepler-22 b ")
        .await
        .expect("planet should load");

    assert_eq!(found.planet_id(), PlanetId(22));
}

#[tokio::test]
async fn http_catalog_sends_offset_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .and(query_param("include_deleted", "true"))
        .and(query_param("min_rade", "0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "limit": 20,
            "offset": 0,
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = ExplorerQuery::default();
    query.set_include_deleted(true);
    query.set_filter(ExplorerField::Min(Dimension::Radius), "0.5");
    query.set_filter(ExplorerField::Max(Dimension::Radius), "huge");

    let api = HttpCatalog::new(&server.uri()).expect("client should build");
    let listing = api
        .list_offset(&OffsetContract::build(&query))
        .await
        .expect("listing should load");

    assert!(listing.items.is_empty());
    let requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    let query_string = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query_string.contains("max_rade"));
}
