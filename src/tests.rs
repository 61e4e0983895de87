use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

use crate::config::{AppConfig, DATA_DIR_VAR, DB_PATH_VAR, LOG_VAR, PAGE_SIZE_VAR};
use crate::domain::entities::columns::ColumnDescriptor;
use crate::domain::entities::record::{ComponentRecord, PricingFields};
use crate::domain::entities::rows::GridRow;
use crate::domain::entities::upload::StagedUpload;
use crate::domain::errors::IngestError;
use crate::domain::services::aggregation::aggregate;
use crate::domain::services::headers::REQUIRED_HEADERS;
use crate::infra::sqlite::queries::count_uploads;
use crate::infra::sqlite::repo::SqliteGateway;
use crate::infra::sqlite::schema::init_db;
use crate::ui::state::grid_handle::{GridAction, GridHandle, DEFAULT_PAGE_SIZE};
use crate::usecase::notice::NoticeLevel;
use crate::usecase::ports::repo::{
    PersistenceError, PersistenceGateway, StoredUpload, SubmitReceipt, UPLOADS_TABLE,
};
use crate::usecase::services::import_service::{source_kind, staging_notice, ImportService};
use crate::usecase::services::upload_service::{submit_notice, UploadService};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("panelboard-{prefix}-{nanos}"))
}

fn fixture_row(item: usize) -> Vec<String> {
    REQUIRED_HEADERS
        .iter()
        .map(|header| match *header {
            "Item ID" => format!("IT-{item:03}"),
            "Item_Name" => format!("MCB 16A 1P #{item}"),
            "Qty" => item.to_string(),
            "Unit_Cost" => "12.50".to_string(),
            "Currency" => "USD".to_string(),
            "Number of Poles" => "1".to_string(),
            other => format!("{}-{item}", other.replace(' ', "_")),
        })
        .collect()
}

fn write_components_csv(path: &Path, headers: &[&str], rows: &[Vec<String>]) {
    let mut content = headers.join(",");
    content.push('\n');
    for row in rows {
        content.push_str(&row.join(","));
        content.push('\n');
    }
    fs::write(path, content).expect("should write csv fixture");
}

fn sample_upload(file_name: &str) -> StagedUpload {
    StagedUpload::new(
        file_name,
        vec![
            ColumnDescriptor::from_header("Item ID"),
            ColumnDescriptor::from_header("Qty"),
            ColumnDescriptor::from_header("Unit_Cost"),
        ],
        vec![
            ComponentRecord::new()
                .with("Item ID", "IT-001")
                .with("Qty", "2")
                .with("Unit_Cost", "12.50"),
            ComponentRecord::new()
                .with("Item ID", "IT-002")
                .with("Qty", "3")
                .with("Unit_Cost", "4"),
        ],
    )
}

struct FailingGateway;

impl PersistenceGateway for FailingGateway {
    fn init(&self) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn submit(&self, _upload: &StagedUpload) -> Result<SubmitReceipt, PersistenceError> {
        Err(PersistenceError::Store("connection refused".to_string()))
    }

    fn latest_upload(&self) -> Result<Option<StoredUpload>, PersistenceError> {
        Ok(None)
    }
}

/// Holds every submit until the test releases it.
struct GatedGateway {
    started: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl PersistenceGateway for GatedGateway {
    fn init(&self) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn submit(&self, _upload: &StagedUpload) -> Result<SubmitReceipt, PersistenceError> {
        self.started
            .lock()
            .expect("sender lock should not be poisoned")
            .send(())
            .expect("test should be listening");
        self.release
            .lock()
            .expect("receiver lock should not be poisoned")
            .recv()
            .expect("test should release the submit");
        Ok(SubmitReceipt::Inserted { upload_id: 1 })
    }

    fn latest_upload(&self) -> Result<Option<StoredUpload>, PersistenceError> {
        Ok(None)
    }
}

#[test]
fn init_db_creates_uploads_table() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("catalog.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [UPLOADS_TABLE],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 1, "csv_uploads table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn staging_a_valid_csv_keeps_every_row_and_column() {
    let temp_dir = unique_test_dir("stage-valid");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("components.csv");
    write_components_csv(&csv_path, &REQUIRED_HEADERS, &[fixture_row(1), fixture_row(2)]);

    let result = ImportService::default().stage_file(&csv_path);
    let notice = staging_notice(&result);
    let staged = result.expect("valid csv should stage");

    assert_eq!(staged.file_name, "components.csv");
    assert_eq!(staged.row_count(), 2);
    assert_eq!(staged.columns.len(), REQUIRED_HEADERS.len());
    assert_eq!(staged.columns[0].field, "Item ID");
    assert_eq!(staged.rows[1].display("Item ID"), "IT-002");
    assert_eq!(notice.level, NoticeLevel::Success);
    assert!(notice.description.contains("2 rows"));

    let grid = GridHandle::new(
        staged.columns.clone(),
        staged.rows.iter().cloned().map(GridRow::Record).collect(),
        PricingFields::IMPORTED,
    );
    assert_eq!(grid.totals().total_items, 3.0);
    assert_eq!(grid.totals().grand_total, 37.5);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn staging_rejects_a_file_missing_currency() {
    let temp_dir = unique_test_dir("stage-missing");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("components.csv");
    let headers: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|header| *header != "Currency")
        .collect();
    let row: Vec<String> = fixture_row(1)
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| REQUIRED_HEADERS[*idx] != "Currency")
        .map(|(_, value)| value)
        .collect();
    write_components_csv(&csv_path, &headers, &[row]);

    let result = ImportService::default().stage_file(&csv_path);
    let notice = staging_notice(&result);

    match result {
        Err(IngestError::HeaderValidation { missing }) => {
            assert_eq!(missing, vec!["Currency".to_string()]);
        }
        other => panic!("expected header validation failure, got {other:?}"),
    }
    assert!(notice.is_error());
    assert!(notice.description.contains("Currency"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn staging_names_only_the_missing_header_and_tolerates_extras() {
    let temp_dir = unique_test_dir("stage-extra");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("components.csv");
    let mut headers: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|header| *header != "Qty")
        .collect();
    headers.push("Panel_Section");
    let mut row: Vec<String> = fixture_row(1)
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| REQUIRED_HEADERS[*idx] != "Qty")
        .map(|(_, value)| value)
        .collect();
    row.push("Main".to_string());
    write_components_csv(&csv_path, &headers, &[row]);

    let result = ImportService::default().stage_file(&csv_path);

    match result {
        Err(IngestError::HeaderValidation { missing }) => {
            assert_eq!(missing, vec!["Qty".to_string()]);
        }
        other => panic!("expected header validation failure, got {other:?}"),
    }

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn staging_accepts_extra_columns_when_all_required_are_present() {
    let temp_dir = unique_test_dir("stage-superset");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("components.csv");
    let mut headers = REQUIRED_HEADERS.to_vec();
    headers.push("Panel_Section");
    let mut row = fixture_row(4);
    row.push("Sub".to_string());
    write_components_csv(&csv_path, &headers, &[row]);

    let staged = ImportService::default()
        .stage_file(&csv_path)
        .expect("superset of required headers should stage");

    assert_eq!(staged.columns.len(), REQUIRED_HEADERS.len() + 1);
    assert_eq!(staged.rows[0].display("Panel_Section"), "Sub");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn staging_reports_parse_errors_for_ragged_and_empty_files() {
    let temp_dir = unique_test_dir("stage-parse");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let ragged = temp_dir.join("ragged.csv");
    fs::write(&ragged, "Item ID,Qty\nIT-001,2,extra\n").expect("should write csv fixture");
    let empty = temp_dir.join("empty.csv");
    fs::write(&empty, "").expect("should write csv fixture");

    for path in [&ragged, &empty] {
        let result = ImportService::default().stage_file(path);
        let notice = staging_notice(&result);
        assert!(
            matches!(result, Err(IngestError::Parse { .. })),
            "{} should fail to parse: {result:?}",
            path.display()
        );
        assert!(notice.description.starts_with("Failed to parse CSV file"));
    }

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn staging_keeps_both_values_of_a_repeated_header() {
    let temp_dir = unique_test_dir("stage-duplicate");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("components.csv");
    let mut headers = REQUIRED_HEADERS.to_vec();
    headers.push("Qty");
    let mut row = fixture_row(1);
    row.push("9".to_string());
    write_components_csv(&csv_path, &headers, &[row]);

    let staged = ImportService::default()
        .stage_file(&csv_path)
        .expect("repeated header should still stage");

    assert_eq!(staged.columns.len(), REQUIRED_HEADERS.len() + 1);
    assert_eq!(staged.columns.last().map(|c| c.field.as_str()), Some("Qty_1"));
    assert_eq!(staged.rows[0].len(), REQUIRED_HEADERS.len() + 1);
    assert_eq!(staged.rows[0].display("Qty"), "1");
    assert_eq!(staged.rows[0].display("Qty_1"), "9");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn staging_matches_csv_headers_exactly() {
    let temp_dir = unique_test_dir("stage-padded");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("components.csv");
    let headers: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .map(|header| if *header == "Qty" { "Qty " } else { header })
        .collect();
    write_components_csv(&csv_path, &headers, &[fixture_row(1)]);

    match ImportService::default().stage_file(&csv_path) {
        Err(IngestError::HeaderValidation { missing }) => {
            assert_eq!(missing, vec!["Qty".to_string()]);
        }
        other => panic!("expected header validation failure, got {other:?}"),
    }

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

fn workbook_fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

#[test]
fn staging_a_valid_workbook_reads_numbers_and_skips_blank_rows() {
    let xlsx_path = workbook_fixture("components.xlsx");

    let result = ImportService::default().stage_file(&xlsx_path);
    let notice = staging_notice(&result);
    let staged = result.expect("valid workbook should stage");

    assert_eq!(staged.file_name, "components.xlsx");
    assert_eq!(staged.row_count(), 2);
    assert_eq!(staged.columns.len(), REQUIRED_HEADERS.len());
    assert_eq!(staged.rows[0].display("Item ID"), "IT-001");
    assert_eq!(staged.rows[1].display("Item ID"), "IT-002");
    assert_eq!(staged.rows[1].display("Qty"), "3");
    assert_eq!(staged.rows[1].display("Unit_Cost"), "12.5");
    assert_eq!(notice.level, NoticeLevel::Success);
    assert!(notice.description.starts_with("Excel file \"components.xlsx\""));

    let grid = GridHandle::new(
        staged.columns.clone(),
        staged.rows.iter().cloned().map(GridRow::Record).collect(),
        PricingFields::IMPORTED,
    );
    assert_eq!(grid.totals().total_items, 5.0);
    assert_eq!(grid.totals().grand_total, 62.5);
}

#[test]
fn staging_rejects_a_workbook_missing_currency() {
    let xlsx_path = workbook_fixture("components_missing_currency.xlsx");

    let result = ImportService::default().stage_file(&xlsx_path);
    let notice = staging_notice(&result);

    match result {
        Err(IngestError::HeaderValidation { missing }) => {
            assert_eq!(missing, vec!["Currency".to_string()]);
        }
        other => panic!("expected header validation failure, got {other:?}"),
    }
    assert!(notice.is_error());
    assert!(notice.description.contains("Currency"));
}

#[test]
fn staging_matches_workbook_headers_exactly() {
    let xlsx_path = workbook_fixture("components_padded_qty.xlsx");

    match ImportService::default().stage_file(&xlsx_path) {
        Err(IngestError::HeaderValidation { missing }) => {
            assert_eq!(missing, vec!["Qty".to_string()]);
        }
        other => panic!("expected header validation failure, got {other:?}"),
    }
}

#[test]
fn notices_name_the_uploaded_file_kind() {
    assert_eq!(source_kind("catalog.xlsx"), "Excel");
    assert_eq!(source_kind("catalog.csv"), "CSV");

    let stored = submit_notice("catalog.xlsx", &Err(PersistenceError::Store("disk full".into())));
    assert_eq!(stored.description, "Failed to store Excel data");

    let missing = workbook_fixture("does_not_exist.xlsx");
    let notice = staging_notice(&ImportService::default().stage_file(&missing));
    assert!(notice.description.starts_with("Failed to parse Excel file"));
}

#[test]
fn sqlite_gateway_round_trips_the_latest_upload() {
    let temp_dir = unique_test_dir("gateway-roundtrip");
    let db_path = temp_dir.join("catalog.sqlite");
    let gateway = SqliteGateway::new(db_path.clone());
    gateway.init().expect("init should create the store");

    let first = sample_upload("first.csv");
    let second = sample_upload("second.csv");
    let first_receipt = gateway.submit(&first).expect("first submit should succeed");
    let second_receipt = gateway.submit(&second).expect("second submit should succeed");

    assert!(matches!(first_receipt, SubmitReceipt::Inserted { .. }));
    assert!(second_receipt.upload_id() > first_receipt.upload_id());

    let stored = gateway
        .latest_upload()
        .expect("latest upload query should succeed")
        .expect("an upload should be stored");
    assert_eq!(stored.file_name, "second.csv");
    assert_eq!(stored.token, second.token.to_string());
    assert_eq!(stored.columns, second.columns);
    assert_eq!(stored.rows, second.rows);
    assert_eq!(
        aggregate(
            &stored.rows.into_iter().map(GridRow::Record).collect::<Vec<_>>(),
            PricingFields::IMPORTED
        )
        .grand_total,
        37.0
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn resubmitting_the_same_upload_writes_once() {
    let temp_dir = unique_test_dir("gateway-idempotent");
    let db_path = temp_dir.join("catalog.sqlite");
    let gateway = Arc::new(SqliteGateway::new(db_path.clone()));
    gateway.init().expect("init should create the store");
    let service = UploadService::new(gateway);
    let staged = sample_upload("components.csv");

    let first = service.confirm(&staged).expect("first confirm should succeed");
    let second = service.confirm(&staged).expect("second confirm should succeed");

    assert!(matches!(first, SubmitReceipt::Inserted { .. }));
    assert_eq!(
        second,
        SubmitReceipt::AlreadySubmitted {
            upload_id: first.upload_id()
        }
    );
    assert_eq!(count_uploads(&db_path).expect("count should succeed"), 1);
    assert_eq!(
        submit_notice(&staged.file_name, &Ok(second)).level,
        NoticeLevel::Info
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn failed_submit_reports_error_and_keeps_staged_rows() {
    let service = UploadService::new(Arc::new(FailingGateway));
    let staged = sample_upload("components.csv");
    let before = staged.clone();

    let result = service.confirm(&staged);
    let notice = submit_notice(&staged.file_name, &result);

    assert!(matches!(result, Err(PersistenceError::Store(_))));
    assert!(notice.is_error());
    assert_eq!(notice.description, "Failed to store CSV data");
    assert_eq!(staged, before);
    assert!(!service.is_in_flight());

    let retry = service.confirm(&staged);
    assert!(matches!(retry, Err(PersistenceError::Store(_))));
}

#[test]
fn a_second_confirm_while_one_is_running_is_rejected() {
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let service = UploadService::new(Arc::new(GatedGateway {
        started: Mutex::new(started_tx),
        release: Mutex::new(release_rx),
    }));
    let staged = sample_upload("components.csv");

    std::thread::scope(|scope| {
        let first = scope.spawn(|| service.confirm(&staged));
        started_rx.recv().expect("first submit should start");

        assert!(service.is_in_flight());
        let second = service.confirm(&staged);
        assert_eq!(second, Err(PersistenceError::InFlight));

        release_tx.send(()).expect("first submit should be waiting");
        let first = first.join().expect("first submit thread should not panic");
        assert_eq!(first, Ok(SubmitReceipt::Inserted { upload_id: 1 }));
    });

    assert!(!service.is_in_flight());
}

#[test]
fn replacing_grid_data_resets_filters_and_recomputes_totals() {
    let staged = sample_upload("components.csv");
    let mut grid = GridHandle::new(Vec::new(), Vec::new(), PricingFields::IMPORTED);
    grid.apply(GridAction::SetQuickFilter("nothing matches".to_string()));

    grid.apply(GridAction::ReplaceData {
        columns: staged.columns.clone(),
        rows: staged.rows.iter().cloned().map(GridRow::Record).collect(),
    });

    assert_eq!(grid.quick_filter(), "");
    assert_eq!(grid.visible_rows().len(), 2);
    assert_eq!(grid.totals().total_items, 5.0);
    assert_eq!(grid.totals().grand_total, 37.0);
}

#[test]
fn config_defaults_derive_from_the_data_dir() {
    let config = AppConfig::from_lookup(|key| match key {
        DATA_DIR_VAR => Some("/tmp/panelboard-data".to_string()),
        _ => None,
    })
    .expect("config should resolve");

    assert_eq!(config.data_dir, PathBuf::from("/tmp/panelboard-data"));
    assert_eq!(
        config.db_path,
        PathBuf::from("/tmp/panelboard-data").join("catalog.sqlite")
    );
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn config_reads_overrides_and_ignores_unknown_page_sizes() {
    let lookup = |page_size: &'static str| {
        move |key: &str| match key {
            DATA_DIR_VAR => Some("/tmp/panelboard-data".to_string()),
            DB_PATH_VAR => Some("/tmp/other/catalog.db".to_string()),
            PAGE_SIZE_VAR => Some(page_size.to_string()),
            LOG_VAR => Some("panelboard=debug".to_string()),
            _ => None,
        }
    };

    let config = AppConfig::from_lookup(lookup("25")).expect("config should resolve");
    assert_eq!(config.db_path, PathBuf::from("/tmp/other/catalog.db"));
    assert_eq!(config.page_size, 25);
    assert_eq!(config.log_filter, "panelboard=debug");

    let config = AppConfig::from_lookup(lookup("17")).expect("config should resolve");
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

    let config = AppConfig::from_lookup(lookup("lots")).expect("config should resolve");
    assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
}
