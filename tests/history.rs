use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use electrical_toolbox::history::{
    columns, export_csv, filter_records, CircuitKind, CsvHistoryStore, FieldValue, HistoryRecord,
    HistoryStore, HistorySummary,
};

fn at(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .and_then(|d| d.and_hms_opt(hour, 15, 0))
        .expect("valid timestamp")
}

fn dc(day: u32) -> HistoryRecord {
    HistoryRecord::with_timestamp(CircuitKind::Dc, at(day, 9))
        .with("voltage", 12.0)
        .with("current", 2.0)
        .with("resistance", 6.0)
}

fn three_phase(day: u32) -> HistoryRecord {
    HistoryRecord::with_timestamp(CircuitKind::ThreePhase, at(day, 14))
        .with("connection", "delta")
        .with("line_voltage", 380.0)
        .with("imbalance_percent", 20.0)
}

#[test]
fn csv_store_returns_running_count_and_reloads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = CsvHistoryStore::new(dir.path().join("history.csv"));
    assert!(store.load().expect("load empty").is_empty());

    assert_eq!(store.append(dc(1)).expect("append"), 1);
    assert_eq!(store.append(three_phase(2)).expect("append"), 2);
    assert_eq!(store.append(dc(3)).expect("append"), 3);

    let reopened = CsvHistoryStore::new(dir.path().join("history.csv"));
    let records = reopened.load().expect("reload");
    assert_eq!(records, vec![dc(1), three_phase(2), dc(3)]);
    assert_eq!(
        records[1].get("connection"),
        Some(&FieldValue::Text("delta".into()))
    );
}

#[test]
fn csv_header_is_union_of_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.csv");
    let store = CsvHistoryStore::new(&path);
    store.append(dc(1)).expect("append");
    store.append(three_phase(2)).expect("append");

    let text = std::fs::read_to_string(&path).expect("read csv");
    let header = text.lines().next().expect("header line");
    assert_eq!(
        header,
        "circuit_type,voltage,current,resistance,connection,line_voltage,imbalance_percent,timestamp"
    );
    let first_row = text.lines().nth(1).expect("first row");
    assert_eq!(first_row, "dc,12,2,6,,,,2024-06-01 09:15:00");
}

#[test]
fn malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.csv");
    std::fs::write(
        &path,
        "circuit_type,voltage,timestamp\n\
         dc,12,2024-06-01 09:15:00\n\
         plasma,1,2024-06-01 09:16:00\n\
         ac,230,yesterday\n",
    )
    .expect("seed csv");
    let records = CsvHistoryStore::new(&path).load().expect("load");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number("voltage"), Some(12.0));
}

#[test]
fn concurrent_appends_do_not_lose_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(CsvHistoryStore::new(dir.path().join("history.csv")));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..5 {
                    store.append(dc(1 + i)).expect("append");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("join");
    }
    assert_eq!(store.load().expect("load").len(), 20);
}

#[test]
fn filter_and_summary() {
    let records = vec![dc(3), three_phase(1), dc(2)];

    let only_dc = filter_records(&records, &[CircuitKind::Dc]);
    assert_eq!(only_dc.len(), 2);
    assert!(only_dc.iter().all(|r| r.circuit == CircuitKind::Dc));
    assert_eq!(filter_records(&records, &[]).len(), 3);
    assert!(filter_records(&records, &[CircuitKind::CapacitorAc]).is_empty());

    let summary = HistorySummary::from_records(&records);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.by_circuit.get(&CircuitKind::Dc), Some(&2));
    assert_eq!(summary.by_circuit.get(&CircuitKind::ThreePhase), Some(&1));
    assert_eq!(summary.first, Some(at(1, 14)));
    assert_eq!(summary.last, Some(at(3, 9)));
}

#[test]
fn export_writes_only_selected_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = vec![dc(1), three_phase(2)];
    let selected = filter_records(&records, &[CircuitKind::ThreePhase]);
    let out = dir.path().join("export").join("three_phase.csv");
    export_csv(&selected, &out).expect("export");

    let exported = CsvHistoryStore::new(&out).load().expect("reload export");
    assert_eq!(exported, vec![three_phase(2)]);
    assert_eq!(
        columns(selected.iter().copied()),
        ["circuit_type", "connection", "line_voltage", "imbalance_percent", "timestamp"]
    );
}
