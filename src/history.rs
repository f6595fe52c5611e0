//! 계산 이력 저장소.
//!
//! 계산 코어는 저장 매체를 모른다. 프런트엔드가 `HistoryStore` 구현을 주입하고,
//! 보고서를 평탄화한 `HistoryRecord`를 추가하면 전체 레코드 수를 돌려받는다.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDateTime, Timelike};

/// CSV에 기록하는 시각 형식.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const CIRCUIT_COLUMN: &str = "circuit_type";
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// 회로 종류 태그.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CircuitKind {
    Dc,
    Ac,
    CapacitorDc,
    CapacitorAc,
    ThreePhase,
}

impl CircuitKind {
    pub const ALL: [CircuitKind; 5] = [
        CircuitKind::Dc,
        CircuitKind::Ac,
        CircuitKind::CapacitorDc,
        CircuitKind::CapacitorAc,
        CircuitKind::ThreePhase,
    ];

    pub fn as_code(self) -> &'static str {
        match self {
            CircuitKind::Dc => "dc",
            CircuitKind::Ac => "ac",
            CircuitKind::CapacitorDc => "capacitor_dc",
            CircuitKind::CapacitorAc => "capacitor_ac",
            CircuitKind::ThreePhase => "three_phase",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_code() == code.trim())
    }

    pub fn label_key(self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            CircuitKind::Dc => CIRCUIT_DC,
            CircuitKind::Ac => CIRCUIT_AC,
            CircuitKind::CapacitorDc => CIRCUIT_CAPACITOR_DC,
            CircuitKind::CapacitorAc => CIRCUIT_CAPACITOR_AC,
            CircuitKind::ThreePhase => CIRCUIT_THREE_PHASE,
        }
    }
}

/// 레코드 필드 값.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    fn parse(cell: &str) -> Self {
        match cell.parse::<f64>() {
            Ok(v) => FieldValue::Number(v),
            Err(_) => FieldValue::Text(cell.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// 이력 한 건: 회로 태그, 이름 순서가 유지되는 필드 목록, 생성 시각.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub timestamp: NaiveDateTime,
    pub circuit: CircuitKind,
    fields: Vec<(String, FieldValue)>,
}

impl HistoryRecord {
    /// 현재 로컬 시각(초 단위)으로 레코드를 만든다.
    pub fn new(circuit: CircuitKind) -> Self {
        let now = Local::now().naive_local();
        Self::with_timestamp(circuit, now.with_nanosecond(0).unwrap_or(now))
    }

    pub fn with_timestamp(circuit: CircuitKind, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            circuit,
            fields: Vec::new(),
        }
    }

    /// 빌더 형태로 필드를 추가한다.
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// 같은 이름이 있으면 값을 덮어쓴다.
    pub fn insert(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }
}

/// 이력 저장/로드 오류.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// 주입 가능한 이력 저장소.
pub trait HistoryStore: Send + Sync {
    /// 레코드를 추가하고 추가 후 전체 레코드 수를 반환한다.
    fn append(&self, record: HistoryRecord) -> Result<usize, HistoryError>;
    /// 저장 순서대로 모든 레코드를 읽는다.
    fn load(&self) -> Result<Vec<HistoryRecord>, HistoryError>;
}

/// CSV 파일 기반 저장소.
///
/// 추가할 때마다 파일 전체를 다시 쓴다. 열은 모든 레코드 필드의 합집합이며,
/// 같은 프로세스 안의 동시 추가는 뮤텍스로 직렬화된다.
#[derive(Debug)]
pub struct CsvHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for CsvHistoryStore {
    fn append(&self, record: HistoryRecord) -> Result<usize, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = read_records(&self.path)?;
        records.push(record);
        let refs: Vec<&HistoryRecord> = records.iter().collect();
        write_records(&self.path, &refs)?;
        tracing::info!(path = %self.path.display(), total = records.len(), "appended history record");
        Ok(records.len())
    }

    fn load(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        read_records(&self.path)
    }
}

/// 메모리 저장소. 테스트와 이력 저장을 끈 경우에 쓴다.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, record: HistoryRecord) -> Result<usize, HistoryError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.push(record);
        Ok(records.len())
    }

    fn load(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

/// 회로 종류로 레코드를 거른다. 빈 목록이면 모두 통과한다.
pub fn filter_records<'a>(
    records: &'a [HistoryRecord],
    circuits: &[CircuitKind],
) -> Vec<&'a HistoryRecord> {
    records
        .iter()
        .filter(|r| circuits.is_empty() || circuits.contains(&r.circuit))
        .collect()
}

/// 이력 통계.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySummary {
    pub total: usize,
    pub by_circuit: BTreeMap<CircuitKind, usize>,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}

impl HistorySummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) -> Self {
        let mut summary = HistorySummary::default();
        for r in records {
            summary.total += 1;
            *summary.by_circuit.entry(r.circuit).or_insert(0) += 1;
            summary.first = Some(summary.first.map_or(r.timestamp, |t| t.min(r.timestamp)));
            summary.last = Some(summary.last.map_or(r.timestamp, |t| t.max(r.timestamp)));
        }
        summary
    }
}

/// 표에 그릴 열 이름. 회로 태그가 처음, 시각이 마지막이다.
pub fn columns<'a>(records: impl IntoIterator<Item = &'a HistoryRecord>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cols = vec![CIRCUIT_COLUMN.to_string()];
    for r in records {
        for (name, _) in r.fields() {
            if seen.insert(name.as_str()) {
                cols.push(name.clone());
            }
        }
    }
    cols.push(TIMESTAMP_COLUMN.to_string());
    cols
}

/// 주어진 레코드만 별도 CSV 파일로 내보낸다.
pub fn export_csv(records: &[&HistoryRecord], path: &Path) -> Result<(), HistoryError> {
    write_records(path, records)?;
    tracing::info!(path = %path.display(), count = records.len(), "exported history");
    Ok(())
}

fn cell(record: &HistoryRecord, column: &str) -> String {
    match column {
        CIRCUIT_COLUMN => record.circuit.as_code().to_string(),
        TIMESTAMP_COLUMN => record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        other => record.get(other).map(ToString::to_string).unwrap_or_default(),
    }
}

fn write_records(path: &Path, records: &[&HistoryRecord]) -> Result<(), HistoryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let header = columns(records.iter().copied());
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp)?;
        writer.write_record(&header)?;
        for r in records {
            writer.write_record(header.iter().map(|col| cell(r, col)))?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<HistoryRecord>, HistoryError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut out = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        match parse_row(&headers, &row) {
            Some(record) => out.push(record),
            // 헤더가 1행이므로 데이터 행 번호는 idx + 2
            None => tracing::warn!(path = %path.display(), line = idx + 2, "skipping malformed history row"),
        }
    }
    Ok(out)
}

fn parse_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> Option<HistoryRecord> {
    let mut circuit = None;
    let mut timestamp = None;
    let mut fields = Vec::new();
    for (name, value) in headers.iter().zip(row.iter()) {
        match name {
            CIRCUIT_COLUMN => circuit = CircuitKind::from_code(value),
            TIMESTAMP_COLUMN => {
                timestamp = NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
            }
            _ if value.is_empty() => {}
            _ => fields.push((name.to_string(), FieldValue::parse(value))),
        }
    }
    Some(HistoryRecord {
        timestamp: timestamp?,
        circuit: circuit?,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    #[test]
    fn insert_overwrites_existing_field() {
        let mut r = HistoryRecord::with_timestamp(CircuitKind::Dc, at(1)).with("voltage", 12.0);
        r.insert("voltage", 24.0);
        assert_eq!(r.fields().len(), 1);
        assert_eq!(r.number("voltage"), Some(24.0));
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let a = HistoryRecord::with_timestamp(CircuitKind::Dc, at(1))
            .with("voltage", 12.0)
            .with("current", 2.0);
        let b = HistoryRecord::with_timestamp(CircuitKind::Ac, at(2))
            .with("voltage", 230.0)
            .with("power_factor", 0.9);
        assert_eq!(
            columns([&a, &b]),
            ["circuit_type", "voltage", "current", "power_factor", "timestamp"]
        );
    }

    #[test]
    fn memory_store_counts() {
        let store = MemoryHistoryStore::new();
        assert_eq!(store.append(HistoryRecord::new(CircuitKind::Dc)).unwrap(), 1);
        assert_eq!(store.append(HistoryRecord::new(CircuitKind::Ac)).unwrap(), 2);
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn new_record_has_second_precision() {
        let r = HistoryRecord::new(CircuitKind::Dc);
        assert_eq!(r.timestamp.nanosecond(), 0);
    }
}
