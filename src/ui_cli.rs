use std::io::{self, Write};
use std::path::PathBuf;

use crate::analysis::{ImbalanceLevel, QualityRating};
use crate::app::{AppError, Session};
use crate::circuits::{Connection, InputError};
use crate::history::{self, CircuitKind, HistoryRecord, HistoryStore, HistorySummary, TIMESTAMP_FORMAT};
use crate::i18n::keys::*;
use crate::i18n::Translator;
use crate::quantity::ResultRow;
use crate::reports::{
    AcInput, AcReport, CapacitorInput, CapacitorReport, DcInput, DcReport, Report,
    ThreePhaseInput, ThreePhaseReport,
};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Dc,
    Ac,
    CapacitorDc,
    CapacitorAc,
    ThreePhase,
    History,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(MAIN_MENU_TITLE));
    for key in [
        MAIN_MENU_DC,
        MAIN_MENU_AC,
        MAIN_MENU_CAPACITOR_DC,
        MAIN_MENU_CAPACITOR_AC,
        MAIN_MENU_THREE_PHASE,
        MAIN_MENU_HISTORY,
        MAIN_MENU_SETTINGS,
        MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(PROMPT_MENU_SELECT))?;
        if let Some(choice) = parse_menu(&sel) {
            return Ok(choice);
        }
        println!("{}", tr.t(INVALID_SELECTION_RETRY));
    }
}

fn parse_menu(sel: &str) -> Option<MenuChoice> {
    Some(match sel.trim() {
        "1" => MenuChoice::Dc,
        "2" => MenuChoice::Ac,
        "3" => MenuChoice::CapacitorDc,
        "4" => MenuChoice::CapacitorAc,
        "5" => MenuChoice::ThreePhase,
        "6" => MenuChoice::History,
        "7" => MenuChoice::Settings,
        "0" => MenuChoice::Exit,
        _ => return None,
    })
}

/// 직류 저항 회로 메뉴.
pub fn handle_dc(session: &Session) -> Result<(), AppError> {
    let tr = &session.translator;
    println!("\n-- {} --", tr.t(CIRCUIT_DC));
    let input = DcInput {
        voltage: read_f64(tr, INPUT_VOLTAGE)?,
        current: read_f64(tr, INPUT_CURRENT)?,
        hours: read_f64(tr, INPUT_HOURS)?,
    };
    match DcReport::run(input) {
        Ok(report) => show_report(session, &report),
        Err(err) => report_input_error(tr, err),
    }
}

/// 단상 교류 회로 메뉴.
pub fn handle_ac(session: &Session) -> Result<(), AppError> {
    let tr = &session.translator;
    println!("\n-- {} --", tr.t(CIRCUIT_AC));
    let input = AcInput {
        voltage: read_f64(tr, INPUT_VOLTAGE)?,
        current: read_f64(tr, INPUT_CURRENT)?,
        power_factor: read_f64(tr, INPUT_POWER_FACTOR)?,
        hours: read_f64(tr, INPUT_HOURS)?,
    };
    match AcReport::run(input) {
        Ok(report) => show_report(session, &report),
        Err(err) => report_input_error(tr, err),
    }
}

pub fn handle_capacitor_dc(session: &Session) -> Result<(), AppError> {
    let tr = &session.translator;
    println!("\n-- {} --", tr.t(CIRCUIT_CAPACITOR_DC));
    let input = CapacitorInput::Dc {
        voltage: read_f64(tr, INPUT_VOLTAGE)?,
        capacitance: read_f64(tr, INPUT_CAPACITANCE)?,
    };
    match CapacitorReport::run(input) {
        Ok(report) => show_report(session, &report),
        Err(err) => report_input_error(tr, err),
    }
}

/// 빈 입력이면 설정의 기본 주파수를 쓴다.
pub fn handle_capacitor_ac(session: &Session) -> Result<(), AppError> {
    let tr = &session.translator;
    println!("\n-- {} --", tr.t(CIRCUIT_CAPACITOR_AC));
    let voltage = read_f64(tr, INPUT_VOLTAGE)?;
    let frequency = read_f64_or(tr, INPUT_FREQUENCY, session.config.default_frequency_hz)?;
    let capacitance = read_f64(tr, INPUT_CAPACITANCE)?;
    let input = CapacitorInput::Ac {
        voltage,
        frequency,
        capacitance,
    };
    match CapacitorReport::run(input) {
        Ok(report) => show_report(session, &report),
        Err(err) => report_input_error(tr, err),
    }
}

pub fn handle_three_phase(session: &Session) -> Result<(), AppError> {
    let tr = &session.translator;
    println!("\n-- {} --", tr.t(CIRCUIT_THREE_PHASE));
    let connection = loop {
        let sel = read_line(&format!("{}: ", tr.t(INPUT_CONNECTION)))?;
        match sel.trim() {
            "1" => break Connection::Star,
            "2" => break Connection::Delta,
            other => match Connection::from_code(other) {
                Some(c) => break c,
                None => println!("{}", tr.t(INVALID_SELECTION_RETRY)),
            },
        }
    };
    let input = ThreePhaseInput {
        connection,
        line_voltage: read_f64(tr, INPUT_LINE_VOLTAGE)?,
        line_current: read_f64(tr, INPUT_LINE_CURRENT)?,
        power_factor: read_f64(tr, INPUT_POWER_FACTOR)?,
        phase_currents: [
            read_f64(tr, INPUT_CURRENT_R)?,
            read_f64(tr, INPUT_CURRENT_S)?,
            read_f64(tr, INPUT_CURRENT_T)?,
        ],
    };
    match ThreePhaseReport::run(input) {
        Ok(report) => {
            print_three_phase(tr, &report, session.config.display_decimals());
            save_report(session, &report)
        }
        Err(err) => report_input_error(tr, err),
    }
}

/// 결과 행을 출력하고 이력에 저장한다.
pub fn show_report(session: &Session, report: &dyn Report) -> Result<(), AppError> {
    let tr = &session.translator;
    println!("\n{}", tr.t(SECTION_RESULTS));
    print_rows(tr, &report.rows(), session.config.display_decimals());
    save_report(session, report)
}

pub fn save_report(session: &Session, report: &dyn Report) -> Result<(), AppError> {
    if let Some(count) = session.persist(report)? {
        println!(
            "{}",
            session
                .translator
                .fmt(HISTORY_SAVED, &[("count", count.to_string())])
        );
    }
    Ok(())
}

pub fn print_rows(tr: &Translator, rows: &[ResultRow], decimals: usize) {
    for row in rows {
        println!("  {}: {}", tr.t(row.label_key), row.quantity.format(decimals));
    }
}

/// 삼상 보고서를 구역별로 출력한다.
pub fn print_three_phase(tr: &Translator, report: &ThreePhaseReport, decimals: usize) {
    println!("\n{} ({})", tr.t(SECTION_PER_PHASE), tr.t(report.input.connection.label_key()));
    print_rows(tr, &report.phase_rows(), decimals);

    println!("\n{}", tr.t(SECTION_TOTALS));
    print_rows(tr, &report.total_rows(), decimals);

    println!("\n{}", tr.t(SECTION_IMBALANCE));
    print_rows(tr, &report.imbalance_rows(), decimals);
    let level = ImbalanceLevel::classify(report.imbalance.imbalance_percent);
    println!("  {}", tr.t(level.label_key()));

    println!("\n{}", tr.t(SECTION_EFFICIENCY));
    print_rows(tr, &report.efficiency_rows(), decimals);
    println!(
        "  {}: {}",
        tr.t(EFFICIENCY_CATEGORY),
        tr.t(report.efficiency.category.label_key())
    );
    if !report.efficiency.recommendations.is_empty() {
        println!("  {}:", tr.t(SECTION_RECOMMENDATIONS));
        for rec in &report.efficiency.recommendations {
            println!("   - {}", tr.t(rec.label_key()));
        }
    }

    println!("\n{}", tr.t(SECTION_QUALITY));
    print_rows(tr, &report.quality_rows(), decimals);
    println!("  {}", tr.t(QualityRating::from_score(report.quality.score).label_key()));
    for finding in &report.quality.findings {
        println!("   - {}: {}", tr.t(finding.label_key()), finding.value_text());
    }
}

/// 이력 요약과 레코드를 출력한다. `filter`가 비어 있으면 전체를 보여준다.
pub fn print_history(session: &Session, filter: &[CircuitKind]) -> Result<(), AppError> {
    let tr = &session.translator;
    println!("\n-- {} --", tr.t(HISTORY_HEADING));
    let records = session.store().load()?;
    let selected = history::filter_records(&records, filter);
    if selected.is_empty() {
        println!("{}", tr.t(HISTORY_EMPTY));
        return Ok(());
    }

    let summary = HistorySummary::from_records(selected.iter().copied());
    println!("{} {}", tr.t(HISTORY_TOTAL), summary.total);
    if let (Some(first), Some(last)) = (summary.first, summary.last) {
        println!(
            "{} {} ~ {}",
            tr.t(HISTORY_RANGE),
            first.format(TIMESTAMP_FORMAT),
            last.format(TIMESTAMP_FORMAT)
        );
    }
    println!("{}", tr.t(HISTORY_BY_CIRCUIT));
    for (kind, count) in &summary.by_circuit {
        println!("  {}: {count}", tr.t(kind.label_key()));
    }
    println!();
    for record in selected {
        println!("{}", record_line(tr, record, session.config.display_decimals()));
    }
    Ok(())
}

fn record_line(tr: &Translator, record: &HistoryRecord, decimals: usize) -> String {
    let fields: Vec<String> = record
        .fields()
        .iter()
        .map(|(name, value)| match value.as_number() {
            Some(n) => format!("{name}={n:.decimals$}"),
            None => format!("{name}={value}"),
        })
        .collect();
    format!(
        "[{}] {}: {}",
        record.timestamp.format(TIMESTAMP_FORMAT),
        tr.t(record.circuit.label_key()),
        fields.join(", ")
    )
}

/// 설정 메뉴. 빈 입력은 현재 값을 유지한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    let tr = session.translator.clone();
    let cfg = &mut session.config;
    println!("{}", tr.t(SETTINGS_HEADING));
    println!("{}", tr.t(SETTINGS_PROMPT_KEEP));

    let lang = read_line(&format!("{} [{}]: ", tr.t(SETTINGS_LANGUAGE), cfg.language))?;
    match lang.trim() {
        "" => {}
        l @ ("auto" | "en" | "es" | "ko") => cfg.language = l.to_string(),
        _ => println!("{}", tr.t(INVALID_SELECTION_RETRY)),
    }

    let decimals = read_line(&format!("{} [{}]: ", tr.t(SETTINGS_DECIMALS), cfg.decimals))?;
    if !decimals.trim().is_empty() {
        match decimals.trim().parse::<usize>() {
            Ok(d) => cfg.decimals = d,
            Err(_) => println!("{}", tr.t(ERROR_INVALID_NUMBER)),
        }
    }

    let path = read_line(&format!(
        "{} [{}]: ",
        tr.t(SETTINGS_HISTORY_PATH),
        cfg.history_path.display()
    ))?;
    if !path.trim().is_empty() {
        cfg.history_path = PathBuf::from(path.trim());
    }

    let save = read_line(&format!(
        "{} (y/n) [{}]: ",
        tr.t(SETTINGS_SAVE_HISTORY),
        if cfg.save_history { "y" } else { "n" }
    ))?;
    match save.trim().to_lowercase().as_str() {
        "" => {}
        "y" | "yes" | "s" | "si" | "sí" => cfg.save_history = true,
        "n" | "no" => cfg.save_history = false,
        _ => println!("{}", tr.t(INVALID_SELECTION_RETRY)),
    }
    tracing::info!(language = %cfg.language, decimals = cfg.decimals, "settings updated");
    Ok(())
}

/// 입력 오류는 복구 가능하므로 메시지만 출력하고 메뉴로 돌아간다.
fn report_input_error(tr: &Translator, err: InputError) -> Result<(), AppError> {
    tracing::debug!(%err, "input rejected");
    println!("{}: {}", tr.t(ERROR_PREFIX), tr.t(err.message_key()));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, label_key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{}: ", tr.t(label_key)))?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64_or(tr: &Translator, label_key: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{} [{default}]: ", tr.t(label_key)))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::FieldValue;
    use chrono::NaiveDate;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu(" 5\n"), Some(MenuChoice::ThreePhase));
        assert_eq!(parse_menu("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu("9"), None);
    }

    #[test]
    fn record_line_formats_numbers_and_text() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let record = HistoryRecord::with_timestamp(CircuitKind::ThreePhase, ts)
            .with("connection", FieldValue::from("delta"))
            .with("line_voltage", 380.0);
        let line = record_line(&Translator::new("en"), &record, 1);
        assert_eq!(
            line,
            "[2024-03-01 08:30:00] Three-phase: connection=delta, line_voltage=380.0"
        );
    }
}
