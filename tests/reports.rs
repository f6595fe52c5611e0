use electrical_toolbox::charts;
use electrical_toolbox::circuits::{Connection, InputError};
use electrical_toolbox::history::{CircuitKind, HistoryStore, MemoryHistoryStore};
use electrical_toolbox::i18n::keys;
use electrical_toolbox::reports::{
    record_report, AcInput, AcReport, CapacitorInput, CapacitorReport, DcInput, DcReport, Report,
    ThreePhaseInput, ThreePhaseReport,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn reference_three_phase(connection: Connection) -> ThreePhaseInput {
    ThreePhaseInput {
        connection,
        line_voltage: 380.0,
        line_current: 10.0,
        power_factor: 0.85,
        phase_currents: [10.0, 8.0, 12.0],
    }
}

#[test]
fn ac_report_rows_and_record() {
    let report = AcReport::run(AcInput {
        voltage: 230.0,
        current: 10.0,
        power_factor: 0.8,
        hours: 5.0,
    })
    .expect("valid input");
    assert_close("kWh", report.consumption_kwh, 9.2, 1e-12);

    let rows = report.rows();
    assert_eq!(rows[0].label_key, keys::RESULT_ACTIVE_POWER);
    assert_close("row P", rows[0].quantity.value, 1840.0, 1e-12);

    let record = report.to_record();
    assert_eq!(record.circuit, CircuitKind::Ac);
    assert_eq!(record.number("power_factor"), Some(0.8));
    assert_eq!(record.number("apparent_power"), Some(2300.0));
}

#[test]
fn capacitor_reports_keep_their_variant() {
    let dc = CapacitorReport::run(CapacitorInput::Dc {
        voltage: 12.0,
        capacitance: 0.001,
    })
    .expect("valid dc");
    assert_eq!(dc.circuit(), CircuitKind::CapacitorDc);
    assert_close("charge", dc.to_record().number("charge").unwrap_or_default(), 0.012, 1e-12);

    let err = CapacitorReport::run(CapacitorInput::Ac {
        voltage: 230.0,
        frequency: 0.0,
        capacitance: 1e-4,
    })
    .unwrap_err();
    assert_eq!(err, InputError::NonPositiveFrequency);
}

#[test]
fn three_phase_report_runs_every_analysis() {
    let report = ThreePhaseReport::run(reference_three_phase(Connection::Star)).expect("valid");
    assert_close("Vph", report.system.phase_voltage, 219.393_102, 1e-6);
    assert_close("imbalance", report.imbalance.imbalance_percent, 20.0, 1e-12);
    assert_close("pf eff", report.efficiency.power_factor_efficiency, 85.0, 1e-12);
    // imbalance > 5 → −20, pf 0.85 → −15
    assert_eq!(report.quality.score, 65);

    let record = report.to_record();
    assert_eq!(record.circuit, CircuitKind::ThreePhase);
    assert_eq!(record.get("connection").map(ToString::to_string), Some("star".into()));
    assert_eq!(record.number("current_t"), Some(12.0));
    assert_eq!(record.number("quality_score"), Some(65.0));
}

#[test]
fn star_and_delta_reports_share_totals() {
    let star = ThreePhaseReport::run(reference_three_phase(Connection::Star)).expect("star");
    let delta = ThreePhaseReport::run(reference_three_phase(Connection::Delta)).expect("delta");
    assert_close("delta Iph", delta.system.phase_current, 5.773_503, 1e-6);
    assert_close(
        "total P",
        delta.system.total_active_power,
        star.system.total_active_power,
        1e-12,
    );
    assert_eq!(star.quality, delta.quality);
}

#[test]
fn rejected_input_is_never_recorded() {
    let store = MemoryHistoryStore::new();
    let result = ThreePhaseReport::run(ThreePhaseInput {
        phase_currents: [10.0, 0.0, 10.0],
        ..reference_three_phase(Connection::Delta)
    });
    assert_eq!(result.unwrap_err(), InputError::NonPositivePhaseCurrent);
    assert!(store.load().expect("load").is_empty());

    let ok = DcReport::run(DcInput {
        voltage: 24.0,
        current: 3.0,
        hours: 0.0,
    })
    .expect("valid");
    assert_eq!(record_report(&store, &ok).expect("append"), 1);
}

#[test]
fn charts_follow_report_values() {
    let report = ThreePhaseReport::run(reference_three_phase(Connection::Star)).expect("valid");
    let tri = charts::power_triangle(
        report.system.total_active_power,
        report.system.total_reactive_power,
    );
    assert_close("S", tri.apparent, report.system.total_apparent_power, 1e-9);
    assert_close("φ", tri.angle_deg, report.system.phase_angle_deg, 1e-9);

    let bars = charts::imbalance_bars(report.input.phase_currents);
    assert_close("avg", bars.average, report.imbalance.average, 1e-12);

    let phasors = charts::phasor_diagram(report.system.phase_voltage);
    for p in phasors {
        assert_close("|V|", p.tip[0].hypot(p.tip[1]), report.system.phase_voltage, 1e-9);
    }
}
