use electrical_toolbox::circuits::{
    calculate_capacitor_ac, calculate_capacitor_dc, calculate_dc, calculate_delta,
    calculate_impedance, calculate_powers, calculate_star, consumption_kwh, validate_ac,
    validate_capacitor_ac, validate_dc, validate_three_phase, Connection, InputError,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn dc_resistance_times_current_is_voltage() {
    for (v, i) in [(12.0, 2.0), (230.0, 0.37), (0.5, 1e-3), (1e4, 250.0)] {
        let res = calculate_dc(v, i);
        assert_close("R", res.resistance, v / i, 1e-12);
        assert_close("P", res.power, v * i, 1e-12);
        assert_close("R*I", res.resistance * i, v, 1e-12);
    }
}

#[test]
fn ac_power_triangle_identity() {
    for pf in [-1.0, -0.6, 0.0, 0.3, 0.85, 0.99, 1.0] {
        let p = calculate_powers(230.0, 7.5, pf);
        assert_close(
            "P²+Q²",
            p.active.powi(2) + p.reactive.powi(2),
            p.apparent.powi(2),
            1e-9,
        );
        assert!(p.reactive >= 0.0, "reactive power is never negative (pf={pf})");
    }
}

#[test]
fn ac_impedance_components() {
    let z = calculate_impedance(230.0, 10.0, 0.8);
    assert_close("Z", z.impedance, 23.0, 1e-12);
    assert_close("R", z.resistance, 18.4, 1e-12);
    assert_close("X", z.reactance, 13.8, 1e-9);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let a = calculate_powers(400.0, 3.3, 0.72);
    let b = calculate_powers(400.0, 3.3, 0.72);
    assert_eq!(a.active.to_bits(), b.active.to_bits());
    assert_eq!(a.reactive.to_bits(), b.reactive.to_bits());
    let s1 = calculate_star(380.0, 10.0, 0.85);
    let s2 = calculate_star(380.0, 10.0, 0.85);
    assert_eq!(s1, s2);
}

#[test]
fn consumption_in_kwh() {
    assert_close("kWh", consumption_kwh(1500.0, 8.0), 12.0, 1e-12);
    assert_eq!(consumption_kwh(1500.0, 0.0), 0.0);
}

#[test]
fn capacitor_dc_reference() {
    let res = calculate_capacitor_dc(12.0, 0.001);
    assert_close("charge", res.charge, 0.012, 1e-12);
    assert_close("energy", res.energy, 0.072, 1e-12);
}

#[test]
fn capacitor_ac_reference() {
    // 100 µF @ 50 Hz → Xc = 31.83 Ω
    let res = calculate_capacitor_ac(230.0, 50.0, 100e-6);
    assert_close("Xc", res.reactance, 31.830_988_6, 1e-8);
    assert_close("I", res.current, 230.0 / res.reactance, 1e-12);
    assert_close("Q", res.reactive_power, 230.0 * res.current, 1e-12);
}

#[test]
fn star_and_delta_reference_values() {
    let star = calculate_star(380.0, 10.0, 0.85);
    let delta = calculate_delta(380.0, 10.0, 0.85);
    assert_close("star Vph", star.phase_voltage, 219.393_102, 1e-6);
    assert_close("star Iph", star.phase_current, 10.0, 1e-12);
    assert_close("delta Vph", delta.phase_voltage, 380.0, 1e-12);
    assert_close("delta Iph", delta.phase_current, 5.773_503, 1e-6);
    assert_close("star P", star.total_active_power, 5594.524_108, 1e-6);
    assert_close("delta P", delta.total_active_power, star.total_active_power, 1e-12);
    assert_close("per-phase P", star.phase_active_power * 3.0, star.total_active_power, 1e-12);
    assert_close("angle", star.phase_angle_deg, 31.788_331, 1e-6);
}

#[test]
fn connection_tag_selects_the_matching_calculator() {
    assert_eq!(
        Connection::Star.calculate(400.0, 5.0, 0.9),
        calculate_star(400.0, 5.0, 0.9)
    );
    assert_eq!(
        Connection::Delta.calculate(400.0, 5.0, 0.9),
        calculate_delta(400.0, 5.0, 0.9)
    );
    assert_eq!(Connection::from_code("Y"), Some(Connection::Star));
    assert_eq!(Connection::from_code("delta"), Some(Connection::Delta));
    assert_eq!(Connection::from_code("zigzag"), None);
}

#[test]
fn validation_reports_first_failure_only() {
    assert_eq!(validate_dc(-5.0, 2.0), Err(InputError::NonPositiveVoltage));
    assert_eq!(validate_dc(-5.0, -2.0), Err(InputError::NonPositiveVoltage));
    assert_eq!(validate_dc(5.0, 0.0), Err(InputError::NonPositiveCurrent));
    assert_eq!(validate_dc(5.0, 2.0), Ok(()));
    assert_eq!(validate_ac(0.0, 0.0, 3.0), Err(InputError::NonPositiveVoltage));
    assert_eq!(validate_ac(230.0, 1.0, 1.01), Err(InputError::PowerFactorOutOfRange));
    assert_eq!(validate_ac(230.0, 1.0, -1.0), Ok(()));
    assert_eq!(validate_three_phase(380.0, 0.0, 0.9), Err(InputError::NonPositiveCurrent));
    assert_eq!(
        validate_capacitor_ac(230.0, 0.0, 0.0),
        Err(InputError::NonPositiveCapacitance)
    );
}

#[test]
fn validation_messages_are_human_readable() {
    assert_eq!(
        InputError::NonPositiveVoltage.to_string(),
        "voltage must be greater than 0"
    );
    assert_eq!(
        InputError::NonPositiveCurrent.to_string(),
        "current must be greater than 0"
    );
    assert_eq!(
        InputError::PowerFactorOutOfRange.to_string(),
        "power factor must be between -1 and 1"
    );
}
