//! 결과 시각화용 데이터 계열. 그리기는 GUI가 맡고 여기서는 좌표만 만든다.

use crate::i18n::keys::*;
use crate::reports::CapacitorReport;

/// 라벨이 붙은 막대 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarValue {
    pub label_key: &'static str,
    pub value: f64,
}

impl BarValue {
    fn new(label_key: &'static str, value: f64) -> Self {
        Self { label_key, value }
    }
}

/// 전력 삼각형: 외곽선, 피상전력 빗변, 위상각.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTriangle {
    pub outline: Vec<[f64; 2]>,
    pub hypotenuse: [[f64; 2]; 2],
    pub apparent: f64,
    pub angle_deg: f64,
}

pub fn power_triangle(active: f64, reactive: f64) -> PowerTriangle {
    PowerTriangle {
        outline: vec![[0.0, 0.0], [active, 0.0], [active, reactive], [0.0, 0.0]],
        hypotenuse: [[0.0, 0.0], [active, reactive]],
        apparent: active.hypot(reactive),
        angle_deg: reactive.atan2(active).to_degrees(),
    }
}

/// 유효/무효 전력 비율 [%]. 합이 0이면 둘 다 0.
pub fn power_distribution(active: f64, reactive: f64) -> [BarValue; 2] {
    let total = active.abs() + reactive.abs();
    let share = |v: f64| if total > 0.0 { v.abs() / total * 100.0 } else { 0.0 };
    [
        BarValue::new(RESULT_ACTIVE_POWER, share(active)),
        BarValue::new(RESULT_REACTIVE_POWER, share(reactive)),
    ]
}

pub fn dc_bars(voltage: f64, current: f64, resistance: f64) -> [BarValue; 3] {
    [
        BarValue::new(INPUT_VOLTAGE, voltage),
        BarValue::new(INPUT_CURRENT, current),
        BarValue::new(RESULT_RESISTANCE, resistance),
    ]
}

pub fn capacitor_bars(report: &CapacitorReport) -> Vec<BarValue> {
    match *report {
        CapacitorReport::Dc { result, .. } => vec![
            BarValue::new(RESULT_CHARGE, result.charge),
            BarValue::new(RESULT_ENERGY, result.energy),
        ],
        CapacitorReport::Ac { result, .. } => vec![
            BarValue::new(RESULT_CAPACITIVE_REACTANCE, result.reactance),
            BarValue::new(INPUT_CURRENT, result.current),
            BarValue::new(RESULT_REACTIVE_POWER, result.reactive_power),
        ],
    }
}

/// 위상자 하나. 원점에서 `tip`까지 그린다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phasor {
    pub phase: &'static str,
    pub angle_deg: f64,
    pub tip: [f64; 2],
}

/// 평형 삼상 전압 위상자 (R 0°, S -120°, T +120°).
pub fn phasor_diagram(phase_voltage: f64) -> [Phasor; 3] {
    let phasor = |phase: &'static str, angle_deg: f64| {
        let rad = angle_deg.to_radians();
        Phasor {
            phase,
            angle_deg,
            tip: [phase_voltage * rad.cos(), phase_voltage * rad.sin()],
        }
    };
    [phasor("R", 0.0), phasor("S", -120.0), phasor("T", 120.0)]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImbalanceBars {
    pub bars: [BarValue; 3],
    /// 평균 기준선
    pub average: f64,
}

pub fn imbalance_bars(currents: [f64; 3]) -> ImbalanceBars {
    let [r, s, t] = currents;
    ImbalanceBars {
        bars: [
            BarValue::new(INPUT_CURRENT_R, r),
            BarValue::new(INPUT_CURRENT_S, s),
            BarValue::new(INPUT_CURRENT_T, t),
        ],
        average: (r + s + t) / 3.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_closes_and_matches_apparent_power() {
        let tri = power_triangle(3.0, 4.0);
        assert_eq!(tri.outline.first(), tri.outline.last());
        assert!((tri.apparent - 5.0).abs() < 1e-12);
        assert!((tri.angle_deg - 53.130_102).abs() < 1e-5);
    }

    #[test]
    fn distribution_sums_to_hundred() {
        let [p, q] = power_distribution(300.0, 100.0);
        assert!((p.value - 75.0).abs() < 1e-12);
        assert!((p.value + q.value - 100.0).abs() < 1e-12);
        let [p, q] = power_distribution(0.0, 0.0);
        assert_eq!((p.value, q.value), (0.0, 0.0));
    }

    #[test]
    fn phasors_are_120_degrees_apart() {
        let [r, s, t] = phasor_diagram(100.0);
        assert!((r.tip[0] - 100.0).abs() < 1e-9 && r.tip[1].abs() < 1e-9);
        assert!(s.tip[1] < 0.0 && t.tip[1] > 0.0);
        assert!((s.tip[0] - t.tip[0]).abs() < 1e-9);
        assert!((s.tip[0] + 50.0).abs() < 1e-9);
    }

    #[test]
    fn imbalance_bars_carry_average() {
        let bars = imbalance_bars([10.0, 8.0, 12.0]);
        assert_eq!(bars.average, 10.0);
        assert_eq!(bars.bars[2].label_key, INPUT_CURRENT_T);
    }
}
