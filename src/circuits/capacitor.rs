use std::f64::consts::PI;

/// 직류 커패시터 충전 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacitorDcResult {
    /// 전하량 Q [C]
    pub charge: f64,
    /// 저장 에너지 E [J]
    pub energy: f64,
}

/// 교류 커패시터 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacitorAcResult {
    /// 용량성 리액턴스 Xc [Ω]
    pub reactance: f64,
    /// 전류 [A]
    pub current: f64,
    /// 무효전력 [VAR]
    pub reactive_power: f64,
}

/// Q = C·V, E = ½·C·V².
pub fn calculate_capacitor_dc(voltage: f64, capacitance: f64) -> CapacitorDcResult {
    CapacitorDcResult {
        charge: capacitance * voltage,
        energy: 0.5 * capacitance * voltage.powi(2),
    }
}

/// Xc = 1/(2πfC), I = V/Xc, Q = V·I.
///
/// 주파수와 정전용량은 0보다 커야 한다(호출 측에서 검사).
pub fn calculate_capacitor_ac(voltage: f64, frequency: f64, capacitance: f64) -> CapacitorAcResult {
    let reactance = 1.0 / (2.0 * PI * frequency * capacitance);
    let current = voltage / reactance;
    CapacitorAcResult {
        reactance,
        current,
        reactive_power: voltage * current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ac_reactance_at_mains_frequency() {
        // 100 µF @ 50 Hz → Xc ≈ 31.83 Ω
        let res = calculate_capacitor_ac(230.0, 50.0, 100e-6);
        assert!((res.reactance - 31.830_988_6).abs() < 1e-6);
        assert!((res.current - 230.0 / res.reactance).abs() < 1e-12);
        assert!((res.reactive_power - 230.0 * res.current).abs() < 1e-9);
    }
}
