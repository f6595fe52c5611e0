/// 단상 교류 전력 삼각형.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcPowers {
    /// 유효전력 P [W]
    pub active: f64,
    /// 무효전력 Q [VAR], 항상 0 이상
    pub reactive: f64,
    /// 피상전력 S [VA]
    pub apparent: f64,
}

/// 단상 교류 임피던스 분해 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcImpedance {
    /// 임피던스 크기 Z [Ω]
    pub impedance: f64,
    /// 저항 성분 R [Ω]
    pub resistance: f64,
    /// 리액턴스 성분 X [Ω]
    pub reactance: f64,
}

/// 역률로부터 위상각 φ = acos(pf) [rad]을 구한다. 결과는 [0, π].
pub fn phase_angle(power_factor: f64) -> f64 {
    power_factor.acos()
}

/// 전압, 전류, 역률로 유효/무효/피상 전력을 계산한다.
///
/// sin(φ)는 [0, π]에서 음수가 되지 않으므로 유도성/용량성 부호는 구분하지 않는다.
pub fn calculate_powers(voltage: f64, current: f64, power_factor: f64) -> AcPowers {
    let apparent = voltage * current;
    AcPowers {
        active: apparent * power_factor,
        reactive: apparent * phase_angle(power_factor).sin(),
        apparent,
    }
}

/// 임피던스와 저항/리액턴스 성분을 계산한다. 전류가 0이 아니어야 한다.
pub fn calculate_impedance(voltage: f64, current: f64, power_factor: f64) -> AcImpedance {
    let impedance = voltage / current;
    AcImpedance {
        impedance,
        resistance: impedance * power_factor,
        reactance: impedance * phase_angle(power_factor).sin(),
    }
}

/// 유효전력 [W]과 운전 시간 [h]으로 소비 전력량 [kWh]을 계산한다.
pub fn consumption_kwh(active_power_w: f64, hours: f64) -> f64 {
    active_power_w * hours / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_power_factor_has_no_reactive_part() {
        let p = calculate_powers(230.0, 10.0, 1.0);
        assert_eq!(p.active, 2300.0);
        assert!(p.reactive.abs() < 1e-9);
        assert_eq!(p.apparent, 2300.0);
    }

    #[test]
    fn negative_power_factor_keeps_reactive_positive() {
        let p = calculate_powers(100.0, 1.0, -0.6);
        assert!((p.active + 60.0).abs() < 1e-9);
        assert!((p.reactive - 80.0).abs() < 1e-9);
    }

    #[test]
    fn consumption_in_kwh() {
        assert_eq!(consumption_kwh(1500.0, 4.0), 6.0);
        assert_eq!(consumption_kwh(1500.0, 0.0), 0.0);
    }
}
