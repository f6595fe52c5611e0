//! 평형 삼상 계통(Y/Δ 결선) 계산.
//!
//! 선간 전압/전류와 역률만으로 이상적인 평형 상태를 구한다. 상별 전력은 항상
//! 총 전력의 1/3이며, 불평형 부하의 실제 상별 차이는 `analysis::imbalance`에서 다룬다.

use super::ac::phase_angle;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// 삼상 결선 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connection {
    /// 성형(Y) 결선
    Star,
    /// 삼각(Δ) 결선
    Delta,
}

impl Connection {
    pub const ALL: [Connection; 2] = [Connection::Star, Connection::Delta];

    /// 결선에 해당하는 계산 함수를 호출한다.
    pub fn calculate(self, line_voltage: f64, line_current: f64, power_factor: f64) -> ThreePhaseResult {
        match self {
            Connection::Star => calculate_star(line_voltage, line_current, power_factor),
            Connection::Delta => calculate_delta(line_voltage, line_current, power_factor),
        }
    }

    /// 이력 기록과 CLI에서 쓰는 짧은 코드.
    pub fn as_code(self) -> &'static str {
        match self {
            Connection::Star => "star",
            Connection::Delta => "delta",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "star" | "y" | "wye" => Some(Connection::Star),
            "delta" | "d" => Some(Connection::Delta),
            _ => None,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Connection::Star => crate::i18n::keys::CONNECTION_STAR,
            Connection::Delta => crate::i18n::keys::CONNECTION_DELTA,
        }
    }
}

/// 삼상 계통 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePhaseResult {
    /// 상전압 [V]
    pub phase_voltage: f64,
    /// 상전류 [A]
    pub phase_current: f64,
    /// 상별 유효전력 [W]
    pub phase_active_power: f64,
    /// 상별 무효전력 [VAR]
    pub phase_reactive_power: f64,
    /// 상별 피상전력 [VA]
    pub phase_apparent_power: f64,
    /// 상 임피던스 [Ω]
    pub phase_impedance: f64,
    /// 상 저항 [Ω]
    pub phase_resistance: f64,
    /// 상 리액턴스 [Ω]
    pub phase_reactance: f64,
    /// 선간 전압 [V]
    pub line_voltage: f64,
    /// 선전류 [A]
    pub line_current: f64,
    /// 총 유효전력 [W]
    pub total_active_power: f64,
    /// 총 무효전력 [VAR]
    pub total_reactive_power: f64,
    /// 총 피상전력 [VA]
    pub total_apparent_power: f64,
    /// 역률
    pub power_factor: f64,
    /// 위상각 [°]
    pub phase_angle_deg: f64,
}

/// Y 결선: 상전압 = VL/√3, 상전류 = IL.
pub fn calculate_star(line_voltage: f64, line_current: f64, power_factor: f64) -> ThreePhaseResult {
    let phase_voltage = line_voltage / SQRT_3;
    let phase_current = line_current;
    system_state(line_voltage, line_current, power_factor, phase_voltage, phase_current)
}

/// Δ 결선: 상전압 = VL, 상전류 = IL/√3.
pub fn calculate_delta(line_voltage: f64, line_current: f64, power_factor: f64) -> ThreePhaseResult {
    let phase_voltage = line_voltage;
    let phase_current = line_current / SQRT_3;
    system_state(line_voltage, line_current, power_factor, phase_voltage, phase_current)
}

/// 결선별 상전압/상전류가 정해진 뒤의 공통 계산.
fn system_state(
    line_voltage: f64,
    line_current: f64,
    power_factor: f64,
    phase_voltage: f64,
    phase_current: f64,
) -> ThreePhaseResult {
    let angle = phase_angle(power_factor);
    let sin_phi = angle.sin();

    let total_apparent_power = SQRT_3 * line_voltage * line_current;
    let total_active_power = total_apparent_power * power_factor;
    let total_reactive_power = total_apparent_power * sin_phi;

    let phase_impedance = phase_voltage / phase_current;

    ThreePhaseResult {
        phase_voltage,
        phase_current,
        phase_active_power: total_active_power / 3.0,
        phase_reactive_power: total_reactive_power / 3.0,
        phase_apparent_power: total_apparent_power / 3.0,
        phase_impedance,
        phase_resistance: phase_impedance * power_factor,
        phase_reactance: phase_impedance * sin_phi,
        line_voltage,
        line_current,
        total_active_power,
        total_reactive_power,
        total_apparent_power,
        power_factor,
        phase_angle_deg: angle.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt3_constant_matches_std() {
        assert!((SQRT_3 - 3f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn per_phase_power_is_one_third_of_total() {
        for conn in Connection::ALL {
            let r = conn.calculate(400.0, 16.0, 0.9);
            assert!((r.phase_active_power * 3.0 - r.total_active_power).abs() < 1e-9);
            assert!((r.phase_reactive_power * 3.0 - r.total_reactive_power).abs() < 1e-9);
            assert!((r.phase_apparent_power * 3.0 - r.total_apparent_power).abs() < 1e-9);
        }
    }

    #[test]
    fn connection_codes() {
        assert_eq!(Connection::from_code("Y"), Some(Connection::Star));
        assert_eq!(Connection::from_code("delta"), Some(Connection::Delta));
        assert_eq!(Connection::from_code("zigzag"), None);
        assert_eq!(Connection::Delta.as_code(), "delta");
    }
}
