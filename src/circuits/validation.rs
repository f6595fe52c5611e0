//! 계산 전에 원시 입력값의 물리적 제약을 검사한다.
//!
//! 모든 검사는 순서대로 수행되며 처음 실패한 항목만 보고한다.

/// 입력 제약 위반. `Display` 결과가 사용자에게 보여줄 메시지다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("voltage must be greater than 0")]
    NonPositiveVoltage,
    #[error("current must be greater than 0")]
    NonPositiveCurrent,
    #[error("power factor must be between -1 and 1")]
    PowerFactorOutOfRange,
    #[error("capacitance must be greater than 0")]
    NonPositiveCapacitance,
    #[error("frequency must be greater than 0")]
    NonPositiveFrequency,
    #[error("phase currents must be greater than 0")]
    NonPositivePhaseCurrent,
    #[error("operating hours cannot be negative")]
    NegativeHours,
}

impl InputError {
    /// 번역 키. 프런트엔드는 이 키로 지역화된 메시지를 찾는다.
    pub fn message_key(&self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            InputError::NonPositiveVoltage => ERROR_VOLTAGE,
            InputError::NonPositiveCurrent => ERROR_CURRENT,
            InputError::PowerFactorOutOfRange => ERROR_POWER_FACTOR,
            InputError::NonPositiveCapacitance => ERROR_CAPACITANCE,
            InputError::NonPositiveFrequency => ERROR_FREQUENCY,
            InputError::NonPositivePhaseCurrent => ERROR_PHASE_CURRENTS,
            InputError::NegativeHours => ERROR_HOURS,
        }
    }
}

// NaN은 비교가 항상 거짓이므로 `!(x > 0.0)` 형태로 함께 걸러낸다.
fn positive(value: f64, err: InputError) -> Result<(), InputError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(err)
    }
}

/// 직류 입력 검사: 전압 > 0, 전류 > 0.
pub fn validate_dc(voltage: f64, current: f64) -> Result<(), InputError> {
    positive(voltage, InputError::NonPositiveVoltage)?;
    positive(current, InputError::NonPositiveCurrent)
}

/// 교류 입력 검사: 직류 검사 후 역률이 [-1, 1] 범위인지 확인한다.
pub fn validate_ac(voltage: f64, current: f64, power_factor: f64) -> Result<(), InputError> {
    validate_dc(voltage, current)?;
    if (-1.0..=1.0).contains(&power_factor) {
        Ok(())
    } else {
        Err(InputError::PowerFactorOutOfRange)
    }
}

/// 커패시터 직류 입력 검사: 전압, 정전용량 순.
pub fn validate_capacitor_dc(voltage: f64, capacitance: f64) -> Result<(), InputError> {
    positive(voltage, InputError::NonPositiveVoltage)?;
    positive(capacitance, InputError::NonPositiveCapacitance)
}

/// 커패시터 교류 입력 검사: 전압, 정전용량, 주파수 순.
pub fn validate_capacitor_ac(
    voltage: f64,
    frequency: f64,
    capacitance: f64,
) -> Result<(), InputError> {
    validate_capacitor_dc(voltage, capacitance)?;
    positive(frequency, InputError::NonPositiveFrequency)
}

/// 삼상 선간값 검사. 교류 검사와 같은 규칙을 선간 전압/전류에 적용한다.
pub fn validate_three_phase(
    line_voltage: f64,
    line_current: f64,
    power_factor: f64,
) -> Result<(), InputError> {
    validate_ac(line_voltage, line_current, power_factor)
}

/// 상별 전류(R, S, T) 검사.
pub fn validate_phase_currents(currents: [f64; 3]) -> Result<(), InputError> {
    currents
        .iter()
        .try_for_each(|&i| positive(i, InputError::NonPositivePhaseCurrent))
}

/// 운전 시간 검사. 0시간은 허용한다.
pub fn validate_hours(hours: f64) -> Result<(), InputError> {
    if hours >= 0.0 {
        Ok(())
    } else {
        Err(InputError::NegativeHours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_is_checked_before_current() {
        assert_eq!(validate_dc(-5.0, 2.0), Err(InputError::NonPositiveVoltage));
        assert_eq!(validate_dc(-5.0, -2.0), Err(InputError::NonPositiveVoltage));
        assert_eq!(validate_ac(-5.0, 0.0, 3.0), Err(InputError::NonPositiveVoltage));
    }

    #[test]
    fn ac_rejects_power_factor_outside_unit_range() {
        assert_eq!(validate_ac(230.0, 1.0, 1.01), Err(InputError::PowerFactorOutOfRange));
        assert_eq!(validate_ac(230.0, 1.0, -1.01), Err(InputError::PowerFactorOutOfRange));
        assert!(validate_ac(230.0, 1.0, -1.0).is_ok());
        assert!(validate_ac(230.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn nan_inputs_are_rejected() {
        assert_eq!(validate_dc(f64::NAN, 1.0), Err(InputError::NonPositiveVoltage));
        assert_eq!(validate_ac(1.0, 1.0, f64::NAN), Err(InputError::PowerFactorOutOfRange));
    }

    #[test]
    fn capacitor_checks_run_in_order() {
        assert_eq!(
            validate_capacitor_ac(10.0, 0.0, 0.0),
            Err(InputError::NonPositiveCapacitance)
        );
        assert_eq!(
            validate_capacitor_ac(10.0, 0.0, 1e-6),
            Err(InputError::NonPositiveFrequency)
        );
        assert!(validate_capacitor_dc(12.0, 0.001).is_ok());
    }

    #[test]
    fn phase_currents_and_hours() {
        assert_eq!(
            validate_phase_currents([10.0, 0.0, 10.0]),
            Err(InputError::NonPositivePhaseCurrent)
        );
        assert!(validate_phase_currents([10.0, 8.0, 12.0]).is_ok());
        assert!(validate_hours(0.0).is_ok());
        assert_eq!(validate_hours(-1.0), Err(InputError::NegativeHours));
    }

    #[test]
    fn messages_match_user_facing_text() {
        assert_eq!(
            InputError::NonPositiveVoltage.to_string(),
            "voltage must be greater than 0"
        );
        assert_eq!(
            InputError::PowerFactorOutOfRange.to_string(),
            "power factor must be between -1 and 1"
        );
    }
}
