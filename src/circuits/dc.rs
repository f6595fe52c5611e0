/// 직류 회로 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcResult {
    /// 저항 [Ω]
    pub resistance: f64,
    /// 전력 [W]
    pub power: f64,
}

/// 옴의 법칙으로 저항과 전력을 계산한다.
///
/// 전류가 0이 아니어야 한다. `validate_dc`를 통과한 입력이면 보장된다.
pub fn calculate_dc(voltage: f64, current: f64) -> DcResult {
    DcResult {
        resistance: voltage / current,
        power: voltage * current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ohms_law() {
        let res = calculate_dc(12.0, 2.0);
        assert_eq!(res.resistance, 6.0);
        assert_eq!(res.power, 24.0);
        assert!((res.resistance * 2.0 - 12.0).abs() < 1e-12);
    }
}
