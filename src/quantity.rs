/// 결과 표시 시 다루는 전기량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Voltage,
    Current,
    /// 저항/임피던스/리액턴스
    Resistance,
    ActivePower,
    ReactivePower,
    ApparentPower,
    EnergyKwh,
    EnergyJoule,
    Charge,
    Capacitance,
    Frequency,
    PowerFactor,
    AngleDegrees,
    Percent,
    Currency,
    Power,
    Score,
}

impl QuantityKind {
    /// 단위 기호. 무차원 값은 빈 문자열.
    pub fn symbol(self) -> &'static str {
        match self {
            QuantityKind::Voltage => "V",
            QuantityKind::Current => "A",
            QuantityKind::Resistance => "Ω",
            QuantityKind::ActivePower => "W",
            QuantityKind::ReactivePower => "VAR",
            QuantityKind::ApparentPower => "VA",
            QuantityKind::EnergyKwh => "kWh",
            QuantityKind::EnergyJoule => "J",
            QuantityKind::Charge => "C",
            QuantityKind::Capacitance => "F",
            QuantityKind::Frequency => "Hz",
            QuantityKind::PowerFactor => "",
            QuantityKind::AngleDegrees => "°",
            QuantityKind::Percent => "%",
            QuantityKind::Currency => "$",
            QuantityKind::Power => "kW",
            QuantityKind::Score => "/100",
        }
    }
}

/// 값과 종류를 함께 담는 컨테이너.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityValue {
    pub kind: QuantityKind,
    pub value: f64,
}

/// 표시 소수점 자릿수 상한.
pub const MAX_DECIMALS: usize = 9;

impl QuantityValue {
    pub fn new(kind: QuantityKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// 소수점 자릿수를 지정해 "값 단위" 문자열로 만든다.
    ///
    /// 정전용량처럼 아주 작은 값은 고정 소수점으로는 0이 되므로 지수 표기를 쓴다.
    /// 자릿수는 [`MAX_DECIMALS`]로 잘린다.
    pub fn format(&self, decimals: usize) -> String {
        let decimals = decimals.min(MAX_DECIMALS);
        let threshold = 10f64.powi(-i32::try_from(decimals).unwrap_or(i32::MAX));
        let magnitude = self.value.abs();
        let number = if magnitude != 0.0 && magnitude < threshold {
            format!("{:.*e}", decimals, self.value)
        } else {
            format!("{:.*}", decimals, self.value)
        };
        match self.kind {
            QuantityKind::Currency => format!("{}{number}", self.kind.symbol()),
            QuantityKind::Percent | QuantityKind::AngleDegrees | QuantityKind::Score => {
                format!("{number}{}", self.kind.symbol())
            }
            QuantityKind::PowerFactor => number,
            _ => format!("{number} {}", self.kind.symbol()),
        }
    }
}

/// 결과 표의 한 줄: 번역 키 + 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    pub label_key: &'static str,
    pub quantity: QuantityValue,
}

impl ResultRow {
    pub fn new(label_key: &'static str, kind: QuantityKind, value: f64) -> Self {
        Self {
            label_key,
            quantity: QuantityValue::new(kind, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_decimals_are_clamped() {
        let tiny = QuantityValue::new(QuantityKind::Capacitance, 1e-12);
        assert_eq!(tiny.format(usize::MAX), tiny.format(MAX_DECIMALS));
        let volts = QuantityValue::new(QuantityKind::Voltage, 230.0);
        assert_eq!(volts.format(40), "230.000000000 V");
    }

    #[test]
    fn formats_with_unit_symbol() {
        assert_eq!(QuantityValue::new(QuantityKind::Voltage, 219.393).format(2), "219.39 V");
        assert_eq!(QuantityValue::new(QuantityKind::Percent, 20.0).format(1), "20.0%");
        assert_eq!(QuantityValue::new(QuantityKind::Currency, 1.5).format(2), "$1.50");
        assert_eq!(QuantityValue::new(QuantityKind::PowerFactor, 0.85).format(2), "0.85");
    }

    #[test]
    fn tiny_values_use_scientific_notation() {
        let s = QuantityValue::new(QuantityKind::Capacitance, 1e-6).format(2);
        assert_eq!(s, "1.00e-6 F");
    }
}
