/// 상전류 불평형 분석 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImbalanceResult {
    /// 평균 전류 [A]
    pub average: f64,
    /// 불평형률 [%]
    pub imbalance_percent: f64,
    /// 입력 전류 (R, S, T) [A]
    pub currents: [f64; 3],
    /// 평균 대비 절대 편차 [A]
    pub deviations: [f64; 3],
}

impl ImbalanceResult {
    pub fn max_deviation(&self) -> f64 {
        self.deviations.iter().copied().fold(0.0, f64::max)
    }
}

/// 세 상전류의 평균과 최대 편차로 불평형률을 구한다.
///
/// 평균이 0이면 불평형률은 0으로 둔다. 이 경우 "불평형 없음"과 "정의 불가"가
/// 구분되지 않는다.
pub fn calculate_imbalance(ir: f64, is: f64, it: f64) -> ImbalanceResult {
    let currents = [ir, is, it];
    let average = currents.iter().sum::<f64>() / 3.0;
    let deviations = currents.map(|i| (i - average).abs());
    let max_deviation = deviations.iter().copied().fold(0.0, f64::max);
    let imbalance_percent = if average > 0.0 {
        max_deviation / average * 100.0
    } else {
        0.0
    };
    ImbalanceResult {
        average,
        imbalance_percent,
        currents,
        deviations,
    }
}

/// 표시 계층에서 쓰는 불평형 구분. 결과 구조체에는 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImbalanceLevel {
    /// ≤ 2 %
    Acceptable,
    /// 2 ~ 5 %
    Moderate,
    /// > 5 %
    High,
}

impl ImbalanceLevel {
    pub fn classify(imbalance_percent: f64) -> Self {
        if imbalance_percent <= 2.0 {
            ImbalanceLevel::Acceptable
        } else if imbalance_percent <= 5.0 {
            ImbalanceLevel::Moderate
        } else {
            ImbalanceLevel::High
        }
    }

    pub fn label_key(self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            ImbalanceLevel::Acceptable => IMBALANCE_ACCEPTABLE,
            ImbalanceLevel::Moderate => IMBALANCE_MODERATE,
            ImbalanceLevel::High => IMBALANCE_HIGH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_average_yields_zero_percent() {
        let res = calculate_imbalance(0.0, 0.0, 0.0);
        assert_eq!(res.average, 0.0);
        assert_eq!(res.imbalance_percent, 0.0);
    }

    #[test]
    fn classification_bands() {
        assert_eq!(ImbalanceLevel::classify(2.0), ImbalanceLevel::Acceptable);
        assert_eq!(ImbalanceLevel::classify(2.1), ImbalanceLevel::Moderate);
        assert_eq!(ImbalanceLevel::classify(5.0), ImbalanceLevel::Moderate);
        assert_eq!(ImbalanceLevel::classify(5.01), ImbalanceLevel::High);
    }
}
