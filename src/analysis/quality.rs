/// 연간 운전 시간 [h]
pub const HOURS_PER_YEAR: f64 = 8760.0;
/// 손실 비용 추정에 쓰는 고정 단가 [통화/kWh]. 요금제 모델이 아니라 단순 근사치다.
pub const ENERGY_PRICE_PER_KWH: f64 = 0.15;

/// 점검 항목별 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
}

/// 전력 품질 점검 결과 한 줄. 두 축(불평형, 역률)마다 항상 하나씩 생성된다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QualityFinding {
    PhaseImbalance { severity: Severity, percent: f64 },
    PowerFactor { severity: Severity, power_factor: f64 },
}

impl QualityFinding {
    pub fn severity(&self) -> Severity {
        match *self {
            QualityFinding::PhaseImbalance { severity, .. }
            | QualityFinding::PowerFactor { severity, .. } => severity,
        }
    }

    /// 번역 키와 값 문자열. 표시 계층에서 "{label}: {value}" 형태로 조합한다.
    pub fn label_key(&self) -> &'static str {
        use crate::i18n::keys::*;
        match *self {
            QualityFinding::PhaseImbalance { severity, .. } => match severity {
                Severity::Ok => QUALITY_IMBALANCE_OK,
                Severity::Warning => QUALITY_IMBALANCE_MODERATE,
                Severity::Critical => QUALITY_IMBALANCE_HIGH,
            },
            QualityFinding::PowerFactor { severity, .. } => match severity {
                Severity::Ok => QUALITY_PF_GOOD,
                Severity::Warning => QUALITY_PF_IMPROVABLE,
                Severity::Critical => QUALITY_PF_LOW,
            },
        }
    }

    pub fn value_text(&self) -> String {
        match *self {
            QualityFinding::PhaseImbalance { percent, .. } => format!("{percent:.1}%"),
            QualityFinding::PowerFactor { power_factor, .. } => format!("{power_factor:.2}"),
        }
    }
}

impl std::fmt::Display for QualityFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match *self {
            QualityFinding::PhaseImbalance { severity, .. } => match severity {
                Severity::Ok => "acceptable phase imbalance",
                Severity::Warning => "moderate phase imbalance",
                Severity::Critical => "high phase imbalance",
            },
            QualityFinding::PowerFactor { severity, .. } => match severity {
                Severity::Ok => "good power factor",
                Severity::Warning => "improvable power factor",
                Severity::Critical => "low power factor",
            },
        };
        write!(f, "{label}: {}", self.value_text())
    }
}

/// 전력 품질 분석 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityResult {
    /// 품질 점수 (0~100)
    pub score: u8,
    pub findings: Vec<QualityFinding>,
    /// 추정 손실 [kW]
    pub estimated_loss_kw: f64,
    /// 추정 연간 손실 비용 [통화]
    pub estimated_annual_cost: f64,
}

/// 불평형률, 역률, 총 피상전력으로 품질 점수와 손실 비용을 추정한다.
pub fn analyze_quality(imbalance_percent: f64, power_factor: f64, apparent_power: f64) -> QualityResult {
    let mut score: u8 = 100;
    let mut findings = Vec::with_capacity(2);

    let imbalance_severity = if imbalance_percent > 5.0 {
        score = score.saturating_sub(20);
        Severity::Critical
    } else if imbalance_percent > 2.0 {
        score = score.saturating_sub(10);
        Severity::Warning
    } else {
        Severity::Ok
    };
    findings.push(QualityFinding::PhaseImbalance {
        severity: imbalance_severity,
        percent: imbalance_percent,
    });

    let pf_severity = if power_factor < 0.85 {
        score = score.saturating_sub(25);
        Severity::Critical
    } else if power_factor < 0.9 {
        score = score.saturating_sub(15);
        Severity::Warning
    } else {
        Severity::Ok
    };
    findings.push(QualityFinding::PowerFactor {
        severity: pf_severity,
        power_factor,
    });

    let estimated_loss_kw = apparent_power * (1.0 - power_factor) / 1000.0;
    QualityResult {
        score,
        findings,
        estimated_loss_kw,
        estimated_annual_cost: estimated_loss_kw * HOURS_PER_YEAR * ENERGY_PRICE_PER_KWH,
    }
}

/// 표시용 품질 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityRating {
    Good,
    Fair,
    Poor,
}

impl QualityRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => QualityRating::Good,
            60..=79 => QualityRating::Fair,
            _ => QualityRating::Poor,
        }
    }

    pub fn label_key(self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            QualityRating::Good => QUALITY_RATING_GOOD,
            QualityRating::Fair => QUALITY_RATING_FAIR,
            QualityRating::Poor => QUALITY_RATING_POOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worst_case_deductions() {
        let res = analyze_quality(12.0, 0.5, 10_000.0);
        assert_eq!(res.score, 55);
        assert_eq!(res.findings[0].severity(), Severity::Critical);
        assert_eq!(res.findings[1].severity(), Severity::Critical);
    }

    #[test]
    fn rating_bands() {
        assert_eq!(QualityRating::from_score(100), QualityRating::Good);
        assert_eq!(QualityRating::from_score(80), QualityRating::Good);
        assert_eq!(QualityRating::from_score(65), QualityRating::Fair);
        assert_eq!(QualityRating::from_score(55), QualityRating::Poor);
    }

    #[test]
    fn finding_text() {
        let f = QualityFinding::PowerFactor {
            severity: Severity::Warning,
            power_factor: 0.87,
        };
        assert_eq!(f.to_string(), "improvable power factor: 0.87");
    }
}
