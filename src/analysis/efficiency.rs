/// 역률 효율 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl EfficiencyCategory {
    /// 역률 효율[%]로 등급을 정한다. 모든 경계는 이상(≥) 비교다.
    pub fn from_percent(efficiency_percent: f64) -> Self {
        if efficiency_percent >= 95.0 {
            EfficiencyCategory::Excellent
        } else if efficiency_percent >= 90.0 {
            EfficiencyCategory::Good
        } else if efficiency_percent >= 80.0 {
            EfficiencyCategory::Fair
        } else {
            EfficiencyCategory::Poor
        }
    }

    pub fn label_key(self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            EfficiencyCategory::Excellent => EFFICIENCY_EXCELLENT,
            EfficiencyCategory::Good => EFFICIENCY_GOOD,
            EfficiencyCategory::Fair => EFFICIENCY_FAIR,
            EfficiencyCategory::Poor => EFFICIENCY_POOR,
        }
    }
}

/// 개선 권고 사항. 조건이 서로 독립적이라 여러 개가 동시에 나올 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// 역률 < 0.9
    InstallCapacitorBank,
    /// 무효 손실 > 20 %
    InspectInductiveLoads,
    /// 역률 < 0.8
    EvaluateEquipmentReplacement,
}

impl Recommendation {
    pub fn label_key(self) -> &'static str {
        use crate::i18n::keys::*;
        match self {
            Recommendation::InstallCapacitorBank => RECOMMEND_CAPACITOR_BANK,
            Recommendation::InspectInductiveLoads => RECOMMEND_INDUCTIVE_LOADS,
            Recommendation::EvaluateEquipmentReplacement => RECOMMEND_REPLACEMENT,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Recommendation::InstallCapacitorBank => "install a capacitor bank for compensation",
            Recommendation::InspectInductiveLoads => "inspect inductive loads and consider filters",
            Recommendation::EvaluateEquipmentReplacement => {
                "evaluate replacing inefficient equipment"
            }
        };
        f.write_str(text)
    }
}

/// 효율 분석 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyResult {
    /// 역률 효율 = pf × 100 [%]
    pub power_factor_efficiency: f64,
    /// 무효 손실 = (S − P)/S × 100 [%]
    pub reactive_loss_percent: f64,
    pub category: EfficiencyCategory,
    pub recommendations: Vec<Recommendation>,
}

/// 총 유효/피상 전력과 역률로 효율 등급과 권고 사항을 만든다.
pub fn analyze_efficiency(active_power: f64, apparent_power: f64, power_factor: f64) -> EfficiencyResult {
    let power_factor_efficiency = power_factor * 100.0;
    let reactive_loss_percent = if apparent_power > 0.0 {
        (apparent_power - active_power) / apparent_power * 100.0
    } else {
        0.0
    };

    let mut recommendations = Vec::new();
    if power_factor < 0.9 {
        recommendations.push(Recommendation::InstallCapacitorBank);
    }
    if reactive_loss_percent > 20.0 {
        recommendations.push(Recommendation::InspectInductiveLoads);
    }
    if power_factor < 0.8 {
        recommendations.push(Recommendation::EvaluateEquipmentReplacement);
    }

    EfficiencyResult {
        power_factor_efficiency,
        reactive_loss_percent,
        category: EfficiencyCategory::from_percent(power_factor_efficiency),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_apparent_power_has_no_reactive_loss() {
        let res = analyze_efficiency(0.0, 0.0, 0.95);
        assert_eq!(res.reactive_loss_percent, 0.0);
        assert!(res.recommendations.is_empty());
    }

    #[test]
    fn category_bands() {
        assert_eq!(EfficiencyCategory::from_percent(99.0), EfficiencyCategory::Excellent);
        assert_eq!(EfficiencyCategory::from_percent(90.0), EfficiencyCategory::Good);
        assert_eq!(EfficiencyCategory::from_percent(85.0), EfficiencyCategory::Fair);
        assert_eq!(EfficiencyCategory::from_percent(79.9), EfficiencyCategory::Poor);
    }
}
