use electrical_toolbox::analysis::{
    analyze_efficiency, analyze_quality, calculate_imbalance, EfficiencyCategory, ImbalanceLevel,
    QualityFinding, QualityRating, Recommendation, Severity,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn balanced_currents_have_no_imbalance() {
    let res = calculate_imbalance(10.0, 10.0, 10.0);
    assert_eq!(res.imbalance_percent, 0.0);
    assert_eq!(res.average, 10.0);
}

#[test]
fn imbalance_reference_case() {
    let res = calculate_imbalance(10.0, 8.0, 12.0);
    assert_close("avg", res.average, 10.0, 1e-12);
    assert_close("max dev", res.max_deviation(), 2.0, 1e-12);
    assert_close("imbalance", res.imbalance_percent, 20.0, 1e-12);
    assert_eq!(ImbalanceLevel::classify(res.imbalance_percent), ImbalanceLevel::High);
}

#[test]
fn zero_average_returns_zero_percent() {
    let res = calculate_imbalance(0.0, 0.0, 0.0);
    assert_eq!(res.imbalance_percent, 0.0);
    assert!(res.imbalance_percent.is_finite());
}

#[test]
fn imbalance_display_bands() {
    assert_eq!(ImbalanceLevel::classify(2.0), ImbalanceLevel::Acceptable);
    assert_eq!(ImbalanceLevel::classify(2.01), ImbalanceLevel::Moderate);
    assert_eq!(ImbalanceLevel::classify(5.0), ImbalanceLevel::Moderate);
    assert_eq!(ImbalanceLevel::classify(5.01), ImbalanceLevel::High);
}

#[test]
fn efficiency_category_at_thresholds() {
    assert_eq!(
        analyze_efficiency(950.0, 1000.0, 0.95).category,
        EfficiencyCategory::Excellent
    );
    assert_eq!(
        analyze_efficiency(900.0, 1000.0, 0.90).category,
        EfficiencyCategory::Good
    );
    // 80 % sits in the Fair band: every tier uses an inclusive lower bound.
    assert_eq!(
        analyze_efficiency(800.0, 1000.0, 0.80).category,
        EfficiencyCategory::Fair
    );
    assert_eq!(
        analyze_efficiency(790.0, 1000.0, 0.79).category,
        EfficiencyCategory::Poor
    );
}

#[test]
fn recommendations_accumulate_independently() {
    assert!(analyze_efficiency(950.0, 1000.0, 0.95).recommendations.is_empty());
    assert_eq!(
        analyze_efficiency(850.0, 1000.0, 0.85).recommendations,
        vec![Recommendation::InstallCapacitorBank]
    );
    assert_eq!(
        analyze_efficiency(700.0, 1000.0, 0.70).recommendations,
        vec![
            Recommendation::InstallCapacitorBank,
            Recommendation::InspectInductiveLoads,
            Recommendation::EvaluateEquipmentReplacement,
        ]
    );
}

#[test]
fn reactive_loss_percent() {
    let res = analyze_efficiency(750.0, 1000.0, 0.75);
    assert_close("loss", res.reactive_loss_percent, 25.0, 1e-12);
    assert_eq!(analyze_efficiency(0.0, 0.0, 0.0).reactive_loss_percent, 0.0);
}

#[test]
fn quality_without_deductions() {
    let res = analyze_quality(0.0, 0.95, 2000.0);
    assert_eq!(res.score, 100);
    assert_eq!(res.findings.len(), 2);
    assert!(res.findings.iter().all(|f| f.severity() == Severity::Ok));
    assert_close("loss kW", res.estimated_loss_kw, 0.1, 1e-12);
    assert_close("annual cost", res.estimated_annual_cost, 131.4, 1e-9);
    assert_eq!(QualityRating::from_score(res.score), QualityRating::Good);
}

#[test]
fn quality_deductions_stack() {
    let res = analyze_quality(6.0, 0.80, 10_000.0);
    assert_eq!(res.score, 55);
    assert_eq!(QualityRating::from_score(res.score), QualityRating::Poor);
    assert!(matches!(
        res.findings[0],
        QualityFinding::PhaseImbalance {
            severity: Severity::Critical,
            ..
        }
    ));

    let res = analyze_quality(3.0, 0.87, 10_000.0);
    assert_eq!(res.score, 75);
    assert_eq!(QualityRating::from_score(res.score), QualityRating::Fair);
}
