//! 회로 종류별 계산 흐름: 입력 검사 → 계산 → (삼상) 분석 → 표시 행/이력 레코드.

use crate::analysis::{
    analyze_efficiency, analyze_quality, calculate_imbalance, EfficiencyResult, ImbalanceResult,
    QualityResult,
};
use crate::circuits::{self, AcImpedance, AcPowers, CapacitorAcResult, CapacitorDcResult, Connection, DcResult, InputError, ThreePhaseResult};
use crate::history::{CircuitKind, HistoryError, HistoryRecord, HistoryStore};
use crate::i18n::keys::*;
use crate::quantity::{QuantityKind as Q, ResultRow};

/// 프런트엔드가 공통으로 다루는 계산 보고서.
pub trait Report {
    fn circuit(&self) -> CircuitKind;
    /// 표시용 결과 행.
    fn rows(&self) -> Vec<ResultRow>;
    /// 이력 저장용 평탄화 레코드.
    fn to_record(&self) -> HistoryRecord;
}

/// 보고서를 이력 저장소에 추가하고 전체 레코드 수를 반환한다.
pub fn record_report(store: &dyn HistoryStore, report: &dyn Report) -> Result<usize, HistoryError> {
    let count = store.append(report.to_record())?;
    tracing::debug!(circuit = report.circuit().as_code(), count, "report recorded");
    Ok(count)
}

/// 직류 저항 회로 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcInput {
    /// 전압 [V]
    pub voltage: f64,
    /// 전류 [A]
    pub current: f64,
    /// 운전 시간 [h]
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcReport {
    pub input: DcInput,
    pub result: DcResult,
    /// 소비 전력량 [kWh]
    pub consumption_kwh: f64,
}

impl DcReport {
    pub fn run(input: DcInput) -> Result<Self, InputError> {
        circuits::validate_dc(input.voltage, input.current)?;
        circuits::validate_hours(input.hours)?;
        let result = circuits::calculate_dc(input.voltage, input.current);
        Ok(Self {
            input,
            result,
            consumption_kwh: circuits::consumption_kwh(result.power, input.hours),
        })
    }
}

impl Report for DcReport {
    fn circuit(&self) -> CircuitKind {
        CircuitKind::Dc
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::new(INPUT_VOLTAGE, Q::Voltage, self.input.voltage),
            ResultRow::new(INPUT_CURRENT, Q::Current, self.input.current),
            ResultRow::new(RESULT_RESISTANCE, Q::Resistance, self.result.resistance),
            ResultRow::new(RESULT_POWER, Q::ActivePower, self.result.power),
            ResultRow::new(RESULT_CONSUMPTION, Q::EnergyKwh, self.consumption_kwh),
        ]
    }

    fn to_record(&self) -> HistoryRecord {
        HistoryRecord::new(CircuitKind::Dc)
            .with("voltage", self.input.voltage)
            .with("current", self.input.current)
            .with("hours", self.input.hours)
            .with("resistance", self.result.resistance)
            .with("power", self.result.power)
            .with("consumption_kwh", self.consumption_kwh)
    }
}

/// 단상 교류 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcInput {
    pub voltage: f64,
    pub current: f64,
    pub power_factor: f64,
    pub hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcReport {
    pub input: AcInput,
    pub powers: AcPowers,
    pub impedance: AcImpedance,
    pub consumption_kwh: f64,
}

impl AcReport {
    pub fn run(input: AcInput) -> Result<Self, InputError> {
        circuits::validate_ac(input.voltage, input.current, input.power_factor)?;
        circuits::validate_hours(input.hours)?;
        let powers = circuits::calculate_powers(input.voltage, input.current, input.power_factor);
        Ok(Self {
            input,
            powers,
            impedance: circuits::calculate_impedance(input.voltage, input.current, input.power_factor),
            consumption_kwh: circuits::consumption_kwh(powers.active, input.hours),
        })
    }
}

impl Report for AcReport {
    fn circuit(&self) -> CircuitKind {
        CircuitKind::Ac
    }

    fn rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::new(RESULT_ACTIVE_POWER, Q::ActivePower, self.powers.active),
            ResultRow::new(RESULT_REACTIVE_POWER, Q::ReactivePower, self.powers.reactive),
            ResultRow::new(RESULT_APPARENT_POWER, Q::ApparentPower, self.powers.apparent),
            ResultRow::new(RESULT_CONSUMPTION, Q::EnergyKwh, self.consumption_kwh),
            ResultRow::new(RESULT_IMPEDANCE, Q::Resistance, self.impedance.impedance),
            ResultRow::new(RESULT_RESISTANCE, Q::Resistance, self.impedance.resistance),
            ResultRow::new(RESULT_REACTANCE, Q::Resistance, self.impedance.reactance),
            ResultRow::new(INPUT_POWER_FACTOR, Q::PowerFactor, self.input.power_factor),
        ]
    }

    fn to_record(&self) -> HistoryRecord {
        HistoryRecord::new(CircuitKind::Ac)
            .with("voltage", self.input.voltage)
            .with("current", self.input.current)
            .with("power_factor", self.input.power_factor)
            .with("hours", self.input.hours)
            .with("active_power", self.powers.active)
            .with("reactive_power", self.powers.reactive)
            .with("apparent_power", self.powers.apparent)
            .with("impedance", self.impedance.impedance)
            .with("resistance", self.impedance.resistance)
            .with("reactance", self.impedance.reactance)
            .with("consumption_kwh", self.consumption_kwh)
    }
}

/// 커패시터 입력. 직류/교류에 따라 필요한 값이 다르다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacitorInput {
    Dc { voltage: f64, capacitance: f64 },
    Ac { voltage: f64, frequency: f64, capacitance: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacitorReport {
    Dc {
        voltage: f64,
        capacitance: f64,
        result: CapacitorDcResult,
    },
    Ac {
        voltage: f64,
        frequency: f64,
        capacitance: f64,
        result: CapacitorAcResult,
    },
}

impl CapacitorReport {
    pub fn run(input: CapacitorInput) -> Result<Self, InputError> {
        match input {
            CapacitorInput::Dc { voltage, capacitance } => {
                circuits::validate_capacitor_dc(voltage, capacitance)?;
                Ok(CapacitorReport::Dc {
                    voltage,
                    capacitance,
                    result: circuits::calculate_capacitor_dc(voltage, capacitance),
                })
            }
            CapacitorInput::Ac {
                voltage,
                frequency,
                capacitance,
            } => {
                circuits::validate_capacitor_ac(voltage, frequency, capacitance)?;
                Ok(CapacitorReport::Ac {
                    voltage,
                    frequency,
                    capacitance,
                    result: circuits::calculate_capacitor_ac(voltage, frequency, capacitance),
                })
            }
        }
    }
}

impl Report for CapacitorReport {
    fn circuit(&self) -> CircuitKind {
        match self {
            CapacitorReport::Dc { .. } => CircuitKind::CapacitorDc,
            CapacitorReport::Ac { .. } => CircuitKind::CapacitorAc,
        }
    }

    fn rows(&self) -> Vec<ResultRow> {
        match *self {
            CapacitorReport::Dc {
                voltage,
                capacitance,
                result,
            } => vec![
                ResultRow::new(INPUT_VOLTAGE, Q::Voltage, voltage),
                ResultRow::new(INPUT_CAPACITANCE, Q::Capacitance, capacitance),
                ResultRow::new(RESULT_CHARGE, Q::Charge, result.charge),
                ResultRow::new(RESULT_ENERGY, Q::EnergyJoule, result.energy),
            ],
            CapacitorReport::Ac {
                voltage,
                frequency,
                capacitance,
                result,
            } => vec![
                ResultRow::new(INPUT_VOLTAGE, Q::Voltage, voltage),
                ResultRow::new(INPUT_CAPACITANCE, Q::Capacitance, capacitance),
                ResultRow::new(INPUT_FREQUENCY, Q::Frequency, frequency),
                ResultRow::new(RESULT_CAPACITIVE_REACTANCE, Q::Resistance, result.reactance),
                ResultRow::new(INPUT_CURRENT, Q::Current, result.current),
                ResultRow::new(RESULT_REACTIVE_POWER, Q::ReactivePower, result.reactive_power),
            ],
        }
    }

    fn to_record(&self) -> HistoryRecord {
        match *self {
            CapacitorReport::Dc {
                voltage,
                capacitance,
                result,
            } => HistoryRecord::new(CircuitKind::CapacitorDc)
                .with("voltage", voltage)
                .with("capacitance", capacitance)
                .with("charge", result.charge)
                .with("energy", result.energy),
            CapacitorReport::Ac {
                voltage,
                frequency,
                capacitance,
                result,
            } => HistoryRecord::new(CircuitKind::CapacitorAc)
                .with("voltage", voltage)
                .with("frequency", frequency)
                .with("capacitance", capacitance)
                .with("capacitive_reactance", result.reactance)
                .with("current", result.current)
                .with("reactive_power", result.reactive_power),
        }
    }
}

/// 삼상 계통 입력. 상별 전류는 불평형 분석에만 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePhaseInput {
    pub connection: Connection,
    pub line_voltage: f64,
    pub line_current: f64,
    pub power_factor: f64,
    /// R, S, T 상전류 [A]
    pub phase_currents: [f64; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreePhaseReport {
    pub input: ThreePhaseInput,
    pub system: ThreePhaseResult,
    pub imbalance: ImbalanceResult,
    pub efficiency: EfficiencyResult,
    pub quality: QualityResult,
}

impl ThreePhaseReport {
    pub fn run(input: ThreePhaseInput) -> Result<Self, InputError> {
        circuits::validate_three_phase(input.line_voltage, input.line_current, input.power_factor)?;
        circuits::validate_phase_currents(input.phase_currents)?;

        let system = input
            .connection
            .calculate(input.line_voltage, input.line_current, input.power_factor);
        let [ir, is, it] = input.phase_currents;
        let imbalance = calculate_imbalance(ir, is, it);
        let efficiency = analyze_efficiency(
            system.total_active_power,
            system.total_apparent_power,
            input.power_factor,
        );
        let quality = analyze_quality(
            imbalance.imbalance_percent,
            input.power_factor,
            system.total_apparent_power,
        );
        tracing::debug!(
            connection = input.connection.as_code(),
            imbalance = imbalance.imbalance_percent,
            score = quality.score,
            "three-phase analysis finished"
        );
        Ok(Self {
            input,
            system,
            imbalance,
            efficiency,
            quality,
        })
    }

    pub fn phase_rows(&self) -> Vec<ResultRow> {
        let s = &self.system;
        vec![
            ResultRow::new(RESULT_PHASE_VOLTAGE, Q::Voltage, s.phase_voltage),
            ResultRow::new(RESULT_PHASE_CURRENT, Q::Current, s.phase_current),
            ResultRow::new(RESULT_PHASE_ACTIVE_POWER, Q::ActivePower, s.phase_active_power),
            ResultRow::new(RESULT_PHASE_REACTIVE_POWER, Q::ReactivePower, s.phase_reactive_power),
            ResultRow::new(RESULT_PHASE_APPARENT_POWER, Q::ApparentPower, s.phase_apparent_power),
            ResultRow::new(RESULT_PHASE_IMPEDANCE, Q::Resistance, s.phase_impedance),
            ResultRow::new(RESULT_PHASE_RESISTANCE, Q::Resistance, s.phase_resistance),
            ResultRow::new(RESULT_PHASE_REACTANCE, Q::Resistance, s.phase_reactance),
        ]
    }

    pub fn total_rows(&self) -> Vec<ResultRow> {
        let s = &self.system;
        vec![
            ResultRow::new(INPUT_LINE_VOLTAGE, Q::Voltage, s.line_voltage),
            ResultRow::new(INPUT_LINE_CURRENT, Q::Current, s.line_current),
            ResultRow::new(RESULT_TOTAL_ACTIVE_POWER, Q::ActivePower, s.total_active_power),
            ResultRow::new(RESULT_TOTAL_REACTIVE_POWER, Q::ReactivePower, s.total_reactive_power),
            ResultRow::new(RESULT_TOTAL_APPARENT_POWER, Q::ApparentPower, s.total_apparent_power),
            ResultRow::new(INPUT_POWER_FACTOR, Q::PowerFactor, s.power_factor),
            ResultRow::new(RESULT_PHASE_ANGLE, Q::AngleDegrees, s.phase_angle_deg),
        ]
    }

    pub fn imbalance_rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::new(RESULT_AVERAGE_CURRENT, Q::Current, self.imbalance.average),
            ResultRow::new(RESULT_IMBALANCE, Q::Percent, self.imbalance.imbalance_percent),
        ]
    }

    pub fn efficiency_rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::new(RESULT_PF_EFFICIENCY, Q::Percent, self.efficiency.power_factor_efficiency),
            ResultRow::new(RESULT_REACTIVE_LOSS, Q::Percent, self.efficiency.reactive_loss_percent),
        ]
    }

    pub fn quality_rows(&self) -> Vec<ResultRow> {
        vec![
            ResultRow::new(RESULT_QUALITY_SCORE, Q::Score, f64::from(self.quality.score)),
            ResultRow::new(RESULT_ESTIMATED_LOSS, Q::Power, self.quality.estimated_loss_kw),
            ResultRow::new(RESULT_ANNUAL_COST, Q::Currency, self.quality.estimated_annual_cost),
        ]
    }
}

impl Report for ThreePhaseReport {
    fn circuit(&self) -> CircuitKind {
        CircuitKind::ThreePhase
    }

    fn rows(&self) -> Vec<ResultRow> {
        let mut rows = self.phase_rows();
        rows.extend(self.total_rows());
        rows.extend(self.imbalance_rows());
        rows.extend(self.efficiency_rows());
        rows.extend(self.quality_rows());
        rows
    }

    fn to_record(&self) -> HistoryRecord {
        let [ir, is, it] = self.input.phase_currents;
        HistoryRecord::new(CircuitKind::ThreePhase)
            .with("connection", self.input.connection.as_code())
            .with("line_voltage", self.input.line_voltage)
            .with("line_current", self.input.line_current)
            .with("power_factor", self.input.power_factor)
            .with("total_active_power", self.system.total_active_power)
            .with("total_reactive_power", self.system.total_reactive_power)
            .with("total_apparent_power", self.system.total_apparent_power)
            .with("current_r", ir)
            .with("current_s", is)
            .with("current_t", it)
            .with("imbalance_percent", self.imbalance.imbalance_percent)
            .with("pf_efficiency", self.efficiency.power_factor_efficiency)
            .with("quality_score", f64::from(self.quality.score))
    }
}
