use serde::{Deserialize, Serialize};

/// 게이지/절대압 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureKind {
    Gauge,
    Absolute,
}

/// 압력 단위. 내부 기준은 항상 kPa(절대)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    KiloPascal,
    MegaPascal,
    Bar,
    Psi,
    Atm,
}

/// 표준 대기압 [kPa]. 게이지 환산 및 기본 배압으로 사용한다.
pub const ATM_KPA: f64 = 101.325;

const KPA_PER_BAR: f64 = 100.0;
const KPA_PER_PSI: f64 = 6.894_757;

fn scale_to_kpa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value / 1000.0,
        PressureUnit::KiloPascal => value,
        PressureUnit::MegaPascal => value * 1000.0,
        PressureUnit::Bar => value * KPA_PER_BAR,
        PressureUnit::Psi => value * KPA_PER_PSI,
        PressureUnit::Atm => value * ATM_KPA,
    }
}

fn scale_from_kpa(value_kpa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value_kpa * 1000.0,
        PressureUnit::KiloPascal => value_kpa,
        PressureUnit::MegaPascal => value_kpa / 1000.0,
        PressureUnit::Bar => value_kpa / KPA_PER_BAR,
        PressureUnit::Psi => value_kpa / KPA_PER_PSI,
        PressureUnit::Atm => value_kpa / ATM_KPA,
    }
}

/// 주어진 압력을 kPa(절대)로 변환한다.
/// 게이지 압력은 표준 대기압을 더해 절대압으로 환산한다.
pub fn to_kpa_abs(value: f64, unit: PressureUnit, kind: PressureKind) -> f64 {
    let kpa = scale_to_kpa(value, unit);
    match kind {
        PressureKind::Absolute => kpa,
        PressureKind::Gauge => kpa + ATM_KPA,
    }
}

/// kPa(절대) 값을 원하는 단위/모드로 변환한다.
pub fn from_kpa_abs(value_kpa_abs: f64, unit: PressureUnit, kind: PressureKind) -> f64 {
    let kpa = match kind {
        PressureKind::Absolute => value_kpa_abs,
        PressureKind::Gauge => value_kpa_abs - ATM_KPA,
    };
    scale_from_kpa(kpa, unit)
}
