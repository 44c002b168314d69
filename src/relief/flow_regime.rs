//! 임계/아임계 유동 판정과 최소 오리피스 면적 계산.
//!
//! 단위: 압력 kPa(a), 온도 K, 부하 kg/h, 결과 mm². 계수 0.03948, 17.9는 이 단위계에 묶여 있다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{check_finite, ReliefResult, SizingError};

/// 임계 유동 계수 C의 상수부.
pub const CRITICAL_FLOW_CONSTANT: f64 = 0.03948;
/// 아임계 유동 면적식 상수.
pub const SUBCRITICAL_CONSTANT: f64 = 17.9;

/// 기본 방출계수 Kd
pub const DEFAULT_KD: f64 = 0.975;
/// 기본 배압 보정계수 Kb
pub const DEFAULT_KB: f64 = 1.0;
/// 기본 조합 보정계수 Kc (파열판 미설치)
pub const DEFAULT_KC: f64 = 1.0;

/// 오리피스 출구의 유동 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRegime {
    Critical,
    Subcritical,
}

impl std::fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowRegime::Critical => write!(f, "critical"),
            FlowRegime::Subcritical => write!(f, "subcritical"),
        }
    }
}

/// 밸브 보정계수 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactors {
    pub kd: f64,
    pub kb: f64,
    pub kc: f64,
}

impl Default for CorrectionFactors {
    fn default() -> Self {
        Self {
            kd: DEFAULT_KD,
            kb: DEFAULT_KB,
            kc: DEFAULT_KC,
        }
    }
}

/// 면적 계산에 필요한 유량/상태 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrificeDemand {
    /// 장치 1개가 처리할 부하 [kg/h]
    pub relief_load_kg_per_h: f64,
    /// 상류(설계) 압력 P1 [kPa(a)]
    pub upstream_pressure_kpa: f64,
    /// 하류 압력 [kPa(a)]
    pub downstream_pressure_kpa: f64,
    pub heat_capacity_ratio: f64,
    pub compressibility: f64,
    pub temperature_k: f64,
    pub molecular_weight: f64,
}

/// 면적 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrificeArea {
    pub regime: FlowRegime,
    /// 임계 유동 압력 Pcf [kPa(a)]
    pub critical_pressure_kpa: f64,
    pub area_mm2: f64,
}

/// 임계 압력비 (2/(k+1))^(k/(k-1))
pub fn critical_pressure_ratio(k: f64) -> f64 {
    (2.0 / (k + 1.0)).powf(k / (k - 1.0))
}

/// 하류 압력이 임계 압력 이하이면 임계 유동, 그렇지 않으면 아임계 유동이다.
pub fn classify_regime(critical_pressure_kpa: f64, downstream_pressure_kpa: f64) -> FlowRegime {
    if critical_pressure_kpa >= downstream_pressure_kpa {
        FlowRegime::Critical
    } else {
        FlowRegime::Subcritical
    }
}

/// 임계 유동 계수 C = 0.03948 · sqrt(k · (2/(k+1))^((k+1)/(k-1)))
pub fn critical_flow_coefficient(k: f64) -> f64 {
    CRITICAL_FLOW_CONSTANT * (k * (2.0 / (k + 1.0)).powf((k + 1.0) / (k - 1.0))).sqrt()
}

/// 아임계 유동 계수 F2. r = P2/P1 이며 0 < r < 1 이어야 한다.
pub fn subcritical_flow_coefficient(k: f64, r: f64) -> ReliefResult<f64> {
    if r >= 1.0 {
        return Err(SizingError::domain(
            "pressure ratio",
            format!("F2 undefined for P2/P1 = {r} (upstream must exceed downstream)"),
        ));
    }
    if r <= 0.0 {
        return Err(SizingError::domain(
            "pressure ratio",
            format!("P2/P1 must be positive, got {r}"),
        ));
    }
    let exponent = (k - 1.0) / k;
    let f2 = ((k / (k - 1.0)) * r.powf(2.0 / k) * ((1.0 - r.powf(exponent)) / (1.0 - r))).sqrt();
    check_finite(f2, "subcritical flow coefficient")
}

/// 유동 영역을 판정하고 해당 식으로 최소 오리피스 면적[mm²]을 계산한다.
pub fn required_orifice_area(
    demand: &OrificeDemand,
    factors: &CorrectionFactors,
) -> ReliefResult<OrificeArea> {
    let k = demand.heat_capacity_ratio;
    let p1 = demand.upstream_pressure_kpa;
    let p2 = demand.downstream_pressure_kpa;

    if !(k.is_finite() && k > 1.0) {
        return Err(SizingError::domain(
            "heat capacity ratio",
            format!("k must be > 1, got {k}"),
        ));
    }
    if !(demand.molecular_weight.is_finite() && demand.molecular_weight > 0.0) {
        return Err(SizingError::domain(
            "molecular weight",
            format!("division by {}", demand.molecular_weight),
        ));
    }
    if !(p1.is_finite() && p1 > 0.0) {
        return Err(SizingError::domain(
            "design pressure",
            format!("division by {p1} kPa"),
        ));
    }

    let critical_pressure_kpa = critical_pressure_ratio(k) * p1;
    let regime = classify_regime(critical_pressure_kpa, p2);
    let tz_over_m = demand.temperature_k * demand.compressibility / demand.molecular_weight;

    let area_mm2 = match regime {
        FlowRegime::Critical => {
            let c = critical_flow_coefficient(k);
            demand.relief_load_kg_per_h / (c * factors.kd * p1 * factors.kb * factors.kc)
                * tz_over_m.sqrt()
        }
        FlowRegime::Subcritical => {
            let f2 = subcritical_flow_coefficient(k, p2 / p1)?;
            SUBCRITICAL_CONSTANT * demand.relief_load_kg_per_h / (f2 * factors.kd * factors.kc)
                * (tz_over_m / (p1 * (p1 - p2))).sqrt()
        }
    };
    let area_mm2 = check_finite(area_mm2, "orifice area")?;
    debug!(critical_pressure_kpa, %regime, area_mm2, "orifice area computed");

    Ok(OrificeArea {
        regime,
        critical_pressure_kpa,
        area_mm2,
    })
}
