//! 화재 노출 / 출구 차단 시나리오별 릴리프 부하 산정.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{check_finite, ReliefResult, SizingError};
use crate::units::kg_per_s_to_kg_per_h;

/// 화재 입열 상관식 계수. Q[kW] = 22.155 · F · A^0.82
pub const FIRE_HEAT_COEFFICIENT: f64 = 22.155;
/// 화재 입열 상관식의 접액 면적 지수.
pub const FIRE_AREA_EXPONENT: f64 = 0.82;

/// 릴리프 부하를 결정한 시나리오.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefCase {
    Fire,
    BlockedOutlet,
}

/// 시나리오별 부하와 지배 부하.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliefLoad {
    pub fire_heat_kw: f64,
    pub fire_kg_per_h: f64,
    pub blocked_kg_per_h: f64,
    pub governing: ReliefCase,
}

impl ReliefLoad {
    /// max(화재 부하, 차단 부하) [kg/h]
    pub fn kg_per_h(&self) -> f64 {
        self.fire_kg_per_h.max(self.blocked_kg_per_h)
    }
}

/// 접액 면적[m²]과 환경계수로부터 화재 입열[kW]을 계산한다.
pub fn fire_heat_input_kw(wetted_area_m2: f64, environmental_factor: f64) -> f64 {
    FIRE_HEAT_COEFFICIENT * environmental_factor * wetted_area_m2.powf(FIRE_AREA_EXPONENT)
}

/// 화재 부하와 출구 차단 부하를 계산하고 큰 쪽을 지배 부하로 선택한다.
pub fn estimate_relief_load(
    wetted_area_m2: f64,
    environmental_factor: f64,
    heat_of_vaporization_kj_per_kg: f64,
    blocked_mass_flow_kg_per_s: f64,
) -> ReliefResult<ReliefLoad> {
    if !(heat_of_vaporization_kj_per_kg.is_finite() && heat_of_vaporization_kj_per_kg > 0.0) {
        return Err(SizingError::domain(
            "heat of vaporization",
            format!("fire relief rate undefined for {heat_of_vaporization_kj_per_kg} kJ/kg"),
        ));
    }
    if wetted_area_m2 < 0.0 {
        return Err(SizingError::domain(
            "wetted area",
            format!("negative area {wetted_area_m2} m2"),
        ));
    }
    if blocked_mass_flow_kg_per_s < 0.0 {
        return Err(SizingError::domain(
            "blocked mass flow",
            format!("negative flow {blocked_mass_flow_kg_per_s} kg/s"),
        ));
    }

    let fire_heat_kw = check_finite(
        fire_heat_input_kw(wetted_area_m2, environmental_factor),
        "fire heat input",
    )?;
    // kW / (kJ/kg) = kg/s
    let fire_kg_per_h = check_finite(
        kg_per_s_to_kg_per_h(fire_heat_kw / heat_of_vaporization_kj_per_kg),
        "fire relief rate",
    )?;
    let blocked_kg_per_h = check_finite(
        kg_per_s_to_kg_per_h(blocked_mass_flow_kg_per_s),
        "blocked relief rate",
    )?;
    let governing = if fire_kg_per_h > blocked_kg_per_h {
        ReliefCase::Fire
    } else {
        ReliefCase::BlockedOutlet
    };
    debug!(
        fire_heat_kw,
        fire_kg_per_h,
        blocked_kg_per_h,
        ?governing,
        "relief load estimated"
    );
    Ok(ReliefLoad {
        fire_heat_kw,
        fire_kg_per_h,
        blocked_kg_per_h,
        governing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_area_gives_coefficient() {
        assert_relative_eq!(fire_heat_input_kw(1.0, 1.0), FIRE_HEAT_COEFFICIENT);
        assert_relative_eq!(fire_heat_input_kw(1.0, 0.5), FIRE_HEAT_COEFFICIENT / 2.0);
    }

    #[test]
    fn fire_case_governs_small_blocked_flow() {
        let load = estimate_relief_load(30.0, 1.0, 250.0, 0.01).unwrap();
        let q = 22.155 * 30.0_f64.powf(0.82);
        assert_relative_eq!(load.fire_kg_per_h, q / 250.0 * 3600.0, max_relative = 1e-12);
        assert_relative_eq!(load.blocked_kg_per_h, 36.0, max_relative = 1e-12);
        assert_eq!(load.governing, ReliefCase::Fire);
        assert_relative_eq!(load.kg_per_h(), load.fire_kg_per_h);
    }

    #[test]
    fn blocked_outlet_governs_large_flow() {
        let load = estimate_relief_load(30.0, 1.0, 250.0, 10.0).unwrap();
        assert_eq!(load.governing, ReliefCase::BlockedOutlet);
        assert_relative_eq!(load.kg_per_h(), 36_000.0);
    }

    #[test]
    fn zero_wetted_area_has_no_fire_load() {
        let load = estimate_relief_load(0.0, 1.0, 250.0, 1.0).unwrap();
        assert_eq!(load.fire_kg_per_h, 0.0);
        assert_eq!(load.governing, ReliefCase::BlockedOutlet);
    }

    #[test]
    fn zero_heat_of_vaporization_is_domain_error() {
        let err = estimate_relief_load(30.0, 1.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            SizingError::Domain { what: "heat of vaporization", .. }
        ));
    }
}
