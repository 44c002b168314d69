//! 공정 입력과 이로부터 유도되는 설계 기준/용기 형상.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::error::{require_positive, ReliefResult, SizingError};

/// 한 설비에 허용되는 최대 릴리프 장치 수.
pub const MAX_RELIEF_DEVICES: u32 = 2;

/// 설계압력 = 운전(예상)압력 × 1.1
pub const DESIGN_PRESSURE_FACTOR: f64 = 1.1;

/// 최대 축적압력 = 설계압력 × 1.21
pub const ACCUMULATION_FACTOR: f64 = 1.21;

/// 한 번의 사이징에 사용하는 공정 입력. 모든 값은 계산 기준 단위로 저장한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInput {
    /// 예상 운전압력 [kPa(a)]
    pub pressure_kpa_abs: f64,
    /// 온도 [K]
    pub temperature_k: f64,
    /// 분자량 [kg/kmol]
    pub molecular_weight: f64,
    /// 압축계수 Z
    pub compressibility: f64,
    /// 비열비 k (Cp/Cv)
    pub heat_capacity_ratio: f64,
    /// 출구 차단 시 질량유량 [kg/s]
    pub mass_flow_kg_per_s: f64,
    /// 증발잠열 [kJ/kg]
    pub heat_of_vaporization_kj_per_kg: f64,
    /// 증기 분율. 기체 사이징만 지원하므로 반드시 1이어야 한다.
    pub vapour_fraction: f64,
    /// 릴리프 장치 수 (1 또는 2)
    pub relief_devices: u32,
    /// 용기 직선부 길이 [m]
    pub vessel_length_m: f64,
    /// 용기 직경 [m]
    pub vessel_diameter_m: f64,
    /// 액체 체류 분율 (0~1)
    pub liquid_holdup_fraction: f64,
}

impl ProcessInput {
    /// 계산 전에 입력 조건을 확인한다. 위반 시 부분 결과 없이 즉시 오류를 반환한다.
    pub fn validate(&self) -> ReliefResult<()> {
        if self.vapour_fraction != 1.0 {
            return Err(SizingError::precondition(
                "vapour fraction",
                format!(
                    "only all-vapour relief is supported, got {}",
                    self.vapour_fraction
                ),
            ));
        }
        if !(1..=MAX_RELIEF_DEVICES).contains(&self.relief_devices) {
            return Err(SizingError::precondition(
                "relief devices",
                format!(
                    "must be between 1 and {MAX_RELIEF_DEVICES}, got {}",
                    self.relief_devices
                ),
            ));
        }
        require_positive(self.pressure_kpa_abs, "pressure")?;
        require_positive(self.temperature_k, "temperature")?;
        require_positive(self.molecular_weight, "molecular weight")?;
        require_positive(self.compressibility, "compressibility")?;
        require_positive(self.mass_flow_kg_per_s, "mass flow")?;
        require_positive(
            self.heat_of_vaporization_kj_per_kg,
            "heat of vaporization",
        )?;
        require_positive(self.vessel_length_m, "vessel length")?;
        require_positive(self.vessel_diameter_m, "vessel diameter")?;
        if !(self.heat_capacity_ratio.is_finite() && self.heat_capacity_ratio > 1.0) {
            return Err(SizingError::precondition(
                "heat capacity ratio",
                format!("k must be > 1, got {}", self.heat_capacity_ratio),
            ));
        }
        if !(0.0..=1.0).contains(&self.liquid_holdup_fraction) {
            return Err(SizingError::precondition(
                "liquid holdup fraction",
                format!("must be within [0, 1], got {}", self.liquid_holdup_fraction),
            ));
        }
        Ok(())
    }
}

/// 입력으로부터 한 번 유도되는 설계 압력 기준.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignBasis {
    pub expected_pressure_kpa: f64,
    pub design_pressure_kpa: f64,
    pub max_accumulated_pressure_kpa: f64,
    pub downstream_pressure_kpa: f64,
}

impl DesignBasis {
    pub fn new(expected_pressure_kpa: f64, downstream_pressure_kpa: f64) -> Self {
        let design_pressure_kpa = DESIGN_PRESSURE_FACTOR * expected_pressure_kpa;
        Self {
            expected_pressure_kpa,
            design_pressure_kpa,
            max_accumulated_pressure_kpa: ACCUMULATION_FACTOR * design_pressure_kpa,
            downstream_pressure_kpa,
        }
    }
}

/// 양쪽 반구형 헤드를 가진 원통형 용기의 형상.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselGeometry {
    pub radius_m: f64,
    /// 원통부 + 반구 헤드 2개 [m³]
    pub total_volume_m3: f64,
    /// 외부 전체 표면적 [m²]
    pub total_surface_m2: f64,
    /// 액체에 접한 표면적 [m²]. 화재 입열 계산에 사용한다.
    pub wetted_area_m2: f64,
    pub vapour_volume_m3: f64,
}

impl VesselGeometry {
    pub fn new(length_m: f64, diameter_m: f64, holdup_fraction: f64) -> Self {
        let r = diameter_m / 2.0;
        let total_volume_m3 = PI * r * r * length_m + 4.0 / 3.0 * PI * r.powi(3);
        let total_surface_m2 = 2.0 * PI * r * length_m + 4.0 * PI * r * r;
        Self {
            radius_m: r,
            total_volume_m3,
            total_surface_m2,
            wetted_area_m2: holdup_fraction * total_surface_m2,
            vapour_volume_m3: (1.0 - holdup_fraction) * total_volume_m3,
        }
    }

    pub fn from_input(input: &ProcessInput) -> Self {
        Self::new(
            input.vessel_length_m,
            input.vessel_diameter_m,
            input.liquid_holdup_fraction,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_input;
    use super::*;

    #[test]
    fn sample_input_is_valid() {
        assert!(sample_input().validate().is_ok());
    }

    #[test]
    fn two_phase_is_rejected() {
        let input = ProcessInput {
            vapour_fraction: 0.8,
            ..sample_input()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.quantity(), "vapour fraction");
    }

    #[test]
    fn device_count_range() {
        for n in [0, 3] {
            let input = ProcessInput {
                relief_devices: n,
                ..sample_input()
            };
            assert!(matches!(
                input.validate(),
                Err(SizingError::Precondition { what: "relief devices", .. })
            ));
        }
        let two = ProcessInput {
            relief_devices: 2,
            ..sample_input()
        };
        assert!(two.validate().is_ok());
    }

    #[test]
    fn k_must_exceed_one() {
        let input = ProcessInput {
            heat_capacity_ratio: 1.0,
            ..sample_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn holdup_bounds_are_inclusive() {
        for h in [0.0, 1.0] {
            let input = ProcessInput {
                liquid_holdup_fraction: h,
                ..sample_input()
            };
            assert!(input.validate().is_ok());
        }
        let input = ProcessInput {
            liquid_holdup_fraction: 1.01,
            ..sample_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn design_basis_factors() {
        let basis = DesignBasis::new(1000.0, 101.325);
        assert!((basis.design_pressure_kpa - 1100.0).abs() < 1e-9);
        assert!((basis.max_accumulated_pressure_kpa - 1331.0).abs() < 1e-9);
    }

    #[test]
    fn sphere_when_length_is_zero() {
        // L=0 이면 구(sphere)와 같다
        let g = VesselGeometry::new(0.0, 2.0, 1.0);
        assert!((g.total_volume_m3 - 4.0 / 3.0 * PI).abs() < 1e-12);
        assert!((g.wetted_area_m2 - 4.0 * PI).abs() < 1e-12);
        assert!(g.vapour_volume_m3.abs() < 1e-12);
    }
}
