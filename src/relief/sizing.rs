//! 부하 산정 → 유동 영역/면적 → 지정 문자 선택으로 이어지는 사이징 파이프라인.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::designation::{select_designation, Designation};
use super::error::{require_positive, ReliefResult};
use super::flow_regime::{
    required_orifice_area, CorrectionFactors, FlowRegime, OrificeDemand, DEFAULT_KB, DEFAULT_KC,
    DEFAULT_KD,
};
use super::process::{DesignBasis, ProcessInput, VesselGeometry};
use super::relief_load::{estimate_relief_load, ReliefLoad};
use crate::units::{mm2_to_in2, ATM_KPA};

/// 실행마다 바꿀 수 있는 계수 설정. config.toml의 `[sizing]` 섹션과 대응한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Kd
    pub discharge_coefficient: f64,
    /// Kb
    pub backpressure_correction: f64,
    /// Kc
    pub combination_correction: f64,
    /// 화재 환경계수 F
    pub environmental_factor: f64,
    /// 배압 [kPa(a)]
    pub downstream_pressure_kpa: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            discharge_coefficient: DEFAULT_KD,
            backpressure_correction: DEFAULT_KB,
            combination_correction: DEFAULT_KC,
            environmental_factor: 1.0,
            downstream_pressure_kpa: ATM_KPA,
        }
    }
}

/// 명령행 등에서 한 번의 실행에만 적용하는 계수 덮어쓰기.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizingOverrides {
    pub kd: Option<f64>,
    pub kb: Option<f64>,
    pub kc: Option<f64>,
    pub environmental_factor: Option<f64>,
    pub downstream_pressure_kpa: Option<f64>,
}

impl SizingConfig {
    pub fn factors(&self) -> CorrectionFactors {
        CorrectionFactors {
            kd: self.discharge_coefficient,
            kb: self.backpressure_correction,
            kc: self.combination_correction,
        }
    }

    /// 실행 단위 덮어쓰기를 적용한다. 값이 없는 항목은 현재 설정을 유지한다.
    pub fn with_overrides(&self, o: &SizingOverrides) -> SizingConfig {
        SizingConfig {
            discharge_coefficient: o.kd.unwrap_or(self.discharge_coefficient),
            backpressure_correction: o.kb.unwrap_or(self.backpressure_correction),
            combination_correction: o.kc.unwrap_or(self.combination_correction),
            environmental_factor: o.environmental_factor.unwrap_or(self.environmental_factor),
            downstream_pressure_kpa: o
                .downstream_pressure_kpa
                .unwrap_or(self.downstream_pressure_kpa),
        }
    }

    pub fn validate(&self) -> ReliefResult<()> {
        require_positive(self.discharge_coefficient, "discharge coefficient")?;
        require_positive(self.backpressure_correction, "backpressure correction")?;
        require_positive(self.combination_correction, "combination correction")?;
        require_positive(self.environmental_factor, "environmental factor")?;
        require_positive(self.downstream_pressure_kpa, "downstream pressure")?;
        Ok(())
    }
}

/// 사이징 최종 결과. 면적은 장치 1개 기준이다.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingResult {
    pub design_basis: DesignBasis,
    pub geometry: VesselGeometry,
    pub relief_load: ReliefLoad,
    pub relief_devices: u32,
    pub load_per_device_kg_per_h: f64,
    pub regime: FlowRegime,
    pub critical_pressure_kpa: f64,
    pub required_area_mm2: f64,
    pub designation: Designation,
}

impl SizingResult {
    pub fn required_area_in2(&self) -> f64 {
        mm2_to_in2(self.required_area_mm2)
    }
}

/// 공정 입력과 설정으로 릴리프 밸브를 사이징한다.
///
/// 입력/설정 검증 실패는 `Precondition`, 식 내부의 정의되지 않는 연산은 `Domain` 오류다.
/// 표준 최대 오리피스를 넘는 경우는 `Designation::Oversize`로 정상 반환된다.
pub fn size_relief_valve(input: &ProcessInput, config: &SizingConfig) -> ReliefResult<SizingResult> {
    input.validate()?;
    config.validate()?;

    let design_basis = DesignBasis::new(input.pressure_kpa_abs, config.downstream_pressure_kpa);
    let geometry = VesselGeometry::from_input(input);
    debug!(?design_basis, ?geometry, "design basis derived");

    let relief_load = estimate_relief_load(
        geometry.wetted_area_m2,
        config.environmental_factor,
        input.heat_of_vaporization_kj_per_kg,
        input.mass_flow_kg_per_s,
    )?;
    let load_per_device_kg_per_h = relief_load.kg_per_h() / f64::from(input.relief_devices);

    let demand = OrificeDemand {
        relief_load_kg_per_h: load_per_device_kg_per_h,
        upstream_pressure_kpa: design_basis.design_pressure_kpa,
        downstream_pressure_kpa: design_basis.downstream_pressure_kpa,
        heat_capacity_ratio: input.heat_capacity_ratio,
        compressibility: input.compressibility,
        temperature_k: input.temperature_k,
        molecular_weight: input.molecular_weight,
    };
    let orifice = required_orifice_area(&demand, &config.factors())?;
    let designation = select_designation(mm2_to_in2(orifice.area_mm2));

    info!(
        regime = %orifice.regime,
        area_mm2 = orifice.area_mm2,
        designation = ?designation.code(),
        "relief valve sized"
    );

    Ok(SizingResult {
        design_basis,
        geometry,
        relief_load,
        relief_devices: input.relief_devices,
        load_per_device_kg_per_h,
        regime: orifice.regime,
        critical_pressure_kpa: orifice.critical_pressure_kpa,
        required_area_mm2: orifice.area_mm2,
        designation,
    })
}
