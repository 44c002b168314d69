//! TOML 공정 입력 파일. 단위 문자열이 붙은 값을 계산 기준 단위로 환산한다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::app::AppError;
use crate::conversion::{self, ConversionError};
use crate::provider::ProcessDataProvider;
use crate::relief::ProcessInput;

/// 입력 파일 처리 중 발생 가능한 오류.
#[derive(Error, Debug)]
pub enum InputFileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid input file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Unit(#[from] ConversionError),
}

fn default_pressure_unit() -> String {
    "kPa".into()
}

fn default_temperature_unit() -> String {
    "K".into()
}

fn default_mass_flow_unit() -> String {
    "kg/s".into()
}

fn default_length_unit() -> String {
    "m".into()
}

fn default_vapour_fraction() -> f64 {
    1.0
}

fn default_devices() -> u32 {
    1
}

/// `[stream]` 섹션.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamSection {
    pub pressure: f64,
    #[serde(default = "default_pressure_unit")]
    pub pressure_unit: String,
    pub temperature: f64,
    #[serde(default = "default_temperature_unit")]
    pub temperature_unit: String,
    pub molecular_weight: f64,
    pub compressibility: f64,
    pub heat_capacity_ratio: f64,
    pub mass_flow: f64,
    #[serde(default = "default_mass_flow_unit")]
    pub mass_flow_unit: String,
    pub heat_of_vaporization_kj_per_kg: f64,
    #[serde(default = "default_vapour_fraction")]
    pub vapour_fraction: f64,
}

/// `[vessel]` 섹션.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VesselSection {
    pub length: f64,
    pub diameter: f64,
    #[serde(default = "default_length_unit")]
    pub length_unit: String,
    pub liquid_holdup_fraction: f64,
}

/// 입력 파일 전체.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputFile {
    #[serde(default = "default_devices")]
    pub relief_devices: u32,
    pub stream: StreamSection,
    pub vessel: VesselSection,
}

impl InputFile {
    pub fn from_toml(content: &str) -> Result<Self, InputFileError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, InputFileError> {
        let content = fs::read_to_string(path).map_err(|source| InputFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// 단위를 환산해 계산용 입력을 만든다. 물리적 타당성 검증은 사이징 단계에서 한다.
    pub fn to_process_input(&self) -> Result<ProcessInput, ConversionError> {
        let s = &self.stream;
        let v = &self.vessel;
        Ok(ProcessInput {
            pressure_kpa_abs: conversion::pressure_to_kpa_abs(s.pressure, &s.pressure_unit)?,
            temperature_k: conversion::temperature_to_kelvin(s.temperature, &s.temperature_unit)?,
            molecular_weight: s.molecular_weight,
            compressibility: s.compressibility,
            heat_capacity_ratio: s.heat_capacity_ratio,
            mass_flow_kg_per_s: conversion::mass_flow_to_kg_per_s(s.mass_flow, &s.mass_flow_unit)?,
            heat_of_vaporization_kj_per_kg: s.heat_of_vaporization_kj_per_kg,
            vapour_fraction: s.vapour_fraction,
            relief_devices: self.relief_devices,
            vessel_length_m: conversion::length_to_meter(v.length, &v.length_unit)?,
            vessel_diameter_m: conversion::length_to_meter(v.diameter, &v.length_unit)?,
            liquid_holdup_fraction: v.liquid_holdup_fraction,
        })
    }
}

/// 입력 파일에서 공정 입력을 읽는 제공자.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProcessDataProvider for FileProvider {
    fn process_input(&mut self) -> Result<ProcessInput, AppError> {
        debug!(path = %self.path.display(), "loading process input file");
        let file = InputFile::load(&self.path)?;
        let input = file.to_process_input().map_err(InputFileError::from)?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[stream]
pressure = 10.0
pressure_unit = "barg"
temperature = 76.85
temperature_unit = "C"
molecular_weight = 44.0
compressibility = 0.95
heat_capacity_ratio = 1.3
mass_flow = 5000.0
mass_flow_unit = "kg/h"
heat_of_vaporization_kj_per_kg = 300.0

[vessel]
length = 6000.0
diameter = 2000.0
length_unit = "mm"
liquid_holdup_fraction = 0.5
"#;

    #[test]
    fn units_are_converted_and_defaults_applied() {
        let input = InputFile::from_toml(MINIMAL)
            .unwrap()
            .to_process_input()
            .unwrap();
        assert!((input.pressure_kpa_abs - 1101.325).abs() < 1e-9);
        assert!((input.temperature_k - 350.0).abs() < 1e-9);
        assert!((input.mass_flow_kg_per_s * 3600.0 - 5000.0).abs() < 1e-9);
        assert!((input.vessel_length_m - 6.0).abs() < 1e-12);
        assert_eq!(input.relief_devices, 1);
        assert_eq!(input.vapour_fraction, 1.0);
    }

    #[test]
    fn bad_unit_is_reported() {
        let src = MINIMAL.replace("\"kg/h\"", "\"kg/day\"");
        let err = InputFile::from_toml(&src)
            .unwrap()
            .to_process_input()
            .unwrap_err();
        assert!(err.to_string().contains("kg/day"));
    }

    #[test]
    fn misspelled_unit_key_is_rejected() {
        let src = MINIMAL.replace("pressure_unit = \"barg\"", "presure_unit = \"barg\"");
        let err = InputFile::from_toml(&src).unwrap_err();
        assert!(matches!(err, InputFileError::Parse(_)));
        assert!(err.to_string().contains("presure_unit"));

        let src = MINIMAL.replace("length_unit", "length_unti");
        assert!(InputFile::from_toml(&src).is_err());
        let src = MINIMAL.replace("[stream]", "relief_device = 2\n\n[stream]");
        assert!(InputFile::from_toml(&src).is_err());
    }

    #[test]
    fn missing_section_is_parse_error() {
        let err = InputFile::from_toml("relief_devices = 1").unwrap_err();
        assert!(matches!(err, InputFileError::Parse(_)));
    }
}
