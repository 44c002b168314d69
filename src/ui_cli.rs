use std::io::{BufRead, Write};

use crate::app::AppError;
use crate::conversion::{self, ConversionError};
use crate::i18n::{keys, Translator};
use crate::provider::ProcessDataProvider;
use crate::relief::ProcessInput;

/// 사용자에게 공정 조건을 하나씩 물어 입력을 구성하는 제공자.
///
/// 숫자가 아니거나 알 수 없는 단위면 같은 항목을 다시 묻는다.
/// 증기 분율은 묻지 않고 1(전량 기체)로 둔다.
pub struct PromptProvider<'t, R: BufRead, W: Write> {
    tr: &'t Translator,
    input: R,
    output: W,
}

impl<'t, R: BufRead, W: Write> PromptProvider<'t, R, W> {
    pub fn new(tr: &'t Translator, input: R, output: W) -> Self {
        Self { tr, input, output }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    fn read_f64(&mut self, key: &str) -> Result<f64, AppError> {
        let tr = self.tr;
        loop {
            let s = self.read_line(tr.t(key))?;
            match s.parse::<f64>() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
            }
        }
    }

    fn read_u32(&mut self, key: &str) -> Result<u32, AppError> {
        let tr = self.tr;
        loop {
            let s = self.read_line(tr.t(key))?;
            match s.parse::<u32>() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
            }
        }
    }

    /// 값과 단위를 읽어 변환한다. 단위를 비워 두면 기본 단위를 쓴다.
    fn read_tagged(
        &mut self,
        value_key: &str,
        unit_key: &str,
        default_unit: &str,
        convert: fn(f64, &str) -> Result<f64, ConversionError>,
    ) -> Result<f64, AppError> {
        let tr = self.tr;
        let value = self.read_f64(value_key)?;
        loop {
            let unit = self.read_line(tr.t(unit_key))?;
            let unit = if unit.is_empty() { default_unit } else { unit.as_str() };
            match convert(value, unit) {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "{}", tr.t(keys::ERROR_INVALID_UNIT))?,
            }
        }
    }

    fn read_length_pair(&mut self) -> Result<(f64, f64), AppError> {
        let tr = self.tr;
        let length = self.read_f64(keys::PROMPT_VESSEL_LENGTH)?;
        let diameter = self.read_f64(keys::PROMPT_VESSEL_DIAMETER)?;
        loop {
            let unit = self.read_line(tr.t(keys::PROMPT_LENGTH_UNIT))?;
            let unit = if unit.is_empty() { "m" } else { unit.as_str() };
            match (
                conversion::length_to_meter(length, unit),
                conversion::length_to_meter(diameter, unit),
            ) {
                (Ok(l), Ok(d)) => return Ok((l, d)),
                _ => writeln!(self.output, "{}", tr.t(keys::ERROR_INVALID_UNIT))?,
            }
        }
    }
}

impl<R: BufRead, W: Write> ProcessDataProvider for PromptProvider<'_, R, W> {
    fn process_input(&mut self) -> Result<ProcessInput, AppError> {
        let tr = self.tr;
        writeln!(self.output, "{}", tr.t(keys::INTERACTIVE_HEADING))?;
        writeln!(self.output, "{}", tr.t(keys::INTERACTIVE_NOTE))?;

        let pressure_kpa_abs = self.read_tagged(
            keys::PROMPT_PRESSURE,
            keys::PROMPT_PRESSURE_UNIT,
            "kPa",
            conversion::pressure_to_kpa_abs,
        )?;
        let temperature_k = self.read_tagged(
            keys::PROMPT_TEMPERATURE,
            keys::PROMPT_TEMPERATURE_UNIT,
            "K",
            conversion::temperature_to_kelvin,
        )?;
        let molecular_weight = self.read_f64(keys::PROMPT_MOLECULAR_WEIGHT)?;
        let compressibility = self.read_f64(keys::PROMPT_COMPRESSIBILITY)?;
        let heat_capacity_ratio = self.read_f64(keys::PROMPT_HEAT_CAPACITY_RATIO)?;
        let mass_flow_kg_per_s = self.read_tagged(
            keys::PROMPT_MASS_FLOW,
            keys::PROMPT_MASS_FLOW_UNIT,
            "kg/s",
            conversion::mass_flow_to_kg_per_s,
        )?;
        let heat_of_vaporization_kj_per_kg = self.read_f64(keys::PROMPT_HEAT_OF_VAPORIZATION)?;
        let relief_devices = self.read_u32(keys::PROMPT_DEVICES)?;
        let (vessel_length_m, vessel_diameter_m) = self.read_length_pair()?;
        let liquid_holdup_fraction = self.read_f64(keys::PROMPT_HOLDUP)?;

        Ok(ProcessInput {
            pressure_kpa_abs,
            temperature_k,
            molecular_weight,
            compressibility,
            heat_capacity_ratio,
            mass_flow_kg_per_s,
            heat_of_vaporization_kj_per_kg,
            vapour_fraction: 1.0,
            relief_devices,
            vessel_length_m,
            vessel_diameter_m,
            liquid_holdup_fraction,
        })
    }
}
