use thiserror::Error;

use crate::units::*;

/// 단위 문자열 해석 시 발생 가능한 오류.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown {quantity} unit: {unit}")]
    UnknownUnit {
        quantity: &'static str,
        unit: String,
    },
}

fn unknown(quantity: &'static str, s: &str) -> ConversionError {
    ConversionError::UnknownUnit {
        quantity,
        unit: s.to_string(),
    }
}

/// 압력 단위 문자열을 단위와 게이지/절대 모드로 해석한다.
///
/// 접미사 `g`(예: `barg`, `kPag`, `psig`)는 게이지, `a`(예: `bara`, `psia`)나 접미사 없음은 절대압이다.
pub fn parse_pressure_unit(s: &str) -> Result<(PressureUnit, PressureKind), ConversionError> {
    let lower = s.trim().to_lowercase();
    let (base, kind) = match lower.as_str() {
        "atm" => return Ok((PressureUnit::Atm, PressureKind::Absolute)),
        other => {
            if let Some(b) = other.strip_suffix("(g)").or_else(|| other.strip_suffix('g')) {
                (b, PressureKind::Gauge)
            } else if let Some(b) = other.strip_suffix("(a)").or_else(|| other.strip_suffix('a')) {
                // "pa", "kpa", "mpa"는 접미사가 아니라 단위 자체
                if matches!(other, "pa" | "kpa" | "mpa") {
                    (other, PressureKind::Absolute)
                } else {
                    (b, PressureKind::Absolute)
                }
            } else {
                (other, PressureKind::Absolute)
            }
        }
    };
    let unit = match base.trim() {
        "pa" => PressureUnit::Pascal,
        "kpa" => PressureUnit::KiloPascal,
        "mpa" => PressureUnit::MegaPascal,
        "bar" => PressureUnit::Bar,
        "psi" => PressureUnit::Psi,
        _ => return Err(unknown("pressure", s)),
    };
    Ok((unit, kind))
}

pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        "r" | "rankine" => Ok(TemperatureUnit::Rankine),
        _ => Err(unknown("temperature", s)),
    }
}

pub fn parse_mass_flow_unit(s: &str) -> Result<MassFlowUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kg/s" => Ok(MassFlowUnit::KgPerSecond),
        "kg/h" | "kg/hr" => Ok(MassFlowUnit::KgPerHour),
        "t/h" | "tph" => Ok(MassFlowUnit::TonnePerHour),
        "lb/h" | "lb/hr" | "lbm/h" => Ok(MassFlowUnit::PoundPerHour),
        _ => Err(unknown("mass flow", s)),
    }
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "mm" => Ok(LengthUnit::Millimeter),
        "cm" => Ok(LengthUnit::Centimeter),
        "in" | "inch" => Ok(LengthUnit::Inch),
        "ft" | "foot" => Ok(LengthUnit::Foot),
        _ => Err(unknown("length", s)),
    }
}

/// 단위 문자열이 붙은 압력을 kPa(a)로 환산한다.
pub fn pressure_to_kpa_abs(value: f64, unit: &str) -> Result<f64, ConversionError> {
    let (unit, kind) = parse_pressure_unit(unit)?;
    Ok(to_kpa_abs(value, unit, kind))
}

pub fn temperature_to_kelvin(value: f64, unit: &str) -> Result<f64, ConversionError> {
    Ok(to_kelvin(value, parse_temperature_unit(unit)?))
}

pub fn mass_flow_to_kg_per_s(value: f64, unit: &str) -> Result<f64, ConversionError> {
    Ok(to_kg_per_s(value, parse_mass_flow_unit(unit)?))
}

pub fn length_to_meter(value: f64, unit: &str) -> Result<f64, ConversionError> {
    Ok(to_meter(value, parse_length_unit(unit)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_suffixes() {
        assert_eq!(
            parse_pressure_unit("kPa").unwrap(),
            (PressureUnit::KiloPascal, PressureKind::Absolute)
        );
        assert_eq!(
            parse_pressure_unit("kPag").unwrap(),
            (PressureUnit::KiloPascal, PressureKind::Gauge)
        );
        assert_eq!(
            parse_pressure_unit("barg").unwrap(),
            (PressureUnit::Bar, PressureKind::Gauge)
        );
        assert_eq!(
            parse_pressure_unit("bara").unwrap(),
            (PressureUnit::Bar, PressureKind::Absolute)
        );
        assert_eq!(
            parse_pressure_unit("psi(g)").unwrap(),
            (PressureUnit::Psi, PressureKind::Gauge)
        );
        assert_eq!(
            parse_pressure_unit("MPa").unwrap(),
            (PressureUnit::MegaPascal, PressureKind::Absolute)
        );
        assert_eq!(
            parse_pressure_unit("atm").unwrap(),
            (PressureUnit::Atm, PressureKind::Absolute)
        );
        assert!(parse_pressure_unit("mmHg").is_err());
    }

    #[test]
    fn tagged_values_convert() {
        assert!((pressure_to_kpa_abs(1.0, "barg").unwrap() - 201.325).abs() < 1e-9);
        assert!((temperature_to_kelvin(25.0, "C").unwrap() - 298.15).abs() < 1e-9);
        assert!((mass_flow_to_kg_per_s(7200.0, "kg/h").unwrap() - 2.0).abs() < 1e-12);
        assert!((length_to_meter(1500.0, "mm").unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn unknown_unit_names_quantity() {
        let err = parse_temperature_unit("degX").unwrap_err();
        assert_eq!(err.to_string(), "unknown temperature unit: degX");
    }
}
