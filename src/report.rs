//! 사이징 결과 출력. 사람이 읽는 표([`TextReport`])와 JSON([`JsonSink`])을 제공한다.

use serde::Serialize;
use std::io::{BufWriter, Write};

use crate::app::AppError;
use crate::i18n::{keys, Translator};
use crate::provider::ResultSink;
use crate::relief::{
    find_designation, Designation, FlowRegime, ProcessInput, ReliefCase, SizingResult,
    StandardOrifice, DESIGNATION_TABLE,
};
use crate::units::{from_kpa_abs, PressureKind, PressureUnit};

/// 외부 연동용 결과 레코드. 필드 이름은 camelCase로 직렬화한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingReport {
    pub required_area_mm2: f64,
    pub required_area_in2: f64,
    pub regime: FlowRegime,
    /// oversize이면 null
    pub designation_code: Option<String>,
    pub designated_area_in2: f64,
    pub designated_area_mm2: f64,
    pub oversize: bool,
    pub relief_load_kg_per_h: f64,
    pub governing_case: ReliefCase,
    pub relief_devices: u32,
    pub load_per_device_kg_per_h: f64,
    pub design_pressure_kpa: f64,
    pub max_accumulated_pressure_kpa: f64,
    pub critical_pressure_kpa: f64,
    pub downstream_pressure_kpa: f64,
    pub wetted_area_m2: f64,
}

impl From<&SizingResult> for SizingReport {
    fn from(r: &SizingResult) -> Self {
        Self {
            required_area_mm2: r.required_area_mm2,
            required_area_in2: r.required_area_in2(),
            regime: r.regime,
            designation_code: r.designation.code().map(String::from),
            designated_area_in2: r.designation.area_in2(),
            designated_area_mm2: r.designation.area_mm2(),
            oversize: r.designation.is_oversize(),
            relief_load_kg_per_h: r.relief_load.kg_per_h(),
            governing_case: r.relief_load.governing,
            relief_devices: r.relief_devices,
            load_per_device_kg_per_h: r.load_per_device_kg_per_h,
            design_pressure_kpa: r.design_basis.design_pressure_kpa,
            max_accumulated_pressure_kpa: r.design_basis.max_accumulated_pressure_kpa,
            critical_pressure_kpa: r.critical_pressure_kpa,
            downstream_pressure_kpa: r.design_basis.downstream_pressure_kpa,
            wetted_area_m2: r.geometry.wetted_area_m2,
        }
    }
}

/// 결과를 pretty JSON으로 기록한다.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn publish(&mut self, _input: &ProcessInput, result: &SizingResult) -> Result<(), AppError> {
        serde_json::to_writer_pretty(&mut self.out, &SizingReport::from(result))?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// 번역된 라벨로 결과 표를 출력한다.
pub struct TextReport<'t, W: Write> {
    tr: &'t Translator,
    out: W,
}

impl<'t, W: Write> TextReport<'t, W> {
    pub fn new(tr: &'t Translator, out: W) -> Self {
        Self { tr, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, key: &str, value: String) -> std::io::Result<()> {
        writeln!(self.out, "  {:<28} {value}", self.tr.t(key))
    }
}

impl<W: Write> ResultSink for TextReport<'_, W> {
    fn publish(&mut self, _input: &ProcessInput, r: &SizingResult) -> Result<(), AppError> {
        let tr = self.tr;
        writeln!(self.out, "{}", tr.t(keys::REPORT_TITLE))?;

        writeln!(self.out, "{}", tr.t(keys::SECTION_DESIGN_BASIS))?;
        let b = r.design_basis;
        self.line(keys::EXPECTED_PRESSURE, format!("{:.2} kPa(a)", b.expected_pressure_kpa))?;
        self.line(
            keys::DESIGN_PRESSURE,
            format!(
                "{:.2} kPa(a) / {:.2} kPa(g)",
                b.design_pressure_kpa,
                from_kpa_abs(b.design_pressure_kpa, PressureUnit::KiloPascal, PressureKind::Gauge)
            ),
        )?;
        self.line(
            keys::ACCUMULATED_PRESSURE,
            format!("{:.2} kPa(a)", b.max_accumulated_pressure_kpa),
        )?;
        self.line(keys::DOWNSTREAM_PRESSURE, format!("{:.3} kPa(a)", b.downstream_pressure_kpa))?;

        writeln!(self.out, "{}", tr.t(keys::SECTION_VESSEL))?;
        let g = r.geometry;
        self.line(keys::TOTAL_VOLUME, format!("{:.3} m³", g.total_volume_m3))?;
        self.line(keys::WETTED_AREA, format!("{:.3} m²", g.wetted_area_m2))?;
        self.line(keys::VAPOUR_VOLUME, format!("{:.3} m³", g.vapour_volume_m3))?;

        writeln!(self.out, "{}", tr.t(keys::SECTION_LOAD))?;
        let l = r.relief_load;
        self.line(keys::FIRE_HEAT, format!("{:.1} kW", l.fire_heat_kw))?;
        self.line(keys::FIRE_LOAD, format!("{:.1} kg/h", l.fire_kg_per_h))?;
        self.line(keys::BLOCKED_LOAD, format!("{:.1} kg/h", l.blocked_kg_per_h))?;
        let case = match l.governing {
            ReliefCase::Fire => tr.t(keys::CASE_FIRE),
            ReliefCase::BlockedOutlet => tr.t(keys::CASE_BLOCKED),
        };
        self.line(keys::GOVERNING_LOAD, format!("{:.1} kg/h ({case})", l.kg_per_h()))?;
        self.line(keys::DEVICES, r.relief_devices.to_string())?;
        self.line(
            keys::LOAD_PER_DEVICE,
            format!("{:.1} kg/h", r.load_per_device_kg_per_h),
        )?;

        writeln!(self.out, "{}", tr.t(keys::SECTION_ORIFICE))?;
        self.line(keys::CRITICAL_PRESSURE, format!("{:.2} kPa(a)", r.critical_pressure_kpa))?;
        let regime = match r.regime {
            FlowRegime::Critical => tr.t(keys::REGIME_CRITICAL),
            FlowRegime::Subcritical => tr.t(keys::REGIME_SUBCRITICAL),
        };
        self.line(keys::REGIME, regime.to_string())?;
        self.line(
            keys::REQUIRED_AREA,
            format!(
                "{:.2} mm² ({:.4} in²)",
                r.required_area_mm2,
                r.required_area_in2()
            ),
        )?;
        match r.designation {
            Designation::Standard(o) => {
                self.line(keys::DESIGNATION, o.code.to_string())?;
                self.line(
                    keys::DESIGNATED_AREA,
                    format!("{:.2} mm² ({:.3} in²)", o.area_mm2(), o.area_in2),
                )?;
            }
            Designation::Oversize => {
                writeln!(self.out, "  {}", tr.t(keys::OVERSIZE))?;
            }
        }
        Ok(())
    }
}

fn write_orifice_row<W: Write>(out: &mut W, o: &StandardOrifice) -> std::io::Result<()> {
    writeln!(out, "  {}   {:>8.3}  {:>9.1}", o.code, o.area_in2, o.area_mm2())
}

/// 표준 오리피스 지정 테이블을 출력한다.
pub fn write_designation_table<W: Write>(tr: &Translator, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", tr.t(keys::TABLE_HEADING))?;
    for o in DESIGNATION_TABLE {
        write_orifice_row(out, o)?;
    }
    Ok(())
}

/// 지정 문자 하나의 행만 출력한다.
pub fn write_designation<W: Write>(
    tr: &Translator,
    out: &mut W,
    code: char,
) -> Result<(), AppError> {
    let orifice = find_designation(code).ok_or(AppError::UnknownDesignation(code))?;
    writeln!(out, "{}", tr.t(keys::TABLE_HEADING))?;
    write_orifice_row(out, orifice)?;
    Ok(())
}

/// `table` 명령 출력. 버퍼를 거쳐 쓰고 마지막에 flush 오류까지 돌려준다.
pub fn print_designations<W: Write>(
    tr: &Translator,
    out: W,
    code: Option<char>,
) -> Result<(), AppError> {
    let mut out = BufWriter::new(out);
    match code {
        Some(code) => write_designation(tr, &mut out, code)?,
        None => write_designation_table(tr, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn table_lists_every_designation() {
        let tr = Translator::new(Language::En);
        let mut out = Vec::new();
        write_designation_table(&tr, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), DESIGNATION_TABLE.len() + 1);
        assert!(text.contains("26.000"));
    }

    #[test]
    fn single_row_lookup() {
        let tr = Translator::new(Language::En);
        let mut out = Vec::new();
        write_designation(&tr, &mut out, 'j').unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1.287"));
        assert_eq!(text.lines().count(), 2);

        let err = write_designation(&tr, &mut Vec::new(), 'Z').unwrap_err();
        assert!(matches!(err, AppError::UnknownDesignation('Z')));
    }

    /// 버퍼가 비워질 때 실패하는 출력 대상.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn buffered_write_failure_is_reported() {
        let tr = Translator::new(Language::En);
        let err = print_designations(&tr, BrokenPipe, None).unwrap_err();
        assert!(matches!(err, AppError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));

        let mut out = Vec::new();
        print_designations(&tr, &mut out, Some('T')).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("26.000"));
    }
}
