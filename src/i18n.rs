use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";

    pub const REPORT_TITLE: &str = "report.title";
    pub const SECTION_DESIGN_BASIS: &str = "report.section_design_basis";
    pub const EXPECTED_PRESSURE: &str = "report.expected_pressure";
    pub const DESIGN_PRESSURE: &str = "report.design_pressure";
    pub const ACCUMULATED_PRESSURE: &str = "report.accumulated_pressure";
    pub const DOWNSTREAM_PRESSURE: &str = "report.downstream_pressure";

    pub const SECTION_VESSEL: &str = "report.section_vessel";
    pub const TOTAL_VOLUME: &str = "report.total_volume";
    pub const WETTED_AREA: &str = "report.wetted_area";
    pub const VAPOUR_VOLUME: &str = "report.vapour_volume";

    pub const SECTION_LOAD: &str = "report.section_load";
    pub const FIRE_HEAT: &str = "report.fire_heat";
    pub const FIRE_LOAD: &str = "report.fire_load";
    pub const BLOCKED_LOAD: &str = "report.blocked_load";
    pub const GOVERNING_LOAD: &str = "report.governing_load";
    pub const CASE_FIRE: &str = "report.case_fire";
    pub const CASE_BLOCKED: &str = "report.case_blocked";
    pub const DEVICES: &str = "report.devices";
    pub const LOAD_PER_DEVICE: &str = "report.load_per_device";

    pub const SECTION_ORIFICE: &str = "report.section_orifice";
    pub const CRITICAL_PRESSURE: &str = "report.critical_pressure";
    pub const REGIME: &str = "report.regime";
    pub const REGIME_CRITICAL: &str = "report.regime_critical";
    pub const REGIME_SUBCRITICAL: &str = "report.regime_subcritical";
    pub const REQUIRED_AREA: &str = "report.required_area";
    pub const DESIGNATION: &str = "report.designation";
    pub const DESIGNATED_AREA: &str = "report.designated_area";
    pub const OVERSIZE: &str = "report.oversize";

    pub const TABLE_HEADING: &str = "table.heading";

    pub const INTERACTIVE_HEADING: &str = "interactive.heading";
    pub const INTERACTIVE_NOTE: &str = "interactive.note";
    pub const PROMPT_PRESSURE: &str = "prompt.pressure";
    pub const PROMPT_PRESSURE_UNIT: &str = "prompt.pressure_unit";
    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const PROMPT_TEMPERATURE_UNIT: &str = "prompt.temperature_unit";
    pub const PROMPT_MOLECULAR_WEIGHT: &str = "prompt.molecular_weight";
    pub const PROMPT_COMPRESSIBILITY: &str = "prompt.compressibility";
    pub const PROMPT_HEAT_CAPACITY_RATIO: &str = "prompt.heat_capacity_ratio";
    pub const PROMPT_MASS_FLOW: &str = "prompt.mass_flow";
    pub const PROMPT_MASS_FLOW_UNIT: &str = "prompt.mass_flow_unit";
    pub const PROMPT_HEAT_OF_VAPORIZATION: &str = "prompt.heat_of_vaporization";
    pub const PROMPT_DEVICES: &str = "prompt.devices";
    pub const PROMPT_VESSEL_LENGTH: &str = "prompt.vessel_length";
    pub const PROMPT_VESSEL_DIAMETER: &str = "prompt.vessel_diameter";
    pub const PROMPT_LENGTH_UNIT: &str = "prompt.length_unit";
    pub const PROMPT_HOLDUP: &str = "prompt.holdup";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_UNIT: &str = "error.invalid_unit";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            overrides: None,
        }
    }

    /// 언어팩 디렉터리(locales/ 등)의 `<code>.toml`로 내장 문자열을 덮어쓴다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn with_pack(lang: Language, pack_dir: &Path) -> Self {
        Self {
            lang,
            overrides: load_overrides(pack_dir, lang.as_code()),
        }
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열로 폴백한다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그 → 설정 → 시스템 로케일 순으로 언어를 결정한다. 모두 없으면 영어.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: &str) -> Language {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| normalize_lang(config_lang))
        .or_else(detect_system_language)
        .unwrap_or(Language::En)
}

fn normalize_lang(code: &str) -> Option<Language> {
    let lang = code
        .trim()
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some(Language::Ko),
        "en" => Some(Language::En),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<Language> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_lang) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_lang(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션.키 = "값"
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        REPORT_TITLE => "=== 압력 릴리프 밸브 예비 사이징 ===",
        SECTION_DESIGN_BASIS => "-- 설계 기준 --",
        EXPECTED_PRESSURE => "운전 압력",
        DESIGN_PRESSURE => "설계 압력",
        ACCUMULATED_PRESSURE => "최대 축적 압력",
        DOWNSTREAM_PRESSURE => "배압",
        SECTION_VESSEL => "-- 용기 --",
        TOTAL_VOLUME => "전체 체적",
        WETTED_AREA => "접액 면적",
        VAPOUR_VOLUME => "기상부 체적",
        SECTION_LOAD => "-- 릴리프 부하 --",
        FIRE_HEAT => "화재 입열",
        FIRE_LOAD => "화재 부하",
        BLOCKED_LOAD => "출구 차단 부하",
        GOVERNING_LOAD => "지배 부하",
        CASE_FIRE => "화재",
        CASE_BLOCKED => "출구 차단",
        DEVICES => "릴리프 장치 수",
        LOAD_PER_DEVICE => "장치당 부하",
        SECTION_ORIFICE => "-- 오리피스 --",
        CRITICAL_PRESSURE => "임계 유동 압력",
        REGIME => "유동 영역",
        REGIME_CRITICAL => "임계",
        REGIME_SUBCRITICAL => "아임계",
        REQUIRED_AREA => "최소 요구 면적",
        DESIGNATION => "오리피스 지정",
        DESIGNATED_AREA => "표준 면적",
        OVERSIZE => "지정 불가: 밸브가 너무 큼 (T 오리피스 초과)",
        TABLE_HEADING => "지정  면적[in²]  면적[mm²]",
        INTERACTIVE_HEADING => "-- 공정 조건 입력 --",
        INTERACTIVE_NOTE => "참고: 기체(증기) 릴리프만 지원합니다. 압력 단위에 g를 붙이면 게이지압(예: barg).",
        PROMPT_PRESSURE => "운전 압력 값: ",
        PROMPT_PRESSURE_UNIT => "압력 단위 (kPa, barg, psig ...) [kPa]: ",
        PROMPT_TEMPERATURE => "온도 값: ",
        PROMPT_TEMPERATURE_UNIT => "온도 단위 (K, C, F, R) [K]: ",
        PROMPT_MOLECULAR_WEIGHT => "분자량: ",
        PROMPT_COMPRESSIBILITY => "압축계수 Z: ",
        PROMPT_HEAT_CAPACITY_RATIO => "비열비 k: ",
        PROMPT_MASS_FLOW => "출구 차단 질량유량 값: ",
        PROMPT_MASS_FLOW_UNIT => "유량 단위 (kg/s, kg/h, t/h, lb/h) [kg/s]: ",
        PROMPT_HEAT_OF_VAPORIZATION => "증발잠열 [kJ/kg]: ",
        PROMPT_DEVICES => "릴리프 장치 수 (1~2): ",
        PROMPT_VESSEL_LENGTH => "용기 길이: ",
        PROMPT_VESSEL_DIAMETER => "용기 직경: ",
        PROMPT_LENGTH_UNIT => "길이 단위 (m, mm, ft, in) [m]: ",
        PROMPT_HOLDUP => "액체 체류 분율 (0~1): ",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_INVALID_UNIT => "지원하지 않는 단위입니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        REPORT_TITLE => "=== Pressure Relief Valve Preliminary Sizing ===",
        SECTION_DESIGN_BASIS => "-- Design basis --",
        EXPECTED_PRESSURE => "Operating pressure",
        DESIGN_PRESSURE => "Design pressure",
        ACCUMULATED_PRESSURE => "Max. accumulated pressure",
        DOWNSTREAM_PRESSURE => "Back pressure",
        SECTION_VESSEL => "-- Vessel --",
        TOTAL_VOLUME => "Total volume",
        WETTED_AREA => "Wetted area",
        VAPOUR_VOLUME => "Vapour-space volume",
        SECTION_LOAD => "-- Relief load --",
        FIRE_HEAT => "Fire heat input",
        FIRE_LOAD => "Fire case load",
        BLOCKED_LOAD => "Blocked outlet load",
        GOVERNING_LOAD => "Governing load",
        CASE_FIRE => "fire",
        CASE_BLOCKED => "blocked outlet",
        DEVICES => "Relief devices",
        LOAD_PER_DEVICE => "Load per device",
        SECTION_ORIFICE => "-- Orifice --",
        CRITICAL_PRESSURE => "Critical flow pressure",
        REGIME => "Flow regime",
        REGIME_CRITICAL => "critical",
        REGIME_SUBCRITICAL => "subcritical",
        REQUIRED_AREA => "Required area",
        DESIGNATION => "Designation",
        DESIGNATED_AREA => "Standard area",
        OVERSIZE => "No designation: valve too large (exceeds T orifice)",
        TABLE_HEADING => "Code  Area[in²]  Area[mm²]",
        INTERACTIVE_HEADING => "-- Process conditions --",
        INTERACTIVE_NOTE => "Note: vapour relief only. Append g to a pressure unit for gauge (e.g. barg).",
        PROMPT_PRESSURE => "Operating pressure value: ",
        PROMPT_PRESSURE_UNIT => "Pressure unit (kPa, barg, psig ...) [kPa]: ",
        PROMPT_TEMPERATURE => "Temperature value: ",
        PROMPT_TEMPERATURE_UNIT => "Temperature unit (K, C, F, R) [K]: ",
        PROMPT_MOLECULAR_WEIGHT => "Molecular weight: ",
        PROMPT_COMPRESSIBILITY => "Compressibility factor Z: ",
        PROMPT_HEAT_CAPACITY_RATIO => "Specific heat ratio k: ",
        PROMPT_MASS_FLOW => "Blocked outlet mass flow value: ",
        PROMPT_MASS_FLOW_UNIT => "Mass flow unit (kg/s, kg/h, t/h, lb/h) [kg/s]: ",
        PROMPT_HEAT_OF_VAPORIZATION => "Heat of vaporization [kJ/kg]: ",
        PROMPT_DEVICES => "Number of relief devices (1-2): ",
        PROMPT_VESSEL_LENGTH => "Vessel length: ",
        PROMPT_VESSEL_DIAMETER => "Vessel diameter: ",
        PROMPT_LENGTH_UNIT => "Length unit (m, mm, ft, in) [m]: ",
        PROMPT_HOLDUP => "Liquid holdup fraction (0-1): ",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_INVALID_UNIT => "Unsupported unit.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko"), "en"), Language::Ko);
        assert_eq!(resolve_language(Some("auto"), "en-US"), Language::En);
        assert_eq!(resolve_language(None, "ko_KR.UTF-8"), Language::Ko);
    }

    #[test]
    fn every_key_has_both_languages() {
        use keys::*;
        for key in [REPORT_TITLE, OVERSIZE, PROMPT_HOLDUP, ERROR_INVALID_UNIT] {
            assert_ne!(ko(key), "[missing translation]");
            assert!(en(key).is_some());
        }
    }

    #[test]
    fn overrides_replace_builtin() {
        let mut map = HashMap::new();
        map.insert(keys::DEVICES.to_string(), "Valves".to_string());
        let tr = Translator {
            lang: Language::En,
            overrides: Some(map),
        };
        assert_eq!(tr.t(keys::DEVICES), "Valves");
        assert_eq!(tr.t(keys::REGIME), "Flow regime");
    }

    #[test]
    fn nested_pack_is_flattened() {
        let map = parse_toml_to_map("[report]\ndevices = \"PRVs\"\n").unwrap();
        assert_eq!(map.get("report.devices").map(String::as_str), Some("PRVs"));
    }
}
