//! 단위 정의 및 변환 모듈 모음.
//! 계산 엔진은 kPa(절대), K, kg/s, m, mm² 기준 값만 받으므로 입력 단계에서 여기로 환산한다.

pub mod area;
pub mod length;
pub mod mass_flow;
pub mod pressure;
pub mod temperature;

pub use area::{in2_to_mm2, mm2_to_in2, IN2_PER_MM2};
pub use length::{to_meter, LengthUnit};
pub use mass_flow::{kg_per_s_to_kg_per_h, to_kg_per_s, MassFlowUnit};
pub use pressure::{from_kpa_abs, to_kpa_abs, PressureKind, PressureUnit, ATM_KPA};
pub use temperature::{to_kelvin, TemperatureUnit};
