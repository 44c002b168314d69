//! 기체(증기) 압력 릴리프 밸브 예비 사이징 엔진.
//!
//! 세 단계로 구성된 상태 없는 순수 계산이다.
//! 1. [`relief_load`]: 화재 / 출구 차단 부하 중 큰 값
//! 2. [`flow_regime`]: 임계·아임계 판정과 최소 오리피스 면적
//! 3. [`designation`]: 표준 오리피스 지정 문자 선택

pub mod designation;
pub mod error;
pub mod flow_regime;
pub mod process;
pub mod relief_load;
pub mod sizing;

pub use designation::{
    find_designation, select_designation, Designation, StandardOrifice, DESIGNATION_TABLE,
};
pub use error::{ReliefResult, SizingError};
pub use flow_regime::{CorrectionFactors, FlowRegime};
pub use process::{DesignBasis, ProcessInput, VesselGeometry};
pub use relief_load::{ReliefCase, ReliefLoad};
pub use sizing::{size_relief_valve, SizingConfig, SizingOverrides, SizingResult};
