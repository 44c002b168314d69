//! 표준 오리피스 지정 문자(D~T) 테이블과 선택 로직.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::units::in2_to_mm2;

/// 표준 오리피스 한 항목.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardOrifice {
    pub code: char,
    pub area_in2: f64,
}

impl StandardOrifice {
    pub const fn new(code: char, area_in2: f64) -> Self {
        Self { code, area_in2 }
    }

    pub fn area_mm2(&self) -> f64 {
        in2_to_mm2(self.area_in2)
    }
}

/// 지정 문자 오름차순, 면적 단조 증가.
pub const DESIGNATION_TABLE: &[StandardOrifice] = &[
    StandardOrifice::new('D', 0.110),
    StandardOrifice::new('E', 0.196),
    StandardOrifice::new('F', 0.307),
    StandardOrifice::new('G', 0.503),
    StandardOrifice::new('H', 0.785),
    StandardOrifice::new('J', 1.287),
    StandardOrifice::new('K', 1.838),
    StandardOrifice::new('L', 2.853),
    StandardOrifice::new('M', 3.60),
    StandardOrifice::new('N', 4.34),
    StandardOrifice::new('P', 6.38),
    StandardOrifice::new('Q', 11.05),
    StandardOrifice::new('R', 16.00),
    StandardOrifice::new('T', 26.00),
];

/// 선택 결과. 테이블 최대 면적으로도 부족하면 `Oversize`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Designation {
    Standard(StandardOrifice),
    Oversize,
}

impl Designation {
    pub fn code(&self) -> Option<char> {
        match self {
            Designation::Standard(o) => Some(o.code),
            Designation::Oversize => None,
        }
    }

    /// 선택된 표준 면적[in²]. oversize이면 0.
    pub fn area_in2(&self) -> f64 {
        match self {
            Designation::Standard(o) => o.area_in2,
            Designation::Oversize => 0.0,
        }
    }

    /// 선택된 표준 면적[mm²]. oversize이면 0.
    pub fn area_mm2(&self) -> f64 {
        match self {
            Designation::Standard(o) => o.area_mm2(),
            Designation::Oversize => 0.0,
        }
    }

    pub fn is_oversize(&self) -> bool {
        matches!(self, Designation::Oversize)
    }
}

/// 요구 면적[in²] 이상인 가장 작은 표준 오리피스를 선택한다.
/// 같은 면적이면 그 항목을 선택한다.
pub fn select_designation(required_area_in2: f64) -> Designation {
    match DESIGNATION_TABLE
        .iter()
        .find(|o| o.area_in2 >= required_area_in2)
    {
        Some(o) => Designation::Standard(*o),
        None => {
            warn!(required_area_in2, "required area exceeds largest standard orifice");
            Designation::Oversize
        }
    }
}

/// 지정 문자로 테이블 항목을 찾는다. 대소문자는 구분하지 않는다.
pub fn find_designation(code: char) -> Option<&'static StandardOrifice> {
    DESIGNATION_TABLE
        .iter()
        .find(|o| o.code.eq_ignore_ascii_case(&code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_increasing() {
        for pair in DESIGNATION_TABLE.windows(2) {
            assert!(pair[0].area_in2 < pair[1].area_in2);
            assert!(pair[0].code < pair[1].code);
        }
    }

    #[test]
    fn exact_match_selects_entry() {
        assert_eq!(select_designation(3.60).code(), Some('M'));
        assert_eq!(select_designation(3.600_001).code(), Some('N'));
    }

    #[test]
    fn tiny_area_selects_smallest() {
        assert_eq!(select_designation(0.0).code(), Some('D'));
        assert_eq!(select_designation(0.05).code(), Some('D'));
    }

    #[test]
    fn oversize_has_no_code_and_zero_area() {
        let d = select_designation(30.0);
        assert!(d.is_oversize());
        assert_eq!(d.code(), None);
        assert_eq!(d.area_in2(), 0.0);
        assert_eq!(d.area_mm2(), 0.0);
        assert_eq!(select_designation(26.0).code(), Some('T'));
    }

    #[test]
    fn lookup_by_code() {
        assert_eq!(find_designation('m').map(|o| o.area_in2), Some(3.60));
        assert!(find_designation('I').is_none());
    }
}
