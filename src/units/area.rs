//! 오리피스 면적 환산. 내부 기준은 mm²이다.

/// mm² → in² 환산 계수. 곱하면 in², 나누면 mm²가 된다.
pub const IN2_PER_MM2: f64 = 0.00155;

/// 오리피스 면적(mm²)을 in²로 변환한다.
pub fn mm2_to_in2(value_mm2: f64) -> f64 {
    value_mm2 * IN2_PER_MM2
}

/// 오리피스 면적(in²)을 mm²로 변환한다.
pub fn in2_to_mm2(value_in2: f64) -> f64 {
    value_in2 / IN2_PER_MM2
}
