//! 사이징 계산 오류 정의.

use thiserror::Error;

pub type ReliefResult<T> = Result<T, SizingError>;

/// 릴리프 밸브 사이징 중 발생 가능한 오류.
///
/// 오리피스가 표준 최대 크기를 넘는 경우(oversize)는 오류가 아니라
/// [`Designation::Oversize`](super::designation::Designation::Oversize) 결과로 반환한다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    /// 계산 전에 확인되는 입력 조건 위반
    #[error("precondition violated: {what} ({detail})")]
    Precondition { what: &'static str, detail: String },

    /// 사이징 식 내부의 정의되지 않는 연산 (0 나눗셈, 비유한 값 등)
    #[error("domain error in {what}: {detail}")]
    Domain { what: &'static str, detail: String },
}

impl SizingError {
    pub(crate) fn precondition(what: &'static str, detail: impl Into<String>) -> Self {
        SizingError::Precondition {
            what,
            detail: detail.into(),
        }
    }

    pub(crate) fn domain(what: &'static str, detail: impl Into<String>) -> Self {
        SizingError::Domain {
            what,
            detail: detail.into(),
        }
    }

    /// 오류가 가리키는 물리량 이름.
    pub fn quantity(&self) -> &'static str {
        match self {
            SizingError::Precondition { what, .. } | SizingError::Domain { what, .. } => what,
        }
    }
}

/// 계산 결과가 유한한 값인지 확인한다. NaN/무한대는 Domain 오류로 바꾼다.
pub(crate) fn check_finite(value: f64, what: &'static str) -> ReliefResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SizingError::domain(what, format!("non-finite result {value}")))
    }
}

/// 입력 값이 유한하고 0보다 큰지 확인한다.
pub(crate) fn require_positive(value: f64, what: &'static str) -> ReliefResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SizingError::precondition(
            what,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_quantity() {
        let err = SizingError::domain("heat of vaporization", "zero divisor");
        assert!(err.to_string().contains("heat of vaporization"));
        assert_eq!(err.quantity(), "heat of vaporization");
    }

    #[test]
    fn non_finite_is_domain_error() {
        let err = check_finite(f64::NAN, "orifice area").unwrap_err();
        assert!(matches!(err, SizingError::Domain { what: "orifice area", .. }));
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(require_positive(0.0, "temperature").is_err());
        assert!(require_positive(f64::INFINITY, "temperature").is_err());
        assert_eq!(require_positive(2.5, "temperature"), Ok(2.5));
    }
}
