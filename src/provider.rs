//! 계산 엔진과 입출력 사이의 경계.
//!
//! 공정 데이터는 [`ProcessDataProvider`]가 공급하고 결과는 [`ResultSink`]가 소비한다.
//! 엔진은 어떤 획득/표시 방식에도 묶이지 않는다.

use crate::app::AppError;
use crate::relief::{ProcessInput, SizingResult};

/// 사이징 1회에 필요한 공정 입력을 공급한다.
pub trait ProcessDataProvider {
    fn process_input(&mut self) -> Result<ProcessInput, AppError>;
}

/// 사이징 결과를 받아 사용자나 다른 시스템에 전달한다.
pub trait ResultSink {
    fn publish(&mut self, input: &ProcessInput, result: &SizingResult) -> Result<(), AppError>;
}

/// 이미 준비된 입력을 그대로 돌려주는 제공자. 다른 프로그램에 내장할 때 사용한다.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    input: ProcessInput,
}

impl StaticProvider {
    pub fn new(input: ProcessInput) -> Self {
        Self { input }
    }
}

impl ProcessDataProvider for StaticProvider {
    fn process_input(&mut self) -> Result<ProcessInput, AppError> {
        Ok(self.input.clone())
    }
}
