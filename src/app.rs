use thiserror::Error;
use tracing::debug;

use crate::config::ConfigError;
use crate::input_file::InputFileError;
use crate::provider::{ProcessDataProvider, ResultSink};
use crate::relief::{size_relief_valve, SizingConfig, SizingError, SizingResult};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 공정 입력 파일 오류
    #[error(transparent)]
    InputFile(#[from] InputFileError),
    /// 사이징 계산 오류
    #[error(transparent)]
    Sizing(#[from] SizingError),
    /// JSON 출력 오류
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
    /// 대화형 입력 도중 입력 스트림이 닫힘
    #[error("input closed before all values were entered")]
    InputClosed,
    /// 표준 테이블에 없는 지정 문자
    #[error("unknown orifice designation '{0}'")]
    UnknownDesignation(char),
}

/// 제공자에서 입력을 받아 사이징하고 결과를 싱크로 보낸다.
///
/// 재시도 없이 단 한 번 실행하며 어느 단계의 오류든 그대로 반환한다.
pub fn run(
    provider: &mut dyn ProcessDataProvider,
    sink: &mut dyn ResultSink,
    sizing: &SizingConfig,
) -> Result<SizingResult, AppError> {
    let input = provider.process_input()?;
    debug!(?input, "process input acquired");
    let result = size_relief_valve(&input, sizing)?;
    sink.publish(&input, &result)?;
    Ok(result)
}
