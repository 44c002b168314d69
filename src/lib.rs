//! 기체(증기) 압력 릴리프 밸브 예비 사이징 도구.
//!
//! 핵심 계산은 [`relief`]에 순수 함수로 두고, 입력 획득(파일/대화형)과 출력(표/JSON)은
//! [`provider`] 경계를 통해 분리한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod input_file;
pub mod provider;
pub mod relief;
pub mod report;
pub mod ui_cli;
pub mod units;
