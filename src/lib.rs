//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 엔진을 쓰도록 한다.

pub mod analysis;
pub mod app;
pub mod charts;
pub mod circuits;
pub mod config;
pub mod history;
pub mod i18n;
pub mod quantity;
pub mod reports;
pub mod ui_cli;
