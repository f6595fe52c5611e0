//! 단상/삼상 회로 계산 모듈 모음. 모든 함수는 상태가 없는 순수 함수다.

pub mod ac;
pub mod capacitor;
pub mod dc;
pub mod three_phase;
pub mod validation;

pub use ac::*;
pub use capacitor::*;
pub use dc::*;
pub use three_phase::*;
pub use validation::*;
