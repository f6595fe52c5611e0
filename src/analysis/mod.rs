//! 삼상 계산 결과에 대한 분석(불평형, 효율, 전력 품질).

pub mod efficiency;
pub mod imbalance;
pub mod quality;

pub use efficiency::*;
pub use imbalance::*;
pub use quality::*;
