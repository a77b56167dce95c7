// Statistics engine: team offensive aggregation and pitcher risk scoring.

pub mod batting;
pub mod risk;
