pub mod ohlc;
pub mod performer;
