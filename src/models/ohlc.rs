use chrono::NaiveDate;

/// 日K线数据结构
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcPoint {
    pub time: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcPoint {
    /// Bullish when the close is at or above the open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}
