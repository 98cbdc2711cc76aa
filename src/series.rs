use crate::errors::{Result, TrackerError};
use crate::models::ohlc::OhlcPoint;
use chrono::NaiveDate;
use log::debug;
use serde_json::Value;

/// 日线数据在返回包中的容器键名
const SERIES_KEY: &str = "Time Series (Daily)";

const FIELD_OPEN: &str = "1. open";
const FIELD_HIGH: &str = "2. high";
const FIELD_LOW: &str = "3. low";
const FIELD_CLOSE: &str = "4. close";

/// Fallback message when the payload carries neither a series nor a note.
const INVALID_FORMAT_MSG: &str =
    "Invalid data format from API. Check the symbol or API key limit.";

/// 把原始日线JSON包规整为按日期升序排列的K线序列
///
/// A missing series container is a query failure, not an empty series: the
/// upstream provider replaces the data with a "Note" when rate-limited, and
/// that text is surfaced verbatim. A present-but-empty container is a valid
/// empty series.
///
/// Numeric fields are parsed fail-fast: the first unparseable, non-finite
/// or negative price fails the whole payload rather than admitting a bad
/// point into the chart.
pub fn normalize_daily_series(symbol: &str, payload: &Value) -> Result<Vec<OhlcPoint>> {
    let series = match payload.get(SERIES_KEY).and_then(|s| s.as_object()) {
        Some(series) => series,
        None => {
            let message = payload
                .get("Note")
                .and_then(|n| n.as_str())
                .map(|n| n.to_string())
                .unwrap_or_else(|| INVALID_FORMAT_MSG.to_string());
            return Err(TrackerError::ApiError(message));
        }
    };

    let mut points = Vec::with_capacity(series.len());

    for (date_str, fields) in series {
        let time = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            TrackerError::DataError(format!("malformed data for {}: invalid date key", date_str))
        })?;

        points.push(OhlcPoint {
            time,
            open: parse_price(fields, FIELD_OPEN, date_str)?,
            high: parse_price(fields, FIELD_HIGH, date_str)?,
            low: parse_price(fields, FIELD_LOW, date_str)?,
            close: parse_price(fields, FIELD_CLOSE, date_str)?,
        });
    }

    // 按日期升序排序（图表要求时间严格递增）
    points.sort_by(|a, b| a.time.cmp(&b.time));

    debug!("normalized {} points for {}", points.len(), symbol);
    Ok(points)
}

fn parse_price(fields: &Value, field: &str, date_str: &str) -> Result<f64> {
    let raw = fields.get(field).and_then(|v| v.as_str()).ok_or_else(|| {
        TrackerError::DataError(format!("malformed data for {}: missing \"{}\"", date_str, field))
    })?;

    let value = raw.parse::<f64>().map_err(|_| {
        TrackerError::DataError(format!(
            "malformed data for {}: \"{}\" is not a number ({})",
            date_str, field, raw
        ))
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(TrackerError::DataError(format!(
            "malformed data for {}: \"{}\" is out of range ({})",
            date_str, field, raw
        )));
    }

    Ok(value)
}
