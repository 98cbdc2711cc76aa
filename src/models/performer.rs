use serde::Deserialize;
use std::fmt;

/// 标普500涨幅榜单条记录
#[derive(Debug, Clone, Deserialize)]
pub struct Performer {
    pub ticker: String,
    pub company: String,
    pub price: f64,
    pub market_cap: String,
    pub ps: f64,
    pub pe: PeRatio,
    pub ytd: f64,
}

/// P/E comes back as a number, or as "n/a" for loss-making companies.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PeRatio {
    Value(f64),
    NotAvailable(String),
}

impl fmt::Display for PeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeRatio::Value(v) => write!(f, "{:.2}", v),
            PeRatio::NotAvailable(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_numeric_and_missing_pe() {
        let json = r#"[
            {"ticker": "GNRC", "company": "Generac", "price": 227.47, "market_cap": "13.4B", "ps": 3.18, "pe": 43.28, "ytd": 64.86},
            {"ticker": "MRNA", "company": "Moderna", "price": 49.70, "market_cap": "19.5B", "ps": 10.03, "pe": "n/a", "ytd": 66.61}
        ]"#;
        let performers: Vec<Performer> = serde_json::from_str(json).unwrap();

        assert_eq!(performers.len(), 2);
        assert!(matches!(performers[0].pe, PeRatio::Value(v) if (v - 43.28).abs() < 1e-9));
        assert_eq!(performers[0].pe.to_string(), "43.28");
        assert!(matches!(performers[1].pe, PeRatio::NotAvailable(ref s) if s == "n/a"));
        assert_eq!(performers[1].pe.to_string(), "n/a");
    }
}
