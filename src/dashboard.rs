use crate::models::performer::Performer;
use std::fmt::Write;

/// 把涨幅榜渲染成定宽文本表格
pub fn render_performers(performers: &[Performer]) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "{:<8} {:<20} {:>10} {:>12} {:>8} {:>8} {:>9}",
        "Ticker", "Company", "Price", "Market Cap", "P/S", "P/E", "% YTD"
    )
    .expect("write to string");
    writeln!(out, "{:-<80}", "").expect("write to string");

    for stock in performers {
        let ytd = if stock.ytd > 0.0 {
            format!("+{:.2}%", stock.ytd)
        } else {
            format!("{:.2}%", stock.ytd)
        };
        writeln!(
            out,
            "{:<8} {:<20} {:>10} {:>12} {:>8.2} {:>8} {:>9}",
            stock.ticker,
            stock.company,
            format!("${:.2}", stock.price),
            stock.market_cap,
            stock.ps,
            stock.pe.to_string(),
            ytd
        )
        .expect("write to string");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_rows_and_signs() {
        let json = r#"[
            {"ticker": "MRNA", "company": "Moderna", "price": 49.70, "market_cap": "19.5B", "ps": 10.03, "pe": "n/a", "ytd": 66.61},
            {"ticker": "XYZ", "company": "Example", "price": 10.00, "market_cap": "1.0B", "ps": 1.50, "pe": 12.00, "ytd": -3.25}
        ]"#;
        let performers: Vec<Performer> = serde_json::from_str(json).unwrap();

        let table = render_performers(&performers);

        assert!(table.contains("Ticker"));
        assert!(table.contains("MRNA"));
        assert!(table.contains("n/a"));
        assert!(table.contains("+66.61%"));
        assert!(table.contains("-3.25%"));
        assert!(table.contains("$49.70"));
        assert_eq!(table.lines().count(), 4);
    }
}
