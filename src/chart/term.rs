use crate::chart::{ChartSurface, ChartTheme};
use crate::errors::Result;
use crate::models::ohlc::OhlcPoint;
use crossterm::style::Stylize;
use log::debug;
use std::io::{self, Write};

// K线字符，参考cli-candlestick-chart的画法
const UNICODE_VOID: char = ' ';
const UNICODE_BODY: char = '┃';
const UNICODE_HALF_BODY_BOTTOM: char = '╻';
const UNICODE_HALF_BODY_TOP: char = '╹';
const UNICODE_WICK: char = '│';
const UNICODE_TOP: char = '╽';
const UNICODE_BOTTOM: char = '╿';
const UNICODE_UPPER_WICK: char = '╷';
const UNICODE_LOWER_WICK: char = '╵';

/// 价格轴宽度："{:>8.2} │ "
const Y_AXIS_WIDTH: u16 = 11;

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: char,
    bullish: Option<bool>,
}

const VOID_CELL: Cell = Cell { glyph: UNICODE_VOID, bullish: None };

/// 终端K线图表面
///
/// Holds the full series and a view window over its tail; `fit_content`
/// widens the window to the whole series, drawing clamps it to whatever
/// fits the current width.
pub struct TermChart {
    width: u16,
    height: u16,
    theme: ChartTheme,
    data: Vec<OhlcPoint>,
    view_len: usize,
}

impl TermChart {
    pub fn new(width: u16, height: u16, theme: ChartTheme) -> Self {
        Self {
            width,
            height,
            theme,
            data: Vec::new(),
            view_len: 0,
        }
    }

    fn chart_width(&self) -> usize {
        self.width.saturating_sub(Y_AXIS_WIDTH).max(1) as usize
    }

    /// 当前可见的K线（视窗内、且放得下的尾部N根）
    fn visible(&self) -> &[OhlcPoint] {
        let n = self.view_len.min(self.data.len()).min(self.chart_width());
        &self.data[self.data.len() - n..]
    }

    /// 价格上下界，留2%边距
    fn price_bounds(points: &[OhlcPoint]) -> (f64, f64) {
        let max_price = points.iter().fold(f64::NEG_INFINITY, |m, p| m.max(p.high));
        let min_price = points.iter().fold(f64::INFINITY, |m, p| m.min(p.low));
        let margin = (max_price - min_price) * 0.02;
        ((min_price - margin).max(0.0), max_price + margin)
    }

    fn price_to_height(&self, price: f64, min_price: f64, max_price: f64) -> f64 {
        if max_price == min_price {
            return self.height as f64 / 2.0;
        }
        (price - min_price) / (max_price - min_price) * self.height as f64
    }

    /// 某一行高度上该画哪个字符（上影线/实体/下影线三段逻辑）
    fn candle_glyph(&self, candle: &OhlcPoint, y: u16, min_price: f64, max_price: f64) -> char {
        let height_unit = y as f64;
        let high_y = self.price_to_height(candle.high, min_price, max_price);
        let low_y = self.price_to_height(candle.low, min_price, max_price);
        let max_y = self.price_to_height(candle.open.max(candle.close), min_price, max_price);
        let min_y = self.price_to_height(candle.open.min(candle.close), min_price, max_price);

        if high_y.ceil() >= height_unit && height_unit >= max_y.floor() {
            // 上影线区域
            if max_y - height_unit > 0.75 {
                UNICODE_BODY
            } else if max_y - height_unit > 0.25 {
                if high_y - height_unit > 0.75 {
                    UNICODE_TOP
                } else {
                    UNICODE_HALF_BODY_BOTTOM
                }
            } else if high_y - height_unit > 0.75 {
                UNICODE_WICK
            } else if high_y - height_unit > 0.25 {
                UNICODE_UPPER_WICK
            } else {
                UNICODE_VOID
            }
        } else if max_y.floor() >= height_unit && height_unit >= min_y.ceil() {
            // 实体区域
            UNICODE_BODY
        } else if min_y.ceil() >= height_unit && height_unit >= low_y.floor() {
            // 下影线区域
            if min_y - height_unit < 0.25 {
                UNICODE_BODY
            } else if min_y - height_unit < 0.75 {
                if low_y - height_unit < 0.25 {
                    UNICODE_BOTTOM
                } else {
                    UNICODE_HALF_BODY_TOP
                }
            } else if low_y - height_unit < 0.25 {
                UNICODE_WICK
            } else if low_y - height_unit < 0.75 {
                UNICODE_LOWER_WICK
            } else {
                UNICODE_VOID
            }
        } else {
            UNICODE_VOID
        }
    }

    /// 图表主体（自上而下的行），不含坐标轴
    fn rows(&self) -> Vec<Vec<Cell>> {
        let visible = self.visible();
        if visible.is_empty() {
            return Vec::new();
        }

        let chart_width = self.chart_width();
        let (min_price, max_price) = Self::price_bounds(visible);
        // 均匀铺满整个宽度，位置按索引计算避免漂移
        let spacing = chart_width as f64 / visible.len() as f64;

        let mut rows = Vec::with_capacity(self.height as usize);
        for y in (1..=self.height).rev() {
            let mut cells = vec![VOID_CELL; chart_width];
            for (i, candle) in visible.iter().enumerate() {
                let column = ((i as f64 * spacing).round() as usize).min(chart_width - 1);
                let glyph = self.candle_glyph(candle, y, min_price, max_price);
                cells[column] = Cell {
                    glyph,
                    bullish: Some(candle.is_bullish()),
                };
            }
            rows.push(cells);
        }
        rows
    }

    fn y_axis_label(&self, y: u16, min_price: f64, max_price: f64) -> String {
        // 每4行标一个价格
        if y % 4 == 0 {
            let price = min_price + y as f64 * (max_price - min_price) / self.height as f64;
            format!("{:>8.2} │ ", price)
        } else {
            format!("{:>8} │ ", "")
        }
    }

    fn x_axis_line(&self) -> String {
        let visible = self.visible();
        let span = match (visible.first(), visible.last()) {
            (Some(first), Some(last)) => format!("{}  ..  {}", first.time, last.time),
            _ => String::new(),
        };
        format!("{:>8}   {:<width$}", "", span, width = self.chart_width())
    }

    /// 纯文本布局（无颜色），测试用，也是draw的真实几何
    pub fn layout_lines(&self) -> Vec<String> {
        let rows = self.rows();
        if rows.is_empty() {
            return Vec::new();
        }

        let (min_price, max_price) = Self::price_bounds(self.visible());
        let mut lines = Vec::with_capacity(rows.len() + 1);
        for (i, cells) in rows.iter().enumerate() {
            let y = self.height - i as u16;
            let mut line = self.y_axis_label(y, min_price, max_price);
            line.extend(cells.iter().map(|c| c.glyph));
            lines.push(line);
        }
        lines.push(self.x_axis_line());
        lines
    }
}

impl ChartSurface for TermChart {
    fn set_data(&mut self, points: &[OhlcPoint]) {
        self.data = points.to_vec();
        self.view_len = self.view_len.min(self.data.len());
    }

    fn fit_content(&mut self) {
        self.view_len = self.data.len();
    }

    fn resize(&mut self, width: u16, height: u16) {
        debug!("chart resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    fn draw(&mut self) -> Result<()> {
        let mut out = io::stdout().lock();
        let rows = self.rows();

        if rows.is_empty() {
            writeln!(out, "{}", "(no data)".with(self.theme.grid))?;
            return Ok(());
        }

        let visible_len = self.visible().len();
        let (min_price, max_price) = Self::price_bounds(self.visible());

        for (i, cells) in rows.iter().enumerate() {
            let y = self.height - i as u16;
            let label = self.y_axis_label(y, min_price, max_price);
            write!(out, "{}", label.with(self.theme.grid).on(self.theme.background))?;
            for cell in cells {
                let color = match cell.bullish {
                    Some(true) => self.theme.bullish,
                    Some(false) => self.theme.bearish,
                    None => self.theme.text,
                };
                write!(
                    out,
                    "{}",
                    cell.glyph.to_string().with(color).on(self.theme.background)
                )?;
            }
            writeln!(out)?;
        }
        writeln!(
            out,
            "{}",
            self.x_axis_line().with(self.theme.text).on(self.theme.background)
        )?;
        out.flush()?;

        debug!("drew {} candles", visible_len);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(date: &str, open: f64, high: f64, low: f64, close: f64) -> OhlcPoint {
        OhlcPoint {
            time: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open,
            high,
            low,
            close,
        }
    }

    fn sample() -> Vec<OhlcPoint> {
        vec![
            point("2024-01-01", 10.0, 15.0, 9.0, 14.0),
            point("2024-01-02", 14.0, 16.0, 11.0, 12.0),
            point("2024-01-03", 12.0, 13.5, 10.0, 13.0),
        ]
    }

    #[test]
    fn layout_is_empty_until_fit_content() {
        let mut chart = TermChart::new(40, 8, ChartTheme::default());
        chart.set_data(&sample());

        // Data is staged but the view window is still zero-width.
        assert!(chart.layout_lines().is_empty());

        chart.fit_content();
        assert!(!chart.layout_lines().is_empty());
    }

    #[test]
    fn layout_geometry_matches_size() {
        let mut chart = TermChart::new(40, 8, ChartTheme::default());
        chart.set_data(&sample());
        chart.fit_content();

        let lines = chart.layout_lines();
        // chart rows + one x-axis line
        assert_eq!(lines.len(), 9);
        for line in &lines {
            assert_eq!(line.chars().count(), 40, "bad width in {:?}", line);
        }
    }

    #[test]
    fn candle_bodies_are_drawn() {
        let mut chart = TermChart::new(40, 8, ChartTheme::default());
        chart.set_data(&sample());
        chart.fit_content();

        let joined = chart.layout_lines().join("\n");
        assert!(joined.contains(UNICODE_BODY));
    }

    #[test]
    fn x_axis_shows_visible_date_range() {
        let mut chart = TermChart::new(40, 8, ChartTheme::default());
        chart.set_data(&sample());
        chart.fit_content();

        let lines = chart.layout_lines();
        let x_axis = lines.last().unwrap();
        assert!(x_axis.contains("2024-01-01"));
        assert!(x_axis.contains("2024-01-03"));
    }

    #[test]
    fn resize_changes_layout_width() {
        let mut chart = TermChart::new(40, 8, ChartTheme::default());
        chart.set_data(&sample());
        chart.fit_content();

        chart.resize(60, 8);
        for line in chart.layout_lines() {
            assert_eq!(line.chars().count(), 60);
        }
    }

    #[test]
    fn view_clamps_to_width_keeping_the_tail() {
        // 12 columns of chart area, 20 candles: only the newest 12 fit.
        let mut points = Vec::new();
        for day in 1..=20 {
            let base = day as f64;
            points.push(point(
                &format!("2024-03-{:02}", day),
                base,
                base + 1.0,
                base - 1.0,
                base + 0.5,
            ));
        }
        let mut chart = TermChart::new(Y_AXIS_WIDTH + 12, 8, ChartTheme::default());
        chart.set_data(&points);
        chart.fit_content();

        let x_axis_line = chart.layout_lines().pop().unwrap();
        assert!(x_axis_line.contains("2024-03-09"));
        assert!(x_axis_line.contains("2024-03-20"));
    }

    #[test]
    fn empty_series_is_displayable() {
        let mut chart = TermChart::new(40, 8, ChartTheme::default());
        chart.set_data(&[]);
        chart.fit_content();

        assert!(chart.layout_lines().is_empty());
        assert!(chart.draw().is_ok());
    }
}
