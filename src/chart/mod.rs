use crate::errors::Result;
use crate::models::ohlc::OhlcPoint;
use crossterm::style::Color;

pub mod term;

pub use term::TermChart;

/// 渲染表面抽象：一个可以接收K线序列并重绘的图表部件
///
/// Mirrors the widget operations the session drives: push data, fit the
/// visible range to it, resize, repaint. Creation and release are owned by
/// the session holding the surface.
pub trait ChartSurface {
    /// Replace the displayed series. Points must be ascending by time.
    fn set_data(&mut self, points: &[OhlcPoint]);

    /// Fit the visible time range to the extent of the current data.
    fn fit_content(&mut self);

    /// Match the surface to a new container size. Display only, no refetch.
    fn resize(&mut self, width: u16, height: u16);

    /// Repaint the surface.
    fn draw(&mut self) -> Result<()>;
}

/// 图表配色（深色主题，固定）
#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub background: Color,
    pub text: Color,
    pub grid: Color,
    pub bullish: Color,
    pub bearish: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::Rgb { r: 0x1a, g: 0x1e, b: 0x26 },
            text: Color::Rgb { r: 0xd1, g: 0xd4, b: 0xdc },
            grid: Color::Rgb { r: 0x2e, g: 0x33, b: 0x3e },
            bullish: Color::Rgb { r: 52, g: 208, b: 88 },
            bearish: Color::Rgb { r: 234, g: 74, b: 90 },
        }
    }
}
