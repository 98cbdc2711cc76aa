// 公开导出的模块，供外部使用
pub mod chart;
pub mod errors;
pub mod models;
pub mod series;
pub mod session;

// 为了支持主程序，暂时保持这些模块公开
// 但在库使用场景中，这些应该是内部模块
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod dashboard;

// 重新导出常用类型，方便使用
pub use chart::{ChartSurface, ChartTheme, TermChart};
pub use errors::{Result, TrackerError};
pub use models::ohlc::OhlcPoint;
pub use models::performer::Performer;
pub use session::ChartSession;
