use crate::api::StockBackend;
use crate::chart::ChartSurface;
use crate::errors::Result;
use crate::models::ohlc::OhlcPoint;
use crate::series::normalize_daily_series;
use log::{info, warn};

/// 渲染表面的生命周期状态
enum SurfaceState {
    /// No surface yet; nothing to draw on.
    Unmounted,
    /// Surface constructed once and alive; data and size may change.
    Ready(Box<dyn ChartSurface + Send>),
    /// Surface released. Terminal state.
    Destroyed,
}

/// 图表会话：一个表面从创建到销毁的完整生命周期
///
/// The surface is created exactly once at mount and released exactly once at
/// teardown; symbol changes only repaint it. All fetch failures are absorbed
/// here: the current error message replaces any previous one and the last
/// successfully painted series stays on screen.
pub struct ChartSession<B: StockBackend> {
    backend: B,
    surface: SurfaceState,
    symbol: String,
    error: Option<String>,
    fixed_height: u16,
    // 递增请求号，过期响应直接丢弃
    request_seq: u64,
}

impl<B: StockBackend> ChartSession<B> {
    pub fn new(backend: B, default_symbol: &str, fixed_height: u16) -> Self {
        Self {
            backend,
            surface: SurfaceState::Unmounted,
            symbol: default_symbol.to_uppercase(),
            error: None,
            fixed_height,
            request_seq: 0,
        }
    }

    /// 绑定表面并发出首次数据请求
    ///
    /// Only valid from Unmounted; mounting twice or mounting a destroyed
    /// session leaves the session untouched.
    pub async fn mount(&mut self, surface: Box<dyn ChartSurface + Send>) {
        if !matches!(self.surface, SurfaceState::Unmounted) {
            warn!("mount ignored: surface already created or destroyed");
            return;
        }

        self.surface = SurfaceState::Ready(surface);
        info!("chart session mounted for {}", self.symbol);
        let symbol = self.symbol.clone();
        self.request_fetch(&symbol).await;
    }

    /// 当前输入的代码，始终保存为大写
    pub fn set_symbol(&mut self, input: &str) {
        self.symbol = input.trim().to_uppercase();
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 当前错误信息（最多一条）
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.surface, SurfaceState::Destroyed)
    }

    /// 请求并绘制一个代码的日线数据
    ///
    /// Clears the previous error first. On success the surface receives the
    /// new series and auto-fits to it; on any failure the error slot is set
    /// and the previously painted data is left alone. A response whose
    /// request id is no longer the latest is discarded unapplied.
    pub async fn request_fetch(&mut self, ticker: &str) {
        if !matches!(self.surface, SurfaceState::Ready(_)) {
            warn!("fetch ignored: no live surface");
            return;
        }

        self.error = None;
        self.request_seq += 1;
        let token = self.request_seq;
        info!("fetching daily series for {}", ticker);

        let outcome = self.fetch_series(ticker).await;

        // 过期响应不落盘
        if token != self.request_seq {
            info!("discarding stale response for {}", ticker);
            return;
        }

        match outcome {
            Ok(points) => {
                if let SurfaceState::Ready(surface) = &mut self.surface {
                    surface.set_data(&points);
                    surface.fit_content();
                    if let Err(e) = surface.draw() {
                        warn!("failed to draw chart: {}", e);
                    }
                }
                info!("painted {} points for {}", points.len(), ticker);
            }
            Err(e) => {
                warn!("fetch failed for {}: {}", ticker, e);
                self.error = Some(e.to_string());
            }
        }
    }

    async fn fetch_series(&self, ticker: &str) -> Result<Vec<OhlcPoint>> {
        let payload = self.backend.fetch_daily(ticker).await?;
        normalize_daily_series(ticker, &payload)
    }

    /// 容器尺寸变化，只改表面大小，不重新拉数据
    pub fn on_resize(&mut self, width: u16) {
        if let SurfaceState::Ready(surface) = &mut self.surface {
            surface.resize(width, self.fixed_height);
            if let Err(e) = surface.draw() {
                warn!("failed to redraw after resize: {}", e);
            }
        }
    }

    /// 释放表面；从任何状态调用都安全，可重复调用
    pub fn teardown(&mut self) {
        match std::mem::replace(&mut self.surface, SurfaceState::Destroyed) {
            SurfaceState::Ready(surface) => {
                drop(surface);
                info!("chart session torn down");
            }
            // 未创建或已销毁：幂等空操作
            SurfaceState::Unmounted | SurfaceState::Destroyed => {}
        }
    }
}
