//! Line chart of a stock's closing prices.

use crate::traits::ChartRenderer;
use crate::utils::{
    encode_png, padded_bounds, parse_color, trend_color_hex, BACKGROUND_COLOR,
    EXTENDED_HOURS_COLOR,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::{Tz, US::Eastern};
use omni_common::{
    ChartPeriod, OmniError, PriceHistory, PricePoint, Result, StockSnapshot, TradingSession,
};
use omni_config::ChartConfig;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, instrument};

const FONT_FAMILY: &str = "sans-serif";

/// Hour (US/Eastern) the intraday axis runs to, covering after-hours trading.
const INTRADAY_AXIS_END_HOUR: u32 = 20;

/// Renders [`StockSnapshot`]s into PNG price charts.
#[derive(Debug, Clone, Copy)]
pub struct StockChartRenderer {
    width: u32,
    height: u32,
}

impl StockChartRenderer {
    /// Create a renderer producing images of the configured size.
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// Draw `snapshot` synchronously and return the PNG bytes.
    pub fn render_png(&self, snapshot: &StockSnapshot) -> Result<Vec<u8>> {
        let history = &snapshot.history;
        let period = snapshot.period;
        let intraday = period == ChartPeriod::OneDay;

        let (x_start, x_end) = x_bounds(history, period)
            .ok_or_else(|| OmniError::chart("No price data to chart"))?;
        let previous_close = if intraday {
            history.previous_close
        } else {
            None
        };
        let (y_low, y_high) = padded_bounds(history, previous_close)
            .ok_or_else(|| OmniError::chart("No price data to chart"))?;

        let background = parse_color(BACKGROUND_COLOR)?;
        let trend = parse_color(trend_color_hex(history))?;
        let extended = parse_color(EXTENDED_HOURS_COLOR)?;

        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            root.fill(&background)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(
                    chart_title(snapshot),
                    (FONT_FAMILY, 28).into_font().color(&WHITE),
                )
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(80)
                .build_cartesian_2d(x_start..x_end, y_low..y_high)?;

            let x_formatter = |ts: &i64| axis_time_label(*ts, period);
            let y_formatter = |price: &f64| format!("${price:.2}");
            chart
                .configure_mesh()
                .bold_line_style(WHITE.mix(0.1))
                .light_line_style(TRANSPARENT)
                .axis_style(WHITE.mix(0.5))
                .label_style((FONT_FAMILY, 14).into_font().color(&WHITE))
                .axis_desc_style((FONT_FAMILY, 16).into_font().color(&WHITE))
                .x_labels(8)
                .y_labels(8)
                .x_label_formatter(&x_formatter)
                .y_label_formatter(&y_formatter)
                .x_desc(axis_caption(history, period))
                .y_desc("Price (USD)")
                .draw()?;

            for (session, points) in session_runs(&history.points) {
                let is_extended = intraday && session != TradingSession::Regular;
                let (color, fill_alpha, width) = if is_extended {
                    (extended, 0.2, 2)
                } else {
                    (trend, 0.3, 3)
                };

                chart.draw_series(AreaSeries::new(
                    points.iter().copied(),
                    y_low,
                    color.mix(fill_alpha),
                ))?;
                chart.draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(width),
                ))?;
            }

            if let Some(close) = previous_close {
                chart.draw_series(DashedLineSeries::new(
                    [(x_start, close), (x_end, close)],
                    8,
                    6,
                    WHITE.mix(0.7).stroke_width(1),
                ))?;
                chart.draw_series(std::iter::once(Text::new(
                    format!("Prev Close: ${close:.2}"),
                    (x_end, close),
                    (FONT_FAMILY, 14)
                        .into_font()
                        .color(&WHITE)
                        .pos(Pos::new(HPos::Right, VPos::Bottom)),
                )))?;
            }

            if let Some(last) = history.points.last() {
                let point = (last.timestamp.timestamp(), last.close);
                let color = if intraday && last.session != TradingSession::Regular {
                    extended
                } else {
                    trend
                };
                chart.draw_series(std::iter::once(Circle::new(point, 5, color.filled())))?;
                chart.draw_series(std::iter::once(Text::new(
                    current_price_label(snapshot),
                    point,
                    (FONT_FAMILY, 16)
                        .into_font()
                        .color(&WHITE)
                        .pos(Pos::new(HPos::Left, VPos::Bottom)),
                )))?;
            }

            root.present()?;
        }

        debug!(
            ticker = %snapshot.ticker,
            points = history.points.len(),
            "Rendered stock chart"
        );
        encode_png(buffer, self.width, self.height)
    }
}

#[async_trait]
impl ChartRenderer for StockChartRenderer {
    #[instrument(skip(self, snapshot), fields(ticker = %snapshot.ticker, period = %snapshot.period))]
    async fn render(&self, snapshot: &StockSnapshot) -> Result<Vec<u8>> {
        let renderer = *self;
        let snapshot = snapshot.clone();

        tokio::task::spawn_blocking(move || renderer.render_png(&snapshot))
            .await
            .map_err(|e| OmniError::chart_with_source("Chart rendering task failed", e))?
    }

    fn name(&self) -> &'static str {
        "stock_price"
    }
}

/// `AAPL Stock Price - 1D`
pub fn chart_title(snapshot: &StockSnapshot) -> String {
    format!(
        "{} Stock Price - {}",
        snapshot.ticker,
        snapshot.period.code().to_uppercase()
    )
}

/// Label drawn next to the last price point.
pub fn current_price_label(snapshot: &StockSnapshot) -> String {
    let Some(last) = snapshot.history.points.last() else {
        return format!("${:.2}", snapshot.quote.current_price);
    };

    let prefix = match (snapshot.period, last.session) {
        (ChartPeriod::OneDay, TradingSession::Pre) => "Premarket: ",
        (ChartPeriod::OneDay, TradingSession::Post) => "After hours: ",
        _ => "",
    };
    format!("{prefix}${:.2}", last.close)
}

/// Horizontal axis range in Unix seconds.
///
/// Intraday charts run to 20:00 US/Eastern on the last bar's trading day so
/// that the after-hours session has room even before it starts.
pub fn x_bounds(history: &PriceHistory, period: ChartPeriod) -> Option<(i64, i64)> {
    let first = history.points.first()?.timestamp.timestamp();
    let last = history.points.last()?.timestamp;

    let mut end = last.timestamp();
    if period == ChartPeriod::OneDay {
        if let Some(close) = eastern_evening(last) {
            end = end.max(close);
        }
    }

    Some((first, end.max(first + 1)))
}

fn eastern_evening(at: DateTime<Utc>) -> Option<i64> {
    let local = at.with_timezone(&Eastern);
    let evening = local
        .date_naive()
        .and_hms_opt(INTRADAY_AXIS_END_HOUR, 0, 0)?;
    Eastern
        .from_local_datetime(&evening)
        .single()
        .map(|dt| dt.timestamp())
}

fn to_eastern(ts: i64) -> Option<DateTime<Tz>> {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.with_timezone(&Eastern))
}

fn axis_time_label(ts: i64, period: ChartPeriod) -> String {
    let format = match period {
        ChartPeriod::OneDay => "%H:%M",
        ChartPeriod::FiveDays => "%a %H:%M",
        ChartPeriod::FiveYears => "%b %Y",
        _ => "%b %d",
    };
    to_eastern(ts)
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

fn axis_caption(history: &PriceHistory, period: ChartPeriod) -> String {
    match (period, history.points.last()) {
        (ChartPeriod::OneDay, Some(last)) => last
            .timestamp
            .with_timezone(&Eastern)
            .format("%b %d (ET)")
            .to_string(),
        _ => "Date".to_string(),
    }
}

/// Splits bars into consecutive runs of the same session.
///
/// Each run after the first starts with the previous run's last point so the
/// drawn line stays continuous across session boundaries.
fn session_runs(points: &[PricePoint]) -> Vec<(TradingSession, Vec<(i64, f64)>)> {
    let mut runs: Vec<(TradingSession, Vec<(i64, f64)>)> = Vec::new();

    for point in points {
        let coord = (point.timestamp.timestamp(), point.close);
        match runs.last_mut() {
            Some((session, coords)) if *session == point.session => coords.push(coord),
            Some((_, coords)) => {
                let joint = coords.last().copied();
                runs.push((point.session, joint.into_iter().chain([coord]).collect()));
            }
            None => runs.push((point.session, vec![coord])),
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use omni_common::test_utils::{mock_timestamp, stock_fixtures};

    fn bar(hour: u32, minute: u32, close: f64, session: TradingSession) -> PricePoint {
        PricePoint {
            timestamp: mock_timestamp(2026, 10, 16, hour, minute, 0),
            open: None,
            close,
            session,
        }
    }

    #[test]
    fn test_chart_title() {
        let snapshot = stock_fixtures::sample_snapshot("AAPL");
        assert_eq!(chart_title(&snapshot), "AAPL Stock Price - 1D");
    }

    #[test]
    fn test_current_price_label_prefixes() {
        let mut snapshot = stock_fixtures::sample_snapshot("AAPL");
        snapshot.history.points = vec![bar(14, 0, 181.25, TradingSession::Regular)];
        assert_eq!(current_price_label(&snapshot), "$181.25");

        snapshot.history.points = vec![bar(12, 0, 180.5, TradingSession::Pre)];
        assert_eq!(current_price_label(&snapshot), "Premarket: $180.50");

        snapshot.history.points = vec![bar(21, 0, 182.0, TradingSession::Post)];
        assert_eq!(current_price_label(&snapshot), "After hours: $182.00");

        snapshot.period = ChartPeriod::FiveDays;
        assert_eq!(current_price_label(&snapshot), "$182.00");
    }

    #[test]
    fn test_intraday_axis_runs_to_eight_pm_eastern() {
        let history = stock_fixtures::sample_history(10);
        let (start, end) = x_bounds(&history, ChartPeriod::OneDay).unwrap();

        assert_eq!(start, history.points[0].timestamp.timestamp());
        // 2026-10-16 is in daylight time, so 20:00 ET is 00:00 UTC next day.
        assert_eq!(end, mock_timestamp(2026, 10, 17, 0, 0, 0).timestamp());
    }

    #[test]
    fn test_longer_periods_end_at_last_bar() {
        let history = stock_fixtures::sample_history(10);
        let (_, end) = x_bounds(&history, ChartPeriod::OneMonth).unwrap();
        assert_eq!(end, history.points[9].timestamp.timestamp());

        assert!(x_bounds(&PriceHistory::default(), ChartPeriod::OneDay).is_none());
    }

    #[test]
    fn test_axis_time_label_uses_eastern_time() {
        let ts = mock_timestamp(2026, 10, 16, 13, 30, 0).timestamp();
        assert_eq!(axis_time_label(ts, ChartPeriod::OneDay), "09:30");
        assert_eq!(axis_time_label(ts, ChartPeriod::OneMonth), "Oct 16");
        assert_eq!(axis_time_label(ts, ChartPeriod::FiveYears), "Oct 2026");
    }

    #[test]
    fn test_session_runs_are_joined() {
        let points = vec![
            bar(12, 0, 1.0, TradingSession::Pre),
            bar(12, 5, 2.0, TradingSession::Pre),
            bar(13, 30, 3.0, TradingSession::Regular),
            bar(20, 5, 4.0, TradingSession::Post),
        ];

        let runs = session_runs(&points);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].0, TradingSession::Pre);
        assert_eq!(runs[0].1.len(), 2);
        assert_eq!(runs[1].1.len(), 2);
        assert_eq!(runs[1].1[0].1, 2.0);
        assert_eq!(runs[2].1[0].1, 3.0);

        assert!(session_runs(&[]).is_empty());
    }

    #[test]
    fn test_empty_history_is_a_chart_error() {
        let mut snapshot = stock_fixtures::sample_snapshot("AAPL");
        snapshot.history.points.clear();

        let renderer = StockChartRenderer::new(&ChartConfig::default());
        assert!(matches!(
            renderer.render_png(&snapshot),
            Err(OmniError::Chart { .. })
        ));
    }
}
