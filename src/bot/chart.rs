/* Price chart rendering.
 * Draws a daily close series onto an in-memory canvas and encodes it as PNG.
 * Text (title, axis labels, ticks, legend) uses the configured chart font.
 */

use std::io::Cursor;

use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::{
    drawing::{
        draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut,
        draw_line_segment_mut, draw_text_mut, text_size,
    },
    rect::Rect,
};

use super::{
    constants::market::{BITCOIN_SYMBOL, CHART_HEIGHT, CHART_WIDTH, GOLD_SYMBOL},
    market::PricePoint,
};

const MARGIN_LEFT: f32 = 75.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 55.0;
const PRICE_TICKS: usize = 5;
const MAX_DATE_TICKS: usize = 6;
const MARKER_RADIUS: i32 = 3;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const FRAME: Rgb<u8> = Rgb([60, 60, 60]);
const TEXT: Rgb<u8> = Rgb([20, 20, 20]);
const ORANGE: Rgb<u8> = Rgb([255, 165, 0]);
const GOLD: Rgb<u8> = Rgb([255, 215, 0]);

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("no price data to plot")]
    EmptySeries,
    #[error("PNG encoding failed: {0}")]
    Encode(image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    MarkerLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bitcoin,
    Gold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub symbol: &'static str,
    // Name used in user-facing messages
    pub asset_name: &'static str,
    pub legend: &'static str,
    pub title: &'static str,
    pub color: Rgb<u8>,
    pub style: SeriesStyle,
}

impl ChartKind {
    pub fn spec(self) -> ChartSpec {
        match self {
            ChartKind::Bitcoin => ChartSpec {
                symbol: BITCOIN_SYMBOL,
                asset_name: "Bitcoin",
                legend: "BTC Price",
                title: "Bitcoin (BTC) Price Chart - Last Month",
                color: ORANGE,
                style: SeriesStyle::Line,
            },
            ChartKind::Gold => ChartSpec {
                symbol: GOLD_SYMBOL,
                asset_name: "gold",
                legend: "Gold Price",
                title: "Gold Price Trend (Last 1 Month)",
                color: GOLD,
                style: SeriesStyle::MarkerLine,
            },
        }
    }
}

// Maps series values onto canvas coordinates.
struct PlotArea {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    first_ts: i64,
    last_ts: i64,
    low: f64,
    high: f64,
}

impl PlotArea {
    fn new(points: &[PricePoint]) -> PlotArea {
        let (mut low, mut high) = points
            .iter()
            .fold((f64::MAX, f64::MIN), |(low, high), point| {
                (low.min(point.close), high.max(point.close))
            });

        let padding = if high > low {
            (high - low) * 0.05
        } else {
            (high.abs() * 0.01).max(1.0)
        };
        low -= padding;
        high += padding;

        PlotArea {
            left: MARGIN_LEFT,
            right: CHART_WIDTH as f32 - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: CHART_HEIGHT as f32 - MARGIN_BOTTOM,
            first_ts: points[0].timestamp.timestamp(),
            last_ts: points[points.len() - 1].timestamp.timestamp(),
            low,
            high,
        }
    }

    fn x(&self, point: &PricePoint) -> f32 {
        if self.last_ts == self.first_ts {
            return (self.left + self.right) / 2.0;
        }
        let offset = (point.timestamp.timestamp() - self.first_ts) as f32;
        let span = (self.last_ts - self.first_ts) as f32;
        self.left + offset / span * (self.right - self.left)
    }

    fn y(&self, price: f64) -> f32 {
        let ratio = ((price - self.low) / (self.high - self.low)) as f32;
        self.bottom - ratio * (self.bottom - self.top)
    }

    fn price_ticks(&self) -> Vec<f64> {
        let step = (self.high - self.low) / PRICE_TICKS as f64;
        (0..=PRICE_TICKS)
            .map(|i| self.low + step * i as f64)
            .collect()
    }
}

// Indices of the points that get a date tick, evenly spread and always including the first.
fn date_tick_indices(len: usize) -> Vec<usize> {
    let step = len.div_ceil(MAX_DATE_TICKS).max(1);
    (0..len).step_by(step).collect()
}

fn display_tick_price(price: f64, span: f64) -> String {
    if span < 10.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.0}", price)
    }
}

// Renders a close series to PNG bytes.
pub fn render_chart(
    spec: &ChartSpec,
    points: &[PricePoint],
    font: &FontVec,
) -> Result<Vec<u8>, ChartError> {
    if points.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let area = PlotArea::new(points);
    let mut canvas = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);

    // Gridlines
    let price_ticks = area.price_ticks();
    for price in &price_ticks {
        let y = area.y(*price);
        draw_line_segment_mut(&mut canvas, (area.left, y), (area.right, y), GRID);
    }
    let date_ticks = date_tick_indices(points.len());
    for index in &date_ticks {
        let x = area.x(&points[*index]);
        draw_line_segment_mut(&mut canvas, (x, area.top), (x, area.bottom), GRID);
    }

    draw_hollow_rect_mut(
        &mut canvas,
        Rect::at(area.left as i32, area.top as i32)
            .of_size((area.right - area.left) as u32, (area.bottom - area.top) as u32),
        FRAME,
    );

    // Series, two pixels thick
    let coords: Vec<(f32, f32)> = points
        .iter()
        .map(|point| (area.x(point), area.y(point.close)))
        .collect();
    for pair in coords.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        draw_line_segment_mut(&mut canvas, start, end, spec.color);
        draw_line_segment_mut(
            &mut canvas,
            (start.0, start.1 + 1.0),
            (end.0, end.1 + 1.0),
            spec.color,
        );
    }
    if spec.style == SeriesStyle::MarkerLine || coords.len() == 1 {
        for (x, y) in &coords {
            draw_filled_circle_mut(
                &mut canvas,
                (*x as i32, *y as i32),
                MARKER_RADIUS,
                spec.color,
            );
        }
    }

    draw_labels(
        &mut canvas,
        spec,
        points,
        &area,
        &price_ticks,
        &date_ticks,
        font,
    );

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(canvas)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(ChartError::Encode)?;

    Ok(buffer.into_inner())
}

fn draw_labels(
    canvas: &mut RgbImage,
    spec: &ChartSpec,
    points: &[PricePoint],
    area: &PlotArea,
    price_ticks: &[f64],
    date_ticks: &[usize],
    font: &FontVec,
) {
    let title_scale = PxScale::from(20.0);
    let label_scale = PxScale::from(15.0);
    let tick_scale = PxScale::from(12.0);

    let (title_width, _) = text_size(title_scale, font, spec.title);
    let title_x = (CHART_WIDTH as i32 - title_width as i32) / 2;
    draw_text_mut(canvas, TEXT, title_x.max(0), 10, title_scale, font, spec.title);

    let label_y = area.top as i32 - 20;
    draw_text_mut(canvas, TEXT, 8, label_y, label_scale, font, "Price (USD)");
    let (date_width, _) = text_size(label_scale, font, "Date");
    let date_x = ((area.left + area.right) / 2.0) as i32 - date_width as i32 / 2;
    let date_y = area.bottom as i32 + 30;
    draw_text_mut(canvas, TEXT, date_x, date_y, label_scale, font, "Date");

    let span = area.high - area.low;
    for price in price_ticks {
        let text = display_tick_price(*price, span);
        let (width, height) = text_size(tick_scale, font, &text);
        let x = area.left as i32 - width as i32 - 6;
        let y = area.y(*price) as i32 - height as i32 / 2;
        draw_text_mut(canvas, TEXT, x.max(0), y, tick_scale, font, &text);
    }

    for index in date_ticks {
        let text = points[*index].timestamp.format("%m-%d").to_string();
        let (width, _) = text_size(tick_scale, font, &text);
        let x = area.x(&points[*index]) as i32 - width as i32 / 2;
        let y = area.bottom as i32 + 8;
        draw_text_mut(canvas, TEXT, x, y, tick_scale, font, &text);
    }

    // Legend in the upper right corner of the plot
    let (legend_width, _) = text_size(label_scale, font, spec.legend);
    let box_width = legend_width + 48;
    let box_x = area.right as i32 - box_width as i32 - 8;
    let box_y = area.top as i32 + 8;
    let legend_rect = Rect::at(box_x, box_y).of_size(box_width, 26);
    draw_filled_rect_mut(canvas, legend_rect, BACKGROUND);
    draw_hollow_rect_mut(canvas, legend_rect, GRID);

    let sample_y = (box_y + 13) as f32;
    let sample_start = (box_x + 8) as f32;
    draw_line_segment_mut(
        canvas,
        (sample_start, sample_y),
        (sample_start + 24.0, sample_y),
        spec.color,
    );
    draw_line_segment_mut(
        canvas,
        (sample_start, sample_y + 1.0),
        (sample_start + 24.0, sample_y + 1.0),
        spec.color,
    );
    if spec.style == SeriesStyle::MarkerLine {
        draw_filled_circle_mut(
            canvas,
            (sample_start as i32 + 12, sample_y as i32),
            MARKER_RADIUS,
            spec.color,
        );
    }
    draw_text_mut(canvas, TEXT, box_x + 40, box_y + 5, label_scale, font, spec.legend);
}
