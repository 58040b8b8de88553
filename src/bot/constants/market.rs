// CoinGecko simple price endpoint
pub const COINGECKO_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd";
pub const PRICE_TIMEOUT_SECS: u64 = 5;

// Yahoo Finance tickers
pub const TESLA_SYMBOL: &str = "TSLA";
pub const TESLA_LABEL: &str = "Tesla";
pub const BITCOIN_SYMBOL: &str = "BTC-USD";
pub const GOLD_SYMBOL: &str = "GC=F";

// Yahoo Finance query windows
pub const DAILY_INTERVAL: &str = "1d";
pub const LATEST_RANGE: &str = "1d";
pub const CHART_RANGE: &str = "1mo";

// Chart canvas, 8x4 plot units at 100 px per unit
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 400;
pub const CHART_FILE_NAME: &str = "chart.png";

// Chart font compiled into the binary
pub const BUNDLED_FONT_NAME: &str = "DejaVuSans.ttf";
