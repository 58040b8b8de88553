pub use self::dispatcher::run_dispatcher;

pub use self::chart::{render_chart, ChartError, ChartKind, ChartSpec, SeriesStyle};
pub use self::config::{bundled_chart_font, BotConfig, ConfigError};
pub use self::dispatcher::{schema, Action, AppContext, Command};
pub use self::handlers::{handle_action, handle_callback, send_chart, unknown_message_reply};
pub use self::market::{MarketData, MarketError, PricePoint, YahooMarketData};
pub use self::membership::{is_member, MemberStatus, MemberStatusSource};
pub use self::utils::{bot_actions::ChatOutbox, BotError, HandlerResult};

mod chart;
mod config;
mod constants;
mod dispatcher;
mod handlers;
mod market;
mod membership;
mod utils;
