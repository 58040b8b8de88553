use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

use crate::bot::{
    config::BotConfig,
    handlers::{action_help, action_start, callback_handler, invalid_state},
    market::{MarketData, MarketError, YahooMarketData},
    utils::BotError,
};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Open the welcome menu.")]
    Start,
    #[command(description = "Show how to use the bot.")]
    Help,
}

/* Button actions.
 * Each variant is carried over the wire as its callback token.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Services,
    BitcoinPrice,
    AssetPrice,
    BitcoinChart,
    GoldChart,
}

impl Action {
    pub fn token(self) -> &'static str {
        match self {
            Action::Services => "services",
            Action::BitcoinPrice => "service_a",
            Action::AssetPrice => "service_b",
            Action::BitcoinChart => "service_c",
            Action::GoldChart => "service_d",
        }
    }

    pub fn from_token(token: &str) -> Option<Action> {
        match token {
            "services" => Some(Action::Services),
            "service_a" => Some(Action::BitcoinPrice),
            "service_b" => Some(Action::AssetPrice),
            "service_c" => Some(Action::BitcoinChart),
            "service_d" => Some(Action::GoldChart),
            _ => None,
        }
    }
}

// Shared dependencies of every handler.
pub struct AppContext {
    pub config: BotConfig,
    pub http: reqwest::Client,
    pub market: Arc<dyn MarketData>,
}

impl AppContext {
    pub fn new(config: BotConfig) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder().build()?;
        let market = Arc::new(YahooMarketData::new()?);
        Ok(Self::with_market(config, http, market))
    }

    pub fn with_market(
        config: BotConfig,
        http: reqwest::Client,
        market: Arc<dyn MarketData>,
    ) -> Self {
        AppContext {
            config,
            http,
            market,
        }
    }
}

pub fn schema() -> UpdateHandler<BotError> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(action_start))
        .branch(case![Command::Help].endpoint(action_help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(invalid_state));

    let callback_query_handler = Update::filter_callback_query().endpoint(callback_handler);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_query_handler)
}

pub async fn run_dispatcher(bot: Bot, context: Arc<AppContext>) {
    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Failed to register bot commands: {}", err);
    }

    log::info!("Starting long polling...");
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
