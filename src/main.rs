use std::{process, sync::Arc};

use market_gate_bot::bot::{run_dispatcher, AppContext, BotConfig};

#[tokio::main]
pub async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    };

    let context = match AppContext::new(config) {
        Ok(context) => context,
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    };

    let bot = teloxide::Bot::new(&context.config.token);

    run_dispatcher(bot, Arc::new(context)).await;
}
