use teloxide::RequestError;

use crate::bot::{chart::ChartError, market::MarketError};

/* Types */
pub type HandlerResult = Result<(), BotError>;

#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("Market error: {0}")]
    MarketError(MarketError),
    #[error("Chart error: {0}")]
    ChartError(ChartError),
    #[error("Request error: {0}")]
    RequestError(RequestError),
}

impl From<RequestError> for BotError {
    fn from(request_error: RequestError) -> BotError {
        BotError::RequestError(request_error)
    }
}

impl From<MarketError> for BotError {
    fn from(market_error: MarketError) -> BotError {
        BotError::MarketError(market_error)
    }
}

impl From<ChartError> for BotError {
    fn from(chart_error: ChartError) -> BotError {
        BotError::ChartError(chart_error)
    }
}

pub mod bot_actions;
pub mod format;
