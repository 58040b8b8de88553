use serde_json::Number;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::{
    chart::ChartSpec,
    config::BotConfig,
    constants::messages::{
        ASSET_PRICE_BUTTON, BITCOIN_CHART_BUTTON, BITCOIN_FETCH_ERROR_MESSAGE,
        BITCOIN_FORMAT_ERROR_MESSAGE, BITCOIN_PRICE_BUTTON, GOLD_CHART_BUTTON,
        JOIN_CHANNEL_BUTTON, SERVICES_BUTTON, SUPPORT_BUTTON,
    },
    dispatcher::Action,
    market::MarketError,
};

// Make a keyboard, one callback button per row.
pub fn make_keyboard(options: Vec<(&str, Action)>) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = options
        .into_iter()
        .map(|(text, action)| vec![InlineKeyboardButton::callback(text, action.token())])
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

// Welcome keyboard: services entry point and a support link.
pub fn make_keyboard_start(config: &BotConfig) -> InlineKeyboardMarkup {
    make_keyboard(vec![(SERVICES_BUTTON, Action::Services)]).append_row(vec![
        InlineKeyboardButton::url(SUPPORT_BUTTON, config.support_url.clone()),
    ])
}

// Service menu shown to channel members.
pub fn make_keyboard_services() -> InlineKeyboardMarkup {
    make_keyboard(vec![
        (BITCOIN_PRICE_BUTTON, Action::BitcoinPrice),
        (ASSET_PRICE_BUTTON, Action::AssetPrice),
        (BITCOIN_CHART_BUTTON, Action::BitcoinChart),
        (GOLD_CHART_BUTTON, Action::GoldChart),
    ])
}

// Link to the gate channel, shown to non-members.
pub fn make_keyboard_join(config: &BotConfig) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        JOIN_CHANNEL_BUTTON,
        config.channel_url.clone(),
    )]])
}

// Displays the Bitcoin spot price, or the matching failure text.
pub fn display_bitcoin_price(price: &Result<Number, MarketError>) -> String {
    match price {
        Ok(price) => format!("Bitcoin Price: ${}", price),
        Err(MarketError::UnexpectedFormat(_)) => BITCOIN_FORMAT_ERROR_MESSAGE.to_string(),
        Err(_) => BITCOIN_FETCH_ERROR_MESSAGE.to_string(),
    }
}

// Displays a stock close with two decimals, or the failure text for that stock.
pub fn display_asset_price(label: &str, price: &Result<f64, MarketError>) -> String {
    match price {
        Ok(price) => format!("{} Stock Price: ${:.2}", label, price),
        Err(_) => format!("Failed to fetch {} price. Please try again later.", label),
    }
}

pub fn display_chart_no_data(spec: &ChartSpec) -> String {
    format!("No {} price data available.", spec.asset_name)
}

pub fn display_chart_failure(spec: &ChartSpec, detail: &str) -> String {
    format!(
        "Failed to fetch {} price chart.\nError: {}",
        spec.asset_name, detail
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::chart::ChartKind;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<Option<String>> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_keyboard() {
        let config = BotConfig::new("123:abc").unwrap();
        let markup = make_keyboard_start(&config);

        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard.iter().flatten().count(), 2);
        assert_eq!(callback_data(&markup), vec![Some("services".to_string()), None]);
        assert!(matches!(
            &markup.inline_keyboard[1][0].kind,
            InlineKeyboardButtonKind::Url(url) if url.as_str() == "https://t.me/TIMCN"
        ));
    }

    #[test]
    fn test_services_keyboard() {
        let markup = make_keyboard_services();
        assert_eq!(markup.inline_keyboard.len(), 4);
        assert_eq!(
            callback_data(&markup),
            vec![
                Some("service_a".to_string()),
                Some("service_b".to_string()),
                Some("service_c".to_string()),
                Some("service_d".to_string()),
            ]
        );
    }

    #[test]
    fn test_join_keyboard() {
        let config = BotConfig::new("123:abc").unwrap();
        let markup = make_keyboard_join(&config);
        assert_eq!(markup.inline_keyboard.iter().flatten().count(), 1);
        assert!(matches!(
            &markup.inline_keyboard[0][0].kind,
            InlineKeyboardButtonKind::Url(url) if url.as_str() == "https://t.me/MyPyTel_MKbot"
        ));
    }

    #[test]
    fn test_display_bitcoin_price() {
        let price = Number::from(42000u64);
        assert_eq!(display_bitcoin_price(&Ok(price)), "Bitcoin Price: $42000");
        assert_eq!(
            display_bitcoin_price(&Err(MarketError::UnexpectedFormat("{}".to_string()))),
            "Unexpected response format from CoinGecko."
        );
        assert_eq!(
            display_bitcoin_price(&Err(MarketError::NoData("bitcoin".to_string()))),
            "Failed to fetch Bitcoin price. Please try again later."
        );
    }

    #[test]
    fn test_display_asset_price() {
        assert_eq!(
            display_asset_price("Tesla", &Ok(248.5)),
            "Tesla Stock Price: $248.50"
        );
        assert_eq!(
            display_asset_price("Tesla", &Err(MarketError::NoData("TSLA".to_string()))),
            "Failed to fetch Tesla price. Please try again later."
        );
    }

    #[test]
    fn test_display_chart_messages() {
        let gold = ChartKind::Gold.spec();
        assert_eq!(display_chart_no_data(&gold), "No gold price data available.");
        assert_eq!(
            display_chart_failure(&ChartKind::Bitcoin.spec(), "timeout"),
            "Failed to fetch Bitcoin price chart.\nError: timeout"
        );
    }
}
