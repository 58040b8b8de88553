use std::sync::Arc;

use ab_glyph::FontVec;
use teloxide::{
    prelude::*,
    types::{ChatId, UserId},
};

use crate::bot::{
    chart::{render_chart, ChartError, ChartKind, ChartSpec},
    config::BotConfig,
    constants::{
        market::{CHART_RANGE, TESLA_LABEL, TESLA_SYMBOL},
        messages::{JOIN_CHANNEL_MESSAGE, SERVICES_MENU_MESSAGE},
    },
    dispatcher::{Action, AppContext},
    market::{fetch_bitcoin_price, fetch_latest_close, MarketData, MarketError},
    membership::{is_member, MemberStatusSource},
    utils::{
        bot_actions::{acknowledge_callback, ChatOutbox},
        format::{
            display_asset_price, display_bitcoin_price, display_chart_failure,
            display_chart_no_data, make_keyboard_join, make_keyboard_services,
        },
        BotError, HandlerResult,
    },
};

/* Callback query endpoint.
 * Replies go to the chat holding the pressed button, or the user's private chat if that
 * message is no longer available.
 */
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    context: Arc<AppContext>,
) -> HandlerResult {
    acknowledge_callback(&bot, q.id.clone()).await;

    let chat_id = q
        .message
        .as_ref()
        .map(|msg| msg.chat.id)
        .unwrap_or(ChatId(q.from.id.0 as i64));

    handle_callback(&bot, &bot, &context, q.data.as_deref(), chat_id, q.from.id).await
}

// Resolves the callback token and runs the matching action. Unknown tokens are dropped.
pub async fn handle_callback<O, S>(
    outbox: &O,
    members: &S,
    context: &AppContext,
    data: Option<&str>,
    chat_id: ChatId,
    user_id: UserId,
) -> HandlerResult
where
    O: ChatOutbox + ?Sized,
    S: MemberStatusSource + ?Sized,
{
    match data.and_then(Action::from_token) {
        Some(action) => handle_action(outbox, members, context, action, chat_id, user_id).await,
        None => {
            log::warn!(
                "Ignoring unknown callback data {:?} from user {}",
                data,
                user_id
            );
            Ok(())
        }
    }
}

pub async fn handle_action<O, S>(
    outbox: &O,
    members: &S,
    context: &AppContext,
    action: Action,
    chat_id: ChatId,
    user_id: UserId,
) -> HandlerResult
where
    O: ChatOutbox + ?Sized,
    S: MemberStatusSource + ?Sized,
{
    log::info!(
        "User {} requested {} in chat {}",
        user_id,
        action.token(),
        chat_id
    );

    let font = context.config.chart_font.as_ref();
    match action {
        Action::Services => {
            action_services(outbox, members, &context.config, chat_id, user_id).await
        }
        Action::BitcoinPrice => action_bitcoin_price(outbox, context, chat_id).await,
        Action::AssetPrice => action_asset_price(outbox, context, chat_id).await,
        Action::BitcoinChart => {
            send_chart(outbox, context.market.as_ref(), ChartKind::Bitcoin, font, chat_id).await
        }
        Action::GoldChart => {
            send_chart(outbox, context.market.as_ref(), ChartKind::Gold, font, chat_id).await
        }
    }
}

/* Services button.
 * Members get the service menu, everyone else gets a link to the channel.
 */
async fn action_services<O, S>(
    outbox: &O,
    members: &S,
    config: &BotConfig,
    chat_id: ChatId,
    user_id: UserId,
) -> HandlerResult
where
    O: ChatOutbox + ?Sized,
    S: MemberStatusSource + ?Sized,
{
    if is_member(members, config.channel_id, user_id).await {
        outbox
            .send_text(
                chat_id,
                SERVICES_MENU_MESSAGE.to_string(),
                Some(make_keyboard_services()),
            )
            .await?;
    } else {
        outbox
            .send_text(
                chat_id,
                JOIN_CHANNEL_MESSAGE.to_string(),
                Some(make_keyboard_join(config)),
            )
            .await?;
    }
    Ok(())
}

async fn action_bitcoin_price<O: ChatOutbox + ?Sized>(
    outbox: &O,
    context: &AppContext,
    chat_id: ChatId,
) -> HandlerResult {
    let price = fetch_bitcoin_price(
        &context.http,
        &context.config.price_url,
        context.config.price_timeout,
    )
    .await;

    if let Err(err) = &price {
        log::error!("Error fetching Bitcoin price: {}", err);
    }

    outbox
        .send_text(chat_id, display_bitcoin_price(&price), None)
        .await?;
    Ok(())
}

async fn action_asset_price<O: ChatOutbox + ?Sized>(
    outbox: &O,
    context: &AppContext,
    chat_id: ChatId,
) -> HandlerResult {
    let price = fetch_latest_close(context.market.as_ref(), TESLA_SYMBOL).await;

    if let Err(err) = &price {
        log::error!("Error fetching {} price: {}", TESLA_LABEL, err);
    }

    outbox
        .send_text(chat_id, display_asset_price(TESLA_LABEL, &price), None)
        .await?;
    Ok(())
}

/* Chart services.
 * Sends the chart as a photo. A missing or empty series gets a single "no data" message instead,
 * any other failure a message carrying the error detail.
 */
pub async fn send_chart<O, M>(
    outbox: &O,
    market: &M,
    kind: ChartKind,
    font: &FontVec,
    chat_id: ChatId,
) -> HandlerResult
where
    O: ChatOutbox + ?Sized,
    M: MarketData + ?Sized,
{
    let spec = kind.spec();

    match render_and_send(outbox, market, &spec, font, chat_id).await {
        Ok(()) => Ok(()),
        Err(BotError::ChartError(ChartError::EmptySeries))
        | Err(BotError::MarketError(MarketError::NoData(_))) => {
            log::warn!("No chart data for {}", spec.symbol);
            outbox
                .send_text(chat_id, display_chart_no_data(&spec), None)
                .await?;
            Ok(())
        }
        Err(err) => {
            log::error!("Error sending {} chart: {}", spec.symbol, err);
            outbox
                .send_text(chat_id, display_chart_failure(&spec, &err.to_string()), None)
                .await?;
            Ok(())
        }
    }
}

async fn render_and_send<O, M>(
    outbox: &O,
    market: &M,
    spec: &ChartSpec,
    font: &FontVec,
    chat_id: ChatId,
) -> HandlerResult
where
    O: ChatOutbox + ?Sized,
    M: MarketData + ?Sized,
{
    let points = market.daily_closes(spec.symbol, CHART_RANGE).await?;
    let png = render_chart(spec, &points, font)?;
    outbox.send_png(chat_id, png).await?;
    Ok(())
}
