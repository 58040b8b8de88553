use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::{
    constants::messages::{HELP_MESSAGE, UNKNOWN_COMMAND_MESSAGE, WELCOME_MESSAGE},
    dispatcher::AppContext,
    utils::{bot_actions::send_bot_message, format::make_keyboard_start, HandlerResult},
};

/* Invalid state.
 * Invoked for any message that is not a known command.
 * Text messages get a pointer to /start, everything else is ignored.
 */
pub async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    if let Some(reply) = unknown_message_reply(msg.text()) {
        send_bot_message(&bot, &msg, reply.to_string()).await?;
    }
    Ok(())
}

// Reply for a message that is not a known command, if any.
pub fn unknown_message_reply(text: Option<&str>) -> Option<&'static str> {
    text.map(|_| UNKNOWN_COMMAND_MESSAGE)
}

/* Start command.
 * Displays the welcome message with the services and support buttons.
 * Shown to everyone, the membership gate only applies once services is pressed.
 */
pub async fn action_start(bot: Bot, msg: Message, context: Arc<AppContext>) -> HandlerResult {
    if let Some(user) = msg.from() {
        log::info!("User {} started the bot in chat {}", user.id, msg.chat.id);
    }

    send_bot_message(&bot, &msg, WELCOME_MESSAGE.to_string())
        .reply_markup(make_keyboard_start(&context.config))
        .await?;
    Ok(())
}

/* Help command.
 * Displays static usage text.
 */
pub async fn action_help(bot: Bot, msg: Message) -> HandlerResult {
    send_bot_message(&bot, &msg, HELP_MESSAGE.to_string()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_message_reply() {
        assert_eq!(unknown_message_reply(Some("hello")), Some(UNKNOWN_COMMAND_MESSAGE));
        assert_eq!(unknown_message_reply(Some("/unknown")), Some(UNKNOWN_COMMAND_MESSAGE));
        assert_eq!(unknown_message_reply(Some("")), Some(UNKNOWN_COMMAND_MESSAGE));
        assert_eq!(unknown_message_reply(None), None);
    }
}
