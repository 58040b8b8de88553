/* Common utilites for handlers. */

use async_trait::async_trait;
use teloxide::{
    payloads::SendMessage,
    prelude::*,
    requests::JsonRequest,
    types::{ChatId, InlineKeyboardMarkup, InputFile, Message},
    Bot, RequestError,
};

use crate::bot::constants::market::CHART_FILE_NAME;

// Outgoing side of the bot used by the service flows.
// Implemented by Bot, and by recording fakes in tests.
#[async_trait]
pub trait ChatOutbox: Send + Sync {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), RequestError>;

    async fn send_png(&self, chat_id: ChatId, png: Vec<u8>) -> Result<(), RequestError>;
}

#[async_trait]
impl ChatOutbox for Bot {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), RequestError> {
        let request = self.send_message(chat_id, text);
        match keyboard {
            Some(keyboard) => request.reply_markup(keyboard).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn send_png(&self, chat_id: ChatId, png: Vec<u8>) -> Result<(), RequestError> {
        self.send_photo(chat_id, InputFile::memory(png).file_name(CHART_FILE_NAME))
            .await?;
        Ok(())
    }
}

// Wrapper function to send bot message to specific thread, if available
pub fn send_bot_message(bot: &Bot, msg: &Message, text: String) -> JsonRequest<SendMessage> {
    let thread_id = msg.thread_id;
    match thread_id {
        Some(thread_id) => bot
            .send_message(msg.chat.id, text)
            .message_thread_id(thread_id),
        None => bot.send_message(msg.chat.id, text),
    }
}

// Acknowledges a button press so the client stops its loading spinner.
// Failure only affects the spinner, so it is logged and dropped.
pub async fn acknowledge_callback(bot: &Bot, query_id: String) {
    if let Err(err) = bot.answer_callback_query(query_id).await {
        log::warn!("Failed to answer callback query: {}", err);
    }
}
