pub use self::general::{action_help, action_start, invalid_state, unknown_message_reply};
pub use self::services::{callback_handler, handle_action, handle_callback, send_chart};

mod general;
mod services;
