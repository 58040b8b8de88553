pub mod channel;
pub mod market;
pub mod messages;
