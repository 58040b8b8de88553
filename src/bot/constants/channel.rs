// Gate channel
pub const CHANNEL_ID: i64 = -1002460204159;
pub const CHANNEL_USERNAME: &str = "MyPyTel_MKbot";

// Support contact
pub const SUPPORT_USERNAME: &str = "TIMCN";

pub const TELEGRAM_LINK_BASE: &str = "https://t.me/";
