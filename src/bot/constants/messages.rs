// Welcome messages
pub const WELCOME_MESSAGE: &str =
    "به بات ما خوش آمدید! 🎉\n\nبا کلیک روی هریک از دکمه های زیر به خدمات ما دسترسی پیدا می کنید.\n ";
pub const SERVICES_BUTTON: &str = "دسترسی به خدمات ما";
pub const SUPPORT_BUTTON: &str = "ارتباط با ما";

// Instruction messages
pub const HELP_MESSAGE: &str =
    "Use /start to access services. You must be a member of our channel to proceed.";
pub const UNKNOWN_COMMAND_MESSAGE: &str =
    "Sorry, I don't understand that command. Use /start to see available options.";

// Membership gate
pub const SERVICES_MENU_MESSAGE: &str =
    "✅   شما عضو کانال هستید و می توانید به خدمات ما دسترسی داشته باشید.  \n   لطفا یکی از خدمات زیر را انتخاب کنید.";
pub const JOIN_CHANNEL_MESSAGE: &str =
    "❌ شما عضو کانال ما نیستید.\n لطفا برای دسترسی به خدمات ما عضو کانال ما شوید. ";
pub const JOIN_CHANNEL_BUTTON: &str = "Join Channel";

// Service menu buttons
pub const BITCOIN_PRICE_BUTTON: &str = "دریافت قیمت بیتکوین";
pub const ASSET_PRICE_BUTTON: &str = "دریافت قیمت سهام تسلا";
pub const BITCOIN_CHART_BUTTON: &str = "چارت تغییرات بیتکوین";
pub const GOLD_CHART_BUTTON: &str = "چارت تغییرات قیمت طلا";

// Price failures
pub const BITCOIN_FORMAT_ERROR_MESSAGE: &str = "Unexpected response format from CoinGecko.";
pub const BITCOIN_FETCH_ERROR_MESSAGE: &str =
    "Failed to fetch Bitcoin price. Please try again later.";
