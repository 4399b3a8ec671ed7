// bot/mod.rs

// Exported functions
pub use self::dispatcher::run_dispatcher;

// Exported structs and types
pub use self::api::{CurrencyRate, FetchError, RateClient};
pub use self::dispatcher::{BotError, Command, HandlerResult};

// Declare submodules
mod api;
mod dispatcher;
mod handler;
