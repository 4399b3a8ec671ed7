// Exported functions
pub use self::general::action_start;
pub use self::rates::{action_inline_rate, action_rate_lookup};

// Submodules
mod constants;
mod general;
mod rates;
mod utils;
