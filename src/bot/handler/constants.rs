/* User-facing strings and limits shared across handlers. */

pub const WELCOME_MESSAGE: &str = "Choose a cryptocurrency code or type your own";

pub const INLINE_RESULT_DESCRIPTION: &str = "Check the current rate";

// Longest message text still treated as an asset code, in bytes.
pub const MAX_ASSET_CODE_LEN: usize = 5;
