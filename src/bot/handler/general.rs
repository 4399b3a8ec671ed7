use std::sync::Arc;

use teloxide::{prelude::*, types::ParseMode};

use super::constants::WELCOME_MESSAGE;
use super::utils::make_menu_keyboard;
use crate::bot::dispatcher::HandlerResult;
use crate::config::Config;

/* Start command.
 * Replies with the welcome text and a reply keyboard of suggested
 * asset codes. No rate lookup happens here; tapping a button sends
 * the code back as a plain message.
 */
pub async fn action_start(bot: Bot, msg: Message, config: Arc<Config>) -> HandlerResult {
    bot.send_message(msg.chat.id, WELCOME_MESSAGE)
        .parse_mode(ParseMode::Markdown)
        .reply_markup(make_menu_keyboard(&config.menu_assets))
        .await?;
    Ok(())
}
