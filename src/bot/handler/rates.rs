use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InlineQuery, InlineQueryResult, ParseMode},
};

use super::utils::{format_rate_message, format_unknown_asset, is_asset_code, rate_article};
use crate::bot::api::RateClient;
use crate::bot::dispatcher::HandlerResult;

/* Rate lookup for a plain chat message.
 * Any short message text is treated as an asset code; longer chatter
 * is ignored without a reply. An unknown code gets a "does not exist"
 * reply so typos stay visible to the user.
 */
pub async fn action_rate_lookup(
    bot: Bot,
    msg: Message,
    rate_client: Arc<RateClient>,
) -> HandlerResult {
    let code = match msg.text() {
        Some(text) if is_asset_code(text) => text,
        _ => return Ok(()),
    };

    let reply = match rate_client.fetch_rate(code).await {
        Ok(rate) => format_rate_message(code, &rate, chrono::Local::now().naive_local()),
        Err(err) => {
            log::debug!("Rate lookup for {code:?} failed: {err}");
            format_unknown_asset(code)
        }
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

/* Rate lookup for an inline query.
 * An empty query or a failed lookup is dropped without an answer; a
 * successful one is answered with a single article titled by the
 * queried code.
 */
pub async fn action_inline_rate(
    bot: Bot,
    query: InlineQuery,
    rate_client: Arc<RateClient>,
) -> HandlerResult {
    if query.query.is_empty() {
        return Ok(());
    }

    let rate = match rate_client.fetch_rate(&query.query).await {
        Ok(rate) => rate,
        Err(err) => {
            log::debug!("Inline lookup for {:?} failed: {err}", query.query);
            return Ok(());
        }
    };

    let text = format_rate_message(&query.query, &rate, chrono::Local::now().naive_local());
    let article = rate_article(&query.query, text);

    bot.answer_inline_query(query.id, vec![InlineQueryResult::Article(article)])
        .await?;
    Ok(())
}
