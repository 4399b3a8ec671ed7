use std::sync::Arc;

use teloxide::{
    dispatching::UpdateHandler, prelude::*, utils::command::BotCommands, RequestError,
};

use super::api::{FetchError, RateClient};
use super::handler::{action_inline_rate, action_rate_lookup, action_start};
use crate::config::Config;

/* Dispatcher wires inbound updates to the handlers.
 * A message is either the /start command, answered with the asset
 * menu, or a short asset code, answered with a rate lookup. Inline
 * queries are answered with a single formatted article. Everything
 * else is ignored. The bot holds no state between updates.
 */

/* Types */
pub type HandlerResult = Result<(), BotError>;

#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("Fetch error: {0}")]
    FetchError(FetchError),
    #[error("Request error: {0}")]
    RequestError(RequestError),
}

impl From<FetchError> for BotError {
    fn from(fetch_error: FetchError) -> BotError {
        BotError::FetchError(fetch_error)
    }
}

impl From<RequestError> for BotError {
    fn from(request_error: RequestError) -> BotError {
        BotError::RequestError(request_error)
    }
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Show the asset code menu.")]
    Start,
}

fn schema() -> UpdateHandler<BotError> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(action_start));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(action_rate_lookup));

    let inline_query_handler = Update::filter_inline_query().endpoint(action_inline_rate);

    dptree::entry()
        .branch(message_handler)
        .branch(inline_query_handler)
}

/* Main Dispatch function */
pub async fn run_dispatcher(bot: Bot, config: Config, rate_client: RateClient) {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![Arc::new(config), Arc::new(rate_client)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
