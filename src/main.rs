use coinrate::bot::{run_dispatcher, RateClient};
use coinrate::config::Config;

#[tokio::main]
pub async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting CoinRate bot...");

    let config = Config::from_env().expect("Invalid bot configuration");
    let rate_client = RateClient::new(&config).expect("Failed to build the upstream HTTP client");
    let bot = teloxide::Bot::new(config.bot_token.clone());

    log::info!("CoinRate bot started successfully!");

    run_dispatcher(bot, config, rate_client).await;
}
