use std::env;
use std::str::FromStr;

/* Configuration is read once at startup from the process environment
 * (after dotenv has been applied). Both the dispatcher and the rate
 * client receive it explicitly; nothing else reads environment
 * variables.
 */

const ENV_BOT_TOKEN: &str = "TELOXIDE_TOKEN";
const ENV_UPSTREAM_URL: &str = "COINRATE_UPSTREAM_URL";
const ENV_UPSTREAM_MODE: &str = "COINRATE_UPSTREAM_MODE";
const ENV_MENU_ASSETS: &str = "COINRATE_MENU_ASSETS";

const DEFAULT_UPSTREAM_URL: &str = "https://api.cryptonator.com";
const DEFAULT_MENU_ASSETS: &str = "BTC,ETH,XRP,BCH,LTC";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Unknown upstream mode: {0}")]
    UnknownUpstreamMode(String),
}

/* The pricing API comes in two shapes, and which one we talk to is a
 * deployment choice, not a code path per bot variant.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMode {
    /// One request per (asset, fiat) pair: `GET {base}/api/full/{asset}-{fiat}`,
    /// price at `ticker.price`.
    PairByPair,
    /// One request for all fiats at once: `GET {base}/ticker`,
    /// prices at `{FIAT}.last`. The endpoint itself is bound to a
    /// single asset.
    TickerAll,
}

impl FromStr for UpstreamMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<UpstreamMode, ConfigError> {
        match raw {
            "pairs" => Ok(UpstreamMode::PairByPair),
            "ticker" => Ok(UpstreamMode::TickerAll),
            other => Err(ConfigError::UnknownUpstreamMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub upstream_base_url: String,
    pub upstream_mode: UpstreamMode,
    pub menu_assets: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        let bot_token =
            env::var(ENV_BOT_TOKEN).map_err(|_| ConfigError::MissingVar(ENV_BOT_TOKEN))?;

        let upstream_base_url =
            env::var(ENV_UPSTREAM_URL).unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());

        let upstream_mode = match env::var(ENV_UPSTREAM_MODE) {
            Ok(raw) => raw.parse()?,
            Err(_) => UpstreamMode::PairByPair,
        };

        let menu_assets = parse_menu_assets(
            &env::var(ENV_MENU_ASSETS).unwrap_or_else(|_| DEFAULT_MENU_ASSETS.to_string()),
        );

        Ok(Config {
            bot_token,
            upstream_base_url,
            upstream_mode,
            menu_assets,
        })
    }
}

// Parse a comma-separated list of suggested asset codes.
fn parse_menu_assets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}
