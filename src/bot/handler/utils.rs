use chrono::{Datelike, NaiveDateTime, Timelike};
use teloxide::types::{
    InlineQueryResultArticle, InputMessageContent, InputMessageContentText, KeyboardButton,
    KeyboardMarkup, ParseMode,
};

use super::constants::{INLINE_RESULT_DESCRIPTION, MAX_ASSET_CODE_LEN};
use crate::bot::api::CurrencyRate;

/* Common utilities for handlers. */

// A message text is treated as an asset code when it is short enough
// to be a ticker symbol.
pub fn is_asset_code(text: &str) -> bool {
    !text.is_empty() && text.len() <= MAX_ASSET_CODE_LEN
}

// Make the /start keyboard, one suggested asset code per row.
pub fn make_menu_keyboard(menu_assets: &[String]) -> KeyboardMarkup {
    let keyboard: Vec<Vec<KeyboardButton>> = menu_assets
        .iter()
        .map(|code| vec![KeyboardButton::new(code.clone())])
        .collect();

    KeyboardMarkup::new(keyboard)
        .resize_keyboard(true)
        .one_time_keyboard(false)
}

/* Renders the reply body for one rate lookup.
 * Date and time are whatever the local wall clock says at formatting
 * time, without zero padding ("3.1.2024", "9:5:3") — the format this
 * bot has shown since day one.
 */
pub fn format_rate_message(asset_code: &str, rate: &CurrencyRate, now: NaiveDateTime) -> String {
    let date = format!("{}.{}.{}", now.day(), now.month(), now.year());
    let time = format!("{}:{}:{}", now.hour(), now.minute(), now.second());

    format!(
        "*{asset_code}*\n\nDate: {date}\nTime: {time}\n\n*USD*: {} $\n*EUR*: {} €\n*RUB*: {} ₽\n",
        rate.usd, rate.eur, rate.rub
    )
}

pub fn format_unknown_asset(asset_code: &str) -> String {
    format!("There is no cryptocurrency with code *{asset_code}*")
}

// Inline answers carry exactly one article, titled by the queried
// code, with the formatted rate as its message content.
pub fn rate_article(asset_code: &str, body: String) -> InlineQueryResultArticle {
    let content = InputMessageContentText::new(body).parse_mode(ParseMode::Markdown);

    InlineQueryResultArticle::new("1", asset_code, InputMessageContent::Text(content))
        .description(INLINE_RESULT_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 3)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap()
    }

    fn sample_rate() -> CurrencyRate {
        CurrencyRate {
            usd: 50000,
            eur: 46000,
            rub: 4500000,
        }
    }

    #[test]
    fn test_is_asset_code() {
        assert!(is_asset_code("BTC"));
        assert!(is_asset_code("DOGE"));
        assert!(is_asset_code("ABCDE"));
    }

    #[test]
    fn test_is_asset_code_rejects_long_or_empty() {
        assert!(!is_asset_code(""));
        assert!(!is_asset_code("ABCDEF"));
        assert!(!is_asset_code("HELLOTHERE"));
    }

    #[test]
    fn test_format_rate_message_exact() {
        let text = format_rate_message("BTC", &sample_rate(), fixed_datetime());
        assert_eq!(
            text,
            "*BTC*\n\nDate: 3.1.2024\nTime: 9:5:3\n\n\
             *USD*: 50000 $\n*EUR*: 46000 €\n*RUB*: 4500000 ₽\n"
        );
    }

    #[test]
    fn test_format_rate_message_contains_values() {
        let text = format_rate_message("BTC", &sample_rate(), fixed_datetime());
        assert!(text.contains("*BTC*"));
        assert!(text.contains("50000 $"));
        assert!(text.contains("46000 €"));
        assert!(text.contains("4500000 ₽"));
        assert!(text.contains("Date: 3.1.2024"));
        assert!(text.contains("Time: 9:5:3"));
    }

    #[test]
    fn test_format_rate_message_is_pure() {
        let first = format_rate_message("ETH", &sample_rate(), fixed_datetime());
        let second = format_rate_message("ETH", &sample_rate(), fixed_datetime());
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_unknown_asset_names_the_code() {
        let text = format_unknown_asset("ZZZ");
        assert!(text.contains("ZZZ"));
        assert!(text.contains("There is no cryptocurrency"));
    }

    #[test]
    fn test_menu_keyboard_one_code_per_row() {
        let assets = vec!["BTC".to_string(), "ETH".to_string(), "XRP".to_string()];
        let keyboard = make_menu_keyboard(&assets);

        assert_eq!(keyboard.keyboard.len(), 3);
        for (row, code) in keyboard.keyboard.iter().zip(&assets) {
            assert_eq!(row.len(), 1);
            assert_eq!(&row[0].text, code);
        }
    }

    #[test]
    fn test_rate_article_shape() {
        let body = format_rate_message("ETH", &sample_rate(), fixed_datetime());
        let article = rate_article("ETH", body);

        assert_eq!(article.id, "1");
        assert_eq!(article.title, "ETH");
        assert_eq!(article.description.as_deref(), Some(INLINE_RESULT_DESCRIPTION));
    }
}
