use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::{Handler, HandlerContext, HandlerOutcome};
use crate::error::HandlerError;
use crate::followup::{FollowupRequest, PromptDelivery};
use crate::messages;

static CITY_AFTER_PREPOSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:in|for|at|à|en|für|de)\s+([\p{L}][\p{L}\s.'-]*)").expect("valid city regex")
});

static CITY_BEFORE_MEIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\p{L}\p{M}]+)\s+में").expect("valid hindi city regex"));

const FILLER: &[&str] = &["today", "tomorrow", "now", "please", "right now", "aaj", "kal", "aujourd'hui", "hoy", "heute"];

/// Pull a city name out of a weather request, if one is named.
pub fn extract_city(utterance: &str) -> Option<String> {
    let raw = CITY_AFTER_PREPOSITION
        .captures(utterance)
        .or_else(|| CITY_BEFORE_MEIN.captures(utterance))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())?;

    let mut words: Vec<&str> = raw.split_whitespace().collect();
    while let Some(last) = words.last() {
        let bare = last.trim_matches(|c: char| !c.is_alphanumeric());
        if FILLER.iter().any(|f| f.eq_ignore_ascii_case(bare)) {
            words.pop();
        } else {
            break;
        }
    }
    let city = words
        .join(" ")
        .trim_matches(|c: char| c == '.' || c == '-' || c == '\'' || c.is_whitespace())
        .to_string();
    (!city.is_empty()).then_some(city)
}

/// Weather lookup front end. Asks for the city when the request names none.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeatherHandler;

#[async_trait]
impl Handler for WeatherHandler {
    async fn handle(&self, cx: &HandlerContext, utterance: &str) -> Result<HandlerOutcome, HandlerError> {
        let city = match extract_city(utterance) {
            Some(city) => city,
            None => {
                let prompt = messages::which_city();
                let req = FollowupRequest::new(prompt.pick(cx.lang()), cx.followup.config().reply_timeout())
                    .delivery(PromptDelivery::SpeakThenShow);
                match cx.followup.await_reply(req).await? {
                    Some(reply) => {
                        let city = reply.trim_matches(|c: char| !c.is_alphanumeric());
                        if city.is_empty() {
                            return Err(HandlerError::MissingSlot("city"));
                        }
                        city.to_string()
                    }
                    None => {
                        cx.say(&messages::no_reply());
                        return Ok(HandlerOutcome::Done);
                    }
                }
            }
        };
        info!(%city, "weather requested");
        cx.say(&messages::weather_for(&city));
        Ok(HandlerOutcome::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::extract_city;

    #[test]
    fn finds_city_after_preposition() {
        assert_eq!(extract_city("weather in Paris today").as_deref(), Some("Paris"));
        assert_eq!(extract_city("what's the weather for New York").as_deref(), Some("New York"));
        assert_eq!(extract_city("météo à Lyon").as_deref(), Some("Lyon"));
    }

    #[test]
    fn finds_hindi_city() {
        assert_eq!(extract_city("दिल्ली में मौसम कैसा है").as_deref(), Some("दिल्ली"));
    }

    #[test]
    fn none_without_city() {
        assert_eq!(extract_city("what's the weather"), None);
        assert_eq!(extract_city("weather in today"), None);
    }
}
