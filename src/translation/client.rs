use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::Translator;
use super::prompt::build_system_prompt;
use crate::error::TranslateError;

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct TranslationClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl TranslationClient {
    pub fn new(endpoint: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }

    async fn complete(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let system_prompt = build_system_prompt(target_language);

        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(text),
                },
            ],
            stream: false,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        tracing::debug!(%url, model = %self.model, target_language, "sending completion request");

        let response = http_request
            .send()
            .await
            .map_err(|source| TranslateError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TranslateError::Transport { url, source })?;

        if !status.is_success() {
            return Err(TranslateError::Status { status, body });
        }

        parse_completion(&body)
    }
}

impl Translator for TranslationClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        self.complete(text, target_language).await
    }
}

/// Pulls the first choice's message out of a completion body.
fn parse_completion(body: &str) -> Result<String, TranslateError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(TranslateError::EmptyChoices)?;

    let translation = choice.message.content.unwrap_or_default().trim().to_string();
    if translation.is_empty() {
        return Err(TranslateError::EmptyContent);
    }

    Ok(translation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_trims_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Hallo Welt\n"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Hallo Welt");
    }

    #[test]
    fn test_parse_completion_uses_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"eins"}},{"message":{"content":"zwei"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "eins");
    }

    #[test]
    fn test_parse_completion_empty_choices() {
        let result = parse_completion(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(TranslateError::EmptyChoices)));
    }

    #[test]
    fn test_parse_completion_blank_content() {
        let body = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert!(matches!(
            parse_completion(body),
            Err(TranslateError::EmptyContent)
        ));

        let body = r#"{"choices":[{"message":{"content":"  
"}}]}"#;
        assert!(matches!(
            parse_completion(body),
            Err(TranslateError::EmptyContent)
        ));
    }

    #[test]
    fn test_parse_completion_invalid_json() {
        let result = parse_completion("not json");
        assert!(matches!(result, Err(TranslateError::Malformed(_))));
    }

    #[test]
    fn test_parse_completion_unicode() {
        let body = r#"{"choices":[{"message":{"content":"こんにちは"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "こんにちは");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(build_system_prompt("german")),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed("hello"),
                },
            ],
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hello");
    }
}
