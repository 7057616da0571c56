use crate::errors::{Error, Result};
use log::debug;
use reqwest::Client;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramClient {
    client: Client,
    url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str) -> Self {
        let url = format!(
            "{}/bot{}/sendMessage",
            api_url.trim_end_matches('/'),
            token
        );
        TelegramClient {
            client: Client::new(),
            url,
        }
    }

    pub async fn notify(&self, chat_id: &str, message: &str) -> Result<()> {
        debug!("sending message to chat {}", chat_id);
        let response = self
            .client
            .get(&self.url)
            .query(&[("chat_id", chat_id), ("text", message)])
            .send()
            .await
            .map_err(without_url)?
            .json::<TelegramResponse>()
            .await
            .map_err(without_url)?;
        if !response.ok {
            return Err(Error::NotificationRejected(
                response
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }
        Ok(())
    }
}

/// The request URL carries the bot token and the message text.
fn without_url(e: reqwest::Error) -> Error {
    Error::Http(e.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn sends_chat_id_and_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/botbot-token/sendMessage")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("chat_id".into(), "100500".into()),
                Matcher::UrlEncoded("text".into(), "Ответа нет".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": {"message_id": 1}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TelegramClient::new(&format!("{}/", server.url()), "bot-token");
        client.notify("100500", "Ответа нет").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_by_bot_api() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/botbot-token/sendMessage")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let client = TelegramClient::new(&server.url(), "bot-token");
        match client.notify("1", "hello").await {
            Err(Error::NotificationRejected(description)) => {
                assert_eq!(description, "Bad Request: chat not found")
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn transport_error_hides_token() {
        // nothing listens on the discard port
        let client = TelegramClient::new("http://127.0.0.1:9", "123456:SECRET-BOT-TOKEN");
        let err = client.notify("42", "hi").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        let text = err.to_string();
        assert!(!text.contains("SECRET-BOT-TOKEN"), "{}", text);
        assert!(!text.contains("text=hi"), "{}", text);
    }
}
