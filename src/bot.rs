use crate::errors::Result;
use crate::homework::{check_response, current_date, parse_status};
use crate::notification::TelegramClient;
use crate::practicum::PracticumClient;
use log::{error, info};

/// Sent instead of a verdict when the homework status could not be obtained.
pub const NO_ANSWER_MESSAGE: &str = "Ответа нет";

pub struct HomeworkBot {
    practicum: PracticumClient,
    telegram: TelegramClient,
    chat_id: String,
    last_message: Option<String>,
}

impl HomeworkBot {
    pub fn new(practicum: PracticumClient, telegram: TelegramClient, chat_id: String) -> Self {
        HomeworkBot {
            practicum,
            telegram,
            chat_id,
            last_message: None,
        }
    }

    async fn check_homework(&self, from_date: i64) -> Result<(String, Option<i64>)> {
        let response = self.practicum.get_api_answer(from_date).await?;
        let homework = check_response(&response)?;
        let message = parse_status(homework)?;
        Ok((message, current_date(&response)))
    }

    /// Polls once and returns the `from_date` to use for the next poll.
    pub async fn poll(&mut self, from_date: i64) -> i64 {
        match self.check_homework(from_date).await {
            Ok((message, next_date)) => {
                info!("homework status changed: {}", message);
                if self.send_message(message).await {
                    next_date.unwrap_or(from_date)
                } else {
                    from_date
                }
            }
            Err(e) => {
                error!("unable to get homework status: {}", e);
                self.send_message(NO_ANSWER_MESSAGE.to_string()).await;
                from_date
            }
        }
    }

    /// Returns whether the chat has the message, either now or from a previous send.
    async fn send_message(&mut self, message: String) -> bool {
        if self.last_message.as_ref() == Some(&message) {
            info!("message already sent, skipping");
            return true;
        }
        match self.telegram.notify(&self.chat_id, &message).await {
            Ok(()) => {
                info!("message sent to chat {}", self.chat_id);
                self.last_message = Some(message);
                true
            }
            Err(e) => {
                error!("unable to send message to chat {}: {}", self.chat_id, e);
                false
            }
        }
    }
}
