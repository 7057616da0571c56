use crate::errors::{Error, Result};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn verdict(&self) -> &'static str {
        match *self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Homework<'a> {
    pub name: &'a str,
    pub status: HomeworkStatus,
}

impl<'a> Homework<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self> {
        let record = value.as_object().ok_or(Error::WrongType {
            what: "homework",
            expected: "a mapping",
        })?;
        let name = match record.get("homework_name") {
            None | Some(Value::Null) => return Err(Error::MissingField("homework_name")),
            Some(name) => name.as_str().ok_or(Error::WrongType {
                what: "homework_name",
                expected: "a string",
            })?,
        };
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        let status = match record.get("status") {
            None | Some(Value::Null) => return Err(Error::MissingField("status")),
            Some(Value::String(status)) => status.parse::<HomeworkStatus>()?,
            Some(other) => return Err(Error::UnknownStatus(other.to_string())),
        };
        Ok(Homework { name, status })
    }

    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{name}\".{verdict}",
            name = self.name,
            verdict = self.status.verdict(),
        )
    }
}

/// Validates the endpoint answer and returns its most recent homework record.
pub fn check_response(response: &Value) -> Result<&Value> {
    let response = response.as_object().ok_or(Error::WrongType {
        what: "response",
        expected: "a mapping",
    })?;
    let homeworks = response
        .get("homeworks")
        .ok_or(Error::MissingKey("homeworks"))?;
    if !response.contains_key("current_date") {
        return Err(Error::MissingKey("current_date"));
    }
    let homeworks = homeworks.as_array().ok_or(Error::WrongType {
        what: "homeworks",
        expected: "a list",
    })?;
    homeworks.first().ok_or(Error::NoData)
}

pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

pub fn parse_status(homework: &Value) -> Result<String> {
    Ok(Homework::from_value(homework)?.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_homework_is_returned_verbatim() {
        let response = json!({
            "homeworks": [
                {"status": "approved", "homework_name": "first", "lesson_name": "final"},
                {"status": "rejected", "homework_name": "second"}
            ],
            "current_date": 1_700_000_000
        });
        let homework = check_response(&response).unwrap();
        assert_eq!(homework, &response["homeworks"][0]);
        assert_eq!(current_date(&response), Some(1_700_000_000));
    }

    #[test]
    fn missing_keys() {
        let no_homeworks = json!({"current_date": 1});
        assert!(matches!(
            check_response(&no_homeworks),
            Err(Error::MissingKey("homeworks"))
        ));
        let no_date = json!({"homeworks": [{"status": "approved", "homework_name": "x"}]});
        assert!(matches!(
            check_response(&no_date),
            Err(Error::MissingKey("current_date"))
        ));
        assert!(matches!(
            check_response(&json!({})),
            Err(Error::MissingKey(_))
        ));
    }

    #[test]
    fn empty_homeworks_is_no_data() {
        let response = json!({"homeworks": [], "current_date": 1});
        assert!(matches!(check_response(&response), Err(Error::NoData)));
    }

    #[test]
    fn wrong_response_types() {
        assert!(matches!(
            check_response(&json!([{"homeworks": []}])),
            Err(Error::WrongType { what: "response", .. })
        ));
        assert!(matches!(
            check_response(&json!({"homeworks": {"status": "approved"}, "current_date": 1})),
            Err(Error::WrongType { what: "homeworks", .. })
        ));
    }

    #[test]
    fn approved_message() {
        let homework = json!({"status": "approved", "homework_name": "X"});
        assert_eq!(
            parse_status(&homework).unwrap(),
            "Изменился статус проверки работы \"X\".Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn every_known_status_has_a_verdict() {
        for (status, verdict) in [
            ("reviewing", "Работа взята на проверку ревьюером."),
            ("rejected", "Работа проверена: у ревьюера есть замечания."),
        ] {
            let homework = json!({"status": status, "homework_name": "hw"});
            let message = parse_status(&homework).unwrap();
            assert!(message.ends_with(verdict), "{}", message);
        }
    }

    #[test]
    fn unknown_status() {
        let homework = json!({"status": "lost", "homework_name": "hw"});
        match parse_status(&homework) {
            Err(Error::UnknownStatus(status)) => assert_eq!(status, "lost"),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(
            "Approved".parse::<HomeworkStatus>(),
            Err(Error::UnknownStatus(_))
        ));
    }

    #[test]
    fn broken_records() {
        assert!(matches!(
            parse_status(&json!({"status": "approved"})),
            Err(Error::MissingField("homework_name"))
        ));
        assert!(matches!(
            parse_status(&json!({"status": "approved", "homework_name": ""})),
            Err(Error::EmptyName)
        ));
        assert!(matches!(
            parse_status(&json!({"homework_name": "hw", "status": null})),
            Err(Error::MissingField("status"))
        ));
        assert!(matches!(
            parse_status(&json!("approved")),
            Err(Error::WrongType { what: "homework", .. })
        ));
    }

    #[test]
    fn homework_borrows_from_record() {
        let record = json!({"status": "reviewing", "homework_name": "hw_bot"});
        assert_eq!(
            Homework::from_value(&record).unwrap(),
            Homework {
                name: "hw_bot",
                status: HomeworkStatus::Reviewing
            }
        );
    }
}
