//! User-facing texts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::application::errors::ConfigError;

/// Language of every text the bot sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    pub fn greeting(self) -> &'static str {
        match self {
            Locale::Ru => "Добро пожаловать! Используйте кнопки для навигации",
            Locale::En => "Welcome! Use the buttons to navigate",
        }
    }

    /// Label of the single main-menu button
    pub fn list_users_button(self) -> &'static str {
        match self {
            Locale::Ru => "Список пользователей",
            Locale::En => "list users",
        }
    }

    pub fn choose_user(self) -> &'static str {
        match self {
            Locale::Ru => "Выберите пользователя:",
            Locale::En => "Choose a user:",
        }
    }

    pub fn no_users(self) -> &'static str {
        match self {
            Locale::Ru => "Пользователи не найдены",
            Locale::En => "no users found",
        }
    }

    pub fn users_error(self) -> &'static str {
        match self {
            Locale::Ru => "Ошибка получения пользователей",
            Locale::En => "Failed to get users",
        }
    }

    pub fn posts_error(self) -> &'static str {
        match self {
            Locale::Ru => "Ошибка получения постов",
            Locale::En => "Failed to get posts",
        }
    }

    /// Placeholder for users with neither name nor email
    pub fn no_name(self) -> &'static str {
        match self {
            Locale::Ru => "Без имени",
            Locale::En => "no name",
        }
    }

    pub fn no_posts(self, user_id: &str) -> String {
        match self {
            Locale::Ru => format!("У пользователя {} нет постов", user_id),
            Locale::En => format!("user {} has no posts", user_id),
        }
    }

    pub fn posts_header(self, user_id: &str) -> String {
        match self {
            Locale::Ru => format!("Посты пользователя {}:", user_id),
            Locale::En => format!("Posts of user {}:", user_id),
        }
    }

    pub fn date_label(self) -> &'static str {
        match self {
            Locale::Ru => "Дата",
            Locale::En => "Date",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            other => Err(ConfigError::InvalidValue(format!("unknown locale: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" ru ".parse::<Locale>().unwrap(), Locale::Ru);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_no_posts_text() {
        assert_eq!(Locale::En.no_posts("u1"), "user u1 has no posts");
        assert_eq!(Locale::Ru.no_posts("u1"), "У пользователя u1 нет постов");
    }
}
