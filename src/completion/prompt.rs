use serde::Deserialize;

use crate::completion::ChatMessage;
use crate::db::Book;

/// Free-text reader traits supplied with a recommendation request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderFeatures {
    pub description: Option<String>,
    pub mood: Option<String>,
    pub goal: Option<String>,
}

impl ReaderFeatures {
    /// Non-empty, trimmed features as `{'name': 'value', ...}`.
    fn render(&self) -> String {
        let entries: Vec<String> = [
            ("description", &self.description),
            ("mood", &self.mood),
            ("goal", &self.goal),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then(|| format!("'{}': '{}'", name, value))
        })
        .collect();

        format!("{{{}}}", entries.join(", "))
    }
}

pub fn summary_prompt(book: &Book) -> Vec<ChatMessage> {
    vec![ChatMessage::user(format!(
        "Write a brief summary for book '{}' from {}",
        book.title, book.author
    ))]
}

pub fn recommendation_prompt(book: &Book, features: &ReaderFeatures) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "Hello helpful assistant! You will give me future recommendations based on my personal features '{}'",
            features.render()
        )),
        ChatMessage::user(format!(
            "Tell me how much the book {} from {} of genre {} aligns with me in percentage and briefly explain why in prose. \
             Do not provide additional recommendations and do not ask additional questions.",
            book.title, book.author, book.genre
        )),
    ]
}
