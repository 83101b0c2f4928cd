//! Birthday card form and the content it produces

use std::fmt;

use url::form_urlencoded::byte_serialize;

use crate::error::CardError;

/// Required fields of the card form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Name,
    Message,
    Sender,
}

impl CardField {
    pub fn label(&self) -> &'static str {
        match self {
            CardField::Name => "birthday person's name",
            CardField::Message => "message",
            CardField::Sender => "sender name",
        }
    }

    /// Element id of the input on the page
    pub fn element_id(&self) -> &'static str {
        match self {
            CardField::Name => "birthdayPersonName",
            CardField::Message => "customMessage",
            CardField::Sender => "senderName",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form input
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    pub name: String,
    pub message: String,
    pub sender: String,
    /// Uploaded photo as a data URL
    pub photo: Option<String>,
}

impl CardForm {
    /// Check every required field; the first blank one is reported
    pub fn validate(&self) -> Result<Card, CardError> {
        let fields = [
            (CardField::Name, &self.name),
            (CardField::Message, &self.message),
            (CardField::Sender, &self.sender),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            log::warn!("Card form incomplete: missing {}", field);
            return Err(CardError::MissingField(*field));
        }

        Ok(Card {
            name: self.name.trim().to_string(),
            message: self.message.trim().to_string(),
            sender: self.sender.trim().to_string(),
            photo: self.photo.clone().filter(|url| !url.is_empty()),
        })
    }
}

/// A validated card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub message: String,
    pub sender: String,
    pub photo: Option<String>,
}

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/400x400/ff0080/ffffff?text=";

impl Card {
    pub fn title(&self) -> String {
        format!("🌟 HAPPY BIRTHDAY {}! 🌟", self.name.to_uppercase())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn signature(&self) -> String {
        format!("From the Universe of: {}", self.sender)
    }

    /// Uploaded photo, or a placeholder carrying the name's first letter
    pub fn photo_src(&self) -> String {
        match &self.photo {
            Some(url) => url.clone(),
            None => {
                let initial: String = self.name.chars().take(1).collect();
                let text: String = byte_serialize(initial.as_bytes()).collect();
                format!("{}{}", PLACEHOLDER_BASE, text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CardForm {
        CardForm {
            name: "Rae".to_string(),
            message: "Have a stellar day".to_string(),
            sender: "Sam".to_string(),
            photo: None,
        }
    }

    #[test]
    fn test_valid_card_content() {
        let card = form().validate().unwrap();
        assert_eq!(card.title(), "🌟 HAPPY BIRTHDAY RAE! 🌟");
        assert_eq!(card.message(), "Have a stellar day");
        assert_eq!(card.signature(), "From the Universe of: Sam");
        assert_eq!(
            card.photo_src(),
            "https://via.placeholder.com/400x400/ff0080/ffffff?text=R"
        );
    }

    #[test]
    fn test_uploaded_photo_wins() {
        let mut form = form();
        form.photo = Some("data:image/png;base64,AAAA".to_string());
        assert_eq!(
            form.validate().unwrap().photo_src(),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let mut blank = form();
        blank.message = "  ".to_string();
        blank.sender.clear();
        assert_eq!(
            blank.validate(),
            Err(CardError::MissingField(CardField::Message))
        );

        assert_eq!(
            CardForm::default().validate(),
            Err(CardError::MissingField(CardField::Name))
        );
    }

    #[test]
    fn test_placeholder_uses_whole_first_character() {
        let mut form = form();
        form.name = "Élodie".to_string();
        assert!(form.validate().unwrap().photo_src().ends_with("text=%C3%89"));
    }

    #[test]
    fn test_placeholder_escapes_reserved_initials() {
        for (name, text) in [("#1 Fan", "%23"), ("&co", "%26"), ("?Rae", "%3F")] {
            let mut form = form();
            form.name = name.to_string();
            let src = form.validate().unwrap().photo_src();
            assert!(src.ends_with(&format!("text={}", text)), "{}", src);
            assert_eq!(src.matches('?').count(), 1);
        }
    }

    #[test]
    fn test_error_message() {
        let err = CardError::MissingField(CardField::Sender);
        assert_eq!(err.to_string(), "missing required field: sender name");
    }
}
