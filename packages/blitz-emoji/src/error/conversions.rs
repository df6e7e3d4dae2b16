use crate::error::types::EmojiError;

impl From<std::io::Error> for EmojiError {
    fn from(error: std::io::Error) -> Self {
        EmojiError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for EmojiError {
    fn from(error: serde_json::Error) -> Self {
        EmojiError::ManifestParse(format!("JSON parsing failed: {}", error))
    }
}
