use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemRequest {
    pub text: Option<String>,
}

impl ItemRequest {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}
