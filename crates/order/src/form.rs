use serde::{Deserialize, Serialize};

/// Contact fields of the order modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub company: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OrderForm {
    /// Trims every field; a blank message becomes `None`.
    pub fn normalized(&self) -> Self {
        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        Self {
            company: self.company.trim().to_string(),
            contact: self.contact.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            duration: self.duration.trim().to_string(),
            message,
        }
    }
}
