//! User identity domain models.
//!
//! Covers the authenticated identity held by the session, the login and
//! registration payloads sent to the backend, and the display-name fallback
//! rule applied whenever an identity is accepted into the session.

use crate::error::{MscError, Result};
use serde::{Deserialize, Serialize};

/// Display name used when the backend supplies neither a name nor an email.
pub const DEFAULT_DISPLAY_NAME: &str = "Người dùng";

/// Identity of the person using this client.
///
/// Decoding is lenient: missing or `null` text fields become empty strings
/// and a numeric `id` is kept as its decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    /// Display name. The backend may omit it, send `null` or send it empty.
    #[serde(rename = "fullName", default, deserialize_with = "lenient_string")]
    pub full_name: String,
}

impl UserData {
    pub fn new(id: impl Into<String>, email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            full_name: full_name.into(),
        }
    }

    /// Returns a copy whose `full_name` is guaranteed non-empty.
    ///
    /// Falls back to the email, then to [`DEFAULT_DISPLAY_NAME`].
    pub fn with_display_name(mut self) -> Self {
        if self.full_name.trim().is_empty() {
            self.full_name = if self.email.trim().is_empty() {
                DEFAULT_DISPLAY_NAME.to_string()
            } else {
                self.email.clone()
            };
        }
        self
    }
}

/// Credentials posted to `/auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// `data` payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: UserData,
    pub token: String,
}

/// Registration form as filled in by a person, before validation.
#[derive(Clone, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Validates the form and converts it to the wire request.
    ///
    /// An empty phone number is omitted from the request.
    pub fn into_request(self) -> Result<RegisterRequest> {
        if self.full_name.trim().is_empty() {
            return Err(MscError::validation("Vui lòng nhập họ và tên"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(MscError::validation("Email không hợp lệ"));
        }
        if self.password.is_empty() {
            return Err(MscError::validation("Vui lòng nhập mật khẩu"));
        }
        if self.password != self.confirm_password {
            return Err(MscError::validation("Mật khẩu xác nhận không khớp"));
        }

        let phone = self.phone.trim();
        Ok(RegisterRequest {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            password: self.password,
        })
    }
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Body posted to `/auth/register`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"***")
            .finish()
    }
}

/// Account summary returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAccount {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(rename = "fullName", default, deserialize_with = "lenient_string")]
    pub full_name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Flag(bool),
}

/// Accepts a string, a number, a bool or `null` (as empty).
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(text)) => text,
        Some(Scalar::Signed(n)) => n.to_string(),
        Some(Scalar::Unsigned(n)) => n.to_string(),
        Some(Scalar::Float(n)) => n.to_string(),
        Some(Scalar::Flag(b)) => b.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            full_name: "Nguyen Van A".to_string(),
            email: "a@b.com".to_string(),
            phone: String::new(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let user = UserData::new("1", "a@b.com", "Anh").with_display_name();
        assert_eq!(user.full_name, "Anh");
    }

    #[test]
    fn test_display_name_falls_back_to_email_then_placeholder() {
        let user = UserData::new("1", "a@b.com", "").with_display_name();
        assert_eq!(user.full_name, "a@b.com");

        let user = UserData::new("1", "", "  ").with_display_name();
        assert_eq!(user.full_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_missing_full_name_deserializes_as_empty() {
        let user: UserData = serde_json::from_str(r#"{"id":"1","email":"a@b.com"}"#).unwrap();
        assert_eq!(user.full_name, "");
    }

    #[test]
    fn test_lenient_user_fields() {
        let user: UserData =
            serde_json::from_str(r#"{"id":42,"email":null,"fullName":null}"#).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.email, "");
        assert_eq!(user.with_display_name().full_name, DEFAULT_DISPLAY_NAME);

        let user: UserData = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(user, UserData::new("7", "", ""));
    }

    #[test]
    fn test_register_form_omits_empty_phone() {
        let request = form().into_request().unwrap();
        assert!(request.phone.is_none());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("phone").is_none());
        assert_eq!(json["full_name"], "Nguyen Van A");
    }

    #[test]
    fn test_register_form_rejects_mismatched_confirmation() {
        let mut bad = form();
        bad.confirm_password = "other".to_string();
        assert!(matches!(bad.into_request(), Err(MscError::Validation(_))));
    }

    #[test]
    fn test_debug_output_hides_password() {
        let request = LoginRequest {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", request).contains("hunter2"));
    }
}
