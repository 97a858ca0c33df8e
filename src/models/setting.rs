use serde::Serialize;

/// Key/value row in the settings collection. Only the `logo` key is used
/// today; it holds a `data:<mime>;base64,...` image payload.
#[derive(Debug, Clone, Serialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Settings key under which the logo data URI is stored.
pub const LOGO_KEY: &str = "logo";
