//! Admin-editable gateway settings.

use serde::{Deserialize, Serialize};

use crate::i18n::{TEXT_DOMAIN, Translator};

pub const DEFAULT_TITLE: &str = "EAN Payment";
pub const DEFAULT_DESCRIPTION: &str =
    "Please remit payment to Store Name upon pickup or delivery.";

/// Settings the store admin controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub enabled: bool,
    /// Payment method title shown at checkout.
    pub title: String,
    /// Payment method description shown at checkout.
    pub description: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl GatewaySettings {
    /// Read `EANPAY_GATEWAY_ENABLED`, `EANPAY_GATEWAY_TITLE` and
    /// `EANPAY_GATEWAY_DESCRIPTION`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewaySettings::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let enabled = match lookup("EANPAY_GATEWAY_ENABLED") {
            Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unrecognised EANPAY_GATEWAY_ENABLED; keeping default");
                defaults.enabled
            }),
            None => defaults.enabled,
        };

        Self {
            enabled,
            title: lookup("EANPAY_GATEWAY_TITLE")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.title),
            description: lookup("EANPAY_GATEWAY_DESCRIPTION").unwrap_or(defaults.description),
        }
    }

    /// Definition of the admin settings form.
    pub fn form_fields(translator: &dyn Translator) -> Vec<FormField> {
        let t = |s: &str| translator.translate(s, TEXT_DOMAIN);

        vec![
            FormField {
                key: "enabled",
                title: t("Enable/Disable"),
                field_type: FieldType::Checkbox,
                label: Some(t("Enable EAN Payment")),
                description: None,
                default: "yes".to_string(),
                desc_tip: false,
            },
            FormField {
                key: "title",
                title: t("Title"),
                field_type: FieldType::Text,
                label: None,
                description: Some(t(
                    "This controls the title for the payment method the customer sees during checkout.",
                )),
                default: t(DEFAULT_TITLE),
                desc_tip: true,
            },
            FormField {
                key: "description",
                title: t("Description"),
                field_type: FieldType::Textarea,
                label: None,
                description: Some(t(
                    "Payment method description that the customer will see on your checkout.",
                )),
                default: t(DEFAULT_DESCRIPTION),
                desc_tip: true,
            },
        ]
    }
}

/// Accepts `yes`/`no`, `true`/`false`, `on`/`off`, `1`/`0` (case-insensitive).
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Some(true),
        "no" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Checkbox,
    Text,
    Textarea,
}

/// One row of the admin settings form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub default: String,
    pub desc_tip: bool,
}
