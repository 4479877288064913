//! HTML/text rendering of the checkout form, admin order panel and email section.
//!
//! Templates are Handlebars; `{{value}}` is HTML-escaped, so stored values are
//! safe to show even if they slipped past sanitisation. The plain-text email
//! uses triple-stash to avoid entity-encoding.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;

use crate::i18n::{TEXT_DOMAIN, Translator};
use crate::meta::EanPaymentMeta;

const PAYMENT_FIELDS: &str = "payment_fields";
const ADMIN_DETAILS: &str = "admin_details";
const EMAIL_HTML: &str = "email_html";
const EMAIL_PLAIN: &str = "email_plain";

const PAYMENT_FIELDS_TPL: &str = r#"{{#each fields}}<p class="form-row form-row-wide">
    <label for="{{id}}">{{label}}</label>
    <input type="text" id="{{id}}" name="{{name}}" class="input-text"{{#if maxlength}} maxlength="{{maxlength}}" inputmode="numeric"{{/if}}>
</p>
{{/each}}"#;

const ADMIN_DETAILS_TPL: &str = r#"<div class="clearfix"></div>
<h3>{{heading}}</h3>
{{#each rows}}<p><strong>{{label}}:</strong> {{value}}</p>
{{/each}}"#;

const EMAIL_HTML_TPL: &str = r#"<div style="margin-bottom:40px">
<h2>{{heading}}</h2>
<table class="td" cellspacing="0" cellpadding="6" style="width:100%;font-family:'Helvetica Neue',Helvetica,Roboto,Arial,sans-serif;color:#636363;border:1px solid #e5e5e5;vertical-align:middle" border="1">
{{#each rows}}<tr class="order_item">
<td class="td"><strong>{{label}}:</strong></td><td class="td">{{value}}</td>
</tr>
{{/each}}</table>
</div>
"#;

const EMAIL_PLAIN_TPL: &str = r#"{{{heading}}}

{{#each rows}}{{{label}}}: {{{value}}}
{{/each}}"#;

#[derive(Debug, Serialize)]
struct InputField {
    id: &'static str,
    name: &'static str,
    label: String,
    maxlength: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Row {
    label: String,
    value: String,
}

/// Compiled templates for every surface the gateway renders.
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl core::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(PAYMENT_FIELDS, PAYMENT_FIELDS_TPL)?;
        handlebars.register_template_string(ADMIN_DETAILS, ADMIN_DETAILS_TPL)?;
        handlebars.register_template_string(EMAIL_HTML, EMAIL_HTML_TPL)?;
        handlebars.register_template_string(EMAIL_PLAIN, EMAIL_PLAIN_TPL)?;
        Ok(Self { handlebars })
    }

    /// The three checkout inputs, posted as `ean_payment[...]`.
    pub fn payment_fields(&self, translator: &dyn Translator) -> Result<String, RenderError> {
        let t = |s: &str| translator.translate(s, TEXT_DOMAIN);
        let fields = [
            InputField {
                id: "ean-payment-ean-num",
                name: "ean_payment[ean_num]",
                label: t("EAN number"),
                maxlength: Some(eanpay_ean::EAN13_LEN),
            },
            InputField {
                id: "ean-payment-ref-name",
                name: "ean_payment[ref_name]",
                label: t("Reference person"),
                maxlength: None,
            },
            InputField {
                id: "ean-payment-req-num",
                name: "ean_payment[req_num]",
                label: t("Requisition number"),
                maxlength: None,
            },
        ];
        self.handlebars
            .render(PAYMENT_FIELDS, &json!({ "fields": fields }))
    }

    /// "EAN Details" block for the admin order page.
    pub fn admin_details(
        &self,
        meta: &EanPaymentMeta,
        translator: &dyn Translator,
    ) -> Result<String, RenderError> {
        let data = json!({
            "heading": translator.translate("EAN Details", TEXT_DOMAIN),
            "rows": rows(meta, translator),
        });
        self.handlebars.render(ADMIN_DETAILS, &data)
    }

    /// "EAN Information" section appended after the order table in emails.
    pub fn email(
        &self,
        meta: &EanPaymentMeta,
        plain_text: bool,
        translator: &dyn Translator,
    ) -> Result<String, RenderError> {
        let data = json!({
            "heading": translator.translate("EAN Information", TEXT_DOMAIN),
            "rows": rows(meta, translator),
        });
        let template = if plain_text { EMAIL_PLAIN } else { EMAIL_HTML };
        self.handlebars.render(template, &data)
    }
}

fn rows(meta: &EanPaymentMeta, translator: &dyn Translator) -> Vec<Row> {
    [
        ("EAN", &meta.ean_num),
        ("Reference name", &meta.ref_name),
        ("Requisition number", &meta.req_num),
    ]
    .into_iter()
    .map(|(label, value)| Row {
        label: translator.translate(label, TEXT_DOMAIN),
        value: value.clone().unwrap_or_default(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::IdentityTranslator;

    fn meta() -> EanPaymentMeta {
        EanPaymentMeta {
            ean_num: Some("4006381333931".into()),
            ref_name: Some("Smith & Sons".into()),
            req_num: None,
        }
    }

    #[test]
    fn payment_fields_name_the_three_inputs() {
        let html = Renderer::new()
            .unwrap()
            .payment_fields(&IdentityTranslator)
            .unwrap();

        assert!(html.contains(r#"name="ean_payment[ean_num]""#));
        assert!(html.contains(r#"name="ean_payment[ref_name]""#));
        assert!(html.contains(r#"name="ean_payment[req_num]""#));
        assert!(html.contains("EAN number"));
        assert!(html.contains(r#"maxlength="13""#));
        assert_eq!(html.matches("maxlength").count(), 1);
    }

    #[test]
    fn admin_details_escape_values_and_show_missing_as_empty() {
        let html = Renderer::new()
            .unwrap()
            .admin_details(&meta(), &IdentityTranslator)
            .unwrap();

        assert!(html.contains("<h3>EAN Details</h3>"));
        assert!(html.contains("<p><strong>EAN:</strong> 4006381333931</p>"));
        assert!(html.contains("<p><strong>Reference name:</strong> Smith &amp; Sons</p>"));
        assert!(html.contains("<p><strong>Requisition number:</strong> </p>"));
    }

    #[test]
    fn html_email_is_a_table() {
        let html = Renderer::new()
            .unwrap()
            .email(&meta(), false, &IdentityTranslator)
            .unwrap();

        assert!(html.contains("<h2>EAN Information</h2>"));
        assert!(html.contains(r#"<td class="td">4006381333931</td>"#));
        assert_eq!(html.matches("<tr ").count(), 3);
    }

    #[test]
    fn plain_email_is_not_entity_encoded() {
        let text = Renderer::new()
            .unwrap()
            .email(&meta(), true, &IdentityTranslator)
            .unwrap();

        assert!(text.starts_with("EAN Information"));
        assert!(text.contains("EAN: 4006381333931"));
        assert!(text.contains("Reference name: Smith & Sons"));
        assert!(!text.contains('<'));
    }
}
