//! The EAN payment method: checkout validation, payment processing and the
//! admin/email views of the stored details.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use eanpay_core::{DomainError, DomainResult, OrderId};
use eanpay_ean::Ean13;

use crate::host::{NoticeKind, NoticeSink, OrderHost, OrderStatus};
use crate::i18n::{IdentityTranslator, TEXT_DOMAIN, Translator};
use crate::meta::EanPaymentMeta;
use crate::render::Renderer;
use crate::settings::{FormField, GatewaySettings};
use crate::store::OrderMetaStore;
use crate::submission::{EanSubmission, SubmissionError, check_submission};

/// Status note left on the order when it is put on hold.
pub const ON_HOLD_NOTE: &str = "Awaiting EAN payment.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("EAN payment is disabled")]
    Disabled,

    #[error("template error: {0}")]
    Template(String),
}

impl From<handlebars::RenderError> for GatewayError {
    fn from(value: handlebars::RenderError) -> Self {
        Self::Template(value.to_string())
    }
}

impl From<handlebars::TemplateError> for GatewayError {
    fn from(value: handlebars::TemplateError) -> Self {
        Self::Template(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentResult {
    Success,
}

/// Returned to the checkout once the order has been placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    pub result: PaymentResult,
    pub redirect: String,
}

/// EAN payment gateway wired to its storefront collaborators.
pub struct EanPaymentGateway<S, H> {
    settings: GatewaySettings,
    store: S,
    host: H,
    translator: Arc<dyn Translator>,
    renderer: Renderer,
}

impl<S, H> EanPaymentGateway<S, H>
where
    S: OrderMetaStore,
    H: OrderHost,
{
    pub const ID: &'static str = "ean_payment";

    pub fn new(settings: GatewaySettings, store: S, host: H) -> Result<Self, GatewayError> {
        Ok(Self {
            settings,
            store,
            host,
            translator: Arc::new(IdentityTranslator),
            renderer: Renderer::new()?,
        })
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn id(&self) -> &'static str {
        Self::ID
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_available(&self) -> bool {
        self.settings.enabled
    }

    /// The gateway collects its own checkout fields.
    pub fn has_fields(&self) -> bool {
        true
    }

    pub fn method_title(&self) -> String {
        self.t("EAN Payment")
    }

    pub fn method_description(&self) -> String {
        self.t("Take payment using an EAN. Orders are marked as \"on-hold\" when received.")
    }

    pub fn form_fields(&self) -> Vec<FormField> {
        GatewaySettings::form_fields(self.translator.as_ref())
    }

    pub fn payment_fields(&self) -> Result<String, GatewayError> {
        Ok(self.renderer.payment_fields(self.translator.as_ref())?)
    }

    /// Checkout rules as a `Result`, without raising notices.
    pub fn check_submission(
        &self,
        submission: Option<&EanSubmission>,
    ) -> Result<Ean13, SubmissionError> {
        check_submission(submission)
    }

    /// Validate the checkout fields, pushing a translated error notice on failure.
    ///
    /// Returns `false` when the checkout must stop so the buyer can correct
    /// and resubmit.
    pub fn validate_fields(
        &self,
        submission: Option<&EanSubmission>,
        notices: &mut dyn NoticeSink,
    ) -> bool {
        match check_submission(submission) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(code = err.code(), "EAN submission rejected");
                notices.add_notice(self.t(err.notice()), NoticeKind::Error);
                false
            }
        }
    }

    /// Store the EAN details, put the order on hold, reduce stock and empty
    /// the cart.
    ///
    /// The submission is checked again here; an invalid one never reaches
    /// the order.
    ///
    /// The steps are not atomic. Details are stored first, then the host runs
    /// status, stock and cart in that order and the first failure stops the
    /// chain. Earlier steps are not rolled back, so a failed stock reduction
    /// leaves the order on hold with its EAN details recorded and the error
    /// returned to the caller.
    pub fn process_payment(
        &self,
        order_id: OrderId,
        submission: Option<&EanSubmission>,
    ) -> Result<PaymentOutcome, GatewayError> {
        if !self.is_available() {
            return Err(GatewayError::Disabled);
        }

        let ean = check_submission(submission).inspect_err(|err| {
            tracing::debug!(%order_id, code = err.code(), "EAN payment refused");
        })?;

        // check_submission only succeeds for a present submission.
        let meta = submission
            .map(EanPaymentMeta::from_submission)
            .unwrap_or_default();

        self.store.set(order_id, meta).inspect_err(|e| {
            tracing::warn!(%order_id, error = %e, "failed to store EAN payment details");
        })?;

        self.host
            .update_status(order_id, OrderStatus::OnHold, &self.t(ON_HOLD_NOTE))
            .and_then(|_| self.host.reduce_stock(order_id))
            .and_then(|_| self.host.empty_cart(order_id))
            .inspect_err(|e| {
                tracing::warn!(%order_id, error = %e, "order host rejected EAN checkout step");
            })?;

        tracing::info!(%order_id, ean = %ean, "EAN payment placed on hold");

        Ok(PaymentOutcome {
            result: PaymentResult::Success,
            redirect: self.host.return_url(order_id),
        })
    }

    /// Stored details for an order, if any were recorded.
    pub fn payment_meta(&self, order_id: OrderId) -> DomainResult<Option<EanPaymentMeta>> {
        Ok(self.store.get(order_id)?.filter(|m| !m.is_empty()))
    }

    /// "EAN Details" block for the admin order page, `None` without details.
    pub fn admin_order_details(&self, order_id: OrderId) -> Result<Option<String>, GatewayError> {
        let Some(meta) = self.payment_meta(order_id)? else {
            return Ok(None);
        };
        Ok(Some(
            self.renderer
                .admin_details(&meta, self.translator.as_ref())?,
        ))
    }

    /// "EAN Information" email section, `None` without details.
    pub fn email_instructions(
        &self,
        order_id: OrderId,
        plain_text: bool,
    ) -> Result<Option<String>, GatewayError> {
        let Some(meta) = self.payment_meta(order_id)? else {
            return Ok(None);
        };
        Ok(Some(self.renderer.email(
            &meta,
            plain_text,
            self.translator.as_ref(),
        )?))
    }

    fn t(&self, text: &str) -> String {
        self.translator.translate(text, TEXT_DOMAIN)
    }
}
