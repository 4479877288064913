//! EAN checkout payment method.
//!
//! Collects an EAN plus two reference fields at checkout, validates the EAN,
//! stores the fields against the order and renders them for the store admin
//! and the buyer's confirmation email. Everything the storefront owns (order
//! status, stock, cart, notices, translations) is reached through the
//! collaborator traits in [`host`] and [`store`].

pub mod gateway;
pub mod host;
pub mod i18n;
pub mod meta;
pub mod render;
pub mod settings;
pub mod store;
pub mod submission;

pub use gateway::{EanPaymentGateway, GatewayError, PaymentOutcome, PaymentResult};
pub use host::{
    InMemoryOrderHost, Notice, NoticeKind, NoticeSink, Notices, OrderHost, OrderRecord,
    OrderStatus, StatusChange,
};
pub use i18n::{CatalogTranslator, IdentityTranslator, TEXT_DOMAIN, Translator};
pub use meta::{EanPaymentMeta, sanitize_text_field};
pub use render::Renderer;
pub use settings::{FieldType, FormField, GatewaySettings};
pub use store::{InMemoryOrderMetaStore, OrderMetaStore};
pub use submission::{EanSubmission, SubmissionError, check_submission};
