//! Storefront collaborators: order lifecycle and checkout notices.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eanpay_core::{DomainError, DomainResult, OrderId};

/// Order status as far as this payment method is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    /// Payment is expected out of band (the EAN invoice).
    OnHold,
}

/// The storefront's order operations used by the gateway.
pub trait OrderHost: Send + Sync {
    fn update_status(&self, order_id: OrderId, status: OrderStatus, note: &str)
    -> DomainResult<()>;
    fn reduce_stock(&self, order_id: OrderId) -> DomainResult<()>;
    fn empty_cart(&self, order_id: OrderId) -> DomainResult<()>;
    /// Where the buyer lands after checkout.
    fn return_url(&self, order_id: OrderId) -> String;
}

impl<H> OrderHost for Arc<H>
where
    H: OrderHost + ?Sized,
{
    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        note: &str,
    ) -> DomainResult<()> {
        (**self).update_status(order_id, status, note)
    }

    fn reduce_stock(&self, order_id: OrderId) -> DomainResult<()> {
        (**self).reduce_stock(order_id)
    }

    fn empty_cart(&self, order_id: OrderId) -> DomainResult<()> {
        (**self).empty_cart(order_id)
    }

    fn return_url(&self, order_id: OrderId) -> String {
        (**self).return_url(order_id)
    }
}

/// One status transition with the note that came with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub note: String,
    pub changed_at: DateTime<Utc>,
}

/// What the in-memory host remembers about an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub status: OrderStatus,
    pub history: Vec<StatusChange>,
    pub stock_reductions: u32,
    pub cart_emptied: bool,
}

impl Default for OrderRecord {
    fn default() -> Self {
        Self {
            status: OrderStatus::Pending,
            history: Vec::new(),
            stock_reductions: 0,
            cart_emptied: false,
        }
    }
}

/// In-memory order host for tests/dev.
#[derive(Debug)]
pub struct InMemoryOrderHost {
    base_url: String,
    orders: RwLock<HashMap<OrderId, OrderRecord>>,
}

impl InMemoryOrderHost {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            orders: RwLock::new(HashMap::new()),
        }
    }

    pub fn order(&self, order_id: OrderId) -> Option<OrderRecord> {
        self.orders.read().ok()?.get(&order_id).cloned()
    }

    fn with_order<T>(
        &self,
        order_id: OrderId,
        f: impl FnOnce(&mut OrderRecord) -> T,
    ) -> DomainResult<T> {
        let mut map = self
            .orders
            .write()
            .map_err(|_| DomainError::host("order host lock poisoned"))?;
        Ok(f(map.entry(order_id).or_default()))
    }
}

impl OrderHost for InMemoryOrderHost {
    fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
        note: &str,
    ) -> DomainResult<()> {
        self.with_order(order_id, |order| {
            order.status = status;
            order.history.push(StatusChange {
                status,
                note: note.to_string(),
                changed_at: Utc::now(),
            });
        })
    }

    fn reduce_stock(&self, order_id: OrderId) -> DomainResult<()> {
        self.with_order(order_id, |order| order.stock_reductions += 1)
    }

    fn empty_cart(&self, order_id: OrderId) -> DomainResult<()> {
        self.with_order(order_id, |order| order.cart_emptied = true)
    }

    fn return_url(&self, order_id: OrderId) -> String {
        format!("{}/checkout/order-received/{}", self.base_url, order_id)
    }
}

/// Severity of a checkout notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Error,
    Success,
    Notice,
}

/// A message shown to the buyer on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Receives buyer-facing notices raised during checkout.
pub trait NoticeSink {
    fn add_notice(&mut self, message: String, kind: NoticeKind);
}

/// Notices collected for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Notices(Vec<Notice>);

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.0.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Notice> {
        self.0.iter().filter(|n| n.kind == NoticeKind::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl NoticeSink for Notices {
    fn add_notice(&mut self, message: String, kind: NoticeKind) {
        self.0.push(Notice { kind, message });
    }
}
