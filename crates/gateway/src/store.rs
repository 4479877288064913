//! Order metadata storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use eanpay_core::{DomainError, DomainResult, OrderId};

use crate::meta::EanPaymentMeta;

/// Key/value store for the EAN metadata attached to an order.
///
/// Owned by the storefront in production; the in-memory implementation below
/// backs tests and the dev server. Last write wins.
pub trait OrderMetaStore: Send + Sync {
    fn set(&self, order_id: OrderId, meta: EanPaymentMeta) -> DomainResult<()>;
    fn get(&self, order_id: OrderId) -> DomainResult<Option<EanPaymentMeta>>;
}

impl<S> OrderMetaStore for Arc<S>
where
    S: OrderMetaStore + ?Sized,
{
    fn set(&self, order_id: OrderId, meta: EanPaymentMeta) -> DomainResult<()> {
        (**self).set(order_id, meta)
    }

    fn get(&self, order_id: OrderId) -> DomainResult<Option<EanPaymentMeta>> {
        (**self).get(order_id)
    }
}

/// In-memory metadata store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrderMetaStore {
    inner: RwLock<HashMap<OrderId, EanPaymentMeta>>,
}

impl InMemoryOrderMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderMetaStore for InMemoryOrderMetaStore {
    fn set(&self, order_id: OrderId, meta: EanPaymentMeta) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::host("order meta store lock poisoned"))?;
        map.insert(order_id, meta);
        Ok(())
    }

    fn get(&self, order_id: OrderId) -> DomainResult<Option<EanPaymentMeta>> {
        let map = self
            .inner
            .read()
            .map_err(|_| DomainError::host("order meta store lock poisoned"))?;
        Ok(map.get(&order_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(ean: &str) -> EanPaymentMeta {
        EanPaymentMeta {
            ean_num: Some(ean.to_string()),
            ..EanPaymentMeta::default()
        }
    }

    #[test]
    fn get_returns_none_for_unknown_order() {
        let store = InMemoryOrderMetaStore::new();
        assert_eq!(store.get(OrderId::new()).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn set_then_get_is_keyed_by_order() {
        let store = InMemoryOrderMetaStore::new();
        let a = OrderId::new();
        let b = OrderId::new();

        store.set(a, meta("4006381333931")).unwrap();

        assert_eq!(store.get(a).unwrap(), Some(meta("4006381333931")));
        assert_eq!(store.get(b).unwrap(), None);
    }

    #[test]
    fn last_write_wins() {
        let store = Arc::new(InMemoryOrderMetaStore::new());
        let id = OrderId::new();

        store.set(id, meta("4006381333931")).unwrap();
        store.set(id, meta("5901234123457")).unwrap();

        assert_eq!(store.get(id).unwrap(), Some(meta("5901234123457")));
        assert_eq!(store.len(), 1);
    }
}
