//! In-memory record store for tests and offline use

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use super::{Keyed, RecordStore};
use crate::partners::Partner;
use crate::products::Product;
use crate::Result;

/// Record store held entirely in memory
///
/// Records are kept in insertion order; each record type applies its own
/// listing order and conflict rule.
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
    next_id: AtomicU64,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MemoryStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Keyed + Clone> MemoryStore<R> {
    async fn remove_key(&self, key: &R::Key) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.key().as_ref() != Some(key));
        records.len() != before
    }

    async fn find_key(&self, key: &R::Key) -> Option<R> {
        let records = self.records.read().await;
        records.iter().find(|r| r.key().as_ref() == Some(key)).cloned()
    }
}

#[async_trait]
impl RecordStore<Partner> for MemoryStore<Partner> {
    async fn list(&self) -> Result<Vec<Partner>> {
        let mut partners = self.records.read().await.clone();
        partners.sort_by(|a, b| a.role.cmp(&b.role).then_with(|| a.name.cmp(&b.name)));
        Ok(partners)
    }

    /// Partners conflict on `(role, gln)`; the stored id is kept on update
    async fn upsert(&self, mut partner: Partner) -> Result<()> {
        let mut records = self.records.write().await;

        if let Some(existing) = records
            .iter_mut()
            .find(|p| p.role == partner.role && p.gln == partner.gln)
        {
            partner.id = existing.id;
            *existing = partner;
            return Ok(());
        }

        partner.id = Some(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!("Stored partner {:?} as {}", partner.name, partner.role);
        records.push(partner);
        Ok(())
    }

    async fn delete(&self, id: &u64) -> Result<bool> {
        Ok(self.remove_key(id).await)
    }

    async fn get_by_key(&self, id: &u64) -> Result<Option<Partner>> {
        Ok(self.find_key(id).await)
    }
}

#[async_trait]
impl RecordStore<Product> for MemoryStore<Product> {
    /// Newest first
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.records.read().await.iter().rev().cloned().collect())
    }

    /// Products conflict on GTIN; an update keeps the original position
    async fn upsert(&self, product: Product) -> Result<()> {
        let mut records = self.records.write().await;

        match records.iter_mut().find(|p| p.gtin == product.gtin) {
            Some(existing) => *existing = product,
            None => {
                debug!("Stored product {}", product.gtin);
                records.push(product);
            }
        }
        Ok(())
    }

    async fn delete(&self, gtin: &String) -> Result<bool> {
        Ok(self.remove_key(gtin).await)
    }

    async fn get_by_key(&self, gtin: &String) -> Result<Option<Product>> {
        Ok(self.find_key(gtin).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partners::PartnerRole;

    #[tokio::test]
    async fn test_partner_upsert_conflicts_on_role_and_gln() {
        let store = MemoryStore::<Partner>::new();
        store
            .upsert(Partner::new(PartnerRole::SoldBy, "Acme", "0614141000005"))
            .await
            .unwrap();
        store
            .upsert(Partner::new(PartnerRole::SoldBy, "Acme Pharma", "0614141000005"))
            .await
            .unwrap();
        store
            .upsert(Partner::new(PartnerRole::ShipTo, "Acme", "0614141000005"))
            .await
            .unwrap();

        let partners = store.list().await.unwrap();
        assert_eq!(partners.len(), 2);
        // ship_to sorts before sold_by
        assert_eq!(partners[0].role, PartnerRole::ShipTo);
        assert_eq!(partners[1].name, "Acme Pharma");
        assert_eq!(partners[1].id, Some(1));
        assert_eq!(partners[0].id, Some(2));
    }

    #[tokio::test]
    async fn test_partner_delete_and_get() {
        let store = MemoryStore::<Partner>::new();
        store
            .upsert(Partner::new(PartnerRole::ShipFrom, "Depot", "0614141000012"))
            .await
            .unwrap();

        assert_eq!(store.get_by_key(&1).await.unwrap().map(|p| p.name), Some("Depot".to_string()));
        assert!(store.delete(&1).await.unwrap());
        assert!(!store.delete(&1).await.unwrap());
        assert!(store.get_by_key(&1).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_products_newest_first_and_replace_in_place() {
        let store = MemoryStore::<Product>::new();
        store.upsert(Product::new("00312345678906")).await.unwrap();
        store.upsert(Product::new("00312345678913")).await.unwrap();
        store
            .upsert(Product::new("00312345678906").with_ndc("0312-3456-78"))
            .await
            .unwrap();

        let products = store.list().await.unwrap();
        let gtins: Vec<&str> = products.iter().map(|p| p.gtin.as_str()).collect();
        assert_eq!(gtins, ["00312345678913", "00312345678906"]);
        assert_eq!(products[1].ndc.as_deref(), Some("0312-3456-78"));
        assert_eq!(store.len().await, 2);

        let key = "00312345678913".to_string();
        assert!(store.get_by_key(&key).await.unwrap().is_some());
        assert!(store.delete(&key).await.unwrap());
        assert!(store.get_by_key(&key).await.unwrap().is_none());
    }
}
