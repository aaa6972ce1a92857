//! Trading partner registry
//!
//! Partners are grouped by the role they play on a DSCSA transaction and
//! cached locally; every mutation goes through the store and reloads the
//! cache.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "async")]
use hashbrown::HashMap;
#[cfg(feature = "async")]
use log::{debug, error};

#[cfg(feature = "async")]
use crate::store::{Keyed, RecordStore};
use crate::{Error, Result};

/// Role a partner plays on a transaction
///
/// Variant order matches the alphabetical order of the wire names, which is
/// the order partners are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PartnerRole {
    ShipFrom,
    ShipTo,
    SoldBy,
    SoldTo,
}

impl PartnerRole {
    /// All roles in listing order
    pub const ALL: [PartnerRole; 4] = [
        PartnerRole::ShipFrom,
        PartnerRole::ShipTo,
        PartnerRole::SoldBy,
        PartnerRole::SoldTo,
    ];

    /// Wire name of the role
    pub const fn as_str(&self) -> &'static str {
        match self {
            PartnerRole::ShipFrom => "ship_from",
            PartnerRole::ShipTo => "ship_to",
            PartnerRole::SoldBy => "sold_by",
            PartnerRole::SoldTo => "sold_to",
        }
    }
}

impl fmt::Display for PartnerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartnerRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartnerRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown partner role {s:?}")))
    }
}

/// Trading partner and its Global Location Number
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partner {
    /// Store-assigned id, absent until stored
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<u64>,
    pub role: PartnerRole,
    pub name: String,
    pub gln: String,
}

impl Partner {
    /// Create an unsaved partner
    pub fn new(role: PartnerRole, name: impl Into<String>, gln: impl Into<String>) -> Self {
        Self {
            id: None,
            role,
            name: name.into(),
            gln: gln.into(),
        }
    }
}

#[cfg(feature = "async")]
impl Keyed for Partner {
    type Key = u64;

    fn key(&self) -> Option<u64> {
        self.id
    }
}

/// Cached, role-grouped view over a partner store
#[cfg(feature = "async")]
pub struct PartnerDirectory<S> {
    store: S,
    partners: HashMap<PartnerRole, Vec<Partner>>,
    loaded: bool,
}

#[cfg(feature = "async")]
impl<S: RecordStore<Partner>> PartnerDirectory<S> {
    /// Create an empty, unloaded directory over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            partners: HashMap::new(),
            loaded: false,
        }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the cache has been filled from the store
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reload the cache from the store, grouped by role and sorted by name
    pub async fn load(&mut self) -> Result<&HashMap<PartnerRole, Vec<Partner>>> {
        let partners = self
            .store
            .list()
            .await
            .inspect_err(|e| error!("Error loading partners: {e}"))?;

        let mut grouped: HashMap<PartnerRole, Vec<Partner>> = HashMap::new();
        for partner in partners {
            grouped.entry(partner.role).or_default().push(partner);
        }
        for group in grouped.values_mut() {
            group.sort_by(|a, b| a.name.cmp(&b.name));
        }

        debug!("Loaded partners for {} role(s)", grouped.len());
        self.partners = grouped;
        self.loaded = true;
        Ok(&self.partners)
    }

    /// Add or update the partner for `(role, gln)`
    pub async fn add(
        &mut self,
        role: PartnerRole,
        name: impl Into<String>,
        gln: impl Into<String>,
    ) -> Result<()> {
        self.store
            .upsert(Partner::new(role, name, gln))
            .await
            .inspect_err(|e| error!("Error adding partner: {e}"))?;
        self.load().await?;
        Ok(())
    }

    /// Remove the partner at `index` in the role's list
    ///
    /// Returns `false` when the index is out of range or the partner was
    /// never stored.
    pub async fn remove(&mut self, role: PartnerRole, index: usize) -> Result<bool> {
        let Some(id) = self.get_by_index(role, index).and_then(|p| p.id) else {
            return Ok(false);
        };

        self.store
            .delete(&id)
            .await
            .inspect_err(|e| error!("Error removing partner: {e}"))?;
        self.load().await?;
        Ok(true)
    }

    /// Partners for one role, empty when none are known
    pub fn list(&self, role: PartnerRole) -> &[Partner] {
        self.partners.get(&role).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every cached partner, grouped by role
    pub fn all(&self) -> &HashMap<PartnerRole, Vec<Partner>> {
        &self.partners
    }

    /// Partner at `index` in the role's list
    pub fn get_by_index(&self, role: PartnerRole, index: usize) -> Option<&Partner> {
        self.list(role).get(index)
    }

    /// Roles that currently have partners, in listing order
    pub fn roles(&self) -> Vec<PartnerRole> {
        let mut roles: Vec<PartnerRole> = self.partners.keys().copied().collect();
        roles.sort();
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "async")]
    use crate::store::MemoryStore;

    #[test]
    fn test_role_names() {
        assert_eq!("sold_to".parse::<PartnerRole>().unwrap(), PartnerRole::SoldTo);
        assert_eq!(PartnerRole::ShipFrom.to_string(), "ship_from");
        assert!("buyer".parse::<PartnerRole>().is_err());

        let mut sorted = PartnerRole::ALL;
        sorted.sort_by_key(|role| role.as_str());
        assert_eq!(sorted, PartnerRole::ALL);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partner_json() {
        let partner: Partner =
            serde_json::from_str(r#"{"id":7,"role":"ship_to","name":"Clinic","gln":"0614141000029"}"#)
                .unwrap();
        assert_eq!(partner.id, Some(7));
        assert_eq!(partner.role, PartnerRole::ShipTo);

        let json = serde_json::to_value(Partner::new(PartnerRole::SoldBy, "Acme", "1")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "sold_by", "name": "Acme", "gln": "1"}));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_directory_groups_and_sorts() {
        let mut directory = PartnerDirectory::new(MemoryStore::<Partner>::new());
        assert!(!directory.is_loaded());

        directory.add(PartnerRole::SoldTo, "Zeta Clinic", "0000000000017").await.unwrap();
        directory.add(PartnerRole::SoldTo, "Alpha Clinic", "0000000000024").await.unwrap();
        directory.add(PartnerRole::ShipFrom, "Main Depot", "0000000000031").await.unwrap();

        assert!(directory.is_loaded());
        assert_eq!(directory.roles(), [PartnerRole::ShipFrom, PartnerRole::SoldTo]);

        let names: Vec<&str> = directory
            .list(PartnerRole::SoldTo)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Alpha Clinic", "Zeta Clinic"]);
        assert!(directory.list(PartnerRole::SoldBy).is_empty());
        assert_eq!(
            directory.get_by_index(PartnerRole::ShipFrom, 0).map(|p| p.gln.as_str()),
            Some("0000000000031")
        );
        assert!(directory.get_by_index(PartnerRole::ShipFrom, 1).is_none());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_directory_remove() {
        let mut directory = PartnerDirectory::new(MemoryStore::<Partner>::new());
        directory.add(PartnerRole::SoldBy, "Acme", "0000000000017").await.unwrap();
        directory.add(PartnerRole::SoldBy, "Beta", "0000000000024").await.unwrap();

        assert!(!directory.remove(PartnerRole::SoldBy, 5).await.unwrap());
        assert!(!directory.remove(PartnerRole::ShipTo, 0).await.unwrap());
        assert!(directory.remove(PartnerRole::SoldBy, 0).await.unwrap());

        let remaining = directory.list(PartnerRole::SoldBy);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Beta");
        assert_eq!(directory.store().len().await, 1);
    }
}
