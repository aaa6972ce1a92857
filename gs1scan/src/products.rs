//! Product catalog keyed by GTIN
//!
//! Maps a scanned GTIN to the NDC and descriptive fields a DSCSA export
//! needs.

#[cfg(feature = "async")]
use log::{debug, error, warn};

#[cfg(feature = "async")]
use crate::store::{Keyed, RecordStore};
#[cfg(feature = "async")]
use crate::Result;

/// Product master data for one GTIN
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    pub gtin: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ndc: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub product_description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub proprietary_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strength: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dosage_form: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub container_size: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub manufacturer: Option<String>,
}

impl Product {
    /// Create a product with only its GTIN set
    pub fn new(gtin: impl Into<String>) -> Self {
        Self {
            gtin: gtin.into(),
            ..Self::default()
        }
    }

    /// Set the National Drug Code
    pub fn with_ndc(mut self, ndc: impl Into<String>) -> Self {
        self.ndc = Some(ndc.into());
        self
    }

    /// Set the product description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.product_description = Some(description.into());
        self
    }

    /// Set the proprietary (brand) name
    pub fn with_proprietary_name(mut self, name: impl Into<String>) -> Self {
        self.proprietary_name = Some(name.into());
        self
    }

    /// Set the manufacturer name
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Case-insensitive match against GTIN, NDC, description, proprietary name and manufacturer
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&query);

        contains(self.gtin.as_str())
            || [
                &self.ndc,
                &self.product_description,
                &self.proprietary_name,
                &self.manufacturer,
            ]
            .into_iter()
            .flatten()
            .any(|field| contains(field.as_str()))
    }
}

#[cfg(feature = "async")]
impl Keyed for Product {
    type Key = String;

    fn key(&self) -> Option<String> {
        Some(self.gtin.clone())
    }
}

/// Cached view over a product store
#[cfg(feature = "async")]
pub struct ProductCatalog<S> {
    store: S,
    products: Vec<Product>,
    loaded: bool,
}

#[cfg(feature = "async")]
impl<S: RecordStore<Product>> ProductCatalog<S> {
    /// Create an empty, unloaded catalog over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            products: Vec::new(),
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

    /// Reload the cache from the store
    pub async fn load(&mut self) -> Result<&[Product]> {
        self.products = self
            .store
            .list()
            .await
            .inspect_err(|e| error!("Error loading products: {e}"))?;
        self.loaded = true;
        debug!("Loaded {} product(s)", self.products.len());
        Ok(&self.products)
    }

    /// Add or update the product for its GTIN
    pub async fn add(&mut self, product: Product) -> Result<()> {
        self.store
            .upsert(product)
            .await
            .inspect_err(|e| error!("Error adding product: {e}"))?;
        self.load().await?;
        Ok(())
    }

    /// Remove the product at `index`; `false` when out of range
    pub async fn remove(&mut self, index: usize) -> Result<bool> {
        let Some(gtin) = self.products.get(index).map(|p| p.gtin.clone()) else {
            return Ok(false);
        };
        self.remove_by_gtin(&gtin).await
    }

    /// Remove the product with `gtin`; `false` when the store had none
    pub async fn remove_by_gtin(&mut self, gtin: &str) -> Result<bool> {
        let removed = self
            .store
            .delete(&gtin.to_string())
            .await
            .inspect_err(|e| error!("Error removing product: {e}"))?;
        self.load().await?;
        Ok(removed)
    }

    /// Cached products in store order
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Product at `index` in the cached list
    pub fn get_by_index(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Fetch a product straight from the store
    ///
    /// Store failures are logged and reported as not found.
    pub async fn get_by_gtin(&self, gtin: &str) -> Option<Product> {
        match self.store.get_by_key(&gtin.to_string()).await {
            Ok(product) => product,
            Err(e) => {
                warn!("Error fetching product {gtin}: {e}");
                None
            }
        }
    }

    /// Cached products matching `query`; an empty query returns everything
    pub fn search(&self, query: &str) -> Vec<&Product> {
        if query.is_empty() {
            return self.products.iter().collect();
        }
        self.products.iter().filter(|p| p.matches(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "async")]
    use crate::store::MemoryStore;

    #[cfg(feature = "async")]
    fn catalog() -> ProductCatalog<MemoryStore<Product>> {
        ProductCatalog::new(MemoryStore::<Product>::new())
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_add_list_and_lookup() {
        let mut catalog = catalog();
        catalog
            .add(Product::new("00312345678906").with_ndc("0312-3456-78").with_description("Amoxicillin 500mg"))
            .await
            .unwrap();
        catalog.add(Product::new("00312345678913")).await.unwrap();

        assert!(catalog.is_loaded());
        assert_eq!(catalog.list().len(), 2);
        assert_eq!(catalog.get_by_index(0).map(|p| p.gtin.as_str()), Some("00312345678913"));

        let found = catalog.get_by_gtin("00312345678906").await.unwrap();
        assert_eq!(found.ndc.as_deref(), Some("0312-3456-78"));
        assert!(catalog.get_by_gtin("99999999999999").await.is_none());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_remove() {
        let mut catalog = catalog();
        catalog.add(Product::new("00312345678906")).await.unwrap();
        catalog.add(Product::new("00312345678913")).await.unwrap();

        assert!(!catalog.remove(9).await.unwrap());
        assert!(catalog.remove(0).await.unwrap());
        assert_eq!(catalog.list().len(), 1);
        assert_eq!(catalog.list()[0].gtin, "00312345678906");

        assert!(catalog.remove_by_gtin("00312345678906").await.unwrap());
        assert!(catalog.list().is_empty());
        assert!(!catalog.remove_by_gtin("00312345678906").await.unwrap());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_search() {
        let mut catalog = catalog();
        catalog
            .add(Product::new("00312345678906").with_manufacturer("Contoso Labs"))
            .await
            .unwrap();
        catalog
            .add(Product::new("00998877665544").with_proprietary_name("Relievex").with_ndc("1234-5678-90"))
            .await
            .unwrap();

        assert_eq!(catalog.search("").len(), 2);
        assert_eq!(catalog.search("CONTOSO")[0].gtin, "00312345678906");
        assert_eq!(catalog.search("relie")[0].gtin, "00998877665544");
        assert_eq!(catalog.search("1234-56").len(), 1);
        assert_eq!(catalog.search("0031").len(), 1);
        assert!(catalog.search("nothing").is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_product_json_tolerates_missing_fields() {
        let product: Product =
            serde_json::from_str(r#"{"gtin":"00312345678906","ndc":null,"strength":"500 mg"}"#).unwrap();
        assert_eq!(product.gtin, "00312345678906");
        assert_eq!(product.ndc, None);
        assert_eq!(product.strength.as_deref(), Some("500 mg"));
        assert_eq!(product.manufacturer, None);
    }
}
