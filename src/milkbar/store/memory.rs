use super::DataStore;
use crate::error::Result;
use crate::model::Dataset;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    data: Dataset,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Dataset> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &Dataset) -> Result<()> {
        self.data = data.clone();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::MilkbarError;
    use crate::model::{Client, Product, Supplier};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_product(mut self, name: &str, price: f64, unit: &str, stock: f64) -> Self {
            let mut data = self.store.load().unwrap();
            let id = data.next_product_id();
            data.products
                .push(Product::new(id, name.to_string(), price, unit.to_string(), stock));
            self.store.save(&data).unwrap();
            self
        }

        pub fn with_client(mut self, name: &str) -> Self {
            let mut data = self.store.load().unwrap();
            let id = data.next_client_id();
            data.clients.push(Client::new(id, name.to_string(), None));
            self.store.save(&data).unwrap();
            self
        }

        pub fn with_supplier(mut self, name: &str) -> Self {
            let mut data = self.store.load().unwrap();
            let id = data.next_supplier_id();
            data.suppliers.push(Supplier::new(id, name.to_string(), None));
            self.store.save(&data).unwrap();
            self
        }
    }

    /// Store whose `save` always fails, for asserting that durability errors
    /// reach the caller instead of being swallowed.
    #[derive(Default)]
    pub struct BrokenStore {
        pub data: Dataset,
    }

    impl DataStore for BrokenStore {
        fn load(&self) -> Result<Dataset> {
            Ok(self.data.clone())
        }

        fn save(&mut self, _data: &Dataset) -> Result<()> {
            Err(MilkbarError::Store("disk full".to_string()))
        }
    }
}
