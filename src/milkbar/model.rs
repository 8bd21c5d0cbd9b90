use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub unit: String,
    pub stock: f64,
    pub date_added: DateTime<Utc>,
}

impl Product {
    pub fn new(id: u32, name: String, price: f64, unit: String, stock: f64) -> Self {
        Self {
            id,
            name,
            price,
            unit,
            stock,
            date_added: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u32,
    pub name: String,
    pub phone: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl Client {
    pub fn new(id: u32, name: String, phone: Option<String>) -> Self {
        Self {
            id,
            name,
            phone,
            date_added: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: u32,
    pub name: String,
    pub phone: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl Supplier {
    pub fn new(id: u32, name: String, phone: Option<String>) -> Self {
        Self {
            id,
            name,
            phone,
            date_added: Utc::now(),
        }
    }
}

/// One product/quantity/price entry within a sale. The unit price is captured
/// at sale time and never recomputed from the current product price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_id: u32,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total: f64,
}

impl SaleItem {
    pub fn new(product_id: u32, quantity: f64, price_per_unit: f64) -> Self {
        Self {
            product_id,
            quantity,
            price_per_unit,
            total: quantity * price_per_unit,
        }
    }
}

/// A sale with `client_id: None` is an anonymous walk-in sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: u32,
    pub client_id: Option<u32>,
    pub items: Vec<SaleItem>,
    pub total_amount: f64,
    pub date: DateTime<Utc>,
}

impl Sale {
    pub fn new(id: u32, client_id: Option<u32>, items: Vec<SaleItem>) -> Self {
        let total_amount = items.iter().map(|it| it.total).sum();
        Self {
            id,
            client_id,
            items,
            total_amount,
            date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: u32,
    pub supplier_id: u32,
    pub product_id: u32,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total_cost: f64,
    pub date: DateTime<Utc>,
}

impl Delivery {
    pub fn new(id: u32, supplier_id: u32, product_id: u32, quantity: f64, price_per_unit: f64) -> Self {
        Self {
            id,
            supplier_id,
            product_id,
            quantity,
            price_per_unit,
            total_cost: quantity * price_per_unit,
            date: Utc::now(),
        }
    }
}

/// The full in-memory snapshot of all five collections. This is also the
/// on-disk schema: top-level keys `products`, `clients`, `suppliers`,
/// `deliveries`, `sales`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub clients: Vec<Client>,
    pub suppliers: Vec<Supplier>,
    pub deliveries: Vec<Delivery>,
    pub sales: Vec<Sale>,
}

impl Dataset {
    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: u32) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn client(&self, id: u32) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn client_mut(&mut self, id: u32) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.id == id)
    }

    pub fn supplier(&self, id: u32) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn supplier_mut(&mut self, id: u32) -> Option<&mut Supplier> {
        self.suppliers.iter_mut().find(|s| s.id == id)
    }

    pub fn delivery(&self, id: u32) -> Option<&Delivery> {
        self.deliveries.iter().find(|d| d.id == id)
    }

    pub fn sale(&self, id: u32) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    pub fn next_product_id(&self) -> u32 {
        next_id(self.products.iter().map(|p| p.id))
    }

    pub fn next_client_id(&self) -> u32 {
        next_id(self.clients.iter().map(|c| c.id))
    }

    pub fn next_supplier_id(&self) -> u32 {
        next_id(self.suppliers.iter().map(|s| s.id))
    }

    pub fn next_delivery_id(&self) -> u32 {
        next_id(self.deliveries.iter().map(|d| d.id))
    }

    pub fn next_sale_id(&self) -> u32 {
        next_id(self.sales.iter().map(|s| s.id))
    }

    /// Name of the collection holding a live reference to the product, if any.
    pub fn product_referenced_by(&self, id: u32) -> Option<&'static str> {
        if self.deliveries.iter().any(|d| d.product_id == id) {
            return Some("deliveries");
        }
        if self
            .sales
            .iter()
            .any(|s| s.items.iter().any(|it| it.product_id == id))
        {
            return Some("sales");
        }
        None
    }

    pub fn client_referenced_by(&self, id: u32) -> Option<&'static str> {
        if self.sales.iter().any(|s| s.client_id == Some(id)) {
            return Some("sales");
        }
        None
    }

    pub fn supplier_referenced_by(&self, id: u32) -> Option<&'static str> {
        if self.deliveries.iter().any(|d| d.supplier_id == id) {
            return Some("deliveries");
        }
        None
    }
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().unwrap_or(0) + 1
}
