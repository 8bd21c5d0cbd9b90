use crate::config::MilkbarConfig;
use crate::model::{Client, Delivery, Product, Sale, Supplier};

pub mod backup;
pub mod clients;
pub mod config;
pub mod deliveries;
pub mod export;
pub mod helpers;
pub mod products;
pub mod reports;
pub mod sales;
pub mod seed;
pub mod suppliers;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A delivery together with the names a human needs to read it.
#[derive(Debug, Clone)]
pub struct DeliveryView {
    pub delivery: Delivery,
    pub supplier: String,
    pub product: String,
    pub unit: String,
}

/// A sale with its client name and per-line product names resolved.
#[derive(Debug, Clone)]
pub struct SaleView {
    pub sale: Sale,
    pub client: String,
    pub lines: Vec<SaleLineView>,
}

#[derive(Debug, Clone)]
pub struct SaleLineView {
    pub product: String,
    pub unit: String,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total: f64,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub products: Vec<Product>,
    pub clients: Vec<Client>,
    pub suppliers: Vec<Supplier>,
    pub deliveries: Vec<DeliveryView>,
    pub sales: Vec<SaleView>,
    pub top_products: Vec<reports::ProductSales>,
    pub summary: Option<reports::Summary>,
    pub revenue: Option<f64>,
    pub config: Option<MilkbarConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = clients;
        self
    }

    pub fn with_suppliers(mut self, suppliers: Vec<Supplier>) -> Self {
        self.suppliers = suppliers;
        self
    }

    pub fn with_deliveries(mut self, deliveries: Vec<DeliveryView>) -> Self {
        self.deliveries = deliveries;
        self
    }

    pub fn with_sales(mut self, sales: Vec<SaleView>) -> Self {
        self.sales = sales;
        self
    }

    pub fn with_summary(mut self, summary: reports::Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_config(mut self, config: MilkbarConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Field-wise product update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub stock: Option<f64>,
}

/// Field-wise update shared by clients and suppliers.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}
