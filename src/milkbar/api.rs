//! # API Facade
//!
//! [`MilkbarApi`] is a thin facade over the command layer and the single
//! entry point for any UI client. It dispatches, it does not decide: business
//! logic lives in `commands/*.rs`, presentation stays with the caller. The
//! facade is generic over [`DataStore`], so the same methods run against
//! `FileStore` in production and `InMemoryStore` in tests.

use crate::commands;
use crate::error::Result;
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub struct MilkbarApi<S: DataStore> {
    store: S,
    data_dir: PathBuf,
}

impl<S: DataStore> MilkbarApi<S> {
    pub fn new(store: S, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // --- Products ---

    pub fn add_product(
        &mut self,
        name: String,
        price: f64,
        unit: String,
        stock: f64,
    ) -> Result<commands::CmdResult> {
        commands::products::add(&mut self.store, name, price, unit, stock)
    }

    pub fn list_products(&self) -> Result<commands::CmdResult> {
        commands::products::list(&self.store)
    }

    pub fn update_product(
        &mut self,
        id: u32,
        update: commands::ProductUpdate,
    ) -> Result<commands::CmdResult> {
        commands::products::update(&mut self.store, id, update)
    }

    pub fn remove_product(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::products::remove(&mut self.store, id)
    }

    // --- Clients ---

    pub fn add_client(
        &mut self,
        name: String,
        phone: Option<String>,
    ) -> Result<commands::CmdResult> {
        commands::clients::add(&mut self.store, name, phone)
    }

    pub fn list_clients(&self) -> Result<commands::CmdResult> {
        commands::clients::list(&self.store)
    }

    pub fn update_client(
        &mut self,
        id: u32,
        update: commands::ContactUpdate,
    ) -> Result<commands::CmdResult> {
        commands::clients::update(&mut self.store, id, update)
    }

    pub fn remove_client(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::clients::remove(&mut self.store, id)
    }

    // --- Suppliers ---

    pub fn add_supplier(
        &mut self,
        name: String,
        phone: Option<String>,
    ) -> Result<commands::CmdResult> {
        commands::suppliers::add(&mut self.store, name, phone)
    }

    pub fn list_suppliers(&self) -> Result<commands::CmdResult> {
        commands::suppliers::list(&self.store)
    }

    pub fn update_supplier(
        &mut self,
        id: u32,
        update: commands::ContactUpdate,
    ) -> Result<commands::CmdResult> {
        commands::suppliers::update(&mut self.store, id, update)
    }

    pub fn remove_supplier(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::suppliers::remove(&mut self.store, id)
    }

    // --- Deliveries ---

    pub fn record_delivery(
        &mut self,
        supplier_id: u32,
        product_id: u32,
        quantity: f64,
        price_per_unit: f64,
    ) -> Result<commands::CmdResult> {
        commands::deliveries::record(&mut self.store, supplier_id, product_id, quantity, price_per_unit)
    }

    pub fn list_deliveries(&self) -> Result<commands::CmdResult> {
        commands::deliveries::list(&self.store)
    }

    pub fn remove_delivery(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::deliveries::remove(&mut self.store, id)
    }

    // --- Sales ---

    pub fn record_sale(
        &mut self,
        client_id: Option<u32>,
        lines: &[commands::sales::SaleLine],
    ) -> Result<commands::CmdResult> {
        commands::sales::record(&mut self.store, client_id, lines)
    }

    pub fn list_sales(&self) -> Result<commands::CmdResult> {
        commands::sales::list(&self.store)
    }

    pub fn remove_sale(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::sales::remove(&mut self.store, id)
    }

    // --- Reports ---

    pub fn summary(&self) -> Result<commands::CmdResult> {
        commands::reports::summary(&self.store)
    }

    pub fn revenue(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<commands::CmdResult> {
        commands::reports::revenue(&self.store, from, to)
    }

    pub fn low_stock(&self, threshold: f64) -> Result<commands::CmdResult> {
        commands::reports::low_stock(&self.store, threshold)
    }

    pub fn client_history(&self, client_id: u32) -> Result<commands::CmdResult> {
        commands::reports::client_history(&self.store, client_id)
    }

    pub fn supplier_history(&self, supplier_id: u32) -> Result<commands::CmdResult> {
        commands::reports::supplier_history(&self.store, supplier_id)
    }

    pub fn top_products(&self, n: usize) -> Result<commands::CmdResult> {
        commands::reports::top_products(&self.store, n)
    }

    // --- Utilities ---

    pub fn seed(&mut self) -> Result<commands::CmdResult> {
        commands::seed::run(&mut self.store)
    }

    pub fn export(&self, out_dir: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, out_dir)
    }

    pub fn backup(&self, out_dir: &Path) -> Result<commands::CmdResult> {
        commands::backup::run(&self.store, out_dir)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::sales::SaleLine;
pub use commands::{
    CmdMessage, CmdResult, ContactUpdate, DeliveryView, MessageLevel, ProductUpdate, SaleLineView,
    SaleView,
};
