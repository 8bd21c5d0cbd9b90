//! Read-only aggregations over the current dataset. Every function loads a
//! fresh snapshot and recomputes from scratch; at a single shop's volumes
//! there is nothing worth caching.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MilkbarError, Result};
use crate::model::Dataset;
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::helpers::{delivery_view, sale_view};

/// Quantity sold of one product, for the summary and top-products views.
#[derive(Debug, Clone)]
pub struct ProductSales {
    pub product_id: u32,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
}

#[derive(Debug, Clone)]
pub struct ClientRevenue {
    pub name: String,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub product_count: usize,
    pub client_count: usize,
    pub supplier_count: usize,
    pub total_sales: f64,
    pub total_delivery_costs: f64,
    pub profit: f64,
    pub quantities_sold: Vec<ProductSales>,
    pub top_clients: Vec<ClientRevenue>,
}

pub fn summary<S: DataStore>(store: &S) -> Result<CmdResult> {
    let data = store.load()?;

    let total_sales: f64 = data.sales.iter().map(|s| s.total_amount).sum();
    let total_delivery_costs: f64 = data.deliveries.iter().map(|d| d.total_cost).sum();

    let sold = quantities_by_product(&data);
    let quantities_sold = data
        .products
        .iter()
        .filter_map(|p| {
            sold.get(&p.id).map(|qty| ProductSales {
                product_id: p.id,
                name: p.name.clone(),
                unit: p.unit.clone(),
                quantity: *qty,
            })
        })
        .collect();

    let mut revenue_by_client: HashMap<u32, f64> = HashMap::new();
    for sale in &data.sales {
        if let Some(client_id) = sale.client_id {
            *revenue_by_client.entry(client_id).or_insert(0.0) += sale.total_amount;
        }
    }
    let mut top_clients: Vec<ClientRevenue> = revenue_by_client
        .into_iter()
        .filter_map(|(id, total)| {
            data.client(id).map(|c| ClientRevenue {
                name: c.name.clone(),
                total,
            })
        })
        .collect();
    top_clients.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    top_clients.truncate(3);

    let summary = Summary {
        product_count: data.products.len(),
        client_count: data.clients.len(),
        supplier_count: data.suppliers.len(),
        total_sales,
        total_delivery_costs,
        profit: total_sales - total_delivery_costs,
        quantities_sold,
        top_clients,
    };
    Ok(CmdResult::default().with_summary(summary))
}

/// Total sale revenue in `[from, to)`. Open bounds are unbounded.
pub fn revenue<S: DataStore>(
    store: &S,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<CmdResult> {
    let data = store.load()?;
    let total: f64 = data
        .sales
        .iter()
        .filter(|s| from.map_or(true, |f| s.date >= f) && to.map_or(true, |t| s.date < t))
        .map(|s| s.total_amount)
        .sum();

    let mut result = CmdResult::default();
    result.revenue = Some(total);
    Ok(result)
}

/// Products whose stock is strictly below the threshold, lowest first.
pub fn low_stock<S: DataStore>(store: &S, threshold: f64) -> Result<CmdResult> {
    let data = store.load()?;
    let mut products: Vec<_> = data
        .products
        .iter()
        .filter(|p| p.stock < threshold)
        .cloned()
        .collect();
    products.sort_by(|a, b| a.stock.partial_cmp(&b.stock).unwrap_or(Ordering::Equal));

    let mut result = CmdResult::default().with_products(products);
    if result.products.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No products below stock level {}",
            threshold
        )));
    }
    Ok(result)
}

/// One client's sales, newest first.
pub fn client_history<S: DataStore>(store: &S, client_id: u32) -> Result<CmdResult> {
    let data = store.load()?;
    if data.client(client_id).is_none() {
        return Err(MilkbarError::NotFound {
            entity: "client",
            id: client_id,
        });
    }

    let mut sales: Vec<_> = data
        .sales
        .iter()
        .filter(|s| s.client_id == Some(client_id))
        .cloned()
        .collect();
    sales.sort_by(|a, b| b.date.cmp(&a.date));
    let views = sales.iter().map(|s| sale_view(&data, s)).collect();
    Ok(CmdResult::default().with_sales(views))
}

/// One supplier's deliveries, newest first.
pub fn supplier_history<S: DataStore>(store: &S, supplier_id: u32) -> Result<CmdResult> {
    let data = store.load()?;
    if data.supplier(supplier_id).is_none() {
        return Err(MilkbarError::NotFound {
            entity: "supplier",
            id: supplier_id,
        });
    }

    let mut deliveries: Vec<_> = data
        .deliveries
        .iter()
        .filter(|d| d.supplier_id == supplier_id)
        .cloned()
        .collect();
    deliveries.sort_by(|a, b| b.date.cmp(&a.date));
    let views = deliveries.iter().map(|d| delivery_view(&data, d)).collect();
    Ok(CmdResult::default().with_deliveries(views))
}

/// Top `n` products by total quantity sold.
pub fn top_products<S: DataStore>(store: &S, n: usize) -> Result<CmdResult> {
    let data = store.load()?;
    let sold = quantities_by_product(&data);

    let mut ranked: Vec<ProductSales> = data
        .products
        .iter()
        .filter_map(|p| {
            sold.get(&p.id).map(|qty| ProductSales {
                product_id: p.id,
                name: p.name.clone(),
                unit: p.unit.clone(),
                quantity: *qty,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.quantity.partial_cmp(&a.quantity).unwrap_or(Ordering::Equal));
    ranked.truncate(n);

    let mut result = CmdResult::default();
    result.top_products = ranked;
    Ok(result)
}

fn quantities_by_product(data: &Dataset) -> HashMap<u32, f64> {
    let mut sold: HashMap<u32, f64> = HashMap::new();
    for sale in &data.sales {
        for item in &sale.items {
            *sold.entry(item.product_id).or_insert(0.0) += item.quantity;
        }
    }
    sold
}
