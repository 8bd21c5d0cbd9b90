use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MilkbarError, Result};
use crate::model::{Sale, SaleItem};
use crate::store::DataStore;

use super::helpers::{client_name, require_non_negative, require_positive, sale_view};

/// One requested line of a sale. The unit price defaults to the product's
/// current price; an explicit override is captured as-is.
#[derive(Debug, Clone)]
pub struct SaleLine {
    pub product_id: u32,
    pub quantity: f64,
    pub price_per_unit: Option<f64>,
}

/// Record a sale: validate every line, decrement stock, capture unit prices,
/// append the sale, save once. All-or-nothing — a failing line discards the
/// whole working copy, so no stock moves for any line.
pub fn record<S: DataStore>(
    store: &mut S,
    client_id: Option<u32>,
    lines: &[SaleLine],
) -> Result<CmdResult> {
    if lines.is_empty() {
        return Err(MilkbarError::Invalid(
            "A sale needs at least one item".to_string(),
        ));
    }

    let mut data = store.load()?;
    if let Some(id) = client_id {
        if data.client(id).is_none() {
            return Err(MilkbarError::NotFound {
                entity: "client",
                id,
            });
        }
    }

    // Decrementing the working copy as lines are validated makes repeated
    // products in one sale count cumulatively against stock.
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        require_positive(line.quantity, "quantity")?;
        let product = data
            .product_mut(line.product_id)
            .ok_or(MilkbarError::NotFound {
                entity: "product",
                id: line.product_id,
            })?;
        if product.stock < line.quantity {
            return Err(MilkbarError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: line.quantity,
            });
        }
        let price = line.price_per_unit.unwrap_or(product.price);
        require_non_negative(price, "price per unit")?;
        product.stock -= line.quantity;
        items.push(SaleItem::new(line.product_id, line.quantity, price));
    }

    let sale = Sale::new(data.next_sale_id(), client_id, items);
    data.sales.push(sale.clone());
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Sale recorded ({}): {:.2} for {}",
        sale.id,
        sale.total_amount,
        client_name(&data, client_id)
    )));
    result.sales.push(sale_view(&data, &sale));
    Ok(result)
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let data = store.load()?;
    let mut sales = data.sales.clone();
    sales.sort_by(|a, b| b.date.cmp(&a.date));
    let views = sales.iter().map(|s| sale_view(&data, s)).collect();
    Ok(CmdResult::default().with_sales(views))
}

/// Remove a sale and restore each sold quantity to its product's stock.
pub fn remove<S: DataStore>(store: &mut S, id: u32) -> Result<CmdResult> {
    let mut data = store.load()?;
    let sale = data.sale(id).cloned().ok_or(MilkbarError::NotFound {
        entity: "sale",
        id,
    })?;

    for item in &sale.items {
        let product = data
            .product_mut(item.product_id)
            .ok_or(MilkbarError::NotFound {
                entity: "product",
                id: item.product_id,
            })?;
        product.stock += item.quantity;
    }
    data.sales.retain(|s| s.id != id);
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Sale removed ({})", id)));
    Ok(result)
}
