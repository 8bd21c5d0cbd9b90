use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MilkbarError, Result};
use crate::model::Delivery;
use crate::store::DataStore;

use super::helpers::{delivery_view, require_non_negative, require_positive, supplier_name};

/// Record a delivery and increase the product's stock. Both effects land in
/// the same dataset copy, persisted with a single save.
pub fn record<S: DataStore>(
    store: &mut S,
    supplier_id: u32,
    product_id: u32,
    quantity: f64,
    price_per_unit: f64,
) -> Result<CmdResult> {
    require_positive(quantity, "quantity")?;
    require_non_negative(price_per_unit, "price per unit")?;

    let mut data = store.load()?;
    if data.supplier(supplier_id).is_none() {
        return Err(MilkbarError::NotFound {
            entity: "supplier",
            id: supplier_id,
        });
    }
    let delivery = Delivery::new(
        data.next_delivery_id(),
        supplier_id,
        product_id,
        quantity,
        price_per_unit,
    );
    let product = data.product_mut(product_id).ok_or(MilkbarError::NotFound {
        entity: "product",
        id: product_id,
    })?;
    product.stock += quantity;
    let product_name = product.name.clone();
    let unit = product.unit.clone();
    data.deliveries.push(delivery.clone());
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Delivery recorded ({}): {} {} of {} from {}",
        delivery.id,
        quantity,
        unit,
        product_name,
        supplier_name(&data, supplier_id)
    )));
    result.deliveries.push(delivery_view(&data, &delivery));
    Ok(result)
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let data = store.load()?;
    let mut deliveries = data.deliveries.clone();
    deliveries.sort_by(|a, b| b.date.cmp(&a.date));
    let views = deliveries.iter().map(|d| delivery_view(&data, d)).collect();
    Ok(CmdResult::default().with_deliveries(views))
}

/// Remove a delivery and roll back its stock increase, clamped at zero in
/// case the delivered quantity has already been sold.
pub fn remove<S: DataStore>(store: &mut S, id: u32) -> Result<CmdResult> {
    let mut data = store.load()?;
    let delivery = data
        .delivery(id)
        .cloned()
        .ok_or(MilkbarError::NotFound {
            entity: "delivery",
            id,
        })?;

    let product = data
        .product_mut(delivery.product_id)
        .ok_or(MilkbarError::NotFound {
            entity: "product",
            id: delivery.product_id,
        })?;
    product.stock = (product.stock - delivery.quantity).max(0.0);
    data.deliveries.retain(|d| d.id != id);
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Delivery removed ({})", id)));
    Ok(result)
}
