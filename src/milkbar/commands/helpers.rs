use crate::commands::{DeliveryView, SaleLineView, SaleView};
use crate::error::{MilkbarError, Result};
use crate::model::{Dataset, Delivery, Sale};

pub fn product_name(data: &Dataset, id: u32) -> String {
    data.product(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

pub fn product_unit(data: &Dataset, id: u32) -> String {
    data.product(id)
        .map(|p| p.unit.clone())
        .unwrap_or_default()
}

pub fn supplier_name(data: &Dataset, id: u32) -> String {
    data.supplier(id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// `None` is a walk-in sale; a dangling id renders as "Unknown".
pub fn client_name(data: &Dataset, id: Option<u32>) -> String {
    match id {
        None => "Walk-in".to_string(),
        Some(id) => data
            .client(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
    }
}

pub fn delivery_view(data: &Dataset, delivery: &Delivery) -> DeliveryView {
    DeliveryView {
        supplier: supplier_name(data, delivery.supplier_id),
        product: product_name(data, delivery.product_id),
        unit: product_unit(data, delivery.product_id),
        delivery: delivery.clone(),
    }
}

pub fn sale_view(data: &Dataset, sale: &Sale) -> SaleView {
    let lines = sale
        .items
        .iter()
        .map(|it| SaleLineView {
            product: product_name(data, it.product_id),
            unit: product_unit(data, it.product_id),
            quantity: it.quantity,
            price_per_unit: it.price_per_unit,
            total: it.total,
        })
        .collect();
    SaleView {
        client: client_name(data, sale.client_id),
        sale: sale.clone(),
        lines,
    }
}

pub fn require_positive(value: f64, what: &str) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(MilkbarError::Invalid(format!(
            "{} must be positive, got {}",
            what, value
        )))
    }
}

pub fn require_non_negative(value: f64, what: &str) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(MilkbarError::Invalid(format!(
            "{} cannot be negative, got {}",
            what, value
        )))
    }
}

pub fn require_name(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(MilkbarError::Invalid(format!("{} name cannot be empty", what)))
    } else {
        Ok(())
    }
}
