use crate::commands::{CmdMessage, CmdResult, ProductUpdate};
use crate::error::{MilkbarError, Result};
use crate::model::Product;
use crate::store::DataStore;

use super::helpers::{require_name, require_non_negative};

pub fn add<S: DataStore>(
    store: &mut S,
    name: String,
    price: f64,
    unit: String,
    stock: f64,
) -> Result<CmdResult> {
    require_name(&name, "Product")?;
    require_non_negative(price, "price")?;
    require_non_negative(stock, "stock")?;

    let mut data = store.load()?;
    let product = Product::new(data.next_product_id(), name, price, unit, stock);
    data.products.push(product.clone());
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product added ({}): {}",
        product.id, product.name
    )));
    result.products.push(product);
    Ok(result)
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let data = store.load()?;
    Ok(CmdResult::default().with_products(data.products))
}

pub fn update<S: DataStore>(store: &mut S, id: u32, update: ProductUpdate) -> Result<CmdResult> {
    if let Some(price) = update.price {
        require_non_negative(price, "price")?;
    }
    if let Some(stock) = update.stock {
        require_non_negative(stock, "stock")?;
    }
    if let Some(name) = &update.name {
        require_name(name, "Product")?;
    }

    let mut data = store.load()?;
    let product = data.product_mut(id).ok_or(MilkbarError::NotFound {
        entity: "product",
        id,
    })?;

    if let Some(name) = update.name {
        product.name = name;
    }
    if let Some(price) = update.price {
        product.price = price;
    }
    if let Some(unit) = update.unit {
        product.unit = unit;
    }
    if let Some(stock) = update.stock {
        product.stock = stock;
    }
    let updated = product.clone();
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product updated ({}): {}",
        updated.id, updated.name
    )));
    result.products.push(updated);
    Ok(result)
}

pub fn remove<S: DataStore>(store: &mut S, id: u32) -> Result<CmdResult> {
    let mut data = store.load()?;
    let name = data
        .product(id)
        .map(|p| p.name.clone())
        .ok_or(MilkbarError::NotFound {
            entity: "product",
            id,
        })?;

    if let Some(referenced_by) = data.product_referenced_by(id) {
        return Err(MilkbarError::ReferencedEntity {
            entity: "product",
            id,
            referenced_by,
        });
    }

    data.products.retain(|p| p.id != id);
    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product removed ({}): {}",
        id, name
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{deliveries, sales};
    use crate::commands::sales::SaleLine;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn add_assigns_incrementing_ids() {
        let mut store = InMemoryStore::new();
        add(&mut store, "Fresh Milk".into(), 60.0, "liter".into(), 100.0).unwrap();
        let result = add(&mut store, "Mala".into(), 50.0, "packet".into(), 60.0).unwrap();

        assert_eq!(result.products[0].id, 2);
        assert_eq!(store.load().unwrap().products.len(), 2);
    }

    #[test]
    fn add_rejects_empty_name_and_negative_price() {
        let mut store = InMemoryStore::new();
        assert!(add(&mut store, "  ".into(), 60.0, "liter".into(), 0.0).is_err());
        assert!(add(&mut store, "Milk".into(), -1.0, "liter".into(), 0.0).is_err());
        assert!(store.load().unwrap().products.is_empty());
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut store = StoreFixture::new()
            .with_product("Fresh Milk", 60.0, "liter", 100.0)
            .store;

        update(
            &mut store,
            1,
            ProductUpdate {
                price: Some(65.0),
                ..Default::default()
            },
        )
        .unwrap();

        let data = store.load().unwrap();
        assert_eq!(data.products[0].price, 65.0);
        assert_eq!(data.products[0].name, "Fresh Milk");
        assert_eq!(data.products[0].stock, 100.0);
    }

    #[test]
    fn update_unknown_product_fails() {
        let mut store = InMemoryStore::new();
        let err = update(&mut store, 9, ProductUpdate::default()).unwrap_err();
        assert!(matches!(
            err,
            MilkbarError::NotFound { entity: "product", id: 9 }
        ));
    }

    #[test]
    fn remove_unreferenced_product_succeeds() {
        let mut store = StoreFixture::new()
            .with_product("Yogurt", 80.0, "bottle", 40.0)
            .store;

        remove(&mut store, 1).unwrap();
        assert!(store.load().unwrap().products.is_empty());
    }

    #[test]
    fn remove_fails_when_referenced_by_delivery() {
        let mut store = StoreFixture::new()
            .with_product("Fresh Milk", 60.0, "liter", 100.0)
            .with_supplier("KCC Dairies")
            .store;
        deliveries::record(&mut store, 1, 1, 20.0, 45.0).unwrap();

        let err = remove(&mut store, 1).unwrap_err();
        assert!(matches!(err, MilkbarError::ReferencedEntity { .. }));
        // Nothing changed
        let data = store.load().unwrap();
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.deliveries.len(), 1);
    }

    #[test]
    fn remove_fails_when_referenced_by_sale() {
        let mut store = StoreFixture::new()
            .with_product("Fresh Milk", 60.0, "liter", 100.0)
            .store;
        sales::record(
            &mut store,
            None,
            &[SaleLine {
                product_id: 1,
                quantity: 2.0,
                price_per_unit: None,
            }],
        )
        .unwrap();

        let err = remove(&mut store, 1).unwrap_err();
        assert!(matches!(
            err,
            MilkbarError::ReferencedEntity {
                referenced_by: "sales",
                ..
            }
        ));
    }
}
