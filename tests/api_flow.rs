use milkbar::api::{MilkbarApi, SaleLine};
use milkbar::error::MilkbarError;
use milkbar::store::memory::InMemoryStore;
use std::path::PathBuf;

fn setup() -> MilkbarApi<InMemoryStore> {
    let store = InMemoryStore::new();
    let mut api = MilkbarApi::new(store, PathBuf::from(".milkbar"));

    api.add_product("Fresh Milk".to_string(), 60.0, "liter".to_string(), 100.0)
        .unwrap();
    api.add_supplier("KCC Dairies".to_string(), Some("0700000001".to_string()))
        .unwrap();
    api.add_client("Jane Doe".to_string(), Some("0711222333".to_string()))
        .unwrap();

    api
}

fn line(product_id: u32, quantity: f64) -> SaleLine {
    SaleLine {
        product_id,
        quantity,
        price_per_unit: None,
    }
}

#[test]
fn full_shop_cycle() {
    let mut api = setup();

    // Delivery of 20: 100 -> 120
    api.record_delivery(1, 1, 20.0, 45.0).unwrap();
    let products = api.list_products().unwrap().products;
    assert_eq!(products[0].stock, 120.0);

    // Sale of 30: 120 -> 90, total 30 x 60
    let result = api.record_sale(Some(1), &[line(1, 30.0)]).unwrap();
    assert_eq!(result.sales[0].sale.total_amount, 1800.0);
    assert_eq!(api.list_products().unwrap().products[0].stock, 90.0);

    // Oversell: rejected, stock unchanged
    let err = api.record_sale(Some(1), &[line(1, 200.0)]).unwrap_err();
    assert!(matches!(err, MilkbarError::InsufficientStock { .. }));
    assert_eq!(api.list_products().unwrap().products[0].stock, 90.0);

    // The rejected sale left no trace in the history either
    assert_eq!(api.list_sales().unwrap().sales.len(), 1);
    assert_eq!(api.client_history(1).unwrap().sales.len(), 1);
}

#[test]
fn removal_constraints_follow_references() {
    let mut api = setup();
    api.record_delivery(1, 1, 20.0, 45.0).unwrap();

    assert!(api.remove_product(1).is_err());
    assert!(api.remove_supplier(1).is_err());
    // The client has no sales yet, so removal is allowed
    assert!(api.remove_client(1).is_ok());

    // Dropping the delivery frees both the product and the supplier
    api.remove_delivery(1).unwrap();
    assert!(api.remove_supplier(1).is_ok());
    assert!(api.remove_product(1).is_ok());
}

#[test]
fn reports_read_the_same_snapshot() {
    let mut api = setup();
    api.record_sale(None, &[line(1, 10.0)]).unwrap();

    let first = api.summary().unwrap().summary.unwrap();
    let second = api.summary().unwrap().summary.unwrap();
    assert_eq!(first.total_sales, second.total_sales);
    assert_eq!(first.total_sales, 600.0);

    let top = api.top_products(3).unwrap().top_products;
    assert_eq!(top[0].name, "Fresh Milk");
    assert_eq!(top[0].quantity, 10.0);
}
