use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Client, Delivery, Product, Supplier};
use crate::store::DataStore;

const SAMPLE_PRODUCTS: &[(&str, f64, &str, f64)] = &[
    ("Fresh Milk", 60.0, "liter", 100.0),
    ("Mala", 50.0, "packet", 60.0),
    ("Yogurt", 80.0, "bottle", 40.0),
];

const SAMPLE_SUPPLIERS: &[(&str, &str)] = &[
    ("KCC Dairies", "0700000001"),
    ("Brookside Dairies", "0700000002"),
];

const SAMPLE_CLIENTS: &[(&str, &str)] = &[("Jane Doe", "0711222333"), ("Kamau", "0700111222")];

// (supplier name, product name, quantity, price per unit)
const SAMPLE_DELIVERIES: &[(&str, &str, f64, f64)] = &[
    ("KCC Dairies", "Fresh Milk", 50.0, 45.0),
    ("KCC Dairies", "Mala", 30.0, 40.0),
    ("Brookside Dairies", "Yogurt", 20.0, 60.0),
];

/// Populate the store with representative sample records for demos. Entities
/// already present (matched by name, case-insensitively) are left alone, and
/// sample deliveries are only recorded into a store that has none, so running
/// seed twice changes nothing. One save covers the whole operation.
pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let mut data = store.load()?;
    let mut added_products = 0;
    let mut added_suppliers = 0;
    let mut added_clients = 0;
    let mut added_deliveries = 0;

    for (name, price, unit, stock) in SAMPLE_PRODUCTS {
        if data
            .products
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            continue;
        }
        let id = data.next_product_id();
        data.products.push(Product::new(
            id,
            name.to_string(),
            *price,
            unit.to_string(),
            *stock,
        ));
        added_products += 1;
    }

    for (name, phone) in SAMPLE_SUPPLIERS {
        if data
            .suppliers
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(name))
        {
            continue;
        }
        let id = data.next_supplier_id();
        data.suppliers
            .push(Supplier::new(id, name.to_string(), Some(phone.to_string())));
        added_suppliers += 1;
    }

    for (name, phone) in SAMPLE_CLIENTS {
        if data
            .clients
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            continue;
        }
        let id = data.next_client_id();
        data.clients
            .push(Client::new(id, name.to_string(), Some(phone.to_string())));
        added_clients += 1;
    }

    if data.deliveries.is_empty() {
        for (supplier, product, quantity, price) in SAMPLE_DELIVERIES {
            let supplier_id = data
                .suppliers
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(supplier))
                .map(|s| s.id);
            let product_id = data
                .products
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(product))
                .map(|p| p.id);
            let (Some(supplier_id), Some(product_id)) = (supplier_id, product_id) else {
                continue;
            };

            let id = data.next_delivery_id();
            data.deliveries
                .push(Delivery::new(id, supplier_id, product_id, *quantity, *price));
            if let Some(p) = data.product_mut(product_id) {
                p.stock += quantity;
            }
            added_deliveries += 1;
        }
    }

    store.save(&data)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Seeded {} products, {} suppliers, {} clients, {} deliveries",
        added_products, added_suppliers, added_clients, added_deliveries
    )));
    Ok(result)
}
