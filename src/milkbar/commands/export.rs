use crate::commands::{CmdMessage, CmdResult};
use crate::error::{MilkbarError, Result};
use crate::model::Dataset;
use crate::store::DataStore;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::helpers::{client_name, product_name, supplier_name};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write the whole dataset as CSV files into `out_dir`. Deliveries and sales
/// are enriched with the referenced names; sales are flattened to one row per
/// line item.
pub fn run<S: DataStore>(store: &S, out_dir: &Path) -> Result<CmdResult> {
    let data = store.load()?;
    fs::create_dir_all(out_dir).map_err(MilkbarError::Io)?;

    let files = [
        ("products.csv", products_csv(&data)),
        ("clients.csv", clients_csv(&data)),
        ("suppliers.csv", suppliers_csv(&data)),
        ("deliveries.csv", deliveries_csv(&data)),
        ("sales.csv", sales_csv(&data)),
    ];
    for (name, content) in &files {
        fs::write(out_dir.join(name), content).map_err(MilkbarError::Io)?;
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} files to {}",
        files.len(),
        out_dir.display()
    )));
    Ok(result)
}

fn products_csv(data: &Dataset) -> String {
    let mut out = String::from("id,name,price,unit,stock,date_added\n");
    for p in &data.products {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            p.id,
            csv_field(&p.name),
            p.price,
            csv_field(&p.unit),
            p.stock,
            p.date_added.format(DATE_FORMAT)
        );
    }
    out
}

fn clients_csv(data: &Dataset) -> String {
    let mut out = String::from("id,name,phone,date_added\n");
    for c in &data.clients {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            c.id,
            csv_field(&c.name),
            csv_field(c.phone.as_deref().unwrap_or("")),
            c.date_added.format(DATE_FORMAT)
        );
    }
    out
}

fn suppliers_csv(data: &Dataset) -> String {
    let mut out = String::from("id,name,phone,date_added\n");
    for s in &data.suppliers {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            s.id,
            csv_field(&s.name),
            csv_field(s.phone.as_deref().unwrap_or("")),
            s.date_added.format(DATE_FORMAT)
        );
    }
    out
}

fn deliveries_csv(data: &Dataset) -> String {
    let mut out = String::from(
        "id,date,supplier_id,supplier,product_id,product,quantity,price_per_unit,total_cost\n",
    );
    for d in &data.deliveries {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            d.id,
            d.date.format(DATE_FORMAT),
            d.supplier_id,
            csv_field(&supplier_name(data, d.supplier_id)),
            d.product_id,
            csv_field(&product_name(data, d.product_id)),
            d.quantity,
            d.price_per_unit,
            d.total_cost
        );
    }
    out
}

fn sales_csv(data: &Dataset) -> String {
    let mut out = String::from(
        "sale_id,date,client_id,client,product_id,product,quantity,price_per_unit,line_total,sale_total\n",
    );
    for s in &data.sales {
        for it in &s.items {
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{}",
                s.id,
                s.date.format(DATE_FORMAT),
                s.client_id.map(|id| id.to_string()).unwrap_or_default(),
                csv_field(&client_name(data, s.client_id)),
                it.product_id,
                csv_field(&product_name(data, it.product_id)),
                it.quantity,
                it.price_per_unit,
                it.total,
                s.total_amount
            );
        }
    }
    out
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sales::{self, SaleLine};
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::tempdir;

    #[test]
    fn writes_all_five_files() {
        let store = StoreFixture::new()
            .with_product("Fresh Milk", 60.0, "liter", 100.0)
            .store;
        let dir = tempdir().unwrap();

        run(&store, dir.path()).unwrap();

        for name in [
            "products.csv",
            "clients.csv",
            "suppliers.csv",
            "deliveries.csv",
            "sales.csv",
        ] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }

        let products = std::fs::read_to_string(dir.path().join("products.csv")).unwrap();
        assert!(products.starts_with("id,name,price,unit,stock,date_added"));
        assert!(products.contains("1,Fresh Milk,60,liter,100,"));
    }

    #[test]
    fn sales_are_flattened_to_line_items() {
        let mut store = StoreFixture::new()
            .with_product("Fresh Milk", 60.0, "liter", 100.0)
            .with_product("Mala", 50.0, "packet", 60.0)
            .with_client("Jane Doe")
            .store;
        sales::record(
            &mut store,
            Some(1),
            &[
                SaleLine {
                    product_id: 1,
                    quantity: 2.0,
                    price_per_unit: None,
                },
                SaleLine {
                    product_id: 2,
                    quantity: 1.0,
                    price_per_unit: None,
                },
            ],
        )
        .unwrap();

        let csv = sales_csv(&store.load().unwrap());
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 3); // header + two line items
        assert!(rows[1].contains("Jane Doe"));
        assert!(rows[1].ends_with("170")); // sale_total on every row
        assert!(rows[2].contains("Mala"));
    }

    #[test]
    fn anonymous_sale_has_empty_client_id() {
        let mut store = StoreFixture::new()
            .with_product("Mala", 50.0, "packet", 10.0)
            .store;
        sales::record(
            &mut store,
            None,
            &[SaleLine {
                product_id: 1,
                quantity: 1.0,
                price_per_unit: None,
            }],
        )
        .unwrap();

        let csv = sales_csv(&store.load().unwrap());
        assert!(csv.lines().nth(1).unwrap().contains(",,Walk-in,"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("Milk, fresh"), "\"Milk, fresh\"");
        assert_eq!(csv_field("say \"moo\""), "\"say \"\"moo\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }
}
