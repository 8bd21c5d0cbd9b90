use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use milkbar::api::{
    CmdMessage, ConfigAction, ContactUpdate, DeliveryView, MessageLevel, MilkbarApi, ProductUpdate,
    SaleLine, SaleView,
};
use milkbar::commands::reports::Summary;
use milkbar::config::MilkbarConfig;
use milkbar::error::{MilkbarError, Result};
use milkbar::model::Product;
use milkbar::store::fs::FileStore;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{
    Cli, ClientCommands, Commands, DeliveryCommands, ProductCommands, ReportCommands, SaleCommands,
    SupplierCommands,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: MilkbarApi<FileStore>,
    config: MilkbarConfig,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Product(cmd) => match cmd {
            ProductCommands::Add {
                name,
                price,
                unit,
                stock,
            } => handle_product_add(&mut ctx, name, price, unit, stock),
            ProductCommands::List => handle_product_list(&ctx),
            ProductCommands::Update {
                id,
                name,
                price,
                unit,
                stock,
            } => {
                let update = ProductUpdate {
                    name,
                    price,
                    unit,
                    stock,
                };
                print_result(ctx.api.update_product(id, update)?)
            }
            ProductCommands::Remove { id } => print_result(ctx.api.remove_product(id)?),
        },
        Commands::Client(cmd) => match cmd {
            ClientCommands::Add { name, phone } => print_result(ctx.api.add_client(name, phone)?),
            ClientCommands::List => handle_client_list(&ctx),
            ClientCommands::Update { id, name, phone } => {
                print_result(ctx.api.update_client(id, ContactUpdate { name, phone })?)
            }
            ClientCommands::Remove { id } => print_result(ctx.api.remove_client(id)?),
        },
        Commands::Supplier(cmd) => match cmd {
            SupplierCommands::Add { name, phone } => {
                print_result(ctx.api.add_supplier(name, phone)?)
            }
            SupplierCommands::List => handle_supplier_list(&ctx),
            SupplierCommands::Update { id, name, phone } => {
                print_result(ctx.api.update_supplier(id, ContactUpdate { name, phone })?)
            }
            SupplierCommands::Remove { id } => print_result(ctx.api.remove_supplier(id)?),
        },
        Commands::Delivery(cmd) => match cmd {
            DeliveryCommands::Record {
                supplier,
                product,
                quantity,
                cost,
            } => print_result(ctx.api.record_delivery(supplier, product, quantity, cost)?),
            DeliveryCommands::List => handle_delivery_list(&ctx),
            DeliveryCommands::Remove { id } => print_result(ctx.api.remove_delivery(id)?),
        },
        Commands::Sale(cmd) => match cmd {
            SaleCommands::Record { client, items } => handle_sale_record(&mut ctx, client, items),
            SaleCommands::List => handle_sale_list(&ctx),
            SaleCommands::Remove { id } => print_result(ctx.api.remove_sale(id)?),
        },
        Commands::Report(cmd) => match cmd {
            ReportCommands::Summary => handle_report_summary(&ctx),
            ReportCommands::Revenue { from, to } => handle_report_revenue(&ctx, from, to),
            ReportCommands::LowStock { threshold } => handle_report_low_stock(&ctx, threshold),
            ReportCommands::Client { id } => {
                let result = ctx.api.client_history(id)?;
                print_sales(&result.sales, &ctx.config.currency);
                print_messages(&result.messages);
                Ok(())
            }
            ReportCommands::Supplier { id } => {
                let result = ctx.api.supplier_history(id)?;
                print_deliveries(&result.deliveries, &ctx.config.currency);
                print_messages(&result.messages);
                Ok(())
            }
            ReportCommands::TopProducts { count } => handle_report_top_products(&ctx, count),
        },
        Commands::Export { out } => print_result(ctx.api.export(&out)?),
        Commands::Backup { out } => print_result(ctx.api.backup(&out)?),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
        Commands::Seed => print_result(ctx.api.seed()?),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.dir.clone())?;
    let config = MilkbarConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir.clone());
    let api = MilkbarApi::new(store, data_dir);
    Ok(AppContext { api, config })
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os("MILKBAR_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "milkbar", "milkbar")
        .ok_or_else(|| MilkbarError::Store("Could not determine data dir".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

// --- Handlers ---

fn handle_product_add(
    ctx: &mut AppContext,
    name: String,
    price: f64,
    unit: String,
    stock: f64,
) -> Result<()> {
    let result = ctx.api.add_product(name, price, unit, stock)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_product_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_products()?;
    print_products(&result.products, &ctx.config.currency);
    print_messages(&result.messages);
    Ok(())
}

fn handle_client_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_clients()?;
    if result.clients.is_empty() {
        println!("No clients.");
        return Ok(());
    }
    print_contact_header();
    for c in &result.clients {
        print_contact_row(c.id, &c.name, c.phone.as_deref(), c.date_added);
    }
    Ok(())
}

fn handle_supplier_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_suppliers()?;
    if result.suppliers.is_empty() {
        println!("No suppliers.");
        return Ok(());
    }
    print_contact_header();
    for s in &result.suppliers {
        print_contact_row(s.id, &s.name, s.phone.as_deref(), s.date_added);
    }
    Ok(())
}

fn handle_delivery_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_deliveries()?;
    print_deliveries(&result.deliveries, &ctx.config.currency);
    print_messages(&result.messages);
    Ok(())
}

fn handle_sale_record(
    ctx: &mut AppContext,
    client: Option<u32>,
    items: Vec<String>,
) -> Result<()> {
    let lines = parse_sale_lines(&items)?;
    let result = ctx.api.record_sale(client, &lines)?;
    if let Some(view) = result.sales.first() {
        print_receipt(view, &ctx.config.currency);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_sale_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_sales()?;
    print_sales(&result.sales, &ctx.config.currency);
    print_messages(&result.messages);
    Ok(())
}

fn handle_report_summary(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.summary()?;
    if let Some(summary) = &result.summary {
        print_summary(summary, &ctx.config.currency);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_report_revenue(
    ctx: &AppContext,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let from_bound = from.as_deref().map(parse_day_start).transpose()?;
    let to_bound = to.as_deref().map(parse_day_end).transpose()?;
    let result = ctx.api.revenue(from_bound, to_bound)?;

    if let Some(total) = result.revenue {
        let range = match (from, to) {
            (Some(f), Some(t)) => format!("{} to {}", f, t),
            (Some(f), None) => format!("from {}", f),
            (None, Some(t)) => format!("up to {}", t),
            (None, None) => "all time".to_string(),
        };
        println!("Revenue ({}): {} {:.2}", range, ctx.config.currency, total);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_report_low_stock(ctx: &AppContext, threshold: Option<f64>) -> Result<()> {
    let threshold = threshold.unwrap_or(ctx.config.low_stock_threshold);
    let result = ctx.api.low_stock(threshold)?;
    if !result.products.is_empty() {
        println!("{}", format!("Products below {}:", threshold).yellow());
        print_products(&result.products, &ctx.config.currency);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_report_top_products(ctx: &AppContext, count: usize) -> Result<()> {
    let result = ctx.api.top_products(count)?;
    if result.top_products.is_empty() {
        println!("No sales recorded yet.");
        return Ok(());
    }
    for (i, ps) in result.top_products.iter().enumerate() {
        println!("{}. {}: {:.2} {}", i + 1, ps.name.bold(), ps.quantity, ps.unit);
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        println!("low-stock-threshold = {}", config.low_stock_threshold);
        println!("currency = {}", config.currency);
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_result(result: milkbar::api::CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

// --- Rendering ---

const NAME_WIDTH: usize = 20;
const TIME_WIDTH: usize = 14;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_products(products: &[Product], currency: &str) {
    if products.is_empty() {
        println!("No products.");
        return;
    }

    println!(
        " ID | {} | {:>12} | {:>8} | Unit",
        fit_to_width("Name", NAME_WIDTH),
        "Price/Unit",
        "Stock"
    );
    println!("{}", "-".repeat(58));
    for p in products {
        println!(
            "{:>3} | {} | {} {:>8.2} | {:>8.2} | {}",
            p.id,
            fit_to_width(&p.name, NAME_WIDTH),
            currency,
            p.price,
            p.stock,
            p.unit
        );
    }
}

fn print_contact_header() {
    println!(
        " ID | {} | {:<12} | {:>width$}",
        fit_to_width("Name", NAME_WIDTH),
        "Phone",
        "Added",
        width = TIME_WIDTH
    );
    println!("{}", "-".repeat(58));
}

fn print_contact_row(id: u32, name: &str, phone: Option<&str>, added: DateTime<Utc>) {
    println!(
        "{:>3} | {} | {:<12} | {}",
        id,
        fit_to_width(name, NAME_WIDTH),
        phone.unwrap_or("-"),
        format_time_ago(added).dimmed()
    );
}

fn print_deliveries(deliveries: &[DeliveryView], currency: &str) {
    if deliveries.is_empty() {
        println!("No deliveries.");
        return;
    }

    println!(
        " ID | {:<16} | {} | {} | {:>8} | {:>10} | {:>10}",
        "Date",
        fit_to_width("Supplier", NAME_WIDTH),
        fit_to_width("Product", NAME_WIDTH),
        "Qty",
        "Cost/Unit",
        "Total"
    );
    println!("{}", "-".repeat(100));
    for dv in deliveries {
        println!(
            "{:>3} | {:<16} | {} | {} | {:>8.2} | {:>10.2} | {:>10.2}",
            dv.delivery.id,
            dv.delivery.date.format(DATE_FORMAT),
            fit_to_width(&dv.supplier, NAME_WIDTH),
            fit_to_width(&dv.product, NAME_WIDTH),
            dv.delivery.quantity,
            dv.delivery.price_per_unit,
            dv.delivery.total_cost
        );
    }
    let total: f64 = deliveries.iter().map(|d| d.delivery.total_cost).sum();
    println!("{}", format!("Total cost: {} {:.2}", currency, total).dimmed());
}

fn print_sales(sales: &[SaleView], currency: &str) {
    if sales.is_empty() {
        println!("No sales.");
        return;
    }

    println!(
        " ID | {:<16} | {} | {} | {:>10}",
        "Date",
        fit_to_width("Client", NAME_WIDTH),
        fit_to_width("Items", 36),
        "Total"
    );
    println!("{}", "-".repeat(96));
    for sv in sales {
        let items = sv
            .lines
            .iter()
            .map(|l| format!("{} x{}", l.product, l.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:>3} | {:<16} | {} | {} | {:>10.2}",
            sv.sale.id,
            sv.sale.date.format(DATE_FORMAT),
            fit_to_width(&sv.client, NAME_WIDTH),
            fit_to_width(&items, 36),
            sv.sale.total_amount
        );
    }
    let total: f64 = sales.iter().map(|s| s.sale.total_amount).sum();
    println!("{}", format!("Total: {} {:.2}", currency, total).dimmed());
}

fn print_receipt(view: &SaleView, currency: &str) {
    println!("{}", "=== SALE RECEIPT ===".bold());
    println!("Sale ID: {}", view.sale.id);
    println!("Date: {}", view.sale.date.format(DATE_FORMAT));
    println!("Client: {}", view.client);
    println!("{}", "-".repeat(30));
    for line in &view.lines {
        println!(
            "{}: {} {} x {} {:.2} = {} {:.2}",
            line.product, line.quantity, line.unit, currency, line.price_per_unit, currency,
            line.total
        );
    }
    println!("{}", "-".repeat(30));
    println!("{}", format!("TOTAL: {} {:.2}", currency, view.sale.total_amount).bold());
    println!("{}", "=".repeat(30));
}

fn print_summary(summary: &Summary, currency: &str) {
    println!("{}", "=== Business Summary ===".bold());
    println!("Products: {}", summary.product_count);
    println!("Clients: {}", summary.client_count);
    println!("Suppliers: {}", summary.supplier_count);

    println!();
    println!("{}", "=== Financial Summary ===".bold());
    println!("Total Sales: {} {:.2}", currency, summary.total_sales);
    println!(
        "Total Delivery Costs: {} {:.2}",
        currency, summary.total_delivery_costs
    );
    let profit = format!("Profit: {} {:.2}", currency, summary.profit);
    if summary.profit < 0.0 {
        println!("{}", profit.red());
    } else {
        println!("{}", profit.green());
    }

    if !summary.quantities_sold.is_empty() {
        println!();
        println!("{}", "=== Sales by Product ===".bold());
        for ps in &summary.quantities_sold {
            println!("{}: {:.2} {}", ps.name, ps.quantity, ps.unit);
        }
    }

    if !summary.top_clients.is_empty() {
        println!();
        println!("{}", "=== Top Clients ===".bold());
        for client in &summary.top_clients {
            println!("{}: {} {:.2}", client.name, currency, client.total);
        }
    }
}

fn fit_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

// --- Input parsing ---

fn parse_sale_lines(inputs: &[String]) -> Result<Vec<SaleLine>> {
    inputs.iter().map(|s| parse_sale_line(s)).collect()
}

fn parse_sale_line(s: &str) -> Result<SaleLine> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(MilkbarError::Invalid(format!(
            "Invalid item (expected PRODUCT:QTY or PRODUCT:QTY:PRICE): {}",
            s
        )));
    }
    let product_id = parts[0]
        .parse()
        .map_err(|_| MilkbarError::Invalid(format!("Invalid product id: {}", parts[0])))?;
    let quantity = parts[1]
        .parse()
        .map_err(|_| MilkbarError::Invalid(format!("Invalid quantity: {}", parts[1])))?;
    let price_per_unit = match parts.get(2) {
        Some(p) => Some(
            p.parse()
                .map_err(|_| MilkbarError::Invalid(format!("Invalid price: {}", p)))?,
        ),
        None => None,
    };
    Ok(SaleLine {
        product_id,
        quantity,
        price_per_unit,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| MilkbarError::Invalid(format!("Invalid date (expected YYYY-MM-DD): {}", s)))
}

fn parse_day_start(s: &str) -> Result<DateTime<Utc>> {
    Ok(parse_date(s)?.and_time(NaiveTime::MIN).and_utc())
}

/// Inclusive end date maps to an exclusive bound at the next day's start.
fn parse_day_end(s: &str) -> Result<DateTime<Utc>> {
    let date = parse_date(s)?;
    let next = date
        .succ_opt()
        .ok_or_else(|| MilkbarError::Invalid(format!("Date out of range: {}", s)))?;
    Ok(next.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sale_line_without_price() {
        let line = parse_sale_line("1:2.5").unwrap();
        assert_eq!(line.product_id, 1);
        assert_eq!(line.quantity, 2.5);
        assert_eq!(line.price_per_unit, None);
    }

    #[test]
    fn parse_sale_line_with_price() {
        let line = parse_sale_line("2:1:55").unwrap();
        assert_eq!(line.price_per_unit, Some(55.0));
    }

    #[test]
    fn parse_sale_line_rejects_garbage() {
        assert!(parse_sale_line("1").is_err());
        assert!(parse_sale_line("1:2:3:4").is_err());
        assert!(parse_sale_line("a:b").is_err());
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let start = parse_day_start("2026-08-06").unwrap();
        let end = parse_day_end("2026-08-06").unwrap();
        assert_eq!((end - start).num_hours(), 24);
    }

    #[test]
    fn truncation_marks_long_names() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a very long product name", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }
}
