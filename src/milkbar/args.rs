use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "milkbar")]
#[command(about = "Record keeping for a small milk retail shop", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for the data and config files (defaults to the user data dir)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage products
    #[command(subcommand, alias = "p")]
    Product(ProductCommands),

    /// Manage clients
    #[command(subcommand, alias = "c")]
    Client(ClientCommands),

    /// Manage suppliers
    #[command(subcommand, alias = "s")]
    Supplier(SupplierCommands),

    /// Record and inspect deliveries
    #[command(subcommand, alias = "d")]
    Delivery(DeliveryCommands),

    /// Record and inspect sales
    #[command(subcommand)]
    Sale(SaleCommands),

    /// Report views over the current records
    #[command(subcommand, alias = "r")]
    Report(ReportCommands),

    /// Export all records as CSV files
    Export {
        /// Output directory
        #[arg(short, long, default_value = "exports")]
        out: PathBuf,
    },

    /// Archive the dataset as a timestamped tar.gz
    Backup {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (low-stock-threshold, currency)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Populate the store with sample records for demos
    Seed,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Add a new product
    #[command(alias = "a")]
    Add {
        name: String,

        /// Price per unit
        #[arg(short, long)]
        price: f64,

        /// Unit of measure (e.g. liter, packet, bottle)
        #[arg(short, long)]
        unit: String,

        /// Initial stock quantity
        #[arg(short, long, default_value_t = 0.0)]
        stock: f64,
    },

    /// List products
    #[command(alias = "ls")]
    List,

    /// Update product fields
    Update {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        stock: Option<f64>,
    },

    /// Remove a product (fails while deliveries or sales reference it)
    #[command(alias = "rm")]
    Remove { id: u32 },
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// Add a new client
    #[command(alias = "a")]
    Add {
        name: String,

        #[arg(short, long)]
        phone: Option<String>,
    },

    /// List clients
    #[command(alias = "ls")]
    List,

    /// Update client fields
    Update {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Remove a client (fails while sales reference it)
    #[command(alias = "rm")]
    Remove { id: u32 },
}

#[derive(Subcommand, Debug)]
pub enum SupplierCommands {
    /// Add a new supplier
    #[command(alias = "a")]
    Add {
        name: String,

        #[arg(short, long)]
        phone: Option<String>,
    },

    /// List suppliers
    #[command(alias = "ls")]
    List,

    /// Update supplier fields
    Update {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Remove a supplier (fails while deliveries reference it)
    #[command(alias = "rm")]
    Remove { id: u32 },
}

#[derive(Subcommand, Debug)]
pub enum DeliveryCommands {
    /// Record a delivery and increase the product's stock
    #[command(alias = "rec")]
    Record {
        /// Supplier id
        #[arg(short, long)]
        supplier: u32,

        /// Product id
        #[arg(short, long)]
        product: u32,

        /// Quantity received
        #[arg(short, long)]
        quantity: f64,

        /// Cost per unit
        #[arg(short, long)]
        cost: f64,
    },

    /// List deliveries, newest first
    #[command(alias = "ls")]
    List,

    /// Remove a delivery and roll back its stock increase
    #[command(alias = "rm")]
    Remove { id: u32 },
}

#[derive(Subcommand, Debug)]
pub enum SaleCommands {
    /// Record a sale and decrease stock
    #[command(alias = "rec")]
    Record {
        /// Client id (omit for a walk-in sale)
        #[arg(short, long)]
        client: Option<u32>,

        /// Line item as PRODUCT:QTY or PRODUCT:QTY:PRICE (repeatable)
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
    },

    /// List sales, newest first
    #[command(alias = "ls")]
    List,

    /// Remove a sale and restore the sold stock
    #[command(alias = "rm")]
    Remove { id: u32 },
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Business and financial summary
    Summary,

    /// Total sale revenue within a date range
    Revenue {
        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Products with stock below the threshold
    LowStock {
        /// Override the configured threshold
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Sales history for one client, newest first
    Client { id: u32 },

    /// Delivery history for one supplier, newest first
    Supplier { id: u32 },

    /// Best selling products by quantity sold
    TopProducts {
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
}
