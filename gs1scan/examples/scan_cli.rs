#[cfg(all(feature = "cli", feature = "http"))]
use clap::{Parser, Subcommand};

#[cfg(all(feature = "cli", feature = "http"))]
use gs1scan::{
    config::{API_KEY_ENV, API_URL_ENV, DEFAULT_BASE_URL},
    decode_batch, decoder, generate_dscsa_csv, generate_filename, write_csv, ApiClient, ApiConfig,
    PartnerDirectory, PartnerRole, Product, ProductCatalog, ScannedItem, TransactionMetadata,
};

#[cfg(all(feature = "cli", feature = "http"))]
#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "GS1 scan CLI - decode barcodes, manage partners and products, export DSCSA CSV")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Backend API key
    #[arg(long, global = true, env = API_KEY_ENV, default_value = "", hide_env_values = true)]
    api_key: String,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(all(feature = "cli", feature = "http"))]
#[derive(Subcommand)]
enum Commands {
    /// Decode one or more scans and print them as JSON
    Decode {
        /// Scanned barcode text
        #[arg(required = true)]
        barcodes: Vec<String>,

        /// Print the raw AI elements instead of the record
        #[arg(long)]
        elements: bool,
    },
    /// Decode scans from a file (one per line) and write a DSCSA CSV
    Export {
        /// File with one scan per line
        input: std::path::PathBuf,

        /// Purchase order number
        #[arg(long)]
        po: Option<String>,

        /// Transaction date
        #[arg(long)]
        transaction_date: Option<String>,

        /// Shipment date
        #[arg(long)]
        shipment_date: Option<String>,

        /// Delivery document number
        #[arg(long)]
        del_document: Option<String>,

        /// Direct purchase flag
        #[arg(long)]
        direct_purchase: Option<String>,

        /// Fill partner columns from the backend (first partner of each role)
        #[arg(long)]
        with_partners: bool,

        /// Look up product details on the backend for each GTIN
        #[arg(long)]
        lookup_products: bool,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: std::path::PathBuf,
    },
    /// Manage trading partners
    #[command(subcommand)]
    Partners(PartnerCommands),
    /// Manage products
    #[command(subcommand)]
    Products(ProductCommands),
}

#[cfg(all(feature = "cli", feature = "http"))]
#[derive(Subcommand)]
enum PartnerCommands {
    /// List partners grouped by role
    List,
    /// Add or update a partner
    Add {
        /// sold_by, sold_to, ship_from or ship_to
        role: PartnerRole,
        name: String,
        gln: String,
    },
    /// Remove the partner at an index in the role's list
    Remove { role: PartnerRole, index: usize },
}

#[cfg(all(feature = "cli", feature = "http"))]
#[derive(Subcommand)]
enum ProductCommands {
    /// List products, newest first
    List,
    /// Add or update a product
    Add {
        gtin: String,
        #[arg(long)]
        ndc: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        proprietary_name: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
    },
    /// Remove a product by GTIN
    Remove { gtin: String },
    /// Show one product
    Get { gtin: String },
    /// Search products by GTIN, NDC, name or manufacturer
    Search { query: String },
}

#[cfg(all(feature = "cli", feature = "http"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ApiConfig::new(&cli.api_url).with_api_key(&cli.api_key);

    match cli.command {
        Commands::Decode { barcodes, elements } => handle_decode(&barcodes, elements)?,
        Commands::Export {
            input,
            po,
            transaction_date,
            shipment_date,
            del_document,
            direct_purchase,
            with_partners,
            lookup_products,
            out_dir,
        } => {
            let metadata = TransactionMetadata {
                transaction_date,
                shipment_date,
                po_number: po,
                del_document_number: del_document,
                direct_purchase,
                ..Default::default()
            };
            let client = ApiClient::new(config)?;
            handle_export(client, &input, metadata, with_partners, lookup_products, &out_dir).await?;
        }
        Commands::Partners(command) => handle_partners(ApiClient::new(config)?, command).await?,
        Commands::Products(command) => handle_products(ApiClient::new(config)?, command).await?,
    }

    Ok(())
}

#[cfg(not(all(feature = "cli", feature = "http")))]
fn main() {
    eprintln!("This example requires the 'cli' and 'http' features to be enabled.");
    eprintln!("Run with: cargo run --features cli,http --example scan_cli");
    std::process::exit(1);
}

#[cfg(all(feature = "cli", feature = "http"))]
fn handle_decode(barcodes: &[String], elements: bool) -> Result<(), Box<dyn std::error::Error>> {
    if elements {
        for barcode in barcodes {
            println!("{} layout:", decoder().layout(barcode));
            for element in decoder().elements(barcode) {
                println!("  ({}) {:<12} {:?}", element.ai.tag, element.ai.field.to_string(), element.value);
            }
        }
        return Ok(());
    }

    for record in decode_batch(barcodes) {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

#[cfg(all(feature = "cli", feature = "http"))]
async fn handle_export(
    client: ApiClient,
    input: &std::path::Path,
    mut metadata: TransactionMetadata,
    with_partners: bool,
    lookup_products: bool,
    out_dir: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(input)?;
    let scans: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let records = decode_batch(&scans);

    if with_partners {
        let mut directory = PartnerDirectory::new(client.clone());
        directory.load().await?;
        for role in PartnerRole::ALL {
            if let Some(partner) = directory.get_by_index(role, 0) {
                metadata = metadata.with_partner(partner);
            }
        }
    }

    let catalog = ProductCatalog::new(client);
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        let product = match (&record.gtin, lookup_products) {
            (Some(gtin), true) => catalog.get_by_gtin(gtin).await,
            _ => None,
        };
        let item = ScannedItem::new(record);
        items.push(match product {
            Some(product) => item.with_product(product),
            None => item,
        });
    }

    let csv = generate_dscsa_csv(&items, &metadata)?;
    let path = out_dir.join(generate_filename(metadata.po_number.as_deref()));
    write_csv(&path, &csv)?;
    println!("Exported {} item(s) to {}", items.len(), path.display());
    Ok(())
}

#[cfg(all(feature = "cli", feature = "http"))]
async fn handle_partners(
    client: ApiClient,
    command: PartnerCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut directory = PartnerDirectory::new(client);
    directory.load().await?;

    match command {
        PartnerCommands::List => {
            for role in directory.roles() {
                println!("{role}:");
                for (index, partner) in directory.list(role).iter().enumerate() {
                    println!("  [{index}] {} (GLN {})", partner.name, partner.gln);
                }
            }
        }
        PartnerCommands::Add { role, name, gln } => {
            directory.add(role, name, gln).await?;
            println!("Saved {role} partner");
        }
        PartnerCommands::Remove { role, index } => {
            if directory.remove(role, index).await? {
                println!("Removed {role} partner {index}");
            } else {
                eprintln!("No {role} partner at index {index}");
            }
        }
    }
    Ok(())
}

#[cfg(all(feature = "cli", feature = "http"))]
async fn handle_products(
    client: ApiClient,
    command: ProductCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut catalog = ProductCatalog::new(client);

    match command {
        ProductCommands::List => {
            for (index, product) in catalog.load().await?.iter().enumerate() {
                println!("[{index}] {}", serde_json::to_string(product)?);
            }
        }
        ProductCommands::Add {
            gtin,
            ndc,
            description,
            proprietary_name,
            manufacturer,
        } => {
            let product = Product {
                ndc,
                product_description: description,
                proprietary_name,
                manufacturer,
                ..Product::new(gtin)
            };
            catalog.add(product).await?;
            println!("Saved product");
        }
        ProductCommands::Remove { gtin } => {
            if catalog.remove_by_gtin(&gtin).await? {
                println!("Removed {gtin}");
            } else {
                eprintln!("No product with GTIN {gtin}");
            }
        }
        ProductCommands::Get { gtin } => match catalog.get_by_gtin(&gtin).await {
            Some(product) => println!("{}", serde_json::to_string_pretty(&product)?),
            None => eprintln!("No product with GTIN {gtin}"),
        },
        ProductCommands::Search { query } => {
            catalog.load().await?;
            for product in catalog.search(&query) {
                println!("{}", serde_json::to_string(product)?);
            }
        }
    }
    Ok(())
}
