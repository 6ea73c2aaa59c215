use clap::{Parser, Subcommand};
use serde_json::Value;
use tonic::Code;

use item_server::grpc::proto::{item_transfer_client::ItemTransferClient, Item};

#[derive(Parser)]
#[command(name = "item-cli")]
#[command(about = "Command-line client for the item servers", long_about = None)]
struct Cli {
    /// Base URL of the HTTP server
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Endpoint of the gRPC server
    #[arg(short, long, default_value = "http://localhost:8082")]
    grpc_url: String,

    /// API root segment
    #[arg(long, default_value = "api")]
    root: String,

    /// Collection segment
    #[arg(long, default_value = "items")]
    collection: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show API information
    Info,
    /// List all items
    List,
    /// Fetch one item
    Get { id: String },
    /// Create an item from a JSON object
    Create { json: String },
    /// Replace an item's fields with a JSON object
    Update { id: String, json: String },
    /// Delete an item
    Delete { id: String },
    /// Fetch a name over gRPC
    GrpcGet { id: i32 },
    /// Store a name over gRPC
    GrpcSet { id: i32, name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let collection = format!("{}/{}/{}", cli.url, cli.root, cli.collection);

    match cli.command {
        Commands::Info => {
            let res = client.get(format!("{}/{}", cli.url, cli.root)).send().await?;
            print_response(res).await?;
        }
        Commands::List => {
            let res = client.get(&collection).send().await?;
            print_response(res).await?;
        }
        Commands::Get { id } => {
            let res = client.get(format!("{}/{}", collection, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Create { json } => {
            let body: Value = serde_json::from_str(&json)?;
            let res = client.post(&collection).json(&body).send().await?;
            print_response(res).await?;
        }
        Commands::Update { id, json } => {
            let body: Value = serde_json::from_str(&json)?;
            let res = client
                .put(format!("{}/{}", collection, id))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Delete { id } => {
            let res = client.delete(format!("{}/{}", collection, id)).send().await?;
            print_response(res).await?;
        }
        Commands::GrpcGet { id } => {
            let mut grpc = ItemTransferClient::connect(cli.grpc_url).await?;
            match grpc.get_item(Item { id, name: String::new() }).await {
                Ok(res) => print_item(&res.into_inner())?,
                Err(status) if status.code() == Code::NotFound => {
                    eprintln!("Item {} not found", id);
                }
                Err(status) => return Err(format!("gRPC error: {}", status.message()).into()),
            }
        }
        Commands::GrpcSet { id, name } => {
            let mut grpc = ItemTransferClient::connect(cli.grpc_url).await?;
            let res = grpc
                .set_item(Item { id, name })
                .await
                .map_err(|status| format!("gRPC error: {}", status.message()))?;
            print_item(&res.into_inner())?;
        }
    }

    Ok(())
}

fn print_item(item: &Item) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::json!({ "id": item.id, "name": item.name });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
