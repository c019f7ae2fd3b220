use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "sitectl")]
#[command(about = "Management CLI for the nginx site manager", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8088")]
    url: String,

    /// API key; only needed when the server has auth enabled.
    #[arg(short, long, default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site configurations
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 15)]
        per_page: usize,
        /// Substring filter over names
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one site configuration
    Show { name: String },
    /// Create and enable a site configuration
    Create {
        name: String,
        /// Upstream server address (host or IP, port 443 is implied)
        address: String,
    },
    /// Replace a site configuration's content from a file
    Edit {
        name: String,
        /// Path to the new configuration content
        file: std::path::PathBuf,
    },
    /// Disable and delete a site configuration
    Delete { name: String },
    /// Show the nginx stub_status page
    Status,
    /// Show a site's access log
    Logs { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if !cli.key.is_empty() {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
        );
    }

    match cli.command {
        Commands::List {
            page,
            per_page,
            search,
        } => {
            let res = client
                .get(format!("{}/sites", cli.url))
                .query(&[
                    ("page", page.to_string()),
                    ("per_page", per_page.to_string()),
                    ("search", search),
                ])
                .headers(headers)
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Show { name } => {
            let res = client
                .get(format!("{}/sites/{}", cli.url, name))
                .headers(headers)
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Create { name, address } => {
            let res = client
                .post(format!("{}/sites", cli.url))
                .headers(headers)
                .json(&json!({ "server_name": name, "server_address": address }))
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Edit { name, file } => {
            let content = std::fs::read_to_string(&file)?;
            let res = client
                .put(format!("{}/sites/{}", cli.url, name))
                .headers(headers)
                .json(&json!({ "content": content }))
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Delete { name } => {
            let res = client
                .delete(format!("{}/sites/{}", cli.url, name))
                .headers(headers)
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Status => {
            let res = client
                .get(format!("{}/status", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Logs { name } => {
            let res = client
                .get(format!("{}/logs/{}", cli.url, name))
                .headers(headers)
                .send()
                .await?;
            // Logs are plain text, not JSON.
            let status = res.status();
            if !status.is_success() {
                eprintln!("Error: API returned status {}", status);
                return Ok(());
            }
            println!("{}", res.text().await?);
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
