use clap::{Args, Parser, Subcommand};
use reqwest::header::{HeaderName, CACHE_CONTROL, ETAG};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "list-cli")]
#[command(about = "Client for the List Service head/tail API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "LIST_SERVICE_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Return the first N items
    Head(OpArgs),
    /// Return the last N items
    Tail(OpArgs),
}

#[derive(Args)]
struct OpArgs {
    /// Items to operate on
    items: Vec<String>,

    /// Number of items to return
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    count: i64,

    /// Send a JSON body via POST instead of a cacheable GET
    #[arg(long)]
    post: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (operation, args) = match cli.command {
        Commands::Head(args) => ("head", args),
        Commands::Tail(args) => ("tail", args),
    };
    let endpoint = format!("{}/v1/lists/{}", cli.url.trim_end_matches('/'), operation);

    let request = if args.post {
        client
            .post(&endpoint)
            .json(&json!({ "list": args.items, "count": args.count }))
    } else {
        client.get(&endpoint).query(&[
            ("list", args.items.join(",")),
            ("count", args.count.to_string()),
        ])
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let header = |name: HeaderName| {
        res.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    let cache_control = header(CACHE_CONTROL);
    let etag = header(ETAG);

    eprintln!("Status: {}", status);
    if let Some(cc) = cache_control {
        eprintln!("Cache-Control: {}", cc);
    }
    if let Some(tag) = etag {
        eprintln!("ETag: {}", tag);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
