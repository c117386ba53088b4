//! SF-Client: Storefront demo client.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use sf_client::{DirectClient, GatewayClient, Signup};
use storefront_telemetry::{init_logging, TelemetryConfig};

/// SF-Client: sign up, log in and fetch a product
#[derive(Parser, Debug)]
#[command(name = "sf-client")]
#[command(about = "Demo client for the Storefront gateway and backends")]
struct Args {
    /// Go through the API gateway instead of calling the backends directly
    #[arg(long)]
    via_gateway: bool,

    /// API gateway base URL
    #[arg(long, default_value = "http://localhost:50061")]
    gateway: String,

    /// Auth service base URL
    #[arg(long, default_value = "http://localhost:50053")]
    auth: String,

    /// Catalog service gRPC endpoint
    #[arg(long, default_value = "http://localhost:50052")]
    catalog: String,

    #[arg(long, default_value = "John")]
    first_name: String,

    #[arg(long, default_value = "Doe")]
    last_name: String,

    #[arg(long, default_value = "john.doe@example.com")]
    email: String,

    #[arg(long, default_value = "password123")]
    password: String,

    /// Product to look up
    #[arg(long, default_value_t = 1)]
    product_id: i32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&TelemetryConfig::for_service("sf-client"))?;

    let signup = Signup {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
    };

    if args.via_gateway {
        info!(gateway = %args.gateway, "Using API gateway");
        let client = GatewayClient::new(&args.gateway)?;

        println!("Signup response: {:?}", client.signup(&signup).await?);
        println!(
            "Login response: {:?}",
            client.login(&args.email, &args.password).await?
        );
        println!("{}", client.get_product(args.product_id).await?);
    } else {
        info!(auth = %args.auth, catalog = %args.catalog, "Calling backends directly");
        let client = DirectClient::new(&args.auth, &args.catalog)?;

        println!("Signup response: {:?}", client.signup(&signup).await?);
        println!(
            "Login response: {:?}",
            client.login(&args.email, &args.password).await?
        );
        println!("Product: {:?}", client.get_product(args.product_id).await?);
    }

    Ok(())
}
