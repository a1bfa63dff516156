use kpaths::web::server::{start_server, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // first argument overrides the port
    let mut config = ServerConfig::default();
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(port) => config = config.with_port(port),
            Err(_) => log::warn!("Ignoring invalid port {:?}, using {}", arg, config.port),
        }
    }

    println!("🔧 Starting kpaths server...");
    println!("   📡 Address: http://{}", config.socket_addr());
    println!("   🌐 CORS enabled: {}", config.enable_cors);
    println!();

    start_server(config).await?;

    Ok(())
}
