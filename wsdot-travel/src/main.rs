use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use wsdot_travel::transport::{SharedPoolGuard, WsdotConfig};
use wsdot_travel::travel_times::{TravelTime, TravelTimeId, TravelTimesClient};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wsdot_travel=info")),
        )
        .init();

    // Declared first so it drops last, after every client clone is gone
    let _pool = SharedPoolGuard::new();

    let Ok(access_code) = std::env::var("WSDOT_ACCESS_CODE") else {
        eprintln!("WSDOT_ACCESS_CODE not set");
        return ExitCode::FAILURE;
    };

    let mut config = WsdotConfig::new(access_code);
    if let Ok(base_url) = std::env::var("WSDOT_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    let client = match TravelTimesClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<i64>() {
            Ok(id) => client
                .get_travel_time(TravelTimeId::new(id))
                .await
                .map(|t| vec![t]),
            Err(_) => {
                eprintln!("usage: wsdot-travel [TRAVEL_TIME_ID]");
                return ExitCode::FAILURE;
            }
        },
        None => client.get_all_travel_times().await,
    };

    match result {
        Ok(times) => {
            for time in &times {
                print_travel_time(time);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_travel_time(time: &TravelTime) {
    println!(
        "{:>5}  {:<40} {:>4} min (avg {:>4})  {:>6.2} mi  updated {}",
        time.id(),
        time.name.as_deref().unwrap_or("-"),
        time.current_time,
        time.average_time,
        time.distance,
        time.updated().format("%Y-%m-%d %H:%M %:z"),
    );
}
