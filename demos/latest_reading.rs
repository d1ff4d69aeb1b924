use meteopole::{Meteopole, MeteopoleError};

#[tokio::main]
async fn main() -> Result<(), MeteopoleError> {
    env_logger::init();

    let client = Meteopole::new().await?;
    for name in Meteopole::station_names() {
        match client.latest_reading().station(name).call().await {
            Ok(reading) => println!("{}\n", reading),
            Err(e) => eprintln!("{}: no data ({})", name, e),
        }
    }
    Ok(())
}
