//! This example shows:
//! - Starting an instapro client
//! - Taking the next action from a worker's queue
//! - Reading a value from the action's data and completing it
//! - Stopping the client
//!
//! Run with `cargo run --example queue -- <host> <port> <worker id>`.

use instapro::{ActionStatus, ClientBuilder};
use log::LevelFilter;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This is just for seeing the logs.
    SimpleLogger::new().with_level(LevelFilter::Debug).init()?;

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let port = args.next().map_or(Ok(8000), |p| p.parse())?;
    let worker = args.next().unwrap_or_else(|| "worker-1".to_string());

    let api = ClientBuilder::new(host, port).start()?;

    match api.get_action_queue(&worker).await? {
        Some(action) => {
            println!(
                "{} for account {} ({})",
                action.action_type().title(),
                action.account_id(),
                action.status().title()
            );
            if let Some(target) = api.get_data(action.id(), "target").await? {
                println!("target: {target}");
            }
            api.set_status(action.id(), ActionStatus::Completed).await?;
        }
        None => println!("queue of {worker} is empty"),
    }

    api.stop();
    Ok(())
}
