use anyhow::{anyhow, Result};
use chrono::Local;
use colored::Colorize;
use tokio::signal;
use tokio::sync::mpsc::unbounded_channel;

use crate::config::Config;
use crate::events::{self, Cep47EventKind};

const SUBSCRIBED: [Cep47EventKind; 4] = [
    Cep47EventKind::Mint,
    Cep47EventKind::TransferToken,
    Cep47EventKind::TransferAllTokens,
    Cep47EventKind::BurnOne,
];

/// Streams contract events until Ctrl-C.
pub async fn execute(config: &Config) -> Result<()> {
    let (sender, mut receiver) = unbounded_channel();
    let events_address = config.events_address.clone();
    let listener =
        tokio::spawn(async move { events::subscribe(&events_address, &SUBSCRIBED, sender).await });

    println!("Listening to {}", config.events_address);
    loop {
        tokio::select! {
            maybe_event = receiver.recv() => {
                match maybe_event {
                    Some(event) => {
                        let now = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                        println!(
                            "+ {} {} {}",
                            now,
                            event.kind.name().green(),
                            serde_json::to_string(&event.data)?
                        );
                    }
                    None => {
                        // The subscription ended on its own; surface why.
                        listener.await??;
                        return Err(anyhow!("event stream closed by server"));
                    }
                }
            }
            _ = signal::ctrl_c() => {
                println!("Stopping");
                listener.abort();
                return Ok(());
            }
        }
    }
}
