//! CEP-47 event extraction from the node's SSE stream. A processed deploy
//! carries contract events as `WriteCLValue` transforms whose parsed value is
//! a string map with an `event_type` entry.

use std::collections::BTreeMap;

use futures::StreamExt;
use log::{debug, info};
use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cep47EventKind {
    Mint,
    TransferToken,
    TransferAllTokens,
    BurnOne,
    MetadataUpdate,
}

impl Cep47EventKind {
    pub fn from_event_type(event_type: &str) -> Option<Cep47EventKind> {
        match event_type {
            "cep47_mint_one" => Some(Cep47EventKind::Mint),
            "cep47_transfer_token" => Some(Cep47EventKind::TransferToken),
            "cep47_transfer_all_tokens" => Some(Cep47EventKind::TransferAllTokens),
            "cep47_burn_one" => Some(Cep47EventKind::BurnOne),
            "cep47_metadata_update" => Some(Cep47EventKind::MetadataUpdate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cep47EventKind::Mint => "Mint",
            Cep47EventKind::TransferToken => "TransferToken",
            Cep47EventKind::TransferAllTokens => "TransferAllTokens",
            Cep47EventKind::BurnOne => "BurnOne",
            Cep47EventKind::MetadataUpdate => "MetadataUpdate",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cep47Event {
    pub kind: Cep47EventKind,
    pub data: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct EventFrame {
    #[serde(rename = "DeployProcessed")]
    deploy_processed: Option<DeployProcessed>,
}

#[derive(Deserialize)]
struct DeployProcessed {
    deploy_hash: String,
    execution_result: ExecutionResult,
}

#[derive(Deserialize)]
struct ExecutionResult {
    #[serde(rename = "Success")]
    success: Option<ExecutionOutcome>,
}

#[derive(Deserialize)]
struct ExecutionOutcome {
    effect: ExecutionEffect,
}

#[derive(Deserialize)]
struct ExecutionEffect {
    transforms: Vec<TransformEntry>,
}

#[derive(Deserialize)]
struct TransformEntry {
    // Either a bare tag like "Identity" or an object like
    // {"WriteCLValue": {"cl_type": ..., "parsed": ...}}.
    transform: serde_json::Value,
}

#[derive(Deserialize)]
struct ParsedPair {
    key: String,
    value: serde_json::Value,
}

/// All CEP-47 events carried by one SSE frame. Frames that are not processed
/// deploys, or deploys that failed, yield nothing.
pub fn extract_events(frame: &str) -> Vec<Cep47Event> {
    let mut events = Vec::new();
    let frame: EventFrame = match serde_json::from_str(frame) {
        Ok(frame) => frame,
        Err(_) => return events,
    };
    let deploy = match frame.deploy_processed {
        Some(deploy) => deploy,
        None => return events,
    };
    let outcome = match deploy.execution_result.success {
        Some(outcome) => outcome,
        None => return events,
    };
    debug!("deploy {} processed", deploy.deploy_hash);
    for entry in outcome.effect.transforms {
        let parsed = match entry.transform.get("WriteCLValue").and_then(|w| w.get("parsed")) {
            Some(parsed) => parsed,
            None => continue,
        };
        let pairs: Vec<ParsedPair> = match serde_json::from_value(parsed.clone()) {
            Ok(pairs) => pairs,
            Err(_) => continue,
        };
        let mut data = BTreeMap::new();
        for pair in pairs {
            if let Some(value) = pair.value.as_str() {
                data.insert(pair.key, value.to_string());
            }
        }
        let kind = data
            .get("event_type")
            .and_then(|event_type| Cep47EventKind::from_event_type(event_type));
        if let Some(kind) = kind {
            events.push(Cep47Event { kind, data });
        }
    }
    events
}

/// Reads the SSE stream at `events_address` and forwards every event of one
/// of the requested kinds over `sender`. Returns when the stream or the
/// receiving side closes.
pub async fn subscribe(
    events_address: &str,
    kinds: &[Cep47EventKind],
    sender: UnboundedSender<Cep47Event>,
) -> Result<()> {
    let response = reqwest::get(events_address).await?.error_for_status()?;
    info!("connected to event stream at {}", events_address);
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));
        while let Some(newline) = buffer.find('\n') {
            let line = buffer[..newline].trim_end_matches('\r').to_string();
            buffer.drain(..=newline);
            let payload = match line.strip_prefix("data:") {
                Some(payload) => payload.trim(),
                None => continue,
            };
            for event in extract_events(payload) {
                if !kinds.contains(&event.kind) {
                    continue;
                }
                if sender.send(event).is_err() {
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mint_frame() -> String {
        r#"{
            "DeployProcessed": {
                "deploy_hash": "f9f1a0d0f3a6c07c0bc9a75cfd619f997f5b7a9b6e76def9d9babd3a8e0e16ba",
                "account": "017b4822b849f197acf4f49d91315887f913128a9673a2d7ea834cf13c2e6fc606",
                "execution_result": {
                    "Success": {
                        "effect": {
                            "operations": [],
                            "transforms": [
                                {"key": "balance-uref", "transform": "Identity"},
                                {"key": "uref-aaaa", "transform": {"WriteCLValue": {
                                    "cl_type": {"Map": {"key": "String", "value": "String"}},
                                    "bytes": "",
                                    "parsed": [
                                        {"key": "contract_package_hash", "value": "a2c74dd1b9bd42f9b9d61f22fa0bbf69095b1bd1a2e2a7b0b4bd26c1b1e5e127"},
                                        {"key": "event_type", "value": "cep47_mint_one"},
                                        {"key": "recipient", "value": "account-hash-72d92b8f"},
                                        {"key": "token_id", "value": "17873237509455618405"}
                                    ]
                                }}}
                            ]
                        }
                    }
                }
            }
        }"#
        .to_string()
    }

    #[test]
    fn extracts_mint_event_from_processed_deploy() {
        let events = extract_events(&mint_frame());
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind, Cep47EventKind::Mint);
        assert_eq!(
            event.data.get("token_id").map(String::as_str),
            Some("17873237509455618405")
        );
        assert_eq!(
            event.data.get("event_type").map(String::as_str),
            Some("cep47_mint_one")
        );
    }

    #[test]
    fn ignores_non_deploy_frames() {
        assert!(extract_events(r#"{"ApiVersion": "1.4.5"}"#).is_empty());
        assert!(extract_events(r#"{"BlockAdded": {"block_hash": "abc"}}"#).is_empty());
        assert!(extract_events("not even json").is_empty());
    }

    #[test]
    fn ignores_failed_deploys() {
        let frame = r#"{
            "DeployProcessed": {
                "deploy_hash": "aa",
                "execution_result": {"Failure": {"error_message": "User error: 1"}}
            }
        }"#;
        assert!(extract_events(frame).is_empty());
    }

    #[test]
    fn ignores_foreign_write_transforms() {
        let frame = r#"{
            "DeployProcessed": {
                "deploy_hash": "aa",
                "execution_result": {
                    "Success": {
                        "effect": {
                            "transforms": [
                                {"key": "uref-bbbb", "transform": {"WriteCLValue": {
                                    "cl_type": "U512",
                                    "bytes": "",
                                    "parsed": "100000"
                                }}}
                            ]
                        }
                    }
                }
            }
        }"#;
        assert!(extract_events(frame).is_empty());
    }

    #[test]
    fn event_kind_names_match_subscribed_set() {
        for (event_type, name) in [
            ("cep47_mint_one", "Mint"),
            ("cep47_transfer_token", "TransferToken"),
            ("cep47_transfer_all_tokens", "TransferAllTokens"),
            ("cep47_burn_one", "BurnOne"),
        ] {
            let kind = Cep47EventKind::from_event_type(event_type).expect("known event type");
            assert_eq!(kind.name(), name);
        }
        assert_eq!(Cep47EventKind::from_event_type("cep47_approve_token"), None);
    }
}
