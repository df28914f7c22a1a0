use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::units::{Amount, amount_from_json, serialize_amount, serialize_optional_amount, u64_from_json};

use super::kind::TransactionKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub to: String,
    pub from: Option<String>,
    #[serde(serialize_with = "serialize_optional_amount")]
    pub amount: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStakeMessage {
    pub chains: Vec<String>,
    #[serde(serialize_with = "serialize_amount")]
    pub value: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStakeMessage {
    pub chains: Vec<String>,
    pub service_url: String,
    #[serde(serialize_with = "serialize_amount")]
    pub value: Amount,
}

/// Payload shared by the unstake and unjail messages: the account acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressMessage {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimMessage {
    pub chain: String,
    pub session_height: u64,
    pub app_public_key: String,
    #[serde(serialize_with = "serialize_amount")]
    pub total_proofs: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofMessage {
    pub chain: String,
    pub session_height: u64,
    pub app_public_key: String,
    pub request_hash: String,
}

/// Normalized payload of a transaction, one variant per [`TransactionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum TransactionMessage {
    Send(SendMessage),
    AppStake(AppStakeMessage),
    AppUnstake(AddressMessage),
    NodeStake(NodeStakeMessage),
    NodeUnstake(AddressMessage),
    NodeUnjail(AddressMessage),
    Claim(ClaimMessage),
    Proof(ProofMessage),
    /// No further detail is available for unrecognized message types.
    Unknown,
}

impl TransactionMessage {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Send(_) => TransactionKind::Send,
            Self::AppStake(_) => TransactionKind::AppStake,
            Self::AppUnstake(_) => TransactionKind::AppUnstake,
            Self::NodeStake(_) => TransactionKind::NodeStake,
            Self::NodeUnstake(_) => TransactionKind::NodeUnstake,
            Self::NodeUnjail(_) => TransactionKind::NodeUnjail,
            Self::Claim(_) => TransactionKind::Claim,
            Self::Proof(_) => TransactionKind::Proof,
            Self::Unknown => TransactionKind::Unknown,
        }
    }
}

/// Projects the raw `stdTx.msg.value` object of a transaction onto the
/// normalized payload for `kind`.
///
/// # Errors
///
/// Returns [`Error::MalformedTransaction`] naming the first required field
/// that is absent or has the wrong JSON type.
pub fn extract(kind: TransactionKind, value: &Value) -> Result<TransactionMessage> {
    let fields = Fields { kind, value };

    let message = match kind {
        TransactionKind::Send => TransactionMessage::Send(SendMessage {
            to: fields.string(&["to_address"])?,
            from: fields.optional_string(&["from_address"]),
            amount: fields.optional_amount(&["amount"])?,
        }),
        TransactionKind::AppStake => TransactionMessage::AppStake(AppStakeMessage {
            chains: fields.strings(&["chains"])?,
            value: fields.amount(&["value"])?,
        }),
        TransactionKind::AppUnstake => TransactionMessage::AppUnstake(AddressMessage {
            address: fields.string(&["application_address"])?,
        }),
        TransactionKind::NodeStake => TransactionMessage::NodeStake(NodeStakeMessage {
            chains: fields.strings(&["chains"])?,
            service_url: fields.string(&["service_url"])?,
            value: fields.amount(&["value"])?,
        }),
        TransactionKind::NodeUnstake => TransactionMessage::NodeUnstake(AddressMessage {
            address: fields.node_address()?,
        }),
        TransactionKind::NodeUnjail => TransactionMessage::NodeUnjail(AddressMessage {
            address: fields.node_address()?,
        }),
        TransactionKind::Claim => TransactionMessage::Claim(ClaimMessage {
            chain: fields.string(&["header", "chain"])?,
            session_height: fields.height(&["header", "session_height"])?,
            app_public_key: fields.string(&["header", "app_public_key"])?,
            total_proofs: fields.amount(&["total_proofs"])?,
        }),
        TransactionKind::Proof => TransactionMessage::Proof(ProofMessage {
            chain: fields.string(&["leaf", "value", "blockchain"])?,
            session_height: fields.height(&["leaf", "value", "session_block_height"])?,
            app_public_key: fields.string(&["leaf", "value", "aat", "app_pub_key"])?,
            request_hash: fields.string(&["leaf", "value", "request_hash"])?,
        }),
        TransactionKind::Unknown => TransactionMessage::Unknown,
    };

    Ok(message)
}

/// Field accessor over a raw message that reports missing fields against the
/// message's kind.
struct Fields<'a> {
    kind: TransactionKind,
    value: &'a Value,
}

impl Fields<'_> {
    fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self.value, |current, key| current.get(key))
    }

    fn missing(&self, path: &[&str]) -> Error {
        Error::malformed(self.kind, path.join("."))
    }

    fn string(&self, path: &[&str]) -> Result<String> {
        self.optional_string(path).ok_or_else(|| self.missing(path))
    }

    fn optional_string(&self, path: &[&str]) -> Option<String> {
        self.get(path).and_then(Value::as_str).map(str::to_string)
    }

    fn strings(&self, path: &[&str]) -> Result<Vec<String>> {
        let items = self.get(path).and_then(Value::as_array).ok_or_else(|| self.missing(path))?;
        items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(|| self.missing(path)))
            .collect()
    }

    fn amount(&self, path: &[&str]) -> Result<Amount> {
        self.get(path).and_then(amount_from_json).ok_or_else(|| self.missing(path))
    }

    /// Absent or null is `None`; anything else must parse.
    fn optional_amount(&self, path: &[&str]) -> Result<Option<Amount>> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => amount_from_json(value).map(Some).ok_or_else(|| self.missing(path)),
        }
    }

    fn height(&self, path: &[&str]) -> Result<u64> {
        self.get(path).and_then(u64_from_json).ok_or_else(|| self.missing(path))
    }

    // Older node messages carry `address`, the 8.0 layout `validator_address`.
    fn node_address(&self) -> Result<String> {
        self.optional_string(&["address"])
            .or_else(|| self.optional_string(&["validator_address"]))
            .ok_or_else(|| self.missing(&["address"]))
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extract_send() {
        let value = json!({
            "amount": "2500000",
            "from_address": "3808c2de7d2e8eeaa2e13768feb78b10b13c8699",
            "to_address": "fa08efadee9eaa9d5549bccd6087002a5f47c0e2"
        });

        let message = extract(TransactionKind::Send, &value).unwrap();

        assert_eq!(
            message,
            TransactionMessage::Send(SendMessage {
                to: "fa08efadee9eaa9d5549bccd6087002a5f47c0e2".to_string(),
                from: Some("3808c2de7d2e8eeaa2e13768feb78b10b13c8699".to_string()),
                amount: Some(BigUint::from(2_500_000u32)),
            })
        );
    }

    #[test]
    fn test_extract_send_requires_recipient() {
        let err = extract(TransactionKind::Send, &json!({ "amount": "1" })).unwrap_err();
        match err {
            Error::MalformedTransaction { kind, field } => {
                assert_eq!(kind, TransactionKind::Send);
                assert_eq!(field, "to_address");
            },
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_extract_send_rejects_invalid_amount() {
        for amount in [json!("1.5"), json!(1e30), json!(-3), json!(true)] {
            let err = extract(TransactionKind::Send, &json!({ "to_address": "aa", "amount": amount })).unwrap_err();
            match err {
                Error::MalformedTransaction { kind, field } => {
                    assert_eq!(kind, TransactionKind::Send);
                    assert_eq!(field, "amount");
                },
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_extract_send_amount_is_optional() {
        for value in [json!({ "to_address": "aa" }), json!({ "to_address": "aa", "amount": null })] {
            match extract(TransactionKind::Send, &value).unwrap() {
                TransactionMessage::Send(send) => assert_eq!(send.amount, None),
                other => panic!("unexpected message {other:?}"),
            }
        }
    }

    #[test]
    fn test_extract_node_stake_keeps_large_values_exact() {
        let value = json!({
            "chains": ["0001", "0021"],
            "public_key": { "type": "crypto/ed25519_public_key", "value": "abcd" },
            "service_url": "https://node.example.com:443",
            "value": "123456789012345678901234567890"
        });

        let TransactionMessage::NodeStake(message) = extract(TransactionKind::NodeStake, &value).unwrap() else {
            panic!("expected a node stake");
        };

        assert_eq!(message.chains, vec!["0001", "0021"]);
        assert_eq!(message.service_url, "https://node.example.com:443");
        assert_eq!(message.value.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_extract_app_stake_rejects_non_string_chains() {
        let value = json!({ "chains": ["0001", 21], "value": "1000" });
        assert!(matches!(
            extract(TransactionKind::AppStake, &value),
            Err(Error::MalformedTransaction { .. })
        ));
    }

    #[test]
    fn test_extract_unstake_and_unjail_addresses() {
        let app = extract(
            TransactionKind::AppUnstake,
            &json!({ "application_address": "fa08efadee9eaa9d5549bccd6087002a5f47c0e2" }),
        )
        .unwrap();
        assert_eq!(
            app,
            TransactionMessage::AppUnstake(AddressMessage {
                address: "fa08efadee9eaa9d5549bccd6087002a5f47c0e2".to_string()
            })
        );

        let legacy = extract(TransactionKind::NodeUnjail, &json!({ "address": "aa" })).unwrap();
        assert_eq!(legacy, TransactionMessage::NodeUnjail(AddressMessage { address: "aa".into() }));

        let current = extract(
            TransactionKind::NodeUnstake,
            &json!({ "validator_address": "bb", "signer_address": "cc" }),
        )
        .unwrap();
        assert_eq!(current, TransactionMessage::NodeUnstake(AddressMessage { address: "bb".into() }));
    }

    #[test]
    fn test_extract_claim_navigates_header() {
        let value = json!({
            "header": {
                "app_public_key": "e3f6275e78a5bc93e98a927a662693ad723906df8897900f2ed6ed91642f8b08",
                "chain": "0021",
                "session_height": 43201
            },
            "total_proofs": "1502",
            "expiration_height": 0
        });

        let message = extract(TransactionKind::Claim, &value).unwrap();

        assert_eq!(
            message,
            TransactionMessage::Claim(ClaimMessage {
                chain: "0021".to_string(),
                session_height: 43201,
                app_public_key: "e3f6275e78a5bc93e98a927a662693ad723906df8897900f2ed6ed91642f8b08".to_string(),
                total_proofs: BigUint::from(1502u32),
            })
        );
    }

    #[test]
    fn test_extract_claim_without_header_is_malformed() {
        let err = extract(TransactionKind::Claim, &json!({ "total_proofs": "3" })).unwrap_err();
        match err {
            Error::MalformedTransaction { kind, field } => {
                assert_eq!(kind, TransactionKind::Claim);
                assert_eq!(field, "header.chain");
            },
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_extract_proof_navigates_leaf() {
        let value = json!({
            "leaf": {
                "type": "pocketcore/relay_proof",
                "value": {
                    "aat": { "app_pub_key": "a3edc0d9", "client_pub_key": "ff", "signature": "", "version": "0.0.1" },
                    "blockchain": "0009",
                    "request_hash": "9f86d081884c7d659a2feaa0c55ad015",
                    "session_block_height": "43201"
                }
            }
        });

        let message = extract(TransactionKind::Proof, &value).unwrap();

        assert_eq!(
            message,
            TransactionMessage::Proof(ProofMessage {
                chain: "0009".to_string(),
                session_height: 43201,
                app_public_key: "a3edc0d9".to_string(),
                request_hash: "9f86d081884c7d659a2feaa0c55ad015".to_string(),
            })
        );
    }

    #[test]
    fn test_extract_proof_with_null_leaf_is_malformed() {
        let err = extract(TransactionKind::Proof, &json!({ "leaf": null })).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedTransaction { kind: TransactionKind::Proof, .. }
        ));
    }

    #[test]
    fn test_unknown_has_no_payload() {
        let message = extract(TransactionKind::Unknown, &Value::Null).unwrap();
        assert_eq!(message, TransactionMessage::Unknown);
        assert_eq!(message.kind(), TransactionKind::Unknown);
    }

    #[test]
    fn test_serializes_camel_case() {
        let message = TransactionMessage::NodeStake(NodeStakeMessage {
            chains: vec!["0001".into()],
            service_url: "https://n.example".into(),
            value: BigUint::from(15_000_000_000u64),
        });

        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(
            json,
            json!({
                "type": "NodeStake",
                "value": { "chains": ["0001"], "serviceUrl": "https://n.example", "value": "15000000000" }
            })
        );
    }
}
