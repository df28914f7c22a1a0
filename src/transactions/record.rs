use num_bigint::BigUint;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::units::{Amount, amount_from_json, serialize_amount, u64_from_json};

use super::kind::{TransactionKind, classify};
use super::message::{TransactionMessage, extract};

/// A decoded entry of an account's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub height: u64,
    /// Position of the transaction inside its block, when the gateway reports it.
    pub index: Option<u64>,
    #[serde(serialize_with = "serialize_amount")]
    pub fee: Amount,
    pub memo: Option<String>,
    pub kind: TransactionKind,
    pub message: TransactionMessage,
}

/// Decodes one raw entry of the `txs` array returned by the account history
/// endpoint.
///
/// The message type is read first so that any later failure is reported
/// against the transaction's kind. The fee is the sum of all fee coins, which
/// in practice is a single uPOKT entry.
pub fn decode_transaction(raw: &Value) -> Result<TransactionRecord> {
    let std_tx = raw.get("stdTx");
    let msg = std_tx.and_then(|tx| tx.get("msg"));

    let message_type = msg
        .and_then(|m| m.get("type"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::malformed(TransactionKind::Unknown, "stdTx.msg.type"))?;
    let kind = classify(message_type);

    let hash = raw
        .get("hash")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::malformed(kind, "hash"))?
        .to_string();
    let height = raw
        .get("height")
        .and_then(u64_from_json)
        .ok_or_else(|| Error::malformed(kind, "height"))?;
    let index = raw.get("index").and_then(u64_from_json);

    let fee = sum_fee(kind, std_tx.and_then(|tx| tx.get("fee")))?;
    let memo = std_tx
        .and_then(|tx| tx.get("memo"))
        .and_then(Value::as_str)
        .filter(|memo| !memo.is_empty())
        .map(str::to_string);

    let message = match kind {
        TransactionKind::Unknown => TransactionMessage::Unknown,
        _ => {
            let value = msg
                .and_then(|m| m.get("value"))
                .ok_or_else(|| Error::malformed(kind, "stdTx.msg.value"))?;
            extract(kind, value)?
        },
    };

    Ok(TransactionRecord {
        hash,
        height,
        index,
        fee,
        memo,
        kind,
        message,
    })
}

fn sum_fee(kind: TransactionKind, fee: Option<&Value>) -> Result<Amount> {
    let Some(coins) = fee.filter(|f| !f.is_null()) else {
        return Ok(BigUint::default());
    };
    let coins = coins.as_array().ok_or_else(|| Error::malformed(kind, "stdTx.fee"))?;

    coins.iter().try_fold(BigUint::default(), |total, coin| {
        let amount = coin
            .get("amount")
            .and_then(amount_from_json)
            .ok_or_else(|| Error::malformed(kind, "stdTx.fee.amount"))?;
        Ok(total + amount)
    })
}

/// The account shape an address most likely has, judged from its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Account,
    Application,
    Node,
}

impl AccountKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Account => "Normal Account",
            Self::Application => "Application Account",
            Self::Node => "Node Account",
        }
    }
}

/// Infers whether an address is a plain account, an application or a node.
///
/// The chain has no endpoint for this, so the history is scanned and the first
/// stake related message decides. This is a heuristic: an address that staked
/// outside the fetched page reads as a plain account.
pub fn infer_account_kind(records: &[TransactionRecord]) -> AccountKind {
    records
        .iter()
        .find_map(|record| {
            if record.kind.is_app_message() {
                Some(AccountKind::Application)
            } else if record.kind.is_node_message() {
                Some(AccountKind::Node)
            } else {
                None
            }
        })
        .unwrap_or(AccountKind::Account)
}

/// Reverses a page of history as received from the gateway into feed order.
/// Applying it twice restores the original order.
pub fn into_feed_order<T>(mut records: Vec<T>) -> Vec<T> {
    records.reverse();
    records
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw_send(hash: &str, height: u64) -> Value {
        json!({
            "hash": hash,
            "height": height,
            "index": 3,
            "stdTx": {
                "entropy": 4412381,
                "fee": [{ "amount": "10000", "denom": "upokt" }],
                "memo": "",
                "msg": {
                    "type": "pos/Send",
                    "value": {
                        "amount": "1000000",
                        "from_address": "3808c2de7d2e8eeaa2e13768feb78b10b13c8699",
                        "to_address": "fa08efadee9eaa9d5549bccd6087002a5f47c0e2"
                    }
                }
            }
        })
    }

    fn record_of_kind(kind: TransactionKind) -> TransactionRecord {
        TransactionRecord {
            hash: "00".into(),
            height: 1,
            index: None,
            fee: BigUint::from(10_000u32),
            memo: None,
            kind,
            message: TransactionMessage::Unknown,
        }
    }

    #[test]
    fn test_decode_send_transaction() {
        let record = decode_transaction(&raw_send("ABCD", 42)).unwrap();

        assert_eq!(record.hash, "ABCD");
        assert_eq!(record.height, 42);
        assert_eq!(record.index, Some(3));
        assert_eq!(record.fee, BigUint::from(10_000u32));
        assert_eq!(record.memo, None);
        assert_eq!(record.kind, TransactionKind::Send);
        assert_eq!(record.message.kind(), TransactionKind::Send);
    }

    #[test]
    fn test_decode_sums_fee_and_keeps_memo() {
        let mut raw = raw_send("ABCD", 42);
        raw["stdTx"]["fee"] = json!([{ "amount": "10000", "denom": "upokt" }, { "amount": 5, "denom": "upokt" }]);
        raw["stdTx"]["memo"] = json!("rent");

        let record = decode_transaction(&raw).unwrap();

        assert_eq!(record.fee, BigUint::from(10_005u32));
        assert_eq!(record.memo.as_deref(), Some("rent"));
    }

    #[test]
    fn test_decode_unknown_message_type() {
        let raw = json!({
            "hash": "FF",
            "height": "77",
            "stdTx": {
                "fee": [{ "amount": "10000", "denom": "upokt" }],
                "msg": { "type": "gov/msg_dao_transfer", "value": { "whatever": true } }
            }
        });

        let record = decode_transaction(&raw).unwrap();

        assert_eq!(record.kind, TransactionKind::Unknown);
        assert_eq!(record.message, TransactionMessage::Unknown);
        assert_eq!(record.height, 77);
        assert_eq!(record.index, None);
    }

    #[test]
    fn test_decode_without_message_type_is_malformed() {
        let err = decode_transaction(&json!({ "hash": "FF", "height": 1, "stdTx": {} })).unwrap_err();
        assert!(matches!(err, Error::MalformedTransaction { field, .. } if field == "stdTx.msg.type"));
    }

    #[test]
    fn test_decode_without_hash_is_malformed() {
        let mut raw = raw_send("ABCD", 42);
        raw.as_object_mut().unwrap().remove("hash");

        let err = decode_transaction(&raw).unwrap_err();

        assert!(matches!(
            err,
            Error::MalformedTransaction { kind: TransactionKind::Send, field } if field == "hash"
        ));
    }

    #[test]
    fn test_decode_rejects_bad_fee_amount() {
        let mut raw = raw_send("ABCD", 42);
        raw["stdTx"]["fee"] = json!([{ "amount": "1.5", "denom": "upokt" }]);

        assert!(matches!(
            decode_transaction(&raw),
            Err(Error::MalformedTransaction { .. })
        ));
    }

    #[test]
    fn test_infer_account_kind() {
        let plain = vec![record_of_kind(TransactionKind::Send), record_of_kind(TransactionKind::Unknown)];
        assert_eq!(infer_account_kind(&plain), AccountKind::Account);
        assert_eq!(infer_account_kind(&[]), AccountKind::Account);

        let app = vec![record_of_kind(TransactionKind::Send), record_of_kind(TransactionKind::AppStake)];
        assert_eq!(infer_account_kind(&app), AccountKind::Application);

        let node = vec![record_of_kind(TransactionKind::Claim), record_of_kind(TransactionKind::Proof)];
        assert_eq!(infer_account_kind(&node), AccountKind::Node);
    }

    #[test]
    fn test_infer_account_kind_first_match_wins() {
        let records = vec![
            record_of_kind(TransactionKind::NodeUnjail),
            record_of_kind(TransactionKind::AppUnstake),
        ];
        assert_eq!(infer_account_kind(&records), AccountKind::Node);
    }

    #[test]
    fn test_feed_order_reverses_and_is_an_involution() {
        let page = vec![1, 2, 3, 4];
        assert_eq!(into_feed_order(page.clone()), vec![4, 3, 2, 1]);
        assert_eq!(into_feed_order(into_feed_order(page.clone())), page);
    }
}
