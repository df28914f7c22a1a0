use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic kind of a chain transaction, derived from its message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Send,
    AppStake,
    AppUnstake,
    NodeStake,
    NodeUnstake,
    NodeUnjail,
    Claim,
    Proof,
    /// A message type this client does not know about. Not an error: newer
    /// chain versions add message types and history must keep decoding.
    Unknown,
}

impl TransactionKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Send => "Send",
            Self::AppStake => "AppStake",
            Self::AppUnstake => "AppUnstake",
            Self::NodeStake => "NodeStake",
            Self::NodeUnstake => "NodeUnstake",
            Self::NodeUnjail => "NodeUnjail",
            Self::Claim => "Claim",
            Self::Proof => "Proof",
            Self::Unknown => "Unknown",
        }
    }

    pub fn is_app_message(&self) -> bool {
        matches!(self, Self::AppStake | Self::AppUnstake)
    }

    pub fn is_node_message(&self) -> bool {
        matches!(
            self,
            Self::NodeStake | Self::NodeUnjail | Self::NodeUnstake | Self::Claim | Self::Proof
        )
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Maps the chain's amino message type tag (`stdTx.msg.type`) to a
/// [`TransactionKind`]. Matching is exact and case sensitive.
pub fn classify(message_type: &str) -> TransactionKind {
    match message_type {
        "apps/MsgAppStake" => TransactionKind::AppStake,
        "apps/MsgAppBeginUnstake" => TransactionKind::AppUnstake,
        "pocketcore/claim" => TransactionKind::Claim,
        "pocketcore/proof" => TransactionKind::Proof,
        "pos/Send" => TransactionKind::Send,
        "pos/MsgProtoStake" | "pos/MsgStake" | "pos/8.0MsgStake" => TransactionKind::NodeStake,
        "pos/MsgBeginUnstake" | "pos/8.0MsgBeginUnstake" => TransactionKind::NodeUnstake,
        "pos/MsgUnjail" | "pos/8.0MsgUnjail" => TransactionKind::NodeUnjail,
        _ => TransactionKind::Unknown,
    }
}
