//! Shared domain types for the Ethereum JSON-RPC surface.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::rpc::{parse_hex_u64, HexError};

// ==============================================================================
// Block Identifier
// ==============================================================================

/// Block selector passed as the second parameter of state queries.
///
/// Serialized as either a tag (`"latest"`, `"pending"`, ...) or a
/// `0x`-prefixed hex quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockId {
    #[default]
    Latest,
    Pending,
    Earliest,
    Safe,
    Finalized,
    Number(u64),
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Latest => f.write_str("latest"),
            BlockId::Pending => f.write_str("pending"),
            BlockId::Earliest => f.write_str("earliest"),
            BlockId::Safe => f.write_str("safe"),
            BlockId::Finalized => f.write_str("finalized"),
            BlockId::Number(n) => write!(f, "{n:#x}"),
        }
    }
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        BlockId::Number(number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBlockIdError {
    #[error("invalid block number `{input}`: {source}")]
    Hex {
        input: String,
        #[source]
        source: HexError,
    },

    #[error("unknown block tag `{0}`; expected latest, pending, earliest, safe, finalized or a number")]
    UnknownTag(String),
}

impl FromStr for BlockId {
    type Err = ParseBlockIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(BlockId::Latest),
            "pending" => Ok(BlockId::Pending),
            "earliest" => Ok(BlockId::Earliest),
            "safe" => Ok(BlockId::Safe),
            "finalized" => Ok(BlockId::Finalized),
            _ if s.starts_with("0x") || s.starts_with("0X") => parse_hex_u64(s)
                .map(BlockId::Number)
                .map_err(|source| ParseBlockIdError::Hex {
                    input: s.to_owned(),
                    source,
                }),
            _ => s
                .parse::<u64>()
                .map(BlockId::Number)
                .map_err(|_| ParseBlockIdError::UnknownTag(s.to_owned())),
        }
    }
}
