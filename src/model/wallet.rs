use crate::schema::{Resource, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub bitcoins: Vec<BitcoinWallet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitcoinWallet {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub keys: Vec<String>,
    pub additional: BitcoinWalletMeta,
}

/// Carries `id` and `type` keys but is declared as an attribute of
/// [`BitcoinWallet`], so it is embedded inline rather than included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitcoinWalletMeta {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub info: String,
    pub link: String,
}

impl Wallet {
    pub fn new(id: impl Into<String>, bitcoins: Vec<BitcoinWallet>) -> Self {
        Self {
            id: id.into(),
            kind: "wallets".to_string(),
            bitcoins,
        }
    }
}

impl BitcoinWallet {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "bitcoinwallets".to_string(),
            keys: vec!["kA".to_string(), "kB".to_string(), "kC".to_string()],
            additional: BitcoinWalletMeta {
                id: "add0".to_string(),
                kind: "additionals".to_string(),
                info: "meta:info".to_string(),
                link: "meta:link".to_string(),
            },
        }
    }
}

impl Resource for Wallet {
    fn schema() -> Schema {
        Schema::new().to_many("bitcoins", BitcoinWallet::schema)
    }
}

impl Resource for BitcoinWallet {
    fn schema() -> Schema {
        Schema::new().attribute("keys").attribute("additional")
    }
}
