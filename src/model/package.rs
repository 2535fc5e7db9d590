use crate::schema::{Resource, Schema};
use serde::{Deserialize, Serialize};

/// A parcel whose attributes are all optional, decoded from collection
/// endpoints that carry pagination links at the document root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub quantity_expected: Option<u32>,
    pub recipient: Option<String>,
    pub sender: Option<String>,
    pub available_since: Option<String>,
    pub status: Option<PackageStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PaginationLinks>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaginationLinks {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatus {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: Option<String>,
    pub last_update: String,
}

impl Resource for Package {
    fn schema() -> Schema {
        Schema::new()
            .attribute("title")
            .attribute("quantityExpected")
            .attribute("recipient")
            .attribute("sender")
            .attribute("availableSince")
            .to_one("status", PackageStatus::schema)
    }
}

impl Resource for PackageStatus {
    fn schema() -> Schema {
        Schema::new().attribute("code").attribute("lastUpdate")
    }
}
