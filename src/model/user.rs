use crate::schema::{Resource, Schema};
use serde::{Deserialize, Serialize};

/// A registered user with an optional location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub info: String,
    pub location: Option<Location>,
}

/// Where a user lives. Identified, so it is hoisted into `included`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub region: Region,
}

/// Plain nested data: it has an `id` but no `type`, so it stays an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

impl User {
    pub const TYPE: &'static str = "users";

    pub fn new(id: impl Into<String>, info: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            id: id.into(),
            kind: Self::TYPE.to_string(),
            info: info.into(),
            location,
        }
    }
}

impl Location {
    pub const TYPE: &'static str = "locations";

    pub fn new(id: impl Into<String>, region: Region) -> Self {
        Self {
            id: id.into(),
            kind: Self::TYPE.to_string(),
            region,
        }
    }
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Resource for User {
    fn schema() -> Schema {
        Schema::new()
            .attribute("info")
            .to_one("location", Location::schema)
    }
}

impl Resource for Location {
    fn schema() -> Schema {
        Schema::new().attribute("region")
    }
}
