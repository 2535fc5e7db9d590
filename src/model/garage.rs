//! Cars on wheels on tires, and cash machines.
//!
//! Several wheels share one tire, so the tire must be included exactly once.

use crate::schema::{Resource, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub wheels: Vec<Wheel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wheel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub tire: Tire,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tire {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub model: String,
}

impl Car {
    pub fn new(id: impl Into<String>, name: impl Into<String>, wheels: Vec<Wheel>) -> Self {
        Self {
            id: id.into(),
            kind: "cars".to_string(),
            name: name.into(),
            wheels,
        }
    }
}

impl Wheel {
    /// The wheel's name is derived from the tire model it is fitted with.
    pub fn new(id: impl Into<String>, tire: Tire) -> Self {
        let id = id.into();
        Self {
            name: format!("{}-{}", id, tire.model),
            id,
            kind: "wheels".to_string(),
            tire,
        }
    }
}

impl Tire {
    pub fn new(id: impl Into<String>, name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "tires".to_string(),
            name: name.into(),
            model: model.into(),
        }
    }
}

impl Resource for Car {
    fn schema() -> Schema {
        Schema::new().attribute("name").to_many("wheels", Wheel::schema)
    }
}

impl Resource for Wheel {
    fn schema() -> Schema {
        Schema::new().attribute("name").to_one("tire", Tire::schema)
    }
}

impl Resource for Tire {
    fn schema() -> Schema {
        Schema::new().attribute("name").attribute("model")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atm {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub cash: Vec<Cash>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cash {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: u32,
    pub count: u32,
}

impl Atm {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cash: Vec<Cash>) -> Self {
        Self {
            id: id.into(),
            kind: "atms".to_string(),
            name: name.into(),
            cash,
        }
    }
}

impl Cash {
    pub fn new(id: impl Into<String>, value: u32, count: u32) -> Self {
        Self {
            id: id.into(),
            kind: "cashs".to_string(),
            value,
            count,
        }
    }
}

impl Resource for Atm {
    fn schema() -> Schema {
        Schema::new().attribute("name").to_many("cash", Cash::schema)
    }
}

impl Resource for Cash {
    fn schema() -> Schema {
        Schema::new().attribute("value").attribute("count")
    }
}
