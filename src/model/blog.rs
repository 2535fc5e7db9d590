//! Articles with an author and comments, as in the JSON:API reference example.

use crate::schema::{Resource, Schema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub author: People,
    pub comments: Vec<Comment>,
}

/// Attribute names are kebab-case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct People {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "first-name")]
    pub first_name: String,
    #[serde(rename = "last-name")]
    pub last_name: String,
    pub twitter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<SelfLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfLink {
    #[serde(rename = "self")]
    pub this: String,
}

impl Article {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: People,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: "articles".to_string(),
            title: title.into(),
            author,
            comments,
        }
    }
}

impl People {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        twitter: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: "people".to_string(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            twitter: twitter.into(),
            links: None,
        }
    }

    pub fn with_link(mut self, this: impl Into<String>) -> Self {
        self.links = Some(SelfLink { this: this.into() });
        self
    }
}

impl Comment {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: "comments".to_string(),
            body: body.into(),
            links: None,
        }
    }

    pub fn with_link(mut self, this: impl Into<String>) -> Self {
        self.links = Some(SelfLink { this: this.into() });
        self
    }
}

impl Resource for Article {
    fn schema() -> Schema {
        Schema::new()
            .attribute("title")
            .to_one("author", People::schema)
            .to_many("comments", Comment::schema)
    }
}

impl Resource for People {
    fn schema() -> Schema {
        Schema::new()
            .attribute("first-name")
            .attribute("last-name")
            .attribute("twitter")
    }
}

impl Resource for Comment {
    fn schema() -> Schema {
        Schema::new().attribute("body")
    }
}
