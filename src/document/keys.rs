//! Member names with a fixed meaning in a JSON:API document.

pub const ID: &str = "id";
pub const TYPE: &str = "type";
pub const ATTRIBUTES: &str = "attributes";
pub const RELATIONSHIPS: &str = "relationships";
pub const LINKS: &str = "links";
pub const META: &str = "meta";
pub const DATA: &str = "data";
pub const INCLUDED: &str = "included";

