//! Sample record types implementing the [`Resource`](crate::schema::Resource) trait.
//!
//! They cover the shapes the codec has to handle: optional to-one links
//! ([`User`]), to-many with shared targets ([`Car`]), renamed fields and
//! resource links ([`Article`]), nested data that carries `id`/`type` but is
//! declared an attribute ([`Wallet`]), and all-optional payloads ([`Package`]).

pub mod blog;
pub mod garage;
pub mod package;
pub mod user;
pub mod wallet;

pub use blog::*;
pub use garage::*;
pub use package::*;
pub use user::*;
pub use wallet::*;
