//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod person;

pub use person::{ActiveModel as PersonActiveModel, Entity as PersonEntity, Model as PersonModel};
