//! Person database entity for SeaORM.
//!
//! The same table shape exists in every datasource.

use sea_orm::entity::prelude::*;

use domain::Person;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "person")]
pub struct Model {
    /// Caller-assigned key, never generated by the store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Person {
    fn from(model: Model) -> Self {
        Person {
            id: model.id,
            name: model.name,
        }
    }
}
