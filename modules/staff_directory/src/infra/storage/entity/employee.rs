use sea_orm::entity::prelude::*;

use crate::contract::Employee;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub role: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            role: m.role,
            email: m.email,
        }
    }
}
