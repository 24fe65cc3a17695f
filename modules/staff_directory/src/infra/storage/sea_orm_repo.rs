//! SeaORM-backed repository implementations for the domain ports.
//!
//! Generic over `C: ConnectionTrait`, so they can be built on a
//! `DatabaseConnection` or a transaction.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::contract::{Employee, EmployeeFields, User};
use crate::domain::repo::{EmployeesRepository, UsersRepository};
use crate::infra::storage::entity::employee::{
    ActiveModel as EmployeeAM, Column as EmployeeColumn, Entity as EmployeeEntity,
};
use crate::infra::storage::entity::user::{
    ActiveModel as UserAM, Column as UserColumn, Entity as UserEntity,
};

pub struct SeaOrmEmployeesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmEmployeesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> EmployeesRepository for SeaOrmEmployeesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Employee>> {
        let found = EmployeeEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Employee>> {
        let rows = EmployeeEntity::find()
            .order_by_asc(EmployeeColumn::Id)
            .all(&self.conn)
            .await
            .context("list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, fields: EmployeeFields) -> anyhow::Result<Employee> {
        let m = EmployeeAM {
            id: NotSet,
            name: Set(fields.name),
            role: Set(fields.role),
            email: Set(fields.email),
        };
        let model = m.insert(&self.conn).await.context("insert failed")?;
        Ok(model.into())
    }

    async fn update(&self, id: i32, fields: EmployeeFields) -> anyhow::Result<bool> {
        let res = EmployeeEntity::update_many()
            .col_expr(EmployeeColumn::Name, fields.name.into())
            .col_expr(EmployeeColumn::Role, fields.role.into())
            .col_expr(EmployeeColumn::Email, fields.email.into())
            .filter(EmployeeColumn::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("update failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = EmployeeEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .one(&self.conn)
            .await
            .context("find_by_username failed")?;
        Ok(found.map(Into::into))
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .count(&self.conn)
            .await
            .context("username_exists failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, username: &str, password_hash: &str) -> anyhow::Result<User> {
        let m = UserAM {
            id: NotSet,
            username: Set(username.to_owned()),
            password_hash: Set(password_hash.to_owned()),
        };
        let model = m.insert(&self.conn).await.context("insert failed")?;
        Ok(model.into())
    }
}
