// db/categorydb.rs
use async_trait::async_trait;
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::db::{ProcClient, QueryClient};
use crate::models::jobmodel::ServiceCategory;

pub struct NewCategory {
    pub category_name: String,
    pub category_description: Option<String>,
    pub icon_url: Option<String>,
    pub base_rate: Option<BigDecimal>,
}

pub struct CategoryChanges {
    pub category_name: String,
    pub category_description: Option<String>,
    pub icon_url: Option<String>,
    pub base_rate: Option<BigDecimal>,
    pub is_active: bool,
}

#[async_trait]
pub trait CategoryExt {
    async fn create_category(&self, category: NewCategory) -> Result<ServiceCategory, Error>;

    async fn get_category_by_id(
        &self,
        category_id: Uuid,
    ) -> Result<Option<ServiceCategory>, Error>;

    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, Error>;

    async fn update_category(
        &self,
        category_id: Uuid,
        changes: CategoryChanges,
    ) -> Result<Option<ServiceCategory>, Error>;

    async fn delete_category(&self, category_id: Uuid) -> Result<bool, Error>;

    async fn get_active_categories(&self) -> Result<Vec<ServiceCategory>, Error>;
}

const CATEGORY_COLUMNS: &str =
    "id, category_name, category_description, icon_url, base_rate, is_active";

#[async_trait]
impl CategoryExt for QueryClient {
    async fn create_category(&self, category: NewCategory) -> Result<ServiceCategory, Error> {
        sqlx::query_as::<_, ServiceCategory>(&format!(
            r#"
            INSERT INTO service_categories
            (category_name, category_description, icon_url, base_rate)
            VALUES ($1, $2, $3, $4)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(category.category_name)
        .bind(category.category_description)
        .bind(category.icon_url)
        .bind(category.base_rate)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_category_by_id(
        &self,
        category_id: Uuid,
    ) -> Result<Option<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM service_categories WHERE id = $1"
        ))
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM service_categories ORDER BY category_name"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        changes: CategoryChanges,
    ) -> Result<Option<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>(&format!(
            r#"
            UPDATE service_categories
            SET category_name = $2, category_description = $3, icon_url = $4,
                base_rate = $5, is_active = $6
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(category_id)
        .bind(changes.category_name)
        .bind(changes.category_description)
        .bind(changes.icon_url)
        .bind(changes.base_rate)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<bool, Error> {
        let deleted = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM service_categories WHERE id = $1 RETURNING id",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.is_some())
    }

    async fn get_active_categories(&self) -> Result<Vec<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM service_categories WHERE is_active ORDER BY category_name"
        ))
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl CategoryExt for ProcClient {
    async fn create_category(&self, category: NewCategory) -> Result<ServiceCategory, Error> {
        sqlx::query_as::<_, ServiceCategory>("SELECT * FROM sp_create_category($1, $2, $3, $4)")
            .bind(category.category_name)
            .bind(category.category_description)
            .bind(category.icon_url)
            .bind(category.base_rate)
            .fetch_one(&self.pool)
            .await
            .map_err(super::db::routine_error)
    }

    async fn get_category_by_id(
        &self,
        category_id: Uuid,
    ) -> Result<Option<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>("SELECT * FROM fn_get_category($1)")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>("SELECT * FROM fn_list_categories()")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_category(
        &self,
        category_id: Uuid,
        changes: CategoryChanges,
    ) -> Result<Option<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>(
            "SELECT * FROM sp_update_category($1, $2, $3, $4, $5, $6)",
        )
        .bind(category_id)
        .bind(changes.category_name)
        .bind(changes.category_description)
        .bind(changes.icon_url)
        .bind(changes.base_rate)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn delete_category(&self, category_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT sp_delete_category($1)")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_active_categories(&self) -> Result<Vec<ServiceCategory>, Error> {
        sqlx::query_as::<_, ServiceCategory>("SELECT * FROM fn_active_categories()")
            .fetch_all(&self.pool)
            .await
    }
}
