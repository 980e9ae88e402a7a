// db/customerdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::{ProcClient, QueryClient};
use crate::dtos::customerdtos::{CustomerAnalytics, CustomerDetail};

pub struct NewCustomer {
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

pub struct CustomerChanges {
    pub phone_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

#[async_trait]
pub trait CustomerExt {
    /// Registers the user row and the customer profile in one transaction.
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerDetail, Error>;

    async fn get_customer_by_id(&self, customer_id: Uuid)
        -> Result<Option<CustomerDetail>, Error>;

    async fn list_customers(&self) -> Result<Vec<CustomerDetail>, Error>;

    async fn update_customer(
        &self,
        customer_id: Uuid,
        changes: CustomerChanges,
    ) -> Result<Option<CustomerDetail>, Error>;

    async fn delete_customer(&self, customer_id: Uuid) -> Result<bool, Error>;

    async fn get_customers_by_city(&self, city: &str) -> Result<Vec<CustomerDetail>, Error>;

    async fn get_customer_analytics(&self) -> Result<Vec<CustomerAnalytics>, Error>;
}

const CUSTOMER_DETAIL_SELECT: &str = r#"
    SELECT
        c.id, u.email, u.phone_number, c.first_name, c.last_name, c.address,
        c.city, c.postal_code, c.customer_rating, c.total_jobs_posted
    FROM customers c
    JOIN users u ON u.id = c.id
"#;

#[async_trait]
impl CustomerExt for QueryClient {
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerDetail, Error> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (email, password_hash, phone_number, user_type)
            VALUES ($1, $2, $3, 'customer'::user_type)
            RETURNING id
            "#,
        )
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(&customer.phone_number)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO customers (id, first_name, last_name, address, city, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.postal_code)
        .execute(&mut *tx)
        .await?;

        let detail = sqlx::query_as::<_, CustomerDetail>(&format!(
            "{CUSTOMER_DETAIL_SELECT} WHERE c.id = $1"
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(detail)
    }

    async fn get_customer_by_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<CustomerDetail>, Error> {
        sqlx::query_as::<_, CustomerDetail>(&format!("{CUSTOMER_DETAIL_SELECT} WHERE c.id = $1"))
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_customers(&self) -> Result<Vec<CustomerDetail>, Error> {
        sqlx::query_as::<_, CustomerDetail>(&format!(
            "{CUSTOMER_DETAIL_SELECT} ORDER BY c.total_jobs_posted DESC LIMIT 100"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_customer(
        &self,
        customer_id: Uuid,
        changes: CustomerChanges,
    ) -> Result<Option<CustomerDetail>, Error> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, address = $4, city = $5, postal_code = $6
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(customer_id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.postal_code)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        sqlx::query("UPDATE users SET phone_number = $2 WHERE id = $1")
            .bind(customer_id)
            .bind(&changes.phone_number)
            .execute(&mut *tx)
            .await?;

        let detail = sqlx::query_as::<_, CustomerDetail>(&format!(
            "{CUSTOMER_DETAIL_SELECT} WHERE c.id = $1"
        ))
        .bind(customer_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(detail))
    }

    async fn delete_customer(&self, customer_id: Uuid) -> Result<bool, Error> {
        let deleted = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM users WHERE id = $1 AND user_type = 'customer'::user_type RETURNING id",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted.is_some())
    }

    async fn get_customers_by_city(&self, city: &str) -> Result<Vec<CustomerDetail>, Error> {
        sqlx::query_as::<_, CustomerDetail>(&format!("{CUSTOMER_DETAIL_SELECT} WHERE c.city = $1"))
            .bind(city)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_customer_analytics(&self) -> Result<Vec<CustomerAnalytics>, Error> {
        sqlx::query_as::<_, CustomerAnalytics>(
            r#"
            SELECT
                c.id,
                c.first_name || ' ' || c.last_name AS customer_name,
                c.city, c.customer_rating, c.total_jobs_posted,
                (SELECT COUNT(*) FROM jobs j
                 WHERE j.customer_id = c.id
                   AND j.status IN ('open'::job_status, 'assigned'::job_status)) AS active_jobs,
                (SELECT COUNT(*) FROM bookings b
                 JOIN jobs j ON j.id = b.job_id
                 WHERE j.customer_id = c.id
                   AND b.status = 'completed'::booking_status) AS completed_jobs,
                COALESCE((SELECT SUM(j.budget) FROM jobs j
                          WHERE j.customer_id = c.id), 0) AS total_spend
            FROM customers c
            ORDER BY total_spend DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl CustomerExt for ProcClient {
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerDetail, Error> {
        sqlx::query_as::<_, CustomerDetail>(
            "SELECT * FROM sp_create_customer($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(customer.email)
        .bind(customer.password_hash)
        .bind(customer.phone_number)
        .bind(customer.first_name)
        .bind(customer.last_name)
        .bind(customer.address)
        .bind(customer.city)
        .bind(customer.postal_code)
        .fetch_one(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn get_customer_by_id(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<CustomerDetail>, Error> {
        sqlx::query_as::<_, CustomerDetail>("SELECT * FROM fn_get_customer($1)")
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_customers(&self) -> Result<Vec<CustomerDetail>, Error> {
        sqlx::query_as::<_, CustomerDetail>("SELECT * FROM fn_list_customers()")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_customer(
        &self,
        customer_id: Uuid,
        changes: CustomerChanges,
    ) -> Result<Option<CustomerDetail>, Error> {
        sqlx::query_as::<_, CustomerDetail>(
            "SELECT * FROM sp_update_customer($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(customer_id)
        .bind(changes.phone_number)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.address)
        .bind(changes.city)
        .bind(changes.postal_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(super::db::routine_error)
    }

    async fn delete_customer(&self, customer_id: Uuid) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT sp_delete_customer($1)")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_customers_by_city(&self, city: &str) -> Result<Vec<CustomerDetail>, Error> {
        sqlx::query_as::<_, CustomerDetail>("SELECT * FROM fn_customers_by_city($1)")
            .bind(city)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_customer_analytics(&self) -> Result<Vec<CustomerAnalytics>, Error> {
        sqlx::query_as::<_, CustomerAnalytics>("SELECT * FROM vw_customer_analytics")
            .fetch_all(&self.pool)
            .await
    }
}
