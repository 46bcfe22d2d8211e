use crate::db::queries;
use crate::models::{InvoiceChanges, NewInvoice};
use async_trait::async_trait;
use sqlx::PgPool;

/// 发票存储接口, 每个方法对应一条原子 SQL 语句
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), sqlx::Error>;
    async fn update(&self, id: &str, changes: &InvoiceChanges) -> Result<(), sqlx::Error>;
    async fn delete(&self, id: &str) -> Result<(), sqlx::Error>;
}

/// Postgres 实现
pub struct PgInvoiceStore {
    pool: PgPool,
}

impl PgInvoiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    async fn insert(&self, invoice: &NewInvoice) -> Result<(), sqlx::Error> {
        queries::insert_invoice(&self.pool, invoice).await
    }

    async fn update(&self, id: &str, changes: &InvoiceChanges) -> Result<(), sqlx::Error> {
        queries::update_invoice(&self.pool, id, changes).await
    }

    async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        queries::delete_invoice(&self.pool, id).await
    }
}
