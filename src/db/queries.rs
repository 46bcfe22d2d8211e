use crate::models::{InvoiceChanges, NewInvoice};
use sqlx::PgPool;

/// 插入发票记录
pub async fn insert_invoice(pool: &PgPool, invoice: &NewInvoice) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO invoices (customer_id, amount, status, date)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&invoice.customer_id)
    .bind(invoice.amount_cents)
    .bind(invoice.status.as_str())
    .bind(invoice.date)
    .execute(pool)
    .await?;
    Ok(())
}

/// 按 id 更新发票 (date 不重算)
pub async fn update_invoice(
    pool: &PgPool,
    id: &str,
    changes: &InvoiceChanges,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE invoices
        SET customer_id = $1, amount = $2, status = $3
        WHERE id = $4
        "#,
    )
    .bind(&changes.customer_id)
    .bind(changes.amount_cents)
    .bind(changes.status.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// 按 id 删除发票 (id 不存在时是存储层面的空操作)
pub async fn delete_invoice(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DELETE FROM invoices
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
