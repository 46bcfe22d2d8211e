use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 发票状态 (固定枚举: pending / paid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// 数据库存储值
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// 从表单原始值解析, 非法值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

/// 待插入的发票记录 (id 由数据库分配, date 由系统在创建时取当天)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub customer_id: String,
    /// 金额, 整数分 (美元 ×100)
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// 发票更新字段集 (id 与 date 创建后不可变)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}
