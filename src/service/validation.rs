use crate::models::{FieldErrors, InvoiceStatus};
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use serde::Deserialize;

/// 发票表单原始输入 (字段名与表单控件一致; id/date 不从表单读取)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// 校验通过后的类型化字段集
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFields {
    pub customer_id: String,
    pub amount: BigDecimal,
    pub status: InvoiceStatus,
}

impl InvoiceFields {
    /// 美元金额转整数分 (×100, 避免浮点货币表示; 超出 i64 时饱和)
    pub fn amount_in_cents(&self) -> i64 {
        (&self.amount * BigDecimal::from(100))
            .with_scale(0)
            .to_i64()
            .unwrap_or(i64::MAX)
    }
}

/// 逐字段校验表单输入, 汇总全部违规消息后一次性返回
pub fn validate_invoice_form(form: &InvoiceForm) -> Result<InvoiceFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = match &form.customer_id {
        Some(v) => Some(v.clone()),
        None => {
            errors.push("customerId", "Please select a customer.");
            None
        }
    };

    // 强制转换为数值且必须严格大于 0; 无法解析与 ≤0 同等对待
    let amount = match form
        .amount
        .as_deref()
        .and_then(|raw| raw.trim().parse::<BigDecimal>().ok())
    {
        Some(a) if a > BigDecimal::zero() => Some(a),
        _ => {
            errors.push("amount", "Amount must be greater than $0.");
            None
        }
    };

    let status = match form.status.as_deref().and_then(InvoiceStatus::parse) {
        Some(s) => Some(s),
        None => {
            errors.push("status", "Please select a status.");
            None
        }
    };

    match (customer_id, amount, status) {
        (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => Ok(InvoiceFields {
            customer_id,
            amount,
            status,
        }),
        _ => Err(errors),
    }
}
