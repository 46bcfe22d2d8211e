use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 字段错误表: 字段名 -> 错误消息列表 (保序, 缺席的字段视为合法)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors(pub IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 动作执行结果, 回传给表单用于重新渲染
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionState {
    /// 仅含提示消息的状态
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    /// 校验失败状态: 字段错误 + 总体提示
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }
}

/// 动作结束方式: 成功路径跳转, 失败路径回传状态重渲染
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Redirect(String),
    Render(ActionState),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_preserve_insertion_order() {
        let mut errors = FieldErrors::default();
        errors.push("customerId", "Please select a customer.");
        errors.push("amount", "Amount must be greater than $0.");
        errors.push("status", "Please select a status.");

        let keys: Vec<&str> = errors.0.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["customerId", "amount", "status"]);
    }

    #[test]
    fn action_state_skips_absent_fields_in_json() {
        let state = ActionState::message("Deleted Invoice.");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Deleted Invoice." }));
    }

    #[test]
    fn invalid_state_serializes_field_errors_by_form_name() {
        let mut errors = FieldErrors::default();
        errors.push("customerId", "Please select a customer.");
        let state = ActionState::invalid(errors, "Missing Fields. Failed to Create Invoice.");

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json["errors"]["customerId"],
            serde_json::json!(["Please select a customer."])
        );
    }
}
