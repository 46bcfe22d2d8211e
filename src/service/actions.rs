use crate::auth::{AuthErrorKind, CredentialsVerifier, SignInError, SignInForm};
use crate::db::InvoiceStore;
use crate::models::{ActionOutcome, ActionState, InvoiceChanges, NewInvoice};
use crate::service::cache::RouteCache;
use crate::service::validation::{validate_invoice_form, InvoiceForm};
use chrono::Utc;
use std::sync::Arc;

/// 发票列表路由 (成功变更后失效缓存并跳转到此)
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// 发票表单动作: 校验 -> 单条 SQL -> 失效缓存 -> 跳转/重渲染
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    cache: Arc<RouteCache>,
}

impl InvoiceActions {
    pub fn new(store: Arc<dyn InvoiceStore>, cache: Arc<RouteCache>) -> Self {
        Self { store, cache }
    }

    /// 创建发票 (date 取当天, id 由数据库分配)
    pub async fn create_invoice(&self, _prev: &ActionState, form: &InvoiceForm) -> ActionOutcome {
        let fields = match validate_invoice_form(form) {
            Ok(fields) => fields,
            Err(errors) => {
                return ActionOutcome::Render(ActionState::invalid(
                    errors,
                    "Missing Fields. Failed to Create Invoice.",
                ));
            }
        };

        let invoice = NewInvoice {
            customer_id: fields.customer_id.clone(),
            amount_cents: fields.amount_in_cents(),
            status: fields.status,
            date: Utc::now().date_naive(),
        };

        if let Err(e) = self.store.insert(&invoice).await {
            tracing::error!("Failed to create invoice: {}", e);
            return ActionOutcome::Render(ActionState::message(
                "Database Error: Failed to Create Invoice.",
            ));
        }

        self.cache.invalidate(INVOICES_PATH);
        ActionOutcome::Redirect(INVOICES_PATH.to_string())
    }

    /// 更新发票 (id 与 date 不变)
    pub async fn update_invoice(
        &self,
        id: &str,
        _prev: &ActionState,
        form: &InvoiceForm,
    ) -> ActionOutcome {
        let fields = match validate_invoice_form(form) {
            Ok(fields) => fields,
            Err(errors) => {
                return ActionOutcome::Render(ActionState::invalid(
                    errors,
                    "Missing Fields. Failed to Update Invoice.",
                ));
            }
        };

        let changes = InvoiceChanges {
            customer_id: fields.customer_id.clone(),
            amount_cents: fields.amount_in_cents(),
            status: fields.status,
        };

        if let Err(e) = self.store.update(id, &changes).await {
            tracing::error!("Failed to update invoice {}: {}", id, e);
            return ActionOutcome::Render(ActionState::message(
                "Database Error: Failed to Update Invoice.",
            ));
        }

        self.cache.invalidate(INVOICES_PATH);
        ActionOutcome::Redirect(INVOICES_PATH.to_string())
    }

    /// 删除发票: 成功后留在当前视图, 不跳转
    pub async fn delete_invoice(&self, id: &str) -> ActionState {
        if let Err(e) = self.store.delete(id).await {
            tracing::error!("Failed to delete invoice {}: {}", id, e);
            return ActionState::message("Database Error: Failed to Delete Invoice.");
        }

        self.cache.invalidate(INVOICES_PATH);
        ActionState::message("Deleted Invoice.")
    }
}

/// 凭证登录: 转发给外部校验器, 已识别的认证错误映射为用户提示, 其余原样上抛
pub async fn authenticate(
    verifier: &dyn CredentialsVerifier,
    _prev: Option<String>,
    form: &SignInForm,
) -> Result<Option<String>, anyhow::Error> {
    match verifier.sign_in("credentials", form).await {
        Ok(()) => Ok(None),
        Err(SignInError::Auth(e)) => match e.kind {
            AuthErrorKind::CredentialsSignin => Ok(Some("Invalid credentials.".to_string())),
            _ => Ok(Some("Something went wrong.".to_string())),
        },
        Err(SignInError::Other(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;
    use crate::models::InvoiceStatus;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        fail: bool,
        inserts: Mutex<Vec<NewInvoice>>,
        updates: Mutex<Vec<(String, InvoiceChanges)>>,
        deletes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InvoiceStore for RecordingStore {
        async fn insert(&self, invoice: &NewInvoice) -> Result<(), sqlx::Error> {
            if self.fail {
                return Err(sqlx::Error::PoolClosed);
            }
            self.inserts.lock().unwrap().push(invoice.clone());
            Ok(())
        }

        async fn update(&self, id: &str, changes: &InvoiceChanges) -> Result<(), sqlx::Error> {
            if self.fail {
                return Err(sqlx::Error::PoolClosed);
            }
            self.updates
                .lock()
                .unwrap()
                .push((id.to_string(), changes.clone()));
            Ok(())
        }

        async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
            if self.fail {
                return Err(sqlx::Error::PoolClosed);
            }
            self.deletes.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    fn setup(fail: bool) -> (Arc<RecordingStore>, Arc<RouteCache>, InvoiceActions) {
        let store = Arc::new(RecordingStore {
            fail,
            ..Default::default()
        });
        let cache = Arc::new(RouteCache::new());
        let actions = InvoiceActions::new(store.clone(), cache.clone());
        (store, cache, actions)
    }

    fn form(customer_id: &str, amount: &str, status: &str) -> InvoiceForm {
        InvoiceForm {
            customer_id: Some(customer_id.to_string()),
            amount: Some(amount.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[tokio::test]
    async fn create_inserts_cents_and_redirects() {
        let (store, cache, actions) = setup(false);

        let outcome = actions
            .create_invoice(&ActionState::default(), &form("c1", "20", "pending"))
            .await;

        assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));

        let inserts = store.inserts.lock().unwrap();
        assert_eq!(
            *inserts,
            vec![NewInvoice {
                customer_id: "c1".to_string(),
                amount_cents: 2000,
                status: InvoiceStatus::Pending,
                date: Utc::now().date_naive(),
            }]
        );
        assert_eq!(cache.version(INVOICES_PATH), 1);
    }

    #[tokio::test]
    async fn create_with_missing_fields_renders_errors_without_touching_store() {
        let (store, cache, actions) = setup(false);

        let outcome = actions
            .create_invoice(&ActionState::default(), &InvoiceForm::default())
            .await;

        let ActionOutcome::Render(state) = outcome else {
            panic!("expected render outcome");
        };
        assert_eq!(
            state.message.as_deref(),
            Some("Missing Fields. Failed to Create Invoice.")
        );
        let errors = state.errors.expect("field errors");
        assert!(errors.get("customerId").is_some());
        assert!(errors.get("amount").is_some());
        assert!(errors.get("status").is_some());

        assert!(store.inserts.lock().unwrap().is_empty());
        assert_eq!(cache.version(INVOICES_PATH), 0);
    }

    #[tokio::test]
    async fn create_database_failure_renders_opaque_message() {
        let (_store, cache, actions) = setup(true);

        let outcome = actions
            .create_invoice(&ActionState::default(), &form("c1", "20", "pending"))
            .await;

        assert_eq!(
            outcome,
            ActionOutcome::Render(ActionState::message(
                "Database Error: Failed to Create Invoice."
            ))
        );
        assert_eq!(cache.version(INVOICES_PATH), 0);
    }

    #[tokio::test]
    async fn update_targets_given_id_and_redirects() {
        let (store, cache, actions) = setup(false);

        let outcome = actions
            .update_invoice("inv1", &ActionState::default(), &form("c2", "5", "paid"))
            .await;

        assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));

        let updates = store.updates.lock().unwrap();
        assert_eq!(
            *updates,
            vec![(
                "inv1".to_string(),
                InvoiceChanges {
                    customer_id: "c2".to_string(),
                    amount_cents: 500,
                    status: InvoiceStatus::Paid,
                }
            )]
        );
        assert_eq!(cache.version(INVOICES_PATH), 1);
    }

    #[tokio::test]
    async fn update_with_invalid_fields_reports_update_message() {
        let (store, _cache, actions) = setup(false);

        let outcome = actions
            .update_invoice("inv1", &ActionState::default(), &form("c2", "-1", "paid"))
            .await;

        let ActionOutcome::Render(state) = outcome else {
            panic!("expected render outcome");
        };
        assert_eq!(
            state.message.as_deref(),
            Some("Missing Fields. Failed to Update Invoice.")
        );
        assert!(store.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_database_failure_renders_opaque_message() {
        let (_store, _cache, actions) = setup(true);

        let outcome = actions
            .update_invoice("inv1", &ActionState::default(), &form("c2", "5", "paid"))
            .await;

        assert_eq!(
            outcome,
            ActionOutcome::Render(ActionState::message(
                "Database Error: Failed to Update Invoice."
            ))
        );
    }

    #[tokio::test]
    async fn delete_invalidates_listing_and_stays_on_view() {
        let (store, cache, actions) = setup(false);

        let state = actions.delete_invoice("inv1").await;

        assert_eq!(state, ActionState::message("Deleted Invoice."));
        assert_eq!(*store.deletes.lock().unwrap(), vec!["inv1".to_string()]);
        assert_eq!(cache.version(INVOICES_PATH), 1);
    }

    #[tokio::test]
    async fn delete_database_failure_renders_opaque_message() {
        let (_store, cache, actions) = setup(true);

        let state = actions.delete_invoice("inv1").await;

        assert_eq!(
            state,
            ActionState::message("Database Error: Failed to Delete Invoice.")
        );
        assert_eq!(cache.version(INVOICES_PATH), 0);
    }

    struct FixedVerifier(Result<(), AuthErrorKind>);

    #[async_trait]
    impl CredentialsVerifier for FixedVerifier {
        async fn sign_in(&self, _provider: &str, _form: &SignInForm) -> Result<(), SignInError> {
            match self.0 {
                Ok(()) => Ok(()),
                Err(kind) => Err(AuthError::new(kind).into()),
            }
        }
    }

    struct BrokenVerifier;

    #[async_trait]
    impl CredentialsVerifier for BrokenVerifier {
        async fn sign_in(&self, _provider: &str, _form: &SignInForm) -> Result<(), SignInError> {
            Err(SignInError::Other(anyhow::anyhow!("backend offline")))
        }
    }

    fn sign_in_form() -> SignInForm {
        SignInForm {
            email: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn authenticate_maps_bad_credentials_to_user_message() {
        let verifier = FixedVerifier(Err(AuthErrorKind::CredentialsSignin));
        let result = authenticate(&verifier, None, &sign_in_form()).await.unwrap();
        assert_eq!(result.as_deref(), Some("Invalid credentials."));
    }

    #[tokio::test]
    async fn authenticate_maps_other_known_kinds_to_generic_message() {
        let verifier = FixedVerifier(Err(AuthErrorKind::CallbackRouteError));
        let result = authenticate(&verifier, None, &sign_in_form()).await.unwrap();
        assert_eq!(result.as_deref(), Some("Something went wrong."));
    }

    #[tokio::test]
    async fn authenticate_success_returns_no_message() {
        let verifier = FixedVerifier(Ok(()));
        let result = authenticate(&verifier, None, &sign_in_form()).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn authenticate_propagates_unrecognized_errors() {
        let err = authenticate(&BrokenVerifier, None, &sign_in_form())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "backend offline");
    }
}
