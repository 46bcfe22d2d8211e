pub mod credentials;

pub use credentials::PgCredentialsVerifier;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// 登录表单
#[derive(Debug, Clone, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// 已识别认证错误的子类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// 凭证校验失败 (邮箱或密码错误)
    CredentialsSignin,
    /// 登录回调处理失败
    CallbackRouteError,
    /// 身份有效但访问被拒绝
    AccessDenied,
}

/// 认证框架抛出的已识别错误, 按 kind 分类映射为用户提示
#[derive(Debug, Error)]
#[error("auth error: {kind:?}")]
pub struct AuthError {
    pub kind: AuthErrorKind,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind) -> Self {
        Self { kind }
    }
}

/// 登录失败: 已识别的认证错误, 或需要原样上抛的未识别错误
#[derive(Debug, Error)]
pub enum SignInError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 凭证校验器 ("credentials" provider), 由外部身份源实现
#[async_trait]
pub trait CredentialsVerifier: Send + Sync {
    async fn sign_in(&self, provider: &str, form: &SignInForm) -> Result<(), SignInError>;
}
