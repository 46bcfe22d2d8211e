use crate::auth::{AuthError, AuthErrorKind, CredentialsVerifier, SignInError, SignInForm};
use anyhow::Context;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

/// Postgres 用户表凭证校验 (users 表的 password 列存 sha256 十六进制摘要)
pub struct PgCredentialsVerifier {
    pool: PgPool,
}

impl PgCredentialsVerifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[async_trait]
impl CredentialsVerifier for PgCredentialsVerifier {
    async fn sign_in(&self, provider: &str, form: &SignInForm) -> Result<(), SignInError> {
        if provider != "credentials" {
            return Err(SignInError::Other(anyhow::anyhow!(
                "unknown provider: {}",
                provider
            )));
        }

        let stored: Option<(String,)> =
            sqlx::query_as("SELECT password FROM users WHERE email = $1")
                .bind(&form.email)
                .fetch_optional(&self.pool)
                .await
                .context("credential lookup failed")?;

        // 用户不存在与密码不匹配不作区分
        match stored {
            Some((hash,)) if hash == hash_password(&form.password) => Ok(()),
            _ => Err(AuthError::new(AuthErrorKind::CredentialsSignin).into()),
        }
    }
}
