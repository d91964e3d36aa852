use std::fmt;

use anyhow::{anyhow, Context, Result};

use crate::config::vendor::{SecretValue, VendorConfig};

/// Vendor credentials, resolved once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub secret: String,
}

impl Credentials {
    pub async fn resolve(vendor: &VendorConfig) -> Result<Self> {
        let client_id = resolve_secret_value(&vendor.client_id)
            .await
            .context("failed to resolve vendor.client_id")?;
        let secret = resolve_secret_value(&vendor.secret)
            .await
            .context("failed to resolve vendor.secret")?;
        Ok(Self { client_id, secret })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"***")
            .finish()
    }
}

async fn resolve_secret_value(value: &SecretValue) -> Result<String> {
    let resolved = match value {
        SecretValue::Literal { value } => value.to_owned(),
        SecretValue::FromEnv { from_env } => std::env::var(from_env)
            .map_err(|err| anyhow!("env var {}: {}", from_env, err))?,
        SecretValue::FromFile { path } => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path))?
            .trim()
            .to_string(),
    };
    if resolved.is_empty() {
        return Err(anyhow!("credential resolved to an empty value"));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[tokio::test]
    async fn literal_is_used_as_is() {
        let value = SecretValue::Literal { value: "client-abc".to_string() };
        assert_eq!(resolve_secret_value(&value).await.unwrap(), "client-abc");
    }

    #[tokio::test]
    async fn file_content_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  secret-from-file  ").unwrap();
        let value = SecretValue::FromFile {
            path: file.path().to_string_lossy().into_owned(),
        };
        assert_eq!(resolve_secret_value(&value).await.unwrap(), "secret-from-file");
    }

    #[tokio::test]
    #[serial]
    async fn missing_env_var_is_an_error() {
        std::env::remove_var("LINK_TOKEN_TEST_MISSING_SECRET");
        let value = SecretValue::FromEnv {
            from_env: "LINK_TOKEN_TEST_MISSING_SECRET".to_string(),
        };
        assert!(resolve_secret_value(&value).await.is_err());
    }

    #[tokio::test]
    async fn empty_value_is_an_error() {
        let value = SecretValue::Literal { value: String::new() };
        assert!(resolve_secret_value(&value).await.is_err());
    }

    #[test]
    fn debug_hides_secret() {
        let credentials = Credentials {
            client_id: "client".to_string(),
            secret: "very-secret".to_string(),
        };
        assert!(!format!("{:?}", credentials).contains("very-secret"));
    }
}
