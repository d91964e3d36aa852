#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use crate::config::vendor::{SecretValue, VendorEnvironment};
    use crate::utils::config_loader;

    #[tokio::test]
    #[serial]
    async fn shipped_config_is_valid() {
        for var in ["HOST", "PORT", "PLAID_ENV", "DEFAULT_CLIENT_USER_ID"] {
            std::env::remove_var(var);
        }
        let service_config = config_loader::run("link-token-service.yaml")
            .await
            .expect("link-token-service.yaml must exist in repo root for tests");

        assert_eq!(service_config.settings.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(service_config.vendor.environment, VendorEnvironment::Sandbox);
        assert_eq!(service_config.vendor.user.default_client_user_id, "demo-user");
        assert!(matches!(
            service_config.vendor.client_id,
            SecretValue::FromEnv { ref from_env } if from_env == "PLAID_CLIENT_ID"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn env_placeholders_select_environment() {
        std::env::set_var("LINK_TOKEN_TEST_ENV", "production");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
settings:
  server: {{ host: 0.0.0.0, port: 8080 }}
vendor:
  environment: ${{LINK_TOKEN_TEST_ENV:sandbox}}
  client_id: {{ value: client }}
  secret: {{ value: secret }}
  client_name: one-fonance
  user: {{ default_client_user_id: "${{LINK_TOKEN_TEST_USER:demo-user}}" }}
"#
        )
        .unwrap();

        let service_config = config_loader::run(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(service_config.vendor.environment, VendorEnvironment::Production);
        assert_eq!(
            service_config.vendor.link_token_url(),
            "https://production.plaid.com/link/token/create"
        );
        assert_eq!(service_config.vendor.user.default_client_user_id, "demo-user");

        std::env::remove_var("LINK_TOKEN_TEST_ENV");
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = config_loader::run("does-not-exist.yaml").await.unwrap_err();
        assert!(err.to_string().contains("Invalid config format"));
    }
}
