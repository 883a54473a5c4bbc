use error_stack::{Report, ResultExt};
use kernel::KernelError;

static SERVER_PORT: &str = "SERVER_PORT";
static APP_NAME: &str = "APP_NAME";

/// Listener settings read from the environment (and `.env` when present).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub app_name: String,
}

impl ServerConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let port = match dotenvy::var(SERVER_PORT) {
            Ok(port) => port
                .parse::<u16>()
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| format!("Invalid {SERVER_PORT} = {port}"))?,
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => 8080,
            Err(e) => return Err(Report::new(e).change_context(KernelError::Internal)),
        };
        let app_name = dotenvy::var(APP_NAME).unwrap_or_else(|_| "movie-rental".to_string());
        Ok(Self { port, app_name })
    }

    pub fn base_path(&self) -> String {
        format!("/{}/api/v1", self.app_name)
    }
}
