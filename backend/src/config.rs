//! Runtime settings loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ReservePolicy;

/// Runtime settings for the lending backend.
///
/// Values are read from CLI flags, `LIBRARY_`-prefixed environment
/// variables, and the config file, in that precedence order.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LIBRARY")]
pub struct AppSettings {
    /// Interface the HTTP server binds to.
    #[ortho_config(default = "0.0.0.0".to_owned())]
    pub bind_host: String,
    /// Port the HTTP server binds to.
    #[ortho_config(default = 8080)]
    pub bind_port: u16,
    /// Allow reserving a book item that another member has on loan.
    ///
    /// Off by default; switching it on restores the legacy behaviour of
    /// forcing such items straight to Reserved.
    #[ortho_config(default = false)]
    pub reserve_over_borrowed: bool,
}

impl AppSettings {
    /// The reservation policy the settings select.
    pub fn reserve_policy(&self) -> ReservePolicy {
        if self.reserve_over_borrowed {
            ReservePolicy::AllowOverBorrowed
        } else {
            ReservePolicy::RequireNotBorrowed
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for runtime settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("library-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("LIBRARY_BIND_HOST", None::<String>),
            ("LIBRARY_BIND_PORT", None::<String>),
            ("LIBRARY_RESERVE_OVER_BORROWED", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_host, "0.0.0.0");
        assert_eq!(settings.bind_port, 8080);
        assert_eq!(settings.reserve_policy(), ReservePolicy::RequireNotBorrowed);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LIBRARY_BIND_HOST", Some("127.0.0.1".to_owned())),
            ("LIBRARY_BIND_PORT", Some("8088".to_owned())),
            ("LIBRARY_RESERVE_OVER_BORROWED", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_host, "127.0.0.1");
        assert_eq!(settings.bind_port, 8088);
        assert_eq!(settings.reserve_policy(), ReservePolicy::AllowOverBorrowed);
    }
}
