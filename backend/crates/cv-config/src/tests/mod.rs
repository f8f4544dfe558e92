
use std::env;

use tempfile::TempDir;

/// Every variable `Config::load` reads; cleared so the developer's shell
/// cannot leak into assertions about defaults.
const OVERRIDE_VARS: [&str; 20] = [
    "HOST",
    "PORT",
    "NODE_ENV",
    "CAREVOICE_API_BASE_URL",
    "CAREVOICE_API_KEY",
    "CAREVOICE_CLIENT_ID",
    "CAREVOICE_CLIENT_SECRET",
    "CAREVOICE_GROUP",
    "CAREVOICE_TIMEOUT_SECS",
    "JWT_SECRET",
    "JWT_EXPIRES_IN",
    "RATE_LIMIT_WINDOW_MS",
    "RATE_LIMIT_MAX_REQUESTS",
    "RATE_LIMIT_TRUST_PROXY",
    "CORS_ORIGIN",
    "STORAGE_BACKEND",
    "DATABASE_PATH",
    "LOG_LEVEL",
    "LOG_COLORED",
    "LOG_FILE",
];

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Isolated config environment: temp CV_CONFIG_DIR and no stray overrides.
pub(crate) struct TestEnv {
    pub(crate) temp: TempDir,
    _guards: Vec<EnvGuard>,
}

impl TestEnv {
    pub(crate) fn write_toml(&self, contents: &str) {
        std::fs::write(self.temp.path().join("config.toml"), contents).unwrap();
    }
}

pub(crate) fn setup_config_dir() -> TestEnv {
    let temp = TempDir::new().unwrap();
    let mut guards: Vec<EnvGuard> = OVERRIDE_VARS.iter().map(|k| EnvGuard::remove(k)).collect();
    guards.push(EnvGuard::set(
        "CV_CONFIG_DIR",
        temp.path().to_str().unwrap(),
    ));
    TestEnv {
        temp,
        _guards: guards,
    }
}
