use std::ffi::OsString;

use mojmap_config::{
    discover_config_path, load_for_dir, with_config_env_lock, MojmapConfig, MOJMAP_CONFIG_ENV_VAR,
};
use tempfile::tempdir;

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &std::path::Path) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn discovers_mojmap_toml_before_dotfile() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(MOJMAP_CONFIG_ENV_VAR);

        let dir = tempdir().unwrap();
        let dotfile = dir.path().join(".mojmap.toml");
        std::fs::write(&dotfile, "[search]\nlimit = 5\n").unwrap();
        assert_eq!(
            discover_config_path(dir.path()),
            Some(dotfile.canonicalize().unwrap_or(dotfile))
        );

        let primary = dir.path().join("mojmap.toml");
        std::fs::write(&primary, "[search]\nlimit = 7\n").unwrap();
        assert_eq!(
            discover_config_path(dir.path()),
            Some(primary.canonicalize().unwrap_or(primary))
        );

        let (config, path) = load_for_dir(dir.path()).unwrap();
        assert!(path.is_some());
        assert_eq!(config.search.limit, 7);
    });
}

#[test]
fn env_var_overrides_discovery() {
    with_config_env_lock(|| {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("mojmap.toml"), "[search]\nlimit = 7\n").unwrap();

        let custom = dir.path().join("custom.toml");
        std::fs::write(
            &custom,
            "[search]\nlimit = 3\ninclude_snapshots = true\n\n[logging]\nlevel = \"debug\"\njson = true\n",
        )
        .unwrap();
        let _env = EnvVarGuard::set(MOJMAP_CONFIG_ENV_VAR, std::path::Path::new("custom.toml"));

        let (config, path) = load_for_dir(dir.path()).unwrap();
        assert_eq!(path, Some(custom.canonicalize().unwrap_or(custom)));
        assert_eq!(config.search.limit, 3);
        assert!(config.search.include_snapshots);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    });
}

#[test]
fn missing_config_yields_defaults() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(MOJMAP_CONFIG_ENV_VAR);

        let dir = tempdir().unwrap();
        let (config, path) = load_for_dir(dir.path()).unwrap();
        assert_eq!(config, MojmapConfig::default());
        assert!(path.is_none());
    });
}

#[test]
fn unreadable_config_reports_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = MojmapConfig::load_from_path(&missing).unwrap_err();
    assert!(
        err.to_string().contains("nope.toml"),
        "expected path in error, got: {err}"
    );
}
