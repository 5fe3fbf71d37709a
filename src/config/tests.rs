use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_synctunes_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SYNCTUNES_CONFIG_PATH", "/tmp/synctunes-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/synctunes-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("synctunes")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("synctunes")
            .join("config.toml")
    );
}

#[test]
fn settings_default_to_no_exclusions_and_full_album_names() {
    let s = Settings::default();
    assert!(s.exclude.artists.is_none());
    assert!(s.exclude.albums.is_none());
    assert!(s.exclude.genres.is_none());
    assert!(s.sync.album_chars.is_none());
    assert!(!s.sync.update);
    assert!(!s.sync.fatsort);
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[sync]
source = "/home/me/Music"
dest = "/mnt/usb"
tempdir = "/tmp/stage"
update = true
album_chars = 8
fatsort = true

[library]
extensions = ["mp3", "aac"]
recursive = false
include_hidden = false
follow_links = false
max_depth = 3

[exclude]
artists = ["Nickelback"]
genres = ["Podcast", "Audiobook"]
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SYNCTUNES_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SYNCTUNES__SYNC__UPDATE");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.sync.source, std::path::PathBuf::from("/home/me/Music"));
    assert_eq!(s.sync.dest, std::path::PathBuf::from("/mnt/usb"));
    assert_eq!(s.sync.tempdir, std::path::PathBuf::from("/tmp/stage"));
    assert!(s.sync.update);
    assert_eq!(s.sync.album_chars, Some(8));
    assert!(s.sync.fatsort);
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "aac".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    let artists = s.exclude.artists.unwrap();
    assert!(artists.contains("Nickelback"));
    let genres = s.exclude.genres.unwrap();
    assert!(genres.contains("Podcast"));
    assert!(genres.contains("Audiobook"));
    assert!(s.exclude.albums.is_none());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[sync]
update = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SYNCTUNES_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SYNCTUNES__SYNC__UPDATE", "true");

    let s = Settings::load(None).unwrap();
    assert!(s.sync.update);
}

#[test]
fn explicit_path_beats_env_config_path() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let flag_path = dir.path().join("flag.toml");
    std::fs::write(&flag_path, "[sync]\nupdate = true\n").unwrap();
    let env_path = dir.path().join("env.toml");
    std::fs::write(&env_path, "[sync]\nupdate = false\n").unwrap();

    let _g1 = EnvGuard::set("SYNCTUNES_CONFIG_PATH", env_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SYNCTUNES__SYNC__UPDATE");

    let s = Settings::load(Some(&flag_path)).unwrap();
    assert!(s.sync.update);
}

#[test]
fn validate_rejects_zero_album_chars_and_overlapping_dirs() {
    let mut s = Settings::default();
    s.sync.album_chars = Some(0);
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.sync.tempdir = s.sync.dest.clone();
    assert!(s.validate().is_err());

    assert!(Settings::default().validate().is_ok());
}
