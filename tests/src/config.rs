//! Configuration fallback behavior against real files on disk.

use std::fs;
use std::path::PathBuf;

use whoshere_common::config;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("whoshere-it-{}-{name}", std::process::id()))
}

#[test]
fn file_values_are_honored() {
    let path = temp_path("full.toml");
    fs::write(
        &path,
        r#"
        [scan]
        save_scan = true
        live_scan = true
        live_scan_delay = 3
        interface = "eth0"
        "#,
    )
    .unwrap();

    let cfg = config::load(&path);
    fs::remove_file(&path).unwrap();

    assert!(cfg.save_scan);
    assert!(cfg.live_scan);
    assert_eq!(cfg.live_scan_delay, 3);
    assert_eq!(cfg.interface.as_deref(), Some("eth0"));
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let path = temp_path("malformed.toml");
    fs::write(&path, "[scan\nthis is not toml").unwrap();

    let cfg = config::load(&path);
    fs::remove_file(&path).unwrap();

    assert!(!cfg.save_scan);
    assert!(!cfg.live_scan);
    assert_eq!(cfg.live_scan_delay, 30);
    assert_eq!(cfg.interface, None);
}

#[test]
fn absent_file_falls_back_to_defaults() {
    let cfg = config::load(&temp_path("does-not-exist.toml"));
    assert!(!cfg.live_scan);
    assert_eq!(cfg.live_scan_delay, 30);
    assert_eq!(cfg.log_dir, "logs");
}
