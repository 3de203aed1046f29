mod common;

use common::temp_paths;
use medlog_service::EntryService;
use medlog_store::cleanup_expired;
use std::time::{Duration, SystemTime};

fn age(path: &std::path::Path, days: u64) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(days * 86_400))
        .unwrap();
}

#[test]
fn test_sweep_removes_only_stale_user_files() {
    let (temp, paths) = temp_paths();
    let mut svc = EntryService::new(paths.clone());
    svc.add_entry("fresh", "kept").unwrap();
    svc.add_entry("stale", "dropped").unwrap();

    let stale = paths.entries_file("stale");
    age(&stale, 31);
    let config = temp.path().join("medlog.json");
    std::fs::write(&config, "{}").unwrap();
    age(&config, 90);

    assert_eq!(cleanup_expired(&paths.data_dir, 30), 1);
    assert!(!stale.exists());
    assert!(paths.entries_file("fresh").exists());
    assert!(config.exists());

    // a swept user starts over
    assert_eq!(svc.refresh("stale"), 0);
}
