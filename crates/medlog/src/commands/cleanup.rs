use super::Context;
use medlog_store::cleanup_expired;

pub fn run(ctx: &Context, days: Option<u64>) -> anyhow::Result<()> {
    let days = days.unwrap_or(ctx.config.retention_days);
    let removed = cleanup_expired(&ctx.paths.data_dir, days);
    println!(
        "Removed {} data files older than {} days from {}",
        removed,
        days,
        ctx.paths.data_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_keeps_fresh_files() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "alice");
        ctx.entry_service().add_entry(&ctx.user, "fresh").unwrap();

        let stale = temp.path().join("voice_entries_old.json");
        std::fs::write(&stale, "[]").unwrap();
        let file = std::fs::File::options().write(true).open(&stale).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(40 * 86_400))
            .unwrap();

        run(&ctx, None).unwrap();
        assert!(!stale.exists());
        assert!(temp.path().join("voice_entries_alice.json").exists());
    }
}
