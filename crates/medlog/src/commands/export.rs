use super::Context;
use std::path::PathBuf;

pub fn run(ctx: &Context, structured: bool, out: Option<PathBuf>) -> anyhow::Result<()> {
    let dir = out.unwrap_or_else(|| ctx.paths.data_dir.join("exports"));
    let written = if structured {
        ctx.parser_service()?.export_csv(&ctx.user, &dir)?
    } else {
        ctx.entry_service().export_text(&ctx.user, &dir)?
    };

    match written {
        Some(path) => println!("Exported to {}", path.display()),
        None => println!("Nothing to export for {}", ctx.user),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use tempfile::TempDir;

    fn files_in(dir: &std::path::Path) -> Vec<String> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[test]
    fn test_export_empty_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "alice");
        run(&ctx, false, None).unwrap();
        run(&ctx, true, None).unwrap();
        assert!(files_in(&temp.path().join("exports")).is_empty());
    }

    #[test]
    fn test_export_text_to_out_dir() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "alice");
        ctx.entry_service().add_entry(&ctx.user, "Aspirin").unwrap();

        let out = temp.path().join("out");
        run(&ctx, false, Some(out.clone())).unwrap();
        let files = files_in(&out);
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("medicine_list_"));
        assert!(files[0].ends_with(".txt"));
    }
}
