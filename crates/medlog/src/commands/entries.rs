use super::Context;
use medlog_core::GridRow;
use std::path::Path;

pub fn add(ctx: &Context, text: &str) -> anyhow::Result<()> {
    let entry = ctx.entry_service().add_entry(&ctx.user, text)?;
    println!("Added entry {} at {}", entry.id, entry.timestamp);
    Ok(())
}

pub fn list(ctx: &Context) -> anyhow::Result<()> {
    let rows = ctx.entry_service().rows(&ctx.user);
    if rows.is_empty() {
        println!("No entries for {}", ctx.user);
        return Ok(());
    }

    println!("Entries for {} ({})", ctx.user, rows.len());
    println!("======================");
    for row in &rows {
        println!("  {:>3}. {}  [{}]  {}", row.seq, row.timestamp, row.id, row.text);
    }
    Ok(())
}

pub fn edit(ctx: &Context, id: i64, text: &str) -> anyhow::Result<()> {
    if !ctx.entry_service().update_entry(&ctx.user, id, text)? {
        anyhow::bail!("no entry with id {}", id);
    }
    println!("Updated entry {}", id);
    Ok(())
}

pub fn delete(ctx: &Context, id: i64) -> anyhow::Result<()> {
    if !ctx.entry_service().delete_entry(&ctx.user, id)? {
        anyhow::bail!("no entry with id {}", id);
    }
    println!("Deleted entry {}", id);
    Ok(())
}

pub fn clear(ctx: &Context) -> anyhow::Result<()> {
    ctx.entry_service().clear_all(&ctx.user)?;
    println!("Cleared all entries for {}", ctx.user);
    Ok(())
}

/// Read a grid snapshot: a JSON array of row arrays
pub fn read_grid(file: &Path) -> anyhow::Result<Vec<GridRow>> {
    let content = std::fs::read_to_string(file)?;
    let rows: Vec<GridRow> = serde_json::from_str(&content)?;
    Ok(rows)
}

pub fn grid(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let rows = read_grid(file)?;
    let count = ctx.entry_service().save_grid(&ctx.user, &rows)?;
    println!("Saved {} entries from grid", count);
    Ok(())
}
