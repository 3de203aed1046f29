use super::entries::read_grid;
use super::Context;
use crate::cli::SortKey;
use medlog_core::{RecordQuery, RecordRow, RecordSort};
use std::path::Path;

impl From<SortKey> for RecordSort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => RecordSort::DrugName,
            SortKey::Expiry => RecordSort::Expiry,
        }
    }
}

fn display(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn listing(ctx: &Context, query: &RecordQuery) -> anyhow::Result<Vec<RecordRow>> {
    Ok(ctx.parser_service()?.query_records(&ctx.user, query))
}

pub fn run(ctx: &Context, query: &RecordQuery) -> anyhow::Result<()> {
    let rows = listing(ctx, query)?;
    if rows.is_empty() && query.is_empty() {
        println!("No structured records for {}", ctx.user);
        return Ok(());
    }

    println!("Records for {} ({} shown)", ctx.user, rows.len());
    println!("======================");
    for row in &rows {
        let r = &row.record;
        println!(
            "  {:>3}. {} | brand:{} generic:{} | {} {} | spec:{} pkg:{} | expires:{}",
            row.seq,
            r.drug_name,
            display(&r.brand_name),
            display(&r.generic_name),
            r.quantity,
            r.unit,
            display(&r.specification),
            display(&r.package_count),
            display(&r.expiry_date),
        );
    }
    Ok(())
}

pub fn clear(ctx: &Context) -> anyhow::Result<()> {
    ctx.parser_service()?.clear_all(&ctx.user)?;
    println!("Cleared all structured records for {}", ctx.user);
    Ok(())
}

pub fn grid(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let rows = read_grid(file)?;
    let count = ctx.parser_service()?.update_from_grid(&ctx.user, &rows)?;
    println!("Saved {} records from grid", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use tempfile::TempDir;

    fn write_grid(temp: &TempDir) -> std::path::PathBuf {
        let file = temp.path().join("records.json");
        std::fs::write(
            &file,
            r#"[
                [1, "Aspirin", "Bayer", "", 2, "盒", "100mg", "", "2026-05", "aspirin two boxes", ""],
                [2, "Ibuprofen", "", "", 1, "", "", "", "", "ibuprofen", ""],
                [3, "aspirin plus", "", "", 1, "", "", "", "2025-12", "aspirin plus", ""]
            ]"#,
        )
        .unwrap();
        file
    }

    fn names(rows: &[RecordRow]) -> Vec<&str> {
        rows.iter().map(|r| r.record.drug_name.as_str()).collect()
    }

    #[test]
    fn test_sort_key_maps_to_record_sort() {
        assert_eq!(RecordSort::from(SortKey::Name), RecordSort::DrugName);
        assert_eq!(RecordSort::from(SortKey::Expiry), RecordSort::Expiry);
    }

    #[test]
    fn test_plain_listing_is_newest_first() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "bob");
        grid(&ctx, &write_grid(&temp)).unwrap();

        let rows = listing(&ctx, &RecordQuery::default()).unwrap();
        assert_eq!(names(&rows), vec!["aspirin plus", "Ibuprofen", "Aspirin"]);
        let seqs: Vec<usize> = rows.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![3, 2, 1]);
        run(&ctx, &RecordQuery::default()).unwrap();
    }

    #[test]
    fn test_filtered_listing_uses_query_order() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "bob");
        grid(&ctx, &write_grid(&temp)).unwrap();

        let query = RecordQuery {
            drug_name: Some("ASPIRIN".to_string()),
            sort: Some(SortKey::Expiry.into()),
            ..RecordQuery::default()
        };
        let rows = listing(&ctx, &query).unwrap();
        assert_eq!(names(&rows), vec!["aspirin plus", "Aspirin"]);
        assert_eq!(rows[0].seq, 1);

        let undated_last = RecordQuery {
            sort: Some(RecordSort::Expiry),
            ..RecordQuery::default()
        };
        let rows = listing(&ctx, &undated_last).unwrap();
        assert_eq!(rows.last().unwrap().record.drug_name, "Ibuprofen");
        run(&ctx, &query).unwrap();
    }

    #[test]
    fn test_structured_grid_and_clear() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "bob");
        grid(&ctx, &write_grid(&temp)).unwrap();
        assert_eq!(ctx.parser_service().unwrap().records(&ctx.user).len(), 3);

        clear(&ctx).unwrap();
        assert!(ctx.parser_service().unwrap().records(&ctx.user).is_empty());
        run(&ctx, &RecordQuery::default()).unwrap();
    }

    #[test]
    fn test_structured_grid_bad_quantity() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "bob");
        let file = temp.path().join("records.json");
        std::fs::write(
            &file,
            r#"[[1, "Aspirin", "", "", "two", "", "", "", "", "", ""]]"#,
        )
        .unwrap();
        assert!(grid(&ctx, &file).is_err());
    }
}
