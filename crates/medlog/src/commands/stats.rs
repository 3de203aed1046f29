use super::Context;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let entry_count = ctx.entry_service().count(&ctx.user);
    let stats = ctx.parser_service()?.statistics(&ctx.user);

    let output = serde_json::json!({
        "user": ctx.user,
        "entries": entry_count,
        "records": stats.total,
        "with_brand_name": stats.with_brand_name,
        "with_generic_name": stats.with_generic_name,
        "with_specification": stats.with_specification,
        "with_expiry_date": stats.with_expiry_date,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use tempfile::TempDir;

    #[test]
    fn test_stats_on_empty_user() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, "nobody");
        assert!(run(&ctx).is_ok());
    }
}
