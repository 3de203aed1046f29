use super::Context;

pub fn run(ctx: &Context, append: bool) -> anyhow::Result<()> {
    let entries = ctx.entry_service().entries(&ctx.user).to_vec();
    if entries.is_empty() {
        println!("No entries to parse for {}", ctx.user);
        return Ok(());
    }

    let mut parser = ctx.parser_service()?;
    let outcome = parser.parse_and_save(&ctx.user, &entries, append);

    println!(
        "Parsed {} entries: {} succeeded, {} failed",
        entries.len(),
        outcome.success_count,
        outcome.failure_count
    );
    for text in &outcome.failures {
        println!("  failed: {}", text);
    }
    if !outcome.saved {
        anyhow::bail!("records could not be saved");
    }
    Ok(())
}
