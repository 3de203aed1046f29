pub fn run() -> anyhow::Result<()> {
    println!("medlog {}", env!("CARGO_PKG_VERSION"));
    println!("Medicine note capture with LLM field extraction");
    Ok(())
}
