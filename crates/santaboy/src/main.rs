use anyhow::{Context, Result};
use santaboy::{RunConfig, DEFAULT_MAX_STEPS};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom_path) = args.next() else {
        eprintln!(
            "No ROM path provided.\n\
             Usage: santaboy <rom-path> [max-steps]"
        );
        std::process::exit(2);
    };
    let max_steps = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("invalid max-steps '{raw}'"))?,
        None => DEFAULT_MAX_STEPS,
    };

    let config = RunConfig::builder()
        .rom_path(rom_path)
        .max_steps(max_steps)
        .build();
    let summary = santaboy::run(&config)?;
    println!("{summary}");

    if summary.faulted() {
        std::process::exit(1);
    }
    Ok(())
}
