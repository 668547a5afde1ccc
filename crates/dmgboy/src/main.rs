use anyhow::Context;
use dmgboy::RunConfig;

const USAGE: &str = "Usage: dmgboy <rom> [--trace] [--steps N]";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut rom_path = None;
    let mut trace = false;
    let mut max_steps = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trace" => trace = true,
            "--steps" => {
                let value = args.next().context("--steps needs a value")?;
                let steps = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid step count '{value}'"))?;
                max_steps = Some(steps);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option '{other}'.\n{USAGE}");
                std::process::exit(1);
            }
            other => rom_path = Some(other.to_string()),
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!("No ROM path provided.\n{USAGE}");
        std::process::exit(1);
    };

    log::info!("Running ROM path: '{}'", rom_path);
    let config = RunConfig::builder()
        .rom_path(rom_path)
        .max_steps(max_steps)
        .trace(trace)
        .build();

    let summary = dmgboy::run(config)?;
    if !summary.serial.is_empty() {
        println!("{}", String::from_utf8_lossy(&summary.serial));
    }
    Ok(())
}
