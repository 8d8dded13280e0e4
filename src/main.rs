//! Rain overlay binary.
//!
//! Usage: `rainfall [DROPS] [--simple] [--seed N] [--fps N]`
//!
//! Set `RUST_LOG=debug` to see the measured frame rate.

use rainfall::{RainConfig, TerminationMode};

fn parse_args<I>(args: I) -> Result<RainConfig, String>
where
    I: IntoIterator<Item = String>,
{
    let mut config = RainConfig::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--simple" => config = config.with_mode(TerminationMode::Simple),
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed: {}", value))?;
                config = config.with_seed(seed);
            }
            "--fps" => {
                let value = args.next().ok_or("--fps needs a value")?;
                let fps = value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid frame rate: {}", value))?;
                config = config.with_frame_rate(fps);
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {}", other));
            }
            count => {
                let drops = count
                    .parse::<usize>()
                    .map_err(|_| format!("invalid drop count: {}", count))?;
                config = config.with_drop_count(drops);
            }
        }
    }
    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Usage: rainfall [DROPS] [--simple] [--seed N] [--fps N]");
            std::process::exit(2);
        }
    };

    if let Err(e) = rainfall::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
