mod args;

use args::Args;
use clap::Parser;
use glyphcast::{ConvertError, Converter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    // Configure logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let converter = Converter::default();

    if args.list_charsets {
        for name in converter.registry().names() {
            println!("{name}");
        }
        return Ok(());
    }

    // clap enforces the input unless --list-charsets was given
    let Some(path) = args.input.as_deref() else {
        return Ok(());
    };

    let image = image::open(path).map_err(|source| CliError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("decoded {} ({}x{})", path.display(), image.width(), image.height());

    let text = converter.convert(&image, &args.to_config())?;

    match &args.output {
        Some(out) => std::fs::write(out, &text).map_err(|source| CliError::Write {
            path: out.clone(),
            source,
        })?,
        None => print!("{text}"),
    }

    Ok(())
}
