use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::json;
use simpledown_config::Config;
use simpledown_engine::{Metadata, ParseSettings, StructureOptions, parse_document};
use std::{
    env,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "Usage: simpledown <file|-> (--trusted|--untrusted) [--export] [--translit-anchors] [--skip-trusted]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    input: Option<PathBuf>,
    trusted: Option<bool>,
    export: bool,
    translit_anchors: bool,
    skip_trusted: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--trusted" | "--untrusted" => {
                let trusted = arg == "--trusted";
                if parsed.trusted.is_some_and(|t| t != trusted) {
                    return Err("--trusted and --untrusted are mutually exclusive".to_string());
                }
                parsed.trusted = Some(trusted);
            }
            "--export" => parsed.export = true,
            "--translit-anchors" => parsed.translit_anchors = true,
            "--skip-trusted" => parsed.skip_trusted = true,
            flag if flag.starts_with("--") => return Err(format!("Unknown flag {flag}")),
            path if parsed.input.is_none() => parsed.input = Some(PathBuf::from(path)),
            extra => return Err(format!("Unexpected argument {extra}")),
        }
    }
    Ok(parsed)
}

/// Flags override the config file; the trust mode only ever comes from
/// the command line.
fn settings(args: &Args, config: Config) -> ParseSettings {
    ParseSettings {
        trusted: args.trusted,
        translit_anchors: args.translit_anchors || config.translit_anchors,
        export: args.export || config.export,
        max_depth: config.max_depth,
        allowed_schemes: config.allowed_schemes,
    }
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };
    let Some(input) = args.input.as_ref() else {
        eprintln!("{USAGE}");
        process::exit(1);
    };

    let config = match Config::load_from_env() {
        Ok(Some(config)) => {
            debug!("loaded config: {config:?}");
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let options = settings(&args, config).into_options()?;
    let text = read_input(input)?;

    let mut metadata = Metadata::new();
    let document = parse_document(&text, &options, &mut metadata)?;
    info!(
        "parsed {} top-level nodes, {} headers",
        document.children.len(),
        metadata.headers.len()
    );

    let output = json!({
        "document": document.to_structure(StructureOptions {
            skip_trusted: args.skip_trusted,
        }),
        "headers": metadata.headers,
        "refs": metadata.refs,
        "libs": metadata.libs,
        "head": metadata.head,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
