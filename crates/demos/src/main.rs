//! Runs named demonstrations of the odekit solvers.
//!
//! # Usage
//!
//! ```text
//! odekit-demos -l                 list the available demos
//! odekit-demos -d lorenz          run a demo, writing CSV data and a plot script
//! odekit-demos -d lorenz -p       also run the plot script (requires matplotlib)
//! odekit-demos -d lorenz -o out   write the files to `out/`
//! ```
//!
//! Logging goes through `env_logger` at `info` level by default. Set
//! `RUST_LOG=debug` to see solver progress, or
//! `RUST_LOG=odekit::trajectory=debug` to trace the Lorenz orbit.

mod demos;

use std::{error::Error, path::PathBuf, process};

use log::info;

use demos::{Context, DEMOS};

const USAGE: &str = "Usage: odekit-demos [-l] [-d <demo>] [-p] [-o <dir>]";

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq)]
struct Options {
    list: bool,
    demo: Option<String>,
    plot: bool,
    output: Option<PathBuf>,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-l" => options.list = true,
                "-p" => options.plot = true,
                "-d" => {
                    let name = args.next().ok_or("missing demo name after -d")?;
                    options.demo = Some(name);
                }
                "-o" => {
                    let dir = args.next().ok_or("missing directory after -o")?;
                    options.output = Some(PathBuf::from(dir));
                }
                other => return Err(format!("unknown argument `{other}`")),
            }
        }

        Ok(options)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse(std::env::args().skip(1)).unwrap_or_else(|message| {
        eprintln!("{message}");
        eprintln!("{USAGE}");
        process::exit(2);
    });

    if options.list {
        for demo in DEMOS {
            println!("{:<10}: {}", demo.name, demo.description);
        }
        return Ok(());
    }

    let Some(name) = options.demo else {
        eprintln!("{USAGE}");
        return Ok(());
    };

    let demo = demos::find(&name).ok_or_else(|| format!("the demo `{name}` does not exist"))?;

    let context = Context::new(options.output.unwrap_or_else(|| PathBuf::from(".")), options.plot);
    context.prepare()?;

    info!("running demo {name}");
    (demo.run)(&context)
}
