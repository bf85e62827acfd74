//! token-select - apply selection and indentation commands to text files

use anyhow::Result;
use clap::Parser;

use token_selection::cli::{self, CliArgs};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    token_selection::tracing::init(args.log_dir.as_deref());

    let output = cli::run(&args)?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
