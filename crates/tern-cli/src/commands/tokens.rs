use miette::Result;
use std::io::{self, Write};
use tern_parser::tokenize;

use super::{report, Source};

/// Print one `kind<TAB>text` line per token, ending with `EndOfFile`.
pub fn run(source: &Source) -> Result<()> {
    let tokens = tokenize(&source.text).map_err(|err| report(&err, source))?;

    let mut out = io::stdout().lock();
    for token in &tokens {
        writeln!(out, "{:?}\t{}", token.kind, token.text)
            .map_err(|e| miette::miette!("Failed to write to stdout: {}", e))?;
    }
    Ok(())
}
