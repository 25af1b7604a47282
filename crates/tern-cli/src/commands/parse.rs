use miette::{IntoDiagnostic, Result};
use tern_parser::{Parser, ParserOptions};
use tracing::debug;

use super::{report, Source};

/// Parse `source` and print the AST as JSON to stdout.
pub fn run(source: &Source, options: ParserOptions, compact: bool) -> Result<()> {
    let ast = Parser::new(&source.text, options)
        .parse()
        .map_err(|err| report(&err, source))?;
    debug!(statements = ast.body().len(), "parsed {}", source.name);

    let json = if compact {
        serde_json::to_string(&ast)
    } else {
        serde_json::to_string_pretty(&ast)
    }
    .into_diagnostic()?;
    println!("{json}");
    Ok(())
}
