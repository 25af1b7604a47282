pub mod demo;
pub mod parse;
pub mod tokens;

use miette::{miette, IntoDiagnostic, LabeledSpan, NamedSource, Report, Result};
use std::io::Read;
use std::path::Path;
use tern_parser::{LineIndex, ParseError};
use tracing::debug;

/// Source text together with the name it is reported under.
pub struct Source {
    pub name: String,
    pub text: String,
}

/// Read the input of a command: inline code, a file, or stdin.
pub fn read_source(file: Option<&Path>, eval: Option<String>) -> Result<Source> {
    let source = match (eval, file) {
        (Some(text), _) => Source {
            name: "<eval>".to_string(),
            text,
        },
        (None, Some(path)) if path != Path::new("-") => Source {
            name: path.display().to_string(),
            text: std::fs::read_to_string(path)
                .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?,
        },
        (None, _) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .into_diagnostic()?;
            Source {
                name: "<stdin>".to_string(),
                text,
            }
        }
    };

    debug!(name = %source.name, bytes = source.text.len(), "read source");
    Ok(source)
}

/// Render a parse error against its source, pointing at the rejected input.
pub fn report(err: &ParseError, source: &Source) -> Report {
    let span = err.span();
    let (line, col) = LineIndex::new(&source.text).line_col(span.start);

    miette!(
        code = err.code(),
        labels = vec![LabeledSpan::at(span.range(), "here")],
        help = format!("at {}:{}:{}", source.name, line + 1, col + 1),
        "{err}"
    )
    .with_source_code(NamedSource::new(&source.name, source.text.clone()))
}
