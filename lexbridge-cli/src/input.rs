use crate::error::{CliError, CliResult};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Where the query or update text comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum InputSource {
    /// From a file on disk.
    File(PathBuf),
    /// From the `-e` expression or the positional argument.
    Inline(String),
    /// From stdin (piped).
    Stdin,
}

/// Resolve the input source with priority: `-e` > positional > `-f` > stdin.
pub fn resolve_input(
    expr: Option<&str>,
    positional: Option<&str>,
    file: Option<&Path>,
) -> CliResult<InputSource> {
    if let Some(e) = expr.or(positional) {
        return Ok(InputSource::Inline(e.to_string()));
    }
    if let Some(f) = file {
        return Ok(InputSource::File(f.to_path_buf()));
    }
    if !io::stdin().is_terminal() {
        return Ok(InputSource::Stdin);
    }
    Err(CliError::Usage(format!(
        "no input provided\n  {} pass the text inline, use -f for a file, or pipe via stdin",
        colored::Colorize::bold(colored::Colorize::cyan("help:"))
    )))
}

/// Read content from the resolved input source.
pub fn read_input(source: &InputSource) -> CliResult<String> {
    let text = match source {
        InputSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display())))?,
        InputSource::Inline(s) => s.clone(),
        InputSource::Stdin => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if text.trim().is_empty() {
        return Err(CliError::Input("input is empty".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_wins_over_everything() {
        let src = resolve_input(Some("ASK {}"), Some("SELECT"), Some(Path::new("q.rq"))).unwrap();
        assert_eq!(src, InputSource::Inline("ASK {}".to_string()));
    }

    #[test]
    fn test_positional_wins_over_file() {
        let src = resolve_input(None, Some("SELECT"), Some(Path::new("q.rq"))).unwrap();
        assert_eq!(src, InputSource::Inline("SELECT".to_string()));
    }

    #[test]
    fn test_file_source_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.rq");
        std::fs::write(&path, "ASK { ?s ?p ?o }").unwrap();

        let src = resolve_input(None, None, Some(path.as_path())).unwrap();
        assert_eq!(read_input(&src).unwrap(), "ASK { ?s ?p ?o }");
    }

    #[test]
    fn test_blank_input_rejected() {
        let err = read_input(&InputSource::Inline("   ".to_string())).unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }
}
