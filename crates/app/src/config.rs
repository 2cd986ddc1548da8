//! Command-line options for a session run

use std::path::PathBuf;

use crate::AppError;

/// Default directory for exported PNGs
const DEFAULT_OUT_DIR: &str = "exports";

/// Where a session reads its messages from and writes its exports to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// JSON-lines message script, stdin when absent
    pub script: Option<PathBuf>,
    /// Directory receiving exported PNGs
    pub out_dir: PathBuf,
    /// Engine config as JSON; the environment is used when absent
    pub config: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            script: None,
            out_dir: out_dir_from_env(),
            config: None,
        }
    }
}

impl RunOptions {
    /// Parse `[--out DIR] [--config FILE] [SCRIPT]`
    pub fn from_args<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" | "-o" => {
                    options.out_dir = PathBuf::from(args.next().ok_or(AppError::MissingValue(arg))?);
                }
                "--config" | "-c" => {
                    options.config = Some(PathBuf::from(args.next().ok_or(AppError::MissingValue(arg))?));
                }
                flag if flag.starts_with('-') && flag != "-" => {
                    return Err(AppError::UnknownArgument(arg));
                }
                _ if options.script.is_some() => return Err(AppError::UnknownArgument(arg)),
                "-" => {}
                _ => options.script = Some(PathBuf::from(arg)),
            }
        }

        Ok(options)
    }
}

/// Parse `GOUACHE_OUT_DIR`, falling back to [`DEFAULT_OUT_DIR`]
fn out_dir_from_env() -> PathBuf {
    match std::env::var("GOUACHE_OUT_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_OUT_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<RunOptions, AppError> {
        RunOptions::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_script_and_flags() {
        let options = parse(&["--out", "/tmp/paint", "-c", "canvas.json", "session.jsonl"]).unwrap();
        assert_eq!(options.script, Some(PathBuf::from("session.jsonl")));
        assert_eq!(options.out_dir, PathBuf::from("/tmp/paint"));
        assert_eq!(options.config, Some(PathBuf::from("canvas.json")));
    }

    #[test]
    fn test_dash_reads_stdin() {
        let options = parse(&["-"]).unwrap();
        assert_eq!(options.script, None);
    }

    #[test]
    fn test_missing_flag_value() {
        assert!(matches!(parse(&["--out"]), Err(AppError::MissingValue(flag)) if flag == "--out"));
    }

    #[test]
    fn test_unknown_and_extra_arguments() {
        assert!(matches!(parse(&["--fast"]), Err(AppError::UnknownArgument(_))));
        assert!(matches!(parse(&["a.jsonl", "b.jsonl"]), Err(AppError::UnknownArgument(_))));
    }
}
