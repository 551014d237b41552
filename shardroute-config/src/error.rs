//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("\"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("{message}\n{line_number} | {line}")]
    Syntax {
        message: String,
        line: String,
        line_number: usize,
    },
}

impl Error {
    /// Attach the offending line to a TOML decode error.
    pub fn config(source: &str, err: toml::de::Error) -> Self {
        let Some(span) = err.span() else {
            return Self::Deserialize(err);
        };

        let start = span.start.min(source.len());
        let line_number = source[..start].matches('\n').count() + 1;
        let line = source.lines().nth(line_number - 1).unwrap_or_default();

        Self::Syntax {
            message: err.message().to_string(),
            line: line.to_string(),
            line_number,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_config_error_points_at_line() {
        let source = "[[keyspaces]]\nname = \"main\"\nsharded = \"maybe\"\n";
        let err = toml::from_str::<crate::VSchemaConfig>(source).unwrap_err();

        match Error::config(source, err) {
            Error::Syntax {
                line, line_number, ..
            } => {
                assert_eq!(line_number, 3);
                assert_eq!(line, "sharded = \"maybe\"");
            }
            err => panic!("unexpected error: {:?}", err),
        }
    }
}
