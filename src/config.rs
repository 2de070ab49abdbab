//! Engine configuration.

use anyhow::{bail, Context, Result};

use crate::score::LcsStrategyKind;

/// Configuration shared by the batch scorer and the tool server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreConfig {
    /// LCS strategy used for the LCS score and the composite word search.
    pub lcs_strategy: LcsStrategyKind,
    /// Score batch rows on the rayon thread pool.
    pub parallel: bool,
}

impl ScoreConfig {
    /// Build a config from command-line arguments (program name excluded).
    ///
    /// Recognized: `--lcs <table|backtrace>` and `--parallel`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown flag, a missing `--lcs` value, or an
    /// unknown strategy name.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--parallel" => config.parallel = true,
                "--lcs" => {
                    let name = args.next().context("--lcs requires a value")?;
                    config.lcs_strategy = name.as_ref().parse().map_err(anyhow::Error::msg)?;
                }
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoreConfig::from_args(Vec::<String>::new()).expect("empty args");
        assert_eq!(config, ScoreConfig::default());
        assert_eq!(config.lcs_strategy, LcsStrategyKind::Table);
        assert!(!config.parallel);
    }

    #[test]
    fn test_flags() {
        let config = ScoreConfig::from_args(["--lcs", "backtrace", "--parallel"]).expect("valid args");
        assert_eq!(config.lcs_strategy, LcsStrategyKind::Backtrace);
        assert!(config.parallel);
    }

    #[test]
    fn test_rejects_bad_args() {
        assert!(ScoreConfig::from_args(["--lcs"]).is_err());
        assert!(ScoreConfig::from_args(["--lcs", "fast"]).is_err());
        assert!(ScoreConfig::from_args(["--verbose"]).is_err());
    }
}
