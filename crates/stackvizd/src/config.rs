use clap::Args;
use clap::builder::RangedU64ValueParser;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_HISTORY_DISPLAY: usize = 5;
pub const DEFAULT_MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Service settings, read from flags or `STACKVIZ_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ServerConfig {
    /// How many past checks to retain
    #[arg(
        long,
        env = "STACKVIZ_HISTORY_CAPACITY",
        default_value_t = DEFAULT_HISTORY_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub history_capacity: usize,

    /// How many past checks `history` returns when no limit is given
    #[arg(long, env = "STACKVIZ_HISTORY_DISPLAY", default_value_t = DEFAULT_HISTORY_DISPLAY)]
    pub history_display: usize,

    /// Reject expressions longer than this many characters
    #[arg(long, env = "STACKVIZ_MAX_EXPRESSION_LEN")]
    pub max_expression_len: Option<usize>,

    /// Largest message body accepted; bigger frames are skipped unread
    #[arg(
        long,
        env = "STACKVIZ_MAX_FRAME_BYTES",
        default_value_t = DEFAULT_MAX_FRAME_BYTES,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_frame_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_display: DEFAULT_HISTORY_DISPLAY,
            max_expression_len: None,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ServerConfig,
    }

    #[test]
    fn test_defaults_match_default_impl() {
        let cli = TestCli::try_parse_from(["stackvizd"]).unwrap();
        assert_eq!(cli.config, ServerConfig::default());
    }

    #[test]
    fn test_flags() {
        let cli = TestCli::try_parse_from([
            "stackvizd",
            "--history-capacity",
            "3",
            "--history-display",
            "2",
            "--max-expression-len",
            "100",
            "--max-frame-bytes",
            "4096",
        ])
        .unwrap();
        assert_eq!(cli.config.history_capacity, 3);
        assert_eq!(cli.config.history_display, 2);
        assert_eq!(cli.config.max_expression_len, Some(100));
        assert_eq!(cli.config.max_frame_bytes, 4096);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(TestCli::try_parse_from(["stackvizd", "--history-capacity", "0"]).is_err());
    }
}
