use clap::{value_parser, Parser};
use hive_primitives::BlockNumber;
use std::path::PathBuf;
use url::Url;


#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL of the Hive JSON-RPC API endpoint
    #[arg(long, value_name = "URL", default_value = "https://api.hive.blog")]
    pub src: Url,

    /// SQLite database file to write posts to
    #[arg(long, value_name = "FILE", default_value = "blocks.db")]
    pub db: PathBuf,

    /// Height below which no blocks are processed
    #[arg(long, value_name = "N", default_value_t = 41_818_753)]
    pub genesis_block: BlockNumber,

    /// Number of blocks to fetch per batch
    #[arg(long, value_name = "N", value_parser = value_parser!(u64).range(1..), default_value_t = 1000)]
    pub batch_size: u64,

    /// Attempts for every external call before giving up
    #[arg(long, value_name = "N", value_parser = value_parser!(u32).range(1..), default_value_t = 3)]
    pub max_retries: u32,

    /// Initial pause between retry attempts in seconds; doubles after every failure
    #[arg(long, value_name = "SECONDS", value_parser = value_parser!(u64).range(1..), default_value_t = 2)]
    pub retry_delay: u64,

    /// Port to use for built-in prometheus metrics server
    #[arg(long)]
    pub prom_port: Option<u16>,
}
