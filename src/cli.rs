use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Telegram assistant bot for explaining, translating, and generating images")]
#[command(version)]
pub struct Args {
    /// Load environment variables from this file instead of ./.env
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Force long polling even when WEBHOOK_URL is set
    #[arg(long)]
    pub polling: bool,

    /// Override the webhook listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}
