//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;
use std::path::PathBuf;

use crate::adapter::config::DEFAULT_CONFIG_PATH;
use crate::domain::entities::batch::BatchId;
use crate::domain::services::conflict::ConflictPolicy;

/// 写真フォルダをGoogle Driveのバッチフォルダにアップロードする
#[derive(Parser, Debug, Clone)]
#[command(name = "boothsync-upload")]
#[command(about = "Upload a folder of photobooth photos to Google Drive", long_about = None)]
pub struct UploadArgs {
    /// Folder containing the photos (prompted when omitted)
    pub folder: Option<PathBuf>,

    /// Batch number (defaults to the last uploaded batch + 1)
    #[arg(short, long)]
    pub batch: Option<BatchId>,

    /// What to do when a file with the same name already exists
    /// (skip, rename, overwrite; defaults to the config value)
    #[arg(long)]
    pub conflict: Option<ConflictPolicy>,

    /// Dry run mode - list photos without uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Kiosk mode - keep asking for the next folder until input ends
    #[arg(long = "loop")]
    pub kiosk: bool,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}

/// バッチの写真を電話番号に送信する
#[derive(Parser, Debug, Clone)]
#[command(name = "boothsync-send")]
#[command(about = "Send the photos of a batch to a phone number", long_about = None)]
pub struct SendArgs {
    /// Destination phone number (prompted when omitted)
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Batch number (prompted when omitted)
    #[arg(short, long)]
    pub batch: Option<BatchId>,

    /// Dry run mode - resolve photos without sharing or sending
    #[arg(long)]
    pub dry_run: bool,

    /// Kiosk mode - keep asking for the next phone and batch until input ends
    #[arg(long = "loop")]
    pub kiosk: bool,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}
