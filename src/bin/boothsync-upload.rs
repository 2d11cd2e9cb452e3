//! boothsync-upload - Photobooth Photo Uploader
//!
//! 写真フォルダを Google Drive のバッチフォルダにアップロード

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use boothsync::adapter::config::Config;
use boothsync::driver::{PhotoUploadWorkflow, UploadArgs};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let args = UploadArgs::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = PhotoUploadWorkflow::new(config);

    workflow.execute(args).await
}
