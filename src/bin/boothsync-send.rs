//! boothsync-send - Photobooth Photo Sender
//!
//! バッチの写真を Twilio 経由で電話番号に送信

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use boothsync::adapter::config::Config;
use boothsync::driver::{PhotoSendWorkflow, SendArgs};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let args = SendArgs::parse();
    let config = Config::load(&args.config)?;

    PhotoSendWorkflow::new(config).execute(args).await
}
