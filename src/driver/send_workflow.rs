//! Send Workflow Orchestration
//!
//! バッチ写真送信のオーケストレーション。
//! `--loop` 指定時は入力が終わるまで電話番号とバッチ番号の問い合わせを繰り返す

use anyhow::Result;
use log::{info, warn};
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::repositories::drive_storage_repository::DriveStorageRepository;
use crate::adapter::repositories::twilio_messaging_repository::TwilioMessagingRepository;
use crate::application::dto::send_config::SendConfig;
use crate::application::use_cases::list_batch_photos::{BatchPhotos, ListBatchPhotosUseCase};
use crate::application::use_cases::send_photos::{SendOutcome, SendPhotosUseCase};
use crate::domain::entities::batch::BatchId;
use crate::domain::entities::destination::Destination;
use crate::domain::entities::photo::RemotePhoto;
use crate::domain::errors::BoothError;
use crate::domain::repositories::messaging_repository::MessagingGateway;
use crate::domain::repositories::storage_repository::PhotoStorage;

use super::cli::SendArgs;
use super::prompt;

const PHONE_PROMPT: &str = "Phone number";
const BATCH_PROMPT: &str = "Batch number";

/// Photo Send Workflow
pub struct PhotoSendWorkflow {
    config: Config,
}

impl PhotoSendWorkflow {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the send workflow on stdin/stdout against Drive and Twilio
    ///
    /// Clients are built once and reused by every round.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn execute(&self, args: SendArgs) -> Result<()> {
        // 認証より先に引数の番号を検証する
        if let Some(raw) = &args.phone {
            self.parse_destination(raw)?;
        }

        let storage = Arc::new(DriveStorageRepository::from_config(&self.config)?);
        println!("✓ Authenticated with Google Drive");

        let messaging = if args.dry_run {
            None
        } else {
            Some(Arc::new(TwilioMessagingRepository::from_config(
                &self.config,
            )?))
        };

        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();

        self.run(args, storage, messaging, &mut input, &mut output)
            .await?;

        Ok(())
    }

    /// Run one round, or rounds until `input` ends when `args.kiosk` is set
    ///
    /// `messaging` is `None` in dry-run mode. `args.phone` and `args.batch`
    /// only apply to the first round.
    ///
    /// # Returns
    ///
    /// The batch of every completed round
    pub async fn run<S, M, R, W>(
        &self,
        args: SendArgs,
        storage: Arc<S>,
        messaging: Option<Arc<M>>,
        input: &mut R,
        output: &mut W,
    ) -> Result<Vec<BatchId>>
    where
        S: PhotoStorage,
        M: MessagingGateway,
        R: BufRead,
        W: Write,
    {
        info!("Starting photo sender...");
        info!("Dry run: {}, loop: {}", messaging.is_none(), args.kiosk);

        let mut first_phone = args.phone;
        let mut first_batch = args.batch;
        let mut batches = Vec::new();

        loop {
            let Some(destination) =
                self.read_destination(first_phone.take(), args.kiosk, input, output)?
            else {
                print_end_of_input(output)?;
                break;
            };

            let batch = match first_batch.take() {
                Some(batch) => batch,
                None if args.kiosk => {
                    match prompt::read_parsed::<BatchId, _, _>(input, output, BATCH_PROMPT)? {
                        Some(batch) => batch,
                        None => {
                            print_end_of_input(output)?;
                            break;
                        }
                    }
                }
                None => prompt::prompt_parsed(input, output, BATCH_PROMPT)?,
            };

            writeln!(output, "✓ Sending batch {} to {}", batch, destination)?;

            let result = match &messaging {
                Some(messaging) => {
                    self.send_round(batch, &destination, &storage, messaging, output)
                        .await
                }
                None => list_round(batch, &destination, &storage, output).await,
            };

            match result {
                Ok(()) => batches.push(batch),
                Err(e) if args.kiosk => {
                    warn!("Send round failed: {:#}", e);
                    writeln!(output, "✗ {:#}", e)?;
                }
                Err(e) => return Err(e),
            }

            if !args.kiosk {
                break;
            }
            writeln!(output)?;
        }

        Ok(batches)
    }

    async fn send_round<S, M, W>(
        &self,
        batch: BatchId,
        destination: &Destination,
        storage: &Arc<S>,
        messaging: &Arc<M>,
        output: &mut W,
    ) -> Result<()>
    where
        S: PhotoStorage,
        M: MessagingGateway,
        W: Write,
    {
        let send_use_case = SendPhotosUseCase::new(storage.clone(), messaging.clone());
        let send_config = SendConfig::new(
            self.config.message_body.clone(),
            self.config.share_folder,
        );

        match send_use_case
            .execute(batch, destination, &send_config)
            .await?
        {
            SendOutcome::NoFilesFound { batch } => print_no_files(output, batch)?,
            SendOutcome::Sent(summary) => {
                for (name, sid) in summary.photo_names.iter().zip(&summary.message_sids) {
                    writeln!(output, "  ✓ {} (message {})", name, sid)?;
                }
                writeln!(
                    output,
                    "✓ Sent {} photos from batch {} to {}",
                    summary.message_sids.len(),
                    summary.batch,
                    summary.destination
                )?;
            }
        }

        Ok(())
    }

    /// 送信先を決定する（省略時は問い合わせ、不正な番号は再入力）
    ///
    /// 問い合わせ中に入力が終わった場合、`kiosk` なら `None` を返す
    fn read_destination<R: BufRead, W: Write>(
        &self,
        phone: Option<String>,
        kiosk: bool,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Destination>> {
        if let Some(raw) = phone {
            return Ok(Some(self.parse_destination(&raw)?));
        }

        loop {
            let raw = if kiosk {
                match prompt::read_answer(input, output, PHONE_PROMPT)? {
                    Some(raw) => raw,
                    None => return Ok(None),
                }
            } else {
                prompt::prompt_line(input, output, PHONE_PROMPT)?
            };

            match self.parse_destination(&raw) {
                Ok(destination) => return Ok(Some(destination)),
                Err(e) => writeln!(output, "✗ {}", e)?,
            }
        }
    }

    fn parse_destination(&self, raw: &str) -> Result<Destination, BoothError> {
        Destination::parse(
            raw,
            &self.config.default_country_code,
            self.config.channel(),
        )
    }
}

/// ドライラン：送信せずにバッチの写真を一覧表示する
async fn list_round<S, W>(
    batch: BatchId,
    destination: &Destination,
    storage: &Arc<S>,
    output: &mut W,
) -> Result<()>
where
    S: PhotoStorage,
    W: Write,
{
    let list_use_case = ListBatchPhotosUseCase::new(storage.clone());
    match list_use_case.execute(batch).await? {
        BatchPhotos::NotFound => print_no_files(output, batch)?,
        BatchPhotos::Found { photos, .. } => {
            writeln!(output, "✓ Dry-run mode (not actually sending)")?;
            writeln!(
                output,
                "  Would send {} photos to {}:",
                photos.len(),
                destination.address()
            )?;
            for photo in &photos {
                writeln!(output, "    - {}", describe_photo(photo))?;
            }
        }
    }
    Ok(())
}

/// 一覧表示用の1行（名前、ダウンロードURL、Driveのリンク）
fn describe_photo(photo: &RemotePhoto) -> String {
    match &photo.web_view_link {
        Some(link) => format!("{} | {} | link: {}", photo.name, photo.download_url(), link),
        None => format!("{} | {}", photo.name, photo.download_url()),
    }
}

fn print_no_files<W: Write>(output: &mut W, batch: BatchId) -> std::io::Result<()> {
    writeln!(output, "⚠ No files found for batch {}", batch)?;
    writeln!(output, "Nothing to send.")
}

fn print_end_of_input<W: Write>(output: &mut W) -> std::io::Result<()> {
    writeln!(output)?;
    writeln!(output, "✓ No more input. Exiting.")
}
