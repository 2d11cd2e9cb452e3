//! Upload Workflow Orchestration
//!
//! 写真アップロードのオーケストレーション。
//! `--loop` 指定時は入力が終わるまでフォルダの問い合わせとアップロードを繰り返す

use anyhow::Result;
use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::repositories::drive_storage_repository::DriveStorageRepository;
use crate::adapter::repositories::file_photo_repository::FilePhotoRepository;
use crate::adapter::repositories::json_state_repository::JsonStateRepository;
use crate::application::dto::upload_config::UploadConfig;
use crate::application::use_cases::discover_photos::DiscoverPhotosUseCase;
use crate::application::use_cases::resolve_batch::ResolveBatchUseCase;
use crate::application::use_cases::upload_photos::{UploadPhotosUseCase, UploadSummary};
use crate::domain::entities::batch::BatchId;
use crate::domain::repositories::storage_repository::PhotoStorage;

use super::cli::UploadArgs;
use super::prompt;

const FOLDER_PROMPT: &str = "Photo folder path";

/// Photo Upload Workflow
pub struct PhotoUploadWorkflow {
    config: Config,
    photo_repository: Arc<FilePhotoRepository>,
    state_repository: Arc<JsonStateRepository>,
    discover_use_case: DiscoverPhotosUseCase<FilePhotoRepository>,
    resolve_batch_use_case: ResolveBatchUseCase<JsonStateRepository>,
}

/// 1ラウンド分の入力
struct Round<'a> {
    folder: &'a Path,
    requested: Option<BatchId>,
    previous: Option<BatchId>,
    dry_run: bool,
}

impl PhotoUploadWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let photo_repo = Arc::new(FilePhotoRepository::new());
        let state_repo = Arc::new(JsonStateRepository::new());

        Self {
            config,
            discover_use_case: DiscoverPhotosUseCase::new(photo_repo.clone()),
            resolve_batch_use_case: ResolveBatchUseCase::new(state_repo.clone()),
            photo_repository: photo_repo,
            state_repository: state_repo,
        }
    }

    /// Execute the upload workflow on stdin/stdout against Google Drive
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn execute(&self, args: UploadArgs) -> Result<()> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();

        self.run(args, &mut input, &mut output, || {
            DriveStorageRepository::from_config(&self.config).map(Arc::new)
        })
        .await?;

        Ok(())
    }

    /// Run one round, or rounds until `input` ends when `args.kiosk` is set
    ///
    /// `connect` is called at most once, on the first round that actually
    /// uploads. `args.folder` and `args.batch` only apply to the first round.
    ///
    /// # Returns
    ///
    /// The batch of every round that found photos
    pub async fn run<S, F, R, W>(
        &self,
        args: UploadArgs,
        input: &mut R,
        output: &mut W,
        mut connect: F,
    ) -> Result<Vec<BatchId>>
    where
        S: PhotoStorage,
        F: FnMut() -> Result<Arc<S>>,
        R: BufRead,
        W: Write,
    {
        info!("Starting photo uploader...");
        info!("Dry run: {}, loop: {}", args.dry_run, args.kiosk);

        let upload_config = UploadConfig::new(
            args.conflict.unwrap_or(self.config.conflict_policy),
            self.config.photo_extensions.clone(),
        );

        writeln!(output, "✓ Using configuration:")?;
        writeln!(output, "  Root folder: {}", self.config.root_folder_id)?;
        writeln!(output, "  Conflict policy: {}", upload_config.conflict_policy)?;
        if upload_config.accepts_all_files() {
            writeln!(output, "  Extensions: all files")?;
        } else {
            writeln!(
                output,
                "  Extensions: {}",
                upload_config.photo_extensions.join(", ")
            )?;
        }

        let mut storage: Option<Arc<S>> = None;
        let mut first_folder = args.folder;
        let mut first_batch = args.batch;
        let mut previous = None;
        let mut batches = Vec::new();

        loop {
            let folder = match first_folder.take() {
                Some(folder) => folder,
                None if args.kiosk => match prompt::read_answer(input, output, FOLDER_PROMPT)? {
                    Some(answer) => PathBuf::from(answer),
                    None => {
                        writeln!(output)?;
                        writeln!(output, "✓ No more input. Exiting.")?;
                        break;
                    }
                },
                None => PathBuf::from(prompt::prompt_line(input, output, FOLDER_PROMPT)?),
            };

            let round = Round {
                folder: &folder,
                requested: first_batch.take(),
                previous,
                dry_run: args.dry_run,
            };

            match self
                .upload_round(round, &upload_config, &mut storage, &mut connect, output)
                .await
            {
                Ok(Some(batch)) => {
                    previous = Some(batch);
                    batches.push(batch);
                }
                Ok(None) => {}
                Err(e) if args.kiosk => {
                    warn!("Upload round failed: {:#}", e);
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

    async fn upload_round<S, F, W>(
        &self,
        round: Round<'_>,
        upload_config: &UploadConfig,
        storage: &mut Option<Arc<S>>,
        connect: &mut F,
        output: &mut W,
    ) -> Result<Option<BatchId>>
    where
        S: PhotoStorage,
        F: FnMut() -> Result<Arc<S>>,
        W: Write,
    {
        let folder = round.folder;
        let discovery = self
            .discover_use_case
            .execute(folder, upload_config)
            .await?;
        report_ignored(output, &discovery.ignored)?;

        let photos = discovery.photos;
        if photos.is_empty() {
            writeln!(output, "⚠ No photos found in {}", folder.display())?;
            writeln!(output, "Nothing to upload.")?;
            return Ok(None);
        }
        writeln!(
            output,
            "✓ Found {} photos in {}",
            photos.len(),
            folder.display()
        )?;

        let resolved = self
            .resolve_batch_use_case
            .execute(round.requested, &self.config.state_path)
            .await?;
        // ドライランでは状態が保存されないため、前のラウンドより後の番号にする
        let batch = match (round.requested, round.previous) {
            (None, Some(previous)) => resolved.max(previous.next()),
            _ => resolved,
        };
        writeln!(output, "✓ Batch number: {}", batch)?;

        if round.dry_run {
            writeln!(output, "✓ Dry-run mode (not actually uploading)")?;
            writeln!(
                output,
                "  Would upload {} photos to batch {}:",
                photos.len(),
                batch
            )?;
            for photo in &photos {
                writeln!(
                    output,
                    "    - {} | {} bytes | {}",
                    photo.file_name, photo.size, photo.mime_type
                )?;
            }
            return Ok(Some(batch));
        }

        let storage = match storage.clone() {
            Some(connected) => connected,
            None => {
                let connected = connect()?;
                writeln!(output, "✓ Authenticated with Google Drive")?;
                *storage = Some(connected.clone());
                connected
            }
        };

        let upload_use_case = UploadPhotosUseCase::new(
            self.photo_repository.clone(),
            storage,
            self.state_repository.clone(),
        );

        let summary = upload_use_case
            .execute(&photos, batch, upload_config, &self.config.state_path)
            .await?;

        print_summary(output, &summary)?;
        writeln!(output, "✓ Upload complete!")?;

        Ok(Some(batch))
    }
}

/// 拡張子フィルタなどで対象外になったファイルを表示する
fn report_ignored<W: Write>(output: &mut W, ignored: &[String]) -> std::io::Result<()> {
    if ignored.is_empty() {
        return Ok(());
    }
    writeln!(
        output,
        "⚠ Ignoring {} files not matching photo_extensions:",
        ignored.len()
    )?;
    for name in ignored {
        writeln!(output, "    - {}", name)?;
    }
    Ok(())
}

fn print_summary<W: Write>(output: &mut W, summary: &UploadSummary) -> std::io::Result<()> {
    if let Some(folder_id) = &summary.folder_id {
        let verb = if summary.folder_created {
            "Created"
        } else {
            "Reused"
        };
        writeln!(
            output,
            "✓ {} folder for batch {} ({})",
            verb, summary.batch, folder_id
        )?;
    }

    writeln!(output, "✓ Uploaded {} photos", summary.uploaded.len())?;
    for (original, remote) in &summary.renamed {
        writeln!(output, "  ✓ {} uploaded as {}", original, remote)?;
    }
    for name in &summary.overwritten {
        writeln!(output, "  ✓ {} overwritten", name)?;
    }
    if !summary.skipped.is_empty() {
        writeln!(
            output,
            "⚠ Skipped {} photos already in batch {}:",
            summary.skipped.len(),
            summary.batch
        )?;
        for name in &summary.skipped {
            writeln!(output, "    - {}", name)?;
        }
    }
    Ok(())
}
