//! Proxy workflow.
//!
//! Per file: skip if the proxy exists, probe, analyze, prepare `Proxy/`,
//! transcode, and when the audio codec is unsupported move the source to
//! `Originals/` and regenerate it with PCM audio. A proxy that was already
//! produced is left in place when remediation fails.

use crate::core::analyzer;
use crate::core::planner::{self, ORIGINALS_DIR};
use crate::models::media::MediaProperties;
use crate::services::pix_fmts::PixelFormatCatalog;
use crate::services::MediaToolkit;
use crate::utils::fs::ensure_dir_like_parent;
use crate::Result;
use std::path::{Path, PathBuf};

/// Successful terminal states of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyOutcome {
    /// Proxy already existed; nothing was done.
    Skipped { proxy: PathBuf },
    /// Proxy produced, and the original regenerated if `audio_remediated`.
    Succeeded {
        proxy: PathBuf,
        audio_remediated: bool,
    },
}

/// Runs the proxy workflow for one file at a time.
///
/// The pixel format catalog lives as long as the workflow, so a batch that
/// reuses one workflow lists pixel formats at most once.
pub struct ProxyWorkflow<'a> {
    toolkit: &'a dyn MediaToolkit,
    catalog: PixelFormatCatalog,
    hwaccel: bool,
}

impl<'a> ProxyWorkflow<'a> {
    pub fn new(toolkit: &'a dyn MediaToolkit, hwaccel: bool) -> Self {
        Self {
            toolkit,
            catalog: PixelFormatCatalog::new(),
            hwaccel,
        }
    }

    /// Use a preloaded catalog instead of listing pixel formats lazily.
    pub fn with_catalog(mut self, catalog: PixelFormatCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Probe and analyze a file without side effects.
    pub fn inspect(&mut self, source: &Path) -> Result<MediaProperties> {
        let summary = self.toolkit.probe(source)?;

        if summary.streams.is_empty() {
            return Err(crate::Error::NoUsableStreams(source.display().to_string()));
        }

        let props = analyzer::analyze(&summary, &mut self.catalog, self.toolkit);
        tracing::debug!("Properties for {}: {:?}", source.display(), props);

        if !props.has_usable_streams() {
            return Err(crate::Error::NoUsableStreams(source.display().to_string()));
        }

        Ok(props)
    }

    /// Process one source file.
    pub fn process(&mut self, source: &Path) -> Result<ProxyOutcome> {
        tracing::info!("Processing file: {}", source.display());

        let proxy = planner::proxy_path_for(source);
        if proxy.exists() {
            tracing::info!("Proxy file already exists: {}", proxy.display());
            return Ok(ProxyOutcome::Skipped { proxy });
        }

        let props = self.inspect(source)?;

        if let Some(proxy_dir) = proxy.parent() {
            tracing::debug!(
                "Preparing proxy directory {} for {}",
                proxy_dir.display(),
                source.display()
            );
            ensure_dir_like_parent(proxy_dir).map_err(|e| {
                crate::Error::ProxyDirectoryUnavailable {
                    path: proxy_dir.display().to_string(),
                    source: e,
                }
            })?;
        }

        let plan = planner::build_proxy_plan(source, &proxy, &props, self.hwaccel);
        self.toolkit.transcode(&plan)?;
        tracing::info!("Proxy created: {}", proxy.display());

        if props.unsupported_audio_format {
            tracing::info!(
                "Unsupported audio format detected. Converting to PCM for file: {}",
                source.display()
            );
            self.remediate_audio(source)?;
        }

        Ok(ProxyOutcome::Succeeded {
            proxy,
            audio_remediated: props.unsupported_audio_format,
        })
    }

    /// Move the original aside and regenerate it with PCM audio.
    fn remediate_audio(&self, source: &Path) -> Result<()> {
        relocate_original(source)?;

        let plan = planner::build_original_conversion_plan(source);
        self.toolkit.transcode(&plan)?;
        tracing::info!("Original regenerated with PCM audio: {}", source.display());

        Ok(())
    }
}

/// Move `source` into the sibling `Originals/` directory.
///
/// Never overwrites: an existing file of the same name fails the move and
/// leaves `source` where it is.
pub fn relocate_original(source: &Path) -> Result<PathBuf> {
    tracing::info!("Moving unsupported audio file to {}: {}", ORIGINALS_DIR, source.display());

    let target = planner::original_path_for(source);

    if let Some(originals_dir) = target.parent() {
        tracing::debug!(
            "Preparing originals directory {} for {}",
            originals_dir.display(),
            source.display()
        );
        ensure_dir_like_parent(originals_dir).map_err(|e| {
            crate::Error::OriginalRelocationFailed {
                path: source.display().to_string(),
                source: e,
            }
        })?;
    }

    if target.exists() {
        return Err(crate::Error::OriginalAlreadyExists(
            target.display().to_string(),
        ));
    }

    std::fs::rename(source, &target).map_err(|e| crate::Error::OriginalRelocationFailed {
        path: source.display().to_string(),
        source: e,
    })?;

    Ok(target)
}
