//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::{display_name, read_input, STDIN};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use logsift_drain::config::EXHAUSTIVE_MAX_CLUSTERS;
use logsift_drain::DrainConfig;
use logsift_extractor::{
    ExtractedChunk, ExtractionMetadata, Extractor, ExtractorConfig, OracleScope,
};
use serde::Serialize;
use tracing::debug;

/// Extraction result for one input.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File name, or `<stdin>`
    pub source: String,

    /// First occurrence of every pattern, in line order
    pub patterns: Vec<ExtractedChunk>,

    /// Extraction statistics
    pub metadata: ExtractionMetadata,
}

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    verbose: bool,
    formatter: &Formatter,
) -> Result<()> {
    let extractor_config = resolve_config(&args, config, verbose)?;
    let sources = resolve_sources(args.files)?;

    let reports = run_extractions(sources, extractor_config, config.drain.clone()).await?;
    println!("{}", formatter.format_reports(&reports)?);

    Ok(())
}

/// Apply command-line overrides on top of the configuration file.
pub fn resolve_config(args: &ExtractArgs, config: &Config, verbose: bool) -> Result<ExtractorConfig> {
    let mut resolved = config.extractor.clone();

    if args.exhaustive {
        resolved.max_clusters = EXHAUSTIVE_MAX_CLUSTERS;
    }
    if let Some(max_clusters) = args.max_clusters {
        resolved.max_clusters = max_clusters;
    }
    if args.shared {
        resolved.scope = OracleScope::Shared;
    }
    if args.no_trim {
        resolved.trim_chunks = false;
    }
    resolved.verbose |= verbose;

    resolved.validate().map_err(CliError::InvalidInput)?;
    Ok(resolved)
}

fn resolve_sources(files: Vec<String>) -> Result<Vec<String>> {
    if files.is_empty() {
        return Ok(vec![STDIN.to_string()]);
    }
    if files.iter().filter(|f| f.as_str() == STDIN).count() > 1 {
        return Err(CliError::InvalidInput(
            "stdin ('-') can only be given once".to_string(),
        ));
    }
    Ok(files)
}

/// Extract every source, keeping input order in the returned reports.
///
/// With `OracleScope::PerCall` each source gets its own oracle on a blocking
/// worker. With `OracleScope::Shared` one oracle sees the sources in order.
pub async fn run_extractions(
    sources: Vec<String>,
    config: ExtractorConfig,
    tuning: DrainConfig,
) -> Result<Vec<FileReport>> {
    match config.scope {
        OracleScope::PerCall => {
            let handles: Vec<_> = sources
                .into_iter()
                .map(|source| {
                    let config = config.clone();
                    let tuning = tuning.clone();
                    tokio::task::spawn_blocking(move || {
                        let mut extractor = Extractor::with_drain_tuning(config, tuning)?;
                        extract_one(&mut extractor, source)
                    })
                })
                .collect();

            let mut reports = Vec::with_capacity(handles.len());
            for handle in handles {
                let report = handle
                    .await
                    .map_err(|e| CliError::Worker(e.to_string()))??;
                reports.push(report);
            }
            Ok(reports)
        }
        OracleScope::Shared => {
            let mut extractor = Extractor::with_drain_tuning(config, tuning)?;
            sources
                .into_iter()
                .map(|source| extract_one(&mut extractor, source))
                .collect()
        }
    }
}

fn extract_one(
    extractor: &mut Extractor<logsift_drain::DrainOracle>,
    source: String,
) -> Result<FileReport> {
    let text = read_input(&source)?;
    debug!("Read {} bytes from {}", text.len(), display_name(&source));

    let result = extractor.extract(&text)?;
    if extractor.config().verbose {
        extractor.oracle().log_profile();
    }

    Ok(FileReport {
        source: display_name(&source).to_string(),
        patterns: result.chunks,
        metadata: result.metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(files: &[&str]) -> ExtractArgs {
        ExtractArgs {
            files: files.iter().map(|f| f.to_string()).collect(),
            max_clusters: None,
            exhaustive: false,
            shared: false,
            no_trim: false,
        }
    }

    fn log_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_flags_override_file_settings() {
        let mut config = Config::default();
        config.extractor.max_clusters = 50;

        let mut extract_args = args(&[]);
        extract_args.max_clusters = Some(3);
        extract_args.shared = true;
        extract_args.no_trim = true;

        let resolved = resolve_config(&extract_args, &config, true).unwrap();
        assert_eq!(resolved.max_clusters, 3);
        assert_eq!(resolved.scope, OracleScope::Shared);
        assert!(!resolved.trim_chunks);
        assert!(resolved.verbose);
    }

    #[test]
    fn test_exhaustive_flag() {
        let mut extract_args = args(&[]);
        extract_args.exhaustive = true;

        let resolved = resolve_config(&extract_args, &Config::default(), false).unwrap();
        assert_eq!(resolved.max_clusters, 1000);
    }

    #[test]
    fn test_zero_max_clusters_rejected() {
        let mut extract_args = args(&[]);
        extract_args.max_clusters = Some(0);

        let result = resolve_config(&extract_args, &Config::default(), false);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_sources_default_to_stdin() {
        assert_eq!(resolve_sources(vec![]).unwrap(), vec!["-"]);
        assert!(resolve_sources(vec!["-".into(), "-".into()]).is_err());
    }

    #[tokio::test]
    async fn test_per_call_extractions_keep_input_order() {
        let first = log_file("pod web-1 ready\npod web-2 ready\nerror: pull failed\n");
        let second = log_file("step 1\nstep 2\n");
        let sources = vec![
            first.path().to_string_lossy().into_owned(),
            second.path().to_string_lossy().into_owned(),
        ];

        let reports = run_extractions(sources.clone(), ExtractorConfig::default(), DrainConfig::default())
            .await
            .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].source, sources[0]);
        let lines: Vec<usize> = reports[0].patterns.iter().map(|p| p.line_number).collect();
        assert_eq!(lines, vec![0, 2]);
        assert_eq!(reports[1].patterns.len(), 1);
    }

    #[tokio::test]
    async fn test_shared_extractions_reuse_patterns() {
        let first = log_file("pod web-1 ready\n");
        let second = log_file("pod web-2 ready\n");
        let sources = vec![
            first.path().to_string_lossy().into_owned(),
            second.path().to_string_lossy().into_owned(),
        ];
        let config = ExtractorConfig {
            scope: OracleScope::Shared,
            ..ExtractorConfig::default()
        };

        let reports = run_extractions(sources, config, DrainConfig::default()).await.unwrap();

        assert_eq!(
            reports[0].patterns[0].cluster_id,
            reports[1].patterns[0].cluster_id
        );
        assert_eq!(reports[1].metadata.cluster_count, 1);
    }

    #[tokio::test]
    async fn test_missing_file_fails_the_run() {
        let result = run_extractions(
            vec!["/nonexistent/build.log".to_string()],
            ExtractorConfig::default(),
            DrainConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
