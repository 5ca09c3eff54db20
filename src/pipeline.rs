//! Load, interleave, split and save.
//!
//! The interleaved document is written to an intermediate file and loaded
//! again before splitting, so the split always sees the page tree exactly as
//! it was persisted. The split keeps the first `page_count` pages (the
//! riffle) and drops the surplus.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::interleave::interleave;
use crate::split::Splitter;

/// Input path used when none is given.
pub const DEFAULT_INPUT: &str = "input.pdf";

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "output.pdf";

const INTERMEDIATE_PREFIX: &str = "riffled-";
const INTERMEDIATE_SUFFIX: &str = ".pdf";

/// Options for [`RifflePipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Fixed location for the intermediate file. When unset a uniquely
    /// named temporary file is used.
    pub intermediate_path: Option<PathBuf>,

    /// Directory for the temporary intermediate file (system temp dir if unset)
    pub intermediate_dir: Option<PathBuf>,

    /// Compress streams of the final output
    pub compress: bool,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the intermediate document to a fixed path.
    pub fn with_intermediate_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.intermediate_path = Some(path.into());
        self
    }

    /// Create the temporary intermediate document inside `dir`.
    pub fn with_intermediate_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.intermediate_dir = Some(dir.into());
        self
    }

    /// Enable or disable output compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// How a pipeline run ended.
///
/// Every variant other than `Completed` is a terminal condition that left
/// no output behind. I/O and format failures are reported as [`Error`]s
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The output file was written.
    Completed {
        input: PathBuf,
        output: PathBuf,
        page_count: usize,
        interleaved_count: usize,
    },
    /// The input path does not exist.
    InputMissing { input: PathBuf },
    /// The input has an odd number of pages.
    OddPageCount { page_count: usize },
    /// The input has fewer than four pages.
    TooFewPages { page_count: usize },
    /// The interleave produced the wrong number of pages.
    UnexpectedPageCount { expected: usize, actual: usize },
}

impl Outcome {
    /// Whether an output file was produced.
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }

    /// Process exit code for callers that want one per condition.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed { .. } => 0,
            Outcome::InputMissing { .. } => 2,
            Outcome::OddPageCount { .. } => 3,
            Outcome::TooFewPages { .. } => 4,
            Outcome::UnexpectedPageCount { .. } => 5,
        }
    }

    /// Serialize to a single-line JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_violation(err: &Error) -> Option<Self> {
        match *err {
            Error::OddPageCount(page_count) => Some(Outcome::OddPageCount { page_count }),
            Error::TooFewPages(page_count) => Some(Outcome::TooFewPages { page_count }),
            Error::UnexpectedPageCount { expected, actual } => {
                Some(Outcome::UnexpectedPageCount { expected, actual })
            }
            _ => None,
        }
    }
}

/// Where the interleaved document lives between save and split.
enum Intermediate {
    Temporary(NamedTempFile),
    Fixed(PathBuf),
}

impl Intermediate {
    fn create(options: &PipelineOptions) -> Result<Self> {
        if let Some(ref path) = options.intermediate_path {
            return Ok(Intermediate::Fixed(path.clone()));
        }

        let mut builder = tempfile::Builder::new();
        builder
            .prefix(INTERMEDIATE_PREFIX)
            .suffix(INTERMEDIATE_SUFFIX);
        let file = match options.intermediate_dir {
            Some(ref dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(Intermediate::Temporary(file))
    }

    fn path(&self) -> &Path {
        match self {
            Intermediate::Temporary(file) => file.path(),
            Intermediate::Fixed(path) => path.as_path(),
        }
    }

    fn write(&mut self, document: &mut PdfDocument) -> Result<()> {
        match self {
            Intermediate::Temporary(file) => {
                let mut writer = BufWriter::new(file.as_file_mut());
                document.save_to(&mut writer)?;
                writer.flush()?;
            }
            Intermediate::Fixed(path) => document.save(path.as_path())?,
        }
        Ok(())
    }

    fn remove(self) -> Result<()> {
        match self {
            Intermediate::Temporary(file) => file.close()?,
            Intermediate::Fixed(path) => fs::remove_file(path)?,
        }
        Ok(())
    }
}

/// Interleaves a PDF and writes the first `page_count` pages of the result.
///
/// # Example
///
/// ```no_run
/// use pdfriffle::{PipelineOptions, RifflePipeline};
///
/// let outcome = RifflePipeline::new(PipelineOptions::new())
///     .process("input.pdf", "output.pdf")?;
/// println!("{}", outcome.to_json()?);
/// # Ok::<(), pdfriffle::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RifflePipeline {
    options: PipelineOptions,
}

impl RifflePipeline {
    /// Create a pipeline.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run the pipeline from `input` to `output`.
    ///
    /// An existing file at `output` is replaced on success and left alone
    /// otherwise.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<Outcome> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.exists() {
            log::warn!("in-pdf does not exist: {}", input.display());
            return Ok(Outcome::InputMissing {
                input: input.to_path_buf(),
            });
        }

        log::info!("loading in-pdf: {}", input.display());
        let mut document = PdfDocument::load(input)?;
        let page_count = document.page_count();
        log::info!("page-count: {}", page_count);

        let report = match interleave(&mut document, page_count) {
            Ok(report) => report,
            Err(err) => {
                let outcome = Outcome::from_violation(&err).ok_or(err)?;
                log::warn!("terminating without output for {}: {:?}", input.display(), outcome);
                document.close();
                return Ok(outcome);
            }
        };
        log::info!(
            "interleaved {} pages into {} (half = {})",
            report.original_count,
            report.interleaved_count,
            report.half
        );

        let mut intermediate = Intermediate::create(&self.options)?;
        log::info!(
            "saving interleaved pdf to {}",
            intermediate.path().display()
        );
        intermediate.write(&mut document)?;
        document.close();

        log::info!("loading pdf to split from {}", intermediate.path().display());
        let reloaded = PdfDocument::load(intermediate.path())?;
        log::debug!("reloaded page-count: {}", reloaded.page_count());

        let parts = Splitter::new()
            .with_start_page(1)
            .with_end_page(page_count)
            .with_split_at_page(page_count + 1)
            .split(&reloaded)?;
        if parts.len() != 1 {
            return Err(Error::UnexpectedSplit(parts.len()));
        }

        for mut part in parts {
            if output.exists() {
                log::info!("deleting existing out-pdf {}", output.display());
                fs::remove_file(output)?;
            }
            if self.options.compress {
                part.compress();
            }
            log::info!("saving split pdf to {}", output.display());
            part.save(output)?;
            part.close();
        }
        reloaded.close();

        log::info!("deleting intermediate pdf {}", intermediate.path().display());
        intermediate.remove()?;

        Ok(Outcome::Completed {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            page_count,
            interleaved_count: report.interleaved_count,
        })
    }
}
