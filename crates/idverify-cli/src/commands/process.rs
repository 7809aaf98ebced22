//! Process command - extract and verify fields from a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use idverify_core::models::{ExtractedFields, FieldName, IdVerifyConfig};
use idverify_core::{PureOcrRecognizer, Verdict, Workflow};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (image, or OCR text with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Treat the input as already recognized OCR text
    #[arg(long)]
    text: bool,

    #[command(flatten)]
    entered: EnteredArgs,
}

/// Values to check the extracted fields against.
#[derive(Args, Clone, Default)]
pub struct EnteredArgs {
    /// Holder name as entered by the user
    #[arg(long)]
    name: Option<String>,

    /// Date of birth as entered by the user
    #[arg(long)]
    dob: Option<String>,

    /// ID number as entered by the user
    #[arg(long)]
    id_number: Option<String>,

    /// Phone number as entered by the user
    #[arg(long)]
    phone: Option<String>,
}

impl EnteredArgs {
    fn values(&self) -> [(FieldName, Option<&String>); 4] {
        [
            (FieldName::Name, self.name.as_ref()),
            (FieldName::DateOfBirth, self.dob.as_ref()),
            (FieldName::IdNumber, self.id_number.as_ref()),
            (FieldName::PhoneNumber, self.phone.as_ref()),
        ]
    }

    fn is_empty(&self) -> bool {
        self.values().iter().all(|(_, v)| v.is_none())
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Outcome of processing one document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub source: String,
    pub extracted: ExtractedFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

/// Input files with this extension are read as OCR text.
pub fn is_text_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

/// Native OCR backend, loaded on first use and then reused.
pub struct LazyRecognizer<'a> {
    config: &'a IdVerifyConfig,
    model_dir: Option<PathBuf>,
    loaded: Option<PureOcrRecognizer>,
}

impl<'a> LazyRecognizer<'a> {
    pub fn new(config: &'a IdVerifyConfig, model_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            model_dir,
            loaded: None,
        }
    }

    pub fn get(&mut self) -> anyhow::Result<&PureOcrRecognizer> {
        let recognizer = match self.loaded.take() {
            Some(recognizer) => recognizer,
            None => self.load()?,
        };
        Ok(self.loaded.insert(recognizer))
    }

    fn load(&self) -> anyhow::Result<PureOcrRecognizer> {
        let mut config = self.config.clone();
        if let Some(dir) = &self.model_dir {
            config.models.model_dir = dir.clone();
        }

        PureOcrRecognizer::from_config(&config).map_err(|e| {
            anyhow::anyhow!(
                "{}.\n\nPass --model-dir or run 'idverify config set models.model_dir <dir>'.",
                e
            )
        })
    }
}

/// Run one document through the workflow.
///
/// OCR models are only loaded for image inputs.
pub fn process_document(
    path: &Path,
    force_text: bool,
    config: &IdVerifyConfig,
    recognizer: &mut LazyRecognizer,
    entered: &EnteredArgs,
    progress: &mut dyn FnMut(f32),
) -> anyhow::Result<Report> {
    let mut workflow = Workflow::new(config);

    let extracted = if force_text || is_text_input(path) {
        let raw = fs::read_to_string(path)?;
        workflow.submit_text(&raw)?.clone()
    } else {
        let bytes = fs::read(path)?;
        let media_type = ImageFormat::from_path(path)
            .ok()
            .map(|f| f.to_mime_type());
        workflow
            .submit_document(&bytes, media_type, recognizer.get()?, progress)?
            .clone()
    };

    let verdict = if entered.is_empty() {
        None
    } else {
        for (field, value) in entered.values() {
            if let Some(value) = value {
                workflow.entered_mut().set(field, value.as_str());
            }
        }
        Some(*workflow.verify()?)
    };

    Ok(Report {
        source: path.display().to_string(),
        extracted,
        verdict,
    })
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    // Create progress bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );
    pb.set_message("Recognizing text...");

    let mut recognizer = LazyRecognizer::new(&config, args.model_dir.clone());
    let report = process_document(
        &args.input,
        args.text,
        &config,
        &mut recognizer,
        &args.entered,
        &mut |p: f32| pb.set_position((p * 100.0) as u64),
    );

    let report = match report {
        Ok(report) => {
            pb.finish_with_message("Done");
            report
        }
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e);
        }
    };

    // Format output
    let output = format_report(&report, args.format)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_report(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_csv(report: &Report) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["field", "extracted", "match"])?;

    for (field, value) in report.extracted.iter() {
        let matched = report
            .verdict
            .map(|v| v.field(field).to_string())
            .unwrap_or_default();
        wtr.write_record([field.as_str(), value.unwrap_or(""), matched.as_str()])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", report.source));
    output.push('\n');

    output.push_str("Extracted fields:\n");
    for (field, value) in report.extracted.iter() {
        output.push_str(&format!(
            "  {:<14} {}\n",
            format!("{}:", field.label()),
            value.unwrap_or("-")
        ));
    }

    if let Some(verdict) = &report.verdict {
        output.push('\n');
        output.push_str("Verification:\n");
        for field in FieldName::ALL {
            let mark = if verdict.field(field) { "match" } else { "no match" };
            output.push_str(&format!(
                "  {:<14} {}\n",
                format!("{}:", field.label()),
                mark
            ));
        }
        output.push_str(&format!(
            "\nResult: {} ({}/{} fields matched)\n",
            if verdict.overall() { "PASS" } else { "FAIL" },
            verdict.matched(),
            FieldName::ALL.len()
        ));
    }

    output
}
