//! CLI tool for turning transcripts into business document templates.

use anyhow::{Context, Result};
use bizdoc_core::adapters::PassthroughExtractor;
use bizdoc_core::{industry, ExportFormat, KeyPointNormalizer, TemplateType};
use bizdoc_pdf::WkhtmltopdfRenderer;
use bizdoc_pipeline::{ExporterRegistry, PipelineConfig, RenderFailurePolicy, TemplatePipeline, TranscriptExtractor};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Generate business plans, pitch decks, and marketing strategies from transcripts.
#[derive(Parser, Debug)]
#[command(name = "bizdoc")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory exported files are written to
    #[arg(long, global = true, env = "BIZDOC_EXPORT_DIR", default_value = "./exports")]
    export_dir: PathBuf,

    /// HTML-to-PDF renderer binary
    #[arg(long, global = true, env = "BIZDOC_WKHTMLTOPDF", default_value = "wkhtmltopdf")]
    wkhtmltopdf: PathBuf,

    /// Largest accepted upload in bytes
    #[arg(long, global = true, env = "BIZDOC_MAX_UPLOAD_BYTES", default_value_t = bizdoc_pipeline::config::DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Fail on PDF render errors instead of writing an empty file
    #[arg(long, global = true)]
    strict_render: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the plain-text transcript of a .txt, .pdf, .docx, or .pptx file
    Extract {
        input: PathBuf,
    },

    /// Print the key points of a transcript, one per line
    Normalize {
        input: PathBuf,

        /// Treat the whole transcript as a single key point
        #[arg(long)]
        single: bool,
    },

    /// Print a generated template
    Generate {
        /// Template type: business_plan, pitch_deck, or marketing_strategy
        #[arg(short = 't', long = "type")]
        template_type: String,

        /// File with one key point per line
        points: PathBuf,
    },

    /// Generate a template and write it as word, pdf, or slide
    Export {
        /// Template type: business_plan, pitch_deck, or marketing_strategy
        #[arg(short = 't', long = "type")]
        template_type: String,

        /// Output format: word, pdf, or slide
        #[arg(short, long)]
        format: String,

        /// File with one key point per line
        points: PathBuf,

        /// Print the artifact size and MIME type
        #[arg(long)]
        print_size: bool,
    },

    /// List industries, or print the outline of one industry's templates
    Industries {
        industry: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = pipeline_config(&args);

    match &args.command {
        Command::Extract { input } => {
            let bytes = read_input(input)?;
            let transcript = TranscriptExtractor::new(config.max_upload_bytes)
                .extract_upload(&bytes, &file_name(input))
                .with_context(|| format!("Failed to extract {}", input.display()))?;
            println!("{}", transcript.text);
        }
        Command::Normalize { input, single } => {
            let bytes = read_input(input)?;
            let transcript = TranscriptExtractor::new(config.max_upload_bytes)
                .extract_upload(&bytes, &file_name(input))
                .with_context(|| format!("Failed to extract {}", input.display()))?;
            let points = KeyPointNormalizer::new()
                .with_split_lines(!single)
                .normalize(&transcript.text);
            for point in points.iter() {
                println!("{}", point);
            }
        }
        Command::Generate { template_type, points } => {
            let pipeline = build_pipeline(&args, config);
            let points = read_points(points)?;
            let document = pipeline.generate(template_type, &points)?;
            println!("{}", document.content);
        }
        Command::Export {
            template_type,
            format,
            points,
            print_size,
        } => {
            let pipeline = build_pipeline(&args, config);
            let format: ExportFormat = format.parse()?;
            let points = read_points(points)?;

            let artifact = pipeline.export(template_type, &points, format)?;
            if artifact.is_empty() {
                eprintln!("Warning: {} export is empty", format);
            }

            let stem = template_type.as_str();
            let path = pipeline
                .write_export(&artifact, &args.export_dir, stem)
                .with_context(|| format!("Failed to write export to {}", args.export_dir.display()))?;
            if *print_size {
                eprintln!("{} ({} bytes, {})", path.display(), artifact.bytes.len(), artifact.mime_type());
            }
            println!("{}", path.display());
        }
        Command::Industries { industry } => match industry {
            None => {
                for name in industry::industries() {
                    println!("{}", name);
                }
            }
            Some(name) => print_outlines(name)?,
        },
    }

    Ok(())
}

fn pipeline_config(args: &Args) -> PipelineConfig {
    let policy = if args.strict_render {
        RenderFailurePolicy::Propagate
    } else {
        RenderFailurePolicy::MaskAsEmpty
    };
    PipelineConfig::default()
        .with_max_upload_bytes(args.max_upload_bytes)
        .with_render_failure_policy(policy)
}

fn build_pipeline(args: &Args, config: PipelineConfig) -> TemplatePipeline {
    let renderer = WkhtmltopdfRenderer::new(&args.wkhtmltopdf);
    TemplatePipeline::new(
        config,
        Box::new(PassthroughExtractor),
        ExporterRegistry::standard(Box::new(renderer)),
    )
}

/// Print every template outline known for an industry.
fn print_outlines(name: &str) -> Result<()> {
    let templates = industry::templates_for(name);
    if templates.is_empty() {
        anyhow::bail!(
            "Unknown industry '{}' (available: {})",
            name,
            industry::industries().join(", ")
        );
    }

    for template_type in templates {
        if let Some(structure) = industry::structure(name, template_type) {
            println!("{}\n", title_line(template_type));
            println!("{}\n", structure.outline());
        }
    }
    Ok(())
}

fn title_line(template_type: TemplateType) -> String {
    format!("# {}", template_type.title())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read key points from a file, one per line.
fn read_points(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(KeyPointNormalizer::new().normalize(&text).into_vec())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_command() {
        let args = Args::try_parse_from([
            "bizdoc",
            "export",
            "--type",
            "pitch_deck",
            "--format",
            "slide",
            "points.txt",
            "--print-size",
            "--strict-render",
        ])
        .unwrap();

        assert!(args.strict_render);
        assert_eq!(pipeline_config(&args).render_failure_policy, RenderFailurePolicy::Propagate);
        match args.command {
            Command::Export {
                template_type,
                format,
                points,
                print_size,
            } => {
                assert!(print_size);
                assert_eq!(template_type, "pitch_deck");
                assert_eq!(format, "slide");
                assert_eq!(points, PathBuf::from("points.txt"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_read_points_strips_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.txt");
        std::fs::write(&path, "1. Reduce churn\n\n2. Expand to EU\n").unwrap();

        assert_eq!(read_points(&path).unwrap(), vec!["Reduce churn", "Expand to EU"]);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/tmp/call.pdf")), "call.pdf");
    }

    #[test]
    fn test_unknown_industry() {
        assert!(print_outlines("biotech").is_err());
    }
}
