//! # Hagaki CLI
//!
//! Command-line interface for postcard address printing.
//!
//! ## Usage
//!
//! ```bash
//! # Render every record marked for printing
//! hagaki generate recipients.json -o hagaki.pdf
//!
//! # Ignore the print flags, embed a specific font
//! hagaki generate recipients.json -o all.pdf --all --font brush.ttf
//!
//! # Preview the third record over the scanned card
//! hagaki preview recipients.json --index 2 -o preview.png --background hagaki.png
//!
//! # Dump the layout decisions for one record
//! hagaki inspect recipients.json --index 0
//! ```
//!
//! Set `RUST_LOG=debug` for per-page logging.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hagaki::{
    HagakiError, LayoutConfig, PageComposer, Recipient,
    font,
    preview::{self, PreviewOptions},
    records,
    text::{extract_postal_code, layout_name_columns, wrap_address},
};

/// Hagaki - Vertical postcard address layout
#[derive(Parser, Debug)]
#[command(name = "hagaki")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render recipients to a multi-page PDF
    Generate {
        /// JSON array of recipient records
        input: PathBuf,

        /// Output PDF path
        #[arg(short, long, default_value = "hagaki.pdf")]
        output: PathBuf,

        /// TrueType/OpenType font to embed (builtin font if missing)
        #[arg(long, default_value = "brush.ttf")]
        font: PathBuf,

        /// JSON file overriding layout values
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Render every record, ignoring the print flag
        #[arg(long)]
        all: bool,
    },

    /// Render one recipient as a PNG preview
    Preview {
        /// JSON array of recipient records
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,

        /// Record to preview (0-based, over all records)
        #[arg(long, default_value = "0")]
        index: usize,

        /// Card image drawn under the text (skipped if missing)
        #[arg(long, default_value = "hagaki.png")]
        background: PathBuf,

        /// TrueType/OpenType font for glyph outlines
        #[arg(long, default_value = "brush.ttf")]
        font: PathBuf,

        /// JSON file overriding layout values
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Preview resolution
        #[arg(long, default_value = "300")]
        dpi: f32,
    },

    /// Print the layout decisions and draw ops for one recipient
    Inspect {
        /// JSON array of recipient records
        input: PathBuf,

        /// Record to inspect (0-based)
        #[arg(long, default_value = "0")]
        index: usize,

        /// JSON file overriding layout values
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), HagakiError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            font,
            layout,
            all,
        } => {
            let recipients = records::load_records_file(&input)?;
            let batch = if all {
                recipients
            } else {
                records::selected(&recipients)
            };

            let composer = PageComposer::new(load_layout(layout.as_deref())?);
            let font = font::load_or_builtin(&font);
            let pdf = composer.render_document(&batch, font.as_ref())?;
            std::fs::write(&output, pdf)?;

            println!("Wrote {} postcards to {}", batch.len(), output.display());
        }

        Commands::Preview {
            input,
            output,
            index,
            background,
            font,
            layout,
            dpi,
        } => {
            let recipients = records::load_records_file(&input)?;
            let recipient = pick(&recipients, index)?;

            let composer = PageComposer::new(load_layout(layout.as_deref())?);
            let page = composer.compose(recipient);

            let background = if background.exists() {
                Some(background)
            } else {
                log::info!("No background at {}, previewing on white", background.display());
                None
            };
            let options = PreviewOptions {
                page: composer.config().page,
                dpi,
                background,
                ..PreviewOptions::default()
            };

            let font = font::load_or_builtin(&font);
            let image = preview::render_preview(&page, font.as_ref(), &options)?;
            std::fs::write(&output, preview::to_png(&image)?)?;

            println!("Saved preview of {} to {}", recipient.name, output.display());
        }

        Commands::Inspect {
            input,
            index,
            layout,
        } => {
            let recipients = records::load_records_file(&input)?;
            let recipient = pick(&recipients, index)?;
            let composer = PageComposer::new(load_layout(layout.as_deref())?);
            inspect(recipient, &composer);
        }
    }

    Ok(())
}

fn load_layout(path: Option<&Path>) -> Result<LayoutConfig, HagakiError> {
    match path {
        Some(path) => {
            log::info!("Using layout overrides from {}", path.display());
            LayoutConfig::from_json_file(path)
        }
        None => Ok(LayoutConfig::default()),
    }
}

fn pick(recipients: &[Recipient], index: usize) -> Result<&Recipient, HagakiError> {
    recipients.get(index).ok_or_else(|| HagakiError::InvalidRecord {
        index,
        reason: format!("out of range ({} records)", recipients.len()),
    })
}

fn inspect(recipient: &Recipient, composer: &PageComposer) {
    let config = composer.config();
    let split = extract_postal_code(&recipient.address);
    let lines = wrap_address(&split.remainder, &config.address.wrap);
    let columns = layout_name_columns(
        recipient.name.trim(),
        &recipient.co_addressee_names(),
        config.names.base_x_mm,
        config.names.column_pitch_mm,
    );

    println!("Recipient: {}", recipient.name);
    if split.has_code() {
        println!("Postal code: {}", split.digits);
    } else {
        println!("Postal code: (none)");
    }

    println!("Address lines:");
    for (i, line) in lines.iter().enumerate() {
        let slot = config
            .address
            .slots
            .get(i)
            .map(|s| format!("{:.1}mm", s.x_mm))
            .unwrap_or_else(|| "dropped".to_string());
        println!("  [{}] {} ({} chars) @ {}", i, line, line.chars().count(), slot);
    }

    println!("Names ({} people):", columns.total_people());
    for column in columns.columns() {
        println!("  {} @ {:.1}mm", column.text, column.x);
    }

    let page = composer.compose(recipient);
    println!("Ops ({}):", page.len());
    println!("{:#?}", page.ops);
}
