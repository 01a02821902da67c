mod logger;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use pdf_qr::{
    Diagnostics, InsertionRequest, Measurement, NativePosition, PaperValidation, QrConfig, QrError,
    Unit, VisualPosition,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pdfqr", about = "Place a QR code on a PDF page", version)]
struct Cli {
    /// Configuration file (default: config.json next to the working directory or binary)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print timestamped log records on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert a QR code into one page and write a new PDF
    Insert {
        /// Text encoded in the QR code
        #[arg(long)]
        url: String,

        /// Source PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Destination PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Target page (1-based)
        #[arg(long)]
        page: Option<usize>,

        /// Horizontal position of the QR square
        #[arg(long)]
        x: Option<f64>,

        /// Vertical position of the QR square
        #[arg(long)]
        y: Option<f64>,

        /// Unit of --x and --y
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,

        /// Side length of the QR square
        #[arg(long)]
        size: Option<f64>,

        /// Unit of --size
        #[arg(long, value_enum)]
        size_unit: Option<UnitArg>,

        /// Corner the position is measured from
        #[arg(long, default_value = "bottom-left", value_enum)]
        origin: OriginArg,

        #[command(flatten)]
        validation: ValidationArgs,
    },

    /// Validate paper size and rotation without writing anything
    Check {
        /// PDF file to check
        #[arg(short, long)]
        input: PathBuf,

        /// Page to check (1-based)
        #[arg(long)]
        page: Option<usize>,

        #[command(flatten)]
        validation: ValidationArgs,
    },

    /// List the geometry and paper size of every page
    Info {
        /// PDF file to inspect
        #[arg(short, long)]
        input: PathBuf,

        /// Tolerance for the paper size match, in points
        #[arg(long)]
        tol_pt: Option<f64>,
    },
}

#[derive(Args)]
struct ValidationArgs {
    /// Tolerance for the paper size match, in points
    #[arg(long)]
    tol_pt: Option<f64>,

    /// What to do when a page is neither A4 nor LETTER
    #[arg(long, value_enum)]
    paper_check: Option<PaperCheckArg>,

    /// Check every page instead of only the target page
    #[arg(long)]
    check_all_pages: bool,

    /// Dimensions compared against A4 and LETTER
    #[arg(long, value_enum)]
    paper_dim_mode: Option<DimModeArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Cm,
    Mm,
    Pt,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperCheckArg {
    Warn,
    Strict,
}

#[derive(Clone, Copy, ValueEnum)]
enum DimModeArg {
    Visible,
    Mediabox,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OriginArg {
    /// PDF user space: Y grows upward from the bottom edge
    BottomLeft,
    /// As seen on screen: Y grows downward from the top edge
    TopLeft,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Cm => Self::Centimeter,
            UnitArg::Mm => Self::Millimeter,
            UnitArg::Pt => Self::Point,
        }
    }
}

impl From<PaperCheckArg> for pdf_qr::PaperCheck {
    fn from(arg: PaperCheckArg) -> Self {
        match arg {
            PaperCheckArg::Warn => Self::Warn,
            PaperCheckArg::Strict => Self::Strict,
        }
    }
}

impl From<DimModeArg> for pdf_qr::PaperDimMode {
    fn from(arg: DimModeArg) -> Self {
        match arg {
            DimModeArg::Visible => Self::Visible,
            DimModeArg::Mediabox => Self::Mediabox,
        }
    }
}

impl ValidationArgs {
    /// Command-line values over the configured ones
    fn resolve(&self, config: &QrConfig) -> PaperValidation {
        let defaults = config.validation;
        PaperValidation {
            tolerance_pt: self.tol_pt.unwrap_or(defaults.tol_pt),
            paper_check: self
                .paper_check
                .map(Into::into)
                .unwrap_or(defaults.paper_check),
            page_scope: pdf_qr::PageScope::from_check_all(
                self.check_all_pages || defaults.check_all_pages,
            ),
            paper_dim_mode: self
                .paper_dim_mode
                .map(Into::into)
                .unwrap_or(defaults.paper_dim_mode),
        }
    }
}

async fn load_config(path: Option<&Path>) -> Result<QrConfig> {
    match path {
        Some(path) => QrConfig::load(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display())),
        None => {
            let (config, found) = QrConfig::discover().await?;
            if let Some(found) = found {
                log::debug!("Using configuration {}", found.display());
            }
            Ok(config)
        }
    }
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for line in diagnostics {
        println!("{}", line);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        // Only fails when a logger is already installed
        let _ = logger::ConsoleLogger::new(LevelFilter::Debug).init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // A paper mismatch was already printed as part of the diagnostics
            if !matches!(
                e.downcast_ref::<QrError>(),
                Some(QrError::PaperMismatch { .. })
            ) {
                eprintln!("[ERROR] {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Insert {
            url,
            input,
            output,
            page,
            x,
            y,
            unit,
            size,
            size_unit,
            origin,
            validation,
        } => {
            let defaults = config.defaults;
            let page = page.unwrap_or(defaults.page);
            let unit = unit.map(Unit::from).unwrap_or(defaults.unit);
            let x = x.unwrap_or(defaults.x);
            let y = y.unwrap_or(defaults.y);
            let size = Measurement::new(
                size.unwrap_or(defaults.size),
                size_unit.map(Unit::from).unwrap_or(defaults.size_unit),
            );

            let position = match origin {
                OriginArg::BottomLeft => NativePosition::in_unit(x, y, unit),
                OriginArg::TopLeft => {
                    let doc = pdf_qr::load_pdf(&input).await?;
                    let id = pdf_qr::page_id(&doc, page)?;
                    let (_, visible_height) = pdf_qr::page_geometry(&doc, id)?.visible_dimensions();
                    VisualPosition::in_unit(x, y, unit).to_native(visible_height, size)
                }
            };

            let mut request = InsertionRequest::new(input, output, url, page, position, size);
            request.validation = validation.resolve(&config);
            request.qr_style = config.qr;

            let (diagnostics, result) = tokio::task::spawn_blocking(move || {
                let mut diagnostics = Diagnostics::new();
                let result = pdf_qr::insert_qr_blocking(&request, &mut diagnostics);
                (diagnostics, result)
            })
            .await?;

            print_diagnostics(&diagnostics);
            let report = result?;
            println!(
                "QR code placed on page {}/{} at ({:.2}, {:.2}) pt, {:.2} pt square → {}",
                report.page,
                report.page_count,
                report.placement.x_pt,
                report.placement.y_pt,
                report.placement.side_pt,
                report.output_pdf.display()
            );
        }

        Commands::Check {
            input,
            page,
            validation,
        } => {
            let settings = validation.resolve(&config);
            let page = page.unwrap_or(config.defaults.page);
            let doc = pdf_qr::load_pdf(&input).await?;
            pdf_qr::page_id(&doc, page)?;

            let mut diagnostics = Diagnostics::new();
            let result = pdf_qr::validate_pages(&doc, page, &settings, &mut diagnostics);
            print_diagnostics(&diagnostics);
            result?;
            println!("{}: OK", input.display());
        }

        Commands::Info { input, tol_pt } => {
            let tolerance = tol_pt.unwrap_or(config.validation.tol_pt);
            pdf_qr::check_tolerance(tolerance)?;
            let doc = pdf_qr::load_pdf(&input).await?;
            let page_count = doc.get_pages().len();

            println!("{}: {} pages", input.display(), page_count);
            println!("  Page  MediaBox (pt)        Rotate  Visible (pt)         Paper");
            for page in 1..=page_count {
                let check = pdf_qr::check_page(&doc, page, tolerance, pdf_qr::PaperDimMode::Visible)?;
                let (mw, mh) = check.geometry.mediabox_dimensions();
                let (vw, vh) = check.geometry.visible_dimensions();
                println!(
                    "  {:>4}  {:>8.2} x {:<8.2}  {:>6}  {:>8.2} x {:<8.2}  {}",
                    page,
                    mw,
                    mh,
                    check.geometry.rotation.to_string(),
                    vw,
                    vh,
                    check.classification
                );
            }
        }
    }

    Ok(())
}
