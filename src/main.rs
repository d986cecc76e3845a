//! Headless album driver.
//!
//! Loads the album, uploads any files given on the command line, and prints
//! the resulting book to stdout.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::time::Duration;

    use clap::Parser;
    use web_time::Instant;

    use flipalbum::AlbumApp;
    use flipalbum::cache::{FileStorage, LocalCache};
    use flipalbum::config::{AppConfig, LogLevel};
    use flipalbum::layout::Viewport;
    use flipalbum::logging;
    use flipalbum::render::{ConsoleFactory, ConsoleView, Flipbook, RenderScheduler};
    use flipalbum::transport::CloudinaryTransport;
    use flipalbum::upload::{BatchReport, SelectedFile, UploadError, UploadObserver};

    /// Longest we wait for a rebuild to finish.
    const SETTLE_TIMEOUT: Duration = Duration::from_secs(10);
    /// Poll interval when no timer is pending.
    const FRAME: Duration = Duration::from_millis(16);

    type ConsoleApp = AlbumApp<CloudinaryTransport, FileStorage, ConsoleFactory, ConsoleView>;

    #[derive(Parser, Debug)]
    #[command(name = "flipalbum", version, about = "Shared photo album as a flip-book")]
    struct Args {
        /// Images to upload as one batch
        files: Vec<PathBuf>,

        /// Choose images with the system file picker
        #[arg(long)]
        pick: bool,

        /// Viewport used for page layout, as WIDTHxHEIGHT
        #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
        viewport: Viewport,

        /// Config file (defaults to the platform config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the album cache
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Log level: error, warn, info, debug or trace
        #[arg(long)]
        log_level: Option<String>,

        /// Pages to turn after the book opens
        #[arg(long, default_value_t = 0)]
        flip: usize,
    }

    fn parse_viewport(s: &str) -> Result<Viewport, String> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width: f32 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
        let height: f32 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
        if width <= 0.0 || height <= 0.0 {
            return Err("viewport must be positive".to_string());
        }
        Ok(Viewport::new(width, height))
    }

    /// Prints batch progress to stderr.
    struct ConsoleObserver;

    impl UploadObserver for ConsoleObserver {
        fn file_started(&mut self, _index: usize, _total: usize, status: &str) {
            eprintln!("{status}");
        }

        fn progress(&mut self, percent: f32) {
            eprintln!("  {percent:.0}%");
        }

        fn file_failed(&mut self, name: &str, error: &UploadError) {
            eprintln!("Error: {name}: {error}");
        }

        fn batch_finished(&mut self, report: &BatchReport) {
            eprintln!(
                "Uploaded {} of {} file(s)",
                report.uploaded.len(),
                report.total
            );
        }
    }

    fn load_config(path: Option<&PathBuf>) -> Result<AppConfig, String> {
        match path {
            Some(path) => AppConfig::load_from_path(path)
                .map_err(|e| format!("Failed to load config {}: {}", path.display(), e)),
            None => Ok(AppConfig::load_from_default_path().unwrap_or_default()),
        }
    }

    /// Tick until no rebuild or reload is outstanding.
    fn settle(app: &mut ConsoleApp) {
        let started = Instant::now();
        while app.is_busy() {
            let now = Instant::now();
            if now.duration_since(started) > SETTLE_TIMEOUT {
                log::warn!("Gave up waiting for the book to render");
                return;
            }
            app.tick(now);

            let wait = app
                .next_deadline()
                .map(|at| at.saturating_duration_since(Instant::now()))
                .unwrap_or(FRAME)
                .min(FRAME);
            std::thread::sleep(wait);
        }
    }

    fn collect_files(args: &Args) -> Vec<SelectedFile> {
        let mut paths = args.files.clone();
        if args.pick {
            let picked = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
                .pick_files();
            paths.extend(picked.unwrap_or_default());
        }

        paths
            .iter()
            .filter_map(|path| match SelectedFile::from_path(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!("Error: {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }

    /// Print the book, marking the page currently open.
    fn print_book(app: &ConsoleApp) {
        if app.scheduler().view().is_empty_state() {
            println!("No photos yet");
            return;
        }
        let Some(book) = app.scheduler().book() else {
            println!("Book not rendered");
            return;
        };

        let settings = book.settings();
        println!(
            "{} pages at {}x{}",
            book.page_count(),
            settings.width,
            settings.height
        );
        for (index, line) in book.lines().iter().enumerate() {
            let marker = if index == book.current_page() { '>' } else { ' ' };
            println!("{marker}{line}");
        }
    }

    pub fn run() -> ExitCode {
        let args = Args::parse();

        let config = match load_config(args.config.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        };

        let level = args
            .log_level
            .as_deref()
            .and_then(LogLevel::from_name)
            .unwrap_or(config.preferences.log_level);
        logging::init(level);
        log::info!("Starting {}", config.app_name);

        let cache_dir = args
            .cache_dir
            .clone()
            .or_else(FileStorage::default_dir)
            .unwrap_or_else(|| PathBuf::from(".flipalbum-cache"));

        let mut app: ConsoleApp = AlbumApp::new(
            CloudinaryTransport::new(config.cloud.clone()),
            LocalCache::new(FileStorage::new(cache_dir), config.cache.key.clone()),
            RenderScheduler::new(ConsoleFactory::new(), ConsoleView::new()),
            args.viewport,
        );

        app.load_photos(Instant::now());
        settle(&mut app);

        let files = collect_files(&args);
        let mut failed = false;
        if !files.is_empty() {
            let report = app.upload_files(Instant::now(), &files, &mut ConsoleObserver);
            failed = !report.failures.is_empty();
            settle(&mut app);
        }

        for _ in 0..args.flip {
            app.flip_next();
        }

        print_book(&app);
        let indicator = app.scheduler().page_indicator();
        if indicator.is_visible() && !indicator.text().is_empty() {
            println!("{}", indicator.text());
        }

        if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

// The browser build has no CLI; the library is driven by the host page.
#[cfg(target_arch = "wasm32")]
fn main() {}
