use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::Serialize;

use shimmer::components::{card_placeholder, Stack};
use shimmer::config::{self, Config, ConfigWatcher};
use shimmer::host::{Compositor, FrameClock, Mounted};
use shimmer::{AnimationPhase, GradientEndpoints, LayoutDirection, Shimmering};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_FPS: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
struct Options {
    config_path: PathBuf,
    out_dir: PathBuf,
    rtl: bool,
    frames: Option<u32>,
    fps: u32,
    watch: bool,
    dump: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: config::get_config_path(),
            out_dir: PathBuf::from("shimmer-frames"),
            rtl: false,
            frames: None,
            fps: DEFAULT_FPS,
            watch: false,
            dump: false,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Run(Options),
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for '{}'", flag))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => options.config_path = PathBuf::from(value(arg.as_str())?),
            "-o" | "--out" => options.out_dir = PathBuf::from(value(arg.as_str())?),
            "--rtl" => options.rtl = true,
            "--watch" => options.watch = true,
            "--dump" => options.dump = true,
            "--frames" => {
                let raw = value(arg.as_str())?;
                let frames = raw
                    .parse::<u32>()
                    .map_err(|_| format!("invalid frame count '{}'", raw))?;
                options.frames = Some(frames);
            }
            "--fps" => {
                let raw = value(arg.as_str())?;
                options.fps = match raw.parse::<u32>() {
                    Ok(fps) if fps > 0 => fps,
                    _ => return Err(format!("invalid fps '{}'", raw)),
                };
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    if options.watch && options.dump {
        return Err("--watch and --dump cannot be combined".to_string());
    }

    Ok(Command::Run(options))
}

fn print_help() {
    println!(
        "shimmer-preview {}
Renders a shimmering loading placeholder to PNG frames

USAGE:
    shimmer-preview [OPTIONS]

OPTIONS:
    -h, --help           Print this help message
    -v, --version        Print version information
    -c, --config <PATH>  Config file (default: ~/.config/shimmer/preview.toml)
    -o, --out <DIR>      Output directory (default: ./shimmer-frames)
        --rtl            Force right-to-left layout
        --frames <N>     Number of frames (default: one full cycle)
        --fps <N>        Frames per second (default: {})
        --watch          Keep rendering live.png, reloading the config on change
        --dump           Print per-frame gradient endpoints as JSON

ENVIRONMENT:
    RUST_LOG             Set log level (error, warn, info, debug, trace)

EXAMPLES:
    shimmer-preview                       Render one cycle with default settings
    shimmer-preview --rtl --fps 60        Render a smooth right-to-left cycle
    RUST_LOG=debug shimmer-preview --dump Inspect the animated endpoints",
        VERSION, DEFAULT_FPS
    );
}

/// Endpoint snapshot written by `--dump`.
#[derive(Debug, Serialize)]
struct FrameDump {
    frame: u32,
    time_ms: u128,
    phase: AnimationPhase,
    direction: LayoutDirection,
    endpoints: GradientEndpoints,
}

fn frame_time(index: u32, fps: u32) -> Duration {
    Duration::from_secs(1) * index / fps.max(1)
}

/// Frames needed to cover one full cycle, delay included.
fn frames_for_cycle(config: &Config, fps: u32) -> u32 {
    let frames = (config.cycle_length().as_secs_f64() * fps as f64).ceil() as u32;
    frames.max(1)
}

fn build_compositor(config: &Config, options: &Options) -> Compositor {
    let direction = if options.rtl {
        LayoutDirection::RightToLeft
    } else {
        config.direction()
    };
    Compositor::new(direction)
        .with_content_color(config.content_color())
        .with_background(config.background())
}

fn mount_card(compositor: &Compositor, config: &Config) -> Mounted<Stack> {
    compositor.mount(card_placeholder().shimmering(true, config.shimmer_config()))
}

fn render_frames(config: &Config, options: &Options) -> Result<(), Box<dyn Error>> {
    let compositor = build_compositor(config, options);
    let mut mounted = mount_card(&compositor, config);
    let frames = options
        .frames
        .unwrap_or_else(|| frames_for_cycle(config, options.fps));
    let size = config.size();

    if options.dump {
        let mut dumps = Vec::new();
        for index in 0..frames {
            let now = frame_time(index, options.fps);
            let phase = mounted
                .view()
                .effect()
                .map(|e| e.phase())
                .unwrap_or_default();
            if let Some(endpoints) = compositor.endpoints_at(&mounted, now) {
                dumps.push(FrameDump {
                    frame: index,
                    time_ms: now.as_millis(),
                    phase,
                    direction: compositor.direction(),
                    endpoints,
                });
            }
            compositor.render_frame(&mut mounted, size, now);
        }
        println!("{}", serde_json::to_string_pretty(&dumps)?);
        return Ok(());
    }

    std::fs::create_dir_all(&options.out_dir)?;
    for index in 0..frames {
        let now = frame_time(index, options.fps);
        let frame = compositor.render_flattened(&mut mounted, size, now);
        let path = options.out_dir.join(format!("frame_{:04}.png", index));
        frame.save(&path)?;
        log::debug!("Wrote {:?}", path);
    }
    log::info!("Rendered {} frame(s) to {:?}", frames, options.out_dir);

    Ok(())
}

fn install_stop_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    if let Err(e) = ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    }) {
        log::warn!("Failed to install signal handler: {}", e);
    }
    running
}

fn snapshot(shared: &RwLock<Config>) -> Config {
    shared.read().map(|c| c.clone()).unwrap_or_default()
}

fn watch(config_path: &Path, options: &Options) -> Result<(), Box<dyn Error>> {
    let shared = Arc::new(RwLock::new(config::load_config(config_path)));
    let watcher = ConfigWatcher::new(Arc::clone(&shared), config_path.to_path_buf())?;
    let running = install_stop_handler();

    std::fs::create_dir_all(&options.out_dir)?;
    let live_path = options.out_dir.join("live.png");

    let mut config = snapshot(&shared);
    let mut compositor = build_compositor(&config, options);
    let mut mounted = mount_card(&compositor, &config);
    let mut clock = FrameClock::new(options.fps);

    log::info!("Rendering {:?} live; press Ctrl-C to stop", live_path);
    while running.load(Ordering::SeqCst) {
        if watcher.check_and_reload() {
            // A new config is a new attachment: it starts over from Initial.
            config = snapshot(&shared);
            compositor = build_compositor(&config, options);
            mounted = mount_card(&compositor, &config);
            clock.reset();
        }

        if clock.should_render() {
            let frame = compositor.render_flattened(&mut mounted, config.size(), clock.elapsed());
            frame.save(&live_path)?;
        }

        std::thread::sleep(clock.time_until_next().max(Duration::from_millis(5)));
    }

    log::info!("Stopped after {} frame(s)", mounted.frames_rendered());
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            return;
        }
        Ok(Command::Version) => {
            println!("shimmer-preview {}", VERSION);
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Try 'shimmer-preview --help' for more information.");
            std::process::exit(1);
        }
    };

    // Initialize logging (flush each line for interactive debugging).
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    logger
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {:>5} {}] {}",
                chrono::Utc::now().to_rfc3339(),
                record.level(),
                record.target(),
                record.args()
            )?;
            buf.flush()
        })
        .init();

    log::info!("Starting shimmer-preview v{}", VERSION);

    let result = if options.watch {
        watch(&options.config_path, &options)
    } else {
        let config = config::load_config(&options.config_path);
        render_frames(&config, &options)
    };

    if let Err(err) = result {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
