use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use course_studio::{Catalog, Content, EditSession, EditTool, PlaybackSurface, format_timestamp};

#[derive(Parser)]
#[command(name = "course-studio")]
#[command(about = "Upload, edit and publish course media", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest files as drafts and print the catalog
    Ingest {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Publish every accepted draft
        #[arg(long)]
        publish: bool,
    },

    /// Ingest a file, run an editing session on it and print the catalog
    Edit {
        /// File to upload and edit
        file: PathBuf,
        /// Media duration in seconds, when no playback surface reports it
        #[arg(long)]
        duration: Option<f64>,
        /// Seek to this position before applying tools
        #[arg(long)]
        seek: Option<f64>,
        /// Tools to apply in order (cut, audio, text, sticker, effect, subtitle, template)
        #[arg(long = "tool", value_parser = parse_tool)]
        tools: Vec<EditTool>,
        /// Number of undo steps after applying the tools
        #[arg(long, default_value = "0")]
        undo: usize,
        /// Number of draft versions to save
        #[arg(long, default_value = "1")]
        save: u32,
        /// Publish the edited result
        #[arg(long)]
        publish: bool,
        /// Play through GStreamer instead of a detached surface (needs the `gst` feature)
        #[arg(long)]
        gst: bool,
        /// Seconds to follow the GStreamer pipeline before editing
        #[arg(long, default_value = "0")]
        play_for: f64,
    },
}

fn parse_tool(name: &str) -> std::result::Result<EditTool, String> {
    EditTool::parse(name).ok_or_else(|| format!("unknown tool: {}", name))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut catalog = Catalog::new();

    match cli.command {
        Commands::Ingest { files, publish } => cmd_ingest(&mut catalog, &files, publish)?,
        Commands::Edit {
            file,
            duration,
            seek,
            tools,
            undo,
            save,
            publish,
            gst,
            play_for,
        } => {
            let edit = EditArgs {
                duration,
                seek,
                tools,
                undo,
                save,
                publish,
            };
            if gst {
                edit_with_gst(&mut catalog, &file, edit, play_for)?;
            } else {
                cmd_edit(&mut catalog, &file, EditSession::new(), edit, |_| {})?;
            }
        }
    }

    print_catalog(&catalog)
}

struct EditArgs {
    duration: Option<f64>,
    seek: Option<f64>,
    tools: Vec<EditTool>,
    undo: usize,
    save: u32,
    publish: bool,
}

fn read_upload(path: &Path) -> Result<(String, Content)> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("not a file: {}", path.display()))?;
    let bytes = std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    Ok((name, Content::from(bytes)))
}

fn cmd_ingest(catalog: &mut Catalog, files: &[PathBuf], publish: bool) -> Result<()> {
    for path in files {
        let (name, content) = read_upload(path)?;
        match catalog.ingest(&name, content) {
            Ok(draft) if publish => {
                catalog.publish(draft.id())?;
            }
            Ok(_) => {}
            Err(err) => warn!("skipping {}: {}", path.display(), err),
        }
    }
    Ok(())
}

/// `follow` runs while the session is playing and feeds surface events back into it.
fn cmd_edit<S: PlaybackSurface>(
    catalog: &mut Catalog,
    path: &Path,
    mut session: EditSession<S>,
    args: EditArgs,
    follow: impl FnOnce(&mut EditSession<S>),
) -> Result<()> {
    let (name, content) = read_upload(path)?;
    let original = catalog.ingest(&name, content)?;

    session.open(&original);
    if let Some(duration) = args.duration {
        session.on_metadata_loaded(duration);
    }
    if let Err(err) = session.play() {
        warn!("{}", err);
    }
    if let Some(target) = args.seek {
        session.seek(target);
    }
    follow(&mut session);
    for tool in args.tools {
        session.apply_tool(tool);
    }
    for _ in 0..args.undo {
        if let Err(err) = session.undo() {
            warn!("{}", err);
            break;
        }
    }
    session.pause();
    info!(
        at = %format_timestamp(session.playback().current_time),
        duration = %format_timestamp(session.playback().duration),
        edits = session.history().len(),
        "editing finished"
    );

    let mut last = original.clone();
    for _ in 0..args.save {
        let edited = session.export().context("session has no file loaded")?;
        last = catalog.save_as_draft(&original, edited);
    }
    if args.publish {
        let edited = session.export().context("session has no file loaded")?;
        catalog.publish_edited(last.id(), edited)?;
    }
    Ok(())
}

#[cfg(feature = "gst")]
fn edit_with_gst(catalog: &mut Catalog, path: &Path, args: EditArgs, play_for: f64) -> Result<()> {
    use course_studio::renderer::gst_surface::GstSurface;

    let surface = GstSurface::new().context("could not initialize GStreamer")?;
    cmd_edit(catalog, path, EditSession::with_surface(surface), args, |session| {
        follow_pipeline(session, play_for)
    })
}

/// Polls the pipeline until it ends, playback stops or `play_for` seconds pass.
#[cfg(feature = "gst")]
fn follow_pipeline(
    session: &mut EditSession<course_studio::renderer::gst_surface::GstSurface>,
    play_for: f64,
) {
    use std::time::{Duration, Instant};

    let Ok(window) = Duration::try_from_secs_f64(play_for) else {
        warn!(play_for, "ignoring unusable play time");
        return;
    };
    let deadline = Instant::now().checked_add(window);
    while session.playback().is_playing() && deadline.is_none_or(|d| Instant::now() < d) {
        if session.surface().poll_end() {
            session.on_reach_end();
            break;
        }
        if let Some(at) = session.surface().position() {
            session.on_time_advance(at);
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    info!(at = %format_timestamp(session.playback().current_time), "stopped following pipeline");
}

#[cfg(not(feature = "gst"))]
fn edit_with_gst(_catalog: &mut Catalog, _path: &Path, _args: EditArgs, _play_for: f64) -> Result<()> {
    anyhow::bail!("built without the `gst` feature")
}

fn print_catalog(catalog: &Catalog) -> Result<()> {
    let json = catalog
        .snapshot()
        .to_json()
        .context("could not serialize catalog")?;
    println!("{}", json);
    Ok(())
}
