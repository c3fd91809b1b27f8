mod cli;
mod clock;
mod clock_task;
mod config;
mod error;
mod fit;
mod font;
mod frame;
mod konst;
mod logging;
mod render;
mod sink;
mod systemd;

use crate::clock::TimeSource;
use crate::clock_task::FailurePolicy;
use crate::clock_task::RefreshScheduler;
use crate::clock_task::RefreshSettings;
use crate::sink::DisplaySink;

// Single threaded: `time` only resolves the local UTC offset while the
// process has one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    setup_panic();
    color_eyre::install().map_err(crate::error::Error::InstallingColorEyre)?;
    let cli = <crate::cli::Cli as clap::Parser>::parse();
    crate::logging::setup(cli.verbosity);
    let cfg = crate::config::Config::load(cli.config.as_deref(), cli.font).await?;

    match cli.command {
        cli::Command::Run { strict } => {
            let canvas = cfg.display.canvas()?;
            let sink = crate::sink::oled::Ssd1306Sink::open(&cfg.display.i2c_device, canvas)?;
            let failure_policy = if strict {
                FailurePolicy::Abort
            } else {
                FailurePolicy::SkipFrame
            };
            run(sink, &cfg, failure_policy).await?;
        }
        cli::Command::Preview => {
            let sink = crate::sink::terminal::TerminalSink::stdout(cfg.display.canvas()?);
            run(sink, &cfg, FailurePolicy::SkipFrame).await?;
        }
        cli::Command::RenderOnce => {
            render_once(&cfg)?;
        }
        cli::Command::VerifyConfig => {
            verify_font(&cfg)?;
            tracing::info!(font = %cfg.font_spec(), "Configuration verified");
        }
    }

    Ok(())
}

fn setup_panic() {
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
}

async fn run<S>(
    sink: S,
    config: &crate::config::Config,
    failure_policy: FailurePolicy,
) -> Result<(), crate::error::Error>
where
    S: DisplaySink,
{
    let process_state = crate::systemd::ProcessState {
        span: tracing::info_span!("service"),
    };

    let settings = RefreshSettings {
        failure_policy,
        ..RefreshSettings::default()
    };
    let renderer = crate::render::FrameRenderer::new(config.font_spec());
    let handle = RefreshScheduler::new(sink, crate::clock::LocalTime, renderer, settings).start();
    process_state.set_running();

    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .map_err(crate::error::Error::Signal)?;

    tokio::select! {
        ctrl_c = tokio::signal::ctrl_c() => {
            ctrl_c.map_err(crate::error::Error::Signal)?;
            tracing::info!("Ctrl-C received, shutting down");
        }
        _ = terminate.recv() => {
            tracing::info!("SIGTERM received, shutting down");
        }
        _ = handle.finished() => {
            tracing::warn!("Refresh loop ended on its own");
        }
    }

    process_state.set_stopping();
    handle.stop();

    match handle.join().await {
        Ok(summary) => {
            tracing::info!(
                frames_delivered = summary.frames_delivered,
                failed_cycles = summary.failed_cycles,
                "Shut down"
            );
            Ok(())
        }
        Err(error) => {
            process_state.set_failed();
            Err(error)
        }
    }
}

fn render_once(config: &crate::config::Config) -> Result<(), crate::error::Error> {
    let now = crate::clock::LocalTime.now()?;
    let time_str = crate::clock::format_time(&now)?;
    let frame = crate::render::FrameRenderer::new(config.font_spec())
        .render(config.display.canvas()?, &time_str)?;

    let mut sink = crate::sink::terminal::TerminalSink::stdout(frame.canvas());
    sink.push(&frame)?;
    Ok(())
}

/// Opens the configured font, if any, and checks the time fits the display.
fn verify_font(config: &crate::config::Config) -> Result<(), crate::error::Error> {
    let crate::font::FontSpec::Scalable(path) = config.font_spec() else {
        return Ok(());
    };

    let face = crate::font::FontFace::open(&path)?;
    let size = crate::fit::fit(
        config.display.canvas()?,
        "12:00 PM",
        &face,
        crate::fit::FitSettings::default(),
    )
    .map_err(crate::error::RenderError::from)?;

    tracing::info!(%path, size, "Font fits display");
    Ok(())
}
