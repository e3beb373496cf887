use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;

use sentry_response::config::ResponderConfig;
use sentry_response::detect::{confidence_percent, DetectionSource, StubSource};
use sentry_response::overlay::DisplayTransform;
use sentry_response::pipeline::DetectionPipeline;
use sentry_response::response::QueueSink;

const SPEECH_QUEUE_CAPACITY: usize = 8;

/// Detection response daemon, driven by the stub vision source.
#[derive(Parser, Debug)]
#[command(name = "sentryd")]
struct Args {
    /// Frames per second to poll the source at (overrides config).
    #[arg(long, env = "SENTRY_FPS")]
    fps: Option<u32>,

    /// Number of frames to process before exiting (0 = run until Ctrl-C).
    #[arg(long, default_value_t = 0)]
    frames: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = ResponderConfig::load()?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    let transform = DisplayTransform::letterbox(
        cfg.source.width as f32,
        cfg.source.height as f32,
        cfg.view.width as f32,
        cfg.view.height as f32,
    );
    let mut source = StubSource::new(cfg.source.label.clone(), cfg.source.min_confidence);
    let mut pipeline = DetectionPipeline::new(cfg.trigger.clone(), QueueSink::new(SPEECH_QUEUE_CAPACITY));

    let fps = args.fps.unwrap_or(cfg.source.target_fps).max(1);
    let frame_interval = Duration::from_millis(1000 / u64::from(fps));

    log::info!(
        "sentryd starting: source {} {}x{} at {} fps, view {}x{}, response {}",
        source.name(),
        cfg.source.width,
        cfg.source.height,
        fps,
        cfg.view.width,
        cfg.view.height,
        cfg.trigger.response.as_str(),
    );

    let mut processed = 0u64;
    while running.load(Ordering::SeqCst) {
        if let Some(detection) = source.next_detection()? {
            let outcome = pipeline.handle(&detection, &transform, Instant::now());
            if let Some(rect) = outcome.overlay {
                log::info!(
                    "overlay {} {}% at ({:.1},{:.1})-({:.1},{:.1})",
                    detection.label,
                    confidence_percent(detection.confidence),
                    rect.left,
                    rect.top,
                    rect.right,
                    rect.bottom,
                );
            }
        }

        // Stand-in for the platform audio runtime: pull queued utterances.
        for spoken in pipeline.sink_mut().drain() {
            log::debug!("played ({:?}): {}", spoken.locale, spoken.message);
        }

        processed += 1;
        if args.frames > 0 && processed >= args.frames {
            break;
        }
        std::thread::sleep(frame_interval);
    }

    log::info!("sentryd stopped after {} frames", processed);
    Ok(())
}
