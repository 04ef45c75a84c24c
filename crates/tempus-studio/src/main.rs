use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tempus_time::logging::{init_logging, LoggingConfig};
use tempus_time::{StopWatch, Timer};

/// Demo loop parameters.
#[derive(Debug, Clone)]
struct StudioConfig {
    /// Number of frames to run.
    frames: u32,
    /// Sleep between frames, standing in for render/present work.
    frame_period: Duration,
    /// Frame at which the simulation pauses.
    pause_at: u32,
    /// Single steps taken while paused.
    steps_while_paused: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            frame_period: Duration::from_millis(16),
            pause_at: 60,
            steps_while_paused: 3,
        }
    }
}

impl StudioConfig {
    /// Applies `tempus-studio [frames]`.
    fn from_args() -> Result<Self> {
        let mut config = Self::default();
        if let Some(arg) = std::env::args().nth(1) {
            config.frames = arg
                .parse()
                .with_context(|| format!("invalid frame count '{arg}'"))?;
            config.pause_at = config.frames / 2;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StudioConfig::from_args()?;
    log::info!("running {} frames, pausing at frame {}", config.frames, config.pause_at);

    let mut timer = Timer::new();
    let mut frame_watch = StopWatch::new();
    let mut worst_frame_ms = 0.0_f64;

    timer.reset();
    for frame in 0..config.frames {
        if frame == config.pause_at {
            timer.stop();
            for _ in 0..config.steps_while_paused {
                timer.advance();
                let v = timer.values();
                log::info!(
                    "paused step: time {:.3}s, dt {:.3}s, wall {:.3}s",
                    v.time,
                    v.elapsed_time,
                    timer.absolute_time()
                );
                thread::sleep(config.frame_period);
            }
            timer.start();
        }

        let v = timer.values();
        frame_watch.measure(|| thread::sleep(config.frame_period));
        worst_frame_ms = worst_frame_ms.max(frame_watch.elapsed_msecs());

        log::debug!(
            "frame {frame}: time {:.4}s, dt {:.4}s, abs {:.4}s",
            v.time,
            v.elapsed_time,
            v.absolute_time
        );
    }

    let mut bench = StopWatch::new();
    let checksum = bench.measure(|| (0..1_000_000u64).fold(0u64, |acc, x| acc.wrapping_add(x * x)));

    log::info!(
        "simulated {:.3}s over {} frames (worst frame {:.2} ms)",
        timer.time(),
        config.frames,
        worst_frame_ms
    );
    log::info!(
        "sum of squares {checksum} took {:.3} ms ({:.6} s)",
        bench.elapsed_msecs(),
        bench.elapsed_secs()
    );

    Ok(())
}
