use std::time::Instant;

use rand::Rng;
use tracing::info;

/// Sampled frame profiler.
///
/// - logs a begin/end wrapper for the frame
/// - logs total frame time and each span's time
/// - supports sequential spans (`span()` ends the previous span)
///
/// Frames that are not sampled cost one random draw and nothing else.
pub struct FrameStopwatch {
    started: Option<Instant>,
    span: Option<(String, Instant)>,
    name: String,
    should_sample: bool,
}

impl FrameStopwatch {
    /// Creates a new `FrameStopwatch` that conditionally logs timing information.
    ///
    /// Sampling:
    /// - If `force` is true, always logs.
    /// - Otherwise logs with probability `sample_rate` in [0, 1].
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        name: impl Into<String>,
        force: bool,
        sample_rate: f32,
    ) -> Self {
        let name = name.into();
        let should_sample =
            force || (sample_rate > 0.0 && rng.gen_bool(f64::from(sample_rate.min(1.0))));

        if should_sample {
            info!("--------- {name} begin ---------");
        }

        Self {
            started: should_sample.then(Instant::now),
            span: None,
            name,
            should_sample,
        }
    }

    /// Starts a new span within the frame, ending any previous span.
    pub fn span(&mut self, section_name: &str) {
        if !self.should_sample {
            return;
        }

        self.end_span();
        self.span = Some((section_name.to_owned(), Instant::now()));
    }

    /// Ends the current span, if any.
    pub fn end_span(&mut self) {
        if let Some((section, started)) = self.span.take() {
            info!("{section}: {:?}", started.elapsed());
        }
    }

    /// Whether this frame is being sampled.
    pub fn should_sample(&self) -> bool {
        self.should_sample
    }
}

impl Drop for FrameStopwatch {
    fn drop(&mut self) {
        if !self.should_sample {
            return;
        }

        self.end_span();

        if let Some(started) = self.started.take() {
            info!("frame_time: {:?}", started.elapsed());
        }

        info!("---------- {} end ----------", self.name);
    }
}
