//! Spread animation.
//!
//! An explicit two-state machine replaces the usual "keep requesting frames
//! until a flag flips" closure: `Idle -> Animating -> Idle`. The host's
//! per-frame render callback drives [`Animation::frame`]; the returned
//! [`FrameOutcome`] tells the host whether to draw interpolated geometry and
//! request another frame, or to do one final redraw after the features have
//! been committed into the overlay.

use crate::feature::OverlayFeature;
use crate::geom::Point;
use crate::map::FrameState;
use crate::overlay::OverlayLayer;
use crate::style::Style;
use tracing::{debug, trace};
use uuid::Uuid;

/// Cubic ease-out: decelerates toward completion.
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// One interpolated draw of a spread feature for the current frame.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    pub position: Point,
    /// Feature style (falling back to the layer style), with any image scale
    /// set to the frame's device pixel ratio. The stored style is untouched.
    pub style: Option<Style>,
}

#[derive(Debug)]
pub enum FrameOutcome {
    /// No animation in progress.
    Idle,
    /// Draw these and request another frame.
    Animating { commands: Vec<DrawCommand> },
    /// Pending features were committed into the overlay; redraw once.
    Committed,
}

#[derive(Debug)]
pub struct SpreadAnimation {
    center: Point,
    /// Features held back from the overlay until the animation completes.
    features: Vec<OverlayFeature>,
    /// Set on the first frame; the library never reads a clock of its own.
    start_ms: Option<f64>,
    duration_ms: f64,
    ghost: Uuid,
}

#[derive(Debug, Default)]
pub enum Animation {
    #[default]
    Idle,
    Animating(SpreadAnimation),
}

impl Animation {
    pub fn is_animating(&self) -> bool {
        matches!(self, Animation::Animating(_))
    }

    /// Begins a spread animation, cancelling any in-flight one first so a
    /// single animation ever runs. A ghost feature at the view center forces
    /// the host to schedule the first render tick.
    pub fn start(
        &mut self,
        overlay: &mut OverlayLayer,
        view_center: Point,
        center: Point,
        features: Vec<OverlayFeature>,
        duration_ms: f64,
    ) {
        self.cancel(overlay);
        if features.is_empty() {
            return;
        }
        let ghost = overlay.add_ghost(view_center);
        debug!(features = features.len(), duration_ms, "animation started");
        *self = Animation::Animating(SpreadAnimation {
            center,
            features,
            start_ms: None,
            duration_ms,
            ghost,
        });
    }

    /// Drops any pending features and returns to `Idle`.
    pub fn cancel(&mut self, overlay: &mut OverlayLayer) {
        if let Animation::Animating(anim) = std::mem::replace(self, Animation::Idle) {
            overlay.remove(anim.ghost);
            debug!("animation cancelled");
        }
    }

    /// Advances the animation to `frame`.
    ///
    /// While the eased fraction is at most 1.0, returns interpolated draw
    /// commands for the spread features. Once it exceeds 1.0, commits all
    /// pending features into the overlay and transitions back to `Idle`.
    pub fn frame(&mut self, overlay: &mut OverlayLayer, frame: FrameState) -> FrameOutcome {
        let eased = match self {
            Animation::Idle => return FrameOutcome::Idle,
            Animation::Animating(anim) => {
                let start = *anim.start_ms.get_or_insert(frame.time_ms);
                ease_out((frame.time_ms - start) / anim.duration_ms)
            }
        };

        if eased > 1.0 || eased.is_nan() {
            if let Animation::Animating(anim) = std::mem::replace(self, Animation::Idle) {
                overlay.remove(anim.ghost);
                overlay.add_features(anim.features);
                debug!("animation committed");
            }
            return FrameOutcome::Committed;
        }

        let Animation::Animating(anim) = self else {
            return FrameOutcome::Idle;
        };
        let commands = anim
            .features
            .iter()
            .filter_map(|feature| feature.as_spread())
            .map(|spread| DrawCommand {
                position: anim.center.lerp(spread.target, eased),
                style: spread
                    .style
                    .as_ref()
                    .or(overlay.style.as_ref())
                    .map(|style| style.for_pixel_ratio(frame.pixel_ratio)),
            })
            .collect();
        trace!(eased, "animation frame");
        FrameOutcome::Animating { commands }
    }
}
