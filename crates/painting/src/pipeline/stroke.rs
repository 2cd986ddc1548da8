//! Pointer handling, capture and redraw for the painting pipeline

use glam::Vec2;
use gouache_ipc::{PointerEvent, PointerPhase, UiHit, UiPage};
use tracing::{debug, info};

use crate::brush::{BrushSpec, ReplayPolicy};
use crate::color::Color;
use crate::geometry::synthesize;
use crate::input::{GestureKind, PointerSample, classify_gesture};

use super::PaintingPipeline;

/// What an input event did
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The event was malformed and skipped
    Ignored,
    /// The event landed on an overlay region and never reached the canvas
    Ui(UiHit),
    /// The event updated pointer state and ran a redraw pass
    Canvas,
}

impl PaintingPipeline {
    /// Apply one pointer event, then run exactly one redraw pass.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> EventOutcome {
        let (x, y) = self.config.display.to_content(event.x, event.y);
        let position = Vec2::new(x, y);
        if !position.is_finite() {
            debug!("handle_pointer: non-finite position, skipping frame");
            return EventOutcome::Ignored;
        }

        self.session.observe(event.device, event.phase);

        // Presses, and anything outside a canvas gesture, go to the overlay first
        if event.phase == PointerPhase::Press || !self.gesture_active {
            if let Some(region) = self.regions.hit(position) {
                debug!("handle_pointer: {:?} hit {:?}", event.phase, region);
                return EventOutcome::Ui(UiHit { region, x, y });
            }
        }

        let was_down = self.pointer.down;
        let sample = self.pointer.apply(event, position, self.session.tracks_hover());

        match event.phase {
            PointerPhase::Press => self.begin_gesture(sample),
            PointerPhase::Move if was_down => self.capture(sample),
            PointerPhase::Release if was_down => {
                self.capture(sample);
                self.end_gesture(event.timestamp_ms);
            }
            PointerPhase::Cancel if was_down => self.end_gesture(event.timestamp_ms),
            _ => {}
        }

        self.redraw();
        EventOutcome::Canvas
    }

    fn begin_gesture(&mut self, sample: PointerSample) {
        self.gesture_active = true;
        self.suppress_tap = false;

        if self.eyedropper {
            self.pick_color(sample.position);
            return;
        }
        if self.edit_mode {
            self.last_edit_position = Some(sample.position);
            return;
        }

        self.commit();
        self.recording.clear();
        self.drawn = 0;
        self.committed = false;
        self.capturing = true;
        self.recording.push(sample);
        debug!("begin_gesture at ({:.1}, {:.1})", sample.position.x, sample.position.y);
    }

    fn capture(&mut self, sample: PointerSample) {
        if self.eyedropper {
            self.pick_color(sample.position);
        } else if self.capturing && !self.edit_mode {
            self.recording.push(sample);
        }
    }

    fn end_gesture(&mut self, timestamp_ms: f64) {
        self.gesture_active = false;
        self.capturing = false;

        if self.eyedropper {
            self.eyedropper = false;
            info!("Eyedropper picked {}", self.brush.color.to_hex());
            return;
        }
        if self.edit_mode {
            self.last_edit_position = None;
            return;
        }
        if std::mem::take(&mut self.suppress_tap) {
            return;
        }

        let duration = self.pointer.elapsed_ms(timestamp_ms);
        let travel = self.pointer.travel();
        let kind = classify_gesture(duration, travel, &self.config.gesture);
        debug!(
            "end_gesture: {:.0}ms, {:.1}px travel -> {:?}",
            duration, travel, kind
        );

        match kind {
            GestureKind::Tap => {
                self.undo();
                self.show_page(UiPage::QuickTools);
            }
            GestureKind::Draw => {
                if self.page != UiPage::Draw {
                    self.show_page(UiPage::Draw);
                }
            }
        }
    }

    /// Run one redraw pass.
    ///
    /// In edit mode with the pointer down, the recording follows the pointer
    /// and is replayed in full. Otherwise samples added since the last pass
    /// are drawn according to the tool's replay policy.
    pub fn redraw(&mut self) {
        let spec = self.brush;

        if self.edit_mode && self.pointer.down {
            let Some(current) = self.pointer.position() else {
                return;
            };
            let delta = match self.last_edit_position.replace(current) {
                Some(last) => current - last,
                None => Vec2::ZERO,
            };
            if delta != Vec2::ZERO {
                self.recording.translate(delta);
                self.replay_with(&spec);
            }
            return;
        }

        self.draw_pending(&spec);
    }

    /// Regenerate the active surface from the recording.
    ///
    /// Only the active surface changes, and repeating a replay without
    /// changing the recording or brush gives identical pixels.
    pub fn replay(&mut self) {
        let spec = self.brush;
        self.replay_with(&spec);
    }

    fn replay_with(&mut self, spec: &BrushSpec) {
        self.compositor.clear_active();
        self.drawn = 0;
        self.draw_pending(spec);
    }

    fn draw_pending(&mut self, spec: &BrushSpec) {
        let total = self.recording.len();
        if self.drawn >= total {
            return;
        }

        let shapes = match spec.replay_policy() {
            ReplayPolicy::Accumulate => synthesize(spec, self.recording.samples(), self.drawn),
            ReplayPolicy::Redraw => {
                self.compositor.clear_active();
                synthesize(spec, self.recording.samples(), 0)
            }
        };
        self.compositor.draw_active(&shapes);
        self.drawn = total;
    }

    /// Toggle stroke-editing mode.
    ///
    /// Editing can only start while a recording exists. Leaving it in the
    /// middle of a drag longer than the quick-tap radius skips tap
    /// disambiguation on the following release.
    pub fn toggle_edit(&mut self) {
        if self.edit_mode {
            self.edit_mode = false;
            self.last_edit_position = None;
            if self.pointer.down && self.pointer.travel() > self.config.gesture.quick_tap_travel {
                self.suppress_tap = true;
            }
            info!("Edit mode off");
        } else if !self.recording.is_empty() {
            self.edit_mode = true;
            self.capturing = false;
            self.last_edit_position = if self.pointer.down {
                self.pointer.position()
            } else {
                None
            };
            info!("Edit mode on ({} samples)", self.recording.len());
        } else {
            debug!("toggle_edit: no recording to edit");
        }
    }

    /// Set the brush color from the painting surface at `position`
    fn pick_color(&mut self, position: Vec2) {
        if let Some(picked) = self.sample_color(position.x, position.y) {
            self.brush.color = picked.with_alpha(self.brush.color.a);
        }
    }

    /// Color of the painting surface at a content-area position.
    ///
    /// Near-gray pixels keep the current brush hue.
    pub fn sample_color(&self, x: f32, y: f32) -> Option<Color> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let [r, g, b, _] = self.compositor.sample(x as u32, y as u32)?;
        Some(Color::from_srgb8([r, g, b], self.brush.color.h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gouache_config::{GouacheConfig, UiLayout};
    use gouache_ipc::{DeviceClass, PaintCommand, Tool, UiRegion};

    use crate::export::MemorySink;

    fn pipeline() -> PaintingPipeline {
        let mut config = GouacheConfig::default();
        config.display.width = 320;
        config.display.height = 240;
        config.layout = UiLayout {
            top_strip_height: 20.0,
            side_column_width: 30.0,
        };
        PaintingPipeline::new(config).unwrap()
    }

    fn pen(phase: PointerPhase, x: f32, y: f32, t: f64) -> PointerEvent {
        PointerEvent::new(phase, DeviceClass::Pen, x, y, t).with_pressure(0.5)
    }

    fn drag(pipeline: &mut PaintingPipeline, points: &[(f32, f32)], start_ms: f64, step_ms: f64) {
        let last = points.len() - 1;
        for (i, &(x, y)) in points.iter().enumerate() {
            let phase = match i {
                0 => PointerPhase::Press,
                i if i == last => PointerPhase::Release,
                _ => PointerPhase::Move,
            };
            pipeline.handle_pointer(&pen(phase, x, y, start_ms + i as f64 * step_ms));
        }
    }

    fn active_bytes(pipeline: &PaintingPipeline) -> Vec<u8> {
        pipeline.compositor().active().surface().as_bytes().to_vec()
    }

    #[test]
    fn test_end_to_end_draw_then_commit() {
        let mut pipeline = pipeline();
        pipeline.handle_pointer(&pen(PointerPhase::Press, 100.0, 100.0, 0.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 150.0, 100.0, 100.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 200.0, 100.0, 200.0));
        pipeline.handle_pointer(&pen(PointerPhase::Release, 200.0, 100.0, 300.0));

        // Classified as a draw: stroke kept, page unchanged
        assert_eq!(pipeline.page(), UiPage::Draw);
        assert_eq!(pipeline.recording().len(), 4);
        let active = pipeline.compositor().active().surface();
        assert!(active.get_pixel(150, 100).unwrap()[3] > 0);
        assert_eq!(active.get_pixel(150, 160).unwrap()[3], 0);

        pipeline.commit();
        assert!(pipeline.compositor().active().surface().is_blank());
        assert_ne!(pipeline.compositor().sample(150, 100), Some([255, 255, 255, 255]));
        assert_eq!(pipeline.compositor().sample(150, 160), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_quick_tap_undoes_and_opens_quick_tools() {
        let mut pipeline = pipeline();
        drag(&mut pipeline, &[(100.0, 100.0), (103.0, 100.0), (105.0, 100.0)], 0.0, 50.0);

        assert_eq!(pipeline.page(), UiPage::QuickTools);
        assert!(pipeline.recording().is_empty());
        assert!(pipeline.compositor().active().surface().is_blank());
    }

    #[test]
    fn test_draw_returns_to_draw_page() {
        let mut pipeline = pipeline();
        pipeline.show_page(UiPage::Color);
        drag(&mut pipeline, &[(100.0, 100.0), (150.0, 120.0), (200.0, 140.0)], 0.0, 150.0);
        assert_eq!(pipeline.page(), UiPage::Draw);
        assert_eq!(pipeline.previous_page(), UiPage::Color);
    }

    #[test]
    fn test_new_gesture_commits_previous_stroke() {
        let mut pipeline = pipeline();
        drag(&mut pipeline, &[(100.0, 100.0), (150.0, 100.0), (200.0, 100.0)], 0.0, 150.0);
        pipeline.handle_pointer(&pen(PointerPhase::Press, 100.0, 200.0, 1_000.0));

        assert_ne!(pipeline.compositor().sample(150, 100), Some([255, 255, 255, 255]));
        assert_eq!(pipeline.recording().len(), 1);
    }

    #[test]
    fn test_press_in_ui_region_never_draws() {
        let mut pipeline = pipeline();
        let outcome = pipeline.handle_pointer(&pen(PointerPhase::Press, 150.0, 10.0, 0.0));
        assert_eq!(
            outcome,
            EventOutcome::Ui(UiHit {
                region: UiRegion::TopStrip,
                x: 150.0,
                y: 10.0
            })
        );
        assert!(!pipeline.pointer().down);
        assert!(pipeline.recording().is_empty());

        // Moving while no gesture is active stays with the overlay
        let outcome = pipeline.handle_pointer(&pen(PointerPhase::Move, 10.0, 100.0, 5.0));
        assert!(matches!(outcome, EventOutcome::Ui(_)));
    }

    #[test]
    fn test_gesture_may_cross_into_ui_region() {
        let mut pipeline = pipeline();
        pipeline.handle_pointer(&pen(PointerPhase::Press, 100.0, 100.0, 0.0));
        let outcome = pipeline.handle_pointer(&pen(PointerPhase::Move, 100.0, 10.0, 10.0));
        assert_eq!(outcome, EventOutcome::Canvas);
        assert_eq!(pipeline.recording().len(), 2);
    }

    #[test]
    fn test_origin_offset_applied() {
        let mut config = GouacheConfig::default();
        config.display.width = 200;
        config.display.height = 200;
        config.display.origin_x = 50.0;
        config.display.origin_y = 40.0;
        let mut pipeline = PaintingPipeline::new(config).unwrap();
        pipeline.handle_pointer(&pen(PointerPhase::Press, 150.0, 140.0, 0.0));
        assert_eq!(pipeline.recording().origin(), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_non_finite_event_is_ignored() {
        let mut pipeline = pipeline();
        let outcome = pipeline.handle_pointer(&pen(PointerPhase::Press, f32::NAN, 10.0, 0.0));
        assert_eq!(outcome, EventOutcome::Ignored);
        assert!(pipeline.pointer().current.is_none());
    }

    #[test]
    fn test_cancel_ends_without_commit() {
        let mut pipeline = pipeline();
        pipeline.handle_pointer(&pen(PointerPhase::Press, 100.0, 100.0, 0.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 200.0, 100.0, 300.0));
        pipeline.handle_pointer(&pen(PointerPhase::Cancel, 200.0, 100.0, 400.0));

        assert!(!pipeline.pointer().down);
        assert_eq!(pipeline.recording().len(), 2);
        assert!(!pipeline.compositor().active().surface().is_blank());
        assert_eq!(pipeline.compositor().sample(150, 100), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_cancelled_tap_is_disambiguated() {
        let mut pipeline = pipeline();
        pipeline.handle_pointer(&pen(PointerPhase::Press, 100.0, 100.0, 0.0));
        pipeline.handle_pointer(&pen(PointerPhase::Cancel, 101.0, 100.0, 20.0));
        assert_eq!(pipeline.page(), UiPage::QuickTools);
        assert!(pipeline.recording().is_empty());
    }

    #[test]
    fn test_replay_is_idempotent() {
        let mut pipeline = pipeline();
        drag(&mut pipeline, &[(100.0, 100.0), (140.0, 130.0), (190.0, 120.0), (230.0, 160.0)], 0.0, 100.0);
        let live = active_bytes(&pipeline);

        pipeline.replay();
        let first = active_bytes(&pipeline);
        pipeline.replay();
        assert_eq!(first, active_bytes(&pipeline));
        assert_eq!(first, live);
    }

    #[test]
    fn test_replay_translation_invariance() {
        // Keep every coordinate inside one f32 binade so shifts are exact
        let points = [(150.0, 150.0), (170.5, 160.25), (195.75, 171.5), (215.0, 190.0)];
        let delta = (9.0, 7.0);

        for tool in [Tool::Brush, Tool::Stamp] {
            let mut base = pipeline();
            base.brush.tool = tool;
            base.brush.size = 4.0;
            drag(&mut base, &points, 0.0, 100.0);
            base.replay();

            let mut moved = pipeline();
            moved.brush.tool = tool;
            moved.brush.size = 4.0;
            let shifted: Vec<(f32, f32)> = points.iter().map(|&(x, y)| (x + delta.0, y + delta.1)).collect();
            drag(&mut moved, &shifted, 0.0, 100.0);
            moved.replay();

            let a = base.compositor().active().surface();
            let b = moved.compositor().active().surface();
            for y in 130..210 {
                for x in 130..230 {
                    assert_eq!(
                        a.get_pixel(x, y),
                        b.get_pixel(x + delta.0 as u32, y + delta.1 as u32),
                        "{:?} differs at ({}, {})",
                        tool,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_edit_mode_translates_recording() {
        let mut pipeline = pipeline();
        drag(&mut pipeline, &[(100.0, 100.0), (150.0, 100.0), (200.0, 100.0)], 0.0, 150.0);
        pipeline.toggle_edit();
        assert!(pipeline.is_editing());

        pipeline.handle_pointer(&pen(PointerPhase::Press, 250.0, 150.0, 1_000.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 260.0, 170.0, 1_050.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 270.0, 190.0, 1_100.0));
        pipeline.handle_pointer(&pen(PointerPhase::Release, 270.0, 190.0, 1_150.0));

        // Moved by (20, 40) without adding samples or committing
        assert_eq!(pipeline.recording().len(), 3);
        assert_eq!(pipeline.recording().origin(), Some(Vec2::new(120.0, 140.0)));
        let active = pipeline.compositor().active().surface();
        assert!(active.get_pixel(170, 140).unwrap()[3] > 0);
        assert_eq!(active.get_pixel(170, 100).unwrap()[3], 0);
        assert_eq!(pipeline.compositor().sample(150, 100), Some([255, 255, 255, 255]));
        // Releases in edit mode never count as taps
        assert_eq!(pipeline.page(), UiPage::Draw);
    }

    #[test]
    fn test_edit_requires_recording() {
        let mut pipeline = pipeline();
        pipeline.toggle_edit();
        assert!(!pipeline.is_editing());
    }

    #[test]
    fn test_leaving_edit_mid_drag_skips_tap() {
        let mut pipeline = pipeline();
        drag(&mut pipeline, &[(100.0, 100.0), (150.0, 100.0), (200.0, 100.0)], 0.0, 150.0);
        pipeline.toggle_edit();

        pipeline.handle_pointer(&pen(PointerPhase::Press, 200.0, 150.0, 1_000.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 230.0, 150.0, 1_020.0));
        pipeline.toggle_edit();
        pipeline.handle_pointer(&pen(PointerPhase::Release, 230.0, 150.0, 1_040.0));

        assert!(!pipeline.is_editing());
        assert!(!pipeline.recording().is_empty());
        assert_eq!(pipeline.page(), UiPage::Draw);
    }

    #[test]
    fn test_line_redraws_when_stroke_shrinks() {
        let mut pipeline = pipeline();
        pipeline.brush.tool = Tool::Line;
        pipeline.handle_pointer(&pen(PointerPhase::Press, 100.0, 100.0, 0.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 250.0, 100.0, 150.0));
        pipeline.handle_pointer(&pen(PointerPhase::Move, 150.0, 100.0, 300.0));

        // Only the current first-to-last segment is left on the active surface
        let active = pipeline.compositor().active().surface();
        assert_eq!(active.get_pixel(200, 100).unwrap()[3], 0);
        assert!(active.get_pixel(120, 100).unwrap()[3] > 0);

        pipeline.handle_pointer(&pen(PointerPhase::Release, 150.0, 100.0, 450.0));
        assert_eq!(pipeline.page(), UiPage::Draw);
        assert!(pipeline.compositor().active().surface().get_pixel(120, 100).unwrap()[3] > 0);
    }

    #[test]
    fn test_drawing_resumes_after_undo_in_edit_mode() {
        let mut pipeline = pipeline();
        drag(&mut pipeline, &[(100.0, 100.0), (150.0, 100.0), (200.0, 100.0)], 0.0, 150.0);
        pipeline.toggle_edit();
        pipeline.undo();
        assert!(!pipeline.is_editing());

        drag(&mut pipeline, &[(100.0, 150.0), (150.0, 150.0), (200.0, 150.0)], 1_000.0, 150.0);
        assert_eq!(pipeline.recording().len(), 3);
        assert!(pipeline.compositor().active().surface().get_pixel(150, 150).unwrap()[3] > 0);
    }

    #[test]
    fn test_drawing_resumes_after_clear_in_edit_mode() {
        let mut pipeline = pipeline();
        let mut sink = MemorySink::default();
        drag(&mut pipeline, &[(100.0, 100.0), (150.0, 100.0), (200.0, 100.0)], 0.0, 150.0);
        pipeline.toggle_edit();
        pipeline.apply_command(PaintCommand::Clear, &mut sink).unwrap();
        assert!(!pipeline.is_editing());

        drag(&mut pipeline, &[(100.0, 150.0), (150.0, 150.0), (200.0, 150.0)], 1_000.0, 150.0);
        assert_eq!(pipeline.recording().len(), 3);
        assert!(pipeline.compositor().active().surface().get_pixel(150, 150).unwrap()[3] > 0);
    }

    #[test]
    fn test_eyedropper_picks_painting_color() {
        let mut pipeline = pipeline();
        let mut sink = MemorySink::default();
        pipeline
            .apply_command(PaintCommand::Clear, &mut sink)
            .unwrap();
        let canvas = pipeline.background();

        pipeline.apply_command(PaintCommand::ToggleEyedropper, &mut sink).unwrap();
        pipeline.handle_pointer(&pen(PointerPhase::Press, 100.0, 100.0, 0.0));
        pipeline.handle_pointer(&pen(PointerPhase::Release, 100.0, 100.0, 10.0));

        assert!(!pipeline.is_eyedropper());
        assert!(pipeline.recording().is_empty());
        let picked = pipeline.brush().color.to_srgb8();
        for (a, b) in picked.iter().zip(canvas.to_srgb8()) {
            assert!(a.abs_diff(b) <= 1, "{:?} vs {:?}", picked, canvas.to_srgb8());
        }
        assert_eq!(pipeline.page(), UiPage::Draw);
    }

    #[test]
    fn test_sample_color_gray_keeps_hue() {
        let mut pipeline = pipeline();
        pipeline.brush.color = pipeline.brush.color.with_hue(0.33);
        let white = pipeline.sample_color(10.0, 100.0).unwrap();
        assert_eq!(white.h, 0.33);
        assert_eq!(pipeline.sample_color(-1.0, 0.0), None);
        assert_eq!(pipeline.sample_color(1_000.0, 0.0), None);
    }
}
