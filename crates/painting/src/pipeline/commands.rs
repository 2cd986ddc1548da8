//! Paint commands and message dispatch for the painting pipeline

use gouache_ipc::{EngineToUi, PaintCommand, UiToEngine};
use tracing::debug;

use crate::brush::BrushSpec;
use crate::export::{ExportError, ExportSink};

use super::{EventOutcome, PaintingPipeline};

/// What a paint command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// The command carried an unusable value and changed nothing
    Ignored,
    /// The canvas was exported under this name
    Exported(String),
}

impl PaintingPipeline {
    /// Apply one setting change, action or navigation command.
    ///
    /// Style changes replay the uncommitted stroke with the new settings.
    /// Only `Export` can fail, when the sink rejects the image.
    pub fn apply_command(
        &mut self,
        command: PaintCommand,
        sink: &mut dyn ExportSink,
    ) -> Result<CommandOutcome, ExportError> {
        debug!("apply_command: {:?}", command);
        let outcome = match command {
            PaintCommand::SetHue { value } => {
                if value.is_nan() {
                    return Ok(CommandOutcome::Ignored);
                }
                self.brush.color.set_hue(value.clamp(0.0, 1.0));
                self.restyle();
                CommandOutcome::Applied
            }
            PaintCommand::SetSaturation { value } => self.set_style(value, |brush| brush.color.set_saturation(value)),
            PaintCommand::SetLuminance { value } => self.set_style(value, |brush| brush.color.set_luminance(value)),
            PaintCommand::SetSize { value } => self.set_style(value, |brush| brush.set_size_normalized(value)),
            PaintCommand::SetVariation { value } => self.set_style(value, |brush| brush.set_variation(value)),
            PaintCommand::SelectTool { tool } => {
                self.brush.tool = tool;
                self.restyle();
                CommandOutcome::Applied
            }
            PaintCommand::SelectTexture { texture } => {
                self.brush.texture = texture;
                self.restyle();
                CommandOutcome::Applied
            }
            PaintCommand::Undo => {
                self.undo();
                CommandOutcome::Applied
            }
            PaintCommand::Clear => {
                self.clear();
                CommandOutcome::Applied
            }
            PaintCommand::Export => CommandOutcome::Exported(self.export(sink)?),
            PaintCommand::ToggleEdit => {
                self.toggle_edit();
                CommandOutcome::Applied
            }
            PaintCommand::ToggleEyedropper => {
                self.eyedropper = !self.eyedropper;
                CommandOutcome::Applied
            }
            PaintCommand::ShowPage { page } => {
                self.show_page(page);
                CommandOutcome::Applied
            }
        };
        Ok(outcome)
    }

    /// Handle one inbound message and produce the replies for the overlay.
    ///
    /// Every handled message ends with a fresh snapshot.
    pub fn handle_message(
        &mut self,
        message: UiToEngine,
        sink: &mut dyn ExportSink,
    ) -> Result<Vec<EngineToUi>, ExportError> {
        let mut replies = Vec::new();
        match message {
            UiToEngine::Pointer(event) => {
                if let EventOutcome::Ui(hit) = self.handle_pointer(&event) {
                    replies.push(EngineToUi::RegionHit(hit));
                }
            }
            UiToEngine::Paint(command) => {
                if let CommandOutcome::Exported(name) = self.apply_command(command, sink)? {
                    replies.push(EngineToUi::Exported { name });
                }
            }
            UiToEngine::Redraw => self.redraw(),
        }
        replies.push(EngineToUi::Snapshot(self.snapshot()));
        Ok(replies)
    }

    fn set_style(&mut self, value: f32, apply: impl FnOnce(&mut BrushSpec)) -> CommandOutcome {
        if value.is_nan() {
            return CommandOutcome::Ignored;
        }
        apply(&mut self.brush);
        self.restyle();
        CommandOutcome::Applied
    }

    /// Re-render the uncommitted stroke after a style change
    fn restyle(&mut self) {
        if !self.recording.is_empty() && !self.committed {
            self.replay();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use gouache_ipc::{DeviceClass, PointerEvent, PointerPhase, Texture, Tool, UiPage, UiRegion};

    use crate::export::MemorySink;
    use crate::input::PointerSample;

    fn pipeline() -> PaintingPipeline {
        PaintingPipeline::with_size(200, 160).unwrap()
    }

    fn apply(pipeline: &mut PaintingPipeline, command: PaintCommand) -> CommandOutcome {
        pipeline.apply_command(command, &mut MemorySink::default()).unwrap()
    }

    fn record_line(pipeline: &mut PaintingPipeline) {
        for x in [80.0, 110.0, 140.0] {
            pipeline
                .recording
                .push(PointerSample::at(Vec2::new(x, 100.0), PointerPhase::Move).with_pressure(0.5));
        }
        pipeline.redraw();
    }

    #[test]
    fn test_settings_clamp_and_ignore_nan() {
        let mut pipeline = pipeline();
        assert_eq!(apply(&mut pipeline, PaintCommand::SetHue { value: 1.5 }), CommandOutcome::Applied);
        assert_eq!(pipeline.brush().color.h, 1.0);

        let before = *pipeline.brush();
        for command in [
            PaintCommand::SetHue { value: f32::NAN },
            PaintCommand::SetSaturation { value: f32::NAN },
            PaintCommand::SetLuminance { value: f32::NAN },
            PaintCommand::SetSize { value: f32::NAN },
            PaintCommand::SetVariation { value: f32::NAN },
        ] {
            assert_eq!(apply(&mut pipeline, command), CommandOutcome::Ignored);
        }
        assert_eq!(*pipeline.brush(), before);

        apply(&mut pipeline, PaintCommand::SetSize { value: 1.0 });
        assert_eq!(pipeline.brush().size, 300.0);
        apply(&mut pipeline, PaintCommand::SetLuminance { value: -2.0 });
        assert_eq!(pipeline.brush().color.l, 0.0);
    }

    #[test]
    fn test_style_change_replays_uncommitted_stroke() {
        let mut pipeline = pipeline();
        record_line(&mut pipeline);
        let before = pipeline.compositor().active().surface().as_bytes().to_vec();

        apply(&mut pipeline, PaintCommand::SetLuminance { value: 0.1 });
        let after = pipeline.compositor().active().surface().as_bytes().to_vec();
        assert_ne!(before, after);
        assert!(pipeline.compositor().painting().surface().pixels().iter().all(|p| *p == [255; 4]));
    }

    #[test]
    fn test_style_change_after_commit_keeps_canvas() {
        let mut pipeline = pipeline();
        record_line(&mut pipeline);
        pipeline.commit();

        apply(&mut pipeline, PaintCommand::SelectTool { tool: Tool::Lasso });
        assert!(pipeline.compositor().active().surface().is_blank());
        assert_eq!(pipeline.brush().tool, Tool::Lasso);
    }

    #[test]
    fn test_select_texture_and_page() {
        let mut pipeline = pipeline();
        apply(&mut pipeline, PaintCommand::SelectTexture { texture: Texture::Rake });
        apply(&mut pipeline, PaintCommand::ShowPage { page: UiPage::Brush });
        assert_eq!(pipeline.brush().texture, Texture::Rake);
        assert_eq!(pipeline.page(), UiPage::Brush);
    }

    #[test]
    fn test_toggle_eyedropper() {
        let mut pipeline = pipeline();
        apply(&mut pipeline, PaintCommand::ToggleEyedropper);
        assert!(pipeline.is_eyedropper());
        apply(&mut pipeline, PaintCommand::ToggleEyedropper);
        assert!(!pipeline.is_eyedropper());
    }

    #[test]
    fn test_export_command_reports_name() {
        let mut pipeline = pipeline();
        let mut sink = MemorySink::default();
        let replies = pipeline
            .handle_message(UiToEngine::Paint(PaintCommand::Export), &mut sink)
            .unwrap();
        assert_eq!(
            replies[0],
            EngineToUi::Exported {
                name: "gouache-1.png".to_string()
            }
        );
        assert!(matches!(replies[1], EngineToUi::Snapshot(_)));
        assert_eq!(sink.exports.len(), 1);
    }

    #[test]
    fn test_pointer_message_reports_region_hit() {
        let mut pipeline = pipeline();
        let event = PointerEvent::new(PointerPhase::Press, DeviceClass::Mouse, 100.0, 5.0, 0.0);
        let replies = pipeline
            .handle_message(UiToEngine::Pointer(event), &mut MemorySink::default())
            .unwrap();
        assert_eq!(replies.len(), 2);
        let EngineToUi::RegionHit(hit) = &replies[0] else {
            panic!("Expected a region hit, got {:?}", replies[0]);
        };
        assert_eq!(hit.region, UiRegion::TopStrip);
    }

    #[test]
    fn test_redraw_message_returns_snapshot() {
        let mut pipeline = pipeline();
        let replies = pipeline
            .handle_message(UiToEngine::Redraw, &mut MemorySink::default())
            .unwrap();
        assert_eq!(replies, vec![EngineToUi::Snapshot(pipeline.snapshot())]);
    }
}
