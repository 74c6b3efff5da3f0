use tracing::{debug, trace};

use crate::core::{Dataset, LayoutConfig, RecordKey, ScaleSet};
use crate::error::{HeatmapError, HeatmapResult};
use crate::interaction::{HoverTransition, InteractionState};
use crate::render::{RenderFrame, Renderer};

use super::render_frame_builder::{FrameInputs, build_render_frame};
use super::{DocumentGeometry, HeatmapAxes, HeatmapScene, ScenePatch, TooltipState, build_cell_marks};

/// Dataset plus everything derived from it; replaced wholesale on reload.
#[derive(Debug, Clone)]
struct HeatmapModel {
    dataset: Dataset,
    scales: ScaleSet,
    axes: HeatmapAxes,
}

/// Main orchestration facade consumed by binaries and host applications.
///
/// `HeatmapEngine` owns the derived scales, the retained grid scene and the
/// hover state, and hands materialized frames to its renderer.
pub struct HeatmapEngine<R: Renderer> {
    renderer: R,
    layout: LayoutConfig,
    model: Option<HeatmapModel>,
    scene: HeatmapScene,
    interaction: InteractionState,
    tooltip: TooltipState,
}

impl<R: Renderer> HeatmapEngine<R> {
    pub fn new(renderer: R, layout: LayoutConfig) -> HeatmapResult<Self> {
        Ok(Self {
            renderer,
            layout: layout.validate()?,
            model: None,
            scene: HeatmapScene::default(),
            interaction: InteractionState::default(),
            tooltip: TooltipState::hidden(),
        })
    }

    /// Derives scales and axes for `dataset` and reconciles the grid scene.
    ///
    /// Hover state is reset. On error the previous dataset stays in place.
    pub fn set_dataset(&mut self, dataset: Dataset) -> HeatmapResult<ScenePatch> {
        let scales = ScaleSet::build(&dataset, self.layout)?;
        let axes = HeatmapAxes::generate(&scales, self.layout.year_tick_count)?;
        let desired = build_cell_marks(&dataset, &scales)?;

        self.clear_hover();
        let patch = self.scene.reconcile(&desired);
        debug!(
            records = dataset.len(),
            inserted = patch.inserted.len(),
            updated = patch.updated.len(),
            removed = patch.removed.len(),
            "set dataset"
        );
        self.model = Some(HeatmapModel {
            dataset,
            scales,
            axes,
        });
        Ok(patch)
    }

    #[must_use]
    pub fn layout(&self) -> LayoutConfig {
        self.layout
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.model.as_ref().map(|model| &model.dataset)
    }

    #[must_use]
    pub fn scales(&self) -> Option<&ScaleSet> {
        self.model.as_ref().map(|model| &model.scales)
    }

    #[must_use]
    pub fn axes(&self) -> Option<&HeatmapAxes> {
        self.model.as_ref().map(|model| &model.axes)
    }

    #[must_use]
    pub fn scene(&self) -> &HeatmapScene {
        &self.scene
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    #[must_use]
    pub fn hovered(&self) -> Option<RecordKey> {
        self.interaction.hovered()
    }

    /// Document placement for the current dataset.
    pub fn geometry(&self) -> HeatmapResult<DocumentGeometry> {
        let model = self.require_model()?;
        Ok(DocumentGeometry::compute(
            self.layout,
            model.scales.cell_width(),
        ))
    }

    /// Pointer entered the cell for `key`.
    pub fn hover_cell(&mut self, key: RecordKey) -> HeatmapResult<HoverTransition> {
        if self.scene.mark(key).is_none() {
            return Err(HeatmapError::InvalidData(format!(
                "no cell for year {} month {}",
                key.year, key.month
            )));
        }
        let transition = self.interaction.on_cell_enter(key);
        self.sync_hover(transition);
        Ok(transition)
    }

    /// Pointer left the hovered cell.
    pub fn unhover(&mut self) -> HoverTransition {
        let transition = self.interaction.on_cell_leave();
        self.sync_hover(transition);
        transition
    }

    /// Pointer moved to document coordinates `(x, y)`.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> HeatmapResult<HoverTransition> {
        if !x.is_finite() || !y.is_finite() {
            return Err(HeatmapError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }
        let geometry = self.geometry()?;
        let (plot_x, plot_y) = geometry.to_plot_space(x, y);
        let hit = self.scene.hit_test(plot_x, plot_y);
        let transition = self.interaction.on_pointer_move(x, y, hit);
        self.sync_hover(transition);
        Ok(transition)
    }

    pub fn pointer_leave(&mut self) -> HoverTransition {
        let transition = self.interaction.on_pointer_leave();
        self.sync_hover(transition);
        transition
    }

    pub fn build_render_frame(&self) -> HeatmapResult<RenderFrame> {
        let model = self.require_model()?;
        build_render_frame(&FrameInputs {
            dataset: &model.dataset,
            scales: &model.scales,
            axes: &model.axes,
            scene: &self.scene,
            tooltip: &self.tooltip,
            layout: self.layout,
        })
    }

    pub fn render(&mut self) -> HeatmapResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn require_model(&self) -> HeatmapResult<&HeatmapModel> {
        self.model
            .as_ref()
            .ok_or_else(|| HeatmapError::InvalidData("no dataset loaded".to_owned()))
    }

    fn clear_hover(&mut self) {
        self.interaction.reset();
        self.scene.set_highlighted(None);
        self.tooltip = TooltipState::hidden();
    }

    fn sync_hover(&mut self, transition: HoverTransition) {
        if transition == HoverTransition::Unchanged {
            return;
        }
        trace!(?transition, "hover transition");

        let hovered = self.interaction.hovered();
        self.scene.set_highlighted(hovered);
        self.tooltip = hovered
            .and_then(|key| self.scene.mark(key))
            .map(|mark| TooltipState::for_mark(mark, self.layout))
            .unwrap_or_default();
    }
}
