use indexmap::IndexMap;
use tracing::trace;

use crate::core::RecordKey;

use super::CellMark;

/// Difference between the retained scene and a desired mark list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePatch {
    pub inserted: Vec<CellMark>,
    pub updated: Vec<CellMark>,
    pub removed: Vec<RecordKey>,
}

impl ScenePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Retained grid scene: one mark per record key, in dataset order.
///
/// The only interactive mutation is the single highlighted (outlined) cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapScene {
    marks: IndexMap<RecordKey, CellMark>,
    highlighted: Option<RecordKey>,
}

impl HeatmapScene {
    #[must_use]
    pub fn marks(&self) -> impl ExactSizeIterator<Item = &CellMark> {
        self.marks.values()
    }

    #[must_use]
    pub fn mark(&self, key: RecordKey) -> Option<&CellMark> {
        self.marks.get(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<RecordKey> {
        self.highlighted
    }

    /// Outlines `key`, or clears the outline with `None`.
    ///
    /// Keys without a mark are ignored and clear any previous outline.
    pub fn set_highlighted(&mut self, key: Option<RecordKey>) {
        self.highlighted = key.filter(|key| self.marks.contains_key(key));
    }

    /// Diffs `desired` against the retained marks without mutating them.
    #[must_use]
    pub fn diff(&self, desired: &[CellMark]) -> ScenePatch {
        let mut patch = ScenePatch::default();
        for mark in desired {
            match self.marks.get(&mark.key) {
                None => patch.inserted.push(*mark),
                Some(current) if current != mark => patch.updated.push(*mark),
                Some(_) => {}
            }
        }

        let desired_keys: std::collections::HashSet<RecordKey> =
            desired.iter().map(|mark| mark.key).collect();
        patch.removed = self
            .marks
            .keys()
            .filter(|key| !desired_keys.contains(key))
            .copied()
            .collect();
        patch
    }

    pub fn apply(&mut self, patch: &ScenePatch) {
        for key in &patch.removed {
            self.marks.shift_remove(key);
        }
        for mark in &patch.updated {
            if let Some(slot) = self.marks.get_mut(&mark.key) {
                *slot = *mark;
            }
        }
        for mark in &patch.inserted {
            self.marks.insert(mark.key, *mark);
        }

        if self
            .highlighted
            .is_some_and(|key| !self.marks.contains_key(&key))
        {
            self.highlighted = None;
        }
        trace!(
            inserted = patch.inserted.len(),
            updated = patch.updated.len(),
            removed = patch.removed.len(),
            "applied scene patch"
        );
    }

    /// Diffs and applies `desired`, restoring dataset order.
    pub fn reconcile(&mut self, desired: &[CellMark]) -> ScenePatch {
        let patch = self.diff(desired);
        self.apply(&patch);

        let order: std::collections::HashMap<RecordKey, usize> = desired
            .iter()
            .enumerate()
            .map(|(index, mark)| (mark.key, index))
            .collect();
        self.marks.sort_by_cached_key(|key, _| order.get(key).copied().unwrap_or(usize::MAX));
        patch
    }

    /// Topmost mark containing the plot-space point.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<RecordKey> {
        self.marks
            .values()
            .rev()
            .find(|mark| mark.contains(x, y))
            .map(|mark| mark.key)
    }
}

#[cfg(test)]
mod tests {
    use super::HeatmapScene;
    use crate::api::CellMark;
    use crate::core::RecordKey;
    use crate::render::Color;

    fn mark(year: i32, month: u8, temperature: f64) -> CellMark {
        CellMark {
            key: RecordKey::new(year, month),
            month_index: usize::from(month - 1),
            year,
            temperature,
            variance: 0.0,
            x: f64::from(year - 2000) * 10.0,
            y: f64::from(month - 1) * 10.0,
            width: 10.0,
            height: 10.0,
            fill: Color::BLACK,
        }
    }

    #[test]
    fn reconcile_inserts_updates_and_removes() {
        let mut scene = HeatmapScene::default();
        let first = scene.reconcile(&[mark(2000, 1, 8.0), mark(2000, 2, 9.0)]);
        assert_eq!(first.inserted.len(), 2);

        let second = scene.reconcile(&[mark(2000, 2, 9.5), mark(2001, 1, 7.0)]);
        assert_eq!(second.inserted.len(), 1);
        assert_eq!(second.updated.len(), 1);
        assert_eq!(second.removed, vec![RecordKey::new(2000, 1)]);
        let keys: Vec<RecordKey> = scene.marks().map(|mark| mark.key).collect();
        assert_eq!(keys, vec![RecordKey::new(2000, 2), RecordKey::new(2001, 1)]);
    }

    #[test]
    fn identical_reconcile_is_empty() {
        let desired = [mark(2000, 1, 8.0)];
        let mut scene = HeatmapScene::default();
        scene.reconcile(&desired);
        assert!(scene.reconcile(&desired).is_empty());
    }

    #[test]
    fn removing_highlighted_mark_clears_outline() {
        let mut scene = HeatmapScene::default();
        scene.reconcile(&[mark(2000, 1, 8.0)]);
        scene.set_highlighted(Some(RecordKey::new(2000, 1)));
        scene.reconcile(&[mark(2000, 2, 8.0)]);
        assert_eq!(scene.highlighted(), None);
    }

    #[test]
    fn hit_test_resolves_cell_under_point() {
        let mut scene = HeatmapScene::default();
        scene.reconcile(&[mark(2000, 1, 8.0), mark(2000, 2, 8.0)]);
        assert_eq!(scene.hit_test(5.0, 15.0), Some(RecordKey::new(2000, 2)));
        assert_eq!(scene.hit_test(50.0, 50.0), None);
    }
}
