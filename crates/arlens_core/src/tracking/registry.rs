//! Anchor registry — маппинг ImageIndex ↔ anchor entity
//!
//! Registry эксклюзивно владеет anchor node (и транзитивно всем subtree).
//! Single-active-image policy: одновременно максимум одна запись.

use bevy::prelude::*;
use std::collections::HashMap;

use super::provider::ImageIndex;

#[derive(Resource, Default, Debug)]
pub struct AnchorRegistry {
    anchors: HashMap<ImageIndex, Entity>,
}

impl AnchorRegistry {
    pub fn contains(&self, index: ImageIndex) -> bool {
        self.anchors.contains_key(&index)
    }

    pub fn get(&self, index: ImageIndex) -> Option<Entity> {
        self.anchors.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Единственная активная запись (policy гарантирует ≤ 1)
    pub fn active(&self) -> Option<(ImageIndex, Entity)> {
        self.anchors.iter().next().map(|(index, entity)| (*index, *entity))
    }

    /// Регистрирует anchor, предварительно выселяя всех остальных
    ///
    /// Возвращает выселенные entities — caller обязан их despawn'ить.
    pub fn replace_with(&mut self, index: ImageIndex, entity: Entity) -> Vec<(ImageIndex, Entity)> {
        let evicted: Vec<_> = self.anchors.drain().collect();
        self.anchors.insert(index, entity);
        evicted
    }

    pub fn remove(&mut self, index: ImageIndex) -> Option<Entity> {
        self.anchors.remove(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ImageIndex, Entity)> + '_ {
        self.anchors.iter().map(|(index, entity)| (*index, *entity))
    }
}

/// "Fit to scan" подсказка поверх camera view
///
/// Видна пока registry пустой, скрыта как только какая-то картинка трекается.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitToScanHint {
    pub visible: bool,
}

impl Default for FitToScanHint {
    fn default() -> Self {
        Self { visible: true }
    }
}
