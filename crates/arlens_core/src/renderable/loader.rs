//! RenderableLoader — exactly-once async загрузка ассетов
//!
//! Первый `acquire(key)` стартует загрузку на IoTaskPool, последующие возвращают
//! тот же handle. Готовность проверяется `poll()` на update thread (через
//! `poll_renderable_loads`), поэтому результаты никогда не трогают scene graph
//! из другого потока.

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task, TaskPool};
use std::collections::HashMap;
use std::sync::Arc;

use super::asset::{AssetBackend, AssetKey, Renderable};
use super::error::LoadError;
use crate::logger;

/// Handle на (возможно ещё грузящийся) renderable
///
/// Дешёвый clone, шарится всеми anchor nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderableHandle {
    key: AssetKey,
}

impl RenderableHandle {
    pub fn key(&self) -> &AssetKey {
        &self.key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

impl LoadStatus {
    /// Ready или Failed — ждать больше нечего
    pub fn is_settled(self) -> bool {
        !matches!(self, LoadStatus::Loading)
    }
}

enum LoadSlot {
    Loading(Task<Result<Renderable, LoadError>>),
    Ready(Renderable),
    Failed(LoadError),
}

/// Event: загрузка завершилась (успешно или нет)
///
/// Waiting anchors просыпаются по этому событию.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct RenderableSettled {
    pub key: AssetKey,
    pub ok: bool,
}

/// Кэш загрузок (один на session/App)
#[derive(Resource)]
pub struct RenderableLoader {
    backend: Arc<dyn AssetBackend>,
    slots: HashMap<AssetKey, LoadSlot>,
}

impl RenderableLoader {
    pub fn new(backend: impl AssetBackend) -> Self {
        Self {
            backend: Arc::new(backend),
            slots: HashMap::new(),
        }
    }

    /// Возвращает handle; первая попытка для ключа стартует загрузку
    pub fn acquire(&mut self, key: &AssetKey) -> RenderableHandle {
        if !self.slots.contains_key(key) {
            let backend = Arc::clone(&self.backend);
            let task_key = key.clone();
            let task = IoTaskPool::get_or_init(TaskPool::new)
                .spawn(async move { backend.load(&task_key) });

            self.slots.insert(key.clone(), LoadSlot::Loading(task));
            logger::log(&format!("📦 Started loading {}", key));
        }

        RenderableHandle { key: key.clone() }
    }

    /// Сколько разных ассетов запрошено (для проверки exactly-once)
    pub fn requested_count(&self) -> usize {
        self.slots.len()
    }

    /// Handle, который этот loader никогда не выдавал, считается Failed
    pub fn status(&self, handle: &RenderableHandle) -> LoadStatus {
        match self.slots.get(&handle.key) {
            Some(LoadSlot::Loading(_)) => LoadStatus::Loading,
            Some(LoadSlot::Ready(_)) => LoadStatus::Ready,
            Some(LoadSlot::Failed(_)) | None => LoadStatus::Failed,
        }
    }

    pub fn is_ready(&self, handle: &RenderableHandle) -> bool {
        self.status(handle) == LoadStatus::Ready
    }

    pub fn is_settled(&self, handle: &RenderableHandle) -> bool {
        self.status(handle).is_settled()
    }

    /// Non-blocking: resolved renderable или None (loading / failed)
    pub fn peek(&self, handle: &RenderableHandle) -> Option<&Renderable> {
        match self.slots.get(&handle.key) {
            Some(LoadSlot::Ready(renderable)) => Some(renderable),
            _ => None,
        }
    }

    pub fn error(&self, handle: &RenderableHandle) -> Option<&LoadError> {
        match self.slots.get(&handle.key) {
            Some(LoadSlot::Failed(err)) => Some(err),
            _ => None,
        }
    }

    /// Забирает завершившиеся tasks; возвращает только что settled ключи
    ///
    /// Failed slot больше никогда не перезапускается.
    pub fn poll(&mut self) -> Vec<RenderableSettled> {
        let mut settled = Vec::new();

        for (key, slot) in self.slots.iter_mut() {
            let LoadSlot::Loading(task) = slot else {
                continue;
            };

            let Some(result) = block_on(future::poll_once(task)) else {
                continue;
            };

            *slot = match result {
                Ok(renderable) => {
                    logger::log(&format!("✅ Loaded {} ({} bytes)", key, renderable.byte_len));
                    settled.push(RenderableSettled { key: key.clone(), ok: true });
                    LoadSlot::Ready(renderable)
                }
                Err(err) => {
                    logger::log_error(&format!("❌ Failed to load {}: {}", key, err));
                    settled.push(RenderableSettled { key: key.clone(), ok: false });
                    LoadSlot::Failed(err)
                }
            };
        }

        settled
    }
}

/// Система: переносит завершённые загрузки в loader + шлёт RenderableSettled
pub fn poll_renderable_loads(
    mut loader: ResMut<RenderableLoader>,
    mut settled_events: EventWriter<RenderableSettled>,
) {
    for settled in loader.poll() {
        settled_events.write(settled);
    }
}
