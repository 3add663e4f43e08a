//! Scoped global input listeners for an open editor.
//!
//! While the editor is open it needs two window-level listeners: pointer-up
//! (to end a drag released outside any cell) and key-down (Escape). An
//! `EditorSession` registers both when it opens the editor and removes them
//! when it is dropped, whichever way the editor was closed.

use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use serde_json::Value;

use crate::editor::{Editor, EditorPhase, Key, KeyInput, KeyOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerUp,
    KeyDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// The host's window, as far as listeners are concerned.
pub trait InputSurface {
    fn add_listener(&self, kind: ListenerKind) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);
}

impl<T: InputSurface + ?Sized> InputSurface for &T {
    fn add_listener(&self, kind: ListenerKind) -> ListenerId {
        (**self).add_listener(kind)
    }

    fn remove_listener(&self, id: ListenerId) {
        (**self).remove_listener(id)
    }
}

impl<T: InputSurface + ?Sized> InputSurface for Rc<T> {
    fn add_listener(&self, kind: ListenerKind) -> ListenerId {
        (**self).add_listener(kind)
    }

    fn remove_listener(&self, id: ListenerId) {
        (**self).remove_listener(id)
    }
}

/// Removes its listeners on drop.
pub struct ListenerGuard<S: InputSurface> {
    surface: S,
    ids: Vec<ListenerId>,
}

impl<S: InputSurface> ListenerGuard<S> {
    pub fn register(surface: S, kinds: &[ListenerKind]) -> Self {
        let ids = kinds.iter().map(|k| surface.add_listener(*k)).collect();
        Self { surface, ids }
    }

    pub fn ids(&self) -> &[ListenerId] {
        &self.ids
    }
}

impl<S: InputSurface> Drop for ListenerGuard<S> {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            self.surface.remove_listener(id);
        }
    }
}

/// A window-level input event delivered through a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerUp,
    KeyDown(KeyInput),
}

/// An open editor plus its global listeners.
///
/// Dropping the session finishes closing the editor, then removes the
/// listeners.
pub struct EditorSession<'a, S: InputSurface> {
    editor: &'a mut Editor,
    _listeners: ListenerGuard<S>,
}

impl<'a, S: InputSurface> EditorSession<'a, S> {
    pub fn open(editor: &'a mut Editor, surface: S, initial: &[Value]) -> Self {
        editor.open(initial);
        let listeners =
            ListenerGuard::register(surface, &[ListenerKind::PointerUp, ListenerKind::KeyDown]);
        log::debug!("editor session listening on {:?}", listeners.ids());
        Self { editor, _listeners: listeners }
    }

    /// Route a global event. Keys other than Escape belong to the focused
    /// cell and are ignored here.
    pub fn dispatch(&mut self, event: InputEvent) -> KeyOutcome {
        match event {
            InputEvent::PointerUp => {
                self.editor.pointer_up();
                KeyOutcome::Ignored
            }
            InputEvent::KeyDown(input) if input.key == Key::Escape => self.editor.escape(),
            InputEvent::KeyDown(_) => KeyOutcome::Ignored,
        }
    }
}

impl<S: InputSurface> Deref for EditorSession<'_, S> {
    type Target = Editor;

    fn deref(&self) -> &Editor {
        &*self.editor
    }
}

impl<S: InputSurface> DerefMut for EditorSession<'_, S> {
    fn deref_mut(&mut self) -> &mut Editor {
        &mut *self.editor
    }
}

impl<S: InputSurface> Drop for EditorSession<'_, S> {
    fn drop(&mut self) {
        if self.editor.phase() != EditorPhase::Closed {
            self.editor.finish_close();
        }
    }
}
