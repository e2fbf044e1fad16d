//! Per-tick bindings: attribute mirrors, attribute callbacks and conditional actions.
//!
//! Bindings are owned by the [`ComponentTree`] and evaluated at the end of every
//! [`ComponentTree::tick`], in registration order.

use std::fmt;

use crate::tree::ComponentTree;

/// Component attributes a binding can read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    /// Label of a text or button, content of an input, lines of a paragraph joined by `\n`.
    Text,
    /// Input hint; empty means none.
    Hint,
    /// Enabled flag of a button or input.
    Enabled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Flag(bool),
}

impl Attr {
    /// Convert `value` to the shape this attribute stores. Flags become `"true"`/`"false"`;
    /// text becomes a flag that is set when non-empty.
    pub fn coerce(self, value: AttrValue) -> AttrValue {
        match (self, value) {
            (Self::Text | Self::Hint, AttrValue::Flag(b)) => AttrValue::Text(b.to_string()),
            (Self::Enabled, AttrValue::Text(s)) => AttrValue::Flag(!s.is_empty()),
            (_, value) => value,
        }
    }
}

/// Handle returned on registration, used to [`ComponentTree::unbind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u64);

pub(crate) type AttrCallback = Box<dyn FnMut(AttrValue) -> AttrValue>;
pub(crate) type Condition = Box<dyn FnMut(&ComponentTree) -> bool>;
pub(crate) type Action = Box<dyn FnMut(&mut ComponentTree)>;

pub(crate) enum Binding {
    /// Copy `from` into `to` every tick.
    Mirror { from: (String, Attr), to: (String, Attr) },
    /// Replace the attribute with whatever the callback returns for its current value.
    Callback {
        target: (String, Attr),
        callback: AttrCallback,
    },
    /// Run `action` whenever `condition` holds; dropped after the first run unless `keep`.
    Condition {
        condition: Condition,
        action: Action,
        keep: bool,
    },
}

impl Binding {
    /// Evaluate once. Returns whether the binding stays registered.
    pub(crate) fn run(&mut self, tree: &mut ComponentTree) -> bool {
        match self {
            Self::Mirror { from, to } => {
                let Some(value) = tree.get(&from.0).and_then(|n| n.attr(from.1)) else {
                    tracing::trace!(component = %from.0, attr = ?from.1, "binding source missing");
                    return true;
                };
                if let Some(node) = tree.get_mut(&to.0) {
                    node.set_attr(to.1, value);
                }
                true
            }
            Self::Callback { target, callback } => {
                let Some(node) = tree.get_mut(&target.0) else {
                    return true;
                };
                if let Some(current) = node.attr(target.1) {
                    node.set_attr(target.1, callback(current));
                }
                true
            }
            Self::Condition {
                condition,
                action,
                keep,
            } => {
                if !condition(&*tree) {
                    return true;
                }
                action(&mut *tree);
                *keep
            }
        }
    }
}

/// Registered bindings plus the ids cancelled while they were being evaluated.
#[derive(Default)]
pub(crate) struct BindingSet {
    next: u64,
    entries: Vec<(BindingId, Binding)>,
    running: bool,
    cancelled: Vec<BindingId>,
}

impl BindingSet {
    pub(crate) fn insert(&mut self, binding: Binding) -> BindingId {
        let id = BindingId(self.next);
        self.next += 1;
        self.entries.push((id, binding));
        id
    }

    /// Bindings taken out for evaluation are not in `entries`; their removal is deferred.
    pub(crate) fn remove(&mut self, id: BindingId) -> bool {
        if let Some(pos) = self.entries.iter().position(|(b, _)| *b == id) {
            self.entries.remove(pos);
            return true;
        }
        if self.running && id.0 < self.next && !self.cancelled.contains(&id) {
            self.cancelled.push(id);
            return true;
        }
        false
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn take(&mut self) -> Vec<(BindingId, Binding)> {
        self.cancelled.clear();
        self.running = true;
        std::mem::take(&mut self.entries)
    }

    /// Put evaluated bindings back ahead of any registered during evaluation.
    pub(crate) fn restore(&mut self, mut evaluated: Vec<(BindingId, Binding)>) {
        self.running = false;
        let cancelled = std::mem::take(&mut self.cancelled);
        evaluated.retain(|(id, _)| !cancelled.contains(id));
        evaluated.append(&mut self.entries);
        self.entries = evaluated;
    }
}

impl fmt::Debug for BindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSet")
            .field("bindings", &self.entries.len())
            .field("next", &self.next)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/binding.rs"]
mod tests;
