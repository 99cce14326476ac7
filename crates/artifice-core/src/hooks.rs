//! Crafting hooks: listeners that observe, and may veto, artifact
//! construction.
//!
//! Two events are fired per build:
//!
//! - [`ToolCraftingEvent`] right after the raw item has been assembled from
//!   its components.
//! - [`ToolModifyEvent`] after all free bonuses and named modifiers have
//!   been applied, carrying a copy of the item as it was before them.
//!
//! Listeners run in priority order (`Pre`, `Normal`, `Post`), ties broken by
//! registration order. The first listener to return a [`CraftingRejection`]
//! stops dispatch and the rejection is returned to the caller.

use crate::item::ToolItem;
use crate::tool::ComponentStack;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Fired once the raw item exists.
#[derive(Debug, Clone, Copy)]
pub struct ToolCraftingEvent<'a> {
    pub item: &'a ToolItem,
    /// The crafting actor. Always `None` for artifacts.
    pub crafter: Option<&'a str>,
    pub components: &'a [ComponentStack],
}

/// Fired after modifiers have been applied.
#[derive(Debug, Clone)]
pub struct ToolModifyEvent<'a> {
    pub item: &'a ToolItem,
    /// The crafting actor. Always `None` for artifacts.
    pub crafter: Option<&'a str>,
    /// The item as it was before any modifier was applied.
    pub before: ToolItem,
}

impl ToolModifyEvent<'_> {
    /// Levels gained per modifier since `before`, in the item's record order.
    pub fn added_levels(&self) -> Vec<(String, u32)> {
        self.item
            .modifiers()
            .into_iter()
            .filter_map(|record| {
                let gained = record
                    .level
                    .saturating_sub(self.before.modifier_level(&record.identifier));
                (gained > 0).then_some((record.identifier, gained))
            })
            .collect()
    }
}

/// A listener's refusal to let construction proceed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CraftingRejection {
    pub message: String,
}

impl CraftingRejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

pub type CraftingListener =
    Box<dyn Fn(&ToolCraftingEvent<'_>) -> Result<(), CraftingRejection> + Send + Sync>;

pub type ModifyListener =
    Box<dyn Fn(&ToolModifyEvent<'_>) -> Result<(), CraftingRejection> + Send + Sync>;

/// Priority level for listeners. Lower priorities run first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerPriority {
    Pre = 0,
    #[default]
    Normal = 1,
    Post = 2,
}

struct ListenerEntry<L> {
    listener: L,
    priority: ListenerPriority,
    insertion_order: u64,
}

impl<L> std::fmt::Debug for ListenerEntry<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("listener", &"<fn>")
            .field("priority", &self.priority)
            .field("insertion_order", &self.insertion_order)
            .finish()
    }
}

fn insert_sorted<L>(entries: &mut Vec<ListenerEntry<L>>, entry: ListenerEntry<L>) {
    let pos = entries
        .iter()
        .position(|e| {
            (e.priority, e.insertion_order) > (entry.priority, entry.insertion_order)
        })
        .unwrap_or(entries.len());
    entries.insert(pos, entry);
}

// ---------------------------------------------------------------------------
// CraftingHooks
// ---------------------------------------------------------------------------

/// Registry of crafting and modify listeners.
#[derive(Debug, Default)]
pub struct CraftingHooks {
    crafting: Vec<ListenerEntry<CraftingListener>>,
    modify: Vec<ListenerEntry<ModifyListener>>,
    next_order: u64,
}

impl CraftingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to [`ToolCraftingEvent`] at normal priority.
    pub fn on_tool_crafting<F>(&mut self, listener: F)
    where
        F: Fn(&ToolCraftingEvent<'_>) -> Result<(), CraftingRejection> + Send + Sync + 'static,
    {
        self.on_tool_crafting_with_priority(ListenerPriority::Normal, listener);
    }

    pub fn on_tool_crafting_with_priority<F>(&mut self, priority: ListenerPriority, listener: F)
    where
        F: Fn(&ToolCraftingEvent<'_>) -> Result<(), CraftingRejection> + Send + Sync + 'static,
    {
        let entry = ListenerEntry {
            listener: Box::new(listener) as CraftingListener,
            priority,
            insertion_order: self.bump_order(),
        };
        insert_sorted(&mut self.crafting, entry);
    }

    /// Subscribe to [`ToolModifyEvent`] at normal priority.
    pub fn on_tool_modify<F>(&mut self, listener: F)
    where
        F: Fn(&ToolModifyEvent<'_>) -> Result<(), CraftingRejection> + Send + Sync + 'static,
    {
        self.on_tool_modify_with_priority(ListenerPriority::Normal, listener);
    }

    pub fn on_tool_modify_with_priority<F>(&mut self, priority: ListenerPriority, listener: F)
    where
        F: Fn(&ToolModifyEvent<'_>) -> Result<(), CraftingRejection> + Send + Sync + 'static,
    {
        let entry = ListenerEntry {
            listener: Box::new(listener) as ModifyListener,
            priority,
            insertion_order: self.bump_order(),
        };
        insert_sorted(&mut self.modify, entry);
    }

    pub fn listener_count(&self) -> usize {
        self.crafting.len() + self.modify.len()
    }

    pub fn fire_tool_crafting(&self, event: &ToolCraftingEvent<'_>) -> Result<(), CraftingRejection> {
        self.crafting.iter().try_for_each(|e| (e.listener)(event))
    }

    pub fn fire_tool_modify(&self, event: &ToolModifyEvent<'_>) -> Result<(), CraftingRejection> {
        self.modify.iter().try_for_each(|e| (e.listener)(event))
    }

    fn bump_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}
