//! Selection model: items, registry, and the selection state machine pieces.
//!
//! The types here are plain data with no signals attached. [`SelectBox`]
//! owns one of each and wires them to the callback gate and the renderer.
//!
//! [`SelectBox`]: crate::widget::SelectBox

mod defaults;
mod favorite;
mod group;
mod item;
mod registry;
mod selection;

pub use defaults::DefaultSelection;
pub use favorite::Favorite;
pub use group::{expand_group, group_members};
pub use item::{GroupHeader, GroupMap, Item, ItemEntry, ItemKey};
pub use registry::ItemRegistry;
pub use selection::{SelectionMode, SelectionState};

pub(crate) use selection::resolve_enabled;
