pub use crate::logger::{Logger, UpdateRecord};
pub use crate::shared::{SharedFocusedStore, SharedStore, WeakSharedStore};
pub use crate::store::{Batch, FocusedStore, StateHandle, Store, WeakStore};
pub use crate::subscription::{SharedSubscription, Subscription};
pub use focus_core::attribute_lens;
pub use focus_core::{HasId, KeyedMap, Lens, Reducer, flow, id_lens, index_lens, key_lens, reducer};
