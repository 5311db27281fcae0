use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use focus_core::Reducer;
use focus_store::{StateHandle, Subscription};

use crate::signal::{Signal, SubId};

/// A view's connection to a store handle.
///
/// The binding keeps the value the view last rendered in a [`Signal`]. On every
/// store notification it re-derives its value and publishes it only when it
/// differs from the previous one, so a view bound to one part of the state does
/// not re-render when another part changes.
///
/// Dropping the binding detaches it from the store.
pub struct Binding<H, T: 'static> {
    handle: H,
    signal: Signal<T>,
    renders: Rc<Cell<usize>>,
    subscription: Subscription,
}

impl<H, T> Binding<H, T>
where
    H: StateHandle<T> + 'static,
    T: Clone + PartialEq + 'static,
{
    pub fn new(handle: H) -> Self {
        let signal = Signal::new(handle.get_state());
        let renders = Rc::new(Cell::new(1));

        {
            let renders = renders.clone();
            signal.subscribe(move |_| renders.set(renders.get() + 1));
        }

        let subscription = {
            let source = handle.clone();
            let signal = signal.clone();
            handle.subscribe(move || {
                let next = source.get_state();
                if signal.with(|current| *current != next) {
                    log::trace!(target: "focus_connect", "binding changed, publishing");
                    signal.set(next);
                }
            })
        };

        Self {
            handle,
            signal,
            renders,
            subscription,
        }
    }

    /// Value as of the last publish.
    pub fn state(&self) -> T {
        self.signal.get()
    }

    /// Value read from the store right now, bypassing the published snapshot.
    pub fn synchronous_state(&self) -> T {
        self.handle.get_state()
    }

    pub fn select<R>(&self, selector: impl FnOnce(&T) -> R) -> R {
        self.handle.select(selector)
    }

    pub fn update_state(&self, reducers: impl IntoIterator<Item = Reducer<T>>) {
        self.handle.update_state(reducers);
    }

    pub fn update(&self, f: impl Fn(&T) -> T + 'static) {
        self.handle.update(f);
    }

    /// Calls `f` with every newly published value.
    pub fn on_render(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.signal.subscribe(f)
    }

    /// Initial render included.
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn signal(&self) -> &Signal<T> {
        &self.signal
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }
}

impl<H, T: 'static> Binding<H, T> {
    /// Stops following the store. The last published value stays readable.
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }
}

impl<H, T: 'static> Drop for Binding<H, T> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<H, T: fmt::Debug + Clone + 'static> fmt::Debug for Binding<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("state", &self.signal.get())
            .field("renders", &self.renders.get())
            .field("attached", &self.subscription.is_active())
            .finish()
    }
}
