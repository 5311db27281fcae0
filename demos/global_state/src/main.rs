use std::thread;
use std::time::Duration;

use focus_connect::{Binding, connect};
use focus_core::{Lens, attribute_lens, reducer};
use focus_store::{FocusedStore, Logger, SharedStore};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct AppState {
    a: i64,
    b: i64,
}

type Counter = Binding<FocusedStore<AppState, i64>, i64>;

fn counter(name: &'static str, binding: &Counter) {
    binding.on_render(move |value| log::info!("render {name}: {value}"));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app = connect(AppState::default(), Logger::json());
    let a = app.focused_state(&attribute_lens!(AppState, a));
    let b = app.focused_state(&attribute_lens!(AppState, b));
    counter("A", &a);
    counter("B", &b);

    a.update(|a| a + 1);
    a.update(|a| a + 1);
    b.update_state([
        reducer(|b: &i64| b + 3),
        reducer(|b: &i64| b * 2),
        reducer(|b: &i64| b - 1),
    ]);

    log::info!(
        "A rendered {} times, B rendered {} times, state {:?}",
        a.render_count(),
        b.render_count(),
        app.store().snapshot()
    );
    anyhow::ensure!(a.render_count() == 3, "A re-rendered on an unrelated update");
    anyhow::ensure!(b.render_count() == 2, "B re-rendered on an unrelated update");

    let shared = SharedStore::with_logger(AppState::default(), Logger::debug());
    let a_shared = shared.focus(&Lens::new(
        |s: &AppState| s.a,
        |s: &AppState, a| AppState { a, ..s.clone() },
    ));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let a_shared = a_shared.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    a_shared.update(|a| a + 1);
                }
            })
        })
        .collect();
    for worker in workers {
        worker
            .join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
    }
    shared.try_update_state_for(Duration::from_millis(100), [reducer(|s: &AppState| AppState {
        b: s.a * 2,
        ..s.clone()
    })])?;
    log::info!("shared state {:?}", shared.get_state());

    Ok(())
}
