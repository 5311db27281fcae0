use std::fmt::Debug;
use std::sync::Arc;

/// What a store reports for one `update_state` call.
///
/// `label` is the label of the effective reducer of the batch (see
/// [`focus_core::flow`]), `None` when no reducer in the batch was labelled.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateRecord<'a, S> {
    pub state_before_update: &'a S,
    pub label: Option<&'a str>,
    pub state_after_update: &'a S,
}

#[cfg(feature = "serde")]
impl<S: serde::Serialize> UpdateRecord<'_, S> {
    /// The record as a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

type LogFn<S> = Arc<dyn Fn(&UpdateRecord<'_, S>) + Send + Sync>;

/// Update hook of a store, called once per `update_state`.
pub struct Logger<S>(LogFn<S>);

impl<S> Clone for Logger<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S: 'static> Default for Logger<S> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<S: 'static> Logger<S> {
    pub fn new(f: impl Fn(&UpdateRecord<'_, S>) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Emits each update through `log::debug!`, formatting both snapshots with `Debug`.
    pub fn debug() -> Self
    where
        S: Debug,
    {
        Self::new(|record| {
            log::debug!(
                target: "focus_store",
                "update [{}]: {:?} -> {:?}",
                record.label.unwrap_or("unlabeled"),
                record.state_before_update,
                record.state_after_update
            );
        })
    }

    /// Emits each update as a single-line JSON object through `log::debug!`.
    #[cfg(feature = "serde")]
    pub fn json() -> Self
    where
        S: serde::Serialize,
    {
        Self::new(|record| match record.to_json() {
            Ok(line) => log::debug!(target: "focus_store", "{line}"),
            Err(err) => log::warn!(target: "focus_store", "update record not serializable: {err}"),
        })
    }

    pub fn log(&self, record: &UpdateRecord<'_, S>) {
        (self.0)(record)
    }
}

impl<S, F> From<F> for Logger<S>
where
    S: 'static,
    F: Fn(&UpdateRecord<'_, S>) + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Logger::new(f)
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use parking_lot::Mutex;

    use super::*;
    use crate::{StateHandle, Store};
    use focus_core::Reducer;

    static LINES: Mutex<Vec<(Level, String)>> = parking_lot::const_mutex(Vec::new());

    struct Capture;

    impl Log for Capture {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            if record.target() == "focus_store" {
                LINES.lock().push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    fn capture() {
        // Only the first test to get here installs it.
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(LevelFilter::Trace);
    }

    fn captured(level: Level, needle: &str) -> Vec<String> {
        LINES
            .lock()
            .iter()
            .filter(|(l, line)| *l == level && line.contains(needle))
            .map(|(_, line)| line.clone())
            .collect()
    }

    #[test]
    fn debug_logger_writes_one_line_per_update() {
        capture();
        let store = Store::with_logger(0_i32, Logger::debug());

        store.update_state([
            Reducer::labeled("debug-first", |n: &i32| n + 1),
            Reducer::labeled("debug-second", |n: &i32| n * 10),
        ]);

        assert_eq!(store.get_state(), 10);
        assert_eq!(
            captured(Level::Debug, "debug-first"),
            vec!["update [debug-first > debug-second]: 0 -> 10".to_string()]
        );
    }

    #[test]
    fn noop_logger_is_the_default() {
        let calls = std::sync::Arc::new(Mutex::new(0));
        let counted = {
            let calls = calls.clone();
            Logger::<i32>::new(move |_| *calls.lock() += 1)
        };
        let record = UpdateRecord {
            state_before_update: &1,
            label: None,
            state_after_update: &2,
        };

        Logger::<i32>::default().log(&record);
        counted.log(&record);
        counted.clone().log(&record);

        assert_eq!(*calls.lock(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_record_is_one_flat_object() {
        let record = UpdateRecord {
            state_before_update: &1,
            label: Some("x"),
            state_after_update: &2,
        };
        assert_eq!(
            record.to_json().ok().as_deref(),
            Some(r#"{"state_before_update":1,"label":"x","state_after_update":2}"#)
        );

        let unlabeled = UpdateRecord {
            state_before_update: &"a",
            label: None,
            state_after_update: &"b",
        };
        assert_eq!(
            unlabeled.to_json().ok().as_deref(),
            Some(r#"{"state_before_update":"a","label":null,"state_after_update":"b"}"#)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_logger_writes_the_record() {
        capture();
        let store = Store::with_logger(1_i32, Logger::json());

        store.update_state([Reducer::labeled("json-line", |n: &i32| n + 1)]);

        assert_eq!(
            captured(Level::Debug, "json-line"),
            vec![r#"{"state_before_update":1,"label":"json-line","state_after_update":2}"#.to_string()]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_logger_warns_when_state_cannot_be_serialized() {
        #[derive(Clone, Debug)]
        struct Opaque(i32);

        impl serde::Serialize for Opaque {
            fn serialize<Ser: serde::Serializer>(&self, _: Ser) -> Result<Ser::Ok, Ser::Error> {
                Err(serde::ser::Error::custom("opaque state refuses serialization"))
            }
        }

        capture();
        let record = UpdateRecord {
            state_before_update: &Opaque(0),
            label: None,
            state_after_update: &Opaque(1),
        };
        assert!(record.to_json().is_err());

        let store = Store::with_logger(Opaque(0), Logger::json());
        store.update(|o| Opaque(o.0 + 1));

        assert_eq!(store.get_state().0, 1);
        assert_eq!(
            captured(Level::Warn, "opaque state refuses serialization").len(),
            1
        );
    }
}
