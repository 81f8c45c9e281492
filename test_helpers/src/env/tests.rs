//! Unit tests for environment guards.

use std::sync::{Arc, Barrier};
use std::thread;

use super::{EnvScope, lock, remove_var, set_var};

fn current(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
fn set_var_restores_the_prior_value() {
    let key = "ENVSHAPE_HELPERS_SET";
    let _outer = set_var(key, "original");
    {
        let _inner = set_var(key, "override");
        assert_eq!(current(key).as_deref(), Some("override"));
    }
    assert_eq!(current(key).as_deref(), Some("original"));
}

#[test]
fn remove_var_restores_absence_and_presence() {
    let key = "ENVSHAPE_HELPERS_REMOVE";
    {
        let _absent = remove_var(key);
        {
            let _set = set_var(key, "temporary");
        }
        assert_eq!(current(key), None);
    }

    let _present = set_var(key, "kept");
    {
        let _removed = remove_var(key);
        assert_eq!(current(key), None);
    }
    assert_eq!(current(key).as_deref(), Some("kept"));
}

#[test]
fn stacked_guards_unwind_in_order() {
    let key = "ENVSHAPE_HELPERS_STACK";
    let first = set_var(key, "one");
    let second = set_var(key, "two");
    drop(second);
    assert_eq!(current(key).as_deref(), Some("one"));
    drop(first);
    assert_eq!(current(key), None);
}

#[test]
fn scopes_restore_every_entry() {
    let host = "ENVSHAPE_HELPERS_SCOPE_HOST";
    let port = "ENVSHAPE_HELPERS_SCOPE_PORT";
    let _seed = set_var(port, "1");
    {
        let scope = EnvScope::apply([(host, Some("db")), (port, None), (host, Some("cache"))]);
        assert_eq!(scope.len(), 3);
        assert_eq!(current(host).as_deref(), Some("cache"));
        assert_eq!(current(port), None);
    }
    assert_eq!(current(host), None);
    assert_eq!(current(port).as_deref(), Some("1"));
}

#[test]
fn guards_nest_inside_an_explicit_lock() {
    let key = "ENVSHAPE_HELPERS_LOCKED";
    let _lock = lock();
    let _guard = set_var(key, "value");
    assert_eq!(current(key).as_deref(), Some("value"));
}

#[test]
fn threads_mutating_distinct_keys_restore_cleanly() {
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let ready = Arc::clone(&barrier);
            thread::spawn(move || {
                let key = format!("ENVSHAPE_HELPERS_THREAD_{worker}");
                ready.wait();
                for round in 0..16 {
                    let value = format!("{worker}-{round}");
                    let guard = set_var(&key, &value);
                    assert_eq!(current(&key), Some(value));
                    drop(guard);
                    assert_eq!(current(&key), None);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}
