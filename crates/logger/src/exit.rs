//! Replaceable process-termination hook used by the Fatal paths.
//!
//! Fatal emission calls the logger's own hook when one was set through
//! [`LoggerBuilder::exit_hook`](crate::LoggerBuilder::exit_hook), otherwise the
//! process-wide hook installed here. The default hook calls
//! [`std::process::exit`].

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Termination strategy: receives the exit code.
///
/// Production hooks do not return; test hooks record the call and return.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

static EXIT_HOOK: LazyLock<RwLock<ExitHook>> = LazyLock::new(|| RwLock::new(default_hook()));

fn terminate(code: i32) {
    std::process::exit(code)
}

/// The default hook, terminating the process.
#[must_use]
pub fn default_hook() -> ExitHook {
    Arc::new(terminate)
}

/// Install a process-wide exit hook, returning the previous one.
pub fn set_exit_hook(hook: ExitHook) -> ExitHook {
    let mut guard = EXIT_HOOK.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, hook)
}

/// Restore the default process-wide hook, returning the replaced one.
pub fn reset_exit_hook() -> ExitHook {
    set_exit_hook(default_hook())
}

/// Invoke the process-wide exit hook.
pub fn exit(code: i32) {
    let hook = {
        let guard = EXIT_HOOK.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    };
    tracing::debug!(code, "invoking exit hook");
    hook(code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn replaced_hook_receives_the_code() {
        let codes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&codes);
        let previous = set_exit_hook(Arc::new(move |code| {
            sink.lock().expect("codes lock").push(code);
        }));

        exit(1);
        exit(3);

        let replaced = set_exit_hook(previous);
        replaced(7);
        assert_eq!(*codes.lock().expect("codes lock"), vec![1, 3, 7]);
    }
}
