use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use crate::lang::Lang;

/// Session-wide mutable state shared by handlers.
#[derive(Debug, Default)]
pub struct AssistantState {
    lang: RwLock<Lang>,
    wake_mode: AtomicBool,
    last_equation: Mutex<Option<String>>,
}

impl AssistantState {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang: RwLock::new(lang),
            ..Self::default()
        }
    }

    pub fn lang(&self) -> Lang {
        *self.lang.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_lang(&self, lang: Lang) {
        *self.lang.write().unwrap_or_else(|e| e.into_inner()) = lang;
    }

    pub fn wake_mode(&self) -> bool {
        self.wake_mode.load(Ordering::Relaxed)
    }

    pub fn set_wake_mode(&self, on: bool) {
        self.wake_mode.store(on, Ordering::Relaxed);
    }

    pub fn last_equation(&self) -> Option<String> {
        self.last_equation.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_last_equation(&self, equation: impl Into<String>) {
        *self.last_equation.lock().unwrap_or_else(|e| e.into_inner()) = Some(equation.into());
    }

    pub fn clear_last_equation(&self) {
        self.last_equation.lock().unwrap_or_else(|e| e.into_inner()).take();
    }
}
