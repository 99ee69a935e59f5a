//! Shared loggers keyed by configuration identity
//!
//! `Logger::create` hands out one logger per live `Arc<LoggerConfig>`. The
//! registry holds the configuration weakly, so dropping the last handle to a
//! configuration lets its slot go on the next lookup.

use super::config::LoggerConfig;
use super::logger::Logger;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock, Weak};

struct Slot {
    config: Weak<LoggerConfig>,
    logger: Arc<Logger>,
}

#[derive(Default)]
pub struct InstanceRegistry {
    slots: Mutex<Vec<Slot>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by `Logger::create`
    pub fn global() -> &'static InstanceRegistry {
        static GLOBAL: OnceLock<InstanceRegistry> = OnceLock::new();
        GLOBAL.get_or_init(InstanceRegistry::new)
    }

    /// The logger built for `config`, building it on first use.
    pub fn get_or_create(&self, config: &Arc<LoggerConfig>) -> Arc<Logger> {
        let mut slots = self.slots.lock();
        slots.retain(|slot| slot.config.strong_count() > 0);

        let key = Arc::downgrade(config);
        if let Some(slot) = slots.iter().find(|slot| Weak::ptr_eq(&slot.config, &key)) {
            return Arc::clone(&slot.logger);
        }

        let logger = Arc::new(Logger::from_config(LoggerConfig::clone(config)));
        slots.push(Slot {
            config: key,
            logger: Arc::clone(&logger),
        });
        logger
    }

    /// Live configurations with a logger
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .iter()
            .filter(|slot| slot.config.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
