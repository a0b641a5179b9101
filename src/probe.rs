//! Process-wide, reference-counted ownership of the OS color sources.
//!
//! Every measure attaches on creation and detaches when it goes away. The
//! first attach loads the libraries and the last detach releases them, no
//! matter how many measures come and go concurrently in between.

use crate::platform::{CapabilitySet, ColorSource, SourceLoader, SystemLoader};
use log::{debug, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

static GLOBAL: OnceLock<Arc<CapabilityProber>> = OnceLock::new();

/// Shared owner of the loaded color source.
pub struct CapabilityProber {
    loader: Box<dyn SourceLoader>,
    instances: AtomicUsize,
    loaded: Mutex<Option<Arc<dyn ColorSource>>>,
}

/// What a consumer gets back from [`CapabilityProber::probe`].
#[derive(Clone)]
pub struct Probed {
    pub source: Arc<dyn ColorSource>,
    pub capabilities: CapabilitySet,
}

impl CapabilityProber {
    /// Create a prober around a custom loader (useful for testing).
    pub fn new(loader: impl SourceLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            instances: AtomicUsize::new(0),
            loaded: Mutex::new(None),
        }
    }

    /// The process-wide prober backed by the real OS libraries.
    pub fn global() -> Arc<CapabilityProber> {
        GLOBAL
            .get_or_init(|| Arc::new(CapabilityProber::new(SystemLoader)))
            .clone()
    }

    /// Number of attached consumers.
    pub fn instances(&self) -> usize {
        self.instances.load(Ordering::Acquire)
    }

    fn state(&self) -> MutexGuard<'_, Option<Arc<dyn ColorSource>>> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attaches one consumer, loading the sources on the first attach.
    ///
    /// Must be paired with exactly one [`release`](Self::release).
    pub fn probe(&self) -> Probed {
        // The lock serializes the 0 -> 1 transition with concurrent attaches,
        // so nobody sees the count raised before the source is loaded.
        let mut loaded = self.state();
        let previous = self.instances.fetch_add(1, Ordering::AcqRel);

        let source = match loaded.as_ref() {
            Some(source) if previous > 0 => source.clone(),
            _ => {
                debug!("Loading color sources");
                let source = self.loader.load();
                *loaded = Some(source.clone());
                source
            }
        };

        Probed {
            capabilities: source.capabilities(),
            source,
        }
    }

    /// Detaches one consumer, releasing the sources on the last detach.
    pub fn release(&self) {
        let mut loaded = self.state();
        let previous = self.instances.load(Ordering::Acquire);
        if previous == 0 {
            warn!("Capability release without a matching probe");
            return;
        }

        self.instances.store(previous - 1, Ordering::Release);
        if previous == 1 {
            debug!("Releasing color sources");
            loaded.take();
        }
    }

    /// Attaches and returns a guard that detaches when dropped.
    pub fn attach(self: &Arc<Self>) -> CapabilityLease {
        let probed = self.probe();
        CapabilityLease {
            prober: Arc::clone(self),
            probed,
        }
    }
}

/// One consumer's attachment to a [`CapabilityProber`].
pub struct CapabilityLease {
    prober: Arc<CapabilityProber>,
    probed: Probed,
}

impl CapabilityLease {
    pub fn source(&self) -> &Arc<dyn ColorSource> {
        &self.probed.source
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.probed.capabilities
    }
}

impl Drop for CapabilityLease {
    fn drop(&mut self) {
        self.prober.release();
    }
}
