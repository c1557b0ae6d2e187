//! Application state management
//!
//! [`AppState`] owns the preference store and the transport, and runs every
//! backend invocation on a local executor polled from the UI thread. Views
//! call into it on user interaction; store cells change only after the
//! corresponding invocation has resolved.

use crate::api::{self, ApiKeys, Sound};
use crate::preferences::{sync_preferences, Observable, PreferenceStore, Preferences};
use crate::rpc::Transport;
use crate::ui::layout::RootAttributes;
use crate::{Result, ZammError};
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Playback speed for interface sounds
pub const SOUND_SPEED: f64 = 1.0;

/// What the API key display should show
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ApiKeysStatus {
    #[default]
    Loading,
    Loaded(ApiKeys),
}

/// Central application state
pub struct AppState {
    /// Live preference values
    pub store: PreferenceStore,

    /// API keys known to the backend
    pub api_keys: Observable<ApiKeysStatus>,

    /// Most recent failed invocation
    pub last_error: Observable<Option<ZammError>>,

    transport: Arc<dyn Transport>,
    pool: LocalPool,
    spawner: LocalSpawner,
    settled: Arc<AtomicBool>,
    mounted: bool,
    api_keys_requested: bool,
}

impl AppState {
    /// Create state with default preferences
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_store(PreferenceStore::new(), transport)
    }

    /// Create state around an existing store
    pub fn with_store(store: PreferenceStore, transport: Arc<dyn Transport>) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            store,
            api_keys: Observable::new(ApiKeysStatus::Loading),
            last_error: Observable::new(None),
            transport,
            pool,
            spawner,
            settled: Arc::new(AtomicBool::new(false)),
            mounted: false,
            api_keys_requested: false,
        }
    }

    /// Sync preferences from the backend; only the first call has an effect
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        info!("Mounting app layout, syncing preferences");

        let transport = Arc::clone(&self.transport);
        let store = self.store.clone();
        self.spawn(async move {
            sync_preferences(transport.as_ref(), &store).await?;
            Ok(())
        });
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Fetch API keys once for the display
    pub fn load_api_keys(&mut self) {
        if self.api_keys_requested {
            return;
        }
        self.api_keys_requested = true;

        let transport = Arc::clone(&self.transport);
        let status = self.api_keys.clone();
        self.spawn(async move {
            let keys = api::get_api_keys(transport.as_ref()).await?;
            status.set(ApiKeysStatus::Loaded(keys));
            Ok(())
        });
    }

    /// Save the sound setting; turning sound on plays the switch sound
    pub fn toggle_sound(&self, on: bool) {
        self.save_preferences(Preferences::none().with_sound_on(on), on.then_some(Sound::Switch));
    }

    pub fn set_volume(&self, volume: f64) {
        self.save_preferences(Preferences::none().with_volume(volume), None);
    }

    pub fn set_animations_on(&self, on: bool) {
        self.save_preferences(Preferences::none().with_animations_on(on), None);
    }

    pub fn set_unceasing_animations(&self, on: bool) {
        self.save_preferences(Preferences::none().with_unceasing_animations(on), None);
    }

    pub fn set_animation_speed(&self, speed: f64) {
        self.save_preferences(Preferences::none().with_animation_speed(speed), None);
    }

    /// Persist `overrides`, then write them into the store, then optionally
    /// play a confirmation sound
    fn save_preferences(&self, overrides: Preferences, confirm: Option<Sound>) {
        let transport = Arc::clone(&self.transport);
        let store = self.store.clone();
        self.spawn(async move {
            api::set_preferences(transport.as_ref(), &overrides).await?;
            store.apply_overrides(&overrides);
            if let Some(sound) = confirm {
                if store.sound_on.get() {
                    api::play_sound(transport.as_ref(), sound, store.volume.get(), SOUND_SPEED)
                        .await?;
                }
            }
            Ok(())
        });
    }

    fn spawn(&self, task: impl Future<Output = Result<()>> + 'static) {
        let last_error = self.last_error.clone();
        let settled = Arc::clone(&self.settled);
        let spawned = self.spawner.spawn_local(async move {
            if let Err(e) = task.await {
                error!("Invocation failed: {}", e);
                last_error.set(Some(e));
            }
            settled.store(true, Ordering::Release);
        });
        if let Err(e) = spawned {
            error!("Failed to schedule invocation: {}", e);
        }
    }

    /// Drive every queued invocation as far as it can go without blocking.
    ///
    /// Returns true when at least one invocation finished, i.e. state the
    /// views show may have changed.
    pub fn run_pending(&mut self) -> bool {
        self.pool.run_until_stalled();
        let settled = self.settled.swap(false, Ordering::AcqRel);
        if settled {
            debug!("Invocations settled");
        }
        settled
    }

    /// Root element attributes for the current preferences
    pub fn root_attributes(&self) -> RootAttributes {
        RootAttributes::from_store(&self.store)
    }
}
