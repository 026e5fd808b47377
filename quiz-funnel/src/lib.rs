//! # quiz-funnel
//!
//! Engine for a multi-step qualification quiz that ends in a checkout.
//!
//! The engine walks a [`StepCatalog`] in order, stepping over steps whose
//! [`SkipRule`] holds for the answers given so far. Its state is mirrored to a
//! [`KeyValueStore`] after every change so a reload resumes at the same step,
//! and the final answers are turned into a checkout URL carrying an encrypted
//! copy of the visitor's details.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quiz_funnel::{FunnelConfig, QuizEngine, TracingSink, AnswerKey};
//!
//! let config = FunnelConfig::from_env()?;
//! let mut engine = QuizEngine::new(catalog, config.persistence())
//!     .with_analytics(Arc::new(TracingSink));
//!
//! engine.hydrate();
//! engine.set_answer(AnswerKey::Sex, "male");
//! engine.next_step(); // pregnancy screening is skipped
//! ```
//!
//! ## Modules
//!
//! - `engine` - Traversal, answers, completion and the result-route guard
//! - `persistence` / `stores` - The persisted blob and its storage backends
//! - `cipher` / `checkout` - Checkout payload, URL and token encryption
//! - `geolocation` - Best-effort state prefill from the visitor's IP
//! - `config` - `FUNNEL_*` environment settings

// Re-export all types from quiz-funnel-types
pub use quiz_funnel_types::*;

mod analytics;
pub use analytics::{NoopSink, RecordingSink, TracingSink};

pub mod checkout;
pub use checkout::{CheckoutPayload, CheckoutService};

pub mod cipher;
pub use cipher::{CheckoutCipher, CipherError};

pub mod config;
pub use config::{ConfigError, FunnelConfig};

mod deep_link;
pub use deep_link::DeepLink;

mod engine;
pub use engine::{QuizEngine, RouteGuard};

pub mod geolocation;
pub use geolocation::{GeoLocator, GeolocationError, IpInfo, StateLookup};

pub mod personalization;
pub use personalization::{Bmi, BmiCategory, GenderedText};

pub mod persistence;
pub use persistence::{PersistedState, Persistence};

mod product;
pub use product::{MedicationPreference, Product};

pub mod regions;

mod stores;
pub use stores::{FileStore, MemoryStore};

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .try_init();
}
