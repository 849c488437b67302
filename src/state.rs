//! Application state: catalog snapshot, curated bank, engine settings, upstream client and the
//! registry of issued quizzes.
//!
//! This module owns:
//!   - the current lesson catalog (swapped wholesale on refresh, read as an `Arc` snapshot)
//!   - the curated question bank (from TOML)
//!   - the optional upstream client
//!   - issued quizzes by id, so submissions are graded against exactly what was served
//!
//! The catalog comes from the TOML config when it lists lessons, otherwise from the built-in
//! seeds. An upstream refresh replaces it only when the fetch succeeds.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, CuratedBank};
use crate::config::{load_config_from_env, EngineSettings, StudyAidsConfig};
use crate::domain::QuestionItem;
use crate::remote::{RemoteError, RemoteStudyAids};
use crate::seeds::seed_lessons;

/// What a served quiz covered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssuedScope {
    Chapter { lesson_id: String },
    Exam { size: usize },
}

#[derive(Clone, Debug)]
pub struct IssuedQuiz {
    pub scope: IssuedScope,
    pub origin: &'static str,
    pub seed_offset: u32,
    pub items: Vec<QuestionItem>,
}

/// Bounded id → quiz map; the oldest entry is evicted first.
#[derive(Debug, Default)]
struct IssuedRegistry {
    by_id: HashMap<Uuid, IssuedQuiz>,
    order: VecDeque<Uuid>,
    capacity: usize,
}

impl IssuedRegistry {
    fn with_capacity(capacity: usize) -> Self {
        Self { by_id: HashMap::new(), order: VecDeque::new(), capacity: capacity.max(1) }
    }

    fn insert(&mut self, id: Uuid, quiz: IssuedQuiz) {
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(old) => {
                    self.by_id.remove(&old);
                }
                None => break,
            }
        }
        self.order.push_back(id);
        self.by_id.insert(id, quiz);
    }
}

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RwLock<Arc<Catalog>>>,
    pub bank: Arc<CuratedBank>,
    pub settings: EngineSettings,
    pub remote: Option<RemoteStudyAids>,
    issued: Arc<RwLock<IssuedRegistry>>,
}

impl AppState {
    /// Build state from env: load config, pick the catalog source, init the upstream client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_config_from_env().unwrap_or_default();

        let remote = RemoteStudyAids::from_env();
        if let Some(r) = &remote {
            info!(target: "study_aids", base_url = %r.base_url, "Upstream study aids API enabled.");
        } else {
            info!(target: "study_aids", "Upstream disabled (no STUDY_AIDS_API_URL). Using local engine only.");
        }

        Self::from_parts(cfg, remote)
    }

    pub fn from_parts(cfg: StudyAidsConfig, remote: Option<RemoteStudyAids>) -> Self {
        let (lessons, source) = if cfg.lessons.is_empty() {
            (seed_lessons(), "seed")
        } else {
            (cfg.lessons, "config")
        };
        let catalog = Catalog::new(lessons);
        let bank = CuratedBank::new(cfg.bank);

        for lesson in catalog.lessons() {
            let curated = bank.get(&lesson.id).len();
            if curated > 0 {
                info!(target: "study_aids", lesson_id = %lesson.id, curated, "Curated bank entry");
            }
        }
        info!(
            target: "study_aids",
            %source,
            lessons = catalog.len(),
            bank_lessons = bank.lesson_count(),
            bank_items = bank.item_count(),
            "Startup content inventory"
        );

        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            bank: Arc::new(bank),
            issued: Arc::new(RwLock::new(IssuedRegistry::with_capacity(cfg.engine.issued_capacity))),
            settings: cfg.engine,
            remote,
        }
    }

    /// Immutable snapshot of the current catalog; stays valid even if a refresh swaps it.
    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    /// Pull the catalog from upstream. On failure the current snapshot is kept.
    #[instrument(level = "info", skip(self))]
    pub async fn refresh_catalog(&self) -> Result<usize, RemoteError> {
        let Some(remote) = &self.remote else {
            warn!(target: "study_aids", "Catalog refresh requested but upstream is disabled");
            return Ok(self.catalog().await.len());
        };
        match remote.fetch_lessons().await {
            Ok(lessons) => {
                let catalog = Catalog::new(lessons);
                let count = catalog.len();
                *self.catalog.write().await = Arc::new(catalog);
                info!(target: "study_aids", lessons = count, "Catalog replaced from upstream");
                Ok(count)
            }
            Err(e) => {
                error!(target: "study_aids", error = %e, "Upstream catalog fetch failed; keeping current catalog");
                Err(e)
            }
        }
    }

    /// Remember served items so a later submission is graded against them.
    #[instrument(level = "debug", skip(self, quiz), fields(origin = quiz.origin, items = quiz.items.len()))]
    pub async fn register_issued(&self, quiz: &IssuedQuiz) -> Uuid {
        let id = Uuid::new_v4();
        self.issued.write().await.insert(id, quiz.clone());
        id
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_issued(&self, id: &Uuid) -> Option<IssuedQuiz> {
        self.issued.read().await.by_id.get(id).cloned()
    }
}
