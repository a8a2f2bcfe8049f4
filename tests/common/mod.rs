//! Shared utilities for registry and lifecycle tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use poolshare::observability::Sinks;
use poolshare::registry::{Connector, PoolError, PoolResult, PoolSpec};

/// Handle produced by [`MockConnector`].
#[derive(Debug, Clone)]
pub struct MockPool {
    pub id: usize,
    pub name: String,
    pub url: String,
    closed: Arc<AtomicBool>,
}

impl MockPool {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

type Hook = Box<dyn Fn(&MockPool) + Send + Sync>;

/// In-memory connector with per-name failure injection.
#[derive(Default)]
pub struct MockConnector {
    fail_open: HashSet<String>,
    fail_probe: HashSet<String>,
    fail_close: HashSet<String>,
    probe_delay: Option<Duration>,
    probe_hook: Option<Hook>,
    close_hook: Option<Hook>,
    next_id: AtomicUsize,
    opened: Mutex<Vec<String>>,
    closed: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_open(mut self, name: &str) -> Self {
        self.fail_open.insert(name.to_lowercase());
        self
    }

    pub fn fail_probe(mut self, name: &str) -> Self {
        self.fail_probe.insert(name.to_lowercase());
        self
    }

    pub fn fail_close(mut self, name: &str) -> Self {
        self.fail_close.insert(name.to_lowercase());
        self
    }

    pub fn probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = Some(delay);
        self
    }

    pub fn on_probe(mut self, hook: impl Fn(&MockPool) + Send + Sync + 'static) -> Self {
        self.probe_hook = Some(Box::new(hook));
        self
    }

    pub fn on_close(mut self, hook: impl Fn(&MockPool) + Send + Sync + 'static) -> Self {
        self.close_hook = Some(Box::new(hook));
        self
    }

    /// URLs passed to `open`, in call order.
    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    /// Names of pools `close` was called for, in call order.
    pub fn closed_names(&self) -> Vec<String> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Pool = MockPool;

    async fn open(&self, spec: &PoolSpec) -> PoolResult<MockPool> {
        let url = spec.tuned_url();
        self.opened.lock().unwrap().push(url.clone());

        let name = spec.normalized_name();
        if self.fail_open.contains(&name) {
            return Err(PoolError::Open(format!("cannot reach {}", spec.url()).into()));
        }

        Ok(MockPool {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name,
            url,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    async fn probe(&self, pool: &MockPool) -> PoolResult<()> {
        if let Some(delay) = self.probe_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(hook) = &self.probe_hook {
            hook(pool);
        }
        if self.fail_probe.contains(&pool.name) {
            return Err(PoolError::Probe("access denied".into()));
        }
        Ok(())
    }

    async fn close(&self, pool: MockPool) -> PoolResult<()> {
        if let Some(hook) = &self.close_hook {
            hook(&pool);
        }
        self.closed.lock().unwrap().push(pool.name.clone());
        pool.closed.store(true, Ordering::SeqCst);
        if self.fail_close.contains(&pool.name) {
            return Err(PoolError::Close("connection reset".into()));
        }
        Ok(())
    }
}

/// Messages captured by [`recording_sinks`].
#[derive(Clone, Default)]
pub struct Recorded {
    pub infos: Arc<Mutex<Vec<String>>>,
    pub errors: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl Recorded {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn info_sink(&self) -> impl Fn(&str) + Send + Sync + 'static {
        let infos = self.infos.clone();
        move |m: &str| infos.lock().unwrap().push(m.to_string())
    }

    pub fn error_sink(&self) -> impl Fn(&str) + Send + Sync + 'static {
        let errors = self.errors.clone();
        move |m: &str| errors.lock().unwrap().push(m.to_string())
    }
}

/// Sinks that record every message for later assertions.
#[allow(dead_code)]
pub fn recording_sinks() -> (Sinks, Recorded) {
    let recorded = Recorded::default();
    let sinks = Sinks::new(recorded.info_sink(), recorded.error_sink());
    (sinks, recorded)
}

#[allow(dead_code)]
pub fn spec(name: &str) -> PoolSpec {
    PoolSpec::new(name, "root", "secret", format!("db.internal:3306/{}", name.to_lowercase()))
}
