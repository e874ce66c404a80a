//! Mock record store for tests.
//!
//! [`MockStore`] keeps the catalog in memory and adds the failure hooks the
//! integration tests need: injected write failures (for rollback), a write
//! gate that holds `set_bookmark` responses until released (for observing
//! optimistic state and for superseding an in-flight toggle), and a write
//! log. Not part of the supported api and subject to change.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};

use crate::{
    Result,
    error::DealflowError,
    records::{FundingStage, Sector, StartupRecord, TeamMember, TractionMetric},
    store::RecordStore,
};

/// In-memory [`RecordStore`] with failure injection.
#[derive(Default)]
pub struct MockStore {
    records: Mutex<Vec<StartupRecord>>,
    /// Number of upcoming `set_bookmark` calls that fail.
    fail_writes: AtomicUsize,
    /// When set, `fetch_all` fails.
    fail_fetch: AtomicBool,
    /// While a test holds this lock, `set_bookmark` responses are delayed.
    gate: AsyncMutex<()>,
    write_log: Mutex<Vec<(String, bool)>>,
}

impl MockStore {
    pub fn new(records: Vec<StartupRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// A store pre-populated with [`sample_records`].
    pub fn seeded() -> Self {
        Self::new(sample_records())
    }

    /// Makes the next `count` bookmark writes fail.
    pub fn fail_next_writes(&self, count: usize) {
        self.fail_writes.store(count, Ordering::SeqCst);
    }

    /// Makes `fetch_all` fail until cleared.
    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Holds every `set_bookmark` response until the returned guard is
    /// dropped. Calls issued while held queue up in arrival order.
    pub async fn hold_writes(&self) -> AsyncMutexGuard<'_, ()> {
        self.gate.lock().await
    }

    /// All `set_bookmark` calls observed so far, in order.
    pub fn writes(&self) -> Vec<(String, bool)> {
        self.write_log.lock().clone()
    }

    /// The bookmark value currently stored for `id`.
    pub fn stored_bookmark(&self, id: &str) -> Option<bool> {
        self.records
            .lock()
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.bookmarked)
    }
}

impl RecordStore for MockStore {
    async fn fetch_all(&self) -> Result<Vec<StartupRecord>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(DealflowError::Other {
                message: "mock: simulated load failure".to_string(),
            });
        }
        Ok(self.records.lock().clone())
    }

    async fn set_bookmark(&self, id: &str, value: bool) -> Result<()> {
        let _gate = self.gate.lock().await;
        self.write_log.lock().push((id.to_string(), value));

        let remaining = self.fail_writes.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_writes.store(remaining - 1, Ordering::SeqCst);
            return Err(DealflowError::Api {
                code: 503,
                method: "patch".to_string(),
                url: format!("/v1/startups/{id}"),
                message: "mock: simulated write failure".to_string(),
            });
        }

        let mut records = self.records.lock();
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                // idempotent: setting the same value again is a no-op
                record.bookmarked = value;
                Ok(())
            }
            None => Err(DealflowError::NotFound { id: id.to_string() }),
        }
    }
}

fn record(
    id: &str,
    name: &str,
    tagline: &str,
    sector: Sector,
    stage: FundingStage,
    raised: u64,
    target: u64,
    valuation: u64,
    location: &str,
    bookmarked: bool,
) -> StartupRecord {
    StartupRecord {
        id: id.to_string(),
        name: name.to_string(),
        tagline: tagline.to_string(),
        description: String::new(),
        sector,
        stage,
        raised,
        target,
        valuation,
        location: location.to_string(),
        logo: format!("https://api.dicebear.com/7.x/identicon/svg?seed={id}"),
        validation: vec![],
        bookmarked,
        pitch_deck_url: format!("https://example.com/deck{id}.pdf"),
        team: vec![],
        metrics: vec![],
    }
}

/// A small catalog matching the original seed data, for unit tests.
pub fn sample_records() -> Vec<StartupRecord> {
    let mut nebula = record(
        "1",
        "Nebula AI",
        "Generative infrastructure for edge computing.",
        Sector::Ai,
        FundingStage::Seed,
        1_200_000,
        2_000_000,
        12_000_000,
        "San Francisco, CA",
        false,
    );
    nebula.description =
        "Nebula AI provides a decentralized layer for LLM inference at the edge.".to_string();
    nebula.validation = vec!["Top 5%".to_string(), "YC W24".to_string()];
    nebula.team = vec![TeamMember {
        name: "Sarah Chen".to_string(),
        role: "CEO (ex-Google)".to_string(),
        avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=sarah".to_string(),
    }];
    nebula.metrics = vec![
        TractionMetric {
            label: "MRR".to_string(),
            value: "$45k".to_string(),
        },
        TractionMetric {
            label: "MoM Growth".to_string(),
            value: "22%".to_string(),
        },
    ];

    let mut veridia = record(
        "2",
        "Veridia",
        "Carbon credit verification using satellite imagery.",
        Sector::Climate,
        FundingStage::SeriesA,
        4_500_000,
        5_000_000,
        25_000_000,
        "London, UK",
        true,
    );
    veridia.validation = vec!["B-Corp".to_string(), "Techstars".to_string()];

    let aether = record(
        "3",
        "Aether Pay",
        "The liquidity layer for emerging markets.",
        Sector::Fintech,
        FundingStage::Seed,
        800_000,
        1_500_000,
        8_000_000,
        "Singapore",
        false,
    );

    let synthbio = record(
        "4",
        "SynthBio",
        "Programming cells like software.",
        Sector::HealthTech,
        FundingStage::SeriesB,
        12_000_000,
        20_000_000,
        85_000_000,
        "Boston, MA",
        false,
    );

    let flow = record(
        "5",
        "Flow State",
        "Deep work analytics for remote teams.",
        Sector::Saas,
        FundingStage::PreSeed,
        250_000,
        500_000,
        3_000_000,
        "Berlin, Germany",
        true,
    );

    let koda = record(
        "7",
        "Koda",
        "No-code smart contracts for legal teams.",
        Sector::Web3,
        FundingStage::Seed,
        1_500_000,
        2_000_000,
        10_000_000,
        "New York, NY",
        false,
    );

    vec![nebula, veridia, aether, synthbio, flow, koda]
}
