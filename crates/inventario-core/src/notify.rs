// ── Transient banners ──
//
// Error and success notices shown above the content. The newest banner
// sits on top; each expires on its own after a fixed lifetime.

use std::time::Duration;

use tokio::time::Instant;

const ERROR_TTL: Duration = Duration::from_secs(5);
const SUCCESS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Error,
    Success,
}

impl BannerLevel {
    /// Bold prefix shown before the message.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Error => "Error:",
            Self::Success => "Éxito:",
        }
    }

    pub fn ttl(self) -> Duration {
        match self {
            Self::Error => ERROR_TTL,
            Self::Success => SUCCESS_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub level: BannerLevel,
    pub message: String,
    pub created: Instant,
}

impl Banner {
    pub fn expires_at(&self) -> Instant {
        self.created + self.level.ttl()
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Banner stack, newest first. No deduplication.
#[derive(Debug, Clone, Default)]
pub struct Banners {
    next_id: u64,
    items: Vec<Banner>,
}

impl Banners {
    /// Push a banner on top and return its id.
    pub fn push(&mut self, level: BannerLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.insert(
            0,
            Banner {
                id,
                level,
                message: message.into(),
                created: Instant::now(),
            },
        );
        id
    }

    /// Remove one banner. Returns `true` if it was still showing.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|b| b.id != id);
        before != self.items.len()
    }

    /// Drop every banner past its lifetime. Returns `true` if any went.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|b| !b.is_expired(now));
        before != self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Banner> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
