//! Release version comparison
//!
//! Versions are dotted numeric strings with an optional leading `v`
//! (`v1.2.0`, `1.10`). Each component contributes its leading digit run;
//! parsing stops at the first component without one. Shorter versions are
//! padded with zeros before comparing, so `1.2` equals `1.2.0`.

use std::cmp::Ordering;

/// Parsed numeric components of a version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let mut parts = Vec::new();
        if !trimmed.is_empty() {
            for segment in trimmed.split('.') {
                let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
                if digits.is_empty() {
                    break;
                }
                // Runs too long for u64 still outrank any shorter number
                parts.push(digits.parse::<u64>().unwrap_or(u64::MAX));
            }
        }

        if parts.is_empty() {
            parts.push(0);
        }
        Self { parts }
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        let pad = |parts: &[u64], i: usize| parts.get(i).copied().unwrap_or(0);

        (0..len)
            .map(|i| pad(&self.parts, i).cmp(&pad(&other.parts, i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Returns true if `candidate` is strictly newer than `current`
pub fn is_newer(candidate: &str, current: &str) -> bool {
    Version::parse(candidate) > Version::parse(current)
}
