use std::collections::BTreeSet;

use derive_getters::Getters;
use tracing::{info, warn};

use crate::{
    error::{LedgerError, Result},
    models::FundId,
    store::FundCatalog,
};

pub type TokenSet = BTreeSet<String>;

const DROPPED_TOKENS: [&str; 3] = ["plan", "option", "fund"];

const COMPOUND_TOKENS: [(&str, [&str; 2]); 4] = [
    ("smallcap", ["small", "cap"]),
    ("midcap", ["mid", "cap"]),
    ("largecap", ["large", "cap"]),
    ("bluechip", ["blue", "chip"]),
];

/// Splits a fund name into lower-case words on spaces and hyphens.
pub fn tokenize(name: &str) -> TokenSet {
    name.to_lowercase()
        .split(|c: char| c == ' ' || c == '-')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies the fund-name rewrites. Applying it to its own output is a no-op.
pub fn rewrite(mut tokens: TokenSet) -> TokenSet {
    for dropped in DROPPED_TOKENS {
        tokens.remove(dropped);
    }

    for (compound, parts) in COMPOUND_TOKENS {
        if tokens.remove(compound) {
            tokens.extend(parts.iter().map(|part| part.to_string()));
        }
    }

    // Statements usually leave out the default share class.
    if !tokens.contains("regular") && !tokens.contains("direct") {
        tokens.insert("regular".to_string());
    }

    tokens
}

pub fn normalize(name: &str) -> TokenSet {
    rewrite(tokenize(name))
}

#[derive(Clone, Debug, Eq, Getters, PartialEq)]
pub struct FundMatch {
    fund_id: FundId,
    catalog_name: String,
    /// Size of the symmetric difference between the query and catalog tokens.
    distance: usize,
}

#[derive(Clone, Debug)]
struct Candidate {
    name: String,
    id: FundId,
    tokens: TokenSet,
}

/// Resolves free-text fund names against a catalog by token overlap.
#[derive(Clone, Debug)]
pub struct NameMatcher {
    candidates: Vec<Candidate>,
    warn_distance: usize,
}

impl NameMatcher {
    pub fn new(catalog: &FundCatalog, warn_distance: usize) -> Result<Self> {
        if catalog.is_empty() {
            return Err(LedgerError::FatalConfig(
                "fund catalog is empty, cannot match fund names".to_string(),
            ));
        }

        // Catalog entries come out in name order, which the tie-break relies on.
        let candidates = catalog
            .entries()
            .map(|entry| Candidate {
                tokens: normalize(entry.name()),
                name: entry.name().clone(),
                id: *entry.id(),
            })
            .collect();

        Ok(Self {
            candidates,
            warn_distance,
        })
    }

    /// Returns the closest catalog entry. Ties go to the lexicographically
    /// smallest catalog name.
    pub fn best_match(&self, name: &str) -> Result<FundMatch> {
        let query = normalize(name);

        let best = self
            .candidates
            .iter()
            .map(|candidate| (candidate.tokens.symmetric_difference(&query).count(), candidate))
            .min_by(|(a_dist, a), (b_dist, b)| a_dist.cmp(b_dist).then_with(|| a.name.cmp(&b.name)))
            .map(|(distance, candidate)| FundMatch {
                fund_id: candidate.id,
                catalog_name: candidate.name.clone(),
                distance,
            })
            .ok_or_else(|| LedgerError::FatalConfig("fund catalog is empty".to_string()))?;

        if best.distance > self.warn_distance {
            warn!(
                query = name,
                matched = %best.catalog_name,
                fund_id = best.fund_id,
                distance = best.distance,
                "Suspicious fund name match"
            );
        } else {
            info!(query = name, matched = %best.catalog_name, fund_id = best.fund_id, "Parsed fund name");
        }

        Ok(best)
    }

    pub fn resolve(&self, name: &str) -> Result<FundId> {
        self.best_match(name).map(|found| found.fund_id)
    }
}
