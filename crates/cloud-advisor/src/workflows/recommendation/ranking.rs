use super::evaluation::ScoredRecommendation;
use crate::workflows::catalog::Provider;
use crate::workflows::questionnaire::ALL_PROVIDERS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A provider's best variant with its position in the final list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecommendation {
    pub rank: usize,
    #[serde(flatten)]
    pub recommendation: ScoredRecommendation,
}

impl RankedRecommendation {
    pub fn provider(&self) -> Provider {
        self.recommendation.provider
    }

    pub fn score(&self) -> u32 {
        self.recommendation.score
    }
}

/// Top recommendation per provider in canonical provider order, ranked by score.
pub fn select(scored: &[ScoredRecommendation]) -> Vec<RankedRecommendation> {
    select_for(scored, &Provider::ordered())
}

/// Pick the highest-scoring entry for each listed provider, then order the picks by score.
///
/// The first entry seen wins a tie within a provider; providers tied on score keep the order
/// of `providers`. Providers without entries contribute nothing.
pub fn select_for(
    scored: &[ScoredRecommendation],
    providers: &[Provider],
) -> Vec<RankedRecommendation> {
    let mut picks: Vec<&ScoredRecommendation> = Vec::with_capacity(providers.len());
    for provider in providers {
        if picks.iter().any(|pick| pick.provider == *provider) {
            continue;
        }

        let best = scored
            .iter()
            .filter(|candidate| candidate.provider == *provider)
            .fold(None::<&ScoredRecommendation>, |best, candidate| match best {
                Some(current) if current.score >= candidate.score => Some(current),
                _ => Some(candidate),
            });

        if let Some(best) = best {
            picks.push(best);
        }
    }

    picks.sort_by(|left, right| right.score.cmp(&left.score));

    picks
        .into_iter()
        .enumerate()
        .map(|(index, recommendation)| RankedRecommendation {
            rank: index + 1,
            recommendation: recommendation.clone(),
        })
        .collect()
}

/// Display filter over a ranked list. Filtering never renumbers ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProviderFilter {
    #[default]
    All,
    Only(Provider),
}

impl ProviderFilter {
    pub fn admits(self, provider: Provider) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == provider,
        }
    }

    pub fn apply<'a>(
        self,
        ranked: &'a [RankedRecommendation],
    ) -> impl Iterator<Item = &'a RankedRecommendation> + 'a {
        ranked
            .iter()
            .filter(move |entry| self.admits(entry.provider()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL_PROVIDERS,
            Self::Only(provider) => provider.option_id(),
        }
    }
}

impl fmt::Display for ProviderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider filter `{0}`")]
pub struct UnknownProviderFilter(pub String);

impl FromStr for ProviderFilter {
    type Err = UnknownProviderFilter;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_PROVIDERS) {
            return Ok(Self::All);
        }

        Provider::parse(trimmed)
            .map(Self::Only)
            .ok_or_else(|| UnknownProviderFilter(raw.to_string()))
    }
}

impl TryFrom<String> for ProviderFilter {
    type Error = UnknownProviderFilter;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<ProviderFilter> for String {
    fn from(filter: ProviderFilter) -> Self {
        filter.as_str().to_string()
    }
}
