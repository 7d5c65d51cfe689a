use crate::field::CenturyRule;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct VerifierConfig {
    /// How the century of the birth date is inferred. With a [CenturyRule::Pivot]
    /// the birth date can land in the future, in which case 99 years are added to
    /// the computed age.
    pub birth_century: CenturyRule,
    pub expiry_century: CenturyRule,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            birth_century: CenturyRule::NotAfterReference,
            expiry_century: CenturyRule::ClosestToReference,
        }
    }
}

impl VerifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same century inference as `strptime("%y")` for both dates.
    pub fn posix() -> Self {
        VerifierConfig {
            birth_century: CenturyRule::POSIX,
            expiry_century: CenturyRule::POSIX,
        }
    }

    pub fn birth_century(&self, rule: CenturyRule) -> Self {
        self.mutate_clone(|x| x.birth_century = rule)
    }

    pub fn expiry_century(&self, rule: CenturyRule) -> Self {
        self.mutate_clone(|x| x.expiry_century = rule)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}
