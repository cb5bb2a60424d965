use crate::prob::{ProbError, Result};
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;
use std::ops::Add;

/// Sufficient statistic of a sequence of independent success/failure trials: the
/// Binomial likelihood (and therefore the Beta posterior) depends on the data only
/// through the number of successes and the number of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "TrialsParams", into = "TrialsParams")]
pub struct Trials {
    successes : u64,
    trials : u64
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialsParams {
    pub successes : u64,
    pub trials : u64
}

impl TryFrom<TrialsParams> for Trials {

    type Error = ProbError;

    fn try_from(p : TrialsParams) -> Result<Self> {
        Trials::new(p.successes, p.trials)
    }

}

impl From<Trials> for TrialsParams {

    fn from(t : Trials) -> Self {
        TrialsParams { successes : t.successes, trials : t.trials }
    }

}

impl Trials {

    pub fn new(successes : u64, trials : u64) -> Result<Self> {
        if successes > trials {
            return Err(ProbError::Successes { successes, trials });
        }
        Ok(Self { successes, trials })
    }

    /// Counts the true entries of a sequence of outcomes (e.g. coin flips landing heads).
    pub fn from_outcomes(outcomes : &[bool]) -> Self {
        let successes = outcomes.iter().filter(|o| **o ).count() as u64;
        Self { successes, trials : outcomes.len() as u64 }
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn is_empty(&self) -> bool {
        self.trials == 0
    }

}

/// Pools two independent batches of trials.
impl Add for Trials {

    type Output = Trials;

    fn add(self, other : Trials) -> Trials {
        Trials {
            successes : self.successes + other.successes,
            trials : self.trials + other.trials
        }
    }

}

impl fmt::Display for Trials {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.successes, self.trials)
    }

}
