use crate::prob::*;
use crate::fit::{Summary, Trials};
use anyhow::Context;
use serde::{Serialize, Deserialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

fn default_level() -> f64 {
    0.95
}

/// A Beta-Binomial analysis read from the outside world (JSON file): the prior,
/// optionally the observed data (either as counts or as a list of individual outcomes,
/// which are pooled) and the credible level of the reported intervals.
///
/// ```json
/// {
///     "prior" : { "alpha" : 2.0, "beta" : 2.0 },
///     "data" : { "successes" : 7, "trials" : 10 },
///     "outcomes" : [true, false, true],
///     "level" : 0.9
/// }
/// ```
///
/// Distribution parameters are validated while parsing; unknown fields are rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {

    pub prior : Beta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data : Option<Trials>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes : Option<Vec<bool>>,

    #[serde(default = "default_level")]
    pub level : f64

}

impl Model {

    pub fn new(prior : Beta, data : Option<Trials>) -> Self {
        Self { prior, data, outcomes : None, level : default_level() }
    }

    pub fn load_from_path<P>(path : P) -> anyhow::Result<Self>
    where
        P : AsRef<Path>
    {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("Could not open model file {}", path.display()))?;
        let model = Self::load(f)
            .with_context(|| format!("Invalid model file {}", path.display()))?;
        info!("Loaded model from {}", path.display());
        Ok(model)
    }

    pub fn load<R>(mut reader : R) -> anyhow::Result<Self>
    where
        R : Read
    {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let model : Model = serde_json::from_str(&content[..])?;
        validate_level(model.level)?;
        debug!("Parsed model with prior {} and data {}", model.prior, model.trials());
        Ok(model)
    }

    pub fn save_to_path<P>(&self, path : P) -> anyhow::Result<()>
    where
        P : AsRef<Path>
    {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Could not create model file {}", path.display()))?;
        self.save(file)
    }

    pub fn save<W>(&self, mut writer : W) -> anyhow::Result<()>
        where
            W : Write
    {
        let content = serde_json::to_string_pretty(&self)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// All observed trials, pooling the counts and the individual outcomes.
    pub fn trials(&self) -> Trials {
        let counts = self.data.unwrap_or_default();
        match &self.outcomes {
            Some(outcomes) => counts + Trials::from_outcomes(outcomes),
            None => counts
        }
    }

    pub fn summary(&self) -> Result<Summary> {
        Summary::new(&self.prior, self.trials(), self.level)
    }

}
