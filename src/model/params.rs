//! Model parameters loaded from a YAML document.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Error, Float};

/// Immutable scalar parameters of the dynamics and the reward.
///
/// Field names are descriptive; the YAML keys use the model notation
/// (`Y`, `tau_k`, `M_tilde`, ...). Every key is required and unknown keys
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Params {
    #[serde(rename = "Y")]
    pub output_scale: Float,
    #[serde(rename = "tau_k")]
    pub capital_tax_rate: Float,
    #[serde(rename = "delta_K")]
    pub capital_depreciation: Float,
    #[serde(rename = "n")]
    pub population_growth: Float,
    #[serde(rename = "psi")]
    pub extraction_cost: Float,
    #[serde(rename = "zeta")]
    pub extraction_cost_elasticity: Float,
    #[serde(rename = "gamma")]
    pub emission_intensity: Float,
    #[serde(rename = "mu")]
    pub pollution_decay: Float,
    #[serde(rename = "kappa")]
    pub natural_ceiling_factor: Float,
    #[serde(rename = "theta")]
    pub abatement_efficiency: Float,
    #[serde(rename = "phi")]
    pub abatement_elasticity: Float,
    #[serde(rename = "alpha_4")]
    pub energy_debt_share: Float,
    #[serde(rename = "beta")]
    pub green_output_elasticity: Float,
    #[serde(rename = "r_t")]
    pub interest_rate: Float,
    #[serde(rename = "delta_g")]
    pub green_depreciation: Float,
    #[serde(rename = "alpha_1")]
    pub green_investment_share: Float,
    #[serde(rename = "M_tilde")]
    pub pollution_floor: Float,
    #[serde(rename = "rho")]
    pub time_preference: Float,
    #[serde(rename = "alpha_2")]
    pub energy_policy_weight: Float,
    #[serde(rename = "eta")]
    pub energy_elasticity: Float,
    #[serde(rename = "epsilon")]
    pub pollution_aversion: Float,
    #[serde(rename = "omega")]
    pub green_elasticity: Float,
    #[serde(rename = "sigma")]
    pub risk_aversion: Float,
}

impl Params {
    /// Load and validate a parameter file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::ParamsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded model parameters");
        Ok(params)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        let params: Params = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    /// Every value must be finite, and `sigma` must differ from one since the
    /// isoelastic transform divides by `1 - sigma`.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some((name, value)) = self.entries().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidParameter {
                name,
                value,
                reason: "value must be finite",
            });
        }
        if self.risk_aversion == 1.0 {
            return Err(Error::InvalidParameter {
                name: "sigma",
                value: self.risk_aversion,
                reason: "risk aversion must differ from 1",
            });
        }
        Ok(())
    }

    /// Look a parameter up by its file key.
    pub fn get(&self, key: &str) -> Option<Float> {
        self.entries()
            .into_iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    /// `(file key, value)` pairs in file order.
    pub fn entries(&self) -> [(&'static str, Float); 23] {
        [
            ("Y", self.output_scale),
            ("tau_k", self.capital_tax_rate),
            ("delta_K", self.capital_depreciation),
            ("n", self.population_growth),
            ("psi", self.extraction_cost),
            ("zeta", self.extraction_cost_elasticity),
            ("gamma", self.emission_intensity),
            ("mu", self.pollution_decay),
            ("kappa", self.natural_ceiling_factor),
            ("theta", self.abatement_efficiency),
            ("phi", self.abatement_elasticity),
            ("alpha_4", self.energy_debt_share),
            ("beta", self.green_output_elasticity),
            ("r_t", self.interest_rate),
            ("delta_g", self.green_depreciation),
            ("alpha_1", self.green_investment_share),
            ("M_tilde", self.pollution_floor),
            ("rho", self.time_preference),
            ("alpha_2", self.energy_policy_weight),
            ("eta", self.energy_elasticity),
            ("epsilon", self.pollution_aversion),
            ("omega", self.green_elasticity),
            ("sigma", self.risk_aversion),
        ]
    }
}
