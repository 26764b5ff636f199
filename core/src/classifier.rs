//! Customer classifier: business tier and lifecycle moment per customer.

use crate::{
    clusters::TierBands,
    config::MomentCutoffs,
    scoring::RfmClass,
    types::Days,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Vips,
    Valiosos,
    Potenciais,
    Descompromissados,
    /// Class outside every band and not "444".
    Unclassified,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Vips,
        Tier::Valiosos,
        Tier::Potenciais,
        Tier::Descompromissados,
        Tier::Unclassified,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vips              => "Vips",
            Self::Valiosos          => "Valiosos",
            Self::Potenciais        => "Potenciais",
            Self::Descompromissados => "Descompromissados",
            Self::Unclassified      => "Unclassified",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerMoment {
    Entrantes,
    #[serde(rename = "Manutenção")]
    Manutencao,
    #[serde(rename = "Recuperação")]
    Recuperacao,
    Inativo,
}

impl CustomerMoment {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Entrantes   => "Entrantes",
            Self::Manutencao  => "Manutenção",
            Self::Recuperacao => "Recuperação",
            Self::Inativo     => "Inativo",
        }
    }
}

impl fmt::Display for CustomerMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First match wins: "444", then Valiosos, Potenciais, Descompromissados.
pub fn classify_tier(class: &RfmClass, bands: &TierBands) -> Tier {
    if class.is_top() {
        Tier::Vips
    } else if bands.valiosos.contains(class) {
        Tier::Valiosos
    } else if bands.potenciais.contains(class) {
        Tier::Potenciais
    } else if bands.descompromissados.contains(class) {
        Tier::Descompromissados
    } else {
        Tier::Unclassified
    }
}

pub fn customer_moment(recency_days: Days, cutoffs: &MomentCutoffs) -> CustomerMoment {
    if recency_days <= cutoffs.entrantes_max {
        CustomerMoment::Entrantes
    } else if recency_days <= cutoffs.manutencao_max {
        CustomerMoment::Manutencao
    } else if recency_days <= cutoffs.recuperacao_max {
        CustomerMoment::Recuperacao
    } else {
        CustomerMoment::Inativo
    }
}
