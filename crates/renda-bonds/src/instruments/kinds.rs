//! Closed enumerations describing an instrument's economic terms.
//!
//! Each enum parses the spelling variants seen in upstream data once, so
//! pricing code never matches on strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BondError;

fn normalize(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Legal form of the debt instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InstrumentKind {
    /// Certificado de Depósito Bancário.
    Cdb,
    /// Letra de Crédito Imobiliário.
    Lci,
    /// Letra de Crédito do Agronegócio.
    Lca,
    /// Certificado de Recebíveis Imobiliários.
    Cri,
    /// Certificado de Recebíveis do Agronegócio.
    Cra,
    /// Corporate debenture.
    Debenture,
    /// Letra Financeira Subordinada (or senior financial bill).
    Lfsn,
}

impl InstrumentKind {
    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cdb => "CDB",
            Self::Lci => "LCI",
            Self::Lca => "LCA",
            Self::Cri => "CRI",
            Self::Cra => "CRA",
            Self::Debenture => "DEBENTURE",
            Self::Lfsn => "LFSN",
        }
    }
}

impl FromStr for InstrumentKind {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "CDB" => Ok(Self::Cdb),
            "LCI" => Ok(Self::Lci),
            "LCA" => Ok(Self::Lca),
            "CRI" => Ok(Self::Cri),
            "CRA" => Ok(Self::Cra),
            "DEBENTURE" | "DEBENTURES" | "DEBÊNTURE" | "DEBÊNTURES" | "DEB" => Ok(Self::Debenture),
            "LFSN" | "LF" | "LFS" | "LETRA FINANCEIRA" => Ok(Self::Lfsn),
            _ => Err(BondError::invalid_input(format!("unknown instrument kind '{s}'"))),
        }
    }
}

/// Reference index driving the instrument's return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Indexer {
    /// Fixed nominal annual rate.
    Pre,
    /// Percentage of the daily CDI rate.
    Cdi,
    /// Percentage of the daily SELIC rate.
    Selic,
    /// IPCA inflation plus a real annual rate.
    Ipca,
}

impl Indexer {
    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pre => "PRE",
            Self::Cdi => "CDI",
            Self::Selic => "SELIC",
            Self::Ipca => "IPCA",
        }
    }
}

impl FromStr for Indexer {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "PRE" | "PRÉ" | "PREFIXADO" | "PRÉFIXADO" | "PRE FIXADO" | "PRÉ FIXADO" | "FIXED" => {
                Ok(Self::Pre)
            }
            "CDI" | "CDI%" | "%CDI" | "% CDI" | "DI" => Ok(Self::Cdi),
            "SELIC" | "SELIC%" | "%SELIC" | "% SELIC" => Ok(Self::Selic),
            "IPCA" | "IPCA+" | "IPCA +" => Ok(Self::Ipca),
            _ => Err(BondError::invalid_input(format!("unknown indexer '{s}'"))),
        }
    }
}

/// Principal repayment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Amortization {
    /// All principal at maturity.
    #[default]
    Bullet,
    /// Constant installment (Tabela Price).
    Price,
    /// Constant amortization (Sistema de Amortização Constante).
    Sac,
}

impl Amortization {
    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bullet => "BULLET",
            Self::Price => "PRICE",
            Self::Sac => "SAC",
        }
    }

    /// Returns true for PRICE and SAC.
    pub fn is_amortizing(&self) -> bool {
        !matches!(self, Self::Bullet)
    }
}

impl FromStr for Amortization {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "BULLET" | "NONE" | "VENCIMENTO" | "NO VENCIMENTO" => Ok(Self::Bullet),
            "PRICE" | "TABELA PRICE" | "FRENCH" => Ok(Self::Price),
            "SAC" | "CONSTANT" => Ok(Self::Sac),
            _ => Err(BondError::invalid_input(format!("unknown amortization '{s}'"))),
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl TryFrom<String> for $ty {
                type Error = BondError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.name().to_string()
                }
            }
        )*
    };
}

string_conversions!(InstrumentKind, Indexer, Amortization);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_aliases() {
        assert_eq!("deb".parse::<InstrumentKind>().unwrap(), InstrumentKind::Debenture);
        assert_eq!("LF".parse::<InstrumentKind>().unwrap(), InstrumentKind::Lfsn);
        assert_eq!(" cdb ".parse::<InstrumentKind>().unwrap(), InstrumentKind::Cdb);
        assert!("NTN-B".parse::<InstrumentKind>().is_err());
    }

    #[test]
    fn test_indexer_aliases() {
        assert_eq!("IPCA+".parse::<Indexer>().unwrap(), Indexer::Ipca);
        assert_eq!("cdi%".parse::<Indexer>().unwrap(), Indexer::Cdi);
        assert_eq!("Prefixado".parse::<Indexer>().unwrap(), Indexer::Pre);
        assert_eq!("pré-fixado".parse::<Indexer>().unwrap(), Indexer::Pre);
        assert_eq!("selic".parse::<Indexer>().unwrap(), Indexer::Selic);
        assert!("IGPM".parse::<Indexer>().is_err());
    }

    #[test]
    fn test_amortization_aliases() {
        assert_eq!("Tabela Price".parse::<Amortization>().unwrap(), Amortization::Price);
        assert_eq!("tabela_price".parse::<Amortization>().unwrap(), Amortization::Price);
        assert_eq!("sac".parse::<Amortization>().unwrap(), Amortization::Sac);
        assert_eq!(Amortization::default(), Amortization::Bullet);
        assert!(!Amortization::Bullet.is_amortizing());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Indexer::Ipca).unwrap();
        assert_eq!(json, "\"IPCA\"");
        let parsed: Indexer = serde_json::from_str("\"IPCA+\"").unwrap();
        assert_eq!(parsed, Indexer::Ipca);
    }
}
