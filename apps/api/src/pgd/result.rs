//! Result types for the PGD matrix.
//!
//! Every slot is either an integer in [0, 21] or absent. Absence is a
//! first-class value — a slot that does not apply for a given gender is
//! `None`, never 0 — so every optional slot is `Option<u8>` with
//! `skip_serializing_if`, and JSON omission round-trips back to `None`.

use serde::{Deserialize, Serialize};

/// The 16-slot main point matrix.
///
/// `M`/`N` are populated only for female input, `O`/`P` only for male.
/// Exactly one pair is present when the gender is recognized, neither
/// when it is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainPoints {
    #[serde(rename = "A")]
    pub a: u8,
    #[serde(rename = "B")]
    pub b: u8,
    #[serde(rename = "V")]
    pub v: u8,
    #[serde(rename = "G")]
    pub g: u8,
    #[serde(rename = "D")]
    pub d: u8,
    #[serde(rename = "L")]
    pub l: u8,
    #[serde(rename = "E")]
    pub e: u8,
    #[serde(rename = "K")]
    pub k: u8,
    #[serde(rename = "J")]
    pub j: u8,
    #[serde(rename = "Z")]
    pub z: u8,
    #[serde(rename = "I")]
    pub i: u8,
    #[serde(rename = "Y")]
    pub y: u8,
    #[serde(rename = "M", skip_serializing_if = "Option::is_none")]
    pub m: Option<u8>,
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    pub n: Option<u8>,
    #[serde(rename = "O", skip_serializing_if = "Option::is_none")]
    pub o: Option<u8>,
    #[serde(rename = "P", skip_serializing_if = "Option::is_none")]
    pub p: Option<u8>,
}

impl MainPoints {
    /// All populated slot values, in slot order. Used by the repetition
    /// aggregations, which operate on the multiset of defined values.
    pub fn defined_values(&self) -> Vec<u8> {
        let mut values = vec![
            self.a, self.b, self.v, self.g, self.d, self.l, self.e, self.k, self.j, self.z,
            self.i, self.y,
        ];
        values.extend([self.m, self.n, self.o, self.p].into_iter().flatten());
        values
    }
}

/// Ancestral aggregates. `ROPP` is gender-branched; `RCO` exists only
/// when `ROPP` does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ancestral {
    #[serde(rename = "RSD")]
    pub rsd: u8,
    #[serde(rename = "ROPP", skip_serializing_if = "Option::is_none")]
    pub ropp: Option<u8>,
    #[serde(rename = "RCO", skip_serializing_if = "Option::is_none")]
    pub rco: Option<u8>,
    #[serde(rename = "RUS")]
    pub rus: u8,
}

impl Ancestral {
    pub fn defined_values(&self) -> Vec<u8> {
        let mut values = vec![self.rsd];
        values.extend([self.ropp, self.rco].into_iter().flatten());
        values.push(self.rus);
        values
    }
}

/// Crossroads aggregates — deviations from the gender-specific
/// second-tier point (`N` or `P`). All four are absent when the gender
/// is unrecognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossroads {
    #[serde(rename = "ISD", skip_serializing_if = "Option::is_none")]
    pub isd: Option<u8>,
    #[serde(rename = "IOPP", skip_serializing_if = "Option::is_none")]
    pub iopp: Option<u8>,
    #[serde(rename = "ICO", skip_serializing_if = "Option::is_none")]
    pub ico: Option<u8>,
    #[serde(rename = "IUS", skip_serializing_if = "Option::is_none")]
    pub ius: Option<u8>,
}

impl Crossroads {
    pub fn defined_values(&self) -> Vec<u8> {
        [self.isd, self.iopp, self.ico, self.ius]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Karmic tasks — each is the mod-22 sum of the distinct values that
/// repeat 3+ times in its candidate group, or absent when nothing does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarmicTasks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub karma_of_genus: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_karma_relationships: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divine_tax: Option<u8>,
}

/// Business periods — range partitions of the values repeating 2+ times
/// in the main matrix. The whole block is absent when nothing repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessPeriods {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_1: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_2: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_3: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_4: Option<u8>,
}

/// The full PGD computation result. Pure function of (date, gender);
/// no identity and no persistence concerns at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgdResult {
    pub main_points: MainPoints,
    pub ancestral: Ancestral,
    pub crossroads: Crossroads,
    pub tasks: KarmicTasks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_periods: Option<BusinessPeriods>,
}
