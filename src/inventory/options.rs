use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;

use super::raw::{OptionType, RawOption};

const INSTALLED_MSRP_MARKER: &str = "[installed_msrp]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleOption {
    pub option_cd: String,
    pub marketing_name: String,
    pub marketing_long_name: String,
    pub option_type: OptionType,
}

impl VehicleOption {
    fn from_raw(raw: &RawOption) -> Self {
        Self {
            option_cd: raw.option_cd.clone(),
            marketing_name: raw.marketing_name.replacen(INSTALLED_MSRP_MARKER, "", 1),
            marketing_long_name: raw.marketing_long_name.clone().unwrap_or_default(),
            option_type: raw.option_type,
        }
    }

    /// Display order: factory, port, dealer, then by code.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.option_type
            .rank()
            .cmp(&other.option_type.rank())
            .then_with(|| self.option_cd.cmp(&other.option_cd))
    }
}

/// Snapshot-scoped table of canonical options keyed by `optionCd`.
///
/// The first option seen for a code wins; every later occurrence resolves to
/// that same `Rc`, so two rows carrying option "WL" share one allocation.
#[derive(Debug, Default)]
pub struct OptionLookup {
    by_code: HashMap<String, Rc<VehicleOption>>,
}

impl OptionLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn get(&self, option_cd: &str) -> Option<&Rc<VehicleOption>> {
        self.by_code.get(option_cd)
    }

    pub fn canonicalize(&mut self, raw: &RawOption) -> Rc<VehicleOption> {
        Rc::clone(
            self.by_code
                .entry(raw.option_cd.clone())
                .or_insert_with(|| Rc::new(VehicleOption::from_raw(raw))),
        )
    }

    pub fn normalize(&mut self, raw: &[RawOption]) -> Vec<Rc<VehicleOption>> {
        raw.iter().map(|option| self.canonicalize(option)).collect()
    }
}
