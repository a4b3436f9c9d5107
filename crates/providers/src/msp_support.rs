//! Minimum support prices and crop schemes
//!
//! MSP figures are the kharif 2024-25 and rabi 2025-26 announcements in
//! ₹/quintal; sugarcane carries its fair and remunerative price. The schedule
//! is national, so every location receives the same signal.

use std::time::Duration;

use async_trait::async_trait;
use krishi_core::{
    CropId, GovernmentSupportSignal, LocationRef, ProviderError, SignalProvider, SupportFragment,
};

pub const PROVIDER_NAME: &str = "msp_schedule";

pub const MSP_SCHEDULE: &[(&str, f64)] = &[
    ("rice", 2300.0),
    ("wheat", 2275.0),
    ("maize", 2225.0),
    ("cotton", 7121.0),
    ("sugarcane", 340.0),
    ("soybean", 4892.0),
    ("mustard", 5650.0),
    ("chickpea", 5650.0),
    ("lentil", 6700.0),
    ("pigeon_pea", 7550.0),
    ("green_gram", 8682.0),
    ("black_gram", 7400.0),
    ("groundnut", 6783.0),
    ("sesame", 9267.0),
    ("sunflower", 7280.0),
    ("pearl_millet", 2625.0),
    ("sorghum", 3371.0),
    ("barley", 1980.0),
];

const PM_KISAN: &str = "PM-Kisan";
const MSP_PROCUREMENT: &str = "MSP procurement";

/// Crop-specific scheme lists; other crops get the defaults below.
const CROP_SCHEMES: &[(&str, &[&str])] = &[
    ("wheat", &[PM_KISAN, MSP_PROCUREMENT, "Seed subsidy"]),
    ("rice", &[PM_KISAN, MSP_PROCUREMENT, "Irrigation subsidy"]),
    ("cotton", &[MSP_PROCUREMENT, "Bt cotton seed subsidy"]),
    ("sugarcane", &["Fair and remunerative price", "Irrigation subsidy"]),
    ("potato", &[PM_KISAN, "Cold storage subsidy"]),
    ("onion", &[PM_KISAN, "Price stabilisation fund"]),
];

#[derive(Clone, Debug)]
pub struct MspSupportProvider {
    signal: GovernmentSupportSignal,
}

impl MspSupportProvider {
    pub fn new() -> Self {
        Self { signal: schedule() }
    }

    pub fn signal(&self) -> &GovernmentSupportSignal {
        &self.signal
    }
}

impl Default for MspSupportProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalProvider<SupportFragment> for MspSupportProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(
        &self,
        _location: &LocationRef,
        _budget: Duration,
    ) -> Result<SupportFragment, ProviderError> {
        Ok(self.signal.clone())
    }
}

pub fn schedule() -> GovernmentSupportSignal {
    let mut signal = GovernmentSupportSignal::default();
    for (crop, msp) in MSP_SCHEDULE {
        let crop = CropId::new(*crop);
        signal.schemes.insert(crop.clone(), schemes_for(crop.as_str(), true));
        signal.msp.insert(crop, *msp);
    }
    for (crop, _) in CROP_SCHEMES {
        let crop = CropId::new(*crop);
        if !signal.schemes.contains_key(&crop) {
            let schemes = schemes_for(crop.as_str(), false);
            signal.schemes.insert(crop, schemes);
        }
    }
    signal
}

fn schemes_for(crop: &str, has_msp: bool) -> Vec<String> {
    if let Some((_, schemes)) = CROP_SCHEMES.iter().find(|(id, _)| *id == crop) {
        return schemes.iter().map(|scheme| scheme.to_string()).collect();
    }
    if has_msp {
        vec![PM_KISAN.to_string(), MSP_PROCUREMENT.to_string()]
    } else {
        vec![PM_KISAN.to_string()]
    }
}
