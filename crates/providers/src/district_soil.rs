//! District soil profiles
//!
//! Soil Health Card summaries for the districts the advisory service sees most
//! often. Unknown districts are reported as unavailable so the engine falls
//! back to the regional soil profile.

use std::time::Duration;

use async_trait::async_trait;
use krishi_core::{LocationRef, ProviderError, SignalProvider, SoilFragment, SoilType};

use self::NutrientClass::{High, Low, Medium};

pub const PROVIDER_NAME: &str = "district_soil";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NutrientClass {
    Low,
    Medium,
    High,
}

impl NutrientClass {
    pub fn index(self) -> f64 {
        match self {
            Self::Low => 0.35,
            Self::Medium => 0.6,
            Self::High => 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoilProfile {
    pub district: &'static str,
    pub soil_type: SoilType,
    pub ph: f64,
    pub nutrients: NutrientClass,
}

impl SoilProfile {
    pub fn fragment(&self) -> SoilFragment {
        SoilFragment {
            soil_type: Some(self.soil_type),
            ph: Some(self.ph),
            nutrient_index: Some(self.nutrients.index()),
        }
    }
}

const fn profile(
    district: &'static str,
    soil_type: SoilType,
    ph: f64,
    nutrients: NutrientClass,
) -> SoilProfile {
    SoilProfile { district, soil_type, ph, nutrients }
}

pub const DISTRICT_PROFILES: &[SoilProfile] = &[
    profile("delhi", SoilType::Loamy, 7.2, Medium),
    profile("ludhiana", SoilType::Alluvial, 7.8, High),
    profile("amritsar", SoilType::Alluvial, 8.0, Medium),
    profile("karnal", SoilType::Alluvial, 7.9, High),
    profile("hisar", SoilType::SandyLoam, 8.2, Low),
    profile("lucknow", SoilType::Alluvial, 7.5, Medium),
    profile("kanpur", SoilType::Alluvial, 7.6, Medium),
    profile("varanasi", SoilType::Alluvial, 7.4, High),
    profile("meerut", SoilType::Alluvial, 7.7, High),
    profile("dehradun", SoilType::Terai, 6.5, High),
    profile("jaipur", SoilType::Sandy, 8.1, Low),
    profile("jodhpur", SoilType::Sandy, 8.4, Low),
    profile("bhopal", SoilType::Black, 7.6, Medium),
    profile("indore", SoilType::Black, 7.8, High),
    profile("nagpur", SoilType::Black, 7.5, Medium),
    profile("pune", SoilType::Loamy, 6.8, Medium),
    profile("mumbai", SoilType::Clay, 6.8, High),
    profile("nashik", SoilType::Black, 7.4, Medium),
    profile("ahmedabad", SoilType::Sandy, 7.1, Low),
    profile("rajkot", SoilType::Black, 7.9, Medium),
    profile("raipur", SoilType::Red, 6.4, Medium),
    profile("patna", SoilType::Alluvial, 7.3, High),
    profile("kolkata", SoilType::Clay, 6.9, High),
    profile("cuttack", SoilType::Alluvial, 6.6, Medium),
    profile("bhubaneswar", SoilType::Laterite, 5.8, Low),
    profile("ranchi", SoilType::Red, 5.9, Low),
    profile("guwahati", SoilType::Alluvial, 5.6, Medium),
    profile("shillong", SoilType::Forest, 5.0, Medium),
    profile("hyderabad", SoilType::Loamy, 6.7, Medium),
    profile("bangalore", SoilType::SandyLoam, 6.5, Medium),
    profile("bengaluru", SoilType::SandyLoam, 6.5, Medium),
    profile("mysore", SoilType::Red, 6.6, Medium),
    profile("chennai", SoilType::Sandy, 7.0, Low),
    profile("coimbatore", SoilType::Red, 7.2, Medium),
    profile("thanjavur", SoilType::Alluvial, 7.0, High),
    profile("kochi", SoilType::Laterite, 5.5, Medium),
    profile("thiruvananthapuram", SoilType::Laterite, 5.4, Low),
    profile("vijayawada", SoilType::Black, 7.6, High),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct DistrictSoilProvider;

impl DistrictSoilProvider {
    pub fn profile(&self, location: &LocationRef) -> Option<&'static SoilProfile> {
        let name = location.name.trim().to_ascii_lowercase();
        let district = name.split(',').next().unwrap_or_default().trim();
        DISTRICT_PROFILES.iter().find(|profile| profile.district == district)
    }
}

#[async_trait]
impl SignalProvider<SoilFragment> for DistrictSoilProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(
        &self,
        location: &LocationRef,
        _budget: Duration,
    ) -> Result<SoilFragment, ProviderError> {
        self.profile(location).map(SoilProfile::fragment).ok_or_else(|| {
            ProviderError::unavailable(
                PROVIDER_NAME,
                format!("no soil profile for `{}`", location.name),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use krishi_core::{LocationRef, SignalProvider, SoilType};

    use super::{DistrictSoilProvider, DISTRICT_PROFILES};

    #[tokio::test]
    async fn known_district_returns_its_profile() {
        let fragment = DistrictSoilProvider
            .fetch(&LocationRef::named("Indore, Madhya Pradesh"), Duration::from_millis(10))
            .await
            .expect("indore is profiled");

        assert_eq!(fragment.soil_type, Some(SoilType::Black));
        assert_eq!(fragment.ph, Some(7.8));
        assert_eq!(fragment.nutrient_index, Some(0.8));
    }

    #[tokio::test]
    async fn unknown_district_is_unavailable() {
        let error = DistrictSoilProvider
            .fetch(&LocationRef::named("Timbuktu"), Duration::from_millis(10))
            .await
            .expect_err("not profiled");

        assert_eq!(error.kind(), "unavailable");
    }

    #[test]
    fn profiles_are_unique_and_plausible() {
        let mut seen = HashSet::new();
        for profile in DISTRICT_PROFILES {
            assert!(seen.insert(profile.district), "duplicate {}", profile.district);
            assert!((4.0..=9.0).contains(&profile.ph), "{}", profile.district);
        }
    }
}
