use crate::domain::crop::SoilType;
use crate::domain::location::Region;

/// Location-class profile used for any field no provider could supply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionDefaults {
    pub region: Region,
    pub temperature: f64,
    pub humidity: f64,
    /// Seasonal total in millimetres.
    pub rainfall_mm: f64,
    pub soil_type: SoilType,
    pub soil_ph: f64,
    pub nutrient_index: f64,
    pub demand_index: f64,
}

impl RegionDefaults {
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::North => Self {
                region,
                temperature: 24.0,
                humidity: 60.0,
                rainfall_mm: 650.0,
                soil_type: SoilType::Alluvial,
                soil_ph: 7.2,
                nutrient_index: 0.6,
                demand_index: 0.6,
            },
            Region::Central => Self {
                region,
                temperature: 26.0,
                humidity: 60.0,
                rainfall_mm: 800.0,
                soil_type: SoilType::Black,
                soil_ph: 7.5,
                nutrient_index: 0.55,
                demand_index: 0.6,
            },
            Region::South => Self {
                region,
                temperature: 28.0,
                humidity: 70.0,
                rainfall_mm: 900.0,
                soil_type: SoilType::Red,
                soil_ph: 6.5,
                nutrient_index: 0.5,
                demand_index: 0.6,
            },
            Region::East => Self {
                region,
                temperature: 27.0,
                humidity: 75.0,
                rainfall_mm: 1300.0,
                soil_type: SoilType::Alluvial,
                soil_ph: 6.5,
                nutrient_index: 0.6,
                demand_index: 0.6,
            },
            Region::Northeast => Self {
                region,
                temperature: 24.0,
                humidity: 80.0,
                rainfall_mm: 1800.0,
                soil_type: SoilType::Laterite,
                soil_ph: 5.5,
                nutrient_index: 0.55,
                demand_index: 0.5,
            },
        }
    }

    /// Provenance source recorded for defaulted fields.
    pub fn source(&self) -> String {
        format!("region_default:{}", self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::RegionDefaults;
    use crate::domain::location::Region;

    #[test]
    fn every_region_has_usable_defaults() {
        for region in Region::ALL {
            let defaults = RegionDefaults::for_region(region);

            assert_eq!(defaults.region, region);
            assert!(defaults.temperature.is_finite());
            assert!((0.0..=100.0).contains(&defaults.humidity));
            assert!(defaults.rainfall_mm > 0.0);
            assert!((0.0..=14.0).contains(&defaults.soil_ph));
            assert!((0.0..=1.0).contains(&defaults.nutrient_index));
            assert!((0.0..=1.0).contains(&defaults.demand_index));
        }
    }

    #[test]
    fn source_names_the_region() {
        assert_eq!(RegionDefaults::for_region(Region::East).source(), "region_default:east");
    }
}
