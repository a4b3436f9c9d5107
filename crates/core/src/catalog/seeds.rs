//! Built-in seed rows.
//!
//! Prices follow the announced minimum support prices (sugarcane uses the fair and
//! remunerative price); crops without MSP use a typical mandi modal price.

use super::CropSeed;
use crate::domain::crop::{CropCategory, Level, RiskLevel, Season, SoilType};

pub const CROP_SEEDS: &[CropSeed] = &[
    CropSeed {
        id: "rice",
        display_name: "Rice",
        localized_name: "धान",
        category: CropCategory::Cereal,
        seasons: &[Season::Kharif],
        soils: &[
            SoilType::Alluvial,
            SoilType::Clay,
            SoilType::Loamy,
            SoilType::Coastal,
            SoilType::Terai,
        ],
        ph: (5.5, 7.0),
        temperature: (20.0, 35.0),
        humidity: (60.0, 90.0),
        rainfall: (1000.0, 2000.0),
        climate_weights: (0.3, 0.3, 0.4),
        duration_days: 120,
        base_price: 2300.0,
        input_cost: 30000.0,
        yield_per_hectare: 40.0,
        support: Level::VeryHigh,
        demand: Level::VeryHigh,
        export: Level::VeryHigh,
        risk: RiskLevel::Low,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "wheat",
        display_name: "Wheat",
        localized_name: "गेहूं",
        category: CropCategory::Cereal,
        seasons: &[Season::Rabi],
        soils: &[SoilType::Alluvial, SoilType::Loamy, SoilType::SandyLoam, SoilType::Terai],
        ph: (6.0, 7.5),
        temperature: (10.0, 25.0),
        humidity: (40.0, 70.0),
        rainfall: (400.0, 650.0),
        climate_weights: (0.5, 0.3, 0.2),
        duration_days: 120,
        base_price: 2275.0,
        input_cost: 25000.0,
        yield_per_hectare: 45.0,
        support: Level::VeryHigh,
        demand: Level::VeryHigh,
        export: Level::Medium,
        risk: RiskLevel::Low,
        volatility: Level::Low,
    },
    CropSeed {
        id: "maize",
        display_name: "Maize",
        localized_name: "मक्का",
        category: CropCategory::Cereal,
        seasons: &[Season::Kharif, Season::Rabi, Season::Zaid],
        soils: &[SoilType::Alluvial, SoilType::Loamy, SoilType::SandyLoam, SoilType::Red],
        ph: (5.5, 7.0),
        temperature: (18.0, 30.0),
        humidity: (50.0, 80.0),
        rainfall: (500.0, 1000.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 100,
        base_price: 2225.0,
        input_cost: 22000.0,
        yield_per_hectare: 35.0,
        support: Level::Medium,
        demand: Level::High,
        export: Level::Medium,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "potato",
        display_name: "Potato",
        localized_name: "आलू",
        category: CropCategory::Vegetable,
        seasons: &[Season::Rabi],
        soils: &[SoilType::SandyLoam, SoilType::Loamy, SoilType::Alluvial],
        ph: (4.5, 6.0),
        temperature: (15.0, 25.0),
        humidity: (60.0, 85.0),
        rainfall: (300.0, 600.0),
        climate_weights: (0.5, 0.3, 0.2),
        duration_days: 90,
        base_price: 1500.0,
        input_cost: 30000.0,
        yield_per_hectare: 200.0,
        support: Level::Low,
        demand: Level::High,
        export: Level::Low,
        risk: RiskLevel::High,
        volatility: Level::High,
    },
    CropSeed {
        id: "cotton",
        display_name: "Cotton",
        localized_name: "कपास",
        category: CropCategory::Fibre,
        seasons: &[Season::Kharif],
        soils: &[SoilType::Black, SoilType::Alluvial, SoilType::Red],
        ph: (6.0, 8.0),
        temperature: (21.0, 35.0),
        humidity: (40.0, 70.0),
        rainfall: (600.0, 1100.0),
        climate_weights: (0.3, 0.3, 0.4),
        duration_days: 180,
        base_price: 7121.0,
        input_cost: 40000.0,
        yield_per_hectare: 15.0,
        support: Level::High,
        demand: Level::High,
        export: Level::High,
        risk: RiskLevel::High,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "sugarcane",
        display_name: "Sugarcane",
        localized_name: "गन्ना",
        category: CropCategory::Cash,
        seasons: &[Season::Kharif, Season::Zaid],
        soils: &[SoilType::Alluvial, SoilType::Black, SoilType::Loamy, SoilType::Clay],
        ph: (6.0, 7.5),
        temperature: (20.0, 35.0),
        humidity: (60.0, 85.0),
        rainfall: (1100.0, 1800.0),
        climate_weights: (0.3, 0.3, 0.4),
        duration_days: 365,
        base_price: 340.0,
        input_cost: 60000.0,
        yield_per_hectare: 800.0,
        support: Level::VeryHigh,
        demand: Level::High,
        export: Level::Medium,
        risk: RiskLevel::Low,
        volatility: Level::Low,
    },
    CropSeed {
        id: "soybean",
        display_name: "Soybean",
        localized_name: "सोयाबीन",
        category: CropCategory::Oilseed,
        seasons: &[Season::Kharif],
        soils: &[SoilType::Black, SoilType::Loamy, SoilType::Alluvial],
        ph: (6.0, 7.0),
        temperature: (18.0, 30.0),
        humidity: (55.0, 80.0),
        rainfall: (600.0, 1000.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 110,
        base_price: 4892.0,
        input_cost: 22000.0,
        yield_per_hectare: 20.0,
        support: Level::Medium,
        demand: Level::High,
        export: Level::High,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "mustard",
        display_name: "Mustard",
        localized_name: "सरसों",
        category: CropCategory::Oilseed,
        seasons: &[Season::Rabi],
        soils: &[SoilType::Alluvial, SoilType::Loamy, SoilType::SandyLoam],
        ph: (6.0, 7.5),
        temperature: (10.0, 25.0),
        humidity: (40.0, 65.0),
        rainfall: (300.0, 500.0),
        climate_weights: (0.5, 0.3, 0.2),
        duration_days: 120,
        base_price: 5650.0,
        input_cost: 20000.0,
        yield_per_hectare: 20.0,
        support: Level::High,
        demand: Level::High,
        export: Level::Medium,
        risk: RiskLevel::Low,
        volatility: Level::Low,
    },
    CropSeed {
        id: "chickpea",
        display_name: "Chickpea",
        localized_name: "चना",
        category: CropCategory::Pulse,
        seasons: &[Season::Rabi],
        soils: &[SoilType::SandyLoam, SoilType::Loamy, SoilType::Black, SoilType::Alluvial],
        ph: (6.0, 8.0),
        temperature: (10.0, 25.0),
        humidity: (40.0, 65.0),
        rainfall: (300.0, 500.0),
        climate_weights: (0.5, 0.3, 0.2),
        duration_days: 110,
        base_price: 5440.0,
        input_cost: 20000.0,
        yield_per_hectare: 15.0,
        support: Level::High,
        demand: Level::High,
        export: Level::Medium,
        risk: RiskLevel::Low,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "lentil",
        display_name: "Lentil",
        localized_name: "मसूर",
        category: CropCategory::Pulse,
        seasons: &[Season::Rabi],
        soils: &[SoilType::Loamy, SoilType::Alluvial, SoilType::Clay],
        ph: (6.0, 7.5),
        temperature: (8.0, 22.0),
        humidity: (40.0, 65.0),
        rainfall: (250.0, 450.0),
        climate_weights: (0.5, 0.3, 0.2),
        duration_days: 100,
        base_price: 6425.0,
        input_cost: 18000.0,
        yield_per_hectare: 12.0,
        support: Level::Medium,
        demand: Level::High,
        export: Level::Low,
        risk: RiskLevel::Low,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "pigeon_pea",
        display_name: "Pigeon Pea",
        localized_name: "अरहर",
        category: CropCategory::Pulse,
        seasons: &[Season::Kharif],
        soils: &[SoilType::SandyLoam, SoilType::Red, SoilType::Black, SoilType::Loamy],
        ph: (6.0, 7.5),
        temperature: (20.0, 32.0),
        humidity: (50.0, 80.0),
        rainfall: (600.0, 1000.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 150,
        base_price: 7550.0,
        input_cost: 18000.0,
        yield_per_hectare: 12.0,
        support: Level::High,
        demand: Level::High,
        export: Level::Low,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "green_gram",
        display_name: "Green Gram",
        localized_name: "मूंग",
        category: CropCategory::Pulse,
        seasons: &[Season::Kharif, Season::Zaid],
        soils: &[SoilType::SandyLoam, SoilType::Red, SoilType::Loamy],
        ph: (6.2, 7.2),
        temperature: (18.0, 32.0),
        humidity: (50.0, 80.0),
        rainfall: (400.0, 700.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 70,
        base_price: 8682.0,
        input_cost: 12000.0,
        yield_per_hectare: 8.0,
        support: Level::Medium,
        demand: Level::Medium,
        export: Level::Low,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "black_gram",
        display_name: "Black Gram",
        localized_name: "उड़द",
        category: CropCategory::Pulse,
        seasons: &[Season::Kharif, Season::Zaid],
        soils: &[SoilType::SandyLoam, SoilType::Red, SoilType::Black, SoilType::Clay],
        ph: (6.0, 7.5),
        temperature: (20.0, 32.0),
        humidity: (55.0, 80.0),
        rainfall: (500.0, 800.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 80,
        base_price: 7400.0,
        input_cost: 15000.0,
        yield_per_hectare: 10.0,
        support: Level::Medium,
        demand: Level::Medium,
        export: Level::Low,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "groundnut",
        display_name: "Groundnut",
        localized_name: "मूंगफली",
        category: CropCategory::Oilseed,
        seasons: &[Season::Kharif, Season::Rabi],
        soils: &[SoilType::SandyLoam, SoilType::Red, SoilType::Black, SoilType::Sandy],
        ph: (6.0, 7.0),
        temperature: (20.0, 30.0),
        humidity: (50.0, 75.0),
        rainfall: (500.0, 1000.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 120,
        base_price: 6783.0,
        input_cost: 30000.0,
        yield_per_hectare: 25.0,
        support: Level::Medium,
        demand: Level::High,
        export: Level::High,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "sesame",
        display_name: "Sesame",
        localized_name: "तिल",
        category: CropCategory::Oilseed,
        seasons: &[Season::Kharif, Season::Zaid],
        soils: &[SoilType::SandyLoam, SoilType::Red, SoilType::Sandy],
        ph: (5.5, 8.0),
        temperature: (20.0, 32.0),
        humidity: (50.0, 70.0),
        rainfall: (300.0, 600.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 90,
        base_price: 9267.0,
        input_cost: 15000.0,
        yield_per_hectare: 8.0,
        support: Level::Low,
        demand: Level::Medium,
        export: Level::High,
        risk: RiskLevel::Medium,
        volatility: Level::High,
    },
    CropSeed {
        id: "sunflower",
        display_name: "Sunflower",
        localized_name: "सूरजमुखी",
        category: CropCategory::Oilseed,
        seasons: &[Season::Rabi, Season::Zaid],
        soils: &[SoilType::SandyLoam, SoilType::Loamy, SoilType::Red, SoilType::Black],
        ph: (6.0, 7.5),
        temperature: (15.0, 30.0),
        humidity: (50.0, 70.0),
        rainfall: (400.0, 700.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 100,
        base_price: 7280.0,
        input_cost: 20000.0,
        yield_per_hectare: 18.0,
        support: Level::Low,
        demand: Level::Medium,
        export: Level::Low,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "pearl_millet",
        display_name: "Pearl Millet",
        localized_name: "बाजरा",
        category: CropCategory::Cereal,
        seasons: &[Season::Kharif],
        soils: &[SoilType::Sandy, SoilType::SandyLoam, SoilType::Calcareous],
        ph: (6.5, 8.0),
        temperature: (25.0, 35.0),
        humidity: (30.0, 60.0),
        rainfall: (250.0, 600.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 80,
        base_price: 2625.0,
        input_cost: 12000.0,
        yield_per_hectare: 20.0,
        support: Level::Medium,
        demand: Level::Medium,
        export: Level::Low,
        risk: RiskLevel::Low,
        volatility: Level::Low,
    },
    CropSeed {
        id: "sorghum",
        display_name: "Sorghum",
        localized_name: "ज्वार",
        category: CropCategory::Cereal,
        seasons: &[Season::Kharif, Season::Rabi],
        soils: &[SoilType::Black, SoilType::Loamy, SoilType::Red, SoilType::Alluvial],
        ph: (6.0, 8.0),
        temperature: (25.0, 32.0),
        humidity: (40.0, 65.0),
        rainfall: (400.0, 800.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 100,
        base_price: 3371.0,
        input_cost: 12000.0,
        yield_per_hectare: 25.0,
        support: Level::Medium,
        demand: Level::Medium,
        export: Level::Low,
        risk: RiskLevel::Low,
        volatility: Level::Low,
    },
    CropSeed {
        id: "barley",
        display_name: "Barley",
        localized_name: "जौ",
        category: CropCategory::Cereal,
        seasons: &[Season::Rabi],
        soils: &[SoilType::Loamy, SoilType::SandyLoam, SoilType::Sandy, SoilType::Alluvial],
        ph: (6.0, 8.0),
        temperature: (8.0, 22.0),
        humidity: (40.0, 60.0),
        rainfall: (250.0, 450.0),
        climate_weights: (0.5, 0.3, 0.2),
        duration_days: 100,
        base_price: 1850.0,
        input_cost: 15000.0,
        yield_per_hectare: 30.0,
        support: Level::Low,
        demand: Level::Low,
        export: Level::Low,
        risk: RiskLevel::Low,
        volatility: Level::Low,
    },
    CropSeed {
        id: "onion",
        display_name: "Onion",
        localized_name: "प्याज",
        category: CropCategory::Vegetable,
        seasons: &[Season::Rabi, Season::Kharif],
        soils: &[SoilType::SandyLoam, SoilType::Loamy, SoilType::Alluvial],
        ph: (6.0, 7.5),
        temperature: (15.0, 30.0),
        humidity: (50.0, 70.0),
        rainfall: (300.0, 650.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 120,
        base_price: 2000.0,
        input_cost: 25000.0,
        yield_per_hectare: 150.0,
        support: Level::Low,
        demand: Level::VeryHigh,
        export: Level::High,
        risk: RiskLevel::Medium,
        volatility: Level::VeryHigh,
    },
    CropSeed {
        id: "tomato",
        display_name: "Tomato",
        localized_name: "टमाटर",
        category: CropCategory::Vegetable,
        seasons: &[Season::Rabi, Season::Kharif, Season::Zaid],
        soils: &[SoilType::Loamy, SoilType::SandyLoam, SoilType::Clay, SoilType::Red],
        ph: (6.0, 7.0),
        temperature: (18.0, 28.0),
        humidity: (55.0, 75.0),
        rainfall: (400.0, 600.0),
        climate_weights: (0.4, 0.3, 0.3),
        duration_days: 100,
        base_price: 3000.0,
        input_cost: 35000.0,
        yield_per_hectare: 300.0,
        support: Level::Low,
        demand: Level::VeryHigh,
        export: Level::Low,
        risk: RiskLevel::High,
        volatility: Level::High,
    },
    CropSeed {
        id: "turmeric",
        display_name: "Turmeric",
        localized_name: "हल्दी",
        category: CropCategory::Spice,
        seasons: &[Season::Kharif],
        soils: &[SoilType::Loamy, SoilType::Clay, SoilType::Red, SoilType::Laterite],
        ph: (5.0, 7.5),
        temperature: (20.0, 30.0),
        humidity: (70.0, 90.0),
        rainfall: (1500.0, 2250.0),
        climate_weights: (0.3, 0.3, 0.4),
        duration_days: 240,
        base_price: 7000.0,
        input_cost: 80000.0,
        yield_per_hectare: 60.0,
        support: Level::Low,
        demand: Level::High,
        export: Level::VeryHigh,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
    CropSeed {
        id: "banana",
        display_name: "Banana",
        localized_name: "केला",
        category: CropCategory::Fruit,
        seasons: &[Season::YearRound],
        soils: &[SoilType::Alluvial, SoilType::Loamy, SoilType::Clay, SoilType::Coastal],
        ph: (6.0, 7.5),
        temperature: (20.0, 35.0),
        humidity: (70.0, 90.0),
        rainfall: (1000.0, 2000.0),
        climate_weights: (0.3, 0.3, 0.4),
        duration_days: 365,
        base_price: 2000.0,
        input_cost: 80000.0,
        yield_per_hectare: 400.0,
        support: Level::Low,
        demand: Level::High,
        export: Level::Medium,
        risk: RiskLevel::Medium,
        volatility: Level::Medium,
    },
];
