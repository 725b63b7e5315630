//! Routine recommendations: clothing, accessories, activities and tips.
//!
//! Groups are independent and additive. Within a group the first matching
//! tier wins. The activity group always ends in a fallback, so `activities`
//! is never empty.

use skyview_weather::{CurrentConditions, WeatherSnapshot};

use crate::types::RecommendationSet;

const RAIN_LIKELY_PCT: f64 = 50.0;
const RAIN_POSSIBLE_PCT: f64 = 30.0;
const INDOOR_RAIN_PCT: f64 = 60.0;
const WINDBREAKER_MPS: f64 = 15.0;
const HUMID_PCT: f64 = 80.0;
const DRY_PCT: f64 = 30.0;

/// Derive recommendations for the snapshot.
pub fn weather_recommendations(snapshot: &WeatherSnapshot) -> RecommendationSet {
    let current = &snapshot.current;
    let mut recs = RecommendationSet::default();

    clothing_for_temperature(current, &mut recs);
    rain_gear(current, &mut recs);
    sun_protection(current, &mut recs);
    wind_protection(current, &mut recs);
    humidity_tips(current, &mut recs);
    recs.activities = activities(current);

    tracing::debug!(
        "Derived recommendations: {} clothing, {} accessories, {} activities, {} tips",
        recs.clothing.len(),
        recs.accessories.len(),
        recs.activities.len(),
        recs.tips.len()
    );
    recs
}

fn push_all(list: &mut Vec<String>, items: &[&str]) {
    list.extend(items.iter().map(|s| (*s).to_string()));
}

fn clothing_for_temperature(current: &CurrentConditions, recs: &mut RecommendationSet) {
    let t = current.temperature_c;
    if t < 0.0 {
        dress(
            recs,
            &[
                "Heavy winter coat",
                "Thermal base layers",
                "Insulated gloves",
                "Warm hat and scarf",
                "Insulated waterproof boots",
            ],
            "It's freezing outside. Limit exposure and watch for signs of frostbite.",
        );
    } else if t < 10.0 {
        dress(
            recs,
            &["Winter jacket", "Sweater or fleece", "Long pants", "Closed shoes"],
            "Dress in layers you can add or remove as the day changes.",
        );
    } else if t < 20.0 {
        dress(
            recs,
            &["Light jacket", "Long-sleeve shirt", "Jeans or trousers"],
            "Layering helps with cooler mornings and warmer afternoons.",
        );
    } else if t < 30.0 {
        dress(
            recs,
            &["T-shirt", "Light pants or shorts", "Comfortable shoes"],
            "Pleasant weather. A great day to spend some time outside.",
        );
    } else {
        dress(
            recs,
            &[
                "Lightweight breathable clothing",
                "Shorts",
                "Sandals or ventilated shoes",
                "Wide-brimmed hat",
            ],
            "It's hot. Drink water regularly and stay hydrated.",
        );
    }
}

fn dress(recs: &mut RecommendationSet, clothing: &[&str], tip: &str) {
    push_all(&mut recs.clothing, clothing);
    recs.tips.push(tip.to_string());
}

fn rain_gear(current: &CurrentConditions, recs: &mut RecommendationSet) {
    let rain = current.chance_of_rain_pct;
    if rain > RAIN_LIKELY_PCT {
        push_all(&mut recs.accessories, &["Umbrella", "Rain jacket"]);
        recs.tips.push("Rain is likely. Keep an umbrella within reach.".to_string());
    } else if rain > RAIN_POSSIBLE_PCT {
        push_all(&mut recs.accessories, &["Compact umbrella"]);
        recs.tips.push("Showers are possible. Light rain gear is worth packing.".to_string());
    }
}

fn sun_protection(current: &CurrentConditions, recs: &mut RecommendationSet) {
    let uv = current.uv_index;
    if uv >= 8.0 {
        push_all(
            &mut recs.accessories,
            &["Sunscreen SPF 50+", "Sunglasses", "Wide-brimmed hat"],
        );
        recs.tips.push("UV is very high. Reapply sunscreen every two hours.".to_string());
    } else if uv >= 6.0 {
        push_all(&mut recs.accessories, &["Sunscreen SPF 30+", "Sunglasses"]);
        recs.tips.push("UV is high. Seek shade around midday.".to_string());
    } else if uv >= 3.0 {
        push_all(&mut recs.accessories, &["Sunscreen SPF 15+"]);
        recs.tips.push("Moderate UV. Use sunscreen if you'll be outside for long.".to_string());
    }
}

fn wind_protection(current: &CurrentConditions, recs: &mut RecommendationSet) {
    if current.wind_speed_mps > WINDBREAKER_MPS {
        recs.clothing.push("Windbreaker".to_string());
        recs.tips.push("It's windy. Secure loose items and hold on to your hat.".to_string());
    }
}

fn humidity_tips(current: &CurrentConditions, recs: &mut RecommendationSet) {
    let humidity = current.humidity_pct;
    if humidity > HUMID_PCT {
        recs.tips.push("High humidity will make it feel warmer than it is.".to_string());
    } else if humidity < DRY_PCT {
        recs.tips.push("The air is dry. Drink water and moisturize.".to_string());
    }
}

fn activities(current: &CurrentConditions) -> Vec<String> {
    let t = current.temperature_c;
    let wet = current.mentions("rain")
        || current.mentions("storm")
        || current.chance_of_rain_pct > INDOOR_RAIN_PCT;

    let picks: &[&str] = if wet {
        &[
            "Visit a museum",
            "Catch a movie",
            "Indoor fitness class",
            "Read at a cozy café",
        ]
    } else if t > 25.0 && current.uv_index < 6.0 {
        &["Beach day", "Swimming", "Outdoor sports"]
    } else if t > 15.0 && t < 25.0 {
        &["Walking tour", "Cycling", "Picnic in the park"]
    } else if t < 5.0 {
        &["Ice skating", "Visit a museum", "Hot drinks at a café"]
    } else {
        &["Outdoor walk", "Sightseeing", "Photography"]
    };

    picks.iter().map(|s| (*s).to_string()).collect()
}
