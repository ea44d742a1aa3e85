//! The built-in reference catalog.
//!
//! Elements (`water`, `fire`, `earth`, `air`) and seeds are the raw inputs.
//! Production turns seeds into crops and raw materials into refined goods;
//! combination climbs from there toward tools, food, buildings, and
//! machines. Every combination multiset in this table is unique, so lookup
//! order never decides a match here.

use iconforge_types::ProductionCategory;

use crate::catalog::{CatalogBuilder, RecipeCatalog};
use crate::error::CatalogError;

/// `(id, ingredients, result)` for every combination recipe.
const COMBINATIONS: &[(&str, &[&str], &str)] = &[
    // Elements
    ("combo_mud", &["water", "earth"], "mud"),
    ("combo_steam", &["water", "fire"], "steam"),
    ("combo_dust", &["earth", "air"], "dust"),
    ("combo_energy", &["fire", "air"], "energy"),
    ("combo_lava", &["earth", "fire"], "lava"),
    ("combo_rain", &["water", "air"], "rain"),
    ("combo_cloud", &["steam", "air"], "cloud"),
    ("combo_storm", &["cloud", "energy"], "storm"),
    ("combo_obsidian", &["lava", "water"], "obsidian"),
    ("combo_volcano", &["lava", "stone"], "volcano"),
    ("combo_sand", &["stone", "air"], "sand"),
    ("combo_clay", &["mud", "sand"], "clay"),
    ("combo_rainbow", &["rain", "glass"], "rainbow"),
    // Growing things
    ("combo_sprout", &["seed_wheat", "water"], "sprout"),
    ("combo_plant", &["sprout", "earth"], "plant"),
    ("combo_tree", &["plant", "plant"], "tree"),
    ("combo_forest", &["tree", "tree", "tree"], "forest"),
    ("combo_farm", &["plant", "earth", "water"], "farm"),
    ("combo_field", &["farm", "farm"], "field"),
    ("combo_salad", &["tomato", "plant"], "salad"),
    // Staples
    ("combo_grain", &["wheat", "wheat"], "grain"),
    ("combo_flour", &["grain", "hardware"], "nutrition"),
    ("combo_porridge", &["grain", "water"], "porridge"),
    ("combo_dough", &["nutrition", "water"], "dough"),
    ("combo_bread", &["nutrition", "fire"], "bread"),
    ("combo_sauce", &["tomato", "fire"], "sauce"),
    ("combo_soup", &["tomato", "water"], "soup"),
    ("combo_pasta", &["dough", "sauce"], "pasta"),
    ("combo_pizza", &["dough", "tomato"], "pizza"),
    ("combo_popcorn", &["corn", "fire"], "popcorn"),
    ("combo_cornmeal", &["corn", "corn"], "cornmeal"),
    ("combo_tortilla", &["cornmeal", "water"], "tortilla"),
    ("combo_taco", &["tortilla", "sauce"], "taco"),
    ("combo_sandwich", &["bread", "salad"], "sandwich"),
    ("combo_beer", &["grain", "water", "barrel"], "beer"),
    ("combo_feast", &["bread", "pasta", "wine"], "feast"),
    // Orchard and cellar
    ("combo_juice", &["grape", "water"], "juice"),
    ("combo_raisin", &["grape", "fire"], "raisin"),
    ("combo_barrel", &["plank", "plank", "hardware"], "barrel"),
    ("combo_wine", &["juice", "barrel"], "wine"),
    ("combo_vinegar", &["wine", "air"], "vinegar"),
    // Textiles
    ("combo_thread", &["cotton", "tools"], "thread"),
    ("combo_cloth", &["thread", "thread"], "cloth"),
    ("combo_shirt", &["cloth", "thread"], "shirt"),
    ("combo_sail", &["cloth", "plank"], "sail"),
    ("combo_boat", &["plank", "plank", "sail"], "boat"),
    // Workshop
    ("combo_hardware", &["iron", "plank"], "hardware"),
    ("combo_tools", &["hardware", "stone"], "tools"),
    ("combo_log", &["tree", "tools"], "wood"),
    ("combo_wheel", &["plank", "tools"], "wheel"),
    ("combo_cart", &["wheel", "plank"], "cart"),
    ("combo_coin", &["iron", "tools"], "coin"),
    ("combo_steel", &["iron", "coal"], "steel"),
    ("combo_sword", &["steel", "tools"], "sword"),
    ("combo_gear", &["steel", "hardware"], "gear"),
    ("combo_mirror", &["glass", "iron"], "mirror"),
    // Pottery and glass
    ("combo_pottery", &["clay", "fire"], "pottery"),
    ("combo_vase", &["pottery", "water"], "vase"),
    ("combo_window", &["glass", "plank"], "window"),
    ("combo_lens", &["glass", "tools"], "lens"),
    ("combo_telescope", &["lens", "lens"], "telescope"),
    ("combo_bottle", &["glass", "water"], "bottle"),
    // Building
    ("combo_wall", &["brick", "brick"], "wall"),
    ("combo_roof", &["plank", "plank", "plank"], "roof"),
    ("combo_house", &["wall", "roof"], "house"),
    ("combo_village", &["house", "house"], "village"),
    ("combo_city", &["village", "village"], "city"),
    ("combo_mill", &["wheel", "wall"], "mill"),
    ("combo_bakery", &["bread", "house"], "bakery"),
    ("combo_market", &["coin", "house"], "market"),
    ("combo_bank", &["coin", "coin", "wall"], "bank"),
    // Writing
    ("combo_paper", &["plank", "water"], "paper"),
    ("combo_ink", &["coal", "water"], "ink"),
    ("combo_letter", &["paper", "ink"], "letter"),
    ("combo_newspaper", &["letter", "letter"], "newspaper"),
    ("combo_book", &["paper", "paper"], "book"),
    ("combo_library", &["book", "book", "book"], "library"),
    ("combo_knowledge", &["book", "energy"], "knowledge"),
    // Machines
    ("combo_engine", &["gear", "steam"], "engine"),
    ("combo_train", &["engine", "steel"], "train"),
    ("combo_car", &["engine", "wheel"], "car"),
    ("combo_electricity", &["energy", "iron"], "electricity"),
    ("combo_battery", &["electricity", "bottle"], "battery"),
    ("combo_lightbulb", &["electricity", "glass"], "lightbulb"),
    ("combo_computer", &["electricity", "knowledge"], "computer"),
    ("combo_robot", &["computer", "steel"], "robot"),
    // Weather and sky
    ("combo_lightning", &["storm", "energy"], "lightning"),
    ("combo_snow", &["rain", "air", "air"], "snow"),
    ("combo_ice", &["water", "air", "air"], "ice"),
    ("combo_fog", &["cloud", "earth"], "fog"),
    ("combo_sky", &["cloud", "cloud"], "sky"),
    ("combo_sun", &["fire", "sky"], "sun"),
    ("combo_moon", &["sky", "stone"], "moon"),
    ("combo_star", &["sky", "energy"], "star"),
    ("combo_ocean", &["water", "water", "water"], "ocean"),
    ("combo_lake", &["water", "water"], "lake"),
    ("combo_river", &["lake", "earth"], "river"),
    ("combo_wave", &["ocean", "air"], "wave"),
    ("combo_salt", &["ocean", "fire"], "salt"),
    ("combo_geyser", &["steam", "earth"], "geyser"),
    ("combo_swamp", &["mud", "plant"], "swamp"),
    ("combo_desert", &["sand", "sand", "sun"], "desert"),
    ("combo_beach", &["sand", "ocean"], "beach"),
    ("combo_mountain", &["earth", "earth", "stone"], "mountain"),
    ("combo_glacier", &["ice", "mountain"], "glacier"),
    ("combo_ash", &["volcano", "air"], "ash"),
    ("combo_island", &["volcano", "ocean"], "island"),
    // Wilds
    ("combo_flower", &["plant", "sun"], "flower"),
    ("combo_grass", &["plant", "rain"], "grass"),
    ("combo_moss", &["plant", "stone"], "moss"),
    ("combo_cactus", &["plant", "desert"], "cactus"),
    ("combo_mushroom", &["plant", "swamp"], "mushroom"),
    ("combo_meadow", &["grass", "flower"], "meadow"),
    ("combo_garden", &["flower", "flower"], "garden"),
    ("combo_honey", &["flower", "energy"], "honey"),
    ("combo_wax", &["honey", "fire"], "wax"),
    ("combo_candle", &["wax", "thread"], "candle"),
    ("combo_perfume", &["flower", "bottle"], "perfume"),
    ("combo_orchard", &["tree", "grape"], "orchard"),
    ("combo_jungle", &["forest", "rain"], "jungle"),
    ("combo_hay", &["grass", "sun"], "hay"),
    ("combo_rope", &["hay", "hay"], "rope"),
    ("combo_greenhouse", &["glass", "garden"], "greenhouse"),
    // Kitchen
    ("combo_cake", &["dough", "honey"], "cake"),
    ("combo_cookie", &["dough", "sun"], "cookie"),
    ("combo_pie", &["dough", "grape"], "pie"),
    ("combo_jam", &["grape", "honey"], "jam"),
    ("combo_toast", &["bread", "fire"], "toast"),
    ("combo_stew", &["soup", "salt"], "stew"),
    ("combo_chips", &["tortilla", "salt"], "chips"),
    ("combo_nachos", &["chips", "sauce"], "nachos"),
    ("combo_lasagna", &["pasta", "pasta", "sauce"], "lasagna"),
    ("combo_risotto", &["grain", "soup"], "risotto"),
    ("combo_pancake", &["dough", "pottery"], "pancake"),
    ("combo_syrup", &["honey", "water"], "syrup"),
    ("combo_lemonade", &["juice", "sun"], "lemonade"),
    ("combo_tea", &["plant", "steam"], "tea"),
    ("combo_picnic", &["sandwich", "juice"], "picnic"),
    ("combo_restaurant", &["feast", "house"], "restaurant"),
    // Crafts
    ("combo_net", &["rope", "rope"], "net"),
    ("combo_fish", &["net", "ocean"], "fish"),
    ("combo_sushi", &["fish", "grain"], "sushi"),
    ("combo_basket", &["hay", "tools"], "basket"),
    ("combo_hat", &["cloth", "hay"], "hat"),
    ("combo_quilt", &["cloth", "cloth", "thread"], "quilt"),
    ("combo_bed", &["plank", "quilt"], "bed"),
    ("combo_chair", &["plank", "plank", "tools"], "chair"),
    ("combo_table", &["plank", "plank", "plank", "tools"], "table"),
    ("combo_door", &["plank", "hardware", "wall"], "door"),
    ("combo_fence", &["plank", "rope"], "fence"),
    ("combo_ladder", &["plank", "plank", "rope"], "ladder"),
    ("combo_paint", &["flower", "ink"], "paint"),
    ("combo_canvas", &["cloth", "tools", "plank"], "canvas"),
    ("combo_painting", &["paint", "canvas"], "painting"),
    ("combo_museum", &["painting", "house"], "museum"),
    ("combo_statue", &["stone", "tools"], "statue"),
    // Settlement
    ("combo_road", &["stone", "stone", "cart"], "road"),
    ("combo_bridge", &["road", "river"], "bridge"),
    ("combo_well", &["wall", "water"], "well"),
    ("combo_barn", &["house", "hay"], "barn"),
    ("combo_stable", &["barn", "fence"], "stable"),
    ("combo_harbor", &["boat", "village"], "harbor"),
    ("combo_lighthouse", &["lightbulb", "wall"], "lighthouse"),
    ("combo_castle", &["wall", "wall", "sword"], "castle"),
    ("combo_school", &["book", "house"], "school"),
    ("combo_university", &["school", "library"], "university"),
    ("combo_hospital", &["house", "knowledge"], "hospital"),
    ("combo_factory", &["engine", "house"], "factory"),
    ("combo_skyscraper", &["steel", "steel", "glass"], "skyscraper"),
    ("combo_metropolis", &["city", "skyscraper"], "metropolis"),
    // Industry and science
    ("combo_chain", &["steel", "steel"], "chain"),
    ("combo_anchor", &["chain", "boat"], "anchor"),
    ("combo_clock", &["gear", "gear"], "clock"),
    ("combo_compass", &["iron", "lens"], "compass"),
    ("combo_microscope", &["lens", "tools", "glass"], "microscope"),
    ("combo_wire", &["steel", "thread"], "wire"),
    ("combo_magnet", &["electricity", "steel"], "magnet"),
    ("combo_motor", &["magnet", "wire"], "motor"),
    ("combo_telephone", &["wire", "letter"], "telephone"),
    ("combo_radio", &["electricity", "wave"], "radio"),
    ("combo_television", &["radio", "glass"], "television"),
    ("combo_solar_panel", &["sun", "glass", "electricity"], "solar_panel"),
    ("combo_windmill", &["wheel", "air", "wall"], "windmill"),
    ("combo_airplane", &["engine", "sail"], "airplane"),
    ("combo_rocket", &["engine", "sky"], "rocket"),
    ("combo_satellite", &["rocket", "computer"], "satellite"),
    ("combo_internet", &["computer", "computer"], "internet"),
    ("combo_phone", &["telephone", "computer"], "phone"),
    ("combo_ai", &["robot", "knowledge"], "artificial_intelligence"),
];

/// `(id, ingredients, result, base seconds, category, discovered)` for every
/// production recipe.
const PRODUCTIONS: &[(&str, &[&str], &str, f64, ProductionCategory, bool)] = &[
    ("wheat_production", &["seed_wheat"], "wheat", 15.0, ProductionCategory::Plant, true),
    ("corn_production", &["seed_corn"], "corn", 20.0, ProductionCategory::Plant, false),
    ("tomato_production", &["seed_tomato"], "tomato", 18.0, ProductionCategory::Plant, false),
    ("cotton_production", &["seed_cotton"], "cotton", 22.0, ProductionCategory::Plant, false),
    ("grape_production", &["seed_grape"], "grape", 25.0, ProductionCategory::Plant, false),
    ("plank_production", &["wood"], "plank", 12.0, ProductionCategory::ManufacturedGood, true),
    ("brick_production", &["clay"], "brick", 20.0, ProductionCategory::ManufacturedGood, false),
    ("glass_production", &["sand", "sand"], "glass", 30.0, ProductionCategory::ManufacturedGood, false),
    ("iron_production", &["iron_ore", "coal"], "iron", 28.0, ProductionCategory::ManufacturedGood, false),
    ("cloth_production", &["cotton", "cotton"], "cloth", 26.0, ProductionCategory::ManufacturedGood, false),
];

/// Build the reference catalog.
///
/// # Errors
///
/// Returns [`CatalogError`] if the built-in tables fail validation, which
/// the tests below rule out.
pub fn reference_catalog() -> Result<RecipeCatalog, CatalogError> {
    let mut builder = CatalogBuilder::default();
    for &(id, ingredients, result) in COMBINATIONS {
        builder = builder.combination(id, ingredients, result);
    }
    for &(id, ingredients, result, seconds, category, discovered) in PRODUCTIONS {
        builder = builder.production(id, ingredients, result, seconds, category);
        if discovered {
            builder = builder.discovered();
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn reference_catalog_validates() {
        let catalog = reference_catalog();
        assert!(catalog.is_ok());
        let catalog = catalog.unwrap_or_default();
        assert_eq!(catalog.combinations().len(), COMBINATIONS.len());
        assert_eq!(catalog.productions().len(), PRODUCTIONS.len());
    }

    #[test]
    fn combination_multisets_are_unique() {
        let mut seen = BTreeSet::new();
        for (id, ingredients, _) in COMBINATIONS {
            let mut key: Vec<&str> = ingredients.to_vec();
            key.sort_unstable();
            assert!(seen.insert(key), "{id} repeats an earlier ingredient multiset");
        }
    }

    #[test]
    fn catalog_has_full_reference_size() {
        let catalog = reference_catalog().unwrap_or_default();
        assert_eq!(catalog.len(), 199);
        assert_eq!(catalog.productions().len(), 10);
    }

    #[test]
    fn flour_recipe_present() {
        let catalog = reference_catalog().unwrap_or_default();
        let flour = catalog.combination("combo_flour");
        assert!(flour.is_some_and(|r| r.result.as_str() == "nutrition"));
    }

    #[test]
    fn wheat_production_is_a_starter() {
        let catalog = reference_catalog().unwrap_or_default();
        let wheat = catalog.production("wheat_production");
        assert!(wheat.is_some_and(|r| {
            r.discovered
                && r.category == ProductionCategory::Plant
                && r.ingredients.len() == 1
                && (r.base_duration_secs - 15.0).abs() < f64::EPSILON
        }));
    }
}
