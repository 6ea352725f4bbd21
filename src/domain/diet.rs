//! Diet plans keyed by anemia type.
//!
//! The four specific anemia types carry tailored plans; every other type
//! falls back to the general recovery plan.

use super::classification::AnemiaType;

#[derive(Debug, Clone, Copy)]
pub struct FoodItem {
    pub name: &'static str,
    pub benefit: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Meal {
    pub meal: &'static str,
    pub items: [&'static str; 3],
}

#[derive(Debug, Clone, Copy)]
pub struct DietPlan {
    pub title: &'static str,
    pub summary: &'static str,
    pub foods: [FoodItem; 6],
    pub avoid: [&'static str; 4],
    pub meals: [Meal; 4],
    pub tips: [&'static str; 4],
}

const fn food(name: &'static str, benefit: &'static str) -> FoodItem {
    FoodItem { name, benefit }
}

const fn meal(meal: &'static str, items: [&'static str; 3]) -> Meal {
    Meal { meal, items }
}

static IRON_DEFICIENCY: DietPlan = DietPlan {
    title: "Iron-Rich Recovery Diet",
    summary: "Focus on heme iron sources paired with vitamin C to maximize absorption. Avoid calcium and tannins near iron-rich meals.",
    foods: [
        food("Red Meat & Liver", "Highest heme iron bioavailability (2-3mg per 100g)"),
        food("Spinach & Dark Greens", "Non-heme iron + folate for RBC production"),
        food("Lentils & Beans", "Plant-based iron (3.3mg per cup) + protein"),
        food("Eggs (especially yolks)", "Iron + B12 for hemoglobin synthesis"),
        food("Citrus Fruits", "Vitamin C enhances iron absorption by 67%"),
        food("Fortified Cereals", "Up to 18mg iron per serving"),
    ],
    avoid: [
        "Tea/coffee within 1hr of meals (tannins block iron)",
        "Excess dairy with iron meals (calcium competes)",
        "Processed foods low in nutrients",
        "Antacids near meal times",
    ],
    meals: [
        meal("Breakfast", ["Fortified oatmeal with strawberries", "Orange juice (vitamin C boost)", "2 boiled eggs"]),
        meal("Lunch", ["Spinach salad with grilled chicken", "Lentil soup with lemon squeeze", "Whole grain bread"]),
        meal("Dinner", ["Lean beef stir-fry with bell peppers", "Brown rice", "Steamed broccoli"]),
        meal("Snacks", ["Dried apricots & pumpkin seeds", "Dark chocolate (70%+)", "Trail mix with nuts"]),
    ],
    tips: [
        "Pair iron foods with vitamin C sources",
        "Cook in cast iron cookware",
        "Space calcium supplements 2hrs from iron meals",
        "Soak beans/lentils to reduce phytates",
    ],
};

static MEGALOBLASTIC: DietPlan = DietPlan {
    title: "B12 & Folate Restoration Diet",
    summary: "Prioritize animal-based B12 sources and folate-rich vegetables. Consider supplementation if vegan/vegetarian.",
    foods: [
        food("Shellfish & Fish", "Clams provide 84µg B12 per 100g (3500% DV)"),
        food("Organ Meats (Liver)", "Richest natural B12 source + folate"),
        food("Fortified Nutritional Yeast", "Vegan B12 source (up to 17.6µg per tbsp)"),
        food("Asparagus & Broccoli", "High folate (134µg per cup asparagus)"),
        food("Eggs & Dairy", "Reliable B12 for vegetarians"),
        food("Leafy Greens", "Folate-dense for DNA synthesis"),
    ],
    avoid: [
        "Alcohol (depletes B12 & folate)",
        "Excessive cooking of vegetables (destroys folate)",
        "Processed grains (stripped of B vitamins)",
        "Smoking (impairs B12 absorption)",
    ],
    meals: [
        meal("Breakfast", ["Scrambled eggs with cheese", "Fortified cereal with milk", "Glass of fortified orange juice"]),
        meal("Lunch", ["Grilled salmon salad", "Asparagus & avocado wrap", "Greek yogurt"]),
        meal("Dinner", ["Baked cod with lemon", "Steamed broccoli & spinach", "Quinoa pilaf"]),
        meal("Snacks", ["Fortified smoothie with nutritional yeast", "Cheese & whole grain crackers", "Edamame"]),
    ],
    tips: [
        "Get B12 levels checked every 3 months",
        "Consider sublingual B12 if absorption is poor",
        "Eat folate foods raw or lightly steamed",
        "Vegans must supplement B12",
    ],
};

static CHRONIC_DISEASE: DietPlan = DietPlan {
    title: "Anti-Inflammatory Nutrition Plan",
    summary: "Focus on anti-inflammatory foods to address underlying chronic inflammation. Support overall nutritional status.",
    foods: [
        food("Fatty Fish (Salmon, Sardines)", "Omega-3 reduces inflammation markers by 20%"),
        food("Turmeric & Ginger", "Curcumin has potent anti-inflammatory effects"),
        food("Berries & Cherries", "Anthocyanins combat oxidative stress"),
        food("Olive Oil (Extra Virgin)", "Oleocanthal mimics anti-inflammatory drugs"),
        food("Nuts & Seeds", "Vitamin E + selenium for immune support"),
        food("Leafy Greens", "Antioxidants + micronutrients"),
    ],
    avoid: [
        "Refined sugars & processed foods",
        "Trans fats & fried foods",
        "Excess red meat (pro-inflammatory)",
        "Alcohol & sugary beverages",
    ],
    meals: [
        meal("Breakfast", ["Berry smoothie with turmeric", "Chia seed pudding", "Green tea"]),
        meal("Lunch", ["Mediterranean salad with olive oil", "Grilled salmon", "Sweet potato"]),
        meal("Dinner", ["Anti-inflammatory soup (turmeric, ginger)", "Baked fish with herbs", "Steamed vegetables"]),
        meal("Snacks", ["Walnuts & almonds", "Fresh berries", "Ginger tea with honey"]),
    ],
    tips: [
        "Follow Mediterranean diet principles",
        "Stay well hydrated (8+ glasses/day)",
        "Include probiotics for gut health",
        "Manage stress, it worsens inflammation",
    ],
};

static THALASSEMIA_TRAIT: DietPlan = DietPlan {
    title: "Thalassemia-Supportive Diet",
    summary: "Avoid excess iron (risk of overload) while supporting folate needs. Focus on antioxidants to combat oxidative stress.",
    foods: [
        food("Folate-Rich Greens", "Supports increased RBC turnover"),
        food("Whole Grains", "B vitamins without excess iron"),
        food("Tea (with meals)", "Tannins reduce iron absorption (beneficial here)"),
        food("Calcium-Rich Foods", "Dairy inhibits excess iron uptake"),
        food("Fruits & Vegetables", "Antioxidants to combat oxidative damage"),
        food("Legumes & Nuts", "Protein + zinc for immune function"),
    ],
    avoid: [
        "Iron supplements (risk of iron overload)",
        "Excess red meat & organ meats",
        "Iron-fortified cereals",
        "Vitamin C supplements with meals (enhances iron)",
    ],
    meals: [
        meal("Breakfast", ["Yogurt with granola & banana", "Tea with breakfast", "Whole grain toast"]),
        meal("Lunch", ["Chickpea & vegetable curry", "Brown rice", "Milk or cheese"]),
        meal("Dinner", ["Grilled chicken (moderate portions)", "Pasta with vegetable sauce", "Side salad with dairy dressing"]),
        meal("Snacks", ["Cheese & fruit", "Yogurt parfait", "Nuts & dried figs"]),
    ],
    tips: [
        "Do NOT take iron supplements",
        "Monitor ferritin levels regularly",
        "Folic acid supplementation may be needed",
        "Drink tea/coffee with meals to limit iron absorption",
    ],
};

static GENERAL: DietPlan = DietPlan {
    title: "General Anemia Recovery Diet",
    summary: "A balanced, nutrient-dense diet to support blood health and recovery. Focus on iron, B12, folate, and vitamin C.",
    foods: [
        food("Lean Red Meat", "Best source of heme iron"),
        food("Dark Leafy Greens", "Iron + folate + vitamin K"),
        food("Fish & Seafood", "B12 + omega-3 fatty acids"),
        food("Eggs", "Complete protein + B12 + iron"),
        food("Citrus Fruits", "Vitamin C for iron absorption"),
        food("Water & Hydration", "Supports blood volume & circulation"),
    ],
    avoid: [
        "Excess caffeine near meals",
        "Processed & junk foods",
        "Alcohol",
        "Calcium supplements with iron-rich meals",
    ],
    meals: [
        meal("Breakfast", ["Oatmeal with berries & eggs", "Orange juice", "Whole grain toast"]),
        meal("Lunch", ["Grilled chicken salad with spinach", "Lentil soup", "Whole wheat bread"]),
        meal("Dinner", ["Lean steak with broccoli", "Sweet potato", "Mixed vegetables"]),
        meal("Snacks", ["Trail mix", "Fresh fruit", "Yogurt"]),
    ],
    tips: [
        "Eat regular, balanced meals",
        "Combine iron + vitamin C foods",
        "Stay hydrated",
        "Follow up with your doctor",
    ],
};

/// Diet plan for an anemia type.
#[must_use]
pub fn diet_plan(anemia_type: AnemiaType) -> &'static DietPlan {
    match anemia_type {
        AnemiaType::IronDeficiency => &IRON_DEFICIENCY,
        AnemiaType::Megaloblastic => &MEGALOBLASTIC,
        AnemiaType::ChronicDisease => &CHRONIC_DISEASE,
        AnemiaType::ThalassemiaTrait => &THALASSEMIA_TRAIT,
        AnemiaType::NoAnemia | AnemiaType::Unclassified => &GENERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_plans() {
        assert_eq!(diet_plan(AnemiaType::IronDeficiency).title, "Iron-Rich Recovery Diet");
        assert_eq!(diet_plan(AnemiaType::ThalassemiaTrait).avoid[0], "Iron supplements (risk of iron overload)");
    }

    #[test]
    fn test_default_plan() {
        let general = diet_plan(AnemiaType::Unclassified);
        assert_eq!(general.title, "General Anemia Recovery Diet");
        assert!(std::ptr::eq(general, diet_plan(AnemiaType::NoAnemia)));
    }
}
