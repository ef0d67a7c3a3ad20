//! Brand and model driven derivation of technical specs.
//!
//! Each field is an ordered rule table evaluated top to bottom; the first
//! matching rule wins and the table fallback applies when none match.

use rand::Rng;

use crate::axes::{AxisCatalog, Brand};
use crate::synth::pick;

/// Predicate over a (brand, model name) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Brand(Brand),
    BrandModelContains(Brand, &'static str),
    ModelContainsAny(&'static [&'static str]),
}

impl Condition {
    pub fn matches(&self, brand: Brand, model: &str) -> bool {
        match self {
            Condition::Brand(expected) => *expected == brand,
            Condition::BrandModelContains(expected, needle) => {
                *expected == brand && model.contains(needle)
            }
            Condition::ModelContainsAny(needles) => {
                needles.iter().any(|needle| model.contains(needle))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub when: Condition,
    pub value: &'static str,
}

impl Rule {
    const fn new(when: Condition, value: &'static str) -> Self {
        Self { when, value }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub rules: &'static [Rule],
    pub fallback: &'static str,
}

impl RuleTable {
    pub fn evaluate(&self, brand: Brand, model: &str) -> &'static str {
        self.rules
            .iter()
            .find(|rule| rule.when.matches(brand, model))
            .map(|rule| rule.value)
            .unwrap_or(self.fallback)
    }
}

pub const DISPLAY_RULES: RuleTable = RuleTable {
    rules: &[
        Rule::new(
            Condition::BrandModelContains(Brand::IPhone, "Pro"),
            "6.7\" OLED 120Hz",
        ),
        Rule::new(Condition::Brand(Brand::IPhone), "6.1\" OLED 60Hz"),
        Rule::new(
            Condition::BrandModelContains(Brand::Samsung, "Ultra"),
            "6.8\" AMOLED 120Hz",
        ),
        Rule::new(Condition::Brand(Brand::Samsung), "6.6\" AMOLED 120Hz"),
    ],
    fallback: "6.5\" AMOLED 120Hz",
};

pub const CAMERA_RULES: RuleTable = RuleTable {
    rules: &[
        Rule::new(
            Condition::BrandModelContains(Brand::IPhone, "Pro"),
            "48MP+12MP+12MP",
        ),
        Rule::new(
            Condition::BrandModelContains(Brand::Samsung, "Ultra"),
            "108MP+12MP+10MP+10MP",
        ),
    ],
    fallback: "50MP+12MP+12MP",
};

pub const BATTERY_RULES: RuleTable = RuleTable {
    rules: &[
        Rule::new(
            Condition::BrandModelContains(Brand::IPhone, "Max"),
            "4352mAh",
        ),
        Rule::new(Condition::Brand(Brand::IPhone), "3095mAh"),
        Rule::new(
            Condition::BrandModelContains(Brand::Samsung, "Ultra"),
            "5000mAh",
        ),
        Rule::new(Condition::Brand(Brand::Samsung), "4500mAh"),
    ],
    fallback: "4500mAh",
};

pub const FINGERPRINT_RULES: RuleTable = RuleTable {
    rules: &[Rule::new(Condition::Brand(Brand::IPhone), "Face ID")],
    fallback: "In-Display",
};

/// Substring match that marks a recent model. Matches any occurrence, so
/// "Pixel 7a" or "X70" count as recent too.
pub const RECENT_MODEL: Condition = Condition::ModelContainsAny(&["13", "23", "7"]);
pub const RECENT_MODEL_NETWORK: &str = "5G";
/// Processor used when a brand has no processor options.
pub const UNKNOWN_PROCESSOR: &str = "Unknown";

/// Technical specs derived for one brand/model pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedSpecs {
    pub processor: String,
    pub display: String,
    pub camera: String,
    pub battery: String,
    pub fingerprint: String,
    pub network: String,
}

/// Derive the technical specs of a handset.
///
/// `model` is the bare model name without the brand prefix. Only the
/// processor and a non-forced network consult `rng`.
pub fn derive_specs<R: Rng + ?Sized>(
    brand_name: &str,
    model: &str,
    catalog: &AxisCatalog,
    rng: &mut R,
) -> DerivedSpecs {
    let brand = Brand::from_name(brand_name);

    let network = if RECENT_MODEL.matches(brand, model) {
        RECENT_MODEL_NETWORK
    } else {
        pick(&catalog.networks, rng).unwrap_or(RECENT_MODEL_NETWORK)
    };
    let processor = pick(catalog.processors_for(brand_name), rng).unwrap_or(UNKNOWN_PROCESSOR);

    DerivedSpecs {
        processor: processor.to_string(),
        display: DISPLAY_RULES.evaluate(brand, model).to_string(),
        camera: CAMERA_RULES.evaluate(brand, model).to_string(),
        battery: BATTERY_RULES.evaluate(brand, model).to_string(),
        fingerprint: FINGERPRINT_RULES.evaluate(brand, model).to_string(),
        network: network.to_string(),
    }
}
