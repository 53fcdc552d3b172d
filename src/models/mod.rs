use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub mod catalog;
pub mod recommendation;
pub mod similarity;
pub mod snapshot;

pub use catalog::{Catalog, CatalogSummary};
pub use recommendation::{RankOutcome, Recommendation};
pub use similarity::{SimilarityMatrix, SimilarityProvider};
pub use snapshot::Snapshot;

/// Marketplace identifier of a product (an ASIN for the bundled data set)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Boolean attributes a shopper can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    IsPrime,
    Wireless,
    NoiseCancelling,
    Microphone,
    Foldable,
    OverEar,
    Gaming,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::IsPrime,
        Feature::Wireless,
        Feature::NoiseCancelling,
        Feature::Microphone,
        Feature::Foldable,
        Feature::OverEar,
        Feature::Gaming,
    ];

    /// Catalog column holding this flag
    pub fn column(&self) -> &'static str {
        match self {
            Feature::IsPrime => "is_prime",
            Feature::Wireless => "wireless",
            Feature::NoiseCancelling => "noise_cancelling",
            Feature::Microphone => "microphone",
            Feature::Foldable => "foldable",
            Feature::OverEar => "over_ear",
            Feature::Gaming => "gaming",
        }
    }
}

/// Set of boolean flags carried by a product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub is_prime: bool,
    pub wireless: bool,
    pub noise_cancelling: bool,
    pub microphone: bool,
    pub foldable: bool,
    pub over_ear: bool,
    pub gaming: bool,
}

impl FeatureFlags {
    pub fn has(&self, feature: Feature) -> bool {
        match feature {
            Feature::IsPrime => self.is_prime,
            Feature::Wireless => self.wireless,
            Feature::NoiseCancelling => self.noise_cancelling,
            Feature::Microphone => self.microphone,
            Feature::Foldable => self.foldable,
            Feature::OverEar => self.over_ear,
            Feature::Gaming => self.gaming,
        }
    }

    pub fn set(&mut self, feature: Feature, value: bool) {
        let slot = match feature {
            Feature::IsPrime => &mut self.is_prime,
            Feature::Wireless => &mut self.wireless,
            Feature::NoiseCancelling => &mut self.noise_cancelling,
            Feature::Microphone => &mut self.microphone,
            Feature::Foldable => &mut self.foldable,
            Feature::OverEar => &mut self.over_ear,
            Feature::Gaming => &mut self.gaming,
        };
        *slot = value;
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.set(feature, true);
        self
    }
}

/// CSS4 named colours the offline feature stage can emit as `colour_<name>` columns
const CSS4_COLOUR_NAMES: [&str; 148] = [
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue",
    "chartreuse", "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan",
    "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey",
    "darkkhaki", "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred",
    "darksalmon", "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey",
    "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey",
    "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro",
    "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow", "grey", "honeydew",
    "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender", "lavenderblush",
    "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink",
    "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey",
    "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon",
    "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen",
    "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred",
    "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace",
    "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod", "palegreen",
    "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum",
    "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue",
    "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Closed set of colour categories produced by the offline feature stage
///
/// `NotSpecified` is the sentinel for listings whose description names no colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colour {
    Black,
    White,
    Grey,
    Silver,
    Gold,
    Blue,
    Red,
    Pink,
    Green,
    Purple,
    Beige,
    Brown,
    Orange,
    Yellow,
    Other,
    NotSpecified,
}

impl Colour {
    pub fn as_str(&self) -> &'static str {
        match self {
            Colour::Black => "black",
            Colour::White => "white",
            Colour::Grey => "grey",
            Colour::Silver => "silver",
            Colour::Gold => "gold",
            Colour::Blue => "blue",
            Colour::Red => "red",
            Colour::Pink => "pink",
            Colour::Green => "green",
            Colour::Purple => "purple",
            Colour::Beige => "beige",
            Colour::Brown => "brown",
            Colour::Orange => "orange",
            Colour::Yellow => "yellow",
            Colour::Other => "other",
            Colour::NotSpecified => "not_specified",
        }
    }

    /// Whether `name` is one of the CSS4 named colours
    pub fn is_css4_name(name: &str) -> bool {
        let name = name.trim().to_lowercase();
        CSS4_COLOUR_NAMES.contains(&name.as_str())
    }
}

impl Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Colour {
    type Err = String;

    /// Accepts the snake_case name as well as the column spellings found in
    /// exported data sets ("Not Specified", "gray").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        let colour = match normalized.as_str() {
            "black" => Colour::Black,
            "white" => Colour::White,
            "grey" | "gray" => Colour::Grey,
            "silver" => Colour::Silver,
            "gold" => Colour::Gold,
            "blue" => Colour::Blue,
            "red" => Colour::Red,
            "pink" => Colour::Pink,
            "green" => Colour::Green,
            "purple" => Colour::Purple,
            "beige" => Colour::Beige,
            "brown" => Colour::Brown,
            "orange" => Colour::Orange,
            "yellow" => Colour::Yellow,
            "other" => Colour::Other,
            "not_specified" | "unspecified" => Colour::NotSpecified,
            _ => return Err(format!("unknown colour '{}'", s)),
        };
        Ok(colour)
    }
}

/// A headphone listing with its structured attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    /// Average star rating, 1.0 to 5.0
    pub rating: f64,
    pub price: f64,
    /// Advertised battery life in hours, 0 when the listing does not say
    pub battery_life: u32,
    pub features: FeatureFlags,
    pub colour: Colour,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_parses_column_spellings() {
        assert_eq!("Not Specified".parse::<Colour>().unwrap(), Colour::NotSpecified);
        assert_eq!("gray".parse::<Colour>().unwrap(), Colour::Grey);
        assert_eq!("Black".parse::<Colour>().unwrap(), Colour::Black);
        assert!("chartreuse".parse::<Colour>().is_err());
    }

    #[test]
    fn test_css4_names() {
        assert!(Colour::is_css4_name("navy"));
        assert!(Colour::is_css4_name("Teal"));
        assert!(Colour::is_css4_name("darkslategrey"));
        assert!(!Colour::is_css4_name("mauve"));
        assert!(!Colour::is_css4_name("other"));
    }

    #[test]
    fn test_colour_serde_snake_case() {
        let json = serde_json::to_string(&Colour::NotSpecified).unwrap();
        assert_eq!(json, "\"not_specified\"");

        let colour: Colour = serde_json::from_str("\"silver\"").unwrap();
        assert_eq!(colour, Colour::Silver);
    }

    #[test]
    fn test_product_id_is_transparent() {
        let id = ProductId::new("B08PZHYWJS");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"B08PZHYWJS\"");
        assert_eq!(format!("{}", id), "B08PZHYWJS");
    }

    #[test]
    fn test_feature_flags_set_and_has() {
        let flags = FeatureFlags::default()
            .with(Feature::Wireless)
            .with(Feature::Gaming);
        assert!(flags.has(Feature::Wireless));
        assert!(flags.has(Feature::Gaming));
        assert!(!flags.has(Feature::Foldable));
    }
}
