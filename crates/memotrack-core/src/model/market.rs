use serde::{Deserialize, Serialize};

/// The fixed set of market locations memos are filed against.
///
/// These strings are the canonical identifiers used in the data file and
/// over the wire; they must match exactly (case-sensitive). The odd
/// spellings are preserved from existing data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "Apo ZoneA")]
    ApoZoneA,
    #[serde(rename = "Area1 shopping complex")]
    Area1ShoppingComplex,
    #[serde(rename = "Area 2 shopping complex")]
    Area2ShoppingComplex,
    #[serde(rename = "Area 10 market")]
    Area10Market,
    #[serde(rename = "Area 3 market")]
    Area3Market,
    #[serde(rename = "Dei Dei Markets")]
    DeiDeiMarkets,
    #[serde(rename = "Garki International Market")]
    GarkiInternationalMarket,
    #[serde(rename = "Garki Model Market")]
    GarkiModelMarket,
    #[serde(rename = "Gudu Market")]
    GuduMarket,
    #[serde(rename = "Head Office")]
    HeadOffice,
    #[serde(rename = "Kado Fish Market")]
    KadoFishMarket,
    #[serde(rename = "Kaura Market")]
    KauraMarket,
    #[serde(rename = "Maitama Farmers Market")]
    MaitamaFarmersMarket,
    #[serde(rename = "Wuse Market")]
    WuseMarket,
    #[serde(rename = "Zone 3 neighnourhood center")]
    Zone3NeighbourhoodCenter,
}

impl Market {
    pub const ALL: [Market; 15] = [
        Market::ApoZoneA,
        Market::Area1ShoppingComplex,
        Market::Area2ShoppingComplex,
        Market::Area10Market,
        Market::Area3Market,
        Market::DeiDeiMarkets,
        Market::GarkiInternationalMarket,
        Market::GarkiModelMarket,
        Market::GuduMarket,
        Market::HeadOffice,
        Market::KadoFishMarket,
        Market::KauraMarket,
        Market::MaitamaFarmersMarket,
        Market::WuseMarket,
        Market::Zone3NeighbourhoodCenter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Market::ApoZoneA => "Apo ZoneA",
            Market::Area1ShoppingComplex => "Area1 shopping complex",
            Market::Area2ShoppingComplex => "Area 2 shopping complex",
            Market::Area10Market => "Area 10 market",
            Market::Area3Market => "Area 3 market",
            Market::DeiDeiMarkets => "Dei Dei Markets",
            Market::GarkiInternationalMarket => "Garki International Market",
            Market::GarkiModelMarket => "Garki Model Market",
            Market::GuduMarket => "Gudu Market",
            Market::HeadOffice => "Head Office",
            Market::KadoFishMarket => "Kado Fish Market",
            Market::KauraMarket => "Kaura Market",
            Market::MaitamaFarmersMarket => "Maitama Farmers Market",
            Market::WuseMarket => "Wuse Market",
            Market::Zone3NeighbourhoodCenter => "Zone 3 neighnourhood center",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Market {
    type Err = crate::error::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Market::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| crate::error::Error::Validation(format!("unknown market: {s}")))
    }
}
