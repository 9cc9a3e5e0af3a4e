use serde::Serialize;
use std::collections::BTreeMap;

use crate::AudienceCode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advertiser {
    pub id: String,
    pub display_name: String,
    pub quality: u32,
    pub target_audience: BTreeMap<AudienceCode, u32>,
}

impl Advertiser {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        quality: u32,
        targets: &[(AudienceCode, u32)],
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            quality,
            target_audience: targets.iter().copied().collect(),
        }
    }

    pub fn importance(&self, code: AudienceCode) -> Option<u32> {
        self.target_audience.get(&code).copied()
    }
}

pub fn builtin_roster() -> Vec<Advertiser> {
    use AudienceCode::*;

    vec![
        Advertiser::new("NBG", "NBG", 2, &[(AF, 0), (AM, 0)]),
        Advertiser::new("ROSS_AND_ROSS_BROS", "Ross & Ross Bros.", 1, &[(AF, 0), (AM, 0)]),
        Advertiser::new(
            "VIEN_PASCAL",
            "Vien Pascal",
            1,
            &[(YM, 1), (YF, 1), (AM, 1), (AF, 1)],
        ),
        Advertiser::new("SPARK", "Spark", 2, &[(YM, 2), (YF, 2), (AM, 2), (AF, 2)]),
        Advertiser::new(
            "NATE_SPARROW_PRESS",
            "Nate Sparrow Press",
            2,
            &[(YM, 0), (YF, 0), (AM, 0), (AF, 0)],
        ),
        Advertiser::new("VELVET_GLOSS", "Velvet Gloss", 2, &[(TF, 2), (YF, 2), (AF, 2)]),
        Advertiser::new(
            "PIERRE_ZOLA_COMPANY",
            "Pierre Zola Company",
            1,
            &[(TM, 2), (YM, 2), (AM, 2)],
        ),
        Advertiser::new(
            "SPICE_MICE",
            "Spice Mice",
            1,
            &[(TM, 2), (TF, 2), (YM, 2), (YF, 2)],
        ),
    ]
}
